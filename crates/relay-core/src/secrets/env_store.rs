//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Mapping from backend provider names to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("openai", vec!["OPENAI_API_KEY"]);
    m.insert("anthropic", vec!["ANTHROPIC_API_KEY"]);
    m.insert("deepseek", vec!["DEEPSEEK_API_KEY"]);
    m.insert("gemini", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("google", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("mistral", vec!["MISTRAL_API_KEY"]);
    m.insert("groq", vec!["GROQ_API_KEY"]);
    m.insert("openrouter", vec!["OPENROUTER_API_KEY"]);
    m.insert("ollama", vec![]); // Ollama doesn't need an API key
    m
});

/// Secret store that reads from environment variables
///
/// Read-only. Provider names map to their conventional variables
/// (`deepseek` → `DEEPSEEK_API_KEY`); anything else is tried verbatim and
/// then as `{NAME}_API_KEY`.
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    /// Create a new environment variable secret store
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// The environment variable names consulted for a provider
    pub fn env_vars_for_provider(provider: &str) -> Vec<String> {
        let lower = provider.to_lowercase();
        match ENV_VAR_MAP.get(lower.as_str()) {
            Some(vars) => vars.iter().map(|v| v.to_string()).collect(),
            None => vec![format!("{}_API_KEY", provider.to_uppercase())],
        }
    }
}

fn non_empty(value: Result<String, env::VarError>) -> Option<String> {
    value.ok().filter(|v| !v.is_empty())
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        // Direct env var access first
        if let Some(value) = non_empty(env::var(key)) {
            return Some(value);
        }

        // Then the provider-name mapping
        let lower = key.to_lowercase();
        if let Some(env_vars) = ENV_VAR_MAP.get(lower.as_str()) {
            for env_var in env_vars {
                if let Some(value) = non_empty(env::var(env_var)) {
                    return Some(value);
                }
            }
        }

        // Finally the uppercase name with an _API_KEY suffix
        non_empty(env::var(format!("{}_API_KEY", key.to_uppercase())))
    }

    fn store(&self, _key: &str, _value: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_store_name() {
        assert_eq!(EnvSecretStore::new().name(), "env");
    }

    #[test]
    fn test_env_store_read_only() {
        let store = EnvSecretStore::new();
        assert!(matches!(
            store.store("test", "value"),
            Err(SecretStoreError::ReadOnly)
        ));
    }

    #[test]
    fn test_env_store_get_direct() {
        env::set_var("RELAY_TEST_SECRET_12345", "test_value");

        let store = EnvSecretStore::new();
        assert_eq!(
            store.get("RELAY_TEST_SECRET_12345"),
            Some("test_value".to_string())
        );

        env::remove_var("RELAY_TEST_SECRET_12345");
    }

    #[test]
    fn test_env_store_get_mapped() {
        env::set_var("DEEPSEEK_API_KEY", "sk-test-12345");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("deepseek"), Some("sk-test-12345".to_string()));
        assert_eq!(store.get("DeepSeek"), Some("sk-test-12345".to_string()));
        assert_eq!(
            store.get("DEEPSEEK_API_KEY"),
            Some("sk-test-12345".to_string())
        );

        env::remove_var("DEEPSEEK_API_KEY");
    }

    #[test]
    fn test_env_store_get_not_found() {
        assert_eq!(EnvSecretStore::new().get("nonexistent_provider_xyz"), None);
    }

    #[test]
    fn test_env_vars_for_provider() {
        assert_eq!(
            EnvSecretStore::env_vars_for_provider("deepseek"),
            vec!["DEEPSEEK_API_KEY"]
        );
        assert!(EnvSecretStore::env_vars_for_provider("ollama").is_empty());
        assert_eq!(
            EnvSecretStore::env_vars_for_provider("custom"),
            vec!["CUSTOM_API_KEY"]
        );
    }
}
