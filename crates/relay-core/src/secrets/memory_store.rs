//! In-memory secret store

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::{SecretStore, SecretStoreResult};

/// In-memory secret store for testing
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store with initial secrets
    pub fn with_secrets<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            secrets: RwLock::new(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Remove all stored secrets
    pub fn clear(&self) {
        self.secrets.write().unwrap().clear();
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.read().unwrap().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()> {
        self.secrets
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySecretStore::new();
        assert_eq!(store.get("deepseek"), None);

        store.store("deepseek", "sk-123").unwrap();
        assert_eq!(store.get("deepseek"), Some("sk-123".to_string()));
        assert!(store.has("deepseek"));
    }

    #[test]
    fn test_with_secrets() {
        let store = MemorySecretStore::with_secrets([("openai", "sk-a"), ("deepseek", "sk-b")]);
        assert_eq!(store.get("openai"), Some("sk-a".to_string()));
        assert_eq!(store.get("deepseek"), Some("sk-b".to_string()));

        store.clear();
        assert!(!store.has("openai"));
    }
}
