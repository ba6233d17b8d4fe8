//! Filesystem-backed session store (JSON)

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Session;

use super::{SessionStore, StoreError, StoreResult};

/// One pretty-printed JSON file per session: `<root>/<name>.json`
///
/// Default root: `~/.relay/sessions`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    root: PathBuf,
}

impl FileSessionStore {
    /// Create a store over an explicit root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store over the default root (`~/.relay/sessions`)
    pub fn default_root() -> Self {
        let root = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".relay")
            .join("sessions");
        Self::new(root)
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn session_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session, name: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        let content = serde_json::to_string_pretty(session)?;
        fs::write(self.session_path(name), content)?;
        Ok(())
    }

    fn load(&self, name: &str) -> StoreResult<Session> {
        let path = self.session_path(name);
        if !path.exists() {
            return Err(StoreError::NotFound {
                name: name.to_string(),
                path,
            });
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_creates_json() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let session = Session::new();

        store.save(&session, "demo").unwrap();

        let path = dir.path().join("demo.json");
        assert!(path.exists());
        let data: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(data["id"], serde_json::json!(session.id));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let mut session = Session::new();
        session.record_exchange("ping", "pong");

        store.save(&session, "rt").unwrap();
        let loaded = store.load("rt").unwrap();

        assert_eq!(loaded.id, session.id);
        assert_eq!(loaded.created_at, session.created_at);
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[0].content, "ping");
        assert_eq!(loaded.messages[0].timestamp, session.messages[0].timestamp);
        assert_eq!(loaded.messages[1].content, "pong");
    }

    #[test]
    fn test_load_missing_fails() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let err = store.load("nonexistent").unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_list_sorted() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        for name in ["beta", "alpha", "gamma"] {
            store.save(&Session::new(), name).unwrap();
        }

        assert_eq!(store.list().unwrap(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_list_missing_root_empty() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let deep = dir.path().join("a").join("b");
        let store = FileSessionStore::new(&deep);

        store.save(&Session::new(), "nested").unwrap();
        assert!(deep.join("nested.json").exists());
    }

    #[test]
    fn test_overwrite_on_save() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let mut session = Session::new();

        store.save(&session, "ow").unwrap();
        session.record_exchange("added", "reply");
        store.save(&session, "ow").unwrap();

        assert_eq!(store.load("ow").unwrap().messages.len(), 2);
    }
}
