//! In-memory session store

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::types::Session;

use super::{SessionStore, StoreError, StoreResult};

/// In-memory session store for testing and throwaway REPL runs
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Remove all stored sessions
    pub fn clear(&self) {
        self.sessions.write().unwrap().clear();
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session, name: &str) -> StoreResult<()> {
        self.sessions
            .write()
            .unwrap()
            .insert(name.to_string(), session.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> StoreResult<Session> {
        self.sessions
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
                path: PathBuf::from("<memory>"),
            })
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.sessions.read().unwrap().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
