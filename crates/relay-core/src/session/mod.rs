//! Session persistence
//!
//! The engine core is unaware of persistence; stores implement a minimal
//! save/load/list interface keyed by user-facing session names.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Session;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Errors from session persistence
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session '{name}' not found at {}", .path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal interface for session persistence
pub trait SessionStore: Send + Sync {
    /// Persist the session under the given name, overwriting any previous
    /// session with that name
    fn save(&self, session: &Session, name: &str) -> StoreResult<()>;

    /// Load a session by name
    fn load(&self, name: &str) -> StoreResult<Session>;

    /// Sorted list of stored session names
    fn list(&self) -> StoreResult<Vec<String>>;
}
