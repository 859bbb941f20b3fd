//! Write-once session persistence
//!
//! Features:
//! - One pretty-printed JSON document per finished session
//! - Timestamp-keyed names, never overwritten
//! - Filesystem store (native) and LocalStorage store (wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use store::SessionStore;

use thiserror::Error;

use crate::sim::SessionRecord;

/// Errors surfaced while saving or loading a session record
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("no free name for session {0} after {1} attempts")]
    NameExhausted(String, u32),

    #[error("session already saved")]
    AlreadySaved,
}

/// Somewhere a finished session can be written
pub trait SessionSink {
    /// Write the record once; returns where it went
    fn persist(&mut self, record: &SessionRecord) -> Result<String, PersistError>;
}

/// Name stem for a session saved at `unix_secs`
pub fn session_key(unix_secs: i64) -> String {
    format!("game_session_{}", unix_secs)
}

/// Candidate names for a key: `key`, then `key-1`, `key-2`, ...
pub(crate) fn candidate_name(key: &str, attempt: u32) -> String {
    if attempt == 0 {
        key.to_string()
    } else {
        format!("{}-{}", key, attempt)
    }
}
