//! LocalStorage session store (wasm32 only)

use web_sys::Storage;

use super::{PersistError, SessionSink, candidate_name, session_key};
use crate::platform;
use crate::sim::SessionRecord;

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Writes each session record under its own LocalStorage key
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("LocalStorage".to_string()))
    }
}

impl SessionSink for LocalStorageStore {
    fn persist(&mut self, record: &SessionRecord) -> Result<String, PersistError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(record)?;
        let key = session_key(platform::unix_secs());

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = candidate_name(&key, attempt);
            let taken = storage
                .get_item(&name)
                .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?
                .is_some();
            if taken {
                continue;
            }
            storage
                .set_item(&name, &json)
                .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?;
            log::info!("Session record saved to LocalStorage key {}", name);
            return Ok(name);
        }

        Err(PersistError::NameExhausted(key, MAX_NAME_ATTEMPTS))
    }
}
