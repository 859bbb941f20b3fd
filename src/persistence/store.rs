//! Filesystem session store

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{PersistError, SessionSink, candidate_name, session_key};
use crate::platform;
use crate::sim::SessionRecord;

/// Give up after this many name collisions within one second
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Writes each session record to its own JSON file under `dir`
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write a record under a name derived from `unix_secs`
    ///
    /// Existing files are never replaced: a `-N` suffix is appended on
    /// collision.
    pub fn save_at(&self, record: &SessionRecord, unix_secs: i64) -> Result<PathBuf, PersistError> {
        self.write_new(&session_key(unix_secs), |writer| {
            Ok(serde_json::to_writer_pretty(writer, record)?)
        })
    }

    /// Write the whole document to a temp file in `dir`, then link it under
    /// the first free name for `key`
    ///
    /// A failed write leaves nothing under a session name.
    fn write_new<F>(&self, key: &str, write: F) -> Result<PathBuf, PersistError>
    where
        F: FnOnce(&mut dyn Write) -> Result<(), PersistError>,
    {
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            write(&mut writer)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.dir.join(format!("{}.json", candidate_name(key, attempt)));
            match tmp.persist_noclobber(&path) {
                Ok(_) => {
                    log::info!("Session record written to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                    log::debug!("{} exists, trying next name", path.display());
                    tmp = e.file;
                }
                Err(e) => return Err(e.error.into()),
            }
        }

        Err(PersistError::NameExhausted(key.to_string(), MAX_NAME_ATTEMPTS))
    }

    /// Read a record back
    pub fn load(path: &Path) -> Result<SessionRecord, PersistError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl SessionSink for SessionStore {
    fn persist(&mut self, record: &SessionRecord) -> Result<String, PersistError> {
        self.save_at(record, platform::unix_secs())
            .map(|p| p.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, ItemSnapshot};
    use tempfile::TempDir;

    /// Every file left in `dir`, sorted by name
    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn record() -> SessionRecord {
        SessionRecord {
            player_name: "Ada".to_string(),
            age: 6,
            score: 12,
            highest_level: 3,
            total_attempts: 2,
            history: vec![
                GameEvent {
                    level: 1,
                    item: ItemSnapshot {
                        name: "Apple".to_string(),
                        category: "Fruits".to_string(),
                    },
                    basket: "Dairy".to_string(),
                    is_correct: false,
                    timestamp: 1_700_000_000_123.0,
                },
                GameEvent {
                    level: 1,
                    item: ItemSnapshot {
                        name: "Apple".to_string(),
                        category: "Fruits".to_string(),
                    },
                    basket: "Fruits".to_string(),
                    is_correct: true,
                    timestamp: 1_700_000_001_456.5,
                },
            ],
            saved_at: "2026-10-14 09:30:00".to_string(),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("data"));
        let original = record();

        let path = store.save_at(&original, 1_700_000_000).unwrap();
        assert_eq!(path.file_name().unwrap(), "game_session_1700000000.json");

        let loaded = SessionStore::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_collision_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());
        let first = record();
        let mut second = record();
        second.score = 99;

        let p1 = store.save_at(&first, 42).unwrap();
        let p2 = store.save_at(&second, 42).unwrap();
        assert_ne!(p1, p2);
        assert_eq!(p2.file_name().unwrap(), "game_session_42-1.json");

        assert_eq!(SessionStore::load(&p1).unwrap().score, 12);
        assert_eq!(SessionStore::load(&p2).unwrap().score, 99);
        assert_eq!(
            dir_entries(temp_dir.path()),
            vec!["game_session_42-1.json", "game_session_42.json"]
        );
    }

    #[test]
    fn test_interrupted_write_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());

        let err = store
            .write_new("game_session_7", |writer| {
                writer.write_all(b"{ \"player_name\": \"Ad")?;
                Err(PersistError::Io(std::io::Error::other("disk full")))
            })
            .unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
        assert!(dir_entries(temp_dir.path()).is_empty());

        // The retry takes the unsuffixed name
        let path = store.save_at(&record(), 7).unwrap();
        assert_eq!(path.file_name().unwrap(), "game_session_7.json");
        assert_eq!(SessionStore::load(&path).unwrap(), record());
        assert_eq!(dir_entries(temp_dir.path()), vec!["game_session_7.json"]);
    }

    #[test]
    fn test_exhausted_names_leave_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = format!("{}.json", candidate_name("game_session_9", attempt));
            fs::write(temp_dir.path().join(name), b"{}").unwrap();
        }

        let err = store.save_at(&record(), 9).unwrap_err();
        assert!(matches!(err, PersistError::NameExhausted(_, MAX_NAME_ATTEMPTS)));
        assert_eq!(dir_entries(temp_dir.path()).len(), MAX_NAME_ATTEMPTS as usize);
    }

    #[test]
    fn test_write_failure_reported() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be
        let blocker = temp_dir.path().join("data");
        fs::write(&blocker, b"not a directory").unwrap();

        let mut store = SessionStore::new(&blocker);
        let err = store.persist(&record()).unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("game_session_1.json");
        fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(SessionStore::load(&path), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_finished_session_roundtrip() {
        use crate::consts::MAX_NAME_LEN;
        use crate::feedback::NoFeedback;
        use crate::sim::{Action, PlayerProfile, Session, step};

        let profile = PlayerProfile::new("Lu", 4, MAX_NAME_LEN).unwrap();
        let mut session = Session::new(profile, 77);
        for t in 0..3 {
            let item = session.round.items[0].clone();
            let basket = session
                .round
                .baskets
                .iter()
                .find(|b| b.label == item.category)
                .map(|b| b.id)
                .unwrap();
            step(&mut session, Action::SelectItem(item.id), &mut NoFeedback, t as f64).unwrap();
            step(&mut session, Action::ChooseBasket(basket), &mut NoFeedback, t as f64 + 0.5)
                .unwrap();
        }

        let temp_dir = TempDir::new().unwrap();
        let mut store = SessionStore::new(temp_dir.path());
        let location = session.finish(&mut store, "2026-10-14 12:00:00").unwrap();
        assert!(session.is_finished());

        let loaded = SessionStore::load(Path::new(&location)).unwrap();
        assert_eq!(loaded, session.record("2026-10-14 12:00:00"));
        assert_eq!(loaded.total_attempts, 3);
        assert_eq!(loaded.score, 3);
        assert_eq!(loaded.history.len(), 3);
    }
}
