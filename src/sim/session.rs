//! Player session: profile, current round, score and history
//!
//! A `Session` is the only mutable game state. It is passed explicitly to
//! `step` and never shared between players.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::state::{GameEvent, RoundPhase, RoundState, SessionRecord};
use crate::consts::{MAX_AGE, MIN_AGE};
use crate::persistence::{PersistError, SessionSink};

/// Rejected session-start input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("please tell us your name first")]
    EmptyName,

    #[error("name is longer than {max} characters")]
    NameTooLong { max: usize },

    #[error("could not read an age from {0:?}")]
    InvalidAge(String),

    #[error("age {age} is outside {min}..={max}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },
}

/// Who is playing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: String,
    pub age: u32,
}

impl PlayerProfile {
    pub fn new(name: &str, age: u32, max_name_len: usize) -> Result<Self, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if name.chars().count() > max_name_len {
            return Err(ProfileError::NameTooLong { max: max_name_len });
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ProfileError::AgeOutOfRange {
                age,
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }
        Ok(Self {
            name: name.to_string(),
            age,
        })
    }

    /// Validate raw form input (age as typed)
    pub fn parse(name: &str, age: &str, max_name_len: usize) -> Result<Self, ProfileError> {
        let age = age
            .trim()
            .parse::<u32>()
            .map_err(|_| ProfileError::InvalidAge(age.to_string()))?;
        Self::new(name, age, max_name_len)
    }
}

/// Text shown to the player after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub positive: bool,
}

/// One player's continuous play
#[derive(Debug, Clone)]
pub struct Session {
    pub profile: PlayerProfile,
    pub round: RoundState,
    pub phase: RoundPhase,
    pub score: u64,
    pub total_attempts: u32,
    pub history: Vec<GameEvent>,
    pub feedback: Option<Feedback>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Start at level 1 with a freshly generated round
    pub fn new(profile: PlayerProfile, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let round = RoundState::generate(1, profile.age, &mut rng);
        log::info!(
            "Session started for {} (age {}), seed {}",
            profile.name,
            profile.age,
            seed
        );
        Self {
            profile,
            round,
            phase: RoundPhase::AwaitingSelection,
            score: 0,
            total_attempts: 0,
            history: Vec::new(),
            feedback: None,
            rng,
        }
    }

    pub fn level(&self) -> u32 {
        self.round.level
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RoundPhase::Finished
    }

    /// Snapshot of everything the session record persists
    pub fn record(&self, saved_at: impl Into<String>) -> SessionRecord {
        SessionRecord {
            player_name: self.profile.name.clone(),
            age: self.profile.age,
            score: self.score,
            highest_level: self.round.level,
            total_attempts: self.total_attempts,
            history: self.history.clone(),
            saved_at: saved_at.into(),
        }
    }

    /// Persist the session record and end play
    ///
    /// On error the session is left untouched so the caller can retry. A
    /// finished session has already been written and is refused.
    pub fn finish<S: SessionSink + ?Sized>(
        &mut self,
        sink: &mut S,
        saved_at: impl Into<String>,
    ) -> Result<String, PersistError> {
        if self.is_finished() {
            return Err(PersistError::AlreadySaved);
        }
        let record = self.record(saved_at);
        let location = sink.persist(&record)?;
        self.phase = RoundPhase::Finished;
        log::info!(
            "Session for {} saved to {} (score {}, level {})",
            record.player_name,
            location,
            record.score,
            record.highest_level
        );
        Ok(location)
    }

    /// Play again with the same player: back to level 1, history cleared
    pub fn restart(&mut self) {
        self.round = RoundState::generate(1, self.profile.age, &mut self.rng);
        self.phase = RoundPhase::AwaitingSelection;
        self.score = 0;
        self.total_attempts = 0;
        self.history.clear();
        self.feedback = None;
        log::info!("Session restarted for {}", self.profile.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_NAME_LEN;

    struct FailingSink;

    impl SessionSink for FailingSink {
        fn persist(&mut self, _record: &SessionRecord) -> Result<String, PersistError> {
            Err(PersistError::Io(std::io::Error::other("disk full")))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        records: Vec<SessionRecord>,
    }

    impl SessionSink for MemorySink {
        fn persist(&mut self, record: &SessionRecord) -> Result<String, PersistError> {
            self.records.push(record.clone());
            Ok(format!("memory:{}", self.records.len()))
        }
    }

    fn profile() -> PlayerProfile {
        PlayerProfile::new("Ada", 5, MAX_NAME_LEN).unwrap()
    }

    #[test]
    fn test_profile_validation() {
        assert_eq!(
            PlayerProfile::new("   ", 5, MAX_NAME_LEN),
            Err(ProfileError::EmptyName)
        );
        assert_eq!(
            PlayerProfile::new("Bartholomew The Third", 5, MAX_NAME_LEN),
            Err(ProfileError::NameTooLong { max: MAX_NAME_LEN })
        );
        assert!(matches!(
            PlayerProfile::new("Ada", 12, MAX_NAME_LEN),
            Err(ProfileError::AgeOutOfRange { age: 12, .. })
        ));
        assert_eq!(
            PlayerProfile::parse("Ada", "five", MAX_NAME_LEN),
            Err(ProfileError::InvalidAge("five".to_string()))
        );

        let ok = PlayerProfile::parse("  Ada ", " 4 ", MAX_NAME_LEN).unwrap();
        assert_eq!(ok.name, "Ada");
        assert_eq!(ok.age, 4);
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(profile(), 123);
        assert_eq!(session.level(), 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.phase, RoundPhase::AwaitingSelection);
        assert_eq!(session.round.items.len(), 9);
        assert_eq!(session.round.baskets.len(), 3);
    }

    #[test]
    fn test_finish_failure_leaves_state() {
        let mut session = Session::new(profile(), 1);
        session.score = 4;
        let result = session.finish(&mut FailingSink, "2026-01-01 10:00:00");
        assert!(result.is_err());
        assert!(!session.is_finished());
        assert_eq!(session.score, 4);

        // Retry succeeds with another sink
        let mut sink = MemorySink::default();
        let location = session.finish(&mut sink, "2026-01-01 10:00:05").unwrap();
        assert_eq!(location, "memory:1");
        assert!(session.is_finished());
        assert_eq!(sink.records[0].score, 4);
        assert_eq!(sink.records[0].player_name, "Ada");
        assert_eq!(sink.records[0].saved_at, "2026-01-01 10:00:05");
    }

    #[test]
    fn test_finish_only_once() {
        let mut session = Session::new(profile(), 3);
        let mut sink = MemorySink::default();
        session.finish(&mut sink, "2026-01-01 10:00:00").unwrap();

        let again = session.finish(&mut sink, "2026-01-01 10:00:01");
        assert!(matches!(again, Err(PersistError::AlreadySaved)));
        assert_eq!(sink.records.len(), 1);
        assert!(session.is_finished());

        // A restarted session is a new trip and may be saved again
        session.restart();
        assert_eq!(session.finish(&mut sink, "2026-01-01 10:05:00").unwrap(), "memory:2");
    }

    #[test]
    fn test_restart_keeps_profile() {
        let mut session = Session::new(profile(), 9);
        session.score = 10;
        session.total_attempts = 7;
        session.round = RoundState::generate(4, 5, &mut session.rng);
        session.restart();
        assert_eq!(session.level(), 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.total_attempts, 0);
        assert!(session.history.is_empty());
        assert_eq!(session.profile, profile());
        assert!(!session.round.items.is_empty());
    }
}
