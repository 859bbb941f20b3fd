//! Game core
//!
//! All gameplay logic lives here. Nothing in this module touches the clock,
//! the filesystem or the presentation layer:
//! - Randomness comes from the session's seeded RNG
//! - Timestamps are passed in by the caller
//! - State is owned by an explicit `Session`, never a global

pub mod round;
pub mod session;
pub mod state;
pub mod step;
pub mod validate;

pub use round::{DifficultyProfile, advanced_unlocked, candidate_pool, generate_round};
pub use session::{Feedback, PlayerProfile, ProfileError, Session};
pub use state::{
    Basket, BasketId, GameEvent, Item, ItemId, ItemSnapshot, RoundPhase, RoundState, SessionRecord,
};
pub use step::{Action, LevelComplete, SortReport, StepError, StepEvent, points_for_level, step};
pub use validate::{check, record_event};
