//! Shopping Sorter - A food-group sorting game for young children
//!
//! Core modules:
//! - `taxonomy`: Static food categories (base and advanced)
//! - `sim`: Round generation, sorting validation and round progression
//! - `feedback`: Encouragement text with mandatory static fallbacks
//! - `achievements`: End-of-session summary and badges
//! - `persistence`: Write-once session records
//! - `platform`: Clock and browser bindings
//! - `settings`: Runtime configuration

pub mod achievements;
pub mod feedback;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod taxonomy;

pub use achievements::{Badge, SessionSummary};
pub use feedback::{CannedFeedback, FeedbackSource, NoFeedback};
pub use settings::Settings;
pub use sim::{Action, PlayerProfile, Session, StepEvent, check, generate_round, step};

/// Game configuration constants
pub mod consts {
    /// Categories in a level-0/1 round before level scaling
    pub const BASE_CATEGORY_COUNT: u32 = 3;
    /// Hard cap on categories per round
    pub const MAX_CATEGORIES: u32 = 5;
    /// Items per category before level scaling
    pub const BASE_ITEMS_PER_CATEGORY: u32 = 2;
    /// Hard cap on items per category
    pub const MAX_ITEMS_PER_CATEGORY: u32 = 5;

    /// Players younger than this get the reduced caps below
    pub const YOUNG_PLAYER_AGE: u32 = 5;
    /// Category and item cap for young players
    pub const YOUNG_PLAYER_CAP: u32 = 3;

    /// Advanced categories unlock at this level (for ages >= YOUNG_PLAYER_AGE)
    pub const ADVANCED_UNLOCK_LEVEL: u32 = 3;

    /// Selectable player ages
    pub const MIN_AGE: u32 = 3;
    pub const MAX_AGE: u32 = 7;
    /// Default maximum length of a player name (characters)
    pub const MAX_NAME_LEN: usize = 15;

    /// Glyph for items with no known emoji or category
    pub const FALLBACK_GLYPH: &str = "🍽️";
}
