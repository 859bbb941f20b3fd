//! Round and session data types
//!
//! Everything the presentation layer renders, and everything written to a
//! session record, lives here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Accepts both the prefixed display form and a bare UUID
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix($prefix).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }
    };
}

entity_id!(ItemId, "item_");
entity_id!(BasketId, "basket_");

/// A food item waiting to be sorted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
}

impl Item {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            category: category.into(),
        }
    }

    /// Id-free copy for event history
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

/// A sorting target bound to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub id: BasketId,
    pub label: String,
    pub glyph: String,
}

impl Basket {
    pub fn new(label: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            id: BasketId::new(),
            label: label.into(),
            glyph: glyph.into(),
        }
    }
}

/// One level's worth of items and baskets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// Current level (1-based)
    pub level: u32,
    /// Player age the round was generated for
    pub age: u32,
    /// Items not yet sorted
    pub items: Vec<Item>,
    /// Baskets in display order
    pub baskets: Vec<Basket>,
}

impl RoundState {
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn basket(&self, id: BasketId) -> Option<&Basket> {
        self.baskets.iter().find(|b| b.id == id)
    }

    /// Remove an item, returning it if it was present
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(idx))
    }

    /// True once every item has been sorted
    pub fn is_cleared(&self) -> bool {
        self.items.is_empty()
    }

    /// Every remaining item has exactly one basket with its category label
    pub fn is_consistent(&self) -> bool {
        self.items.iter().all(|item| {
            self.baskets
                .iter()
                .filter(|b| b.label == item.category)
                .count()
                == 1
        })
    }
}

/// Current phase of round progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No item chosen yet
    AwaitingSelection,
    /// An item is pinned, waiting for a basket
    ItemSelected(ItemId),
    /// Session finished and saved
    Finished,
}

/// Item fields captured in an event (ids are round-local and not kept)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub name: String,
    pub category: String,
}

/// One sorting attempt. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub level: u32,
    pub item: ItemSnapshot,
    pub basket: String,
    pub is_correct: bool,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

/// Everything persisted at the end of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub player_name: String,
    pub age: u32,
    pub score: u64,
    pub highest_level: u32,
    pub total_attempts: u32,
    pub history: Vec<GameEvent>,
    /// Local wall-clock time of the save (`%Y-%m-%d %H:%M:%S`)
    pub saved_at: String,
}

impl SessionRecord {
    pub fn correct_count(&self) -> usize {
        self.history.iter().filter(|e| e.is_correct).count()
    }
}
