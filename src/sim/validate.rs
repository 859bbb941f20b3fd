//! Sorting validation

use super::state::{Basket, GameEvent, Item};

/// An item belongs in a basket iff its category is exactly the basket label
///
/// No case folding or trimming: labels come straight from the taxonomy.
#[inline]
pub fn check(item: &Item, basket: &Basket) -> bool {
    item.category == basket.label
}

/// Build the history record for one attempt
pub fn record_event(level: u32, item: &Item, basket: &Basket, correct: bool, timestamp: f64) -> GameEvent {
    GameEvent {
        level,
        item: item.snapshot(),
        basket: basket.label.clone(),
        is_correct: correct,
        timestamp,
    }
}
