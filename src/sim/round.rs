//! Level content generation
//!
//! Derives a difficulty profile from level and age, then samples categories
//! and items from the taxonomies.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::state::{Basket, Item, RoundState};
use crate::consts::*;
use crate::taxonomy::{Category, Tier};

/// How many categories and items per category a round asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub categories: u32,
    pub items_per_category: u32,
}

impl DifficultyProfile {
    pub fn for_level(level: u32, age: u32) -> Self {
        let level = level.max(1);
        let mut categories = (BASE_CATEGORY_COUNT + level / 2).min(MAX_CATEGORIES);
        let mut items_per_category = (BASE_ITEMS_PER_CATEGORY + level).min(MAX_ITEMS_PER_CATEGORY);

        // Smaller rounds for younger children
        if age < YOUNG_PLAYER_AGE {
            categories = categories.min(YOUNG_PLAYER_CAP);
            items_per_category = items_per_category.min(YOUNG_PLAYER_CAP);
        }

        Self {
            categories,
            items_per_category,
        }
    }
}

/// Whether the advanced taxonomy is in play for this level/age
pub fn advanced_unlocked(level: u32, age: u32) -> bool {
    level >= ADVANCED_UNLOCK_LEVEL && age >= YOUNG_PLAYER_AGE
}

/// Categories a round may draw from, in taxonomy order
pub fn candidate_pool(level: u32, age: u32) -> Vec<&'static Category> {
    let mut pool: Vec<&'static Category> = Tier::Base.categories().iter().collect();
    if advanced_unlocked(level, age) {
        pool.extend(Tier::Advanced.categories());
    }
    pool
}

/// Generate the items and baskets for one round
///
/// Items come back shuffled across categories. Requests beyond what the
/// taxonomy holds are capped silently.
pub fn generate_round<R: Rng + ?Sized>(level: u32, age: u32, rng: &mut R) -> (Vec<Item>, Vec<Basket>) {
    let profile = DifficultyProfile::for_level(level, age);

    let mut pool = candidate_pool(level, age);
    pool.shuffle(rng);
    pool.truncate(profile.categories as usize);

    let baskets: Vec<Basket> = pool
        .iter()
        .map(|cat| Basket::new(cat.name, cat.glyph))
        .collect();

    let mut items = Vec::new();
    for cat in &pool {
        let take = (profile.items_per_category as usize).min(cat.items.len());
        items.extend(
            cat.items
                .choose_multiple(rng, take)
                .map(|name| Item::new(*name, cat.name)),
        );
    }
    items.shuffle(rng);

    log::info!(
        "Level {} (age {}): {} baskets, {} items",
        level,
        age,
        baskets.len(),
        items.len()
    );

    (items, baskets)
}

impl RoundState {
    /// Generate a fresh round for the given level and age
    pub fn generate<R: Rng + ?Sized>(level: u32, age: u32, rng: &mut R) -> Self {
        let (items, baskets) = generate_round(level, age, rng);
        Self {
            level,
            age,
            items,
            baskets,
        }
    }
}
