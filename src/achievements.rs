//! End-of-session summary and badges
//!
//! Computed from a `SessionRecord`; nothing here changes game state.

use std::collections::HashMap;

use crate::sim::SessionRecord;

/// Badges earned for levels, accuracy and score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub name: &'static str,
    pub glyph: &'static str,
    pub description: &'static str,
}

pub const SUPER_SHOPPER: Badge = Badge {
    name: "Super Shopper",
    glyph: "🛒",
    description: "Completed multiple shopping levels!",
};

pub const SORTING_STAR: Badge = Badge {
    name: "Sorting Star",
    glyph: "⭐",
    description: "Great at sorting items!",
};

pub const FOOD_EXPERT: Badge = Badge {
    name: "Food Expert",
    glyph: "🍽️",
    description: "Knows where foods belong!",
};

/// Consolation badge when nothing else was earned
pub const SHOPPING_HELPER: Badge = Badge {
    name: "Shopping Helper",
    glyph: "🛍️",
    description: "Learning to sort foods!",
};

pub const SUPER_SHOPPER_LEVEL: u32 = 3;
pub const SORTING_STAR_ACCURACY: f64 = 80.0;
pub const FOOD_EXPERT_SCORE: u64 = 15;

/// How many basket labels `top_categories` reports
const TOP_CATEGORY_COUNT: usize = 2;

/// Results-page numbers for one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub score: u64,
    pub highest_level: u32,
    pub total_attempts: u32,
    pub correct: usize,
    /// Percentage of attempts that were correct (0-100)
    pub accuracy: f64,
    /// Most-used basket labels, most used first
    pub top_categories: Vec<String>,
}

impl SessionSummary {
    pub fn from_record(record: &SessionRecord) -> Self {
        let correct = record.correct_count();
        let accuracy = correct as f64 * 100.0 / f64::from(record.total_attempts.max(1));
        Self {
            score: record.score,
            highest_level: record.highest_level,
            total_attempts: record.total_attempts,
            correct,
            accuracy,
            top_categories: top_categories(record, TOP_CATEGORY_COUNT),
        }
    }

    /// Earned badges, in display order (never empty)
    pub fn badges(&self) -> Vec<Badge> {
        let mut badges = Vec::new();
        if self.highest_level >= SUPER_SHOPPER_LEVEL {
            badges.push(SUPER_SHOPPER);
        }
        if self.accuracy >= SORTING_STAR_ACCURACY {
            badges.push(SORTING_STAR);
        }
        if self.score >= FOOD_EXPERT_SCORE {
            badges.push(FOOD_EXPERT);
        }
        if badges.is_empty() {
            badges.push(SHOPPING_HELPER);
        }
        badges
    }
}

/// Basket labels by attempt count, ties broken alphabetically
pub fn top_categories(record: &SessionRecord, n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in &record.history {
        *counts.entry(event.basket.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(label, _)| label.to_string())
        .collect()
}
