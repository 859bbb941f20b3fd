//! Encouragement text
//!
//! A `FeedbackSource` may suggest text for a prompt or decline with `None`.
//! Callers always have a static fallback, so a missing or failing source
//! never holds up a round transition.

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

/// What kind of text is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Item went into the right basket
    Correct,
    /// Item went into the wrong basket
    Incorrect,
    /// A fun fact about the selected item
    FunFact,
    /// End-of-session learning summary
    Summary,
}

/// Details a source can draw on
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackContext<'a> {
    pub item: Option<&'a str>,
    pub basket: Option<&'a str>,
    pub player: Option<&'a str>,
    pub age: Option<u32>,
    pub top_categories: &'a [String],
}

/// Synchronous, bounded text collaborator
pub trait FeedbackSource {
    fn suggest_text(&mut self, kind: PromptKind, ctx: &FeedbackContext<'_>) -> Option<String>;
}

/// Source that never suggests anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl FeedbackSource for NoFeedback {
    fn suggest_text(&mut self, _kind: PromptKind, _ctx: &FeedbackContext<'_>) -> Option<String> {
        None
    }
}

const POSITIVE_LINES: &[&str] = &[
    "Fantastic job! 🌟",
    "You got it right! 🎉",
    "Amazing sorting! 👏",
    "Perfect match! 💯",
    "You're a sorting star! ⭐",
    "Great shopping skills! 🛒",
    "Excellent choice! 🏆",
    "That's correct! 🎯",
    "Super smart! 🧠",
    "Wow, you're good at this! 🥳",
];

const NEGATIVE_LINES: &[&str] = &[
    "Try another basket! 🤔",
    "Not quite right, try again! 🔄",
    "Let's try a different basket! 🧺",
    "Almost there, one more try! 👍",
    "Think about where this food comes from! 💭",
    "Hmm, not that one. Try again! 🧐",
    "Let's think about this food! 🍽️",
    "Good effort! Try another basket! 🚀",
    "Another basket might be better! 🛍️",
    "Keep trying, you'll get it! 💪",
];

const FUN_FACTS: &[(&str, &str)] = &[
    ("Apple", "Apples float in water because they're 25% air! 🍎"),
    ("Banana", "Bananas are berries, but strawberries aren't! 🍌"),
    ("Carrot", "Carrots can help you see in the dark! 🥕"),
    ("Milk", "Milk helps make your bones strong! 🥛"),
    ("Bread", "Bread dough rises because of tiny bubbles! 🍞"),
    ("Chicken", "Chickens are related to dinosaurs! 🦖"),
    ("Rice", "Rice is eaten by half the people on Earth every day! 🍚"),
    ("Eggs", "Some eggs have spots to help hide them! 🥚"),
    ("Cheese", "Cheese is milk that's been transformed! 🧀"),
    ("Strawberry", "Strawberries wear their seeds on the outside! 🍓"),
];

const GENERIC_FACT: &str = "Did you know foods give us energy to play and grow? 🌱";
const GENERIC_CHEER: &str = "You're doing great! Keep learning about foods! 🍎🥕🍌";

/// Offline source picking from canned lines
#[derive(Debug, Clone)]
pub struct CannedFeedback {
    rng: Pcg32,
}

impl CannedFeedback {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// First fact whose food name appears in the item name (case-insensitive)
    pub fn fun_fact(item: &str) -> &'static str {
        let item = item.to_lowercase();
        FUN_FACTS
            .iter()
            .find(|(food, _)| item.contains(&food.to_lowercase()))
            .map(|(_, fact)| *fact)
            .unwrap_or(GENERIC_FACT)
    }
}

impl FeedbackSource for CannedFeedback {
    fn suggest_text(&mut self, kind: PromptKind, ctx: &FeedbackContext<'_>) -> Option<String> {
        let text = match kind {
            PromptKind::Correct => POSITIVE_LINES.choose(&mut self.rng)?.to_string(),
            PromptKind::Incorrect => NEGATIVE_LINES.choose(&mut self.rng)?.to_string(),
            PromptKind::FunFact => Self::fun_fact(ctx.item?).to_string(),
            PromptKind::Summary => match ctx.player {
                Some(name) => format!(
                    "Great job shopping today, {}! You're learning so much about different foods \
                     and where they belong. Keep exploring and learning! 🌟",
                    name
                ),
                None => GENERIC_CHEER.to_string(),
            },
        };
        Some(text)
    }
}

/// Static text for a sort attempt
pub fn fallback_text(correct: bool, item: &str, basket: &str) -> String {
    if correct {
        format!("Great job! {} goes in {}! 🎉", item, basket)
    } else {
        format!("Not quite! Try another basket for {}. 🤔", item)
    }
}

/// Feedback for a sort attempt, falling back to static text
pub fn sort_feedback(source: &mut dyn FeedbackSource, correct: bool, item: &str, basket: &str) -> String {
    let kind = if correct {
        PromptKind::Correct
    } else {
        PromptKind::Incorrect
    };
    let ctx = FeedbackContext {
        item: Some(item),
        basket: Some(basket),
        ..Default::default()
    };
    source.suggest_text(kind, &ctx).unwrap_or_else(|| {
        log::debug!("No {:?} suggestion, using fallback", kind);
        fallback_text(correct, item, basket)
    })
}

pub fn level_complete_text(completed: u32, next: u32) -> String {
    format!("Level {} Complete! Moving to Level {}! 🎉", completed, next)
}

/// Optional learning tip for the selected item (no fallback: tips are extras)
pub fn learning_tip(source: &mut dyn FeedbackSource, item: &str, age: u32) -> Option<String> {
    let ctx = FeedbackContext {
        item: Some(item),
        age: Some(age),
        ..Default::default()
    };
    source.suggest_text(PromptKind::FunFact, &ctx)
}

/// Optional end-of-session summary
pub fn learning_summary(
    source: &mut dyn FeedbackSource,
    player: &str,
    age: u32,
    top_categories: &[String],
) -> Option<String> {
    let ctx = FeedbackContext {
        player: Some(player),
        age: Some(age),
        top_categories,
        ..Default::default()
    };
    source.suggest_text(PromptKind::Summary, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_on_none() {
        assert_eq!(
            sort_feedback(&mut NoFeedback, true, "Apple", "Fruits"),
            "Great job! Apple goes in Fruits! 🎉"
        );
        assert_eq!(
            sort_feedback(&mut NoFeedback, false, "Apple", "Dairy"),
            "Not quite! Try another basket for Apple. 🤔"
        );
    }

    #[test]
    fn test_canned_lines() {
        let mut source = CannedFeedback::new(3);
        for _ in 0..20 {
            let good = sort_feedback(&mut source, true, "Milk", "Dairy");
            assert!(POSITIVE_LINES.contains(&good.as_str()));
            let bad = sort_feedback(&mut source, false, "Milk", "Grains");
            assert!(NEGATIVE_LINES.contains(&bad.as_str()));
        }
    }

    #[test]
    fn test_fun_facts() {
        assert_eq!(
            CannedFeedback::fun_fact("Chocolate Milk"),
            "Milk helps make your bones strong! 🥛"
        );
        assert_eq!(
            CannedFeedback::fun_fact("cottage cheese"),
            "Cheese is milk that's been transformed! 🧀"
        );
        assert_eq!(CannedFeedback::fun_fact("Tofu"), GENERIC_FACT);

        let mut source = CannedFeedback::new(0);
        assert_eq!(
            learning_tip(&mut source, "Carrot", 5).as_deref(),
            Some("Carrots can help you see in the dark! 🥕")
        );
        assert_eq!(learning_tip(&mut NoFeedback, "Carrot", 5), None);
    }

    #[test]
    fn test_summary_names_player() {
        let mut source = CannedFeedback::new(0);
        let tops = vec!["Fruits".to_string()];
        let summary = learning_summary(&mut source, "Ada", 6, &tops).unwrap();
        assert!(summary.starts_with("Great job shopping today, Ada!"));
    }

    #[test]
    fn test_level_complete_text() {
        assert_eq!(level_complete_text(3, 4), "Level 3 Complete! Moving to Level 4! 🎉");
    }
}
