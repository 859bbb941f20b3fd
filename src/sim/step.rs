//! Round progression
//!
//! Applies one discrete player action to a session. An action either fully
//! applies or is rejected with the session unchanged.

use thiserror::Error;

use super::session::{Feedback, Session};
use super::state::{Basket, BasketId, GameEvent, Item, ItemId, RoundPhase, RoundState};
use super::validate::{check, record_event};
use crate::feedback::{self, FeedbackSource};

/// A player action from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pin an item from the store
    SelectItem(ItemId),
    /// Drop the pinned item into a basket
    ChooseBasket(BasketId),
}

/// Why an action was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("item {0} is not in this round")]
    UnknownItem(ItemId),

    #[error("basket {0} is not in this round")]
    UnknownBasket(BasketId),

    #[error("pick an item before choosing a basket")]
    NothingSelected,

    #[error("session is already finished")]
    Finished,
}

/// A level was cleared and the next round generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelComplete {
    pub completed: u32,
    pub next: u32,
}

/// What a sort attempt did
#[derive(Debug, Clone, PartialEq)]
pub struct SortReport {
    pub correct: bool,
    /// Points awarded (0 when incorrect)
    pub points: u64,
    pub event: GameEvent,
    pub feedback: String,
    pub level_complete: Option<LevelComplete>,
}

/// Result of a successfully applied action
#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    Selected(Item),
    Sorted(SortReport),
}

/// Points for a correct sort at this level
pub fn points_for_level(level: u32) -> u64 {
    u64::from(level.max(1))
}

/// Apply one action
///
/// `now` is the Unix timestamp (ms) stamped on any recorded event.
pub fn step(
    session: &mut Session,
    action: Action,
    source: &mut dyn FeedbackSource,
    now: f64,
) -> Result<StepEvent, StepError> {
    if session.is_finished() {
        return Err(StepError::Finished);
    }

    match action {
        Action::SelectItem(id) => {
            let item = session
                .round
                .item(id)
                .cloned()
                .ok_or(StepError::UnknownItem(id))?;
            log::debug!("Selected {} ({})", item.name, id);
            session.phase = RoundPhase::ItemSelected(id);
            Ok(StepEvent::Selected(item))
        }
        Action::ChooseBasket(basket_id) => {
            let RoundPhase::ItemSelected(item_id) = session.phase else {
                return Err(StepError::NothingSelected);
            };
            let basket = session
                .round
                .basket(basket_id)
                .cloned()
                .ok_or(StepError::UnknownBasket(basket_id))?;
            let item = session
                .round
                .item(item_id)
                .cloned()
                .ok_or(StepError::UnknownItem(item_id))?;

            Ok(StepEvent::Sorted(sort_item(session, &item, &basket, source, now)))
        }
    }
}

fn sort_item(
    session: &mut Session,
    item: &Item,
    basket: &Basket,
    source: &mut dyn FeedbackSource,
    now: f64,
) -> SortReport {
    let level = session.round.level;
    let correct = check(item, basket);
    let event = record_event(level, item, basket, correct, now);

    session.total_attempts += 1;
    session.history.push(event.clone());
    session.phase = RoundPhase::AwaitingSelection;

    let text = feedback::sort_feedback(source, correct, &item.name, &basket.label);

    if !correct {
        log::debug!("{} is not {}", item.name, basket.label);
        session.feedback = Some(Feedback {
            text: text.clone(),
            positive: false,
        });
        return SortReport {
            correct,
            points: 0,
            event,
            feedback: text,
            level_complete: None,
        };
    }

    session.round.remove_item(item.id);
    let points = points_for_level(level);
    session.score += points;

    let mut report = SortReport {
        correct,
        points,
        event,
        feedback: text,
        level_complete: None,
    };

    if session.round.is_cleared() {
        let next = level + 1;
        session.round = RoundState::generate(next, session.profile.age, &mut session.rng);
        log::info!("Level {} complete, moving to level {}", level, next);
        report.feedback = feedback::level_complete_text(level, next);
        report.level_complete = Some(LevelComplete {
            completed: level,
            next,
        });
    }

    session.feedback = Some(Feedback {
        text: report.feedback.clone(),
        positive: true,
    });
    report
}
