//! Browser bindings (wasm32 only)
//!
//! The page renders `state_json()` and forwards clicks as `select_item`,
//! `choose_basket` and `finish_session`. Rendering itself lives in the page.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::feedback::{self, CannedFeedback, FeedbackSource, NoFeedback};
use crate::persistence::web::LocalStorageStore;
use crate::settings::Settings;
use crate::sim::{Action, Basket, Item, PlayerProfile, RoundPhase, Session, StepEvent, step};
use crate::taxonomy;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Shopping Sorter starting...");
}

#[derive(Serialize)]
struct ItemView<'a> {
    id: String,
    name: &'a str,
    glyph: &'static str,
}

#[derive(Serialize)]
struct BasketView<'a> {
    id: String,
    label: &'a str,
    glyph: &'a str,
}

#[derive(Serialize)]
struct StateView<'a> {
    player: &'a str,
    level: u32,
    score: u64,
    items: Vec<ItemView<'a>>,
    baskets: Vec<BasketView<'a>>,
    selected: Option<String>,
    feedback: Option<&'a str>,
    feedback_positive: bool,
    tip: Option<&'a str>,
    finished: bool,
}

fn item_view(item: &Item) -> ItemView<'_> {
    ItemView {
        id: item.id.to_string(),
        name: &item.name,
        glyph: taxonomy::glyph_for_item(&item.category, &item.name),
    }
}

fn basket_view(basket: &Basket) -> BasketView<'_> {
    BasketView {
        id: basket.id.to_string(),
        label: &basket.label,
        glyph: &basket.glyph,
    }
}

/// One browser session
#[wasm_bindgen]
pub struct WasmGame {
    session: Session,
    source: Box<dyn FeedbackSource>,
    settings: Settings,
    tip: Option<String>,
}

#[wasm_bindgen]
impl WasmGame {
    /// Validate the welcome form and start at level 1
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, age: &str) -> Result<WasmGame, JsError> {
        let settings = Settings::load();
        let profile = PlayerProfile::parse(name, age, settings.max_name_len)?;
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let source: Box<dyn FeedbackSource> = if settings.feedback {
            Box::new(CannedFeedback::new(seed))
        } else {
            Box::new(NoFeedback)
        };
        Ok(WasmGame {
            session: Session::new(profile, seed),
            source,
            settings,
            tip: None,
        })
    }

    pub fn select_item(&mut self, id: &str) -> Result<(), JsError> {
        let id = id.parse()?;
        if let StepEvent::Selected(item) = step(
            &mut self.session,
            Action::SelectItem(id),
            self.source.as_mut(),
            js_sys::Date::now(),
        )? {
            self.tip = if self.settings.fun_facts {
                feedback::learning_tip(self.source.as_mut(), &item.name, self.session.profile.age)
            } else {
                None
            };
        }
        Ok(())
    }

    /// Returns true when the sort was correct
    pub fn choose_basket(&mut self, id: &str) -> Result<bool, JsError> {
        let id = id.parse()?;
        let event = step(
            &mut self.session,
            Action::ChooseBasket(id),
            self.source.as_mut(),
            js_sys::Date::now(),
        )?;
        self.tip = None;
        Ok(matches!(event, StepEvent::Sorted(report) if report.correct))
    }

    /// Save to LocalStorage; returns the storage key
    pub fn finish_session(&mut self) -> Result<String, JsError> {
        let key = self
            .session
            .finish(&mut LocalStorageStore, super::local_timestamp())?;
        Ok(key)
    }

    /// Shop again with the same player
    pub fn restart(&mut self) {
        self.session.restart();
        self.tip = None;
    }

    /// Everything the page needs to render, as JSON
    pub fn state_json(&self) -> Result<String, JsError> {
        let s = &self.session;
        let selected = match s.phase {
            RoundPhase::ItemSelected(id) => Some(id.to_string()),
            _ => None,
        };
        let view = StateView {
            player: &s.profile.name,
            level: s.level(),
            score: s.score,
            items: s.round.items.iter().map(item_view).collect(),
            baskets: s.round.baskets.iter().map(basket_view).collect(),
            selected,
            feedback: s.feedback.as_ref().map(|f| f.text.as_str()),
            feedback_positive: s.feedback.as_ref().is_some_and(|f| f.positive),
            tip: self.tip.as_deref(),
            finished: s.is_finished(),
        };
        Ok(serde_json::to_string(&view)?)
    }
}
