//! Shopping Sorter entry point
//!
//! Native builds run a terminal version of the game. The browser build is
//! driven from `platform::web` and has no `main` of its own.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use shopping_sorter::achievements::SessionSummary;
    use shopping_sorter::feedback::{self, CannedFeedback, FeedbackSource, NoFeedback};
    use shopping_sorter::persistence::{SessionSink, SessionStore};
    use shopping_sorter::platform;
    use shopping_sorter::sim::{Action, PlayerProfile, Session, StepEvent, step};
    use shopping_sorter::{Settings, taxonomy};

    /// Sort foods into the right baskets!
    #[derive(Parser, Debug)]
    #[command(name = "shopping-sorter")]
    #[command(version, about, long_about = None)]
    struct Args {
        /// Player name (prompted if omitted)
        #[arg(long)]
        name: Option<String>,

        /// Player age (prompted if omitted)
        #[arg(long)]
        age: Option<String>,

        /// Fixed RNG seed for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for saved sessions
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Settings file
        #[arg(long, default_value = "settings.json")]
        settings: PathBuf,

        /// Write the effective settings back to the settings file
        #[arg(long)]
        write_settings: bool,
    }

    enum Command {
        Pick(usize),
        Finish,
    }

    struct Terminal<R: BufRead, W: Write> {
        input: R,
        out: W,
    }

    impl<R: BufRead, W: Write> Terminal<R, W> {
        /// Prompt and read one trimmed line; None on end of input
        fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
            write!(self.out, "{} ", prompt)?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            Ok(Some(line.trim().to_string()))
        }

        fn yes(&mut self, prompt: &str) -> Result<bool> {
            Ok(self
                .ask(prompt)?
                .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")))
        }
    }

    fn read_profile<R: BufRead, W: Write>(
        term: &mut Terminal<R, W>,
        args: &Args,
        settings: &Settings,
    ) -> Result<Option<PlayerProfile>> {
        let mut name = args.name.clone();
        let mut age = args.age.clone();
        loop {
            let n = match name.take() {
                Some(n) => n,
                None => match term.ask("What's your name?")? {
                    Some(n) => n,
                    None => return Ok(None),
                },
            };
            let a = match age.take() {
                Some(a) => a,
                None => match term.ask("How old are you? (3-7)")? {
                    Some(a) => a,
                    None => return Ok(None),
                },
            };
            match PlayerProfile::parse(&n, &a, settings.max_name_len) {
                Ok(profile) => return Ok(Some(profile)),
                Err(e) => writeln!(term.out, "Oops: {}. Let's try again!", e)?,
            }
        }
    }

    fn render<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "Level {} | Stars: {} ⭐ | Items: {}",
            session.level(),
            session.score,
            session.round.items.len()
        )?;
        if let Some(fb) = &session.feedback {
            writeln!(out, "{}", fb.text)?;
        }
        writeln!(out, "Pick an item from the store:")?;
        for (i, item) in session.round.items.iter().enumerate() {
            writeln!(
                out,
                "  {:>2}. {} {}",
                i + 1,
                taxonomy::glyph_for_item(&item.category, &item.name),
                item.name
            )?;
        }
        Ok(())
    }

    fn parse_command(answer: &str, max: usize) -> Option<Command> {
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("finish") {
            return Some(Command::Finish);
        }
        let n: usize = answer.parse().ok()?;
        (1..=max).contains(&n).then_some(Command::Pick(n - 1))
    }

    /// One pick-and-place turn; false when the player wants to finish
    fn play_turn<R: BufRead, W: Write>(
        term: &mut Terminal<R, W>,
        session: &mut Session,
        source: &mut dyn FeedbackSource,
        settings: &Settings,
    ) -> Result<bool> {
        render(&mut term.out, session)?;
        let Some(answer) = term.ask("Item number (or 'q' to finish shopping):")? else {
            return Ok(false);
        };
        let idx = match parse_command(&answer, session.round.items.len()) {
            Some(Command::Finish) => return Ok(false),
            Some(Command::Pick(idx)) => idx,
            None => {
                writeln!(term.out, "Pick a number from the list!")?;
                return Ok(true);
            }
        };

        let item_id = session.round.items[idx].id;
        if let StepEvent::Selected(item) = step(
            session,
            Action::SelectItem(item_id),
            source,
            platform::now_millis(),
        )? {
            writeln!(term.out, "Where does the {} go?", item.name)?;
            if settings.fun_facts {
                if let Some(tip) = feedback::learning_tip(source, &item.name, session.profile.age) {
                    writeln!(term.out, "💡 {}", tip)?;
                }
            }
        }
        for (i, basket) in session.round.baskets.iter().enumerate() {
            writeln!(term.out, "  {:>2}. {} {}", i + 1, basket.glyph, basket.label)?;
        }

        let Some(answer) = term.ask("Basket number:")? else {
            return Ok(false);
        };
        let Some(basket) = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| session.round.baskets.get(i))
        else {
            writeln!(term.out, "That's not a basket!")?;
            return Ok(true);
        };

        let basket_id = basket.id;
        if let Err(e) = step(
            session,
            Action::ChooseBasket(basket_id),
            source,
            platform::now_millis(),
        ) {
            log::warn!("Rejected basket choice: {}", e);
        }
        Ok(true)
    }

    fn show_results<W: Write>(
        out: &mut W,
        session: &Session,
        source: &mut dyn FeedbackSource,
    ) -> io::Result<()> {
        let record = session.record(platform::local_timestamp());
        let summary = SessionSummary::from_record(&record);
        writeln!(out)?;
        writeln!(out, "Great Shopping, {}! 🎉", record.player_name)?;
        writeln!(out, "You earned {} stars! ⭐", summary.score)?;
        writeln!(out, "Reached Level: {}", summary.highest_level)?;
        writeln!(out, "Items Sorted: {}", summary.total_attempts)?;
        writeln!(out, "Correct Sorts: {}", summary.correct)?;
        writeln!(out, "Your Badges:")?;
        for badge in summary.badges() {
            writeln!(out, "  {} {} - {}", badge.glyph, badge.name, badge.description)?;
        }
        if let Some(text) = feedback::learning_summary(
            source,
            &record.player_name,
            record.age,
            &summary.top_categories,
        ) {
            writeln!(out, "{}", text)?;
        }
        Ok(())
    }

    /// Save, offering a retry when the write fails; false if the player gave up
    fn save<R: BufRead, W: Write, S: SessionSink>(
        term: &mut Terminal<R, W>,
        session: &mut Session,
        store: &mut S,
    ) -> Result<bool> {
        loop {
            match session.finish(store, platform::local_timestamp()) {
                Ok(location) => {
                    writeln!(term.out, "Saved to {}", location)?;
                    return Ok(true);
                }
                Err(e) => {
                    log::error!("Saving session failed: {}", e);
                    writeln!(term.out, "Could not save your trip: {}", e)?;
                    if !term.yes("Try again? [y/N]")? {
                        return Ok(false);
                    }
                }
            }
        }
    }

    /// Ask whether to play again, warning first when the trip was not saved
    fn shop_again<R: BufRead, W: Write>(term: &mut Terminal<R, W>, saved: bool) -> Result<bool> {
        if saved {
            return term.yes("Shop again? [y/N]");
        }
        writeln!(term.out, "Your trip was not saved. Shopping again will lose it.")?;
        term.yes("Shop again anyway? [y/N]")
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        log::info!("Shopping Sorter (native) starting...");

        let args = Args::parse();
        let mut settings = Settings::load_from(&args.settings);
        if let Some(seed) = args.seed {
            settings.seed = Some(seed);
        }
        if let Some(dir) = &args.data_dir {
            settings.data_dir = dir.clone();
        }
        if args.write_settings {
            settings
                .save_to(&args.settings)
                .with_context(|| format!("writing {}", args.settings.display()))?;
        }

        let stdin = io::stdin();
        let mut term = Terminal {
            input: stdin.lock(),
            out: io::stdout(),
        };

        writeln!(term.out, "🛒 Welcome to Shopping Sorter! 🛒")?;
        writeln!(term.out, "Let's learn about food groups while shopping!")?;
        let Some(profile) = read_profile(&mut term, &args, &settings)? else {
            return Ok(());
        };
        writeln!(term.out, "Hello, {}! 👋", profile.name)?;

        let seed = settings.seed.unwrap_or_else(platform::entropy_seed);
        let mut source: Box<dyn FeedbackSource> = if settings.feedback {
            Box::new(CannedFeedback::new(seed))
        } else {
            Box::new(NoFeedback)
        };
        let mut store = SessionStore::new(&settings.data_dir);
        let mut session = Session::new(profile, seed);

        loop {
            while play_turn(&mut term, &mut session, source.as_mut(), &settings)? {}

            show_results(&mut term.out, &session, source.as_mut())?;
            let saved = save(&mut term, &mut session, &mut store).context("finishing session")?;

            if !shop_again(&mut term, saved)? {
                break;
            }
            session.restart();
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
