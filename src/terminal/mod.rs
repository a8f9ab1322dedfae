//! The terminal controller
//!
//! `Terminal` owns every piece of application state: the input line,
//! history, scrollback, module viewer, quiz selections and cosmetic
//! effects. The TUI layer only forwards key presses and elapsed time to it
//! and draws what it exposes.

pub mod command;
pub mod effects;
pub mod scheduler;
pub mod viewer;

pub use command::{Action, Command, Resolution};
pub use effects::{Effects, MatrixRain, TextColor};
pub use scheduler::{Scheduler, TaskHandle};
pub use viewer::{ModuleViewer, Visibility};

use crate::config::Config;
use crate::data::trivia;
use crate::data::*;
use crate::Result;
use std::time::Duration;

/// Boot banner, revealed one line at a time
pub const WELCOME_LINES: &[&str] = &[
    "Initializing VibeSec secure shell v1.0 ...",
    "Loading security modules ......... [OK]",
    "Establishing encrypted session ... [OK]",
    "Welcome, vibe coder. Type 'help' to see available commands.",
];

/// Scrollback text for a quiz submission
pub const QUIZ_COMMAND: &str = "trivia quiz";

/// Everything that can be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    RevealBootLine(usize),
    BootComplete,
    GlitchRoll,
    GlitchEnd,
    RestoreTextColor,
    RainFrame,
    ViewerFadeIn,
    ViewerHide,
    TypeHeader,
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub struct Terminal {
    config: Config,
    catalog: ModuleCatalog,
    quiz: Quiz,
    input: String,
    history: CommandHistory,
    scrollback: Scrollback,
    viewer: ModuleViewer,
    selections: Selections,
    quiz_result: Option<QuizResult>,
    effects: Effects,
    scheduler: Scheduler<Timer>,
    welcome_revealed: usize,
    booted: bool,
    /// Lines scrolled up from the bottom of the scrollback
    scroll_offset: u16,
    /// Largest offset that still shows a full page, known once drawn
    scroll_limit: Option<u16>,
}

impl Terminal {
    /// Terminal with the built-in module catalog
    pub fn new(config: Config) -> Result<Self> {
        Self::with_catalog(config, ModuleCatalog::builtin())
    }

    /// Fails when a command points at a module the catalog lacks
    pub fn with_catalog(config: Config, catalog: ModuleCatalog) -> Result<Self> {
        config.validate()?;
        catalog.validate(Command::required_modules())?;

        let effects = Effects::new(config.seed, config.matrix.background_rain);
        let mut terminal = Self {
            config,
            catalog,
            quiz: Quiz::builtin(),
            input: String::new(),
            history: CommandHistory::new(),
            scrollback: Scrollback::new(),
            viewer: ModuleViewer::new(),
            selections: Selections::new(),
            quiz_result: None,
            effects,
            scheduler: Scheduler::new(),
            welcome_revealed: 0,
            booted: false,
            scroll_offset: 0,
            scroll_limit: None,
        };
        terminal.start_timers();

        tracing::debug!(
            modules = terminal.catalog.len(),
            questions = terminal.quiz.len(),
            "terminal ready"
        );
        Ok(terminal)
    }

    fn start_timers(&mut self) {
        if self.config.boot.enabled {
            let delay = self.config.boot.line_delay_ms;
            for i in 0..WELCOME_LINES.len() {
                self.scheduler.after(
                    ms(delay.saturating_mul(i as u64 + 1)),
                    Timer::RevealBootLine(i),
                );
            }
            let done = delay.saturating_mul(WELCOME_LINES.len() as u64 + 1);
            self.scheduler.after(ms(done), Timer::BootComplete);
        } else {
            self.welcome_revealed = WELCOME_LINES.len();
            self.booted = true;
        }

        if self.config.glitch.enabled {
            self.scheduler
                .every(ms(self.config.glitch.interval_ms), Timer::GlitchRoll);
        }

        self.scheduler
            .every(ms(self.config.matrix.frame_ms), Timer::RainFrame);
    }

    // ---- Input line ----------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn type_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Put a shortcut's command in the input without running it
    pub fn prefill(&mut self, command: Command) {
        self.input = command.keyword().to_string();
    }

    /// Submit the input line and clear it
    pub fn enter(&mut self) -> Option<Resolution> {
        let line = std::mem::take(&mut self.input);
        self.submit(&line)
    }

    /// Up arrow
    pub fn recall_previous(&mut self) {
        if let Some(entry) = self.history.back() {
            self.input = entry.to_string();
        }
    }

    /// Down arrow
    pub fn recall_next(&mut self) {
        if let Some(entry) = self.history.forward() {
            self.input = entry.to_string();
        }
    }

    // ---- Interpreter ---------------------------------------------------

    /// Run one raw line. Empty or blank input does nothing and returns
    /// `None`. Unknown commands are reported in the scrollback, never to the
    /// caller.
    pub fn submit(&mut self, raw: &str) -> Option<Resolution> {
        let command = command::normalize(raw);
        if command.is_empty() {
            return None;
        }

        self.history.record(&command);
        self.scrollback.push(Entry::command(&command));

        let resolution = command::resolve(&command);
        tracing::debug!(command = %command, ?resolution, "command submitted");

        match resolution {
            Resolution::Command(cmd) => {
                self.run(cmd);
                if cmd.follows_tail() {
                    self.scroll_to_bottom();
                }
            }
            Resolution::NotFound => {
                self.scrollback
                    .push(Entry::error(&command::not_found_message(&command)));
                self.scroll_to_bottom();
            }
        }

        Some(resolution)
    }

    fn run(&mut self, cmd: Command) {
        match cmd.action() {
            Action::Display { module, title } => {
                self.display_module(module, title);
            }
            Action::Respond(text) => self.respond(text),
            Action::Clear => {
                self.scrollback.clear();
                self.scroll_offset = 0;
                self.respond(command::CLEARED_RESPONSE);
            }
            Action::Matrix => {
                self.respond(command::MATRIX_RESPONSE);
                self.effects.text_color = TextColor::Matrix;
                if let Some(previous) = self.effects.matrix_restore.take() {
                    self.scheduler.cancel(previous);
                }
                let hold = ms(self.config.matrix.color_hold_ms);
                self.effects.matrix_restore =
                    Some(self.scheduler.after(hold, Timer::RestoreTextColor));
            }
            Action::Trivia => {
                let fact = trivia::pick(self.effects.rng());
                self.respond(&format!("{}{}", command::TRIVIA_PREFIX, fact));
            }
        }
    }

    fn respond(&mut self, text: &str) {
        self.scrollback.push(Entry::response(text));
    }

    // ---- Module viewer -------------------------------------------------

    /// Copy a module into the viewer. An unknown key leaves the viewer as it
    /// was and returns false.
    pub fn display_module(&mut self, key: &str, title: &str) -> bool {
        let Some(module) = self.catalog.get(key).cloned() else {
            tracing::warn!(module = key, "no such content module");
            return false;
        };

        self.cancel_viewer_timers();
        self.viewer.show(title, &module);
        self.viewer.fade = Some(
            self.scheduler
                .after(ms(self.config.viewer.fade_in_ms), Timer::ViewerFadeIn),
        );
        self.viewer.typing = Some(
            self.scheduler
                .every(ms(self.config.viewer.typing_speed_ms), Timer::TypeHeader),
        );

        tracing::info!(module = key, title, "module displayed");
        true
    }

    /// Dim the viewer, then hide it after the fade-out delay
    pub fn close_module(&mut self) {
        if !self.viewer.is_visible() {
            return;
        }
        self.cancel_viewer_timers();
        self.viewer.begin_close();
        self.viewer.fade = Some(
            self.scheduler
                .after(ms(self.config.viewer.fade_out_ms), Timer::ViewerHide),
        );
    }

    fn cancel_viewer_timers(&mut self) {
        for handle in self.viewer.take_timers() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn viewer(&self) -> &ModuleViewer {
        &self.viewer
    }

    /// Reveal the whole header at once. False if there was nothing left to type.
    pub fn skip_typing(&mut self) -> bool {
        let showing = matches!(
            self.viewer.visibility,
            Visibility::Opening | Visibility::Open
        );
        if !showing || self.viewer.typing_done() {
            return false;
        }
        self.viewer.finish_typing();
        if let Some(handle) = self.viewer.typing.take() {
            self.scheduler.cancel(handle);
        }
        true
    }

    pub fn scroll_viewer(&mut self, delta: i32) {
        self.viewer.scroll_by(delta);
    }

    // ---- Quiz ----------------------------------------------------------

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn select_answer(&mut self, question: &str, choice: Choice) {
        self.selections.select(question, choice);
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn quiz_result(&self) -> Option<&QuizResult> {
        self.quiz_result.as_ref()
    }

    /// Grade the current selections and log the result to the scrollback
    pub fn submit_quiz(&mut self) -> QuizResult {
        let result = self.quiz.grade(&self.selections);
        self.quiz_result = Some(result);

        self.scrollback.push(Entry::command(QUIZ_COMMAND));
        self.respond(&result.summary());
        self.scroll_to_bottom();

        tracing::info!(
            score = result.score,
            total = result.total,
            passed = result.passed,
            "quiz graded"
        );
        result
    }

    // ---- Time ----------------------------------------------------------

    /// Advance the clock and fire every timer that came due
    pub fn tick(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            self.on_timer(timer);
        }
        self.scheduler.settle(deadline);
    }

    fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::RevealBootLine(i) => {
                self.welcome_revealed = self.welcome_revealed.max(i + 1);
            }
            Timer::BootComplete => {
                self.booted = true;
            }
            Timer::GlitchRoll => {
                if self.effects.roll(self.config.glitch.probability) {
                    self.effects.glitching = true;
                    self.scheduler
                        .after(ms(self.config.glitch.duration_ms), Timer::GlitchEnd);
                }
            }
            Timer::GlitchEnd => {
                self.effects.glitching = false;
            }
            Timer::RestoreTextColor => {
                self.effects.text_color = TextColor::Normal;
                self.effects.matrix_restore = None;
            }
            Timer::RainFrame => self.effects.step_rain(),
            Timer::ViewerFadeIn => {
                self.viewer.fade_in();
                self.viewer.fade = None;
            }
            Timer::ViewerHide => {
                self.viewer.hide();
                self.viewer.fade = None;
            }
            Timer::TypeHeader => {
                if !self.viewer.type_next() {
                    if let Some(handle) = self.viewer.typing.take() {
                        self.scheduler.cancel(handle);
                    }
                }
            }
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    // ---- Scrollback ----------------------------------------------------

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn is_following(&self) -> bool {
        self.scroll_offset == 0
    }

    /// Before the first draw the limit falls back to one line per entry
    pub fn scroll_up(&mut self, lines: u16) {
        let max = self.scroll_limit.unwrap_or_else(|| {
            let entries = self.scrollback.len() + self.welcome_revealed;
            entries.min(u16::MAX as usize) as u16
        });
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max);
    }

    /// Called by the renderer with the wrapped line count and page height
    pub fn set_scroll_limit(&mut self, total_lines: usize, page: usize) {
        let limit = total_lines.saturating_sub(page).min(u16::MAX as usize) as u16;
        self.scroll_limit = Some(limit);
        self.scroll_offset = self.scroll_offset.min(limit);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    // ---- Presentation --------------------------------------------------

    pub fn welcome(&self) -> &[&'static str] {
        &WELCOME_LINES[..self.welcome_revealed.min(WELCOME_LINES.len())]
    }

    /// Input has focus once the boot banner is done
    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// Skip the boot animation
    pub fn finish_boot(&mut self) {
        if self.booted {
            return;
        }
        self.welcome_revealed = WELCOME_LINES.len();
        self.booted = true;
        self.scheduler.cancel_where(|timer| {
            matches!(timer, Timer::RevealBootLine(_) | Timer::BootComplete)
        });
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Size the rain to the drawing area
    pub fn resize_rain(&mut self, width: u16, height: u16) {
        self.effects.rain.resize(width, height);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }
}
