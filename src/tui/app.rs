//! Main application state and rendering

use crate::config::Config;
use crate::data::{classify, Choice, LineKind, Role};
use crate::terminal::{Command, Terminal, TextColor};
use crate::tui::widgets::{wrap_text, RainBackground, ScoreBar};
use crate::tui::{create_content_layout, create_main_area_layout, create_main_layout};
use crate::tui::{focus_block, styled_block, Theme, SMALL_LOGO};
use crate::TerminalError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// Lines moved per PageUp/PageDown
const PAGE: u16 = 5;

/// Which panel receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Shortcuts,
    Quiz,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Shortcuts,
            Focus::Shortcuts => Focus::Quiz,
            Focus::Quiz => Focus::Input,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Quiz,
            Focus::Shortcuts => Focus::Input,
            Focus::Quiz => Focus::Shortcuts,
        }
    }
}

/// Application state
pub struct App {
    pub terminal: Terminal,
    pub theme: Theme,
    pub running: bool,
    pub focus: Focus,
    pub shortcuts: Vec<Command>,
    pub shortcut_state: ListState,
    pub quiz_cursor: usize,
    last_tick: Instant,
}

impl App {
    pub fn new(config: Config) -> crate::Result<Self> {
        Ok(Self::with_terminal(Terminal::new(config)?))
    }

    pub fn with_terminal(terminal: Terminal) -> Self {
        let mut shortcut_state = ListState::default();
        shortcut_state.select(Some(0));

        Self {
            terminal,
            theme: Theme::default(),
            running: true,
            focus: Focus::Input,
            shortcuts: Command::ALL.iter().copied().filter(|c| c.is_listed()).collect(),
            shortcut_state,
            quiz_cursor: 0,
            last_tick: Instant::now(),
        }
    }

    /// Feed real elapsed time to the timers
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.terminal.tick(elapsed);
    }

    /// Wait up to `timeout` for one key press
    pub fn handle_input(&mut self, timeout: Duration) -> Result<bool, TerminalError> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(self.running)
    }

    /// Apply one key press. Returns false once the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.running = false;
                return false;
            }
            KeyCode::Char('d') if ctrl && self.terminal.input().is_empty() => {
                self.running = false;
                return false;
            }
            KeyCode::Esc => {
                if self.terminal.viewer().is_visible() {
                    self.terminal.close_module();
                } else {
                    self.focus = Focus::Input;
                }
                return true;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return true;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return true;
            }
            KeyCode::PageUp => {
                if self.terminal.viewer().is_visible() {
                    self.terminal.scroll_viewer(-(PAGE as i32));
                } else {
                    self.terminal.scroll_up(PAGE);
                }
                return true;
            }
            KeyCode::PageDown => {
                if self.terminal.viewer().is_visible() {
                    self.terminal.scroll_viewer(PAGE as i32);
                } else {
                    self.terminal.scroll_down(PAGE);
                }
                return true;
            }
            KeyCode::End => {
                self.terminal.scroll_to_bottom();
                return true;
            }
            _ => {}
        }

        // Any other key during boot just skips the banner
        if !self.terminal.is_booted() {
            self.terminal.finish_boot();
            return true;
        }
        // Enter on an empty line finishes the viewer's header
        if key.code == KeyCode::Enter
            && self.focus == Focus::Input
            && self.terminal.input().is_empty()
            && self.terminal.skip_typing()
        {
            return true;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key, ctrl),
            Focus::Shortcuts => self.handle_shortcut_key(key),
            Focus::Quiz => self.handle_quiz_key(key),
        }
        true
    }

    fn handle_input_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Enter => {
                self.terminal.enter();
            }
            KeyCode::Up => self.terminal.recall_previous(),
            KeyCode::Down => self.terminal.recall_next(),
            KeyCode::Backspace => self.terminal.backspace(),
            KeyCode::Char('u') if ctrl => self.terminal.clear_input(),
            KeyCode::Char(c) if !ctrl => self.terminal.type_char(c),
            _ => {}
        }
    }

    fn handle_shortcut_key(&mut self, key: KeyEvent) {
        let len = self.shortcuts.len();
        let i = self.shortcut_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up => {
                if i > 0 {
                    self.shortcut_state.select(Some(i - 1));
                }
            }
            KeyCode::Down => {
                if i + 1 < len {
                    self.shortcut_state.select(Some(i + 1));
                }
            }
            KeyCode::Enter => {
                if let Some(command) = self.shortcuts.get(i).copied() {
                    self.terminal.prefill(command);
                    self.focus = Focus::Input;
                }
            }
            KeyCode::Char(c) => {
                self.focus = Focus::Input;
                self.terminal.type_char(c);
            }
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        let count = self.terminal.quiz().len();
        if count == 0 {
            return;
        }
        let question = self.terminal.quiz().questions()[self.quiz_cursor].key;
        let current = self.terminal.selections().get(question);

        match key.code {
            KeyCode::Up => self.quiz_cursor = self.quiz_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.quiz_cursor + 1 < count {
                    self.quiz_cursor += 1;
                }
            }
            KeyCode::Left => {
                let choice = current.map(|c| c.prev()).unwrap_or(Choice::D);
                self.terminal.select_answer(question, choice);
            }
            KeyCode::Right => {
                let choice = current.map(|c| c.next()).unwrap_or(Choice::A);
                self.terminal.select_answer(question, choice);
            }
            KeyCode::Char(c) => {
                if let Some(choice) = Choice::from_letter(c) {
                    self.terminal.select_answer(question, choice);
                }
            }
            KeyCode::Enter => {
                self.terminal.submit_quiz();
            }
            _ => {}
        }
    }

    /// Render the whole screen
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.terminal.effects().rain_visible() {
            self.terminal.resize_rain(area.width, area.height);
            frame.render_widget(RainBackground::new(&self.terminal.effects().rain), area);
        }

        let layout = create_main_layout(area);
        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_shortcuts(frame, content_layout[0]);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_terminal(frame, main_layout[0]);
        self.render_quiz(frame, main_layout[1]);

        self.render_status_bar(frame, layout[2]);

        if self.terminal.viewer().is_visible() {
            self.render_viewer(frame);
        }
    }

    fn text_style(&self) -> Style {
        Style::default().fg(self.theme.text(self.terminal.effects().text_color))
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(22),
                Constraint::Min(20),
                Constraint::Length(14),
            ])
            .split(area);

        let border = Style::default().fg(self.theme.border);

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(logo, header_layout[0]);

        let title = Paragraph::new("Secure Coding Training Terminal")
            .style(self.text_style())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(title, header_layout[1]);

        let clock = Paragraph::new(chrono::Local::now().format("%H:%M:%S").to_string())
            .style(self.text_style())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(clock, header_layout[2]);
    }

    fn render_shortcuts(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .shortcuts
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {:<10}", c.keyword()),
                        Style::default().fg(self.theme.accent),
                    ),
                    Span::styled(c.description(), Style::default().fg(self.theme.dim)),
                ]))
            })
            .collect();

        let focused = self.focus == Focus::Shortcuts;
        let mut list = List::new(items).block(focus_block("Commands", focused, &self.theme));
        if focused {
            list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        frame.render_stateful_widget(list, area, &mut self.shortcut_state);
    }

    fn render_terminal(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Output
                Constraint::Length(3), // Input line
            ])
            .split(area);

        let effects = self.terminal.effects();
        let mut block = focus_block("Terminal", self.focus == Focus::Input, &self.theme);
        if effects.glitching {
            block = block.border_style(
                Style::default()
                    .fg(self.theme.glow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        let inner = block.inner(chunks[0]);
        let width = inner.width as usize;
        let text = self.text_style();
        let dim = Style::default().fg(self.theme.dim);
        let prompt = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = Vec::new();
        for welcome in self.terminal.welcome() {
            for part in wrap_text(welcome, width) {
                lines.push(Line::from(Span::styled(part, dim)));
            }
        }

        for entry in self.terminal.scrollback().entries() {
            match entry.role {
                Role::Command => {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{} ", entry.time_label()), dim),
                        Span::styled(self.terminal.prompt().to_string(), prompt),
                        Span::raw(" "),
                        Span::styled(entry.text.clone(), text),
                    ]));
                }
                Role::Response => {
                    let style = if entry.is_error {
                        Style::default().fg(self.theme.alert)
                    } else {
                        text
                    };
                    for part in wrap_text(&entry.text, width) {
                        lines.push(Line::from(Span::styled(part, style)));
                    }
                }
            }
        }

        let visible = inner.height as usize;
        self.terminal.set_scroll_limit(lines.len(), visible);
        let end = lines
            .len()
            .saturating_sub(self.terminal.scroll_offset() as usize)
            .max(visible.min(lines.len()));
        let start = end.saturating_sub(visible);
        let shown: Vec<Line> = lines.drain(start..end).collect();

        frame.render_widget(Paragraph::new(shown).block(block), chunks[0]);

        // Input line
        let input_text = Line::from(vec![
            Span::styled(self.terminal.prompt().to_string(), prompt),
            Span::raw(" "),
            Span::styled(self.terminal.input().to_string(), text),
        ]);
        let input_width = input_text.width();
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        frame.render_widget(Paragraph::new(input_text).block(input_block), chunks[1]);

        if self.focus == Focus::Input
            && self.terminal.is_booted()
            && !self.terminal.viewer().is_visible()
        {
            let column = input_width.min(chunks[1].width.saturating_sub(3) as usize) as u16;
            frame.set_cursor_position(Position::new(chunks[1].x + 1 + column, chunks[1].y + 1));
        }
    }

    fn render_quiz(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Quiz;
        let block = focus_block("Security Quiz", focused, &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let quiz = self.terminal.quiz();
        let Some(question) = quiz.questions().get(self.quiz_cursor) else {
            return;
        };
        let selected = self.terminal.selections().get(question.key);

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("Q{}/{} ", self.quiz_cursor + 1, quiz.len()),
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(question.prompt, self.text_style()),
        ])];

        for choice in Choice::ALL {
            let marker = if selected == Some(choice) { "(•)" } else { "( )" };
            let style = if selected == Some(choice) {
                self.text_style().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.dim)
            };
            lines.push(Line::from(Span::styled(
                format!("  {} {}) {}", marker, choice.letter(), question.option(choice)),
                style,
            )));
        }

        lines.push(Line::from(Span::styled(
            format!(
                "  Answered {}/{}  [↑/↓] question  [a-d] answer  [Enter] submit",
                self.terminal.selections().len(),
                quiz.len()
            ),
            Style::default().fg(self.theme.border),
        )));

        let result_height = if self.terminal.quiz_result().is_some() { 4 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(result_height)])
            .split(inner);

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

        if let Some(result) = self.terminal.quiz_result() {
            let color = if result.passed {
                self.theme.success
            } else {
                self.theme.alert
            };
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Length(2)])
                .split(chunks[1]);

            let summary = vec![
                Line::from(Span::styled(result.score_line(), Style::default().fg(color))),
                Line::from(Span::styled(
                    result.message(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ];
            frame.render_widget(Paragraph::new(summary), rows[0]);
            frame.render_widget(
                ScoreBar::new("Score", result.percentage.round() as u8, 100)
                    .pass_color(self.theme.success)
                    .fail_color(self.theme.alert)
                    .pass_threshold(crate::data::PASS_PERCENTAGE as u8),
                rows[1],
            );
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.focus {
            Focus::Input => "[Enter] run  [↑/↓] history  [Tab] shortcuts  [PgUp/PgDn] scroll",
            Focus::Shortcuts => "[↑/↓] select  [Enter] insert command  [Tab] quiz  [Esc] back",
            Focus::Quiz => "[↑/↓] question  [←/→ a-d] answer  [Enter] grade  [Tab] input",
        };
        let matrix = if self.terminal.effects().text_color == TextColor::Matrix {
            " | THE MATRIX HAS YOU"
        } else {
            ""
        };
        let status_text = format!(" {}{} | Ctrl-C to quit ", hints, matrix);

        let status = Paragraph::new(status_text)
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(status, area);
    }

    fn render_viewer(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_width = 80.min(area.width.saturating_sub(4));
        let popup_height = 24.min(area.height.saturating_sub(4));
        let popup_area = Rect::new(
            (area.width - popup_width) / 2,
            (area.height - popup_height) / 2,
            popup_width,
            popup_height,
        );

        frame.render_widget(Clear, popup_area);

        let viewer = self.terminal.viewer();
        let text = self.text_style();
        let mut lines = Vec::new();

        let mut header = vec![Span::styled(
            viewer.typed_header().to_string(),
            Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
        )];
        if !viewer.typing_done() {
            header.push(Span::styled("▌", text));
        }
        lines.push(Line::from(header));
        lines.push(Line::from(""));

        for raw in &viewer.body {
            let (kind, body) = classify(raw);
            let line = match kind {
                LineKind::Heading => Line::from(Span::styled(
                    body.to_uppercase(),
                    Style::default().fg(self.theme.warning).add_modifier(Modifier::BOLD),
                )),
                LineKind::Bullet => Line::from(vec![
                    Span::styled("  ▸ ", Style::default().fg(self.theme.accent)),
                    Span::styled(body.to_string(), text),
                ]),
                LineKind::Code => Line::from(Span::styled(
                    format!("  $ {}", body),
                    Style::default().fg(Color::White).bg(Color::Rgb(0x10, 0x10, 0x10)),
                )),
                LineKind::Warning => Line::from(Span::styled(
                    format!("  ⚠ {}", body),
                    Style::default().fg(self.theme.alert),
                )),
                LineKind::Text => Line::from(Span::styled(body.to_string(), text)),
            };
            lines.push(line);
        }

        let mut style = Style::default();
        if viewer.is_dimmed() {
            style = style.add_modifier(Modifier::DIM);
        }

        let block = styled_block(&viewer.title, &self.theme)
            .border_style(Style::default().fg(self.theme.focus_border))
            .title_bottom(Line::from(" [Esc] close  [PgUp/PgDn] scroll ").right_aligned());

        let content = Paragraph::new(lines)
            .style(style)
            .wrap(Wrap { trim: false })
            .scroll((viewer.scroll, 0))
            .block(block);
        frame.render_widget(content, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal as Screen;

    fn app() -> App {
        let mut config = Config::default();
        config.seed = Some(11);
        config.boot.enabled = false;
        config.glitch.enabled = false;
        App::new(config).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
    }

    fn screen_text(app: &mut App) -> String {
        sized_screen_text(app, 120, 40)
    }

    fn sized_screen_text(app: &mut App, width: u16, height: u16) -> String {
        let mut screen = Screen::new(TestBackend::new(width, height)).unwrap();
        screen.draw(|frame| app.render(frame)).unwrap();
        let buffer = screen.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn typing_and_enter_runs_commands() {
        let mut app = app();
        type_line(&mut app, "sudo");
        assert_eq!(
            app.terminal.scrollback().last().unwrap().text,
            "Nice try, hacker. But there's no sudo in the vibe zone!"
        );
        assert_eq!(app.terminal.input(), "");
    }

    #[test]
    fn arrows_recall_history() {
        let mut app = app();
        type_line(&mut app, "help");
        app.handle_key(key(KeyCode::Esc));
        type_line(&mut app, "xss");

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.terminal.input(), "xss");
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.terminal.input(), "help");
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.terminal.input(), "xss");
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.terminal.input(), "");
    }

    #[test]
    fn shortcut_prefills_without_running() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Shortcuts);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.terminal.input(), app.shortcuts[1].keyword());
        assert!(app.terminal.scrollback().is_empty());
    }

    #[test]
    fn quiz_keys_select_and_grade() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Quiz);

        for answer in ['c', 'a', 'c', 'c', 'c'] {
            app.handle_key(key(KeyCode::Char(answer)));
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Enter));

        let result = app.terminal.quiz_result().copied().unwrap();
        assert_eq!(result.score, 5);
        assert!(result.passed);
        assert!(screen_text(&mut app).contains("You scored 5/5 (100%)"));
    }

    #[test]
    fn right_arrow_cycles_choices() {
        let mut app = app();
        app.focus = Focus::Quiz;
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.terminal.selections().get("q1"), Some(Choice::A));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.terminal.selections().get("q1"), Some(Choice::B));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.terminal.selections().get("q1"), Some(Choice::A));
    }

    #[test]
    fn escape_closes_viewer() {
        let mut app = app();
        type_line(&mut app, "owasp");
        assert!(app.terminal.viewer().is_visible());
        assert!(screen_text(&mut app).contains("OWASP Top 10 Breakdown"));

        app.handle_key(key(KeyCode::Esc));
        app.terminal.tick(Duration::from_millis(300));
        assert!(!app.terminal.viewer().is_visible());
    }

    #[test]
    fn not_found_is_rendered() {
        let mut app = app();
        type_line(&mut app, "rm -rf");
        let screen = screen_text(&mut app);
        assert!(screen.contains("root@vibesec:~$ rm -rf"));
        assert!(screen.contains("Command not found: rm -rf."));
    }

    #[test]
    fn page_up_reaches_the_oldest_output_through_wrapped_lines() {
        let mut app = app();
        type_line(&mut app, "first-marker");
        for _ in 0..15 {
            type_line(&mut app, "password");
        }
        assert!(!sized_screen_text(&mut app, 80, 30).contains("first-marker"));

        for _ in 0..200 {
            app.handle_key(key(KeyCode::PageUp));
        }
        let top = sized_screen_text(&mut app, 80, 30);
        assert!(top.contains("root@vibesec:~$ first-marker"));
        assert!(top.contains("Initializing VibeSec"));

        app.handle_key(key(KeyCode::PageDown));
        assert!(!app.terminal.is_following());
        app.handle_key(key(KeyCode::End));
        assert!(!sized_screen_text(&mut app, 80, 30).contains("first-marker"));
    }

    #[test]
    fn echoed_commands_carry_their_time() {
        let mut app = app();
        type_line(&mut app, "coffee");
        let label = app.terminal.scrollback().entries()[0].time_label();
        assert!(screen_text(&mut app).contains(&format!("{} root@vibesec:~$ coffee", label)));
    }

    #[test]
    fn any_key_during_boot_skips_the_banner() {
        let mut config = Config::default();
        config.seed = Some(11);
        config.glitch.enabled = false;
        let mut app = App::new(config).unwrap();
        assert!(!app.terminal.is_booted());

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.terminal.is_booted());
        assert_eq!(app.terminal.input(), "");
        assert!(screen_text(&mut app).contains("Welcome, vibe coder."));
    }

    #[test]
    fn enter_on_empty_line_finishes_typing() {
        let mut app = app();
        type_line(&mut app, "deps");
        assert!(!app.terminal.viewer().typing_done());

        app.handle_key(key(KeyCode::Enter));
        assert!(app.terminal.viewer().typing_done());
        assert_eq!(app.terminal.history().entries(), ["deps"]);
    }

    #[test]
    fn cursor_follows_display_width() {
        fn cursor_x(input: &str) -> u16 {
            let mut app = app();
            for c in input.chars() {
                app.handle_key(key(KeyCode::Char(c)));
            }
            let mut screen = Screen::new(TestBackend::new(120, 40)).unwrap();
            screen.draw(|frame| app.render(frame)).unwrap();
            screen.get_cursor_position().unwrap().x
        }

        assert_eq!(cursor_x("日本"), cursor_x("abcd"));
        assert_eq!(cursor_x("ab") + 2, cursor_x("abcd"));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.running);
    }

    #[test]
    fn renders_in_a_tiny_terminal() {
        let mut app = app();
        type_line(&mut app, "matrix");
        type_line(&mut app, "help");
        let mut screen = Screen::new(TestBackend::new(30, 16)).unwrap();
        screen.draw(|frame| app.render(frame)).unwrap();
    }
}
