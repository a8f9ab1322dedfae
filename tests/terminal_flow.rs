use std::time::Duration;

use vibesec::data::{Choice, Role, FAIL_MESSAGE, PASS_MESSAGE};
use vibesec::terminal::{Command, Resolution, TextColor, Visibility};
use vibesec::{Config, Terminal};

const KEYWORDS: [&str; 17] = [
    "help", "secrets", "injection", "xss", "auth", "deps", "headers", "tools", "owasp", "about",
    "clear", "matrix", "sudo", "hack", "password", "coffee", "trivia",
];

fn quiet_config() -> Config {
    let mut config = Config::default();
    config.seed = Some(2024);
    config.boot.enabled = false;
    config.glitch.enabled = false;
    config
}

fn terminal() -> Terminal {
    Terminal::new(quiet_config()).expect("built-in catalog is complete")
}

fn answer(terminal: &mut Terminal, picks: [Choice; 5]) {
    for (i, choice) in picks.into_iter().enumerate() {
        terminal.select_answer(&format!("q{}", i + 1), choice);
    }
}

#[test]
fn vocabulary_is_exactly_the_documented_keywords() {
    let keywords: Vec<_> = Command::ALL.iter().map(|c| c.keyword()).collect();
    assert_eq!(keywords, KEYWORDS);
}

#[test]
fn mixed_case_keywords_never_report_not_found() {
    for keyword in KEYWORDS {
        let mut t = terminal();
        let raw = format!("\t {} ", keyword.to_ascii_uppercase());
        let resolution = t.submit(&raw).expect("non-empty input");
        assert!(matches!(resolution, Resolution::Command(_)), "{keyword}");
        assert!(
            t.scrollback().entries().iter().all(|e| !e.is_error),
            "{keyword} produced an error line"
        );
    }
}

#[test]
fn module_keywords_open_the_viewer() {
    let mut t = terminal();
    t.submit("injection");
    assert_eq!(t.viewer().visibility, Visibility::Opening);
    assert_eq!(t.viewer().title, "SQL Injections: Close The Door");
    assert_eq!(t.viewer().key, "injection-module");

    t.tick(Duration::from_millis(50));
    assert_eq!(t.viewer().visibility, Visibility::Open);
}

#[test]
fn unknown_input_is_reported_but_remembered() {
    let mut t = terminal();
    t.submit("Hello There");

    let entries = t.scrollback().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].role, Role::Command);
    assert_eq!(entries[0].text, "hello there");
    assert!(entries[1].is_error);
    assert_eq!(
        entries[1].text,
        "Command not found: hello there. Type 'help' to see available commands."
    );
    assert_eq!(t.history().entries(), ["hello there"]);
}

#[test]
fn whitespace_only_input_is_dropped() {
    let mut t = terminal();
    t.type_char(' ');
    t.type_char(' ');
    assert_eq!(t.enter(), None);
    assert!(t.history().is_empty());
    assert!(t.scrollback().is_empty());
}

#[test]
fn history_recall_sequence() {
    let mut t = terminal();
    t.submit("help");
    t.submit("xss");

    t.recall_previous();
    assert_eq!(t.input(), "xss");
    t.recall_previous();
    assert_eq!(t.input(), "help");
    t.recall_next();
    assert_eq!(t.input(), "xss");
    t.recall_next();
    assert_eq!(t.input(), "");
}

#[test]
fn clear_keeps_recall_history() {
    let mut t = terminal();
    t.submit("hack");
    t.submit("clear");

    assert_eq!(t.scrollback().len(), 1);
    assert_eq!(t.scrollback().entries()[0].text, "Terminal cleared.");

    t.recall_previous();
    assert_eq!(t.input(), "clear");
    t.recall_previous();
    assert_eq!(t.input(), "hack");
}

#[test]
fn quiz_perfect_boundary_and_fail() {
    let mut t = terminal();

    answer(&mut t, [Choice::C, Choice::A, Choice::C, Choice::C, Choice::C]);
    let perfect = t.submit_quiz();
    assert_eq!((perfect.score, perfect.total), (5, 5));
    assert_eq!(perfect.percentage, 100.0);
    assert_eq!(perfect.message(), PASS_MESSAGE);

    answer(&mut t, [Choice::C, Choice::A, Choice::C, Choice::C, Choice::A]);
    let boundary = t.submit_quiz();
    assert_eq!(boundary.score, 4);
    assert!(boundary.passed);

    answer(&mut t, [Choice::C, Choice::B, Choice::B, Choice::B, Choice::B]);
    let one = t.submit_quiz();
    assert_eq!(one.score, 1);
    assert_eq!(one.message(), FAIL_MESSAGE);

    answer(&mut t, [Choice::D; 5]);
    let zero = t.submit_quiz();
    assert_eq!(zero.score, 0);
    assert!(!zero.passed);

    assert_eq!(
        t.scrollback().last().unwrap().text,
        "Quiz completed! Score: 0/5 (0%)"
    );
}

#[test]
fn resubmitting_quiz_recomputes_from_current_selections() {
    let mut t = terminal();
    answer(&mut t, [Choice::C, Choice::A, Choice::C, Choice::C, Choice::C]);
    let first = t.submit_quiz();
    let again = t.submit_quiz();
    assert_eq!(first, again);

    t.select_answer("q1", Choice::A);
    assert_eq!(t.submit_quiz().score, 4);
}

#[test]
fn same_module_twice_renders_the_same() {
    let mut t = terminal();
    t.submit("headers");
    t.tick(Duration::from_secs(1));
    let first = t.viewer().rendered();

    t.submit("tools");
    t.submit("headers");
    t.tick(Duration::from_secs(1));
    assert_eq!(t.viewer().rendered(), first);
}

#[test]
fn matrix_is_temporary() {
    let mut t = terminal();
    t.submit("matrix");
    assert_eq!(t.effects().text_color, TextColor::Matrix);
    t.tick(Duration::from_secs(5));
    assert_eq!(t.effects().text_color, TextColor::Normal);
}

#[test]
fn seeded_terminals_pick_the_same_trivia() {
    let mut a = terminal();
    let mut b = terminal();
    a.submit("trivia");
    b.submit("trivia");
    assert_eq!(
        a.scrollback().last().unwrap().text,
        b.scrollback().last().unwrap().text
    );
}
