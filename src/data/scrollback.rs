//! The visible log of submitted commands and their responses

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who produced a scrollback line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Command,
    Response,
}

/// One line in the scrollback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub role: Role,
    pub text: String,
    pub is_error: bool,
    pub timestamp: DateTime<Local>,
}

impl Entry {
    pub fn command(text: &str) -> Self {
        Self {
            role: Role::Command,
            text: text.to_string(),
            is_error: false,
            timestamp: Local::now(),
        }
    }

    pub fn response(text: &str) -> Self {
        Self {
            role: Role::Response,
            text: text.to_string(),
            is_error: false,
            timestamp: Local::now(),
        }
    }

    pub fn error(text: &str) -> Self {
        Self {
            is_error: true,
            ..Self::response(text)
        }
    }

    /// `[HH:MM:SS]` prefix shown before echoed commands
    pub fn time_label(&self) -> String {
        self.timestamp.format("[%H:%M:%S]").to_string()
    }
}

/// Append-only log, except for an explicit clear
#[derive(Debug, Clone, Default)]
pub struct Scrollback {
    entries: Vec<Entry>,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_entries_are_responses() {
        let entry = Entry::error("boom");
        assert_eq!(entry.role, Role::Response);
        assert!(entry.is_error);
    }

    #[test]
    fn time_label_is_wall_clock() {
        use chrono::TimeZone;

        let mut entry = Entry::command("xss");
        entry.timestamp = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(entry.time_label(), "[07:05:42]");
    }

    #[test]
    fn clear_empties_everything() {
        let mut log = Scrollback::new();
        log.push(Entry::command("help"));
        log.push(Entry::response("ok"));
        assert_eq!(log.len(), 2);

        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
