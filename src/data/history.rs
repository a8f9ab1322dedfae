//! Command recall for the input line

/// Previously submitted commands, most recent first, with an Up/Down cursor
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command and reset the cursor
    pub fn record(&mut self, command: &str) {
        self.entries.insert(0, command.to_string());
        self.cursor = None;
    }

    /// Step back in time. Returns the entry to show, or `None` when already
    /// at the oldest entry (the input is left as it is).
    pub fn back(&mut self) -> Option<&str> {
        let next = match self.cursor {
            None => 0,
            Some(i) => i + 1,
        };
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(&self.entries[next])
    }

    /// Step forward in time. Past the newest entry the input goes back to
    /// empty; with no cursor this does nothing.
    pub fn forward(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(0) => {
                self.cursor = None;
                Some("")
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                Some(&self.entries[i - 1])
            }
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
