use serde::Serialize;
use std::collections::VecDeque;

/// Submitted commands, most recent first, deduplicated and capped, with a
/// recall cursor for up/down browsing.
#[derive(Debug, Clone, Serialize)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    // None = not browsing
    cursor: Option<usize>,
    #[serde(skip)]
    limit: usize,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self { entries: VecDeque::with_capacity(limit), cursor: None, limit: limit.max(1) }
    }

    pub fn entries(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// -1 while not browsing.
    pub fn cursor(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// Moves an existing entry to the front rather than duplicating it.
    /// Always resets the cursor.
    pub fn record(&mut self, line: &str) {
        self.cursor = None;
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.entries.retain(|e| e != line);
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Step toward older entries, clamped at the oldest. Returns the entry to
    /// place in the input, or `None` when there is no history.
    pub fn older(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        let next = match self.cursor {
            None => 0,
            Some(c) => (c + 1).min(last),
        };
        self.cursor = Some(next);
        self.entries.get(next).cloned()
    }

    /// Step toward newer entries. Leaving the front ends browsing and yields
    /// an empty input.
    pub fn newer(&mut self) -> String {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.entries.get(c - 1).cloned().unwrap_or_default()
            }
            _ => {
                self.cursor = None;
                String::new()
            }
        }
    }
}
