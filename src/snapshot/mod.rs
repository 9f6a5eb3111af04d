// Transcript of evaluated lines for the REPL history pane

use std::collections::VecDeque;

/// Default number of lines kept by a [`Transcript`]
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// Result of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(i32),
    /// `position` is set for syntax errors and points into `Entry::input`
    Failure {
        message: String,
        position: Option<usize>,
    },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }
}

/// One evaluated line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub input: String,
    /// Postfix form of the parsed tree, when parsing got that far
    pub rpn: Option<String>,
    pub outcome: Outcome,
}

/// Bounded history of evaluated lines, oldest first
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: VecDeque<Entry>,
    max_entries: usize,
    /// Lines evicted so far, so entry numbers stay stable
    evicted: usize,
}

impl Transcript {
    pub fn new(max_entries: usize) -> Self {
        Transcript {
            entries: VecDeque::new(),
            max_entries,
            evicted: 0,
        }
    }

    /// Record a line, dropping the oldest one when full.
    ///
    /// A transcript with `max_entries == 0` records nothing.
    pub fn push(&mut self, entry: Entry) {
        if self.max_entries == 0 {
            self.evicted += 1;
            return;
        }
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(entry);
    }

    /// Get an entry by index into the retained history
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based number of the first retained entry
    pub fn first_number(&self) -> usize {
        self.evicted + 1
    }

    /// Total lines ever recorded, including evicted ones
    pub fn total(&self) -> usize {
        self.evicted + self.entries.len()
    }

    pub fn clear(&mut self) {
        self.evicted += self.entries.len();
        self.entries.clear();
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}
