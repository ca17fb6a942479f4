use deepenglish_types::{Direction, WordRecord};

/// Navigable list of looked-up records with a cursor.
///
/// `current` is `None` exactly when `records` is empty; otherwise it is a
/// valid index of the displayed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<WordRecord>,
    current: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts; `-1` means empty.
    /// An index out of range for `records` is clamped to the last record.
    pub fn from_parts(records: Vec<WordRecord>, index: i64) -> Self {
        let current = match records.len() {
            0 => None,
            len => match usize::try_from(index) {
                Ok(i) if i < len => Some(i),
                _ => Some(len - 1),
            },
        };

        Self { records, current }
    }

    /// Persisted form of the cursor (`-1` when empty)
    pub fn index(&self) -> i64 {
        self.current.map_or(-1, |i| i as i64)
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&WordRecord> {
        self.current.and_then(|i| self.records.get(i))
    }

    /// Position of the record whose word matches `word`, ignoring case
    pub fn position(&self, word: &str) -> Option<usize> {
        self.records.iter().position(|r| r.matches(word))
    }

    /// Move the cursor onto an existing record
    pub fn select(&mut self, index: usize) -> Option<&WordRecord> {
        if index >= self.records.len() {
            return None;
        }
        self.current = Some(index);
        self.records.get(index)
    }

    /// Drop everything after the cursor, append `record` and point at it
    pub fn push(&mut self, record: WordRecord) -> usize {
        let keep = self.current.map_or(0, |i| i + 1);
        self.records.truncate(keep);
        self.records.push(record);

        let index = self.records.len() - 1;
        self.current = Some(index);
        index
    }

    /// Step the cursor; `None` at either end (or when empty)
    pub fn step(&mut self, direction: Direction) -> Option<&WordRecord> {
        let current = self.current?;
        let target = match direction {
            Direction::Previous => current.checked_sub(1)?,
            Direction::Next => current + 1,
        };
        self.select(target)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current.is_some_and(|i| i > 0)
    }

    pub fn can_go_next(&self) -> bool {
        self.current.is_some_and(|i| i + 1 < self.records.len())
    }
}
