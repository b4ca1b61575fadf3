//! Order stack and the column toggle rule.

mod compare;

pub use compare::*;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    /// Parses `asc`/`desc` in any case.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(Direction::Asc),
            "DESC" => Some(Direction::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One sort key of the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    /// Label of the column that was clicked.
    pub column: String,
    /// Opaque order key of that column.
    pub key: String,
    pub direction: Direction,
}

impl OrderEntry {
    pub fn new(column: impl Into<String>, key: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            key: key.into(),
            direction,
        }
    }
}

/// Priority list of sort keys, most significant first.
///
/// Holds at most one entry per order key. Only the top entry is applied to
/// in-memory rows; the rest is history shown to the user and emitted in
/// query order clauses.
///
/// # Example
///
/// ```
/// use gbrowse_lib::order::{Direction, OrderStack};
///
/// let mut stack = OrderStack::default();
/// stack.toggle("Name", "name");
/// stack.toggle("Date", "created");
/// stack.toggle("Date", "created");
///
/// let top = stack.top().unwrap();
/// assert_eq!((top.column.as_str(), top.direction), ("Date", Direction::Desc));
/// assert_eq!(stack.describe(), "Date DESC, Name ASC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderStack {
    entries: Vec<OrderEntry>,
}

impl OrderStack {
    /// Builds a stack from entries, dropping later duplicates of a key.
    pub fn new(entries: impl IntoIterator<Item = OrderEntry>) -> Self {
        let mut stack = Self::default();
        for entry in entries {
            if !stack.entries.iter().any(|e| e.key == entry.key) {
                stack.entries.push(entry);
            }
        }
        stack
    }

    /// The primary entry.
    pub fn top(&self) -> Option<&OrderEntry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies a click on the column labelled `label` sorting by `key`.
    ///
    /// - top entry with this key: flip it (a click through a different
    ///   label sharing the key restarts at ascending under that label);
    /// - key elsewhere in the stack: move it to the top, ascending;
    /// - new key: push on top, ascending.
    pub fn toggle(&mut self, label: &str, key: &str) {
        match self.entries.iter().position(|e| e.key == key) {
            Some(0) => {
                let top = &mut self.entries[0];
                top.direction = if top.column == label {
                    top.direction.flip()
                } else {
                    Direction::Asc
                };
                top.column = label.to_string();
            }
            Some(position) => {
                self.entries.remove(position);
                self.entries.insert(0, OrderEntry::new(label, key, Direction::Asc));
            }
            None => {
                self.entries.insert(0, OrderEntry::new(label, key, Direction::Asc));
            }
        }
        log::debug!("order toggled on '{}', stack now: {}", label, self.describe());
    }

    /// Human-readable stack, e.g. `"Name ASC, Date DESC"`.
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}", e.column, e.direction))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
