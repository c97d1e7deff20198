//! Session ledgers: completed-game log and the annotation feed.

use crate::round::{Move, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Most recent annotations retained for the presentation feed.
const FEED_CAPACITY: usize = 10;

/// A completed round: its outcome and a snapshot of the move history.
///
/// Appended to the session log on every round completion and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// How the round ended.
    pub outcome: Outcome,
    /// The moves of the round, in play order.
    pub moves: Vec<Move>,
}

impl GameRecord {
    /// Creates a record from a finished round's history.
    pub fn new(outcome: Outcome, moves: Vec<Move>) -> Self {
        Self { outcome, moves }
    }
}

/// Capacity-bounded, newest-first feed of human-readable move
/// annotations.
///
/// Purely a presentation concern: the collaborator renders the strings
/// verbatim. Only the [`FEED_CAPACITY`] most recent entries survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationFeed {
    entries: VecDeque<String>,
}

impl AnnotationFeed {
    /// Creates an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an annotation, dropping the oldest past capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        while self.entries.len() > FEED_CAPACITY {
            self.entries.pop_back();
        }
    }

    /// Entries newest-first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_newest_first() {
        let mut feed = AnnotationFeed::new();
        feed.push("first");
        feed.push("second");
        let entries: Vec<_> = feed.entries().collect();
        assert_eq!(entries, vec!["second", "first"]);
    }

    #[test]
    fn test_feed_capacity_bounded() {
        let mut feed = AnnotationFeed::new();
        for i in 0..15 {
            feed.push(format!("entry {i}"));
        }
        assert_eq!(feed.len(), FEED_CAPACITY);
        assert_eq!(feed.entries().next(), Some("entry 14"));
        assert_eq!(feed.entries().last(), Some("entry 5"));
    }
}
