//! Row id generation.
//!
//! The store never invents ids on its own; it asks an injected generator.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::RowId;

/// Source of fresh row ids.
pub trait IdGenerator: fmt::Debug {
    /// Produce the next candidate id.
    fn next_id(&mut self) -> RowId;
}

/// Monotonic counter.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: RowId,
}

impl SequentialIds {
    /// Create a counter whose first id is `first`.
    pub fn starting_at(first: RowId) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> RowId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Wall-clock derived ids (milliseconds since the Unix epoch).
///
/// Two calls within the same millisecond still yield distinct ids: the value
/// never goes below `last + 1`.
#[derive(Debug, Clone, Default)]
pub struct ClockIds {
    last: RowId,
}

impl ClockIds {
    /// Create a new clock generator.
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis() -> RowId {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as RowId)
            .unwrap_or(0)
    }
}

impl IdGenerator for ClockIds {
    fn next_id(&mut self) -> RowId {
        let id = Self::now_millis().max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

/// Which generator the application should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Counter continuing after the highest existing id.
    #[default]
    Sequential,
    /// Time-derived ids.
    Clock,
}

impl IdStrategy {
    /// Build a generator for this strategy.
    ///
    /// `highest_existing` is the largest id already present in the store.
    pub fn generator(&self, highest_existing: RowId) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::starting_at(
                highest_existing.saturating_add(1),
            )),
            IdStrategy::Clock => Box::new(ClockIds::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::starting_at(10);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(ids.next_id(), 11);
        assert_eq!(ids.next_id(), 12);
    }

    #[test]
    fn test_sequential_default_starts_at_one() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), 1);
    }

    #[test]
    fn test_clock_ids_strictly_increase() {
        let mut ids = ClockIds::new();
        let mut previous = ids.next_id();
        for _ in 0..1000 {
            let id = ids.next_id();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_strategy_generator() {
        let mut seq = IdStrategy::Sequential.generator(5);
        assert_eq!(seq.next_id(), 6);

        let mut clock = IdStrategy::Clock.generator(5);
        assert!(clock.next_id() > 5);
    }

    #[test]
    fn test_strategy_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: IdStrategy,
        }
        let parsed: Wrapper = toml::from_str("strategy = \"clock\"").unwrap();
        assert_eq!(parsed.strategy, IdStrategy::Clock);
    }
}
