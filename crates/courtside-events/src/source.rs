//! Where the simulator gets each game's event from.
//!
//! The simulator asks an [`EventSource`] once per game. The production
//! source is the [`EventCatalog`] roll; tests and replays use a
//! [`ScriptedEventSource`] that fires fixed events on fixed games, or
//! [`NoEvents`] to isolate the performance model.

use std::collections::BTreeMap;

use courtside_types::EventDefinition;
use rand::RngCore;

use crate::catalog::EventCatalog;

/// Supplies at most one new event per game.
pub trait EventSource: Send + core::fmt::Debug {
    /// Event (if any) that fires before `game` is simulated.
    ///
    /// `game` is the 1-based game number within the current season.
    fn next_event(&mut self, game: u32, rng: &mut dyn RngCore) -> Option<EventDefinition>;
}

impl EventSource for EventCatalog {
    fn next_event(&mut self, _game: u32, rng: &mut dyn RngCore) -> Option<EventDefinition> {
        self.roll_event(rng).cloned()
    }
}

/// A source that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl EventSource for NoEvents {
    fn next_event(&mut self, _game: u32, _rng: &mut dyn RngCore) -> Option<EventDefinition> {
        None
    }
}

/// Fires predetermined events on predetermined game numbers.
///
/// The schedule repeats every season because it is keyed on the game number
/// within the season. Does not consume randomness.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEventSource {
    schedule: BTreeMap<u32, EventDefinition>,
}

impl ScriptedEventSource {
    /// Empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `definition` to fire before `game`. A later call for the same
    /// game overwrites the earlier one.
    #[must_use]
    pub fn with_event(mut self, game: u32, definition: EventDefinition) -> Self {
        self.schedule.insert(game, definition);
        self
    }

    /// Number of scheduled games.
    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

impl EventSource for ScriptedEventSource {
    fn next_event(&mut self, game: u32, _rng: &mut dyn RngCore) -> Option<EventDefinition> {
        self.schedule.get(&game).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::catalog::{RollTable, default_events};

    #[test]
    fn no_events_is_silent() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut source = NoEvents;
        assert!((1..=82).all(|g| source.next_event(g, &mut rng).is_none()));
    }

    #[test]
    fn scripted_source_fires_on_schedule() {
        let catalog = EventCatalog::default();
        let hot = catalog.get("Hot Streak").cloned().unwrap();
        let slump = catalog.get("Shooting Slump").cloned().unwrap();
        let mut source = ScriptedEventSource::new()
            .with_event(1, hot)
            .with_event(10, slump);
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(source.len(), 2);
        assert_eq!(source.next_event(1, &mut rng).unwrap().name, "Hot Streak");
        assert!(source.next_event(2, &mut rng).is_none());
        assert_eq!(source.next_event(10, &mut rng).unwrap().name, "Shooting Slump");
    }

    #[test]
    fn catalog_source_always_fires_when_certain() {
        let table = RollTable {
            trigger_probability: 1.0,
            ..RollTable::default()
        };
        let mut source = EventCatalog::new(default_events(), table).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        assert!((1..=20).all(|g| source.next_event(g, &mut rng).is_some()));
    }
}
