//! The event ledger: live event instances for the season in progress.
//!
//! # Lifecycle
//!
//! Each game the season calls [`EventLedger::tick`] first, then
//! optionally [`EventLedger::add`], then reads
//! [`EventLedger::active_modifiers`]. An event added with duration `d`
//! therefore shapes exactly `d` games.

use courtside_types::{ActiveEvent, EventDefinition, StackPolicy, StatMap};
use tracing::debug;

use crate::LedgerError;
use crate::modifiers::combine;

/// What [`EventLedger::add`] did with a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new instance was inserted.
    Activated,
    /// An existing Replace instance with the same name had its duration reset.
    Refreshed,
}

/// Active event instances plus the activation counter.
#[derive(Debug, Clone, Default)]
pub struct EventLedger {
    /// Live instances in activation order (refreshes keep their slot).
    active: Vec<ActiveEvent>,
    /// Last sequence number handed out.
    sequence: u64,
}

impl EventLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            active: Vec::new(),
            sequence: 0,
        }
    }

    /// Number of live instances.
    pub const fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no instance is live.
    pub const fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Live instances in activation order.
    pub fn active(&self) -> &[ActiveEvent] {
        &self.active
    }

    /// Games left for the instance named `name`.
    ///
    /// When several Additive or Multiplicative instances share the name, the
    /// longest remaining duration is returned.
    pub fn remaining_for(&self, name: &str) -> Option<u32> {
        self.active
            .iter()
            .filter(|e| e.name() == name)
            .map(|e| e.remaining_games)
            .max()
    }

    /// Drop every live instance. The sequence counter keeps counting.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Count every instance down by one game and remove the ones that hit
    /// zero. Returns the removed instances.
    pub fn tick(&mut self) -> Vec<ActiveEvent> {
        for event in &mut self.active {
            event.remaining_games = event.remaining_games.saturating_sub(1);
        }
        let (expired, live): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(|e| e.remaining_games == 0);
        self.active = live;
        for event in &expired {
            debug!(event = %event.name(), "Event expired");
        }
        expired
    }

    /// Activate `definition` for `definition.duration` games.
    ///
    /// A Replace definition whose name is already live refreshes that
    /// instance instead of adding a second one.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroDuration`] for a zero-length event and
    /// [`LedgerError::SequenceOverflow`] if the counter is exhausted.
    pub fn add(&mut self, definition: EventDefinition) -> Result<AddOutcome, LedgerError> {
        if definition.duration == 0 {
            return Err(LedgerError::ZeroDuration {
                name: definition.name,
            });
        }
        let seq = self
            .sequence
            .checked_add(1)
            .ok_or(LedgerError::SequenceOverflow)?;
        self.sequence = seq;

        if definition.stack_policy == StackPolicy::Replace
            && let Some(existing) = self
                .active
                .iter_mut()
                .find(|e| e.definition.name == definition.name)
        {
            existing.remaining_games = definition.duration;
            existing.activated_at = seq;
            existing.definition = definition;
            debug!(event = %existing.name(), remaining = existing.remaining_games, "Event refreshed");
            return Ok(AddOutcome::Refreshed);
        }

        debug!(event = %definition.name, duration = definition.duration, "Event activated");
        self.active.push(ActiveEvent {
            remaining_games: definition.duration,
            activated_at: seq,
            definition,
        });
        Ok(AddOutcome::Activated)
    }

    /// Current multiplier per tracked stat (1.0 for untouched stats).
    pub fn active_modifiers(&self) -> StatMap {
        combine(&self.active)
    }
}
