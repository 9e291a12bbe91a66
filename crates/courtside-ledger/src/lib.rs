//! Event ledger for the Courtside simulation.
//!
//! The ledger owns every live event instance for the season in progress.
//! Each game it counts instances down, expires those that run out, and
//! folds the survivors into one multiplier per stat.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`EventLedger`] struct: activation, countdown and queries.
//! - [`modifiers`] -- How instances combine under each [`StackPolicy`].
//!
//! # Stacking
//!
//! For every stat:
//!
//! ```text
//! modifier = (1 + sum(additive - 1)) * product(multiplicative) * newest(replace)
//! ```
//!
//! floored at zero. A stat no instance touches has modifier `1.0`.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use courtside_ledger::EventLedger;
//! use courtside_types::{EventCategory, EventDefinition, StackPolicy, Stat};
//!
//! let hot_streak = EventDefinition {
//!     name: String::from("Hot Streak"),
//!     description: String::new(),
//!     category: EventCategory::Positive,
//!     magnitudes: BTreeMap::from([(Stat::Points, 1.3)]),
//!     duration: 5,
//!     stack_policy: StackPolicy::Additive,
//! };
//!
//! let mut ledger = EventLedger::new();
//! ledger.add(hot_streak).ok();
//! let modifiers = ledger.active_modifiers();
//! assert!((modifiers[&Stat::Points] - 1.3).abs() < 1e-9);
//! ```
//!
//! [`StackPolicy`]: courtside_types::StackPolicy

pub mod ledger;
pub mod modifiers;

pub use ledger::{AddOutcome, EventLedger};
pub use modifiers::combine;

/// Errors that can occur when activating an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// An event must last at least one game.
    #[error("event {name} has zero duration")]
    ZeroDuration {
        /// Name of the rejected definition.
        name: String,
    },

    /// The activation sequence counter is exhausted.
    #[error("event activation counter overflowed")]
    SequenceOverflow,
}
