//! Shared type definitions for the Courtside career simulation.
//!
//! This crate is the single source of truth for the records that flow
//! between the ledger, the simulator and any external renderer. Types
//! defined here flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for careers
//! - [`enums`] -- Positions, archetypes, stats, event vocabulary, tiers
//! - [`structs`] -- Profiles, event definitions, stat lines, season and career records

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Archetype, EventCategory, ParseEnumError, Position, SeasonPhase, StackPolicy, Stat, Tier,
};
pub use ids::CareerId;
pub use structs::{
    ActiveEvent, CareerRecord, CareerSummary, EventDefinition, GameStatLine, PlayerProfile,
    SeasonRecord, StatMap, stat_or_zero,
};
