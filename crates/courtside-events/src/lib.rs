//! Event catalog and event sources for the Courtside simulation.
//!
//! Events are time-limited modifiers on one or more stats: hot streaks,
//! slumps, injuries, role changes. This crate holds the read-only registry
//! of event definitions and the seam through which a season obtains new
//! events each game.
//!
//! # Modules
//!
//! - [`catalog`] -- [`EventCatalog`], the [`RollTable`] and the default event pool.
//! - [`source`] -- [`EventSource`] trait with catalog, scripted and no-op sources.

pub mod catalog;
pub mod source;

pub use catalog::{EventCatalog, RollTable, default_events};
pub use source::{EventSource, NoEvents, ScriptedEventSource};

/// Errors that can occur when building or loading an event catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read a catalog file from disk.
    #[error("failed to read event catalog: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse catalog YAML.
    #[error("failed to parse event catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// A definition or roll setting failed validation.
    #[error("invalid event catalog: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}
