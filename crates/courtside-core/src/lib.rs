//! Career simulation core for Courtside.
//!
//! This crate owns the per-game tick that drives a career: profile
//! creation, the age curve, game simulation, the season state machine,
//! career evaluation and the auto-play loop.
//!
//! # Modules
//!
//! - [`aging`] -- Age curve peaking at 28.
//! - [`career`] -- [`CareerEvaluator`]: season records in, tier and summary out.
//! - [`clock`] -- Career clock with season index, game counter and age.
//! - [`config`] -- Configuration loading from `courtside-config.yaml` into
//!   strongly-typed structs.
//! - [`game`] -- Single-game stat line simulation.
//! - [`operator`] -- [`PlaybackControl`]: pause, resume, pace and stop.
//! - [`profile`] -- Position and archetype tables, profile generation.
//! - [`runner`] -- Async auto-play and synchronous playthrough.
//! - [`season`] -- [`Season`]: the per-game state machine.
//! - [`tick`] -- The tick cycle and [`SimulationState`].
//!
//! [`CareerEvaluator`]: career::CareerEvaluator
//! [`PlaybackControl`]: operator::PlaybackControl
//! [`Season`]: season::Season
//! [`SimulationState`]: tick::SimulationState

pub mod aging;
pub mod career;
pub mod clock;
pub mod config;
pub mod game;
pub mod operator;
pub mod profile;
pub mod runner;
pub mod season;
pub mod tick;
