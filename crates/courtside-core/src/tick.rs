//! Tick cycle: one game of the career per tick.
//!
//! Each tick:
//!
//! 1. **Clock** -- advance to the next game of the current season.
//! 2. **Season step** -- expire events, roll for a new one, simulate the
//!    game, update the running averages.
//! 3. **Career** -- when the game completes the season, record the season
//!    with the career evaluator.
//!
//! Opening the next season is a separate operation,
//! [`start_next_season`], so a caller can show an end-of-season screen
//! between seasons. The tick cycle is deterministic given the same config,
//! profile and seed.

use courtside_events::{CatalogError, EventCatalog, EventSource};
use courtside_types::{
    CareerId, CareerRecord, CareerSummary, GameStatLine, PlayerProfile, StatMap,
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use crate::career::{CareerError, CareerEvaluator};
use crate::clock::{CareerClock, ClockError};
use crate::config::{CourtsideConfig, EventsConfig};
use crate::profile::{ProfileError, create_profile_from_names};
use crate::season::{Season, SeasonError};

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The season rejected the step.
    #[error("season error: {source}")]
    Season {
        /// The underlying season error.
        #[from]
        source: SeasonError,
    },

    /// The career evaluator rejected a season.
    #[error("career error: {source}")]
    Career {
        /// The underlying career error.
        #[from]
        source: CareerError,
    },

    /// The profile could not be built.
    #[error("profile error: {source}")]
    Profile {
        /// The underlying profile error.
        #[from]
        source: ProfileError,
    },

    /// The event catalog could not be built.
    #[error("event catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },

    /// The next season was requested before the current one finished.
    #[error("season {season} still has games to play ({games_played} played)")]
    SeasonInProgress {
        /// 1-based season index.
        season: u32,
        /// Games played so far.
        games_played: u32,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSummary {
    /// Games played across the career, including this one.
    pub tick: u64,
    /// 1-based season index.
    pub season: u32,
    /// Player age this season.
    pub age: u32,
    /// The game's stat line.
    pub line: GameStatLine,
    /// Season averages after this game.
    pub averages: StatMap,
    /// Modifiers the game was played under.
    pub modifiers: StatMap,
    /// Event that fired before this game.
    pub event_started: Option<String>,
    /// Events that ran out before this game.
    pub events_expired: Vec<String>,
    /// Names of events active during this game.
    pub active_events: Vec<String>,
    /// Whether this game finished the season.
    pub season_completed: bool,
    /// Whether this game finished the career.
    pub career_completed: bool,
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug)]
pub struct SimulationState {
    /// The simulated player.
    pub profile: PlayerProfile,
    /// Season, game and age.
    pub clock: CareerClock,
    /// The season in progress.
    pub season: Season,
    /// Completed seasons.
    pub career: CareerEvaluator,
    /// Where new events come from.
    pub events: Box<dyn EventSource>,
    /// Configuration the career was started with.
    pub config: CourtsideConfig,
    /// The single random source for the whole career.
    pub rng: StdRng,
}

impl SimulationState {
    /// Build a career from configuration: seed the random source, draw the
    /// profile, and load the event catalog.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Profile`] for unknown position or archetype
    /// names, [`TickError::Catalog`] if a custom catalog fails to load, and
    /// [`TickError::Clock`] for invalid season settings.
    pub fn new(config: CourtsideConfig) -> Result<Self, TickError> {
        let mut rng = StdRng::seed_from_u64(config.career.seed);
        let profile =
            create_profile_from_names(&config.career.position, &config.career.archetype, &mut rng)?;
        let catalog = build_catalog(&config.events)?;
        Self::assemble(config, profile, Box::new(catalog), rng)
    }

    /// Build a career with an explicit profile and event source.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] for invalid season settings.
    pub fn from_parts(
        config: CourtsideConfig,
        profile: PlayerProfile,
        events: Box<dyn EventSource>,
    ) -> Result<Self, TickError> {
        let rng = StdRng::seed_from_u64(config.career.seed);
        Self::assemble(config, profile, events, rng)
    }

    fn assemble(
        config: CourtsideConfig,
        profile: PlayerProfile,
        events: Box<dyn EventSource>,
        mut rng: StdRng,
    ) -> Result<Self, TickError> {
        let clock = CareerClock::new(&config.career, config.season.games)?;
        let season = Season::new(clock.season_index(), clock.age(), &config.season)?;
        let career =
            CareerEvaluator::with_limit(profile.position, profile.archetype, clock.seasons())
                .with_career_id(CareerId::from_random_bytes(rng.random()));
        info!(
            career_id = %career.career_id(),
            position = %profile.position,
            archetype = %profile.archetype,
            seasons = clock.seasons(),
            games_per_season = clock.games_per_season(),
            seed = config.career.seed,
            "Career started"
        );
        Ok(Self {
            profile,
            clock,
            season,
            career,
            events,
            config,
            rng,
        })
    }

    /// Whether the final season has been played out.
    pub const fn career_complete(&self) -> bool {
        self.season.is_complete() && self.clock.is_final_season()
    }

    /// Snapshot of the career record.
    pub fn career_record(&self) -> CareerRecord {
        self.career.record()
    }

    /// Career summary.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Career`] before the first season completes.
    pub fn career_summary(&self) -> Result<CareerSummary, TickError> {
        Ok(self.career.summary()?)
    }
}

/// Event catalog described by the events section.
///
/// # Errors
///
/// Returns [`CatalogError`] if the custom catalog cannot be loaded or the
/// roll table is out of range.
pub fn build_catalog(events: &EventsConfig) -> Result<EventCatalog, CatalogError> {
    let table = events.roll_table();
    match &events.catalog_path {
        Some(path) => EventCatalog::from_file(path, table),
        None => EventCatalog::default().with_roll_table(table),
    }
}

/// Play one game.
///
/// # Errors
///
/// Returns [`TickError::Season`] with
/// [`SeasonError::SeasonAlreadyComplete`] if the current season is already
/// over. Nothing is mutated in that case.
pub fn run_tick(state: &mut SimulationState) -> Result<TickSummary, TickError> {
    if state.season.is_complete() {
        return Err(SeasonError::SeasonAlreadyComplete {
            season: state.season.record().season_index,
            games_played: state.season.record().games_played,
        }
        .into());
    }
    state.clock.advance_game()?;

    let outcome = state
        .season
        .step(&state.profile, state.events.as_mut(), &mut state.rng)?;

    if outcome.season_completed {
        state.career.record_season(state.season.record().clone())?;
    }

    let record = state.season.record();
    Ok(TickSummary {
        tick: state.clock.tick(),
        season: record.season_index,
        age: record.age,
        line: outcome.line,
        averages: record.averages.clone(),
        modifiers: outcome.modifiers,
        event_started: outcome.event_started,
        events_expired: outcome
            .events_expired
            .iter()
            .map(|e| e.name().to_owned())
            .collect(),
        active_events: state
            .season
            .ledger()
            .active()
            .iter()
            .map(|e| e.name().to_owned())
            .collect(),
        season_completed: outcome.season_completed,
        career_completed: outcome.season_completed && state.clock.is_final_season(),
    })
}

/// Open the next season. Returns its 1-based index.
///
/// # Errors
///
/// Returns [`TickError::SeasonInProgress`] if the current season has games
/// left and [`TickError::Clock`] with [`ClockError::CareerOver`] after the
/// final season.
pub fn start_next_season(state: &mut SimulationState) -> Result<u32, TickError> {
    if !state.season.is_complete() {
        return Err(TickError::SeasonInProgress {
            season: state.season.record().season_index,
            games_played: state.season.record().games_played,
        });
    }
    let index = state.clock.next_season()?;
    let season = Season::new(index, state.clock.age(), &state.config.season)?;
    state.season = season;
    info!(season = index, age = state.clock.age(), "Season started");
    Ok(index)
}
