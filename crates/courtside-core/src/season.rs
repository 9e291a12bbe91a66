//! Season aggregator: the per-game state machine.
//!
//! A season moves `NotStarted -> InProgress(n) -> Complete` through a
//! single transition, [`Season::step`]. Each step:
//!
//! 1. Counts the event ledger down one game and drops expired events.
//! 2. Asks the event source for a new event (only while the ledger is empty
//!    when events are exclusive) and activates it.
//! 3. Simulates the game with the current modifiers.
//! 4. Folds the line into the running averages, totals and highs.
//!
//! A step on a complete season is rejected before anything changes.

use courtside_events::EventSource;
use courtside_ledger::{AddOutcome, EventLedger};
use courtside_types::{
    ActiveEvent, GameStatLine, PlayerProfile, SeasonPhase, SeasonRecord, Stat, StatMap,
};
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::config::{MAX_GAMES_PER_SEASON, SeasonConfig};
use crate::game::simulate_game;

/// Errors that can occur when stepping a season.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeasonError {
    /// Every scheduled game has already been played.
    #[error("season {season} is already complete after {games_played} games")]
    SeasonAlreadyComplete {
        /// 1-based season index.
        season: u32,
        /// Games played in the season.
        games_played: u32,
    },

    /// The schedule length is outside `1..=MAX_GAMES_PER_SEASON`.
    #[error("season must schedule 1..={max} games, got {games}")]
    InvalidSchedule {
        /// Requested games.
        games: u32,
        /// Upper bound.
        max: u32,
    },
}

/// What happened in one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    /// The simulated line.
    pub line: GameStatLine,
    /// Name of the event that fired before this game, if any.
    pub event_started: Option<String>,
    /// Whether the fired event refreshed an already-active instance.
    pub event_refreshed: bool,
    /// Events that ran out before this game.
    pub events_expired: Vec<ActiveEvent>,
    /// Modifiers the game was played under.
    pub modifiers: StatMap,
    /// Whether this game completed the season.
    pub season_completed: bool,
}

/// One season in progress: its record and its event ledger.
#[derive(Debug, Clone)]
pub struct Season {
    record: SeasonRecord,
    ledger: EventLedger,
    variance: f64,
    exclusive_events: bool,
}

impl Season {
    /// Open a season that has not started yet.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::InvalidSchedule`] unless `settings.games` is
    /// within `1..=MAX_GAMES_PER_SEASON`.
    pub fn new(
        season_index: u32,
        age: u32,
        settings: &SeasonConfig,
    ) -> Result<Self, SeasonError> {
        if !(1..=MAX_GAMES_PER_SEASON).contains(&settings.games) {
            return Err(SeasonError::InvalidSchedule {
                games: settings.games,
                max: MAX_GAMES_PER_SEASON,
            });
        }
        Ok(Self {
            record: SeasonRecord::new(season_index, age, settings.games),
            ledger: EventLedger::new(),
            variance: settings.variance,
            exclusive_events: settings.exclusive_events,
        })
    }

    /// The running record.
    pub const fn record(&self) -> &SeasonRecord {
        &self.record
    }

    /// Consume the season, keeping only its record.
    pub fn into_record(self) -> SeasonRecord {
        self.record
    }

    /// Active events.
    pub const fn ledger(&self) -> &EventLedger {
        &self.ledger
    }

    /// Lifecycle phase.
    pub const fn phase(&self) -> SeasonPhase {
        self.record.phase()
    }

    /// Whether every scheduled game has been played.
    pub const fn is_complete(&self) -> bool {
        self.record.complete
    }

    /// Play the next game.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::SeasonAlreadyComplete`] if the schedule is
    /// finished. Nothing is mutated and no randomness is consumed.
    pub fn step(
        &mut self,
        profile: &PlayerProfile,
        source: &mut dyn EventSource,
        rng: &mut dyn RngCore,
    ) -> Result<GameOutcome, SeasonError> {
        let already_complete = SeasonError::SeasonAlreadyComplete {
            season: self.record.season_index,
            games_played: self.record.games_played,
        };
        if self.record.complete || self.record.games_played >= self.record.games_scheduled {
            return Err(already_complete);
        }
        let game = self
            .record
            .games_played
            .checked_add(1)
            .ok_or(already_complete)?;

        let events_expired = self.ledger.tick();
        for expired in &events_expired {
            info!(
                season = self.record.season_index,
                game,
                event = %expired.name(),
                "Event ended"
            );
        }

        let (event_started, event_refreshed) = self.roll_event(game, source, rng);

        let modifiers = self.ledger.active_modifiers();
        let line = simulate_game(
            profile,
            self.record.age,
            &modifiers,
            self.variance,
            game,
            rng,
        );
        self.fold(&line, game);

        debug!(
            season = self.record.season_index,
            game,
            points = line.value(Stat::Points),
            rebounds = line.value(Stat::Rebounds),
            assists = line.value(Stat::Assists),
            active_events = self.ledger.len(),
            "Game played"
        );

        if self.record.complete {
            info!(
                season = self.record.season_index,
                age = self.record.age,
                ppg = self.record.average(Stat::Points),
                rpg = self.record.average(Stat::Rebounds),
                apg = self.record.average(Stat::Assists),
                events = self.record.events.len(),
                "Season complete"
            );
        }

        Ok(GameOutcome {
            line,
            event_started,
            event_refreshed,
            events_expired,
            modifiers,
            season_completed: self.record.complete,
        })
    }

    /// Ask the source for an event and activate it.
    fn roll_event(
        &mut self,
        game: u32,
        source: &mut dyn EventSource,
        rng: &mut dyn RngCore,
    ) -> (Option<String>, bool) {
        if self.exclusive_events && !self.ledger.is_empty() {
            return (None, false);
        }
        let Some(definition) = source.next_event(game, rng) else {
            return (None, false);
        };
        let name = definition.name.clone();
        let category = definition.category;
        match self.ledger.add(definition) {
            Ok(outcome) => {
                info!(
                    season = self.record.season_index,
                    game,
                    event = %name,
                    category = %category,
                    refreshed = outcome == AddOutcome::Refreshed,
                    "Event started"
                );
                self.record.events.push(name.clone());
                (Some(name), outcome == AddOutcome::Refreshed)
            }
            Err(err) => {
                warn!(season = self.record.season_index, game, error = %err, "Event skipped");
                (None, false)
            }
        }
    }

    /// Fold a game line into the running record.
    fn fold(&mut self, line: &GameStatLine, game: u32) {
        let n = f64::from(game);
        for stat in Stat::ALL {
            let value = line.value(stat);
            let avg = self.record.averages.entry(stat).or_insert(0.0);
            *avg += (value - *avg) / n;
            *self.record.totals.entry(stat).or_insert(0.0) += value;
            let high = self.record.highs.entry(stat).or_insert(0.0);
            if value > *high {
                *high = value;
            }
        }
        self.record.games_played = game;
        if game >= self.record.games_scheduled {
            self.record.complete = true;
        }
    }
}
