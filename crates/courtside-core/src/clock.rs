//! Career clock: season index, game within the season, and age.
//!
//! The clock is the single source of truth for where the career stands in
//! time. Age is derived from the season index and is never stored.
//!
//! - All counters use checked arithmetic.
//! - The global tick counts every game played across the career.

use crate::config::{CareerConfig, MAX_GAMES_PER_SEASON, MAX_SEASONS};

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Every configured season has been played.
    #[error("career is over after {seasons} seasons")]
    CareerOver {
        /// Number of seasons in the career.
        seasons: u32,
    },

    /// The current season has no games left.
    #[error("season {season} is over after {games} games")]
    SeasonOver {
        /// 1-based season index.
        season: u32,
        /// Games in the season.
        games: u32,
    },

    /// Invalid clock configuration.
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// A counter would overflow.
    #[error("clock counter overflow")]
    Overflow,
}

/// Career clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerClock {
    /// Games played across the whole career.
    tick: u64,
    /// 1-based season index.
    season_index: u32,
    /// Games played in the current season.
    game: u32,
    /// Age during season 1.
    starting_age: u32,
    /// Seasons in the career.
    seasons: u32,
    /// Games per season.
    games_per_season: u32,
}

impl CareerClock {
    /// Create a clock positioned before game 1 of season 1.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the season count or game
    /// count is zero or above the career limits.
    pub fn new(career: &CareerConfig, games_per_season: u32) -> Result<Self, ClockError> {
        Self::from_parts(0, 1, 0, career.starting_age, career.seasons, games_per_season)
    }

    /// Create a clock from explicit parameters (state restoration, tests).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] for out-of-range values.
    pub fn from_parts(
        tick: u64,
        season_index: u32,
        game: u32,
        starting_age: u32,
        seasons: u32,
        games_per_season: u32,
    ) -> Result<Self, ClockError> {
        if !(1..=MAX_SEASONS).contains(&seasons) {
            return Err(ClockError::InvalidConfig {
                reason: format!("seasons must be within 1..={MAX_SEASONS}, got {seasons}"),
            });
        }
        if !(1..=MAX_GAMES_PER_SEASON).contains(&games_per_season) {
            return Err(ClockError::InvalidConfig {
                reason: format!(
                    "games per season must be within 1..={MAX_GAMES_PER_SEASON}, got {games_per_season}"
                ),
            });
        }
        if !(1..=seasons).contains(&season_index) {
            return Err(ClockError::InvalidConfig {
                reason: format!("season index {season_index} outside 1..={seasons}"),
            });
        }
        if game > games_per_season {
            return Err(ClockError::InvalidConfig {
                reason: format!("game {game} beyond {games_per_season}"),
            });
        }
        Ok(Self {
            tick,
            season_index,
            game,
            starting_age,
            seasons,
            games_per_season,
        })
    }

    /// Games played across the career.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// 1-based index of the current season.
    pub const fn season_index(&self) -> u32 {
        self.season_index
    }

    /// Games played in the current season.
    pub const fn game(&self) -> u32 {
        self.game
    }

    /// Games per season.
    pub const fn games_per_season(&self) -> u32 {
        self.games_per_season
    }

    /// Seasons in the career.
    pub const fn seasons(&self) -> u32 {
        self.seasons
    }

    /// Player age during the current season.
    pub const fn age(&self) -> u32 {
        // season_index >= 1 is guaranteed by the constructor.
        self.starting_age
            .saturating_add(self.season_index)
            .saturating_sub(1)
    }

    /// Whether every game of the current season has been played.
    pub const fn season_finished(&self) -> bool {
        self.game >= self.games_per_season
    }

    /// Whether the current season is the last one.
    pub const fn is_final_season(&self) -> bool {
        self.season_index >= self.seasons
    }

    /// Advance by one game. Returns the 1-based game number just started.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::SeasonOver`] if the season is finished.
    pub fn advance_game(&mut self) -> Result<u32, ClockError> {
        if self.season_finished() {
            return Err(ClockError::SeasonOver {
                season: self.season_index,
                games: self.games_per_season,
            });
        }
        let game = self.game.checked_add(1).ok_or(ClockError::Overflow)?;
        let tick = self.tick.checked_add(1).ok_or(ClockError::Overflow)?;
        self.game = game;
        self.tick = tick;
        Ok(game)
    }

    /// Move to game 0 of the next season. Returns the new season index.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::CareerOver`] after the final season.
    pub fn next_season(&mut self) -> Result<u32, ClockError> {
        if self.is_final_season() {
            return Err(ClockError::CareerOver {
                seasons: self.seasons,
            });
        }
        let next = self
            .season_index
            .checked_add(1)
            .ok_or(ClockError::Overflow)?;
        self.season_index = next;
        self.game = 0;
        Ok(next)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn career(seasons: u32) -> CareerConfig {
        CareerConfig {
            seasons,
            ..CareerConfig::default()
        }
    }

    #[test]
    fn rookie_season_starts_at_22() {
        let clock = CareerClock::new(&career(15), 82).unwrap();
        assert_eq!(clock.season_index(), 1);
        assert_eq!(clock.age(), 22);
        assert_eq!(clock.game(), 0);
        assert_eq!(clock.tick(), 0);
    }

    #[test]
    fn age_follows_season() {
        let mut clock = CareerClock::new(&career(15), 1).unwrap();
        for expected_age in 23..=36 {
            clock.advance_game().unwrap();
            clock.next_season().unwrap();
            assert_eq!(clock.age(), expected_age);
        }
        assert!(clock.is_final_season());
    }

    #[test]
    fn season_stops_at_game_limit() {
        let mut clock = CareerClock::new(&career(1), 3).unwrap();
        assert_eq!(clock.advance_game().unwrap(), 1);
        assert_eq!(clock.advance_game().unwrap(), 2);
        assert_eq!(clock.advance_game().unwrap(), 3);
        assert!(clock.season_finished());
        assert!(matches!(
            clock.advance_game(),
            Err(ClockError::SeasonOver { season: 1, games: 3 })
        ));
        assert_eq!(clock.tick(), 3);
    }

    #[test]
    fn career_over_after_final_season() {
        let mut clock = CareerClock::new(&career(2), 82).unwrap();
        assert_eq!(clock.next_season().unwrap(), 2);
        assert_eq!(
            clock.next_season(),
            Err(ClockError::CareerOver { seasons: 2 })
        );
    }

    #[test]
    fn rejects_out_of_range_config() {
        assert!(CareerClock::new(&career(0), 82).is_err());
        assert!(CareerClock::new(&career(16), 82).is_err());
        assert!(CareerClock::new(&career(15), 0).is_err());
        assert!(CareerClock::new(&career(15), 83).is_err());
    }
}
