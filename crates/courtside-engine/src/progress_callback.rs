//! Tick callback that reports career-to-date progress.
//!
//! Per-game lines, events and season totals are already logged by the
//! core. This callback adds the one view the core does not have: how the
//! career as a whole is tracking after each season, and which tier it
//! would land in if it ended now.

use courtside_core::runner::TickCallback;
use courtside_core::tick::{SimulationState, TickSummary};
use courtside_types::{Stat, Tier};
use tracing::info;

/// Callback that logs career progress at every season boundary.
#[derive(Debug, Default)]
pub struct ProgressCallback {
    games_seen: u64,
    /// Tier the career would end in after the last completed season.
    projected_tier: Option<Tier>,
}

impl ProgressCallback {
    /// Create a new progress callback.
    pub const fn new() -> Self {
        Self {
            games_seen: 0,
            projected_tier: None,
        }
    }

    /// Games seen so far.
    pub const fn games_seen(&self) -> u64 {
        self.games_seen
    }
}

impl TickCallback for ProgressCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
        self.games_seen = self.games_seen.saturating_add(1);
        if !summary.season_completed {
            return;
        }

        let Ok(average) = state.career.career_average() else {
            return;
        };
        let previous = self.projected_tier;
        self.projected_tier = state.career.evaluate().ok();
        info!(
            seasons = state.career.years_played(),
            of = state.clock.seasons(),
            career_ppg = %format!("{:.1}", average.get(&Stat::Points).copied().unwrap_or(0.0)),
            career_rpg = %format!("{:.1}", average.get(&Stat::Rebounds).copied().unwrap_or(0.0)),
            career_apg = %format!("{:.1}", average.get(&Stat::Assists).copied().unwrap_or(0.0)),
            projected_tier = self.projected_tier.map(Tier::label),
            tier_changed = previous.is_some() && previous != self.projected_tier,
            "Career progress"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use courtside_core::config::{CareerConfig, CourtsideConfig, SeasonConfig};
    use courtside_core::runner::play_career;
    use courtside_core::tick::SimulationState;

    use super::*;

    fn state(seasons: u32, games: u32) -> SimulationState {
        let config = CourtsideConfig {
            career: CareerConfig {
                seasons,
                ..CareerConfig::default()
            },
            season: SeasonConfig {
                games,
                ..SeasonConfig::default()
            },
            ..CourtsideConfig::default()
        };
        SimulationState::new(config).unwrap()
    }

    #[test]
    fn counts_every_game() {
        let mut state = state(2, 5);
        let mut callback = ProgressCallback::new();
        play_career(&mut state, 0, &mut callback).unwrap();
        assert_eq!(callback.games_seen(), 10);
    }

    #[test]
    fn projection_matches_final_tier() {
        let mut state = state(3, 4);
        let mut callback = ProgressCallback::new();
        let result = play_career(&mut state, 0, &mut callback).unwrap();
        assert_eq!(callback.projected_tier, result.record.tier);
    }

    #[test]
    fn no_projection_before_first_season_ends() {
        let mut state = state(2, 5);
        let mut callback = ProgressCallback::new();
        play_career(&mut state, 3, &mut callback).unwrap();
        assert_eq!(callback.projected_tier, None);
    }
}
