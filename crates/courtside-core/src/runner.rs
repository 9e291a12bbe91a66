//! Career loop runner with playback controls.
//!
//! [`run_career`] is the async auto-play driver:
//!
//! - **Pause/resume**: the caller can halt and continue the loop
//! - **Variable pace**: the interval between games is adjustable at runtime
//! - **Bounded run**: stop after `max_ticks` games
//! - **Stop**: clean exit on request
//!
//! [`play_career`] drives the same tick function synchronously with no
//! pacing, for tests and batch runs. Both open each new season as soon as
//! the previous one completes.

use std::sync::Arc;

use courtside_types::{CareerRecord, CareerSummary, SeasonRecord, Stat};
use tracing::{info, warn};

use crate::operator::{CareerEndReason, PlaybackControl};
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur during a career run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of a career run.
#[derive(Debug)]
pub struct CareerResult {
    /// The reason the run ended.
    pub end_reason: CareerEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Games played during this run.
    pub total_ticks: u64,
    /// The career record at the end of the run.
    pub record: CareerRecord,
    /// The career summary, if at least one season completed.
    pub summary: Option<CareerSummary>,
}

/// Callback invoked after each tick completes.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);

    /// Called once per completed season, after [`on_tick`](Self::on_tick).
    fn on_season_complete(&mut self, _season: &SeasonRecord) {}
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Open the next season if the current one is finished, then play a game.
fn next_game(state: &mut SimulationState) -> Result<TickSummary, TickError> {
    if state.season.is_complete() && !state.career_complete() {
        tick::start_next_season(state)?;
    }
    tick::run_tick(state)
}

/// Notify the callback of a finished tick (and season, if it finished).
fn notify(callback: &mut dyn TickCallback, summary: &TickSummary, state: &SimulationState) {
    callback.on_tick(summary, state);
    if summary.season_completed {
        callback.on_season_complete(state.season.record());
    }
}

fn finish(
    state: &SimulationState,
    end_reason: CareerEndReason,
    final_summary: Option<TickSummary>,
    total_ticks: u64,
) -> CareerResult {
    CareerResult {
        end_reason,
        final_summary,
        total_ticks,
        record: state.career_record(),
        summary: state.career_summary().ok(),
    }
}

/// Auto-play the career until it completes, is stopped, or hits the tick
/// limit.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails.
pub async fn run_career(
    state: &mut SimulationState,
    control: &Arc<PlaybackControl>,
    callback: &mut dyn TickCallback,
) -> Result<CareerResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = control.max_ticks(),
        tick_interval_ms = control.tick_interval_ms(),
        "Auto-play starting"
    );

    loop {
        // --- Check pause ---
        if control.is_paused() {
            info!("Auto-play paused, waiting for resume...");
            control.wait_if_paused().await;
            info!("Auto-play resumed");
        }

        // --- Check stop request (before tick) ---
        if control.is_stop_requested() {
            info!("Stop requested");
            let reason = CareerEndReason::OperatorStop;
            control.set_end_reason(reason).await;
            return Ok(finish(state, reason, last_summary, total_ticks));
        }

        // --- Already finished ---
        if state.career_complete() {
            let reason = CareerEndReason::CareerComplete;
            control.set_end_reason(reason).await;
            return Ok(finish(state, reason, last_summary, total_ticks));
        }

        // --- Limit already reached by earlier manual steps ---
        if control.tick_limit_reached(state.clock.tick()) {
            let reason = CareerEndReason::MaxTicksReached;
            control.set_end_reason(reason).await;
            return Ok(finish(state, reason, last_summary, total_ticks));
        }

        // --- Execute tick ---
        let summary = next_game(state)?;
        total_ticks = total_ticks.saturating_add(1);
        notify(callback, &summary, state);

        if summary.career_completed {
            let reason = CareerEndReason::CareerComplete;
            control.set_end_reason(reason).await;
            return Ok(finish(state, reason, Some(summary), total_ticks));
        }

        // --- Check tick limit (after tick) ---
        if control.tick_limit_reached(summary.tick) {
            info!(
                tick = summary.tick,
                max_ticks = control.max_ticks(),
                "Tick limit reached"
            );
            let reason = CareerEndReason::MaxTicksReached;
            control.set_end_reason(reason).await;
            return Ok(finish(state, reason, Some(summary), total_ticks));
        }

        last_summary = Some(summary);

        // --- Sleep for tick interval ---
        let interval_ms = control.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Play the career to the end without pacing.
///
/// `max_ticks` bounds the career-wide game count, the same limit
/// [`run_career`] applies; 0 means no limit.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails.
pub fn play_career(
    state: &mut SimulationState,
    max_ticks: u64,
    callback: &mut dyn TickCallback,
) -> Result<CareerResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    while !state.career_complete() {
        if max_ticks > 0 && state.clock.tick() >= max_ticks {
            return Ok(finish(
                state,
                CareerEndReason::MaxTicksReached,
                last_summary,
                total_ticks,
            ));
        }
        let summary = next_game(state)?;
        total_ticks = total_ticks.saturating_add(1);
        notify(callback, &summary, state);
        last_summary = Some(summary);
    }

    Ok(finish(
        state,
        CareerEndReason::CareerComplete,
        last_summary,
        total_ticks,
    ))
}

/// Log the end of a career run.
pub fn log_career_end(result: &CareerResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        seasons = result.record.seasons.len(),
        tier = result.record.tier.map(|t| t.label()),
        "Career ended"
    );

    if let Some(ref summary) = result.summary {
        info!(
            years = summary.years_played,
            ppg = summary.career_average.get(&Stat::Points).copied().unwrap_or(0.0),
            rpg = summary.career_average.get(&Stat::Rebounds).copied().unwrap_or(0.0),
            apg = summary.career_average.get(&Stat::Assists).copied().unwrap_or(0.0),
            peak_points = summary.peak_points,
            peak_season = summary.peak_season,
            prime_years = summary.prime_years,
            total_games = summary.total_games,
            "Career summary"
        );
    } else {
        warn!("Career ended before any season completed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use courtside_events::NoEvents;
    use courtside_types::{Archetype, Position, StatMap};

    use super::*;
    use crate::config::{CareerConfig, CourtsideConfig, PlaybackConfig, SeasonConfig};
    use crate::profile::with_baselines;

    fn config(seasons: u32, games: u32) -> CourtsideConfig {
        CourtsideConfig {
            career: CareerConfig {
                seasons,
                ..CareerConfig::default()
            },
            season: SeasonConfig {
                games,
                ..SeasonConfig::default()
            },
            ..CourtsideConfig::default()
        }
    }

    fn control(max_ticks: u64) -> Arc<PlaybackControl> {
        Arc::new(PlaybackControl::new(&PlaybackConfig {
            tick_interval_ms: 50,
            max_ticks,
        }))
    }

    struct CountCallback {
        ticks: u64,
        seasons: u32,
    }

    impl TickCallback for CountCallback {
        fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {
            self.ticks = self.ticks.saturating_add(1);
        }

        fn on_season_complete(&mut self, _season: &SeasonRecord) {
            self.seasons = self.seasons.saturating_add(1);
        }
    }

    #[test]
    fn play_career_runs_every_season() {
        let mut state = SimulationState::new(config(3, 4)).unwrap();
        let mut cb = CountCallback { ticks: 0, seasons: 0 };
        let result = play_career(&mut state, 0, &mut cb).unwrap();
        assert_eq!(result.end_reason, CareerEndReason::CareerComplete);
        assert_eq!(result.total_ticks, 12);
        assert_eq!(cb.ticks, 12);
        assert_eq!(cb.seasons, 3);
        assert_eq!(result.record.seasons.len(), 3);
        assert!(result.summary.is_some());
    }

    #[test]
    fn play_career_respects_limit() {
        let mut state = SimulationState::new(config(3, 4)).unwrap();
        let result = play_career(&mut state, 5, &mut NoOpCallback).unwrap();
        assert_eq!(result.end_reason, CareerEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.record.seasons.len(), 1);
    }

    fn after_manual_games(games: u32) -> SimulationState {
        let mut state = SimulationState::new(config(2, 10)).unwrap();
        for _ in 0..games {
            tick::run_tick(&mut state).unwrap();
        }
        state
    }

    #[test]
    fn play_career_limit_counts_earlier_games() {
        let mut state = after_manual_games(3);
        let result = play_career(&mut state, 5, &mut NoOpCallback).unwrap();
        assert_eq!(result.end_reason, CareerEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 2);
        assert_eq!(state.clock.tick(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn run_career_limit_counts_earlier_games() {
        let mut state = after_manual_games(3);
        let result = run_career(&mut state, &control(5), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, CareerEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 2);
        assert_eq!(state.clock.tick(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn both_drivers_stop_at_once_when_limit_already_passed() {
        let mut manual = after_manual_games(4);
        let sync = play_career(&mut manual, 3, &mut NoOpCallback).unwrap();
        assert_eq!(sync.total_ticks, 0);

        let mut auto = after_manual_games(4);
        let paced = run_career(&mut auto, &control(3), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(paced.end_reason, CareerEndReason::MaxTicksReached);
        assert_eq!(paced.total_ticks, 0);
        assert_eq!(auto.clock.tick(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_play_completes_career() {
        let profile = with_baselines(
            Position::PointGuard,
            Archetype::Playmaker,
            StatMap::from([
                (courtside_types::Stat::Points, 14.0),
                (courtside_types::Stat::Rebounds, 3.0),
                (courtside_types::Stat::Assists, 7.0),
            ]),
        )
        .unwrap();
        let mut state =
            SimulationState::from_parts(config(2, 3), profile, Box::new(NoEvents)).unwrap();
        let control = control(0);
        let mut cb = CountCallback { ticks: 0, seasons: 0 };

        let result = run_career(&mut state, &control, &mut cb).await.unwrap();
        assert_eq!(result.end_reason, CareerEndReason::CareerComplete);
        assert_eq!(result.total_ticks, 6);
        assert_eq!(cb.seasons, 2);
        assert_eq!(
            control.end_reason().await,
            Some(CareerEndReason::CareerComplete)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_by_max_ticks() {
        let mut state = SimulationState::new(config(15, 82)).unwrap();
        let control = control(5);
        let result = run_career(&mut state, &control, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, CareerEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert!(result.summary.is_none());
    }

    #[tokio::test]
    async fn operator_stop_before_first_tick() {
        let mut state = SimulationState::new(config(1, 82)).unwrap();
        let control = control(0);
        control.request_stop();
        let result = run_career(&mut state, &control, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, CareerEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
    }

    #[tokio::test]
    async fn stop_wakes_a_paused_run() {
        let mut state = SimulationState::new(config(1, 82)).unwrap();
        let control = control(0);
        control.pause();

        let stopper = Arc::clone(&control);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
            stopper.request_stop();
        });

        let result = run_career(&mut state, &control, &mut NoOpCallback)
            .await
            .unwrap();
        handle.await.unwrap();
        assert_eq!(result.end_reason, CareerEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pace_change_is_seen_by_loop() {
        let mut state = SimulationState::new(config(1, 3)).unwrap();
        let control = control(0);
        assert_eq!(control.set_tick_interval_ms(2000), Some(50));
        let result = run_career(&mut state, &control, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, CareerEndReason::CareerComplete);
        assert_eq!(control.tick_interval_ms(), 2000);
    }
}
