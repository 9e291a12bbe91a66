//! Playback control for auto-play.
//!
//! Shared between the auto-play loop and whatever drives it (a UI, a
//! keyboard handler, a test). The caller can pause and resume, change the
//! pace between games, and stop the career early, all without locks on the
//! loop's hot path.
//!
//! All mutable control fields use [`std::sync::atomic`] types so a
//! [`PlaybackControl`] can sit in an [`Arc`](std::sync::Arc) and be read
//! by the loop while another task writes to it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::config::PlaybackConfig;

/// Fastest allowed pace between games.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
/// Slowest allowed pace between games.
pub const MAX_TICK_INTERVAL_MS: u64 = 2000;
/// Pace change applied by [`PlaybackControl::faster`] and
/// [`PlaybackControl::slower`].
pub const TICK_INTERVAL_STEP_MS: u64 = 50;

/// Reason why auto-play ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerEndReason {
    /// The final season has been played.
    CareerComplete,
    /// Stop was requested.
    OperatorStop,
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
}

/// Shared playback control state.
#[derive(Debug)]
pub struct PlaybackControl {
    /// Whether auto-play is paused.
    paused: AtomicBool,

    /// Wakes the loop when resumed.
    resume_notify: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Current pace in milliseconds (runtime-adjustable).
    tick_interval_ms: AtomicU64,

    /// Wall-clock time when playback started.
    started_at: DateTime<Utc>,

    /// Maximum number of games (0 = unlimited).
    max_ticks: u64,

    /// Reason playback ended, if it has.
    end_reason: Mutex<Option<CareerEndReason>>,
}

impl PlaybackControl {
    /// Create control state from configuration. An out-of-range interval is
    /// clamped into the allowed range.
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            tick_interval_ms: AtomicU64::new(
                config
                    .tick_interval_ms
                    .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS),
            ),
            started_at: Utc::now(),
            max_ticks: config.max_ticks,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Check whether playback is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause playback. The loop sleeps until resumed.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume playback and wake the loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Flip between paused and playing. Returns `true` if now paused.
    pub fn toggle_pause(&self) -> bool {
        if self.is_paused() {
            self.resume();
            false
        } else {
            self.pause();
            true
        }
    }

    /// Wait until playback is no longer paused or a stop is requested.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop. Also wakes a paused loop so it can exit.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record the reason playback ended.
    pub async fn set_end_reason(&self, reason: CareerEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason playback ended, if it has.
    pub async fn end_reason(&self) -> Option<CareerEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Pace
    // -----------------------------------------------------------------------

    /// Current pace in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Set the pace. Must be within 50..=2000 ms.
    ///
    /// Returns the previous interval on success, or `None` if the value was
    /// rejected.
    pub fn set_tick_interval_ms(&self, ms: u64) -> Option<u64> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&ms) {
            return None;
        }
        Some(self.tick_interval_ms.swap(ms, Ordering::AcqRel))
    }

    /// Shorten the pace by one step, stopping at the minimum. Returns the
    /// new interval.
    pub fn faster(&self) -> u64 {
        let next = self
            .tick_interval_ms()
            .saturating_sub(TICK_INTERVAL_STEP_MS)
            .max(MIN_TICK_INTERVAL_MS);
        self.tick_interval_ms.store(next, Ordering::Release);
        next
    }

    /// Lengthen the pace by one step, stopping at the maximum. Returns the
    /// new interval.
    pub fn slower(&self) -> u64 {
        let next = self
            .tick_interval_ms()
            .saturating_add(TICK_INTERVAL_STEP_MS)
            .min(MAX_TICK_INTERVAL_MS);
        self.tick_interval_ms.store(next, Ordering::Release);
        next
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Whether `max_ticks > 0` and `current_tick >= max_ticks`.
    pub const fn tick_limit_reached(&self, current_tick: u64) -> bool {
        self.max_ticks > 0 && current_tick >= self.max_ticks
    }

    /// Configured max ticks.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Wall-clock start time.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Elapsed seconds since playback started.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }
}
