//! Courtside engine binary.
//!
//! Wires configuration, the seeded career state, playback control, and the
//! auto-play loop together, then prints the finished career as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `courtside-config.yaml` (or `COURTSIDE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the player and career state from the seed
//! 4. Create playback control from the playback config
//! 5. Install the Ctrl-C stop handler
//! 6. Auto-play the career
//! 7. Log the result and write the report to stdout

mod error;
mod progress_callback;
mod report;

use std::sync::Arc;

use courtside_core::config::{CourtsideConfig, LogFormat, LoggingConfig};
use courtside_core::operator::PlaybackControl;
use courtside_core::runner;
use courtside_core::tick::SimulationState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::progress_callback::ProgressCallback;
use crate::report::CareerReport;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, setup, or playback fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so failures here go
    //    straight to stderr via the returned error.
    let config_path = CourtsideConfig::resolve_path();
    let config = CourtsideConfig::load_or_default(&config_path).map_err(EngineError::from)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;

    info!(
        path = %config_path.display(),
        seed = config.career.seed,
        position = config.career.position.as_str(),
        archetype = config.career.archetype.as_str(),
        seasons = config.career.seasons,
        games = config.season.games,
        "Configuration loaded"
    );

    // 3. Build the career state.
    let playback = config.playback.clone();
    let mut state = SimulationState::new(config).map_err(EngineError::from)?;

    // 4. Playback control.
    let control = Arc::new(PlaybackControl::new(&playback));
    info!(
        max_ticks = control.max_ticks(),
        tick_interval_ms = control.tick_interval_ms(),
        "Playback control initialized"
    );

    // 5. Ctrl-C requests a clean stop; the loop finishes the current game.
    let stopper = Arc::clone(&control);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, stopping after current game");
                stopper.request_stop();
            }
            Err(e) => warn!(error = %e, "failed to listen for interrupt"),
        }
    });

    // 6. Auto-play.
    let mut callback = ProgressCallback::new();
    let result = runner::run_career(&mut state, &control, &mut callback)
        .await
        .map_err(EngineError::from)?;

    // 7. Report.
    runner::log_career_end(&result);
    let report = CareerReport::new(&result, control.elapsed_seconds());
    println!("{}", report.to_json().map_err(EngineError::from)?);

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        games_seen = callback.games_seen(),
        "courtside-engine shutdown complete"
    );

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Output goes to stderr so stdout carries only the report.
fn init_logging(config: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EngineError::Logging {
            message: format!("invalid log level {:?}: {e}", config.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}
