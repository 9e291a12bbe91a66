//! Configuration loading and typed config structures for Courtside.
//!
//! The canonical configuration lives in `courtside-config.yaml` at the
//! project root. Every section and field has a default, so an empty file
//! (or no file at all) yields the classic game: a 22-year-old rookie, 82
//! games a season, up to 15 seasons, a 10% per-game event chance.
//!
//! Values are range-checked with `validator` after parsing and after
//! environment overrides are applied.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use validator::Validate;

use courtside_events::RollTable;

/// Environment variable that overrides `career.seed`.
pub const ENV_SEED: &str = "COURTSIDE_SEED";
/// Environment variable that overrides `career.position`.
pub const ENV_POSITION: &str = "COURTSIDE_POSITION";
/// Environment variable that overrides `career.archetype`.
pub const ENV_ARCHETYPE: &str = "COURTSIDE_ARCHETYPE";
/// Environment variable naming the config file to load.
pub const ENV_CONFIG_PATH: &str = "COURTSIDE_CONFIG";
/// Config file used when [`ENV_CONFIG_PATH`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "courtside-config.yaml";

/// Most games a season can hold.
pub const MAX_GAMES_PER_SEASON: u32 = 82;
/// Most seasons a career can hold.
pub const MAX_SEASONS: u32 = 15;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is outside its allowed range.
    #[error("invalid configuration: {source}")]
    Invalid {
        /// Field-level validation failures.
        #[from]
        source: validator::ValidationErrors,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {name}")]
    EnvOverride {
        /// The environment variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `courtside-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct CourtsideConfig {
    /// Who is being simulated and for how long.
    #[serde(default)]
    #[validate(nested)]
    pub career: CareerConfig,

    /// Per-season game settings.
    #[serde(default)]
    #[validate(nested)]
    pub season: SeasonConfig,

    /// Event roll settings.
    #[serde(default)]
    #[validate(nested)]
    pub events: EventsConfig,

    /// Auto-play pacing.
    #[serde(default)]
    #[validate(nested)]
    pub playback: PlaybackConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CourtsideConfig {
    /// Load configuration from a YAML file, apply environment overrides,
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, and
    /// [`ConfigError::Invalid`] or [`ConfigError::EnvOverride`] if a value
    /// is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, apply environment
    /// overrides, and validate.
    ///
    /// # Errors
    ///
    /// As [`from_file`](Self::from_file), minus I/O.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// As [`from_file`](Self::from_file) for any failure other than a
    /// missing file.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// The config path named by `COURTSIDE_CONFIG`, or the default.
    pub fn resolve_path() -> PathBuf {
        std::env::var(ENV_CONFIG_PATH)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Apply `COURTSIDE_SEED`, `COURTSIDE_POSITION` and
    /// `COURTSIDE_ARCHETYPE` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvOverride`] if the seed is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvOverride`] if the seed is not a `u64`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SEED) {
            self.career.seed = raw.trim().parse().map_err(|_err| ConfigError::EnvOverride {
                name: ENV_SEED,
                value: raw.clone(),
            })?;
        }
        if let Some(position) = lookup(ENV_POSITION) {
            self.career.position = position;
        }
        if let Some(archetype) = lookup(ENV_ARCHETYPE) {
            self.career.archetype = archetype;
        }
        Ok(())
    }
}

/// Career-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CareerConfig {
    /// Seed for the single random source of the career.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Position name (e.g. "Center", "point guard", "PG").
    #[serde(default = "default_position")]
    pub position: String,

    /// Archetype name (e.g. "Scorer", "all-around").
    #[serde(default = "default_archetype")]
    pub archetype: String,

    /// Age during the first season.
    #[serde(default = "default_starting_age")]
    #[validate(range(min = 16, max = 45))]
    pub starting_age: u32,

    /// Number of seasons in the career.
    #[serde(default = "default_seasons")]
    #[validate(range(min = 1, max = 15))]
    pub seasons: u32,
}

impl Default for CareerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            position: default_position(),
            archetype: default_archetype(),
            starting_age: default_starting_age(),
            seasons: default_seasons(),
        }
    }
}

/// Per-season settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct SeasonConfig {
    /// Games in a season.
    #[serde(default = "default_games")]
    #[validate(range(min = 1, max = 82))]
    pub games: u32,

    /// Half-width of the uniform per-game noise (0.15 = +/-15%).
    #[serde(default = "default_variance")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub variance: f64,

    /// Only roll for a new event while no event is active.
    #[serde(default)]
    pub exclusive_events: bool,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            games: default_games(),
            variance: default_variance(),
            exclusive_events: false,
        }
    }
}

/// Event roll settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct EventsConfig {
    /// Chance an event fires in a given game.
    #[serde(default = "default_trigger_probability")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub trigger_probability: f64,

    /// Relative weight of positive events.
    #[serde(default = "default_positive_weight")]
    #[validate(range(min = 0.0))]
    pub positive_weight: f64,

    /// Relative weight of negative events.
    #[serde(default = "default_negative_weight")]
    #[validate(range(min = 0.0))]
    pub negative_weight: f64,

    /// Relative weight of neutral events.
    #[serde(default = "default_neutral_weight")]
    #[validate(range(min = 0.0))]
    pub neutral_weight: f64,

    /// Optional YAML catalog replacing the built-in events.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl EventsConfig {
    /// The roll table described by this section.
    pub const fn roll_table(&self) -> RollTable {
        RollTable {
            trigger_probability: self.trigger_probability,
            positive_weight: self.positive_weight,
            negative_weight: self.negative_weight,
            neutral_weight: self.neutral_weight,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        let table = RollTable::default();
        Self {
            trigger_probability: table.trigger_probability,
            positive_weight: table.positive_weight,
            negative_weight: table.negative_weight,
            neutral_weight: table.neutral_weight,
            catalog_path: None,
        }
    }
}

/// Auto-play pacing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct PlaybackConfig {
    /// Milliseconds between games during auto-play.
    #[serde(default = "default_tick_interval_ms")]
    #[validate(range(min = 50, max = 2000))]
    pub tick_interval_ms: u64,

    /// Stop after this many games (0 = play the whole career).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Text,
        }
    }
}

const fn default_seed() -> u64 {
    42
}

fn default_position() -> String {
    "Center".to_owned()
}

fn default_archetype() -> String {
    "Scorer".to_owned()
}

const fn default_starting_age() -> u32 {
    22
}

const fn default_seasons() -> u32 {
    MAX_SEASONS
}

const fn default_games() -> u32 {
    MAX_GAMES_PER_SEASON
}

const fn default_variance() -> f64 {
    0.15
}

const fn default_trigger_probability() -> f64 {
    courtside_events::catalog::DEFAULT_TRIGGER_PROBABILITY
}

const fn default_positive_weight() -> f64 {
    0.4
}

const fn default_negative_weight() -> f64 {
    0.4
}

const fn default_neutral_weight() -> f64 {
    0.2
}

const fn default_tick_interval_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    /// Parse without touching the real environment.
    fn parse_isolated(yaml: &str) -> Result<CourtsideConfig, ConfigError> {
        let mut config: CourtsideConfig = serde_yml::from_str(yaml)?;
        config.apply_overrides(no_env)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn default_config_is_the_classic_game() {
        let config = CourtsideConfig::default();
        assert_eq!(config.career.starting_age, 22);
        assert_eq!(config.career.seasons, 15);
        assert_eq!(config.season.games, 82);
        assert!((config.events.trigger_probability - 0.10).abs() < 1e-12);
        assert!(!config.season.exclusive_events);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
career:
  seed: 7
  position: "point guard"
  archetype: "playmaker"
  starting_age: 20
  seasons: 10
season:
  games: 41
  variance: 0.2
  exclusive_events: true
events:
  trigger_probability: 0.25
  positive_weight: 1.0
  negative_weight: 0.0
  neutral_weight: 0.0
playback:
  tick_interval_ms: 100
  max_ticks: 500
logging:
  level: debug
  format: json
"#;
        let config = parse_isolated(yaml).unwrap();
        assert_eq!(config.career.seed, 7);
        assert_eq!(config.career.position, "point guard");
        assert_eq!(config.season.games, 41);
        assert!(config.season.exclusive_events);
        assert_eq!(config.playback.max_ticks, 500);
        assert_eq!(config.logging.format, LogFormat::Json);
        let table = config.events.roll_table();
        assert!((table.trigger_probability - 0.25).abs() < 1e-12);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = parse_isolated("season:\n  games: 10\n").unwrap();
        assert_eq!(config.season.games, 10);
        assert_eq!(config.career.seasons, 15);
        assert_eq!(config.playback.tick_interval_ms, 100);
    }

    #[test]
    fn rejects_too_many_seasons() {
        let err = parse_isolated("career:\n  seasons: 16\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_long_season() {
        let err = parse_isolated("season:\n  games: 83\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_fast_playback() {
        let err = parse_isolated("playback:\n  tick_interval_ms: 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_bad_probability() {
        let err = parse_isolated("events:\n  trigger_probability: 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = parse_isolated("career: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn overrides_replace_career_fields() {
        let vars = BTreeMap::from([
            (ENV_SEED, "99"),
            (ENV_POSITION, "SG"),
            (ENV_ARCHETYPE, "Defender"),
        ]);
        let mut config = CourtsideConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| (*v).to_owned()))
            .unwrap();
        assert_eq!(config.career.seed, 99);
        assert_eq!(config.career.position, "SG");
        assert_eq!(config.career.archetype, "Defender");
    }

    #[test]
    fn bad_seed_override_is_rejected() {
        let mut config = CourtsideConfig::default();
        let err = config
            .apply_overrides(|name| (name == ENV_SEED).then(|| "lucky".to_owned()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvOverride { name: ENV_SEED, .. }));
    }
}
