//! Player profile generation.
//!
//! A profile is built once per career from a position and an archetype:
//!
//! ```text
//! points   = position points   * scoring
//! rebounds = position rebounds * (0.3 * scoring + 0.7 * defense)
//! assists  = position assists  * playmaking
//! ```
//!
//! Each baseline is then scaled by a seeded draw within the archetype's
//! spread, so two Prospects differ far more than two Specialists.

use courtside_types::{Archetype, PlayerProfile, Position, Stat, StatMap};
use rand::{Rng, RngCore};
use tracing::info;

/// Errors that can occur when building a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// A name, baseline or other input is not acceptable.
    #[error("invalid profile configuration: {reason}")]
    InvalidConfiguration {
        /// Explanation of what is wrong.
        reason: String,
    },
}

/// Archetype attribute weights applied to the position averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeWeights {
    /// Scoring multiplier.
    pub scoring: f64,
    /// Playmaking multiplier.
    pub playmaking: f64,
    /// Defense multiplier.
    pub defense: f64,
}

/// League-average per-game line for a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionAverages {
    /// Points per game.
    pub points: f64,
    /// Rebounds per game.
    pub rebounds: f64,
    /// Assists per game.
    pub assists: f64,
}

/// Average line a player at `position` starts from.
pub const fn position_averages(position: Position) -> PositionAverages {
    let (points, rebounds, assists) = match position {
        Position::PointGuard => (12.0, 3.0, 5.0),
        Position::ShootingGuard => (11.0, 3.0, 3.0),
        Position::SmallForward => (10.0, 4.0, 2.5),
        Position::PowerForward => (9.0, 5.0, 2.0),
        Position::Center => (8.0, 6.0, 1.5),
    };
    PositionAverages {
        points,
        rebounds,
        assists,
    }
}

/// Attribute weights for an archetype.
pub const fn archetype_weights(archetype: Archetype) -> AttributeWeights {
    let (scoring, playmaking, defense) = match archetype {
        Archetype::Scorer => (1.9, 0.6, 0.6),
        Archetype::Playmaker => (1.0, 1.3, 0.7),
        Archetype::Defender => (0.7, 0.6, 1.3),
        Archetype::AllAround => (1.2, 1.0, 0.7),
        Archetype::Specialist => (1.5, 0.5, 0.9),
        Archetype::Prospect => (0.9, 0.8, 0.8),
    };
    AttributeWeights {
        scoring,
        playmaking,
        defense,
    }
}

/// Half-width of the initial baseline draw (0.25 = +/-25%).
pub const fn baseline_spread(archetype: Archetype) -> f64 {
    match archetype {
        Archetype::Prospect => 0.25,
        Archetype::Scorer | Archetype::Playmaker | Archetype::Defender => 0.10,
        Archetype::AllAround => 0.08,
        Archetype::Specialist => 0.05,
    }
}

/// Baselines before the spread draw.
pub fn expected_baselines(position: Position, archetype: Archetype) -> StatMap {
    let avg = position_averages(position);
    let w = archetype_weights(archetype);
    StatMap::from([
        (Stat::Points, avg.points * w.scoring),
        (
            Stat::Rebounds,
            avg.rebounds * w.scoring.mul_add(0.3, w.defense * 0.7),
        ),
        (Stat::Assists, avg.assists * w.playmaking),
    ])
}

/// Create a profile for `position` and `archetype`, drawing each baseline
/// within the archetype's spread from `rng`.
pub fn create_profile(
    position: Position,
    archetype: Archetype,
    rng: &mut dyn RngCore,
) -> PlayerProfile {
    let spread = baseline_spread(archetype);
    let baselines: StatMap = expected_baselines(position, archetype)
        .into_iter()
        .map(|(stat, base)| {
            let draw = rng.random_range(-spread..=spread);
            (stat, (base * (1.0 + draw)).max(0.0))
        })
        .collect();

    let profile = PlayerProfile {
        position,
        archetype,
        baselines,
    };
    info!(
        position = %position,
        archetype = %archetype,
        points = profile.baseline(Stat::Points),
        rebounds = profile.baseline(Stat::Rebounds),
        assists = profile.baseline(Stat::Assists),
        "Profile created"
    );
    profile
}

/// Create a profile from position and archetype names.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidConfiguration`] if either name is unknown.
pub fn create_profile_from_names(
    position: &str,
    archetype: &str,
    rng: &mut dyn RngCore,
) -> Result<PlayerProfile, ProfileError> {
    let position = parse_position(position)?;
    let archetype = parse_archetype(archetype)?;
    Ok(create_profile(position, archetype, rng))
}

/// Build a profile with explicit baselines.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidConfiguration`] if a tracked stat is
/// missing or any baseline is negative or not finite.
pub fn with_baselines(
    position: Position,
    archetype: Archetype,
    baselines: StatMap,
) -> Result<PlayerProfile, ProfileError> {
    for stat in Stat::ALL {
        match baselines.get(&stat) {
            None => {
                return Err(ProfileError::InvalidConfiguration {
                    reason: format!("missing baseline for {stat}"),
                });
            }
            Some(&v) if !v.is_finite() || v < 0.0 => {
                return Err(ProfileError::InvalidConfiguration {
                    reason: format!("baseline for {stat} must be finite and >= 0, got {v}"),
                });
            }
            Some(_) => {}
        }
    }
    Ok(PlayerProfile {
        position,
        archetype,
        baselines,
    })
}

/// Parse a position name.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidConfiguration`] for unknown names.
pub fn parse_position(name: &str) -> Result<Position, ProfileError> {
    name.parse().map_err(|err: courtside_types::ParseEnumError| {
        ProfileError::InvalidConfiguration {
            reason: err.to_string(),
        }
    })
}

/// Parse an archetype name.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidConfiguration`] for unknown names.
pub fn parse_archetype(name: &str) -> Result<Archetype, ProfileError> {
    name.parse().map_err(|err: courtside_types::ParseEnumError| {
        ProfileError::InvalidConfiguration {
            reason: err.to_string(),
        }
    })
}
