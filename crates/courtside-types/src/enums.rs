//! Enumeration types for the Courtside simulation.
//!
//! Positions and archetypes are the two selections a player makes when
//! creating a profile. Stats, event categories, stack policies, tiers and
//! season phases are the vocabulary shared by the ledger, the simulator and
//! the career evaluator.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a name does not match any variant of an enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Which enum was being parsed (e.g. "position").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Lowercase, trim, and fold `-`/`_` separators into single spaces.
fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// On-court position. Determines the position-average stat line a profile
/// starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Position {
    /// Primary ball handler.
    PointGuard,
    /// Perimeter scorer.
    ShootingGuard,
    /// Wing.
    SmallForward,
    /// Interior forward.
    PowerForward,
    /// Rim protector and rebounder.
    Center,
}

impl Position {
    /// Every position, in menu order.
    pub const ALL: [Self; 5] = [
        Self::PointGuard,
        Self::ShootingGuard,
        Self::SmallForward,
        Self::PowerForward,
        Self::Center,
    ];

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PointGuard => "Point Guard",
            Self::ShootingGuard => "Shooting Guard",
            Self::SmallForward => "Small Forward",
            Self::PowerForward => "Power Forward",
            Self::Center => "Center",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "point guard" | "pointguard" | "pg" => Ok(Self::PointGuard),
            "shooting guard" | "shootingguard" | "sg" => Ok(Self::ShootingGuard),
            "small forward" | "smallforward" | "sf" => Ok(Self::SmallForward),
            "power forward" | "powerforward" | "pf" => Ok(Self::PowerForward),
            "center" | "centre" | "c" => Ok(Self::Center),
            _ => Err(ParseEnumError {
                kind: "position",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Archetype
// ---------------------------------------------------------------------------

/// Player style. Determines how the position baseline is weighted and how
/// wide the initial baseline draw is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Archetype {
    /// High-volume scorer.
    Scorer,
    /// Distributor.
    Playmaker,
    /// Stopper and rebounder.
    Defender,
    /// Balanced contributor.
    AllAround,
    /// Narrow but reliable skill set.
    Specialist,
    /// Raw athlete with a wide range of outcomes.
    Prospect,
}

impl Archetype {
    /// Every archetype, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Scorer,
        Self::Playmaker,
        Self::Defender,
        Self::AllAround,
        Self::Specialist,
        Self::Prospect,
    ];

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scorer => "Scorer",
            Self::Playmaker => "Playmaker",
            Self::Defender => "Defender",
            Self::AllAround => "All-Around",
            Self::Specialist => "Specialist",
            Self::Prospect => "Prospect",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Archetype {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "scorer" => Ok(Self::Scorer),
            "playmaker" => Ok(Self::Playmaker),
            "defender" => Ok(Self::Defender),
            "all around" | "allaround" => Ok(Self::AllAround),
            "specialist" => Ok(Self::Specialist),
            "prospect" => Ok(Self::Prospect),
            _ => Err(ParseEnumError {
                kind: "archetype",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Stat
// ---------------------------------------------------------------------------

/// A per-game statistic tracked by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Stat {
    /// Points scored. The primary scoring stat used for tiers.
    Points,
    /// Total rebounds.
    Rebounds,
    /// Assists.
    Assists,
}

impl Stat {
    /// Every tracked stat.
    pub const ALL: [Self; 3] = [Self::Points, Self::Rebounds, Self::Assists];

    /// The stat career tiers are computed from.
    pub const PRIMARY: Self = Self::Points;

    /// Short per-game label (e.g. "PPG").
    pub const fn per_game_label(self) -> &'static str {
        match self {
            Self::Points => "PPG",
            Self::Rebounds => "RPG",
            Self::Assists => "APG",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Points => "points",
            Self::Rebounds => "rebounds",
            Self::Assists => "assists",
        })
    }
}

impl FromStr for Stat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "points" | "pts" | "ppg" => Ok(Self::Points),
            "rebounds" | "reb" | "rpg" => Ok(Self::Rebounds),
            "assists" | "ast" | "apg" => Ok(Self::Assists),
            _ => Err(ParseEnumError {
                kind: "stat",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Broad classification of an in-season event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EventCategory {
    /// Boosts performance (hot streaks, breakthroughs).
    Positive,
    /// Suppresses performance (slumps, injuries).
    Negative,
    /// Shifts production between stats (role or system changes).
    Neutral,
}

impl EventCategory {
    /// Every category.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::Neutral];
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        })
    }
}

/// How simultaneous instances of events combine on the same stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum StackPolicy {
    /// Deviations from 1.0 are summed.
    Additive,
    /// Multipliers compound.
    Multiplicative,
    /// Only the newest instance applies; re-adding refreshes its duration.
    Replace,
}

// ---------------------------------------------------------------------------
// Career
// ---------------------------------------------------------------------------

/// Career classification derived from average scoring output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Tier {
    /// Below the starter threshold.
    RolePlayer,
    /// 15+ points per game.
    Starter,
    /// 20+ points per game.
    AllStar,
    /// 25+ points per game.
    HallOfFame,
}

impl Tier {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RolePlayer => "Role Player",
            Self::Starter => "Starter",
            Self::AllStar => "All-Star",
            Self::HallOfFame => "Hall-of-Fame",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a single season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SeasonPhase {
    /// No game has been played yet.
    NotStarted,
    /// At least one game played and the schedule is not finished.
    InProgress {
        /// Games played so far.
        games_played: u32,
    },
    /// Every scheduled game has been played. No further ticks are accepted.
    Complete,
}
