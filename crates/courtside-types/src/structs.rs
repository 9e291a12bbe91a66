//! Core record structs for the Courtside simulation.
//!
//! Covers the immutable [`PlayerProfile`], event definitions and their live
//! instances, the per-game [`GameStatLine`], and the season and career
//! records consumed by an external renderer or store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Archetype, EventCategory, Position, SeasonPhase, StackPolicy, Stat, Tier};
use crate::ids::CareerId;

/// A numeric value per tracked stat.
pub type StatMap = BTreeMap<Stat, f64>;

/// Look up a stat, treating a missing entry as zero.
pub fn stat_or_zero(map: &StatMap, stat: Stat) -> f64 {
    map.get(&stat).copied().unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Identity-free description of the simulated player.
///
/// Built once at career start and never mutated afterwards. Every tracked
/// stat has a finite, non-negative baseline. Two profiles with the same
/// position, archetype and baselines are the same player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerProfile {
    /// On-court position.
    pub position: Position,
    /// Playing style.
    pub archetype: Archetype,
    /// Per-game baseline for each tracked stat at peak age.
    pub baselines: StatMap,
}

impl PlayerProfile {
    /// Baseline for a stat (zero if the stat is not tracked).
    pub fn baseline(&self, stat: Stat) -> f64 {
        stat_or_zero(&self.baselines, stat)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A catalog entry describing one kind of in-season event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventDefinition {
    /// Unique display name (e.g. "Hot Streak").
    pub name: String,
    /// Flavour text shown when the event fires.
    #[serde(default)]
    pub description: String,
    /// Positive, negative or neutral.
    pub category: EventCategory,
    /// Multiplicative factor per affected stat. Stats not listed are
    /// unaffected.
    pub magnitudes: StatMap,
    /// Number of games the event stays active.
    pub duration: u32,
    /// How this event combines with other active events.
    pub stack_policy: StackPolicy,
}

impl EventDefinition {
    /// Factor this event applies to `stat` (1.0 when unaffected).
    pub fn magnitude(&self, stat: Stat) -> f64 {
        self.magnitudes.get(&stat).copied().unwrap_or(1.0)
    }
}

/// A live instance of an [`EventDefinition`] held by the event ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActiveEvent {
    /// The definition this instance was created from.
    pub definition: EventDefinition,
    /// Games left before the instance expires.
    pub remaining_games: u32,
    /// Ledger sequence number of the last activation. Larger is newer.
    pub activated_at: u64,
}

impl ActiveEvent {
    /// Name of the underlying definition.
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

// ---------------------------------------------------------------------------
// Games and seasons
// ---------------------------------------------------------------------------

/// One game's numeric result. Consumed immediately by the season aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameStatLine {
    /// 1-based game number within the season.
    pub game: u32,
    /// Value per tracked stat. Never negative.
    pub values: StatMap,
}

impl GameStatLine {
    /// Value for a stat (zero if absent).
    pub fn value(&self, stat: Stat) -> f64 {
        stat_or_zero(&self.values, stat)
    }
}

/// Running record of one season.
///
/// Mutated once per game by the season aggregator and frozen when the
/// schedule is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeasonRecord {
    /// 1-based season number within the career.
    pub season_index: u32,
    /// Player age during this season.
    pub age: u32,
    /// Games played so far.
    pub games_played: u32,
    /// Games scheduled for the season.
    pub games_scheduled: u32,
    /// Running per-game average for each stat.
    pub averages: StatMap,
    /// Running totals for each stat.
    pub totals: StatMap,
    /// Best single-game value for each stat.
    pub highs: StatMap,
    /// Names of events that fired during the season, in order.
    pub events: Vec<String>,
    /// Set once `games_played == games_scheduled`.
    pub complete: bool,
}

impl SeasonRecord {
    /// Create an empty record for a season that has not started.
    pub fn new(season_index: u32, age: u32, games_scheduled: u32) -> Self {
        let zeroes: StatMap = Stat::ALL.iter().map(|&stat| (stat, 0.0)).collect();
        Self {
            season_index,
            age,
            games_played: 0,
            games_scheduled,
            averages: zeroes.clone(),
            totals: zeroes.clone(),
            highs: zeroes,
            events: Vec::new(),
            complete: false,
        }
    }

    /// Running per-game average for a stat.
    pub fn average(&self, stat: Stat) -> f64 {
        stat_or_zero(&self.averages, stat)
    }

    /// Running total for a stat.
    pub fn total(&self, stat: Stat) -> f64 {
        stat_or_zero(&self.totals, stat)
    }

    /// Lifecycle phase derived from the game counter.
    pub const fn phase(&self) -> SeasonPhase {
        if self.complete {
            SeasonPhase::Complete
        } else if self.games_played == 0 {
            SeasonPhase::NotStarted
        } else {
            SeasonPhase::InProgress {
                games_played: self.games_played,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Career
// ---------------------------------------------------------------------------

/// All completed seasons of one career plus derived outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CareerRecord {
    /// Career identifier.
    pub career_id: CareerId,
    /// Position the career was played at.
    pub position: Position,
    /// Archetype the career was played as.
    pub archetype: Archetype,
    /// Completed seasons in order.
    pub seasons: Vec<SeasonRecord>,
    /// Unweighted mean of the season averages for each stat.
    pub career_average: StatMap,
    /// Final tier, when at least one season has been recorded.
    pub tier: Option<Tier>,
}

/// Career-level statistics for a summary view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CareerSummary {
    /// Number of completed seasons.
    pub years_played: u32,
    /// Unweighted mean of season averages per stat.
    pub career_average: StatMap,
    /// Best season points average.
    pub peak_points: f64,
    /// 1-based index of the peak points season.
    pub peak_season: u32,
    /// Career totals per stat.
    pub totals: StatMap,
    /// Games played across the career.
    pub total_games: u32,
    /// Number of seasons whose own scoring average reached each tier.
    pub seasons_by_tier: BTreeMap<Tier, u32>,
    /// Seasons at Starter level or better.
    pub prime_years: u32,
    /// Final career tier.
    pub tier: Tier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_season_record_is_not_started() {
        let record = SeasonRecord::new(1, 22, 82);
        assert_eq!(record.phase(), SeasonPhase::NotStarted);
        assert!(record.average(Stat::Points).abs() < f64::EPSILON);
        assert_eq!(record.averages.len(), Stat::ALL.len());
    }

    #[test]
    fn season_phase_tracks_progress() {
        let mut record = SeasonRecord::new(1, 22, 82);
        record.games_played = 10;
        assert_eq!(record.phase(), SeasonPhase::InProgress { games_played: 10 });
        record.games_played = 82;
        record.complete = true;
        assert_eq!(record.phase(), SeasonPhase::Complete);
    }

    #[test]
    fn unaffected_stat_has_unit_magnitude() {
        let def = EventDefinition {
            name: String::from("Coaching Confidence"),
            description: String::new(),
            category: EventCategory::Positive,
            magnitudes: BTreeMap::from([(Stat::Points, 1.4)]),
            duration: 4,
            stack_policy: StackPolicy::Multiplicative,
        };
        assert!((def.magnitude(Stat::Points) - 1.4).abs() < 1e-12);
        assert!((def.magnitude(Stat::Assists) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn season_record_serializes_stat_keys() {
        let record = SeasonRecord::new(3, 24, 82);
        let json = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(json["season_index"], 3);
        assert!(json["averages"].get("Points").is_some());
    }
}
