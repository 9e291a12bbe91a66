//! Career evaluation: season records in, tier and summary out.
//!
//! The career average of a stat is the unweighted mean of the season
//! averages, so a short injury year counts the same as a full one. Tiers
//! are read off the primary scoring stat.

use std::collections::BTreeMap;

use courtside_types::{
    Archetype, CareerId, CareerRecord, CareerSummary, Position, SeasonRecord, Stat, StatMap, Tier,
};
use tracing::debug;

use crate::config::MAX_SEASONS;

/// Points per game for a Hall-of-Fame career.
pub const HALL_OF_FAME_PPG: f64 = 25.0;
/// Points per game for an All-Star career.
pub const ALL_STAR_PPG: f64 = 20.0;
/// Points per game for a Starter career.
pub const STARTER_PPG: f64 = 15.0;

/// Errors that can occur when evaluating a career.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CareerError {
    /// No completed season has been recorded.
    #[error("no completed seasons to evaluate")]
    InsufficientData,

    /// A season was submitted before its schedule finished.
    #[error("season {season} is incomplete ({games_played}/{games_scheduled} games)")]
    SeasonIncomplete {
        /// 1-based season index.
        season: u32,
        /// Games played.
        games_played: u32,
        /// Games scheduled.
        games_scheduled: u32,
    },

    /// The career already holds the maximum number of seasons.
    #[error("career already holds {max} seasons")]
    CareerFull {
        /// The season cap.
        max: u32,
    },
}

/// Tier for a points-per-game figure.
pub fn tier_for(ppg: f64) -> Tier {
    if ppg >= HALL_OF_FAME_PPG {
        Tier::HallOfFame
    } else if ppg >= ALL_STAR_PPG {
        Tier::AllStar
    } else if ppg >= STARTER_PPG {
        Tier::Starter
    } else {
        Tier::RolePlayer
    }
}

/// Accumulates completed seasons for one career.
#[derive(Debug, Clone)]
pub struct CareerEvaluator {
    career_id: CareerId,
    position: Position,
    archetype: Archetype,
    seasons: Vec<SeasonRecord>,
    max_seasons: u32,
}

impl CareerEvaluator {
    /// Start an empty career capped at [`MAX_SEASONS`].
    pub fn new(position: Position, archetype: Archetype) -> Self {
        Self::with_limit(position, archetype, MAX_SEASONS)
    }

    /// Start an empty career capped at `max_seasons` (itself capped at
    /// [`MAX_SEASONS`]).
    pub fn with_limit(position: Position, archetype: Archetype, max_seasons: u32) -> Self {
        Self {
            career_id: CareerId::new(),
            position,
            archetype,
            seasons: Vec::new(),
            max_seasons: max_seasons.min(MAX_SEASONS),
        }
    }

    /// Replace the career identifier, e.g. with one drawn from the seeded
    /// generator.
    #[must_use]
    pub const fn with_career_id(mut self, career_id: CareerId) -> Self {
        self.career_id = career_id;
        self
    }

    /// Career identifier.
    pub const fn career_id(&self) -> CareerId {
        self.career_id
    }

    /// Recorded seasons in order.
    pub fn seasons(&self) -> &[SeasonRecord] {
        &self.seasons
    }

    /// Number of recorded seasons.
    pub fn years_played(&self) -> u32 {
        u32::try_from(self.seasons.len()).unwrap_or(u32::MAX)
    }

    /// Append a completed season.
    ///
    /// # Errors
    ///
    /// Returns [`CareerError::SeasonIncomplete`] for an unfinished season
    /// and [`CareerError::CareerFull`] once the cap is reached.
    pub fn record_season(&mut self, season: SeasonRecord) -> Result<(), CareerError> {
        if !season.complete || season.games_played < season.games_scheduled {
            return Err(CareerError::SeasonIncomplete {
                season: season.season_index,
                games_played: season.games_played,
                games_scheduled: season.games_scheduled,
            });
        }
        if self.years_played() >= self.max_seasons {
            return Err(CareerError::CareerFull {
                max: self.max_seasons,
            });
        }
        debug!(
            career_id = %self.career_id,
            season = season.season_index,
            "Season recorded"
        );
        self.seasons.push(season);
        Ok(())
    }

    /// Unweighted mean of each stat's season averages.
    ///
    /// # Errors
    ///
    /// Returns [`CareerError::InsufficientData`] with no seasons.
    pub fn career_average(&self) -> Result<StatMap, CareerError> {
        if self.seasons.is_empty() {
            return Err(CareerError::InsufficientData);
        }
        let n = f64::from(self.years_played());
        Ok(Stat::ALL
            .iter()
            .map(|&stat| {
                let sum: f64 = self.seasons.iter().map(|s| s.average(stat)).sum();
                (stat, sum / n)
            })
            .collect())
    }

    /// Final tier from the career scoring average.
    ///
    /// # Errors
    ///
    /// Returns [`CareerError::InsufficientData`] with no seasons.
    pub fn evaluate(&self) -> Result<Tier, CareerError> {
        let avg = self.career_average()?;
        Ok(tier_for(avg.get(&Stat::PRIMARY).copied().unwrap_or(0.0)))
    }

    /// Snapshot of the career so far. Average and tier are empty until a
    /// season has been recorded.
    pub fn record(&self) -> CareerRecord {
        CareerRecord {
            career_id: self.career_id,
            position: self.position,
            archetype: self.archetype,
            seasons: self.seasons.clone(),
            career_average: self.career_average().unwrap_or_default(),
            tier: self.evaluate().ok(),
        }
    }

    /// Career-level summary statistics.
    ///
    /// # Errors
    ///
    /// Returns [`CareerError::InsufficientData`] with no seasons.
    pub fn summary(&self) -> Result<CareerSummary, CareerError> {
        let career_average = self.career_average()?;
        let tier = self.evaluate()?;

        let mut peak_points = f64::NEG_INFINITY;
        let mut peak_season = 0;
        let mut totals: StatMap = Stat::ALL.iter().map(|&s| (s, 0.0)).collect();
        let mut total_games: u32 = 0;
        let mut seasons_by_tier: BTreeMap<Tier, u32> = BTreeMap::new();

        for season in &self.seasons {
            let ppg = season.average(Stat::PRIMARY);
            if ppg > peak_points {
                peak_points = ppg;
                peak_season = season.season_index;
            }
            for stat in Stat::ALL {
                *totals.entry(stat).or_insert(0.0) += season.total(stat);
            }
            total_games = total_games.saturating_add(season.games_played);
            let count = seasons_by_tier.entry(tier_for(ppg)).or_insert(0);
            *count = count.saturating_add(1);
        }

        let prime_years = seasons_by_tier
            .iter()
            .filter(|&(&t, _)| t >= Tier::Starter)
            .fold(0_u32, |acc, (_, &n)| acc.saturating_add(n));

        Ok(CareerSummary {
            years_played: self.years_played(),
            career_average,
            peak_points,
            peak_season,
            totals,
            total_games,
            seasons_by_tier,
            prime_years,
            tier,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn season(index: u32, ppg: f64) -> SeasonRecord {
        let mut record = SeasonRecord::new(index, 21_u32.saturating_add(index), 82);
        record.games_played = 82;
        record.complete = true;
        record.averages.insert(Stat::Points, ppg);
        record.averages.insert(Stat::Rebounds, 5.0);
        record.averages.insert(Stat::Assists, 3.0);
        record.totals.insert(Stat::Points, ppg * 82.0);
        record
    }

    fn career_with(ppgs: &[f64]) -> CareerEvaluator {
        let mut career = CareerEvaluator::new(Position::Center, Archetype::Scorer);
        for (i, &ppg) in ppgs.iter().enumerate() {
            let index = u32::try_from(i).unwrap().saturating_add(1);
            career.record_season(season(index, ppg)).unwrap();
        }
        career
    }

    #[test]
    fn empty_career_is_insufficient_data() {
        let career = CareerEvaluator::new(Position::Center, Archetype::Scorer);
        assert_eq!(career.evaluate(), Err(CareerError::InsufficientData));
        assert_eq!(career.summary().unwrap_err(), CareerError::InsufficientData);
        assert!(career.record().tier.is_none());
    }

    #[test]
    fn twenty_six_ppg_is_hall_of_fame() {
        let career = career_with(&[26.0; 10]);
        assert_eq!(career.evaluate().unwrap(), Tier::HallOfFame);
    }

    #[test]
    fn eighteen_ppg_is_starter() {
        let career = career_with(&[18.0; 10]);
        assert_eq!(career.evaluate().unwrap(), Tier::Starter);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(tier_for(25.0), Tier::HallOfFame);
        assert_eq!(tier_for(24.99), Tier::AllStar);
        assert_eq!(tier_for(20.0), Tier::AllStar);
        assert_eq!(tier_for(15.0), Tier::Starter);
        assert_eq!(tier_for(14.99), Tier::RolePlayer);
        assert_eq!(tier_for(0.0), Tier::RolePlayer);
    }

    #[test]
    fn average_is_unweighted_mean_of_seasons() {
        let career = career_with(&[10.0, 20.0, 30.0]);
        let avg = career.career_average().unwrap();
        assert!((avg.get(&Stat::Points).copied().unwrap() - 20.0).abs() < 1e-12);
        assert_eq!(career.evaluate().unwrap(), Tier::AllStar);
    }

    #[test]
    fn incomplete_season_is_rejected() {
        let mut career = CareerEvaluator::new(Position::Center, Archetype::Scorer);
        let mut partial = season(1, 20.0);
        partial.games_played = 40;
        partial.complete = false;
        assert!(matches!(
            career.record_season(partial),
            Err(CareerError::SeasonIncomplete { games_played: 40, .. })
        ));
    }

    #[test]
    fn sixteenth_season_is_rejected() {
        let mut career = career_with(&[12.0; 15]);
        assert_eq!(
            career.record_season(season(16, 12.0)),
            Err(CareerError::CareerFull { max: 15 })
        );
        assert_eq!(career.years_played(), 15);
    }

    #[test]
    fn summary_finds_peak_and_prime() {
        let career = career_with(&[12.0, 17.0, 22.0, 27.0, 21.0, 14.0]);
        let summary = career.summary().unwrap();
        assert_eq!(summary.years_played, 6);
        assert_eq!(summary.peak_season, 4);
        assert!((summary.peak_points - 27.0).abs() < 1e-12);
        assert_eq!(summary.prime_years, 4);
        assert_eq!(summary.total_games, 492);
        assert_eq!(summary.seasons_by_tier.get(&Tier::RolePlayer), Some(&2));
        assert_eq!(summary.seasons_by_tier.get(&Tier::AllStar), Some(&2));
        assert_eq!(summary.tier, Tier::Starter);
    }
}
