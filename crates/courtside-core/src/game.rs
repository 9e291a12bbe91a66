//! Single-game simulation.
//!
//! For each tracked stat:
//!
//! ```text
//! value = baseline * age_factor(age) * modifier * (1 + u),   u ~ U[-variance, +variance]
//! ```
//!
//! clamped to `>= 0`. One draw per stat, in [`Stat::ALL`] order, is the only
//! per-game randomness outside the event roll.

use courtside_types::{GameStatLine, PlayerProfile, Stat, StatMap};
use rand::{Rng, RngCore};

use crate::aging::age_factor;

/// Default half-width of the per-game noise.
pub const DEFAULT_GAME_VARIANCE: f64 = 0.15;

/// Value of `stat` before noise: baseline, age and event modifier applied.
///
/// A stat missing from `modifiers` is treated as unmodified.
pub fn expected_value(profile: &PlayerProfile, age: u32, modifiers: &StatMap, stat: Stat) -> f64 {
    let modifier = modifiers.get(&stat).copied().unwrap_or(1.0);
    profile.baseline(stat) * age_factor(age) * modifier
}

/// Simulate game number `game` and return its stat line.
///
/// `variance` is clamped into `[0, 1]` so the noise factor never goes
/// negative.
pub fn simulate_game(
    profile: &PlayerProfile,
    age: u32,
    modifiers: &StatMap,
    variance: f64,
    game: u32,
    rng: &mut dyn RngCore,
) -> GameStatLine {
    let variance = if variance.is_finite() {
        variance.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let values: StatMap = Stat::ALL
        .iter()
        .map(|&stat| {
            let noise = if variance > 0.0 {
                rng.random_range(-variance..=variance)
            } else {
                0.0
            };
            let raw = expected_value(profile, age, modifiers, stat) * (1.0 + noise);
            (stat, clamp_non_negative(raw))
        })
        .collect();

    GameStatLine { game, values }
}

/// Floor at zero, mapping NaN to zero.
fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use courtside_types::{Archetype, Position};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::aging::PEAK_AGE;
    use crate::profile::with_baselines;

    fn center_scorer() -> PlayerProfile {
        with_baselines(
            Position::Center,
            Archetype::Scorer,
            StatMap::from([
                (Stat::Points, 20.0),
                (Stat::Rebounds, 9.0),
                (Stat::Assists, 1.5),
            ]),
        )
        .unwrap()
    }

    fn unit_modifiers() -> StatMap {
        Stat::ALL.iter().map(|&s| (s, 1.0)).collect()
    }

    #[test]
    fn zero_variance_is_exact_at_peak() {
        let profile = center_scorer();
        let mut rng = SmallRng::seed_from_u64(0);
        let line = simulate_game(&profile, PEAK_AGE, &unit_modifiers(), 0.0, 1, &mut rng);
        assert!((line.value(Stat::Points) - 20.0).abs() < 1e-12);
        assert_eq!(line.game, 1);
    }

    #[test]
    fn noise_is_bounded() {
        let profile = center_scorer();
        let mut rng = SmallRng::seed_from_u64(8);
        for game in 1..=500 {
            let line = simulate_game(&profile, PEAK_AGE, &unit_modifiers(), 0.15, game, &mut rng);
            let points = line.value(Stat::Points);
            assert!((17.0 - 1e-9..=23.0 + 1e-9).contains(&points));
        }
    }

    #[test]
    fn mean_converges_to_baseline() {
        let profile = center_scorer();
        let mut rng = SmallRng::seed_from_u64(42);
        let n = 20_000_u32;
        let total: f64 = (1..=n)
            .map(|g| {
                simulate_game(&profile, PEAK_AGE, &unit_modifiers(), 0.15, g, &mut rng)
                    .value(Stat::Points)
            })
            .sum();
        let mean = total / f64::from(n);
        assert!((mean - 20.0).abs() < 0.2, "mean was {mean}");
    }

    #[test]
    fn never_negative_under_any_modifier() {
        let profile = center_scorer();
        let mut rng = SmallRng::seed_from_u64(3);
        for modifier in [0.0, 0.3, 1.0, 3.0, f64::NAN] {
            let mods: StatMap = Stat::ALL.iter().map(|&s| (s, modifier)).collect();
            for age in [0, 18, 22, 28, 35, 50] {
                let line = simulate_game(&profile, age, &mods, 1.0, 1, &mut rng);
                assert!(line.values.values().all(|&v| v >= 0.0 && v.is_finite()));
            }
        }
    }

    #[test]
    fn missing_modifier_counts_as_one() {
        let profile = center_scorer();
        let expected = expected_value(&profile, PEAK_AGE, &StatMap::new(), Stat::Points);
        assert!((expected - 20.0).abs() < 1e-12);
    }

    #[test]
    fn modifiers_scale_output() {
        let profile = center_scorer();
        let mut mods = unit_modifiers();
        mods.insert(Stat::Points, 1.3);
        let mut rng = SmallRng::seed_from_u64(0);
        let line = simulate_game(&profile, PEAK_AGE, &mods, 0.0, 1, &mut rng);
        assert!((line.value(Stat::Points) - 26.0).abs() < 1e-9);
    }
}
