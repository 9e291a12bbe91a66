//! Combination of active event instances into per-stat multipliers.
//!
//! Each [`StackPolicy`] contributes one factor per stat:
//!
//! | Policy | Contribution |
//! |--------|--------------|
//! | Additive | `1 + sum(magnitude - 1)` over all additive instances |
//! | Multiplicative | product of magnitudes |
//! | Replace | magnitude of the most recently activated instance touching the stat |
//!
//! The three contributions multiply and the result is floored at zero. An
//! instance only counts toward the stats listed in its magnitudes.

use courtside_types::{ActiveEvent, StackPolicy, Stat, StatMap};

/// Running contributions for one stat.
#[derive(Debug, Clone, Copy)]
struct StatAccumulator {
    additive_deviation: f64,
    multiplicative: f64,
    /// `(activated_at, magnitude)` of the newest Replace instance seen.
    replace: Option<(u64, f64)>,
}

impl StatAccumulator {
    const fn new() -> Self {
        Self {
            additive_deviation: 0.0,
            multiplicative: 1.0,
            replace: None,
        }
    }

    fn absorb(&mut self, policy: StackPolicy, magnitude: f64, activated_at: u64) {
        match policy {
            StackPolicy::Additive => self.additive_deviation += magnitude - 1.0,
            StackPolicy::Multiplicative => self.multiplicative *= magnitude,
            StackPolicy::Replace => {
                if self.replace.is_none_or(|(seq, _)| activated_at > seq) {
                    self.replace = Some((activated_at, magnitude));
                }
            }
        }
    }

    fn finish(self) -> f64 {
        let replace = self.replace.map_or(1.0, |(_, m)| m);
        let value = (1.0 + self.additive_deviation) * self.multiplicative * replace;
        if value.is_nan() { 0.0 } else { value.max(0.0) }
    }
}

/// Multiplier for `stat` given the active instances.
pub fn combine_stat(active: &[ActiveEvent], stat: Stat) -> f64 {
    let mut acc = StatAccumulator::new();
    for event in active {
        if let Some(&magnitude) = event.definition.magnitudes.get(&stat) {
            acc.absorb(event.definition.stack_policy, magnitude, event.activated_at);
        }
    }
    acc.finish()
}

/// Multiplier for every tracked stat given the active instances.
///
/// Always contains an entry for each [`Stat::ALL`] member.
pub fn combine(active: &[ActiveEvent]) -> StatMap {
    Stat::ALL
        .iter()
        .map(|&stat| (stat, combine_stat(active, stat)))
        .collect()
}
