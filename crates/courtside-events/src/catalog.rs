//! The event catalog: a read-only registry of event definitions.
//!
//! The catalog answers two questions: which events exist (optionally
//! filtered by category), and which event, if any, fires this game. The
//! roll is driven entirely by the caller's random source so a fixed seed
//! reproduces the same sequence of events.
//!
//! # Roll
//!
//! 1. With probability [`RollTable::trigger_probability`] an event fires.
//! 2. A category is chosen by weight among categories that have at least
//!    one definition.
//! 3. A definition is chosen uniformly within that category.

use std::collections::BTreeSet;
use std::path::Path;

use courtside_types::{EventCategory, EventDefinition, StackPolicy, Stat};
use rand::{Rng, RngCore};
use serde::Deserialize;
use tracing::debug;

use crate::CatalogError;

/// Default per-game chance that an event fires.
pub const DEFAULT_TRIGGER_PROBABILITY: f64 = 0.10;

/// Probabilities governing the per-game event roll.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RollTable {
    /// Chance that any event fires in a given game (0.0--1.0).
    #[serde(default = "default_trigger_probability")]
    pub trigger_probability: f64,
    /// Relative weight of positive events.
    #[serde(default = "default_positive_weight")]
    pub positive_weight: f64,
    /// Relative weight of negative events.
    #[serde(default = "default_negative_weight")]
    pub negative_weight: f64,
    /// Relative weight of neutral events.
    #[serde(default = "default_neutral_weight")]
    pub neutral_weight: f64,
}

impl Default for RollTable {
    fn default() -> Self {
        Self {
            trigger_probability: default_trigger_probability(),
            positive_weight: default_positive_weight(),
            negative_weight: default_negative_weight(),
            neutral_weight: default_neutral_weight(),
        }
    }
}

impl RollTable {
    /// Weight assigned to a category.
    pub const fn weight(&self, category: EventCategory) -> f64 {
        match category {
            EventCategory::Positive => self.positive_weight,
            EventCategory::Negative => self.negative_weight,
            EventCategory::Neutral => self.neutral_weight,
        }
    }

    /// Check that the probability is in range and weights are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(0.0..=1.0).contains(&self.trigger_probability) {
            return Err(CatalogError::Invalid {
                reason: format!(
                    "trigger_probability must be within 0.0..=1.0, got {}",
                    self.trigger_probability
                ),
            });
        }
        for category in EventCategory::ALL {
            let weight = self.weight(category);
            if !weight.is_finite() || weight < 0.0 {
                return Err(CatalogError::Invalid {
                    reason: format!("{category} weight must be finite and >= 0, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

const fn default_trigger_probability() -> f64 {
    DEFAULT_TRIGGER_PROBABILITY
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

/// Read-only registry of event definitions plus the roll table.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCatalog {
    definitions: Vec<EventDefinition>,
    roll_table: RollTable,
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self {
            definitions: default_events(),
            roll_table: RollTable::default(),
        }
    }
}

impl EventCatalog {
    /// Build a catalog from explicit definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if a name is empty or duplicated,
    /// a duration is zero, a magnitude is negative or not finite, or the
    /// roll table is out of range.
    pub fn new(
        definitions: Vec<EventDefinition>,
        roll_table: RollTable,
    ) -> Result<Self, CatalogError> {
        roll_table.validate()?;
        validate_definitions(&definitions)?;
        Ok(Self {
            definitions,
            roll_table,
        })
    }

    /// Parse a catalog from a YAML list of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] for malformed YAML and
    /// [`CatalogError::Invalid`] for definitions that fail validation.
    pub fn from_yaml(yaml: &str, roll_table: RollTable) -> Result<Self, CatalogError> {
        let definitions: Vec<EventDefinition> = serde_yml::from_str(yaml)?;
        Self::new(definitions, roll_table)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`from_yaml`](Self::from_yaml).
    pub fn from_file(path: &Path, roll_table: RollTable) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents, roll_table)
    }

    /// Replace the roll table, keeping the definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if the table is out of range.
    pub fn with_roll_table(mut self, roll_table: RollTable) -> Result<Self, CatalogError> {
        roll_table.validate()?;
        self.roll_table = roll_table;
        Ok(self)
    }

    /// The roll table in use.
    pub const fn roll_table(&self) -> &RollTable {
        &self.roll_table
    }

    /// Number of definitions.
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog has no definitions.
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// List definitions, optionally restricted to one category.
    pub fn list_events(&self, category: Option<EventCategory>) -> Vec<&EventDefinition> {
        self.definitions
            .iter()
            .filter(|def| category.is_none_or(|c| def.category == c))
            .collect()
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&EventDefinition> {
        self.definitions.iter().find(|def| def.name == name)
    }

    /// Roll for this game's event.
    ///
    /// Returns `None` most games. Consumes randomness only from `rng`.
    pub fn roll_event(&self, rng: &mut dyn RngCore) -> Option<&EventDefinition> {
        if self.definitions.is_empty() {
            return None;
        }

        let trigger: f64 = rng.random();
        if trigger >= self.roll_table.trigger_probability {
            return None;
        }

        let category = self.pick_category(rng)?;
        let candidates = self.list_events(Some(category));
        if candidates.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..candidates.len());
        let chosen = candidates.get(idx).copied();
        if let Some(def) = chosen {
            debug!(event = %def.name, category = %category, "Event rolled");
        }
        chosen
    }

    /// Weighted category choice among categories with definitions.
    fn pick_category(&self, rng: &mut dyn RngCore) -> Option<EventCategory> {
        let available: Vec<(EventCategory, f64)> = EventCategory::ALL
            .into_iter()
            .filter(|&c| self.definitions.iter().any(|def| def.category == c))
            .map(|c| (c, self.roll_table.weight(c)))
            .filter(|&(_, w)| w > 0.0)
            .collect();

        let total: f64 = available.iter().map(|&(_, w)| w).sum();
        if total <= 0.0 {
            return None;
        }

        let mut roll = rng.random::<f64>() * total;
        for &(category, weight) in &available {
            if roll < weight {
                return Some(category);
            }
            roll -= weight;
        }
        // Floating-point residue lands on the last available category.
        available.last().map(|&(c, _)| c)
    }
}

/// Validate a list of definitions for catalog use.
fn validate_definitions(definitions: &[EventDefinition]) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for def in definitions {
        if def.name.trim().is_empty() {
            return Err(CatalogError::Invalid {
                reason: String::from("event name must not be empty"),
            });
        }
        if !seen.insert(def.name.as_str()) {
            return Err(CatalogError::Invalid {
                reason: format!("duplicate event name: {}", def.name),
            });
        }
        if def.duration == 0 {
            return Err(CatalogError::Invalid {
                reason: format!("event {} must last at least one game", def.name),
            });
        }
        if let Some((stat, factor)) = def
            .magnitudes
            .iter()
            .find(|&(_, &factor)| !factor.is_finite() || factor < 0.0)
        {
            return Err(CatalogError::Invalid {
                reason: format!(
                    "event {} has invalid magnitude {factor} for {stat}",
                    def.name
                ),
            });
        }
    }
    Ok(())
}

/// Build one definition from a compact table row.
fn def(
    name: &str,
    description: &str,
    category: EventCategory,
    magnitudes: &[(Stat, f64)],
    duration: u32,
    stack_policy: StackPolicy,
) -> EventDefinition {
    EventDefinition {
        name: name.to_owned(),
        description: description.to_owned(),
        category,
        magnitudes: magnitudes.iter().copied().collect(),
        duration,
        stack_policy,
    }
}

/// The built-in pool of 20 events.
pub fn default_events() -> Vec<EventDefinition> {
    use EventCategory::{Negative, Neutral, Positive};
    use StackPolicy::{Additive, Multiplicative, Replace};
    use Stat::{Assists, Points, Rebounds};

    vec![
        // Positive
        def(
            "Hot Streak",
            "You're on fire! Everything is clicking.",
            Positive,
            &[(Points, 1.3), (Rebounds, 1.2), (Assists, 1.2)],
            5,
            Additive,
        ),
        def(
            "Training Breakthrough",
            "New training method is paying off!",
            Positive,
            &[(Points, 1.25), (Rebounds, 1.1), (Assists, 1.1)],
            8,
            Multiplicative,
        ),
        def(
            "Team Chemistry",
            "Great chemistry with teammates!",
            Positive,
            &[(Points, 1.2), (Rebounds, 1.3), (Assists, 1.4)],
            6,
            Multiplicative,
        ),
        def(
            "Coaching Confidence",
            "Coach has full confidence in you!",
            Positive,
            &[(Points, 1.4)],
            4,
            Replace,
        ),
        def(
            "Playoff Push",
            "Stepping up for the playoff push!",
            Positive,
            &[(Points, 1.35), (Rebounds, 1.25), (Assists, 1.15)],
            7,
            Additive,
        ),
        def(
            "Contract Year",
            "Playing for that new contract!",
            Positive,
            &[(Points, 1.3), (Rebounds, 1.2), (Assists, 1.1)],
            10,
            Replace,
        ),
        def(
            "All-Star Form",
            "Playing at an All-Star level!",
            Positive,
            &[(Points, 1.4), (Rebounds, 1.3), (Assists, 1.3)],
            6,
            Multiplicative,
        ),
        def(
            "Leadership Role",
            "Embracing leadership responsibilities!",
            Positive,
            &[(Points, 1.15), (Rebounds, 1.35), (Assists, 1.4)],
            8,
            Replace,
        ),
        // Negative
        def(
            "Shooting Slump",
            "Can't buy a basket lately...",
            Negative,
            &[(Points, 0.7), (Rebounds, 0.9), (Assists, 0.9)],
            5,
            Multiplicative,
        ),
        def(
            "Minor Injury",
            "Playing through a nagging injury",
            Negative,
            &[(Points, 0.8), (Rebounds, 0.7), (Assists, 0.8)],
            3,
            Replace,
        ),
        def(
            "Fatigue",
            "Worn down by the long season",
            Negative,
            &[(Points, 0.75), (Rebounds, 0.8), (Assists, 0.85)],
            6,
            Additive,
        ),
        def(
            "Team Conflict",
            "Issues with teammates/coach",
            Negative,
            &[(Points, 0.7), (Rebounds, 0.7), (Assists, 0.6)],
            4,
            Multiplicative,
        ),
        def(
            "Personal Issues",
            "Off-court distractions affecting play",
            Negative,
            &[(Points, 0.65), (Rebounds, 0.8), (Assists, 0.7)],
            5,
            Multiplicative,
        ),
        def(
            "Reduced Minutes",
            "Coach cutting your playing time",
            Negative,
            &[(Points, 0.6), (Rebounds, 0.6), (Assists, 0.6)],
            8,
            Replace,
        ),
        def(
            "Bad Form",
            "Just not playing well right now",
            Negative,
            &[(Points, 0.7), (Rebounds, 0.75), (Assists, 0.7)],
            7,
            Additive,
        ),
        def(
            "Trade Rumors",
            "Uncertainty affecting performance",
            Negative,
            &[(Points, 0.75), (Rebounds, 0.8), (Assists, 0.75)],
            6,
            Multiplicative,
        ),
        // Neutral
        def(
            "Role Change",
            "Adjusting to new team role",
            Neutral,
            &[(Points, 0.9), (Rebounds, 1.1), (Assists, 1.2)],
            10,
            Replace,
        ),
        def(
            "System Change",
            "New offensive system takes adjustment",
            Neutral,
            &[(Points, 0.85), (Rebounds, 0.9), (Assists, 1.1)],
            8,
            Replace,
        ),
        def(
            "Rookie Wall",
            "Hitting the rookie wall",
            Neutral,
            &[(Points, 0.7), (Rebounds, 0.8), (Assists, 0.7)],
            10,
            Replace,
        ),
        def(
            "Veteran Savvy",
            "Using experience to impact games",
            Neutral,
            &[(Rebounds, 1.1), (Assists, 1.3)],
            12,
            Multiplicative,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn default_catalog_has_twenty_events() {
        let catalog = EventCatalog::default();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.list_events(Some(EventCategory::Positive)).len(), 8);
        assert_eq!(catalog.list_events(Some(EventCategory::Negative)).len(), 8);
        assert_eq!(catalog.list_events(Some(EventCategory::Neutral)).len(), 4);
        assert_eq!(catalog.list_events(None).len(), 20);
    }

    #[test]
    fn default_events_pass_validation() {
        assert!(EventCatalog::new(default_events(), RollTable::default()).is_ok());
    }

    #[test]
    fn hot_streak_lookup() {
        let catalog = EventCatalog::default();
        let hot = catalog.get("Hot Streak").unwrap();
        assert_eq!(hot.duration, 5);
        assert!((hot.magnitude(Stat::Points) - 1.3).abs() < 1e-12);
        assert!(catalog.get("Meteor Strike").is_none());
    }

    #[test]
    fn roll_is_reproducible_for_a_seed() {
        let catalog = EventCatalog::default();
        let roll_all = |seed: u64| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..500)
                .map(|_| catalog.roll_event(&mut rng).map(|d| d.name.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(roll_all(7), roll_all(7));
    }

    #[test]
    fn zero_probability_never_fires() {
        let table = RollTable {
            trigger_probability: 0.0,
            ..RollTable::default()
        };
        let catalog = EventCatalog::default().with_roll_table(table).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(catalog.roll_event(&mut rng).is_none());
        }
    }

    #[test]
    fn certain_trigger_respects_single_category_weight() {
        let table = RollTable {
            trigger_probability: 1.0,
            positive_weight: 0.0,
            negative_weight: 1.0,
            neutral_weight: 0.0,
        };
        let catalog = EventCatalog::default().with_roll_table(table).unwrap();
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..200 {
            let def = catalog.roll_event(&mut rng).unwrap();
            assert_eq!(def.category, EventCategory::Negative);
        }
    }

    #[test]
    fn trigger_rate_is_close_to_probability() {
        let catalog = EventCatalog::default();
        let mut rng = SmallRng::seed_from_u64(2024);
        let fired = (0..20_000)
            .filter(|_| catalog.roll_event(&mut rng).is_some())
            .count();
        // 10% of 20k = 2000; allow generous slack.
        assert!((1700..2300).contains(&fired), "fired {fired} times");
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let table = RollTable {
            trigger_probability: 1.5,
            ..RollTable::default()
        };
        assert!(matches!(
            EventCatalog::new(default_events(), table),
            Err(CatalogError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_and_zero_duration() {
        let mut defs = default_events();
        defs.push(defs.first().cloned().unwrap());
        assert!(EventCatalog::new(defs, RollTable::default()).is_err());

        let mut zero = default_events();
        if let Some(first) = zero.first_mut() {
            first.duration = 0;
        }
        assert!(EventCatalog::new(zero, RollTable::default()).is_err());
    }

    #[test]
    fn parses_yaml_catalog() {
        let yaml = r"
- name: Heat Check
  category: Positive
  magnitudes:
    Points: 1.5
  duration: 2
  stack_policy: Replace
- name: Sprained Ankle
  description: Out of rhythm
  category: Negative
  magnitudes:
    Points: 0.5
    Rebounds: 0.5
  duration: 6
  stack_policy: Multiplicative
";
        let catalog = EventCatalog::from_yaml(yaml, RollTable::default()).unwrap();
        assert_eq!(catalog.len(), 2);
        let heat = catalog.get("Heat Check").unwrap();
        assert_eq!(heat.stack_policy, StackPolicy::Replace);
        assert!(heat.description.is_empty());
        assert!(catalog.list_events(Some(EventCategory::Neutral)).is_empty());
    }

    #[test]
    fn missing_category_is_skipped_when_rolling() {
        let yaml = r"
- name: Heat Check
  category: Positive
  magnitudes:
    Points: 1.5
  duration: 2
  stack_policy: Replace
";
        let table = RollTable {
            trigger_probability: 1.0,
            ..RollTable::default()
        };
        let catalog = EventCatalog::from_yaml(yaml, table).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(catalog.roll_event(&mut rng).unwrap().name, "Heat Check");
        }
    }
}
