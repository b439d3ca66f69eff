//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::EntityKind;
use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
}

impl WorldConfig {
    pub fn cell_count(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
        }
    }
}

/// Organism species parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganismConfig {
    /// Organisms placed when the world is seeded
    pub initial_count: usize,
    /// A generation event fires when the population is at or below this count
    pub survival_floor: usize,
    /// Starting health for seeded organisms and offspring
    pub baseline_health: i32,
    /// Health lost at the start of every action
    pub aging_cost: i32,
    /// Shortest genetic code for seeded organisms
    pub min_code_length: usize,
    /// Longest genetic code for seeded organisms
    pub max_code_length: usize,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            initial_count: 8,
            survival_floor: 2,
            baseline_health: 100,
            aging_cost: 1,
            min_code_length: 20,
            max_code_length: 30,
        }
    }
}

/// Genetic variation applied to offspring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Offspring length differs from the parent by at most this much
    pub length_jitter: i32,
    /// Up to `shared_len / point_mutation_divisor` point mutations per offspring
    pub point_mutation_divisor: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            length_jitter: 2,
            point_mutation_divisor: 10,
        }
    }
}

/// Equilibrium policy for a stationary entity kind.
///
/// When the live count drops to `minimum`, the kind is restocked up to `maximum`.
/// Fields missing from a config file fall back to the resource defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockPolicy {
    pub minimum: usize,
    pub maximum: usize,
    /// Heal for resources, damage for hazards, ignored for obstacles
    pub amount: i32,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self::new(5, 10, 10)
    }
}

impl StockPolicy {
    pub fn new(minimum: usize, maximum: usize, amount: i32) -> Self {
        Self {
            minimum,
            maximum,
            amount,
        }
    }

    /// A policy that never spawns anything
    pub fn none() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn needs_restock(&self, count: usize) -> bool {
        count <= self.minimum && count < self.maximum
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    pub world: WorldConfig,
    pub organisms: OrganismConfig,
    pub mutation: MutationConfig,
    pub resources: StockPolicy,
    pub hazards: StockPolicy,
    pub obstacles: StockPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            world: WorldConfig::default(),
            organisms: OrganismConfig::default(),
            mutation: MutationConfig::default(),
            resources: StockPolicy::default(),
            hazards: StockPolicy::new(5, 10, 5),
            obstacles: StockPolicy::new(10, 15, 0),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Stock policy for a stationary kind; `None` for organisms
    pub fn stock_policy(&self, kind: EntityKind) -> Option<&StockPolicy> {
        match kind {
            EntityKind::Organism => None,
            EntityKind::Obstacle => Some(&self.obstacles),
            EntityKind::Hazard => Some(&self.hazards),
            EntityKind::Resource => Some(&self.resources),
        }
    }

    /// Reject configurations that cannot be applied
    pub fn validate(&self) -> Result<()> {
        if self.world.width <= 0 || self.world.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "world dimensions must be positive, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.world.cell_count() > i32::MAX as i64 {
            return Err(Error::InvalidConfig(format!(
                "world of {}x{} cells exceeds the addressable grid size",
                self.world.width, self.world.height
            )));
        }

        for kind in [EntityKind::Obstacle, EntityKind::Hazard, EntityKind::Resource] {
            if let Some(policy) = self.stock_policy(kind) {
                if policy.minimum > policy.maximum {
                    return Err(Error::InvalidConfig(format!(
                        "{} policy minimum {} exceeds maximum {}",
                        kind, policy.minimum, policy.maximum
                    )));
                }
            }
        }

        if self.hazards.amount < 0 || self.resources.amount < 0 {
            return Err(Error::InvalidConfig(
                "hazard damage and resource heal must not be negative".to_string(),
            ));
        }

        let organisms = &self.organisms;
        if organisms.baseline_health <= 0 {
            return Err(Error::InvalidConfig(format!(
                "baseline health must be positive, got {}",
                organisms.baseline_health
            )));
        }
        if organisms.aging_cost < 0 {
            return Err(Error::InvalidConfig(format!(
                "aging cost must not be negative, got {}",
                organisms.aging_cost
            )));
        }
        if organisms.min_code_length == 0 || organisms.min_code_length > organisms.max_code_length
        {
            return Err(Error::InvalidConfig(format!(
                "code length range [{}, {}] is empty or includes zero",
                organisms.min_code_length, organisms.max_code_length
            )));
        }

        if self.mutation.length_jitter < 0 {
            return Err(Error::InvalidConfig(format!(
                "length jitter must not be negative, got {}",
                self.mutation.length_jitter
            )));
        }
        if self.mutation.point_mutation_divisor == 0 {
            return Err(Error::InvalidConfig(
                "point mutation divisor must be at least 1".to_string(),
            ));
        }

        // Stationary entities alone must never fill the grid.
        let stock_max =
            (self.obstacles.maximum + self.hazards.maximum + self.resources.maximum) as i64;
        if stock_max + organisms.initial_count as i64 >= self.world.cell_count() {
            return Err(Error::InvalidConfig(format!(
                "{} stock entities and {} organisms saturate a {}x{} world",
                stock_max, organisms.initial_count, self.world.width, self.world.height
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = SimConfig::default();
        assert_eq!(config.world.width, 20);
        assert_eq!(config.world.height, 20);
        assert_eq!(config.organisms.initial_count, 8);
        assert_eq!(config.organisms.baseline_health, 100);
        assert_eq!(config.hazards.amount, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut config = SimConfig::default();
        config.world.width = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SimConfig::default();
        config.world.height = -3;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_oversized_world() {
        let mut config = SimConfig::default();
        config.world.width = 50_000;
        config.world.height = 50_000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("addressable"));

        config.world.height = 40_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_policy() {
        let config = SimConfig {
            resources: StockPolicy::new(10, 5, 1),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("resource"));
    }

    #[test]
    fn test_rejects_saturating_stock() {
        let config = SimConfig {
            world: WorldConfig {
                width: 4,
                height: 4,
            },
            obstacles: StockPolicy::new(0, 8, 0),
            hazards: StockPolicy::new(0, 8, 5),
            resources: StockPolicy::none(),
            organisms: OrganismConfig {
                initial_count: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_code_range() {
        let mut config = SimConfig::default();
        config.organisms.min_code_length = 0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.organisms.min_code_length = 31;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_needs_restock() {
        let policy = StockPolicy::new(5, 10, 1);
        assert!(policy.needs_restock(5));
        assert!(policy.needs_restock(0));
        assert!(!policy.needs_restock(6));
        assert!(!StockPolicy::none().needs_restock(0));
    }

    #[test]
    fn test_json_roundtrip_with_partial_input() {
        let config = SimConfig::from_json(r#"{"seed": 7, "world": {"width": 32}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.world.width, 32);
        assert_eq!(config.world.height, 20);

        assert!(SimConfig::from_json(r#"{"world": {"width": -1}}"#).is_err());
        assert!(matches!(
            SimConfig::from_json("not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_partial_stock_policy() {
        let config = SimConfig::from_json(r#"{"resources": {"minimum": 3}}"#).unwrap();
        assert_eq!(config.resources, StockPolicy::new(3, 10, 10));

        let config = SimConfig::from_json(r#"{"hazards": {"amount": 7}}"#).unwrap();
        assert_eq!(config.hazards, StockPolicy::new(5, 10, 7));
        assert_eq!(config.obstacles, StockPolicy::new(10, 15, 0));
    }
}
