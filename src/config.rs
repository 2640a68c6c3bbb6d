//! Construction-time sizing for a [`crate::domain::universe::Universe`].

use serde::{Deserialize, Serialize};

use crate::error::HashlifeError;

/// Capacities for a universe's node tables.
///
/// `tier_capacity` sizes the base cell-block table and every macrocell
/// tier alike; `arena_capacity` sizes the bump allocator backing those
/// tables' storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub arena_capacity: usize,
    pub tier_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            arena_capacity: 1 << 20,
            tier_capacity: 1 << 20,
        }
    }
}

impl Config {
    /// Rejects configurations that would size a table to zero.
    pub fn validate(&self) -> Result<(), HashlifeError> {
        if self.arena_capacity == 0 {
            return Err(HashlifeError::InvalidCapacity { requested: 0 });
        }
        if self.tier_capacity == 0 {
            return Err(HashlifeError::InvalidCapacity { requested: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_arena_capacity_is_rejected() {
        let config = Config {
            arena_capacity: 0,
            tier_capacity: 16,
        };
        assert!(matches!(
            config.validate(),
            Err(HashlifeError::InvalidCapacity { requested: 0 })
        ));
    }

    #[test]
    fn zero_tier_capacity_is_rejected() {
        let config = Config {
            arena_capacity: 16,
            tier_capacity: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(HashlifeError::InvalidCapacity { requested: 0 })
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config {
            arena_capacity: 256,
            tier_capacity: 512,
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
