use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Configuration for the game, fixed at engine construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of cells along one edge of the square grid
    pub grid_size: usize,
    /// Length of the creature at spawn (at least 3)
    pub initial_length: usize,
    /// Heading the creature spawns with
    pub initial_heading: Direction,
    /// Period of the automatic step timer
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_length: 3,
            initial_heading: Direction::Right,
            tick_interval: Duration::from_millis(130),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.initial_heading, Direction::Right);
        assert_eq!(config.tick_interval, Duration::from_millis(130));
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.initial_length, 3);
    }
}
