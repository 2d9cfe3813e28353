//! Session configuration
//!
//! Grid dimensions are fixed when a session is built; there is no resize.

use crate::error::ConfigError;
use crate::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};

/// Parameters for a new game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Seed for the default uniform shape generator
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Check the dimensions, rejecting empty or oversized grids
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        for value in [self.width, self.height] {
            if value > MAX_DIMENSION {
                return Err(ConfigError::TooLarge {
                    value,
                    max: MAX_DIMENSION,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ten_by_twenty() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(GameConfig::new(0, 20).validate(), Err(ConfigError::ZeroWidth));
        assert_eq!(GameConfig::new(10, 0).validate(), Err(ConfigError::ZeroHeight));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let err = GameConfig::new(10, MAX_DIMENSION + 1).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooLarge {
                value: MAX_DIMENSION + 1,
                max: MAX_DIMENSION
            }
        );
    }
}
