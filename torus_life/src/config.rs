// config.rs - Construction parameters shared by every driver

use std::time::Duration;

use crate::error::GridError;
use crate::grid::{DEFAULT_DENSITY, DEFAULT_SIZE};

/// Delay between generations while a session is running.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(64);

#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    /// Edge length of the square grid.
    pub size: usize,
    /// Probability used by the Randomize command.
    pub density: f64,
    /// Cadence of automatic steps.
    pub delay: Duration,
    /// Seed for the session's generator; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Pause automatically once a generation repeats a recent one.
    pub stop_on_cycle: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            density: DEFAULT_DENSITY,
            delay: DEFAULT_DELAY,
            seed: None,
            stop_on_cycle: false,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.size == 0 {
            return Err(GridError::InvalidSize { size: self.size });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(GridError::InvalidDensity {
                density: self.density,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_board() {
        let config = LifeConfig::default();
        assert_eq!(config.size, 50);
        assert_eq!(config.density, 0.2);
        assert_eq!(config.delay, Duration::from_millis(64));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero = LifeConfig { size: 0, ..LifeConfig::default() };
        assert_eq!(zero.validate(), Err(GridError::InvalidSize { size: 0 }));

        let dense = LifeConfig { density: 2.0, ..LifeConfig::default() };
        assert!(matches!(dense.validate(), Err(GridError::InvalidDensity { .. })));
    }
}
