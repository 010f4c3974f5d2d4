//! Batch configuration for populating the polynomial store

use crate::utils::{load_json, save_json};
use crate::{IndPolyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest order that is reduced and stored; orders 1 and 2 are definitional
pub const MIN_STORED_ORDER: usize = 3;

/// Which orders to populate and how
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulateConfig {
    /// First order processed (inclusive)
    pub min_order: usize,
    /// Last order processed (inclusive)
    pub max_order: usize,
    /// Reduce the trees of one order on the rayon pool
    pub parallel: bool,
    /// Print a progress line per order
    pub verbose: bool,
}

impl PopulateConfig {
    /// Process `min_order..=max_order`
    pub fn for_range(min_order: usize, max_order: usize) -> Self {
        PopulateConfig {
            min_order,
            max_order,
            ..Self::default()
        }
    }

    /// Process every stored order up to `max_order`, starting from an empty store
    pub fn full(max_order: usize) -> Self {
        Self::for_range(MIN_STORED_ORDER, max_order)
    }

    /// Silence progress output
    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }

    /// Reduce trees one at a time
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_order < MIN_STORED_ORDER {
            return Err(IndPolyError::InvalidConfig(format!(
                "min_order must be at least {}, got {}",
                MIN_STORED_ORDER, self.min_order
            )));
        }
        if self.min_order > self.max_order {
            return Err(IndPolyError::InvalidConfig(format!(
                "min_order {} exceeds max_order {}",
                self.min_order, self.max_order
            )));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: PopulateConfig = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save_json(self, path)
    }
}

impl Default for PopulateConfig {
    fn default() -> Self {
        PopulateConfig {
            min_order: 8,
            max_order: 12,
            parallel: true,
            verbose: true,
        }
    }
}
