//! Random input arrays.

use rand::Rng;

use crate::error::{Error, Result};

/// Shape of a randomly generated array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayConfig {
    /// Number of elements
    pub size: usize,
    /// Smallest value (inclusive)
    pub min: i64,
    /// Largest value (inclusive)
    pub max: i64,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            size: 8,
            min: 10,
            max: 99,
        }
    }
}

impl ArrayConfig {
    /// Check the configuration without drawing anything.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidSize(self.size));
        }
        if self.min > self.max {
            return Err(Error::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Draw `config.size` values independently and uniformly from
/// `config.min..=config.max`.
pub fn random_array<R: Rng + ?Sized>(config: &ArrayConfig, rng: &mut R) -> Result<Vec<f64>> {
    config.validate()?;
    Ok((0..config.size)
        .map(|_| rng.gen_range(config.min..=config.max) as f64)
        .collect())
}
