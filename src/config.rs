//! Board configuration.

use crate::constants::{
    DEFAULT_GEM_TYPES, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_GEM_TYPES, MIN_GEM_TYPES,
};
use crate::error::{Error, Result};

/// Parameters for creating a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Number of gem types in play (prefix of `GemType::ALL`)
    pub gem_types: usize,
    /// Seed for the random gem source
    pub seed: u64,
    /// How far above its final cell a refilled gem spawns
    pub spawn_height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            gem_types: DEFAULT_GEM_TYPES,
            seed: fastrand::u64(..),
            spawn_height: DEFAULT_HEIGHT,
        }
    }
}

impl BoardConfig {
    /// Config with the given dimensions, type count and seed.
    ///
    /// New gems spawn one board height above their final cell.
    pub fn new(width: usize, height: usize, gem_types: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            gem_types,
            seed,
            spawn_height: height,
        }
    }

    /// Check the configuration before any board is built.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        validate_gem_types(self.gem_types)
    }
}

pub(crate) fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

pub(crate) fn validate_gem_types(count: usize) -> Result<()> {
    if count < MIN_GEM_TYPES {
        return Err(Error::TooFewGemTypes { count });
    }
    if count > MAX_GEM_TYPES {
        return Err(Error::TooManyGemTypes { count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(BoardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let cfg = BoardConfig::new(0, 8, 5, 1);
        assert_eq!(
            cfg.validate(),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 8
            })
        );
    }

    #[test]
    fn test_gem_type_bounds() {
        assert_eq!(
            BoardConfig::new(8, 8, 2, 1).validate(),
            Err(Error::TooFewGemTypes { count: 2 })
        );
        assert_eq!(
            BoardConfig::new(8, 8, 6, 1).validate(),
            Err(Error::TooManyGemTypes { count: 6 })
        );
        assert!(BoardConfig::new(8, 8, 3, 1).validate().is_ok());
    }
}
