#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use layout::*;
pub use snake::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod layout;
mod snake;
mod types;

/// Share of cells holding a hazard when no density is given.
pub const DEFAULT_HAZARD_DENSITY: f64 = 0.10;

/// A seed from the thread-local generator, which is itself seeded by the OS.
#[cfg(feature = "std")]
pub fn entropy_seed() -> u64 {
    rand::random()
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub size: Coord2,
    pub hazard_density: f64,
}

impl GridConfig {
    pub const fn new_unchecked(size: Coord2, hazard_density: f64) -> Self {
        Self {
            size,
            hazard_density,
        }
    }

    pub fn new(size: Coord2) -> Result<Self> {
        Self::with_density(size, DEFAULT_HAZARD_DENSITY)
    }

    pub fn with_density(size: Coord2, hazard_density: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, hazard_density);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height }.into());
        }

        // also rejects NaN
        if !(self.hazard_density > 0.0 && self.hazard_density < 1.0) {
            return Err(ConfigError::DensityOutOfRange(self.hazard_density).into());
        }

        let hazards = self.hazard_count();
        let cells = self.total_cells();
        if hazards >= cells {
            return Err(ConfigError::TooManyHazards { hazards, cells }.into());
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    /// `floor(width * height * hazard_density)`.
    pub fn hazard_count(&self) -> CellCount {
        // float-to-int casts truncate and saturate, which is floor for the
        // non-negative products of a valid config
        (f64::from(self.total_cells()) * self.hazard_density) as CellCount
    }
}
