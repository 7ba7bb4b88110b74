use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GridError {
    #[error("Adjacent hazard count {0} is outside 0..=8")]
    InvalidAdjacencyCount(u8),
    #[error("Invalid grid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Hazard layout shape does not match declared size")]
    InvalidBoardShape,
    #[error("Layout holds {found} hazards, configuration asks for {expected}")]
    HazardCountMismatch { expected: CellCount, found: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: Coord, height: Coord },
    #[error("hazard density must lie strictly between 0 and 1, got {0}")]
    DensityOutOfRange(f64),
    #[error("{hazards} hazards do not leave a free cell among {cells}")]
    TooManyHazards { hazards: CellCount, cells: CellCount },
    #[error("a snake of length {length} does not fit from the middle of a {width} wide field")]
    SnakeDoesNotFit { length: u8, width: Coord },
}

pub type Result<T> = core::result::Result<T, GridError>;
