use core::ops::Index;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Where the hazards are. Produced once by a [`HazardGenerator`] (or built by
/// hand for fixed puzzles) and consumed by [`Grid`] setup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HazardLayout {
    hazard_mask: Array2<bool>,
    size: Coord2,
    hazard_count: CellCount,
}

impl HazardLayout {
    /// Takes a mask indexed `[x, y]`. Fails with
    /// [`GridError::InvalidBoardShape`] when an axis is longer than a
    /// [`Coord`] can address.
    pub fn from_hazard_mask(hazard_mask: Array2<bool>) -> Result<Self> {
        let (width, height) = hazard_mask.dim();
        let size = match (Coord::try_from(width), Coord::try_from(height)) {
            (Ok(width), Ok(height)) => (width, height),
            _ => {
                log::debug!("Hazard mask {}x{} is too large", width, height);
                return Err(GridError::InvalidBoardShape);
            }
        };

        // at most 255 * 255 cells, so the count fits
        let hazard_count = hazard_mask.iter().filter(|&&is_hazard| is_hazard).count() as CellCount;
        Ok(Self {
            hazard_mask,
            size,
            hazard_count,
        })
    }

    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in hazard_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GridError::InvalidCoords);
            }
            hazard_mask[coords.to_nd_index()] = true;
        }

        Self::from_hazard_mask(hazard_mask)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn contains_hazard(&self, coords: Coord2) -> bool {
        self.hazard_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Hazards among the up to 8 neighbors of `coords`; off-grid neighbors
    /// count as empty.
    pub fn adjacent_hazard_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for HazardLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.hazard_mask[coords.to_nd_index()]
    }
}
