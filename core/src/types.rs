use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells in a grid of `size`. Both axes are at most 255, so the
/// product always fits.
pub const fn area((width, height): Coord2) -> CellCount {
    width as CellCount * height as CellCount
}

/// Neighbor order: top-left, top, top-right, left, right, bottom-left,
/// bottom, bottom-right.
static NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The in-bounds positions of the 8-neighborhood around `center` on a grid
/// of `bounds`.
pub fn neighbors(center: Coord2, bounds: Coord2) -> Neighbors {
    Neighbors {
        center,
        bounds,
        offsets: NEIGHBOR_OFFSETS.iter(),
    }
}

#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    offsets: core::slice::Iter<'static, (i8, i8)>,
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (x, y) = self.center;
        let (width, height) = self.bounds;
        self.offsets.find_map(|&(dx, dy)| {
            let x = x.checked_add_signed(dx).filter(|&x| x < width)?;
            let y = y.checked_add_signed(dy).filter(|&y| y < height)?;
            Some((x, y))
        })
    }
}

/// Movement on a grid, for the selection cursor and the snake's heading.
/// `Up` and `Down` move along y, `Left` and `Right` along x.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// One step from `coords`, or `None` when it leaves `bounds`.
    pub fn checked_step(self, (x, y): Coord2, (width, height): Coord2) -> Option<Coord2> {
        use Direction::*;
        let next = match self {
            Up => (x, y.checked_sub(1)?),
            Down => (x, y.checked_add(1)?),
            Left => (x.checked_sub(1)?, y),
            Right => (x.checked_add(1)?, y),
        };
        (next.0 < width && next.1 < height).then_some(next)
    }

    /// Moves `coords` one step, saturating at the edges of `bounds`.
    pub fn step(self, coords: Coord2, bounds: Coord2) -> Coord2 {
        self.checked_step(coords, bounds).unwrap_or(coords)
    }
}
