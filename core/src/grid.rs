use alloc::vec::Vec;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// The play area: every cell, the selection cursor, and the configuration the
/// hazards were placed with.
///
/// A grid is fully set up on construction, hazards placed and adjacency
/// counts cached, so all player operations are total. There is no game-over
/// state; the driver stops calling once [`Grid::dig_selected`] reports a
/// hazard or [`Grid::is_won`] holds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<Cell>,
    selection: Coord2,
    config: GridConfig,
}

impl Grid {
    /// Grid with the default hazard density and an unpredictable layout.
    #[cfg(feature = "std")]
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        Self::generate(
            GridConfig::new((width, height))?,
            RandomHazardGenerator::from_entropy(),
        )
    }

    /// Runs `generator` for `config` and builds the grid around its layout.
    /// The layout must match the configured size and hazard count.
    pub fn generate<G: HazardGenerator>(config: GridConfig, generator: G) -> Result<Self> {
        config.validate()?;
        let layout = generator.generate(&config)?;
        if layout.size() != config.size {
            return Err(GridError::InvalidBoardShape);
        }
        check_free_cell(&layout)?;
        if layout.hazard_count() != config.hazard_count() {
            return Err(GridError::HazardCountMismatch {
                expected: config.hazard_count(),
                found: layout.hazard_count(),
            });
        }
        Self::setup(&layout, config)
    }

    /// Builds a grid around fixed hazard positions. The recorded density is
    /// the share of cells that actually hold a hazard, so a layout without
    /// hazards records 0 and its [`Grid::config`] does not pass
    /// [`GridConfig::validate`]. Layouts where every cell is a hazard are
    /// rejected.
    pub fn from_layout(layout: HazardLayout) -> Result<Self> {
        let (width, height) = layout.size();
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height }.into());
        }
        check_free_cell(&layout)?;

        let density = f64::from(layout.hazard_count()) / f64::from(layout.total_cells());
        let config = GridConfig::new_unchecked(layout.size(), density);
        Self::setup(&layout, config)
    }

    fn setup(layout: &HazardLayout, config: GridConfig) -> Result<Self> {
        let mut cells = Array2::from_shape_fn(config.size.to_nd_index(), |(x, y)| {
            Cell::with_hazard(layout.contains_hazard((x as Coord, y as Coord)))
        });

        for ((x, y), cell) in cells.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            cell.set_adjacent_hazard_count(layout.adjacent_hazard_count(coords))?;
        }

        log::debug!(
            "Grid {}x{} ready with {} hazards",
            config.size.0,
            config.size.1,
            layout.hazard_count()
        );
        Ok(Self {
            cells,
            selection: (0, 0),
            config,
        })
    }

    /// The configuration the grid was built with, or the one derived from a
    /// fixed layout (see [`Grid::from_layout`]).
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn hazard_density(&self) -> f64 {
        self.config.hazard_density
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        x < self.width() && y < self.height()
    }

    pub fn selection(&self) -> Coord2 {
        self.selection
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Every position with its cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn hazard_count(&self) -> CellCount {
        self.count_cells(Cell::has_hazard)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells(Cell::is_flagged)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(Cell::is_revealed)
    }

    /// Hazards minus placed flags; negative when over-flagged.
    pub fn hazards_left(&self) -> isize {
        (self.hazard_count() as isize) - (self.flagged_count() as isize)
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.selection = direction.step(self.selection, self.size());
    }

    /// Reveals at the selection and reports whether the selected cell holds a
    /// hazard.
    pub fn dig_selected(&mut self) -> bool {
        let selection = self.selection;
        let opened = self.reveal(selection);
        let hit = self.cells[selection.to_nd_index()].has_hazard();

        log::debug!(
            "Dig at {:?} opened {} cells, hazard: {}",
            selection,
            opened,
            hit
        );
        hit
    }

    pub fn flag_selected(&mut self) -> MarkOutcome {
        let selection = self.selection;
        let outcome = self.cells[selection.to_nd_index()].toggle_flag();
        log::debug!("Flag at {:?}: {:?}", selection, outcome);
        outcome
    }

    /// Reveals `coords` and floods through every reached cell with no adjacent
    /// hazards. Returns how many cells were newly revealed.
    ///
    /// Off-grid coordinates and revealed cells are ignored. The flood is gated
    /// only on the adjacency count of each revealed cell: neither hazards nor
    /// flags stop it. Cells open in the same order as a depth-first recursion
    /// over the neighbors (top-left first, bottom-right last).
    pub fn reveal(&mut self, coords: Coord2) -> CellCount {
        if !self.contains(coords) {
            log::trace!("Reveal at {:?} is off the grid", coords);
            return 0;
        }

        let mut opened: CellCount = 0;
        let mut to_visit = Vec::from([coords]);

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if !cell.reveal() {
                continue;
            }
            opened += 1;

            if cell.adjacent_hazard_count() != 0 {
                continue;
            }

            log::trace!("Flooding from {:?}", visit_coords);
            let first_pushed = to_visit.len();
            to_visit.extend(
                neighbors(visit_coords, self.size())
                    .filter(|&pos| !self.cells[pos.to_nd_index()].is_revealed()),
            );
            // stack pops last-in first, keep top-left on top
            to_visit[first_pushed..].reverse();
        }

        opened
    }

    /// Won when the flags sit on exactly the hazards: no hazard left unflagged
    /// and no flag on a safe cell. Revealing every safe cell is not enough.
    pub fn is_won(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.has_hazard() == cell.is_flagged())
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&cell| predicate(cell)).count() as CellCount
    }
}

fn check_free_cell(layout: &HazardLayout) -> Result<()> {
    let hazards = layout.hazard_count();
    let cells = layout.total_cells();
    if hazards >= cells {
        return Err(ConfigError::TooManyHazards { hazards, cells }.into());
    }
    Ok(())
}
