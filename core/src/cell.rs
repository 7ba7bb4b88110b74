use serde::{Deserialize, Serialize};

use crate::*;

/// Highest possible number of hazards around a single cell.
pub const MAX_ADJACENT_HAZARDS: u8 = 8;

/// State of one grid position.
///
/// Covered to revealed is one-way. The flag can be toggled freely while the
/// cell is covered and is frozen once it is revealed. Hazard membership is
/// decided when the grid is built and never changes afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_hazard: bool,
    revealed: bool,
    flagged: bool,
    adjacent_hazards: u8,
}

impl Cell {
    pub const fn new() -> Self {
        Self::with_hazard(false)
    }

    pub(crate) const fn with_hazard(has_hazard: bool) -> Self {
        Self {
            has_hazard,
            revealed: false,
            flagged: false,
            adjacent_hazards: 0,
        }
    }

    pub const fn has_hazard(&self) -> bool {
        self.has_hazard
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn adjacent_hazard_count(&self) -> u8 {
        self.adjacent_hazards
    }

    /// Uncovers the cell. Returns `true` when it was still covered.
    pub fn reveal(&mut self) -> bool {
        let was_covered = !self.revealed;
        self.revealed = true;
        was_covered
    }

    pub fn toggle_flag(&mut self) -> MarkOutcome {
        if self.revealed {
            return MarkOutcome::NoChange;
        }

        self.flagged = !self.flagged;
        MarkOutcome::Changed
    }

    pub fn set_adjacent_hazard_count(&mut self, count: u8) -> Result<()> {
        if count > MAX_ADJACENT_HAZARDS {
            return Err(GridError::InvalidAdjacencyCount(count));
        }

        self.adjacent_hazards = count;
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
