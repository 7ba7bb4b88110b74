use crate::*;
pub use random::*;

mod random;

/// Decides hazard placement for a grid of the configured size.
pub trait HazardGenerator {
    fn generate(self, config: &GridConfig) -> Result<HazardLayout>;
}

/// Hands out a prepared layout as-is, for fixed puzzles and tests.
impl HazardGenerator for HazardLayout {
    fn generate(self, config: &GridConfig) -> Result<HazardLayout> {
        if self.size() != config.size {
            return Err(GridError::InvalidBoardShape);
        }
        Ok(self)
    }
}
