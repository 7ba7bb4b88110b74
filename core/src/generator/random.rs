use ndarray::Array2;

use super::*;

/// Uniform placement: draws positions with replacement and rejects the ones
/// that already hold a hazard until the configured count is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomHazardGenerator {
    seed: u64,
}

impl RandomHazardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl HazardGenerator for RandomHazardGenerator {
    fn generate(self, config: &GridConfig) -> Result<HazardLayout> {
        use rand::prelude::*;

        // a full (or overfull) grid would never find a free position
        config.validate()?;

        let (width, height) = config.size;
        let hazards = config.hazard_count();
        let mut hazard_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut placed: CellCount = 0;
        let mut rejected: usize = 0;
        while placed < hazards {
            let coords: Coord2 = (rng.random_range(0..width), rng.random_range(0..height));
            let slot = &mut hazard_mask[coords.to_nd_index()];
            if *slot {
                rejected += 1;
                log::trace!("Hazard already at {:?}, sampling again", coords);
                continue;
            }
            *slot = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} hazards on {}x{} (seed {}, {} rejected samples)",
            placed,
            width,
            height,
            self.seed,
            rejected
        );
        HazardLayout::from_hazard_mask(hazard_mask)
    }
}
