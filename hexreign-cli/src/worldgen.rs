//! Procedural terrain generation
//!
//! The core builds its tile index from terrain supplied per coordinate;
//! this module is that collaborator. A seeded phase shift varies the
//! sin/cos noise field between runs while keeping each run reproducible.

use hexreign_core::{Hex, Terrain};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const Q_FREQUENCY: f64 = 0.4;
const R_FREQUENCY: f64 = 0.4;
const SHEAR: f64 = 0.2;

/// Seeded terrain noise field
pub struct Worldgen {
    phase_q: f64,
    phase_r: f64,
}

impl Worldgen {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            phase_q: rng.gen::<f64>() * std::f64::consts::TAU,
            phase_r: rng.gen::<f64>() * std::f64::consts::TAU,
        }
    }

    /// Terrain for one coordinate
    pub fn terrain_at(&self, hex: Hex) -> Terrain {
        let q = f64::from(hex.q);
        let r = f64::from(hex.r);
        let noise = (q * Q_FREQUENCY + self.phase_q).sin()
            + (r * R_FREQUENCY + q * SHEAR + self.phase_r).cos();

        if noise > 1.2 {
            Terrain::Mountain
        } else if noise > 1.0 {
            Terrain::Snow
        } else if noise > 0.6 {
            Terrain::Tundra
        } else if noise > 0.1 {
            Terrain::Grassland
        } else if noise > -0.3 {
            Terrain::Plains
        } else if noise > -0.5 {
            Terrain::Desert
        } else if noise > -0.8 {
            Terrain::Coast
        } else {
            Terrain::Ocean
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_map() {
        let a = Worldgen::new(42);
        let b = Worldgen::new(42);
        for q in 0..25 {
            for r in 0..16 {
                let hex = Hex::new(q, r);
                assert_eq!(a.terrain_at(hex), b.terrain_at(hex));
            }
        }
    }

    #[test]
    fn test_default_map_has_passable_land() {
        let generator = Worldgen::new(42);
        let passable = (0..16)
            .flat_map(|r| (0..25).map(move |q| Hex::new(q, r)))
            .filter(|&hex| generator.terrain_at(hex).is_passable())
            .count();
        assert!(passable > 0);
    }
}
