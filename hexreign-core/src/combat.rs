//! Stateless combat resolution

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Damage variance band: 80% to 120% of strength
const VARIANCE_MIN: f64 = 0.8;
const VARIANCE_SPAN: f64 = 0.4;

/// Result of one attack
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub success: bool,
    pub damage: u32,
    pub target_destroyed: bool,
}

impl AttackOutcome {
    /// The attack was illegal; nothing changed
    pub(crate) fn refused() -> Self {
        Self {
            success: false,
            damage: 0,
            target_destroyed: false,
        }
    }
}

/// Roll damage for an attack: floor(strength x U), U in [0.8, 1.2)
pub fn roll_damage<R: Rng>(strength: u32, rng: &mut R) -> u32 {
    let variance = VARIANCE_MIN + rng.gen::<f64>() * VARIANCE_SPAN;
    (f64::from(strength) * variance) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_damage_in_variance_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let damage = roll_damage(6, &mut rng);
            assert!((4..=7).contains(&damage), "damage {} out of band", damage);
        }
    }

    #[test]
    fn test_zero_strength_rolls_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(roll_damage(0, &mut rng), 0);
    }

    #[test]
    fn test_seeded_rolls_are_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let rolls_a: Vec<u32> = (0..16).map(|_| roll_damage(10, &mut a)).collect();
        let rolls_b: Vec<u32> = (0..16).map(|_| roll_damage(10, &mut b)).collect();
        assert_eq!(rolls_a, rolls_b);
    }
}
