//! Units on the map

use crate::combat::{self, AttackOutcome};
use crate::hex::Hex;
use crate::nation::NationId;
use crate::units::UnitKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifies a unit in the world arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// A military or civilian unit
///
/// Position is authoritative here; the tile index mirrors it and is kept in
/// sync by the `World` mutation paths.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub owner: NationId,
    pos: Hex,
    movement: u32,
    max_movement: u32,
    health: u32,
    max_health: u32,
    strength: u32,
    has_acted: bool,
    founds_city: bool,
}

impl Unit {
    /// Create a unit with stats from the catalog
    pub fn new(id: UnitId, kind: UnitKind, owner: NationId, pos: Hex) -> Self {
        let spec = kind.spec();
        Self {
            id,
            kind,
            owner,
            pos,
            movement: spec.movement,
            max_movement: spec.movement,
            health: spec.max_health,
            max_health: spec.max_health,
            strength: spec.strength,
            has_acted: false,
            founds_city: spec.founds_city,
        }
    }

    pub fn position(&self) -> Hex {
        self.pos
    }

    pub fn movement(&self) -> u32 {
        self.movement
    }

    pub fn max_movement(&self) -> u32 {
        self.max_movement
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn founds_city(&self) -> bool {
        self.founds_city
    }

    /// Whether the unit may still move this turn
    pub fn can_move(&self) -> bool {
        self.movement > 0 && !self.has_acted
    }

    /// Whether the unit may attack this turn
    pub fn can_attack(&self) -> bool {
        !self.has_acted && self.strength > 0
    }

    /// Move to `dest`, charging `cost` movement points. Refuses without
    /// mutating when the cost exceeds the remaining points.
    pub fn move_to(&mut self, dest: Hex, cost: u32) -> bool {
        if self.movement < cost {
            return false;
        }
        self.pos = dest;
        self.movement -= cost;
        true
    }

    /// Attack another unit. Refuses when this unit already acted or has no
    /// strength; otherwise rolls damage, applies it, and marks this unit as
    /// having acted.
    pub fn attack<R: Rng>(&mut self, target: &mut Unit, rng: &mut R) -> AttackOutcome {
        if !self.can_attack() {
            return AttackOutcome::refused();
        }
        let damage = combat::roll_damage(self.strength, rng);
        target.take_damage(damage);
        self.has_acted = true;
        AttackOutcome {
            success: true,
            damage,
            target_destroyed: target.is_destroyed(),
        }
    }

    /// Apply damage, clamping health at 0
    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Restore movement points and clear the acted flag for a new turn
    pub fn reset_movement(&mut self) {
        self.movement = self.max_movement;
        self.has_acted = false;
    }
}
