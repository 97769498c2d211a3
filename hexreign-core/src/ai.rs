//! Heuristic nation controller
//!
//! Drives an entire nation's turn with the same commands a player uses:
//! set city production, move units, attack, found cities. Two synchronous
//! phases: production decisions for idle cities, then one action per unit.

use crate::city::CityId;
use crate::hex::Hex;
use crate::nation::NationId;
use crate::terrain::Terrain;
use crate::unit::UnitId;
use crate::units::UnitKind;
use crate::world::{World, MIN_CITY_SPACING};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// SCORING CONSTANTS
// ============================================================================

/// Settlement bonuses for the two most fertile terrain kinds
const GRASSLAND_BONUS: f64 = 5.0;
const PLAINS_BONUS: f64 = 3.0;

/// Warrior movement scoring
const UNOWNED_BONUS: f64 = 10.0;
const OWN_TERRITORY_PENALTY: f64 = -5.0;
const ENEMY_TERRITORY_BONUS: f64 = 15.0;
const MOVE_JITTER: f64 = 3.0;

/// Expansion stops once a nation holds this many cities
const TARGET_CITY_COUNT: usize = 3;

// ============================================================================
// PERSONALITY
// ============================================================================

/// Scalar biases parameterizing the scoring heuristics
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Personality {
    /// 0-1: tendency to attack
    pub aggression: f64,
    /// 0-1: tendency to expand territory
    pub expansion: f64,
    /// 0-1: tendency to build military
    pub defense: f64,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            aggression: 0.5,
            expansion: 0.7,
            defense: 0.6,
        }
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Heuristic controller for one nation
pub struct AiController {
    nation: NationId,
    personality: Personality,
    rng: ChaCha8Rng,
}

impl AiController {
    pub fn new(nation: NationId) -> Self {
        Self::with_seed(nation, 42)
    }

    pub fn with_seed(nation: NationId, seed: u64) -> Self {
        Self {
            nation,
            personality: Personality::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn nation(&self) -> NationId {
        self.nation
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    /// Run one full turn for the nation: production first, then units
    pub fn take_turn(&mut self, world: &mut World) {
        self.decide_production(world);
        self.command_units(world);
    }

    // ========================================================================
    // PRODUCTION PHASE
    // ========================================================================

    fn decide_production(&mut self, world: &mut World) {
        let idle: Vec<CityId> = world
            .cities_of(self.nation)
            .filter(|city| city.current_production().is_none())
            .map(|city| city.id)
            .collect();
        if idle.is_empty() {
            return;
        }

        let city_count = world.nation(self.nation).cities().len();
        let warriors = self.count_units(world, UnitKind::Warrior);
        let settlers = self.count_units(world, UnitKind::Settler);

        for city_id in idle {
            let choice = self.choose_production(city_count, warriors, settlers);
            if let Some(city) = world.city_mut(city_id) {
                city.set_production(choice);
            }
        }
    }

    fn choose_production(&self, city_count: usize, warriors: usize, settlers: usize) -> UnitKind {
        // Few cities and nobody out settling: expand
        if city_count < TARGET_CITY_COUNT && settlers == 0 && self.personality.expansion > 0.5 {
            return UnitKind::Settler;
        }
        // Fewer warriors than cities: build military
        if warriors < city_count && self.personality.defense > 0.4 {
            return UnitKind::Warrior;
        }
        UnitKind::Warrior
    }

    fn count_units(&self, world: &World, kind: UnitKind) -> usize {
        world.units_of(self.nation).filter(|u| u.kind == kind).count()
    }

    // ========================================================================
    // UNIT PHASE
    // ========================================================================

    fn command_units(&mut self, world: &mut World) {
        // Snapshot the roster: founding and kills mutate it mid-phase
        let roster: Vec<UnitId> = world.nation(self.nation).units().to_vec();

        for id in roster {
            let Some(unit) = world.unit(id) else {
                continue;
            };
            if !unit.can_move() {
                continue;
            }
            if unit.founds_city() {
                self.command_settler(world, id);
            } else if unit.strength() > 0 {
                self.command_warrior(world, id);
            }
        }
    }

    fn command_settler(&mut self, world: &mut World, id: UnitId) {
        let Some(unit) = world.unit(id) else {
            return;
        };
        let pos = unit.position();

        if self.is_good_city_site(world, pos) {
            let _ = world.found_city(id);
            return;
        }
        if let Some(dest) = self.best_settler_step(world, id) {
            world.move_unit(id, dest);
        }
    }

    /// Fertile land far enough from every existing city of this nation
    fn is_good_city_site(&self, world: &World, hex: Hex) -> bool {
        let Some(tile) = world.tile(hex) else {
            return false;
        };
        if !matches!(tile.terrain, Terrain::Grassland | Terrain::Plains) {
            return false;
        }
        world
            .cities_of(self.nation)
            .all(|city| hex.axial_distance(city.position()) >= MIN_CITY_SPACING)
    }

    /// Step toward open land: prefer hexes far from every existing city,
    /// with a bonus for fertile terrain. First-seen wins ties.
    fn best_settler_step(&self, world: &World, id: UnitId) -> Option<Hex> {
        let unit = world.unit(id)?;
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;

        for neighbor in unit.position().neighbors() {
            let Some(tile) = world.tile(neighbor) else {
                continue;
            };
            if !tile.terrain.is_passable() {
                continue;
            }
            if unit.movement() < tile.terrain.movement_cost() {
                continue;
            }

            let mut score = 0.0;
            for city in world.cities_of(self.nation) {
                score += f64::from(neighbor.axial_distance(city.position()));
            }
            score += match tile.terrain {
                Terrain::Grassland => GRASSLAND_BONUS,
                Terrain::Plains => PLAINS_BONUS,
                _ => 0.0,
            };

            if score > best_score {
                best_score = score;
                best = Some(neighbor);
            }
        }
        best
    }

    fn command_warrior(&mut self, world: &mut World, id: UnitId) {
        let Some(unit) = world.unit(id) else {
            return;
        };
        let pos = unit.position();

        if let Some(target) = self.first_adjacent_enemy(world, pos) {
            if unit.can_attack() {
                world.attack(id, target, &mut self.rng);
                return;
            }
        }
        if let Some(dest) = self.best_warrior_step(world, id) {
            world.move_unit(id, dest);
        }
    }

    /// First enemy unit in neighbor enumeration order; no prioritization
    fn first_adjacent_enemy(&self, world: &World, pos: Hex) -> Option<UnitId> {
        for neighbor in pos.neighbors() {
            let Some(tile) = world.tile(neighbor) else {
                continue;
            };
            for &unit_id in tile.units() {
                if let Some(unit) = world.unit(unit_id) {
                    if unit.owner != self.nation {
                        return Some(unit_id);
                    }
                }
            }
        }
        None
    }

    /// Push outward: unowned land beats home territory, enemy territory
    /// scales with aggression, jitter breaks ties
    fn best_warrior_step(&mut self, world: &World, id: UnitId) -> Option<Hex> {
        let unit = world.unit(id)?;
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;

        for neighbor in unit.position().neighbors() {
            let Some(tile) = world.tile(neighbor) else {
                continue;
            };
            if !tile.terrain.is_passable() {
                continue;
            }
            if unit.movement() < tile.terrain.movement_cost() {
                continue;
            }

            let mut score = 0.0;
            match tile.owner() {
                None => score += UNOWNED_BONUS,
                Some(owner) if owner == self.nation => score += OWN_TERRITORY_PENALTY,
                Some(_) => score += ENEMY_TERRITORY_BONUS * self.personality.aggression,
            }
            score += self.rng.gen::<f64>() * MOVE_JITTER;

            if score > best_score {
                best_score = score;
                best = Some(neighbor);
            }
        }
        best
    }
}
