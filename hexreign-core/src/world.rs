//! World arenas and the coordinate-indexed tile map
//!
//! `World` owns the nation, unit, and city arenas plus the hex -> tile
//! index. Unit positions (with the nation rosters) are the source of truth;
//! the tile index mirrors them. Every mutation that touches both an entity
//! and the index lives here so the two can never drift apart.

use crate::city::{City, CityId};
use crate::combat::AttackOutcome;
use crate::hex::Hex;
use crate::nation::{Nation, NationId};
use crate::resources::Resource;
use crate::terrain::Terrain;
use crate::unit::{Unit, UnitId};
use crate::units::UnitKind;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Minimum axial distance between two cities of the same nation
pub const MIN_CITY_SPACING: i32 = 4;

/// One hex of the map with its spatial index entries
#[derive(Clone, Debug)]
pub struct Tile {
    pub terrain: Terrain,
    owner: Option<NationId>,
    improvements: Vec<String>,
    units: Vec<UnitId>,
    city: Option<CityId>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            owner: None,
            improvements: Vec::new(),
            units: Vec::new(),
            city: None,
        }
    }

    pub fn owner(&self) -> Option<NationId> {
        self.owner
    }

    pub fn is_owned_by(&self, nation: NationId) -> bool {
        self.owner == Some(nation)
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    pub fn city(&self) -> Option<CityId> {
        self.city
    }

    pub fn has_city(&self) -> bool {
        self.city.is_some()
    }

    pub fn improvements(&self) -> &[String] {
        &self.improvements
    }

    pub fn has_improvement(&self, tag: &str) -> bool {
        self.improvements.iter().any(|i| i == tag)
    }

    pub fn add_improvement(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.has_improvement(&tag) {
            self.improvements.push(tag);
        }
    }

    pub(crate) fn set_owner(&mut self, nation: NationId) {
        self.owner = Some(nation);
    }

    /// Place a city; also claims the tile for the city's owner
    pub(crate) fn set_city(&mut self, city: CityId, owner: NationId) {
        self.city = Some(city);
        self.owner = Some(owner);
    }

    pub(crate) fn add_unit(&mut self, unit: UnitId) {
        if !self.units.contains(&unit) {
            self.units.push(unit);
        }
    }

    pub(crate) fn remove_unit(&mut self, unit: UnitId) {
        self.units.retain(|&u| u != unit);
    }
}

/// A unit a city finished this turn. The driving layer decides what to
/// instantiate from it, via [`World::spawn_unit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompletion {
    pub city: CityId,
    pub kind: UnitKind,
}

/// The mutable world: entity arenas plus the tile index
#[derive(Clone, Debug, Default)]
pub struct World {
    tiles: FxHashMap<Hex, Tile>,
    nations: Vec<Nation>,
    units: FxHashMap<UnitId, Unit>,
    cities: FxHashMap<CityId, City>,
    next_unit: u32,
    next_city: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // SETUP
    // ========================================================================

    /// Insert a tile. Terrain comes from the world-generation collaborator;
    /// the index must be fully built before units are placed.
    pub fn insert_tile(&mut self, hex: Hex, terrain: Terrain) {
        self.tiles.insert(hex, Tile::new(terrain));
    }

    pub fn add_nation(&mut self, name: impl Into<String>, color: impl Into<String>) -> NationId {
        let id = NationId(self.nations.len() as u32);
        self.nations.push(Nation::new(id, name.into(), color.into()));
        id
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn tile(&self, hex: Hex) -> Option<&Tile> {
        self.tiles.get(&hex)
    }

    pub fn has_tile(&self, hex: Hex) -> bool {
        self.tiles.contains_key(&hex)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Hex, &Tile)> {
        self.tiles.iter().map(|(&hex, tile)| (hex, tile))
    }

    pub fn nations(&self) -> &[Nation] {
        &self.nations
    }

    pub fn nation(&self, id: NationId) -> &Nation {
        &self.nations[id.index()]
    }

    pub fn nation_mut(&mut self, id: NationId) -> &mut Nation {
        &mut self.nations[id.index()]
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn city_mut(&mut self, id: CityId) -> Option<&mut City> {
        self.cities.get_mut(&id)
    }

    /// Units of one nation, in roster order
    pub fn units_of(&self, nation: NationId) -> impl Iterator<Item = &Unit> {
        self.nations[nation.index()]
            .units()
            .iter()
            .filter_map(|id| self.units.get(id))
    }

    /// Cities of one nation, in founding order
    pub fn cities_of(&self, nation: NationId) -> impl Iterator<Item = &City> {
        self.nations[nation.index()]
            .cities()
            .iter()
            .filter_map(|id| self.cities.get(id))
    }

    // ========================================================================
    // MUTATIONS (the only paths that touch the tile index)
    // ========================================================================

    /// Create a unit and insert it into roster and tile index.
    /// Refuses when no tile exists at `pos`.
    pub fn spawn_unit(&mut self, kind: UnitKind, pos: Hex, owner: NationId) -> Option<UnitId> {
        let tile = self.tiles.get_mut(&pos)?;
        let id = UnitId(self.next_unit);
        self.next_unit += 1;
        tile.add_unit(id);
        self.units.insert(id, Unit::new(id, kind, owner, pos));
        self.nations[owner.index()].add_unit(id);
        Some(id)
    }

    /// Remove a unit from arena, roster, and tile index
    pub fn remove_unit(&mut self, id: UnitId) {
        let Some(unit) = self.units.remove(&id) else {
            return;
        };
        if let Some(tile) = self.tiles.get_mut(&unit.position()) {
            tile.remove_unit(id);
        }
        self.nations[unit.owner.index()].remove_unit(id);
    }

    /// Move a unit one tile, charging the destination terrain's movement
    /// cost. Refuses on missing or impassable tiles and on insufficient
    /// movement points; a refused move changes nothing.
    pub fn move_unit(&mut self, id: UnitId, dest: Hex) -> bool {
        let Some(tile) = self.tiles.get(&dest) else {
            return false;
        };
        if !tile.terrain.is_passable() {
            return false;
        }
        let cost = tile.terrain.movement_cost();
        let Some(unit) = self.units.get_mut(&id) else {
            return false;
        };
        let from = unit.position();
        if !unit.move_to(dest, cost) {
            return false;
        }
        if let Some(old) = self.tiles.get_mut(&from) {
            old.remove_unit(id);
        }
        if let Some(new) = self.tiles.get_mut(&dest) {
            new.add_unit(id);
        }
        true
    }

    /// Resolve an attack. Adjacency is the caller's guard, like movement
    /// validity. A destroyed target is removed from roster and tile.
    pub fn attack<R: Rng>(&mut self, attacker: UnitId, target: UnitId, rng: &mut R) -> AttackOutcome {
        if attacker == target {
            return AttackOutcome::refused();
        }
        let Some(mut unit) = self.units.remove(&attacker) else {
            return AttackOutcome::refused();
        };
        let outcome = match self.units.get_mut(&target) {
            Some(victim) => unit.attack(victim, rng),
            None => AttackOutcome::refused(),
        };
        self.units.insert(attacker, unit);
        if outcome.target_destroyed {
            self.remove_unit(target);
        }
        outcome
    }

    /// Found a city at a settler's position, consuming the settler.
    ///
    /// Refuses (returning None, changing nothing) unless the unit can found
    /// cities, the site is neither ocean nor mountain, and the site is at
    /// least [`MIN_CITY_SPACING`] axial distance from every existing city of
    /// the settler's nation. On success the city claims its site plus the
    /// six neighbors.
    pub fn found_city(&mut self, settler: UnitId) -> Option<CityId> {
        let unit = self.units.get(&settler)?;
        if !unit.founds_city() {
            return None;
        }
        let site = unit.position();
        let owner = unit.owner;

        let terrain = self.tiles.get(&site)?.terrain;
        if matches!(terrain, Terrain::Ocean | Terrain::Mountain) {
            return None;
        }
        for city in self.cities_of(owner) {
            if site.axial_distance(city.position()) < MIN_CITY_SPACING {
                return None;
            }
        }

        let id = CityId(self.next_city);
        self.next_city += 1;

        let nation = &mut self.nations[owner.index()];
        let name = format!("{} City {}", nation.name, nation.cities().len() + 1);
        nation.add_city(id);

        let mut city = City::new(id, name, site, owner);
        let mut claimed = vec![site];
        claimed.extend(site.neighbors());
        city.expand_borders(claimed.iter().copied());

        for &hex in &claimed {
            if let Some(tile) = self.tiles.get_mut(&hex) {
                tile.set_owner(owner);
            }
        }
        if let Some(tile) = self.tiles.get_mut(&site) {
            tile.set_city(id, owner);
        }
        self.cities.insert(id, city);
        self.remove_unit(settler);
        Some(id)
    }

    /// Per-nation upkeep, run exactly once per nation per turn.
    ///
    /// For each owned city: food/production/gold equal to the population,
    /// then the yield of every border hex this nation owns, then production
    /// accrual equal to the population. After all cities, every owned unit
    /// gets its movement back. Returns the production completions for the
    /// driving layer to instantiate.
    pub fn process_nation_turn(&mut self, nation: NationId) -> Vec<ProductionCompletion> {
        let mut completions = Vec::new();

        let city_ids: Vec<CityId> = self.nations[nation.index()].cities().to_vec();
        for city_id in city_ids {
            let Some(city) = self.cities.get_mut(&city_id) else {
                continue;
            };
            let population = city.population();

            let ledger = self.nations[nation.index()].resources_mut();
            ledger.add(Resource::Food, population);
            ledger.add(Resource::Production, population);
            ledger.add(Resource::Gold, population);

            for &hex in city.borders() {
                let Some(tile) = self.tiles.get(&hex) else {
                    continue;
                };
                if !tile.is_owned_by(nation) {
                    continue;
                }
                let yields = tile.terrain.yields();
                let ledger = self.nations[nation.index()].resources_mut();
                ledger.add(Resource::Food, yields.food);
                ledger.add(Resource::Production, yields.production);
                ledger.add(Resource::Gold, yields.gold);
            }

            if let Some(kind) = city.add_production(population) {
                completions.push(ProductionCompletion { city: city_id, kind });
            }
        }

        let unit_ids: Vec<UnitId> = self.nations[nation.index()].units().to_vec();
        for id in unit_ids {
            if let Some(unit) = self.units.get_mut(&id) {
                unit.reset_movement();
            }
        }

        completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Flat grassland world with two nations
    fn grassland_world(width: i32, height: i32) -> (World, NationId, NationId) {
        let mut world = World::new();
        for r in 0..height {
            for q in 0..width {
                world.insert_tile(Hex::new(q, r), Terrain::Grassland);
            }
        }
        let red = world.add_nation("Red", "#cc2222");
        let blue = world.add_nation("Blue", "#2222cc");
        (world, red, blue)
    }

    /// Every tile's unit list mirrors the units' positions and vice versa
    fn assert_index_consistent(world: &World) {
        for (hex, tile) in world.tiles() {
            for &id in tile.units() {
                let unit = world.unit(id).expect("tile lists a dead unit");
                assert_eq!(unit.position(), hex, "tile/unit position mismatch");
            }
        }
        for nation in world.nations() {
            for &id in nation.units() {
                let unit = world.unit(id).expect("roster lists a dead unit");
                let tile = world.tile(unit.position()).expect("unit off the map");
                assert!(tile.units().contains(&id), "unit missing from its tile");
            }
        }
    }

    #[test]
    fn test_spawn_and_move_keep_index_consistent() {
        let (mut world, red, _) = grassland_world(8, 8);
        let id = world.spawn_unit(UnitKind::Warrior, Hex::new(2, 2), red).unwrap();
        assert_index_consistent(&world);

        assert!(world.move_unit(id, Hex::new(3, 2)));
        assert!(world.tile(Hex::new(2, 2)).unwrap().units().is_empty());
        assert_eq!(world.tile(Hex::new(3, 2)).unwrap().units(), &[id]);
        assert_index_consistent(&world);

        // Second step exhausts movement; a third refuses and changes nothing
        assert!(world.move_unit(id, Hex::new(3, 3)));
        assert!(!world.move_unit(id, Hex::new(4, 3)));
        assert_eq!(world.unit(id).unwrap().position(), Hex::new(3, 3));
        assert_index_consistent(&world);
    }

    #[test]
    fn test_move_refuses_impassable_and_missing() {
        let (mut world, red, _) = grassland_world(4, 4);
        world.insert_tile(Hex::new(1, 0), Terrain::Ocean);
        let id = world.spawn_unit(UnitKind::Warrior, Hex::new(0, 0), red).unwrap();
        assert!(!world.move_unit(id, Hex::new(1, 0)));
        assert!(!world.move_unit(id, Hex::new(-1, 0)));
        assert_eq!(world.unit(id).unwrap().position(), Hex::new(0, 0));
        assert_eq!(world.unit(id).unwrap().movement(), 2);
    }

    #[test]
    fn test_spawn_refuses_off_map() {
        let (mut world, red, _) = grassland_world(2, 2);
        assert!(world.spawn_unit(UnitKind::Warrior, Hex::new(9, 9), red).is_none());
    }

    #[test]
    fn test_attack_kill_removes_everywhere() {
        let (mut world, red, blue) = grassland_world(4, 4);
        let attacker = world.spawn_unit(UnitKind::Warrior, Hex::new(0, 0), red).unwrap();
        let target = world.spawn_unit(UnitKind::Warrior, Hex::new(1, 0), blue).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut rounds = 0;
        loop {
            let outcome = world.attack(attacker, target, &mut rng);
            assert!(outcome.success);
            if outcome.target_destroyed {
                break;
            }
            world.process_nation_turn(red); // clears the acted flag
            rounds += 1;
            assert!(rounds < 100, "target never died");
        }

        assert!(world.unit(target).is_none());
        assert!(world.tile(Hex::new(1, 0)).unwrap().units().is_empty());
        assert!(world.nation(blue).units().is_empty());
        assert_index_consistent(&world);
    }

    #[test]
    fn test_attack_refused_after_acting() {
        let (mut world, red, blue) = grassland_world(4, 4);
        let attacker = world.spawn_unit(UnitKind::Warrior, Hex::new(0, 0), red).unwrap();
        let target = world.spawn_unit(UnitKind::Warrior, Hex::new(1, 0), blue).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert!(world.attack(attacker, target, &mut rng).success);
        let outcome = world.attack(attacker, target, &mut rng);
        assert!(!outcome.success);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_found_city_claims_borders_and_consumes_settler() {
        let (mut world, red, _) = grassland_world(8, 8);
        let settler = world.spawn_unit(UnitKind::Settler, Hex::new(4, 4), red).unwrap();

        let city_id = world.found_city(settler).expect("founding failed");
        let city = world.city(city_id).unwrap();
        assert_eq!(city.name, "Red City 1");
        assert_eq!(city.position(), Hex::new(4, 4));
        assert_eq!(city.borders().len(), 7);

        let site = world.tile(Hex::new(4, 4)).unwrap();
        assert_eq!(site.city(), Some(city_id));
        assert!(site.is_owned_by(red));
        for neighbor in Hex::new(4, 4).neighbors() {
            assert!(world.tile(neighbor).unwrap().is_owned_by(red));
        }

        assert!(world.unit(settler).is_none());
        assert_eq!(world.nation(red).cities(), &[city_id]);
        assert_index_consistent(&world);
    }

    #[test]
    fn test_found_city_min_spacing() {
        let (mut world, red, _) = grassland_world(12, 12);
        let first = world.spawn_unit(UnitKind::Settler, Hex::new(5, 8), red).unwrap();
        world.found_city(first).unwrap();

        // |dq| + |dr| = 3 < 4: refused, nothing changes
        let second = world.spawn_unit(UnitKind::Settler, Hex::new(5, 5), red).unwrap();
        assert!(world.found_city(second).is_none());
        assert_eq!(world.nation(red).cities().len(), 1);
        assert!(world.unit(second).is_some());

        // Distance 4 is allowed
        let third = world.spawn_unit(UnitKind::Settler, Hex::new(5, 4), red).unwrap();
        assert!(world.found_city(third).is_some());
        assert_eq!(world.nation(red).cities().len(), 2);
    }

    #[test]
    fn test_found_city_refuses_bad_terrain_and_non_settlers() {
        let (mut world, red, _) = grassland_world(6, 6);
        world.insert_tile(Hex::new(0, 0), Terrain::Mountain);
        let settler = world.spawn_unit(UnitKind::Settler, Hex::new(0, 0), red).unwrap();
        assert!(world.found_city(settler).is_none());
        assert!(world.unit(settler).is_some());

        let warrior = world.spawn_unit(UnitKind::Warrior, Hex::new(3, 3), red).unwrap();
        assert!(world.found_city(warrior).is_none());
    }

    #[test]
    fn test_process_nation_turn_yields_and_production() {
        let (mut world, red, _) = grassland_world(8, 8);
        let settler = world.spawn_unit(UnitKind::Settler, Hex::new(4, 4), red).unwrap();
        let city_id = world.found_city(settler).unwrap();
        world.city_mut(city_id).unwrap().set_production(UnitKind::Warrior);

        let completions = world.process_nation_turn(red);
        assert!(completions.is_empty());

        // Population 1 plus 7 grassland border hexes at 2 food each
        let ledger = world.nation(red).resources();
        assert_eq!(ledger.amount(Resource::Food), 1 + 14);
        assert_eq!(ledger.amount(Resource::Production), 1);
        assert_eq!(ledger.amount(Resource::Gold), 1);
        assert_eq!(world.city(city_id).unwrap().production_progress(), 1);
    }

    #[test]
    fn test_process_nation_turn_resets_units() {
        let (mut world, red, _) = grassland_world(6, 6);
        let id = world.spawn_unit(UnitKind::Warrior, Hex::new(1, 1), red).unwrap();
        assert!(world.move_unit(id, Hex::new(2, 1)));
        assert!(world.move_unit(id, Hex::new(3, 1)));
        assert!(!world.unit(id).unwrap().can_move());

        world.process_nation_turn(red);
        let unit = world.unit(id).unwrap();
        assert_eq!(unit.movement(), unit.max_movement());
        assert!(unit.can_move());
    }

    #[test]
    fn test_production_completion_surfaces_to_caller() {
        let (mut world, red, _) = grassland_world(10, 10);
        let settler = world.spawn_unit(UnitKind::Settler, Hex::new(5, 5), red).unwrap();
        let city_id = world.found_city(settler).unwrap();
        world.city_mut(city_id).unwrap().set_production(UnitKind::Warrior);

        let mut completed = None;
        for _ in 0..30 {
            let completions = world.process_nation_turn(red);
            if let Some(first) = completions.first() {
                completed = Some(*first);
                break;
            }
        }
        let completion = completed.expect("warrior never completed");
        assert_eq!(completion.kind, UnitKind::Warrior);
        assert_eq!(completion.city, city_id);

        // The driving layer instantiates the unit
        let pos = world.city(city_id).unwrap().position();
        let id = world.spawn_unit(completion.kind, pos, red).unwrap();
        assert!(world.tile(pos).unwrap().units().contains(&id));
        assert_index_consistent(&world);
    }
}
