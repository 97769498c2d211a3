//! Cities and their production queues

use crate::hex::Hex;
use crate::nation::NationId;
use crate::units::UnitKind;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Identifies a city in the world arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub u32);

/// A city: fixed position, population, production queue, claimed borders
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub owner: NationId,
    pos: Hex,
    population: u32,
    queue: VecDeque<UnitKind>,
    current: Option<UnitKind>,
    progress: u32,
    borders: Vec<Hex>,
    buildings: Vec<String>,
}

impl City {
    pub fn new(id: CityId, name: String, pos: Hex, owner: NationId) -> Self {
        Self {
            id,
            name,
            owner,
            pos,
            population: 1,
            queue: VecDeque::new(),
            current: None,
            progress: 0,
            borders: Vec::new(),
            buildings: Vec::new(),
        }
    }

    pub fn position(&self) -> Hex {
        self.pos
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    /// Raw population increment; there is no starvation or consumption model
    pub fn grow_population(&mut self, amount: u32) {
        self.population += amount;
    }

    pub fn current_production(&self) -> Option<UnitKind> {
        self.current
    }

    /// Production points accumulated toward the current item
    pub fn production_progress(&self) -> u32 {
        self.progress
    }

    pub fn production_queue(&self) -> impl Iterator<Item = UnitKind> + '_ {
        self.queue.iter().copied()
    }

    /// Set the current production item directly, resetting progress
    pub fn set_production(&mut self, kind: UnitKind) {
        self.current = Some(kind);
        self.progress = 0;
    }

    /// Append an item to the FIFO production queue
    pub fn queue_production(&mut self, kind: UnitKind) {
        self.queue.push_back(kind);
    }

    /// Accrue production points.
    ///
    /// Pulls the next queued item when idle (no-op when the queue is empty),
    /// then accrues. On reaching the catalog cost the item completes:
    /// progress resets, the next queued item becomes current (its accrual
    /// starts on the next call), and the completed kind is returned for the
    /// caller to instantiate.
    pub fn add_production(&mut self, amount: u32) -> Option<UnitKind> {
        if self.current.is_none() {
            self.current = self.queue.pop_front();
        }
        let current = self.current?;
        self.progress += amount;
        if self.progress >= current.spec().cost {
            self.progress = 0;
            self.current = self.queue.pop_front();
            return Some(current);
        }
        None
    }

    /// Border hexes this city claims
    pub fn borders(&self) -> &[Hex] {
        &self.borders
    }

    /// Append hexes not already claimed; idempotent
    pub fn expand_borders(&mut self, hexes: impl IntoIterator<Item = Hex>) {
        for hex in hexes {
            if !self.borders.contains(&hex) {
                self.borders.push(hex);
            }
        }
    }

    pub fn buildings(&self) -> &[String] {
        &self.buildings
    }

    pub fn has_building(&self, building: &str) -> bool {
        self.buildings.iter().any(|b| b == building)
    }

    pub fn add_building(&mut self, building: impl Into<String>) {
        let building = building.into();
        if !self.has_building(&building) {
            self.buildings.push(building);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> City {
        City::new(CityId(0), "Red City 1".to_string(), Hex::new(5, 5), NationId(0))
    }

    #[test]
    fn test_queue_pull_complete_advance() {
        let mut city = city();
        city.queue_production(UnitKind::Warrior);
        city.queue_production(UnitKind::Settler);
        assert_eq!(city.current_production(), None);

        // First call pulls WARRIOR from the queue and starts accruing
        assert_eq!(city.add_production(10), None);
        assert_eq!(city.current_production(), Some(UnitKind::Warrior));
        assert_eq!(city.production_progress(), 10);

        assert_eq!(city.add_production(10), None);
        // 30 >= warrior cost: completes, SETTLER becomes current at 0
        assert_eq!(city.add_production(10), Some(UnitKind::Warrior));
        assert_eq!(city.current_production(), Some(UnitKind::Settler));
        assert_eq!(city.production_progress(), 0);
    }

    #[test]
    fn test_add_production_idle_empty_queue() {
        let mut city = city();
        assert_eq!(city.add_production(100), None);
        assert_eq!(city.current_production(), None);
        assert_eq!(city.production_progress(), 0);
    }

    #[test]
    fn test_set_production_resets_progress() {
        let mut city = city();
        city.set_production(UnitKind::Warrior);
        assert_eq!(city.add_production(10), None);
        assert_eq!(city.production_progress(), 10);
        city.set_production(UnitKind::Settler);
        assert_eq!(city.production_progress(), 0);
        assert_eq!(city.current_production(), Some(UnitKind::Settler));
    }

    #[test]
    fn test_overshoot_completes() {
        let mut city = city();
        city.set_production(UnitKind::Warrior);
        assert_eq!(city.add_production(45), Some(UnitKind::Warrior));
        assert_eq!(city.current_production(), None);
        assert_eq!(city.production_progress(), 0);
    }

    #[test]
    fn test_expand_borders_idempotent() {
        let mut city = city();
        let hexes = [Hex::new(5, 5), Hex::new(6, 5), Hex::new(5, 6)];
        city.expand_borders(hexes);
        city.expand_borders(hexes);
        assert_eq!(city.borders(), &hexes);
    }

    #[test]
    fn test_buildings_are_a_set() {
        let mut city = city();
        city.add_building("Granary");
        city.add_building("Granary");
        assert_eq!(city.buildings().len(), 1);
        assert!(city.has_building("Granary"));
        assert!(!city.has_building("Walls"));
    }
}
