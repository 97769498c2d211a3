//! Nations: rosters, resources, and age/technology bookkeeping

use crate::city::CityId;
use crate::resources::{Ledger, Resource};
use crate::unit::UnitId;
use serde::{Deserialize, Serialize};

/// Identifies a nation in the world arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NationId(pub u32);

impl NationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Historical age. Progression is bookkeeping only; nothing consults it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Age {
    Ancient,
    Modern,
    Information,
}

impl Age {
    /// Next age in the progression, or None at the end
    pub fn next(self) -> Option<Age> {
        match self {
            Age::Ancient => Some(Age::Modern),
            Age::Modern => Some(Age::Information),
            Age::Information => None,
        }
    }
}

/// A player or AI nation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nation {
    pub id: NationId,
    pub name: String,
    pub color: String,
    ledger: Ledger,
    cities: Vec<CityId>,
    units: Vec<UnitId>,
    age: Age,
    technologies: Vec<String>,
}

impl Nation {
    pub fn new(id: NationId, name: String, color: String) -> Self {
        Self {
            id,
            name,
            color,
            ledger: Ledger::new(),
            cities: Vec::new(),
            units: Vec::new(),
            age: Age::Ancient,
            technologies: Vec::new(),
        }
    }

    pub fn resources(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn resources_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn add_resource(&mut self, resource: Resource, amount: u32) {
        self.ledger.add(resource, amount);
    }

    /// Spend from the ledger; refuses without mutating when insufficient
    pub fn spend_resource(&mut self, resource: Resource, amount: u32) -> bool {
        self.ledger.spend(resource, amount)
    }

    pub fn has_resource(&self, resource: Resource, amount: u32) -> bool {
        self.ledger.has(resource, amount)
    }

    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    pub(crate) fn add_city(&mut self, city: CityId) {
        if !self.cities.contains(&city) {
            self.cities.push(city);
        }
    }

    pub(crate) fn add_unit(&mut self, unit: UnitId) {
        if !self.units.contains(&unit) {
            self.units.push(unit);
        }
    }

    pub(crate) fn remove_unit(&mut self, unit: UnitId) {
        self.units.retain(|&u| u != unit);
    }

    pub fn age(&self) -> Age {
        self.age
    }

    /// Step to the next age if one exists
    pub fn advance_age(&mut self) -> bool {
        match self.age.next() {
            Some(next) => {
                self.age = next;
                true
            }
            None => false,
        }
    }

    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    pub fn has_technology(&self, tech: &str) -> bool {
        self.technologies.iter().any(|t| t == tech)
    }

    /// Record a researched technology. Name-list bookkeeping; no effects.
    pub fn research(&mut self, tech: impl Into<String>) {
        let tech = tech.into();
        if !self.has_technology(&tech) {
            self.technologies.push(tech);
        }
    }
}
