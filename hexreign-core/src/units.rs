//! Unit type catalog

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitKind {
    Warrior,
    Settler,
    Worker,
}

/// A unit id that matches no catalog entry. This is a configuration bug,
/// not a gameplay event.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown unit type: {0}")]
pub struct UnknownUnitType(pub String);

/// Static stats for a unit kind
#[derive(Clone, Debug)]
pub struct UnitSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub movement: u32,
    pub strength: u32,
    pub max_health: u32,
    pub cost: u32,
    pub founds_city: bool,
}

impl UnitSpec {
    const fn new(
        id: &'static str,
        name: &'static str,
        movement: u32,
        strength: u32,
        max_health: u32,
        cost: u32,
        founds_city: bool,
    ) -> Self {
        Self {
            id,
            name,
            movement,
            strength,
            max_health,
            cost,
            founds_city,
        }
    }
}

/// All unit kinds, indexed by `UnitKind as usize`
pub static UNIT_SPECS: [UnitSpec; 3] = [
    UnitSpec::new("WARRIOR", "Warrior", 2, 6, 100, 30, false),
    UnitSpec::new("SETTLER", "Settler", 2, 0, 100, 50, true),
    UnitSpec::new("WORKER", "Worker", 2, 0, 100, 40, false),
];

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Warrior, UnitKind::Settler, UnitKind::Worker];

    /// Catalog stats for this kind
    pub fn spec(self) -> &'static UnitSpec {
        &UNIT_SPECS[self as usize]
    }

    /// Validated entry point for unit ids coming from configuration.
    /// An unrecognized id is a hard error.
    pub fn from_id(id: &str) -> Result<UnitKind, UnknownUnitType> {
        UnitKind::ALL
            .into_iter()
            .find(|kind| kind.spec().id == id)
            .ok_or_else(|| UnknownUnitType(id.to_string()))
    }
}
