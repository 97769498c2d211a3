//! Terrain types with movement cost and yield tables

use serde::{Deserialize, Serialize};

/// Movement cost marking terrain land units cannot enter
pub const IMPASSABLE_COST: u32 = 999;

/// Terrain type of a single hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Grassland,
    Plains,
    Desert,
    Tundra,
    Snow,
    Mountain,
    Ocean,
    Coast,
}

/// Per-turn resource output of a tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yield {
    pub food: u32,
    pub production: u32,
    pub gold: u32,
}

const fn yield_of(food: u32, production: u32, gold: u32) -> Yield {
    Yield { food, production, gold }
}

impl Terrain {
    pub const ALL: [Terrain; 8] = [
        Terrain::Grassland,
        Terrain::Plains,
        Terrain::Desert,
        Terrain::Tundra,
        Terrain::Snow,
        Terrain::Mountain,
        Terrain::Ocean,
        Terrain::Coast,
    ];

    /// Movement cost for land units
    pub fn movement_cost(self) -> u32 {
        match self {
            Terrain::Snow => 2,
            Terrain::Ocean | Terrain::Mountain => IMPASSABLE_COST,
            _ => 1,
        }
    }

    /// Whether land units may enter (cost below the impassable sentinel)
    pub fn is_passable(self) -> bool {
        self.movement_cost() < IMPASSABLE_COST
    }

    /// Resources a tile of this terrain generates each turn
    pub fn yields(self) -> Yield {
        match self {
            Terrain::Grassland => yield_of(2, 0, 0),
            Terrain::Plains => yield_of(1, 1, 0),
            Terrain::Desert => yield_of(0, 1, 0),
            Terrain::Tundra => yield_of(1, 0, 0),
            Terrain::Coast => yield_of(1, 0, 0),
            Terrain::Snow | Terrain::Ocean | Terrain::Mountain => yield_of(0, 0, 0),
        }
    }
}
