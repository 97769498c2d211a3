//! Scenario setup - world composition definition
//!
//! A scenario names the grid extent and the competing nations with their
//! starting positions and units. Terrain itself comes from the world
//! generation collaborator: `build` takes one terrain type per coordinate
//! and assembles the tile index before anything is placed on it.

use crate::hex::Hex;
use crate::state::{GameState, Phase};
use crate::terrain::Terrain;
use crate::units::UnitKind;
use crate::world::World;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Search radius around a nation's nominal start for valid land
const LANDING_SEARCH_RADIUS: i32 = 2;

/// One nation's starting setup
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NationSetup {
    pub name: String,
    pub color: String,
    pub start: Hex,
    /// Catalog unit ids; validated at build time
    pub units: Vec<String>,
}

/// World composition for a game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub nations: Vec<NationSetup>,
}

impl Scenario {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&content)?;
        Ok(scenario)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a game state, with terrain supplied per coordinate by the
    /// world-generation collaborator.
    ///
    /// Starting units land on the first valid tile within
    /// [`LANDING_SEARCH_RADIUS`] of the nominal start; a nation whose whole
    /// search area is hostile simply starts without units. An unknown unit
    /// id in the setup is a configuration error.
    pub fn build(&self, mut terrain: impl FnMut(Hex) -> Terrain) -> anyhow::Result<GameState> {
        let mut world = World::new();
        for r in 0..self.height {
            for q in 0..self.width {
                let hex = Hex::new(q, r);
                world.insert_tile(hex, terrain(hex));
            }
        }

        for setup in &self.nations {
            let kinds = setup
                .units
                .iter()
                .map(|id| UnitKind::from_id(id))
                .collect::<Result<Vec<_>, _>>()?;

            let nation = world.add_nation(setup.name.clone(), setup.color.clone());
            let Some(site) = find_landing_site(&world, setup.start) else {
                continue;
            };
            for (i, &kind) in kinds.iter().enumerate() {
                let pos = if i == 0 {
                    site
                } else {
                    site.neighbor((i - 1) as u8)
                };
                if world.has_tile(pos) {
                    world.spawn_unit(kind, pos, nation);
                }
            }
        }

        let mut state = GameState::new(world);
        state.set_phase(Phase::Playing);
        Ok(state)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "red-vs-blue".to_string(),
            width: 25,
            height: 16,
            seed: 42,
            nations: vec![
                NationSetup {
                    name: "Red".to_string(),
                    color: "#cc2222".to_string(),
                    start: Hex::new(5, 5),
                    units: vec!["SETTLER".to_string(), "WARRIOR".to_string()],
                },
                NationSetup {
                    name: "Blue".to_string(),
                    color: "#2222cc".to_string(),
                    start: Hex::new(19, 10),
                    units: vec!["SETTLER".to_string(), "WARRIOR".to_string()],
                },
            ],
        }
    }
}

/// First tile around `start` that is neither ocean, mountain, nor snow
fn find_landing_site(world: &World, start: Hex) -> Option<Hex> {
    for dq in -LANDING_SEARCH_RADIUS..=LANDING_SEARCH_RADIUS {
        for dr in -LANDING_SEARCH_RADIUS..=LANDING_SEARCH_RADIUS {
            let hex = Hex::new(start.q + dq, start.r + dr);
            let Some(tile) = world.tile(hex) else {
                continue;
            };
            if !matches!(
                tile.terrain,
                Terrain::Ocean | Terrain::Mountain | Terrain::Snow
            ) {
                return Some(hex);
            }
        }
    }
    None
}
