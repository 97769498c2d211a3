//! HEXREIGN Core - turn-based hex strategy simulation
//!
//! This crate provides the simulation core:
//! - Hex grid geometry (flat-top axial coordinates, rotated pixel mapping)
//! - Terrain, yield, and unit catalogs
//! - The entity model: nations, cities, and units over a coordinate-indexed
//!   tile map
//! - Turn sequencing and end-of-game detection
//! - Stateless combat resolution
//! - A heuristic AI controller that plays with the same commands a player
//!   uses
//!
//! Rendering, input, and UI are external collaborators: they read the query
//! surface and drive the command surface, and never touch the tile index
//! directly.

pub mod ai;
pub mod city;
pub mod combat;
pub mod hex;
pub mod nation;
pub mod resources;
pub mod scenario;
pub mod state;
pub mod terrain;
pub mod unit;
pub mod units;
pub mod world;

// Re-exports for convenient access
pub use ai::{AiController, Personality};
pub use city::{City, CityId};
pub use combat::AttackOutcome;
pub use hex::{hex_corners, hex_to_pixel, pixel_to_hex, Hex, DIRECTIONS, MAP_ROTATION};
pub use nation::{Age, Nation, NationId};
pub use resources::{Ledger, Resource};
pub use scenario::{NationSetup, Scenario};
pub use state::{GameState, Phase};
pub use terrain::{Terrain, Yield, IMPASSABLE_COST};
pub use unit::{Unit, UnitId};
pub use units::{UnitKind, UnitSpec, UnknownUnitType, UNIT_SPECS};
pub use world::{ProductionCompletion, Tile, World, MIN_CITY_SPACING};
