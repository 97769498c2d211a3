//! Game state and turn sequencing

use crate::nation::{Nation, NationId};
use crate::world::{ProductionCompletion, World};
use serde::{Deserialize, Serialize};

/// Game lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Playing,
    Ended,
}

/// Top-level game state: the world plus turn sequencing.
/// The state is always "nation at the active index is acting".
#[derive(Clone, Debug)]
pub struct GameState {
    world: World,
    turn: u32,
    active: usize,
    phase: Phase,
}

impl GameState {
    pub fn new(world: World) -> Self {
        Self {
            world,
            turn: 1,
            active: 0,
            phase: Phase::Setup,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn nations(&self) -> &[Nation] {
        self.world.nations()
    }

    pub fn current_nation_id(&self) -> NationId {
        self.world.nations()[self.active].id
    }

    pub fn current_nation(&self) -> &Nation {
        &self.world.nations()[self.active]
    }

    /// Advance the active index; wrapping past the last nation starts a new
    /// global turn
    pub fn next_nation(&mut self) {
        self.active += 1;
        if self.active >= self.world.nations().len() {
            self.active = 0;
            self.turn += 1;
        }
    }

    /// Process the active nation's upkeep, then advance to the next nation.
    /// Returns the production completions for the caller to instantiate.
    pub fn next_turn(&mut self) -> Vec<ProductionCompletion> {
        if self.world.nations().is_empty() {
            return Vec::new();
        }
        let active = self.current_nation_id();
        let completions = self.world.process_nation_turn(active);
        self.next_nation();
        completions
    }

    /// True once at most one nation still holds a city. The engine does not
    /// self-halt; the caller decides when to stop driving.
    pub fn is_game_over(&self) -> bool {
        let settled = self
            .world
            .nations()
            .iter()
            .filter(|nation| !nation.cities().is_empty())
            .count();
        settled <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Hex;
    use crate::terrain::Terrain;
    use crate::units::UnitKind;

    fn two_nation_state() -> GameState {
        let mut world = World::new();
        for r in 0..12 {
            for q in 0..12 {
                world.insert_tile(Hex::new(q, r), Terrain::Grassland);
            }
        }
        world.add_nation("Red", "#cc2222");
        world.add_nation("Blue", "#2222cc");
        GameState::new(world)
    }

    fn found_at(state: &mut GameState, nation_index: usize, hex: Hex) {
        let nation = state.nations()[nation_index].id;
        let settler = state
            .world_mut()
            .spawn_unit(UnitKind::Settler, hex, nation)
            .unwrap();
        state.world_mut().found_city(settler).unwrap();
    }

    #[test]
    fn test_nation_rotation_and_turn_counter() {
        let mut state = two_nation_state();
        assert_eq!(state.turn(), 1);
        assert_eq!(state.current_nation().name, "Red");

        state.next_turn();
        assert_eq!(state.turn(), 1);
        assert_eq!(state.current_nation().name, "Blue");

        state.next_turn();
        assert_eq!(state.turn(), 2);
        assert_eq!(state.current_nation().name, "Red");
    }

    #[test]
    fn test_next_turn_processes_active_nation_only() {
        let mut state = two_nation_state();
        found_at(&mut state, 0, Hex::new(2, 2));
        found_at(&mut state, 1, Hex::new(8, 8));

        state.next_turn(); // Red
        let red = &state.nations()[0];
        let blue = &state.nations()[1];
        assert!(red.resources().amount(crate::resources::Resource::Food) > 0);
        assert_eq!(blue.resources().amount(crate::resources::Resource::Food), 0);
    }

    #[test]
    fn test_game_over_threshold() {
        let mut state = two_nation_state();
        // Nobody settled yet: not more than one nation holds a city
        assert!(state.is_game_over());

        found_at(&mut state, 0, Hex::new(2, 2));
        assert!(state.is_game_over());

        found_at(&mut state, 1, Hex::new(8, 8));
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_phase_tag() {
        let mut state = two_nation_state();
        assert_eq!(state.phase(), Phase::Setup);
        state.set_phase(Phase::Playing);
        assert_eq!(state.phase(), Phase::Playing);
        state.set_phase(Phase::Ended);
        assert_eq!(state.phase(), Phase::Ended);
    }
}
