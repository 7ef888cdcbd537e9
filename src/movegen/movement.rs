//! Movement-phase move generation and stacking checks.
//!
//! A move is exactly one edge of the board graph. A unit may never enter a
//! space holding a piece hostile to its side, or one already at the stacking
//! limit. Ending movement re-checks stacking and forces eliminations if any
//! space is still over the limit.

use crate::board::{all_spaces, all_units, GameState, Side, Space, UnitId};
use crate::config::Rules;

/// Own combat units on the map with movement points left.
pub fn movable_units(state: &GameState, side: Side) -> Vec<UnitId> {
    all_units()
        .filter(|u| u.is_combat_unit() && u.side() == Some(side))
        .filter(|u| state.space_of(*u).is_some())
        .filter(|u| state.moved[u.index()] < Rules::MOVEMENT_ALLOWANCE)
        .collect()
}

/// Spaces `unit` may enter with its next movement point.
pub fn valid_moves(state: &GameState, unit: UnitId) -> Vec<Space> {
    let (Some(side), Some(from)) = (unit.side(), state.space_of(unit)) else {
        return Vec::new();
    };
    if state.moved[unit.index()] >= Rules::MOVEMENT_ALLOWANCE {
        return Vec::new();
    }
    crate::board::standard()
        .neighbors(from)
        .iter()
        .copied()
        .filter(|&to| !state.enemy_occupied(to, side))
        .filter(|&to| state.stack_count(to) < Rules::STACKING_LIMIT)
        .collect()
}

/// Map spaces holding more units than the stacking limit.
pub fn overstacked_spaces(state: &GameState) -> Vec<Space> {
    all_spaces().filter(|&s| state.is_overstacked(s)).collect()
}

/// Own combat units standing in overstacked spaces.
pub fn eliminable_units(state: &GameState, side: Side) -> Vec<UnitId> {
    let over = overstacked_spaces(state);
    all_units()
        .filter(|u| u.is_combat_unit() && u.side() == Some(side))
        .filter(|u| state.space_of(*u).is_some_and(|s| over.contains(&s)))
        .collect()
}
