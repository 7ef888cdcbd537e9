//! Setup-phase placement rules.
//!
//! Each side places its combat units inside its own setup zone, at most
//! three to a space. Soviet units additionally keep to one army per space
//! and may not set up where German units already stand.

use crate::board::{
    all_spaces, combat_units, in_german_zone, in_soviet_zone, GameState, Side, Space, UnitId,
};
use crate::config::Rules;

/// Returns the spaces where `unit` may be placed right now.
pub fn placement_spaces(state: &GameState, unit: UnitId) -> Vec<Space> {
    let Some(side) = unit.side() else {
        return Vec::new();
    };
    let current = state.space_of(unit);

    all_spaces()
        .filter(|&space| Some(space) != current)
        .filter(|&space| match side {
            Side::German => in_german_zone(space),
            Side::Soviet => in_soviet_zone(space),
        })
        .filter(|&space| !state.enemy_occupied(space, side))
        .filter(|&space| state.stack_count(space) < Rules::STACKING_LIMIT)
        .filter(|&space| side != Side::Soviet || same_army(state, unit, space))
        .collect()
}

/// Returns true if every Soviet unit at `space` shares `unit`'s army.
fn same_army(state: &GameState, unit: UnitId, space: Space) -> bool {
    let army = unit.info().army;
    state
        .units_at(space)
        .filter(|u| u.side() == Some(Side::Soviet))
        .all(|u| u.info().army == army)
}

/// Returns true once every combat unit of `side` is on the map.
pub fn all_placed(state: &GameState, side: Side) -> bool {
    combat_units(side).all(|u| state.space_of(u).is_some())
}
