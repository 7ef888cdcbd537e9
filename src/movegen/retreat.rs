//! Retreat destinations and advance-after-combat candidates.

use crate::board::{AttackTarget, GameState, Side, Space, UnitId};
use crate::config::Rules;

/// Spaces a defender forced to retreat from `from` may move to.
///
/// Forts never retreat. A destination must be adjacent, free of hostile
/// pieces, and below the stacking limit.
pub fn retreat_destinations(state: &GameState, unit: UnitId, from: Space) -> Vec<Space> {
    let Some(side) = unit.side() else {
        return Vec::new();
    };
    if !unit.is_combat_unit() {
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

/// Returns true if nothing but chits remains at `space`.
pub fn is_vacated(state: &GameState, space: Space) -> bool {
    state.units_at(space).all(|u| u.is_chit())
}

/// Attackers of `side` entitled to advance into the vacated `space`.
///
/// A unit qualifies if it declared an attack this phase against something
/// standing in `space` at declaration time, and it is still adjacent to
/// `space` now.
pub fn advance_candidates(state: &GameState, side: Side, space: Space) -> Vec<UnitId> {
    if state.enemy_occupied(space, side) {
        return Vec::new();
    }
    if state.stack_count(space) >= Rules::STACKING_LIMIT {
        return Vec::new();
    }

    let graph = crate::board::standard();
    let mut candidates: Vec<UnitId> = Vec::new();
    for attack in &state.attacks {
        let targeted_here = match attack.target {
            AttackTarget::Unit(_) => attack.target_space == space,
            AttackTarget::Space(s) => s == space,
        };
        if !targeted_here || attack.attacker.side() != Some(side) {
            continue;
        }
        let Some(at) = state.space_of(attack.attacker) else {
            continue;
        };
        if graph.is_adjacent(at, space) && !candidates.contains(&attack.attacker) {
            candidates.push(attack.attacker);
        }
    }
    candidates
}
