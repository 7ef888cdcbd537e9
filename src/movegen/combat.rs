//! Attack declaration rules.
//!
//! An attack point is a space attacks are launched from. Each side may use a
//! limited number of attack points per combat phase and a limited number of
//! attackers from each point. Every unit attacks at most once.

use crate::board::{
    all_units, AttackTarget, GameState, Side, Space, UnitId, ACTIVATION_TRACK,
};
use crate::config::Rules;

/// Attack points and attackers per point for a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackLimits {
    pub points: usize,
    pub per_point: usize,
}

/// Returns the declaration limits for `side` in the current state.
///
/// Soviet limits grow with the activation chits placed so far.
pub fn attack_limits(state: &GameState, side: Side) -> AttackLimits {
    let (points, per_point) = match side {
        Side::German => Rules::GERMAN_ATTACK_LIMITS,
        Side::Soviet => match state.track_count(&ACTIVATION_TRACK) {
            0 => (2, 2),
            1 => (3, 2),
            2 => (3, 3),
            _ => (4, 3),
        },
    };
    AttackLimits { points, per_point }
}

/// Returns true if `unit` may be declared as an attacker without breaking
/// the side's limits.
fn within_limits(state: &GameState, side: Side, source: Space) -> bool {
    let limits = attack_limits(state, side);
    let mut points: Vec<Space> = state.attacks.iter().map(|a| a.source).collect();
    points.sort_unstable();
    points.dedup();

    if points.contains(&source) {
        let from_here = state.attacks.iter().filter(|a| a.source == source).count();
        from_here < limits.per_point
    } else {
        points.len() < limits.points && limits.per_point > 0
    }
}

/// Returns true if `unit` has already been declared this phase.
fn already_attacking(state: &GameState, unit: UnitId) -> bool {
    state.attacks.iter().any(|a| a.attacker == unit)
}

/// Everything `unit` could attack from where it stands, ignoring limits.
///
/// Only a unit in contact with the enemy may attack at all; empty
/// neighbouring spaces are offered to such a unit alongside the enemy.
fn candidate_targets(state: &GameState, unit: UnitId) -> Vec<AttackTarget> {
    let (Some(side), Some(from)) = (unit.side(), state.space_of(unit)) else {
        return Vec::new();
    };

    let mut targets = Vec::new();
    let mut empty = Vec::new();
    for &space in crate::board::standard().neighbors(from) {
        let mut any_piece = false;
        for other in state.units_at(space) {
            any_piece = true;
            if other.is_enemy_of(side) {
                targets.push(AttackTarget::Unit(other));
            }
        }
        if !any_piece {
            empty.push(AttackTarget::Space(space));
        }
    }
    if targets.is_empty() {
        return Vec::new();
    }
    targets.extend(empty);
    targets
}

/// Own units that may still be declared as attackers.
pub fn eligible_attackers(state: &GameState, side: Side) -> Vec<UnitId> {
    all_units()
        .filter(|u| u.is_combat_unit() && u.side() == Some(side))
        .filter(|u| !already_attacking(state, *u))
        .filter(|u| {
            state
                .space_of(*u)
                .is_some_and(|source| within_limits(state, side, source))
        })
        .filter(|u| !candidate_targets(state, *u).is_empty())
        .collect()
}

/// Legal targets for a selected attacker.
pub fn targets_for(state: &GameState, unit: UnitId) -> Vec<AttackTarget> {
    let (Some(side), Some(source)) = (unit.side(), state.space_of(unit)) else {
        return Vec::new();
    };
    if already_attacking(state, unit) || !within_limits(state, side, source) {
        return Vec::new();
    }
    candidate_targets(state, unit)
}

/// Returns the space a target stood on when declared.
pub fn target_space(state: &GameState, target: AttackTarget) -> Option<Space> {
    match target {
        AttackTarget::Unit(unit) => state.space_of(unit),
        AttackTarget::Space(space) => Some(space),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Attack, Location, ACTIVATION_CHITS};
    use crate::config::Options;

    fn sp(n: u8) -> Space {
        Space::new(n).unwrap()
    }

    fn unit(id: &str) -> UnitId {
        UnitId::from_id(id).unwrap()
    }

    fn put(state: &mut GameState, id: &str, n: u8) {
        state.set_location(unit(id), Some(Location::Map(sp(n))));
    }

    fn declare(state: &mut GameState, attacker: &str, target: &str) {
        let target = unit(target);
        state.attacks.push(Attack {
            attacker: unit(attacker),
            target: AttackTarget::Unit(target),
            source: state.space_of(unit(attacker)).unwrap(),
            target_space: state.space_of(target).unwrap(),
        });
    }

    fn new_state() -> GameState {
        GameState::new(9, "Standard Game", Options::default())
    }

    #[test]
    fn soviet_limits_follow_activation() {
        let mut state = new_state();
        assert_eq!(attack_limits(&state, Side::Soviet), AttackLimits { points: 2, per_point: 2 });
        state.set_location(ACTIVATION_CHITS[0], Some(Location::Track(ACTIVATION_TRACK[0])));
        state.set_location(ACTIVATION_CHITS[1], Some(Location::Track(ACTIVATION_TRACK[1])));
        assert_eq!(attack_limits(&state, Side::Soviet), AttackLimits { points: 3, per_point: 3 });
        assert_eq!(attack_limits(&state, Side::German), AttackLimits { points: 2, per_point: 2 });
    }

    #[test]
    fn targets_include_units_forts_and_empty_spaces() {
        let mut state = new_state();
        put(&mut state, "sov_16g", 2);
        put(&mut state, "ger_gd", 1);
        put(&mut state, "sov_36g", 4);

        let targets = targets_for(&state, unit("sov_16g"));
        assert!(targets.contains(&AttackTarget::Unit(unit("ger_gd"))));
        assert!(targets.contains(&AttackTarget::Unit(unit("fort_koenigsberg"))));
        assert!(targets.contains(&AttackTarget::Space(sp(23))));
        // Friendly-occupied spaces are never targets.
        assert!(!targets.contains(&AttackTarget::Space(sp(4))));
        assert!(!targets.contains(&AttackTarget::Unit(unit("sov_36g"))));
    }

    #[test]
    fn germans_never_target_forts() {
        let mut state = new_state();
        put(&mut state, "ger_gd", 24);
        let targets = targets_for(&state, unit("ger_gd"));
        assert!(!targets.contains(&AttackTarget::Unit(unit("fort_koenigsberg"))));
        assert!(!targets.contains(&AttackTarget::Space(sp(1))));
    }

    #[test]
    fn attack_point_limits_apply() {
        let mut state = new_state();
        put(&mut state, "ger_gd", 3);
        put(&mut state, "ger_5pz", 3);
        put(&mut state, "ger_1inf", 3);
        put(&mut state, "ger_56inf", 20);
        put(&mut state, "ger_561vg", 2);
        put(&mut state, "sov_94", 21);
        put(&mut state, "sov_16g", 23);

        declare(&mut state, "ger_gd", "sov_94");
        declare(&mut state, "ger_5pz", "sov_94");
        // Two attackers already launched from space 3.
        assert!(targets_for(&state, unit("ger_1inf")).is_empty());
        // A second attack point is still available.
        assert!(!targets_for(&state, unit("ger_56inf")).is_empty());

        declare(&mut state, "ger_56inf", "sov_94");
        // Both German attack points are used up.
        assert!(targets_for(&state, unit("ger_561vg")).is_empty());
        let eligible = eligible_attackers(&state, Side::German);
        assert!(eligible.is_empty(), "unexpected attackers {:?}", eligible);
    }

    #[test]
    fn units_out_of_contact_cannot_attack() {
        let mut state = new_state();
        put(&mut state, "ger_gd", 30);
        put(&mut state, "sov_16g", 19);
        assert!(targets_for(&state, unit("ger_gd")).is_empty());
        assert!(!eligible_attackers(&state, Side::German).contains(&unit("ger_gd")));
        assert!(!eligible_attackers(&state, Side::Soviet).contains(&unit("sov_16g")));
    }

    #[test]
    fn units_attack_once() {
        let mut state = new_state();
        put(&mut state, "ger_gd", 3);
        put(&mut state, "sov_94", 21);
        declare(&mut state, "ger_gd", "sov_94");
        assert!(!eligible_attackers(&state, Side::German).contains(&unit("ger_gd")));
        assert!(targets_for(&state, unit("ger_gd")).is_empty());
    }
}
