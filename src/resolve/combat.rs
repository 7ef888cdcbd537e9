//! Combat resolution.
//!
//! Declared attacks resolve in declaration order. Each `roll_combat`
//! resolves `attacks[combat_index]`; retreat and advance sub-phases may take
//! over before control returns to `combat_resolve` for `next_attack`.
//!
//! Result of a hit, by the defender's cohesion die:
//! - die <= cohesion: no effect
//! - die == cohesion + 1: retreat (forts are eliminated instead)
//! - die >= cohesion + 2: eliminated

use tracing::debug;

use super::{phase, RuleError};
use crate::board::{Attack, AttackTarget, GameState, Location, Phase, Side, Space, UnitId};
use crate::dice::Dice;
use crate::movegen::combat::target_space;
use crate::movegen::retreat::{advance_candidates, is_vacated, retreat_destinations};
use crate::protocol::action::Verb;

/// Outcome of the defender's cohesion roll after a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohesionResult {
    Holds,
    Retreats,
    Eliminated,
}

/// Compares a cohesion die against the defender's cohesion.
pub fn cohesion_result(die: u8, cohesion: u8) -> CohesionResult {
    if die <= cohesion {
        CohesionResult::Holds
    } else if die == cohesion + 1 {
        CohesionResult::Retreats
    } else {
        CohesionResult::Eliminated
    }
}

/// Records an attack by `attacker` on `target`.
pub fn declare(state: &mut GameState, attacker: UnitId, target: AttackTarget) -> Result<(), RuleError> {
    let (Some(source), Some(target_space)) = (state.space_of(attacker), target_space(state, target))
    else {
        return Err(RuleError::NoSelection(Verb::Target));
    };
    state.attacks.push(Attack {
        attacker,
        target,
        source,
        target_space,
    });
    state.selected = None;
    state.log(format!("{} targets {}.", attacker, describe(target)));
    Ok(())
}

fn describe(target: AttackTarget) -> String {
    match target {
        AttackTarget::Unit(unit) => unit.to_string(),
        AttackTarget::Space(space) => format!("{} ({})", space.name(), space),
    }
}

/// Marks the current attack as resolved and waits for `next_attack`.
fn resolved(state: &mut GameState, side: Side) {
    phase::enter(state, Phase::CombatResolve { side, rolled: true });
}

fn eliminate(state: &mut GameState, unit: UnitId) {
    state.set_location(unit, None);
    state.log(format!("{} is eliminated.", unit));
}

/// Resolves the current attack.
pub fn roll_combat(state: &mut GameState, side: Side, dice: &mut dyn Dice) -> Result<(), RuleError> {
    let attack = *state
        .attacks
        .get(state.combat_index)
        .ok_or(RuleError::NoPendingAttack)?;

    let Some(from) = state.space_of(attack.attacker) else {
        state.log(format!("{} is gone; attack cancelled.", attack.attacker));
        resolved(state, side);
        return Ok(());
    };

    let defender = match attack.target {
        AttackTarget::Space(space) => {
            if state.enemy_occupied(space, side) {
                state.log(format!("{} is no longer empty; attack cancelled.", space.name()));
                resolved(state, side);
            } else {
                state.log(format!("{} moves on {} unopposed.", attack.attacker, space.name()));
                check_advance(state, side, space);
            }
            return Ok(());
        }
        AttackTarget::Unit(unit) => unit,
    };

    let graph = crate::board::standard();
    let Some(at) = state.space_of(defender).filter(|s| graph.is_adjacent(from, *s)) else {
        state.log(format!("{} is out of reach; attack cancelled.", defender));
        resolved(state, side);
        return Ok(());
    };

    // A fort shelters the units stacked with it.
    let defender = match state.fort_at(at) {
        Some(fort) if !defender.is_fort() && fort.is_enemy_of(side) => {
            state.log(format!("{} shelters {}.", fort, defender));
            fort
        }
        _ => defender,
    };

    let hit_die = dice.d6();
    let combat = attack.attacker.info().combat;
    debug!(attacker = attack.attacker.id(), die = hit_die, combat, "to-hit roll");
    if hit_die > combat {
        state.log(format!("{} rolls {} against {}: miss.", attack.attacker, hit_die, defender));
        resolved(state, side);
        return Ok(());
    }

    let save_die = dice.d6();
    let cohesion = defender.info().cohesion;
    debug!(defender = defender.id(), die = save_die, cohesion, "cohesion roll");
    state.log(format!(
        "{} rolls {} against {}: hit. Cohesion roll {}.",
        attack.attacker, hit_die, defender, save_die
    ));

    match cohesion_result(save_die, cohesion) {
        CohesionResult::Holds => {
            state.log(format!("{} holds.", defender));
            resolved(state, side);
        }
        CohesionResult::Retreats if !defender.is_fort() => begin_retreat(state, side, defender, at),
        CohesionResult::Retreats | CohesionResult::Eliminated => {
            eliminate(state, defender);
            check_advance(state, side, at);
        }
    }
    Ok(())
}

/// Moves `unit` out of `from` after `side`'s attack forced a retreat.
fn begin_retreat(state: &mut GameState, side: Side, unit: UnitId, from: Space) {
    let destinations = retreat_destinations(state, unit, from);
    match destinations.as_slice() {
        [] => {
            state.set_location(unit, None);
            state.log(format!("{} must retreat. No retreat path. Eliminated.", unit));
            check_advance(state, side, from);
        }
        [only] => {
            state.set_location(unit, Some(Location::Map(*only)));
            state.log(format!("{} retreats to {}.", unit, only.name()));
            check_advance(state, side, from);
        }
        _ => {
            state.log(format!("{} must retreat.", unit));
            phase::enter(
                state,
                Phase::CombatRetreat {
                    unit,
                    from,
                    acting: side.opponent(),
                    resume: side,
                },
            );
        }
    }
}

/// Completes a retreat chosen by the defending side.
pub fn retreat(state: &mut GameState, to: Space) -> Result<(), RuleError> {
    let Phase::CombatRetreat { unit, from, resume, .. } = state.phase else {
        return Err(RuleError::NoPendingAttack);
    };
    state.set_location(unit, Some(Location::Map(to)));
    state.log(format!("{} retreats to {}.", unit, to.name()));
    check_advance(state, resume, from);
    Ok(())
}

/// Offers an advance into `space` if it is empty and someone may enter it.
fn check_advance(state: &mut GameState, side: Side, space: Space) {
    if is_vacated(state, space) && !advance_candidates(state, side, space).is_empty() {
        phase::enter(state, Phase::CombatAdvance { side, space });
    } else {
        resolved(state, side);
    }
}

/// Advances one qualifying attacker into the vacated space.
pub fn advance_to(state: &mut GameState, unit: UnitId) -> Result<(), RuleError> {
    let Phase::CombatAdvance { space, .. } = state.phase else {
        return Err(RuleError::NoPendingAttack);
    };
    state.set_location(unit, Some(Location::Map(space)));
    state.log(format!("{} advances into {}.", unit, space.name()));
    Ok(())
}

/// Ends advancing and moves on to the next attack.
pub fn done_advance(state: &mut GameState) -> Result<(), RuleError> {
    let Phase::CombatAdvance { side, .. } = state.phase else {
        return Err(RuleError::NoPendingAttack);
    };
    next_attack(state, side);
    Ok(())
}

/// Moves on to the next declared attack.
pub fn next_attack(state: &mut GameState, side: Side) {
    state.combat_index += 1;
    phase::enter(state, Phase::CombatResolve { side, rolled: false });
}

/// Closes the side's combat once every attack is resolved.
pub fn end_combat(state: &mut GameState, side: Side) {
    state.log(format!("{} combat complete.", side));
    phase::after_combat(state, side);
}
