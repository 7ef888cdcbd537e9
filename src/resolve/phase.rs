//! Phase sequencing logic.
//!
//! Turn flow:
//! - Event -> (Event Choice) -> Evacuation
//! - Evacuation -> Russian Reaction (if any Sea CEF) OR German Movement
//! - Movement -> Elimination (if overstacked) -> next Movement / Combat
//! - German Combat -> Soviet Combat (unless Russian Halt) -> next turn
//!
//! Every phase change clears the selection and the undo history, so undo
//! never crosses a phase or turn boundary.

use tracing::{debug, info};

use crate::board::{GameState, Phase, Side};
use crate::movegen::movement::overstacked_spaces;

/// Moves to `phase`, dropping selection and undo history.
pub fn enter(state: &mut GameState, phase: Phase) {
    debug!(from = state.phase.id(), to = phase.id(), "phase change");
    state.phase = phase;
    state.selected = None;
    state.undo.clear();
}

/// Ends the current side's setup.
pub fn end_setup(state: &mut GameState) {
    match state.phase {
        Phase::SetupGerman => {
            state.log("German setup complete.");
            enter(state, Phase::SetupSoviet);
        }
        Phase::SetupSoviet => {
            state.log("Soviet setup complete.");
            begin_turn(state);
        }
        _ => {}
    }
}

/// Starts the event phase of the current turn.
pub fn begin_turn(state: &mut GameState) {
    info!(turn = state.turn, "turn begins");
    state.log(format!("Turn {}.", state.turn));
    enter(state, Phase::Event);
}

/// Proceeds from the event phase to evacuation.
pub fn after_event(state: &mut GameState) {
    enter(state, Phase::Evacuation);
}

/// Proceeds from evacuation, with a Russian reaction if anything left by sea.
pub fn after_evacuation(state: &mut GameState) {
    if state.sea_cef_this_turn > 0 {
        enter(state, Phase::RussianReaction);
    } else {
        start_movement(state, Side::German);
    }
}

/// Starts a side's movement phase with fresh movement points.
pub fn start_movement(state: &mut GameState, side: Side) {
    state.moved = [0; crate::board::UNIT_COUNT];
    enter(state, Phase::Movement(side));
}

/// Ends a side's movement, diverting to elimination if any space is overstacked.
pub fn end_movement(state: &mut GameState, side: Side) {
    if overstacked_spaces(state).is_empty() {
        after_movement(state, side);
    } else {
        state.log(format!("{} must eliminate overstacked units.", side));
        enter(state, Phase::Elimination(side));
    }
}

/// Proceeds after a side's movement (and any elimination) is complete.
pub fn after_movement(state: &mut GameState, side: Side) {
    match side {
        Side::German => start_movement(state, Side::Soviet),
        Side::Soviet => start_combat(state, Side::German),
    }
}

/// Starts a side's combat with no declared attacks.
pub fn start_combat(state: &mut GameState, side: Side) {
    state.attacks.clear();
    state.combat_index = 0;
    enter(state, Phase::CombatSetup(side));
}

/// Ends attack declaration; resolves declared attacks or skips ahead.
pub fn end_combat_setup(state: &mut GameState, side: Side) {
    if state.attacks.is_empty() {
        state.log(format!("{} declares no attacks.", side));
        after_combat(state, side);
    } else {
        state.log(format!("{} declares {} attack(s).", side, state.attacks.len()));
        state.combat_index = 0;
        enter(state, Phase::CombatResolve { side, rolled: false });
    }
}

/// Proceeds after a side's combat is complete.
pub fn after_combat(state: &mut GameState, side: Side) {
    state.attacks.clear();
    state.combat_index = 0;
    match side {
        Side::German if state.russian_halt => {
            state.log("Russian Halt: no Soviet combat this turn.");
            end_turn(state);
        }
        Side::German => start_combat(state, Side::Soviet),
        Side::Soviet => end_turn(state),
    }
}

/// Closes the turn: rolls flags over and starts the next turn or ends the game.
pub fn end_turn(state: &mut GameState) {
    state.russian_halt = false;
    state.major_exodus = false;
    state.sea_cef_this_turn = 0;
    state.major_sinking_last_turn = state.major_sinking;
    state.major_sinking = false;

    if state.turn >= state.options.turn_limit {
        info!(cef = state.cef, "game over");
        state.log(format!("Game over. Final CEF: {}.", state.cef));
        enter(state, Phase::GameOver);
    } else {
        state.turn += 1;
        begin_turn(state);
    }
}
