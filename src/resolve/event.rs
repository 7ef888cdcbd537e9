//! Event table, evacuation scoring, and the Russian reaction.
//!
//! Dice are drawn from the caller's `Dice` in a fixed order so scripted
//! rolls replay exactly: event die; land die(s) then sea die; reaction die
//! then the optional second die.

use tracing::debug;

use super::phase;
use crate::board::{
    GameState, Location, Phase, Side, Space, Stance, TrackSlot, UnitId, ACTIVATION_CHITS,
    ACTIVATION_TRACK, HAFF_COAST, KOENIGSBERG_PERIMETER, NAVY_CHITS, NAVY_TRACK,
    SAMLAND_APPROACHES, SHIPPING_CHITS, SHIPPING_TRACK,
};
use crate::dice::Dice;

/// Sea CEF penalty applied the turn after a major sinking.
const SINKING_PENALTY: i32 = 5;

/// Returns the event die modifier from Soviet activation.
pub fn event_modifier(state: &GameState) -> i32 {
    match state.track_count(&ACTIVATION_TRACK) {
        0 => 1,
        2 => -1,
        _ => 0,
    }
}

/// Puts the next free chit of a group into the next free slot of its track.
///
/// Returns false when the track is already full.
fn place_chit(state: &mut GameState, chits: &[UnitId], track: &[TrackSlot]) -> bool {
    let Some(slot) = track.iter().copied().find(|s| state.chit_in(*s).is_none()) else {
        return false;
    };
    let Some(chit) = chits.iter().copied().find(|c| state.location(*c).is_none()) else {
        return false;
    };
    state.set_location(chit, Some(Location::Track(slot)));
    true
}

fn add_navy(state: &mut GameState) {
    if place_chit(state, &NAVY_CHITS, &NAVY_TRACK) {
        state.log("German Navy chit added.");
    } else {
        state.log("German Navy track is full.");
    }
}

fn add_shipping(state: &mut GameState) {
    if place_chit(state, &SHIPPING_CHITS, &SHIPPING_TRACK) {
        state.log("German Shipping chit added.");
    } else {
        state.log("German Shipping track is full.");
    }
}

fn russian_halt(state: &mut GameState) {
    state.russian_halt = true;
    state.log("Russian Halt.");
}

/// Rolls on the event table.
pub fn roll_event(state: &mut GameState, dice: &mut dyn Dice) {
    let die = dice.d6();
    let roll = (die as i32 + event_modifier(state)).clamp(1, 6);
    debug!(die, roll, "event roll");
    state.log(format!("Event roll: {} (modified {}).", die, roll));

    match roll {
        1 => {
            state.major_exodus = true;
            state.log("Major Exodus.");
        }
        2 => {
            let navy_full = state.track_count(&NAVY_TRACK) == NAVY_TRACK.len();
            let shipping_full = state.track_count(&SHIPPING_TRACK) == SHIPPING_TRACK.len();
            if !(navy_full && shipping_full) {
                state.log("German chooses Navy or Shipping.");
                phase::enter(state, Phase::EventChoice);
                return;
            }
            state.log("Navy and Shipping tracks are full.");
        }
        3 if state.stance == Some(Stance::Naval) => add_navy(state),
        3 | 5 => russian_halt(state),
        4 => add_shipping(state),
        _ => {
            if place_chit(state, &ACTIVATION_CHITS, &ACTIVATION_TRACK) {
                state.log("Soviet Activation chit added.");
            } else {
                state.log("Soviet Activation track is full.");
            }
        }
    }
    phase::after_event(state);
}

/// Resolves the event choice with a Navy chit.
pub fn choose_navy(state: &mut GameState) {
    add_navy(state);
    phase::after_event(state);
}

/// Resolves the event choice with a Shipping chit.
pub fn choose_shipping(state: &mut GameState) {
    add_shipping(state);
    phase::after_event(state);
}

/// Maps a single land die to Land CEF.
pub fn land_cef_from_die(die: u8) -> u32 {
    match die {
        0..=2 => 1,
        3..=5 => 2,
        _ => 3,
    }
}

/// Maps a modified sea roll to Sea CEF. Rolls below 1 count as 1.
pub fn sea_cef_from_roll(roll: i32) -> u32 {
    match roll.max(1) {
        1 => 0,
        r @ 2..=9 => (r - 1) as u32,
        _ => 9,
    }
}

fn all_held_by(state: &GameState, spaces: &[u8], side: Side) -> bool {
    spaces
        .iter()
        .filter_map(|n| Space::new(*n))
        .all(|s| state.occupied_by(s, side))
}

/// Land CEF for this evacuation.
fn land_cef(state: &GameState, dice: &mut dyn Dice) -> u32 {
    if state.major_exodus {
        let (a, b) = (dice.d6(), dice.d6());
        debug!(a, b, "major exodus land roll");
        return (a + b) as u32;
    }
    let die = dice.d6();
    let base = land_cef_from_die(die);
    if all_held_by(state, &KOENIGSBERG_PERIMETER, Side::German) {
        base * 2
    } else {
        base
    }
}

/// Modifier to the sea die from tracks, sinking and Soviet coastal pressure.
pub fn sea_modifier(state: &GameState) -> i32 {
    let mut modifier =
        state.track_count(&NAVY_TRACK) as i32 + state.track_count(&SHIPPING_TRACK) as i32;
    if state.major_sinking_last_turn {
        modifier -= SINKING_PENALTY;
    }
    for set in [&SAMLAND_APPROACHES[..], &HAFF_COAST[..]] {
        if all_held_by(state, set, Side::Soviet) {
            modifier -= 1;
        }
    }
    modifier
}

/// Sea CEF for this evacuation.
fn sea_cef(state: &GameState, dice: &mut dyn Dice) -> u32 {
    let die = dice.d6();
    let roll = die as i32 + sea_modifier(state);
    debug!(die, roll, "sea roll");
    let cef = sea_cef_from_roll(roll);
    if state.major_exodus && state.stance == Some(Stance::Naval) {
        cef * 3
    } else {
        cef
    }
}

/// Rolls the evacuation and adds both results to the score.
pub fn roll_evacuation(state: &mut GameState, dice: &mut dyn Dice) {
    let land = land_cef(state, dice);
    let sea = sea_cef(state, dice);

    state.cef += land + sea;
    state.sea_cef_this_turn = sea;
    state.major_exodus = false;
    state.major_sinking_last_turn = false;
    state.log(format!("Evacuation: Land CEF {}, Sea CEF {}. Total CEF {}.", land, sea, state.cef));

    phase::after_evacuation(state);
}

/// Soviet response to seaborne evacuation.
pub fn roll_reaction(state: &mut GameState, dice: &mut dyn Dice) {
    let first = dice.d6();
    debug!(die = first, "reaction roll");
    if first == 6 {
        let second = dice.d6() as i32 + state.track_count(&NAVY_TRACK) as i32;
        if second <= 5 {
            state.major_sinking = true;
            state.cef = state.cef.saturating_sub(1);
            state.log(format!("Russian reaction: {}. Major Sinking! CEF {}.", second, state.cef));
        } else {
            state.log(format!("Russian reaction: {}. Convoy escapes.", second));
        }
    } else {
        state.log(format!("Russian reaction: {}. No effect.", first));
    }
    phase::start_movement(state, Side::German);
}
