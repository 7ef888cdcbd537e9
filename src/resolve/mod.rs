//! State transitions.
//!
//! Applies accepted actions to the game state: phase sequencing, event and
//! evacuation rolls, and combat resolution. Callers validate actions against
//! `movegen::legal_actions` first; functions here only re-check what they
//! need to avoid corrupting state.

pub mod combat;
pub mod event;
pub mod phase;

use thiserror::Error;

use crate::board::Space;
use crate::protocol::action::{ActionParseError, Verb};

/// Reasons an action is rejected. A rejected action never changes state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("the game is over")]
    GameOver,

    #[error("observers cannot act")]
    Observer,

    #[error("it is not the {0} player's turn")]
    NotYourTurn(&'static str),

    #[error("'{verb}' is not allowed during {phase}")]
    IllegalAction { verb: Verb, phase: &'static str },

    #[error("'{verb}' does not accept '{arg}' here")]
    IllegalArgument { verb: Verb, arg: String },

    #[error("'{0}' needs a selected unit")]
    NoSelection(Verb),

    #[error("space {0} is still overstacked")]
    StillOverstacked(Space),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("no attack is pending")]
    NoPendingAttack,

    #[error(transparent)]
    Parse(#[from] ActionParseError),
}
