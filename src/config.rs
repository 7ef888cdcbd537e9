//! Game options and tunable rule parameters.
//!
//! Options arrive from the host as a JSON value alongside the scenario name.
//! Every field has a default, so `{}` and `null` both select the standard
//! rules.

use serde::Deserialize;
use thiserror::Error;

/// The only scenario the engine knows.
pub const STANDARD_SCENARIO: &str = "Standard Game";

/// Errors raised while creating a new game.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("malformed options: {0}")]
    MalformedOptions(#[from] serde_json::Error),
}

/// Per-game options chosen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Full turns played before the game ends.
    pub turn_limit: u8,
    /// Offer undo only to the role whose decision it currently is.
    pub undo_active_only: bool,
}

impl Options {
    pub const DEFAULT_TURN_LIMIT: u8 = 8;

    /// Parses options from the host's JSON value. `null` selects defaults.
    pub fn from_json(value: &serde_json::Value) -> Result<Options, SetupError> {
        if value.is_null() {
            return Ok(Options::default());
        }
        Ok(Options::deserialize(value)?)
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            turn_limit: Self::DEFAULT_TURN_LIMIT,
            undo_active_only: true,
        }
    }
}

/// Rule constants shared by move generation and resolution.
pub struct Rules;

impl Rules {
    /// Maximum non-fort, non-chit units in one space.
    pub const STACKING_LIMIT: usize = 3;
    /// Movement points per unit per movement phase.
    pub const MOVEMENT_ALLOWANCE: u8 = 3;
    /// German attack points and attackers per point.
    pub const GERMAN_ATTACK_LIMITS: (usize, usize) = (2, 2);
}
