//! Client and host protocol.
//!
//! Typed actions parsed from `(verb, arg)` strings, the per-role `View`
//! serialized for clients, and the line-oriented command parser used by the
//! binary's main loop.

pub mod action;
pub mod parser;
pub mod view;

pub use action::{Action, ActionParseError, Verb};
pub use parser::{parse_command, Command};
pub use view::{ActionValue, View};
