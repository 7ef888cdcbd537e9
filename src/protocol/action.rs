//! Action verbs and their arguments.
//!
//! Clients name an action by verb (`"move"`, `"target"`, ...) and pass at
//! most one argument id. `Action::parse` turns that pair into a typed
//! `Action`; unrecognized verbs parse to `None` and are ignored by the host.

use std::fmt;

use thiserror::Error;

use crate::board::{AttackTarget, Space, Stance, TrackSlot, UnitId};

/// Every verb the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verb {
    SetStance,
    Select,
    Deselect,
    Place,
    Undo,
    EndSetup,
    RollEvent,
    ChooseNavy,
    ChooseShipping,
    RollEvacuation,
    RollReaction,
    Move,
    Stop,
    EndMovement,
    Eliminate,
    EndElimination,
    Target,
    EndCombatSetup,
    RollCombat,
    NextAttack,
    Retreat,
    DoneAdvance,
    AdvanceTo,
    EndCombat,
}

/// All verbs, in the order they are listed in views.
pub const ALL_VERBS: [Verb; 24] = [
    Verb::SetStance,
    Verb::Select,
    Verb::Deselect,
    Verb::Place,
    Verb::Undo,
    Verb::EndSetup,
    Verb::RollEvent,
    Verb::ChooseNavy,
    Verb::ChooseShipping,
    Verb::RollEvacuation,
    Verb::RollReaction,
    Verb::Move,
    Verb::Stop,
    Verb::EndMovement,
    Verb::Eliminate,
    Verb::EndElimination,
    Verb::Target,
    Verb::EndCombatSetup,
    Verb::RollCombat,
    Verb::NextAttack,
    Verb::Retreat,
    Verb::DoneAdvance,
    Verb::AdvanceTo,
    Verb::EndCombat,
];

impl Verb {
    /// Returns the wire name of this verb.
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::SetStance => "set_stance",
            Verb::Select => "select",
            Verb::Deselect => "deselect",
            Verb::Place => "place",
            Verb::Undo => "undo",
            Verb::EndSetup => "end_setup",
            Verb::RollEvent => "roll_event",
            Verb::ChooseNavy => "choose_navy",
            Verb::ChooseShipping => "choose_shipping",
            Verb::RollEvacuation => "roll_evacuation",
            Verb::RollReaction => "roll_reaction",
            Verb::Move => "move",
            Verb::Stop => "stop",
            Verb::EndMovement => "end_movement",
            Verb::Eliminate => "eliminate",
            Verb::EndElimination => "end_elimination",
            Verb::Target => "target",
            Verb::EndCombatSetup => "end_combat_setup",
            Verb::RollCombat => "roll_combat",
            Verb::NextAttack => "next_attack",
            Verb::Retreat => "retreat",
            Verb::DoneAdvance => "done_advance",
            Verb::AdvanceTo => "advance_to",
            Verb::EndCombat => "end_combat",
        }
    }

    /// Parses a verb from its wire name.
    pub fn from_name(name: &str) -> Option<Verb> {
        ALL_VERBS.iter().copied().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors for known verbs given a missing or unusable argument.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("'{0}' needs an argument")]
    MissingArgument(Verb),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("unknown space '{0}'")]
    UnknownSpace(String),

    #[error("unknown stance '{0}'")]
    UnknownStance(String),

    #[error("'{0}' is neither a unit nor a space")]
    UnknownTarget(String),
}

/// A fully typed player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SetStance(Stance),
    Select(UnitId),
    Deselect,
    Place(Space),
    Undo,
    EndSetup,
    RollEvent,
    ChooseNavy,
    ChooseShipping,
    RollEvacuation,
    RollReaction,
    Move(Space),
    Stop,
    EndMovement,
    Eliminate(UnitId),
    EndElimination,
    Target(AttackTarget),
    EndCombatSetup,
    RollCombat,
    NextAttack,
    Retreat(Space),
    DoneAdvance,
    AdvanceTo(UnitId),
    EndCombat,
}

impl Action {
    /// Returns the verb of this action.
    pub const fn verb(&self) -> Verb {
        match self {
            Action::SetStance(_) => Verb::SetStance,
            Action::Select(_) => Verb::Select,
            Action::Deselect => Verb::Deselect,
            Action::Place(_) => Verb::Place,
            Action::Undo => Verb::Undo,
            Action::EndSetup => Verb::EndSetup,
            Action::RollEvent => Verb::RollEvent,
            Action::ChooseNavy => Verb::ChooseNavy,
            Action::ChooseShipping => Verb::ChooseShipping,
            Action::RollEvacuation => Verb::RollEvacuation,
            Action::RollReaction => Verb::RollReaction,
            Action::Move(_) => Verb::Move,
            Action::Stop => Verb::Stop,
            Action::EndMovement => Verb::EndMovement,
            Action::Eliminate(_) => Verb::Eliminate,
            Action::EndElimination => Verb::EndElimination,
            Action::Target(_) => Verb::Target,
            Action::EndCombatSetup => Verb::EndCombatSetup,
            Action::RollCombat => Verb::RollCombat,
            Action::NextAttack => Verb::NextAttack,
            Action::Retreat(_) => Verb::Retreat,
            Action::DoneAdvance => Verb::DoneAdvance,
            Action::AdvanceTo(_) => Verb::AdvanceTo,
            Action::EndCombat => Verb::EndCombat,
        }
    }

    /// Returns true if the action pushes an undo snapshot before applying.
    pub const fn is_undo_tracked(&self) -> bool {
        matches!(
            self,
            Action::SetStance(_)
                | Action::Place(_)
                | Action::Move(_)
                | Action::Stop
                | Action::Eliminate(_)
                | Action::Target(_)
        )
    }

    /// Returns the argument id, if the action carries one.
    pub fn arg_id(&self) -> Option<String> {
        match self {
            Action::SetStance(stance) => Some(stance.slot().id().to_string()),
            Action::Select(unit) | Action::Eliminate(unit) | Action::AdvanceTo(unit) => {
                Some(unit.id().to_string())
            }
            Action::Place(space) | Action::Move(space) | Action::Retreat(space) => {
                Some(space.to_string())
            }
            Action::Target(target) => Some(target_id(*target)),
            _ => None,
        }
    }

    /// Parses a verb and optional argument.
    ///
    /// Returns `Ok(None)` for verbs the engine does not know. Arguments on
    /// verbs that take none are ignored.
    pub fn parse(verb: &str, arg: Option<&str>) -> Result<Option<Action>, ActionParseError> {
        let Some(verb) = Verb::from_name(verb) else {
            return Ok(None);
        };
        let arg = arg.map(str::trim).filter(|a| !a.is_empty());
        let need = |v: Verb| arg.ok_or(ActionParseError::MissingArgument(v));

        let action = match verb {
            Verb::SetStance => Action::SetStance(parse_stance(need(verb)?)?),
            Verb::Select => Action::Select(parse_unit(need(verb)?)?),
            Verb::Deselect => Action::Deselect,
            Verb::Place => Action::Place(parse_space(need(verb)?)?),
            Verb::Undo => Action::Undo,
            Verb::EndSetup => Action::EndSetup,
            Verb::RollEvent => Action::RollEvent,
            Verb::ChooseNavy => Action::ChooseNavy,
            Verb::ChooseShipping => Action::ChooseShipping,
            Verb::RollEvacuation => Action::RollEvacuation,
            Verb::RollReaction => Action::RollReaction,
            Verb::Move => Action::Move(parse_space(need(verb)?)?),
            Verb::Stop => Action::Stop,
            Verb::EndMovement => Action::EndMovement,
            Verb::Eliminate => Action::Eliminate(parse_unit(need(verb)?)?),
            Verb::EndElimination => Action::EndElimination,
            Verb::Target => Action::Target(parse_target(need(verb)?)?),
            Verb::EndCombatSetup => Action::EndCombatSetup,
            Verb::RollCombat => Action::RollCombat,
            Verb::NextAttack => Action::NextAttack,
            Verb::Retreat => Action::Retreat(parse_space(need(verb)?)?),
            Verb::DoneAdvance => Action::DoneAdvance,
            Verb::AdvanceTo => Action::AdvanceTo(parse_unit(need(verb)?)?),
            Verb::EndCombat => Action::EndCombat,
        };
        Ok(Some(action))
    }
}

/// Returns the client id of an attack target.
pub fn target_id(target: AttackTarget) -> String {
    match target {
        AttackTarget::Unit(unit) => unit.id().to_string(),
        AttackTarget::Space(space) => space.to_string(),
    }
}

fn parse_unit(s: &str) -> Result<UnitId, ActionParseError> {
    UnitId::from_id(s).ok_or_else(|| ActionParseError::UnknownUnit(s.to_string()))
}

fn parse_space(s: &str) -> Result<Space, ActionParseError> {
    Space::from_id(s).ok_or_else(|| ActionParseError::UnknownSpace(s.to_string()))
}

fn parse_stance(s: &str) -> Result<Stance, ActionParseError> {
    match TrackSlot::from_id(s) {
        Some(TrackSlot::Land) => Ok(Stance::Land),
        Some(TrackSlot::Naval) => Ok(Stance::Naval),
        _ => Err(ActionParseError::UnknownStance(s.to_string())),
    }
}

fn parse_target(s: &str) -> Result<AttackTarget, ActionParseError> {
    if let Some(unit) = UnitId::from_id(s) {
        return Ok(AttackTarget::Unit(unit));
    }
    Space::from_id(s)
        .map(AttackTarget::Space)
        .ok_or_else(|| ActionParseError::UnknownTarget(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_names_roundtrip() {
        for verb in ALL_VERBS {
            assert_eq!(Verb::from_name(verb.as_str()), Some(verb));
        }
        assert_eq!(Verb::from_name("resign"), None);
    }

    #[test]
    fn unknown_verb_is_not_an_error() {
        assert_eq!(Action::parse("resign", None), Ok(None));
        assert_eq!(Action::parse("", Some("1")), Ok(None));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            Action::parse("set_stance", Some("track_naval")),
            Ok(Some(Action::SetStance(Stance::Naval)))
        );
        assert_eq!(
            Action::parse("move", Some("24")),
            Ok(Some(Action::Move(Space::new(24).unwrap())))
        );
        let gd = UnitId::from_id("ger_gd").unwrap();
        assert_eq!(Action::parse("select", Some("ger_gd")), Ok(Some(Action::Select(gd))));
        assert_eq!(
            Action::parse("target", Some("ger_gd")),
            Ok(Some(Action::Target(AttackTarget::Unit(gd))))
        );
        assert_eq!(
            Action::parse("target", Some("7")),
            Ok(Some(Action::Target(AttackTarget::Space(Space::new(7).unwrap()))))
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            Action::parse("move", None),
            Err(ActionParseError::MissingArgument(Verb::Move))
        );
        assert_eq!(
            Action::parse("place", Some("  ")),
            Err(ActionParseError::MissingArgument(Verb::Place))
        );
        assert_eq!(
            Action::parse("move", Some("99")),
            Err(ActionParseError::UnknownSpace("99".to_string()))
        );
        assert_eq!(
            Action::parse("select", Some("ger_tiger")),
            Err(ActionParseError::UnknownUnit("ger_tiger".to_string()))
        );
        assert_eq!(
            Action::parse("set_stance", Some("track_navy1")),
            Err(ActionParseError::UnknownStance("track_navy1".to_string()))
        );
    }

    #[test]
    fn no_argument_verbs_ignore_arguments() {
        assert_eq!(Action::parse("end_setup", Some("extra")), Ok(Some(Action::EndSetup)));
    }

    #[test]
    fn arg_ids_match_parse_input() {
        for (verb, arg) in [("move", "12"), ("select", "sov_1tk"), ("target", "31"), ("set_stance", "track_land")] {
            let action = Action::parse(verb, Some(arg)).unwrap().unwrap();
            assert_eq!(action.arg_id().as_deref(), Some(arg));
            assert_eq!(action.verb().as_str(), verb);
        }
    }
}
