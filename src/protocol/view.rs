//! Client views.
//!
//! A `View` is everything one role sees at an instant: the full board (there
//! is no hidden information), score, log, a prompt, and the legal actions
//! for that role. Views serialize to JSON for the host.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::{all_units, AttackTarget, GameState, Phase, Role};
use crate::movegen::movement::overstacked_spaces;
use crate::movegen::{legal_actions, Choices, LegalActions};
use crate::protocol::action::target_id;

/// The value of one entry in `actions`: `1` or the legal argument ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionValue {
    Flag(u8),
    List(Vec<String>),
}

impl From<&Choices> for ActionValue {
    fn from(choices: &Choices) -> Self {
        match choices.ids() {
            Some(ids) => ActionValue::List(ids),
            None => ActionValue::Flag(1),
        }
    }
}

/// A declared attack as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackView {
    pub attacker: String,
    pub target: String,
    pub source: String,
    pub target_space: String,
}

/// One role's view of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub phase: &'static str,
    pub turn: u8,
    pub active: Option<&'static str>,
    pub prompt: String,
    pub cef: u32,
    pub stance: Option<&'static str>,
    pub selected: Option<&'static str>,
    /// Unit id to location id, `null` when off-map or eliminated.
    pub pieces: BTreeMap<&'static str, Option<String>>,
    pub overstacked: Vec<String>,
    pub attacks: Vec<AttackView>,
    pub combat_index: usize,
    pub log: Vec<String>,
    pub actions: BTreeMap<&'static str, ActionValue>,
}

impl View {
    /// Builds the view of `state` for `role`. Never mutates the state.
    pub fn new(state: &GameState, role: Role) -> View {
        let legal = match role.side() {
            Some(side) => legal_actions(state, side),
            None => LegalActions::default(),
        };

        View {
            phase: state.phase.id(),
            turn: state.turn,
            active: state.active().map(|s| s.name()),
            prompt: prompt(state, role),
            cef: state.cef,
            stance: state.stance.map(|s| s.name()),
            selected: state.selected.map(|u| u.id()),
            pieces: all_units()
                .map(|u| (u.id(), state.location(u).map(|l| l.id())))
                .collect(),
            overstacked: overstacked_spaces(state).iter().map(|s| s.to_string()).collect(),
            attacks: state
                .attacks
                .iter()
                .map(|a| AttackView {
                    attacker: a.attacker.id().to_string(),
                    target: target_id(a.target),
                    source: a.source.to_string(),
                    target_space: a.target_space.to_string(),
                })
                .collect(),
            combat_index: state.combat_index,
            log: state.log.clone(),
            actions: legal.iter().map(|(verb, c)| (verb.as_str(), c.into())).collect(),
        }
    }

    /// Serializes the view as a single JSON line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// The instruction shown to `role`.
pub fn prompt(state: &GameState, role: Role) -> String {
    let Some(active) = state.active() else {
        return format!("Game over. The Germans evacuated {} CEF.", state.cef);
    };
    if role.side() != Some(active) {
        return format!("Waiting for the {} player.", active);
    }

    match state.phase {
        Phase::SetupGerman if state.stance.is_none() => "Choose your stance: Land or Naval.".into(),
        Phase::SetupGerman | Phase::SetupSoviet => match state.selected {
            Some(unit) => format!("Place {}.", unit),
            None => "Select a unit to place.".into(),
        },
        Phase::Event => "Roll for the turn's event.".into(),
        Phase::EventChoice => "Choose a Navy or Shipping chit.".into(),
        Phase::Evacuation => "Roll for evacuation.".into(),
        Phase::RussianReaction => "Roll the Russian reaction.".into(),
        Phase::Movement(_) => match state.selected {
            Some(unit) => format!("Move {} or stop.", unit),
            None => "Select a unit to move, or end movement.".into(),
        },
        Phase::Elimination(_) => "Eliminate units from overstacked spaces.".into(),
        Phase::CombatSetup(_) => match state.selected {
            Some(unit) => format!("Choose a target for {}.", unit),
            None => "Select an attacker, or end combat setup.".into(),
        },
        Phase::CombatResolve { rolled, .. } => match state.attacks.get(state.combat_index) {
            None => "All attacks resolved. End combat.".into(),
            Some(_) if rolled => "Continue to the next attack.".into(),
            Some(attack) => {
                let target = match attack.target {
                    AttackTarget::Unit(unit) => unit.to_string(),
                    AttackTarget::Space(space) => space.name().to_string(),
                };
                format!("Resolve {} attacking {}.", attack.attacker, target)
            }
        },
        Phase::CombatRetreat { unit, .. } => format!("Choose where {} retreats.", unit),
        Phase::CombatAdvance { space, .. } => {
            format!("Advance into {}, or finish advancing.", space.name())
        }
        Phase::GameOver => String::new(),
    }
}
