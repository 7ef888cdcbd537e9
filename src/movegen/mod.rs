//! Legal action generation.
//!
//! Computes, for one side in the current state, the set of verbs it may use
//! and the legal argument values for each. The same set is shown to clients
//! in views and used by the engine to accept or reject incoming actions, so
//! a verb missing here is illegal everywhere.

pub mod combat;
pub mod movement;
pub mod retreat;
pub mod setup;

use crate::board::{
    combat_units, AttackTarget, GameState, Phase, Side, Space, Stance, UnitId, NAVY_TRACK,
    SHIPPING_TRACK,
};
use crate::protocol::action::{target_id, Action, Verb};

/// The legal arguments of one verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choices {
    /// The verb takes no argument.
    Enabled,
    Units(Vec<UnitId>),
    Spaces(Vec<Space>),
    Stances(Vec<Stance>),
    Targets(Vec<AttackTarget>),
}

impl Choices {
    /// Returns the argument ids, or `None` for argument-less verbs.
    pub fn ids(&self) -> Option<Vec<String>> {
        match self {
            Choices::Enabled => None,
            Choices::Units(units) => Some(units.iter().map(|u| u.id().to_string()).collect()),
            Choices::Spaces(spaces) => Some(spaces.iter().map(|s| s.to_string()).collect()),
            Choices::Stances(stances) => {
                Some(stances.iter().map(|s| s.slot().id().to_string()).collect())
            }
            Choices::Targets(targets) => Some(targets.iter().map(|t| target_id(*t)).collect()),
        }
    }
}

/// Verbs available to one side, each with its legal arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalActions {
    entries: Vec<(Verb, Choices)>,
}

impl LegalActions {
    /// Adds an argument-less verb.
    fn enable(&mut self, verb: Verb) {
        self.entries.push((verb, Choices::Enabled));
    }

    /// Adds a verb with arguments, skipping it when no argument is legal.
    fn offer(&mut self, verb: Verb, choices: Choices) {
        let empty = match &choices {
            Choices::Enabled => false,
            Choices::Units(v) => v.is_empty(),
            Choices::Spaces(v) => v.is_empty(),
            Choices::Stances(v) => v.is_empty(),
            Choices::Targets(v) => v.is_empty(),
        };
        if !empty {
            self.entries.push((verb, choices));
        }
    }

    /// Returns the choices for a verb, if it is legal at all.
    pub fn get(&self, verb: Verb) -> Option<&Choices> {
        self.entries.iter().find(|(v, _)| *v == verb).map(|(_, c)| c)
    }

    pub fn contains(&self, verb: Verb) -> bool {
        self.get(verb).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Verb, &Choices)> {
        self.entries.iter().map(|(v, c)| (*v, c))
    }

    /// Returns true if the action's verb and argument are both legal.
    pub fn permits(&self, action: &Action) -> bool {
        match (self.get(action.verb()), action) {
            (None, _) => false,
            (Some(Choices::Enabled), _) => true,
            (Some(Choices::Units(units)), Action::Select(u))
            | (Some(Choices::Units(units)), Action::Eliminate(u))
            | (Some(Choices::Units(units)), Action::AdvanceTo(u)) => units.contains(u),
            (Some(Choices::Spaces(spaces)), Action::Place(s))
            | (Some(Choices::Spaces(spaces)), Action::Move(s))
            | (Some(Choices::Spaces(spaces)), Action::Retreat(s)) => spaces.contains(s),
            (Some(Choices::Stances(stances)), Action::SetStance(s)) => stances.contains(s),
            (Some(Choices::Targets(targets)), Action::Target(t)) => targets.contains(t),
            _ => false,
        }
    }
}

/// Generates every legal action for `side` in the current state.
pub fn legal_actions(state: &GameState, side: Side) -> LegalActions {
    let mut legal = LegalActions::default();

    if state.active() == Some(side) {
        phase_actions(state, side, &mut legal);
    }

    let may_undo = state.active() == Some(side) || !state.options.undo_active_only;
    if may_undo && !state.undo.is_empty() && state.phase != Phase::GameOver {
        legal.enable(Verb::Undo);
    }

    legal
}

/// Phase-specific verbs for the active side.
fn phase_actions(state: &GameState, side: Side, legal: &mut LegalActions) {
    match state.phase {
        Phase::SetupGerman | Phase::SetupSoviet => {
            if side == Side::German && state.stance.is_none() {
                legal.offer(Verb::SetStance, Choices::Stances(vec![Stance::Land, Stance::Naval]));
                return;
            }
            legal.offer(Verb::Select, Choices::Units(combat_units(side).collect()));
            if let Some(unit) = state.selected {
                legal.enable(Verb::Deselect);
                legal.offer(Verb::Place, Choices::Spaces(setup::placement_spaces(state, unit)));
            }
            if setup::all_placed(state, side) {
                legal.enable(Verb::EndSetup);
            }
        }
        Phase::Event => legal.enable(Verb::RollEvent),
        Phase::EventChoice => {
            if state.track_count(&NAVY_TRACK) < NAVY_TRACK.len() {
                legal.enable(Verb::ChooseNavy);
            }
            if state.track_count(&SHIPPING_TRACK) < SHIPPING_TRACK.len() {
                legal.enable(Verb::ChooseShipping);
            }
        }
        Phase::Evacuation => legal.enable(Verb::RollEvacuation),
        Phase::RussianReaction => legal.enable(Verb::RollReaction),
        Phase::Movement(_) => {
            legal.offer(Verb::Select, Choices::Units(movement::movable_units(state, side)));
            if let Some(unit) = state.selected {
                legal.enable(Verb::Deselect);
                legal.offer(Verb::Move, Choices::Spaces(movement::valid_moves(state, unit)));
                legal.enable(Verb::Stop);
            }
            legal.enable(Verb::EndMovement);
        }
        Phase::Elimination(_) => {
            legal.offer(Verb::Eliminate, Choices::Units(movement::eliminable_units(state, side)));
            if movement::overstacked_spaces(state).is_empty() {
                legal.enable(Verb::EndElimination);
            }
        }
        Phase::CombatSetup(_) => {
            legal.offer(Verb::Select, Choices::Units(combat::eligible_attackers(state, side)));
            if let Some(unit) = state.selected {
                legal.enable(Verb::Deselect);
                legal.offer(Verb::Target, Choices::Targets(combat::targets_for(state, unit)));
            }
            legal.enable(Verb::EndCombatSetup);
        }
        Phase::CombatResolve { rolled, .. } => {
            if state.combat_index >= state.attacks.len() {
                legal.enable(Verb::EndCombat);
            } else if rolled {
                legal.enable(Verb::NextAttack);
            } else {
                legal.enable(Verb::RollCombat);
            }
        }
        Phase::CombatRetreat { unit, from, .. } => {
            legal.offer(
                Verb::Retreat,
                Choices::Spaces(retreat::retreat_destinations(state, unit, from)),
            );
        }
        Phase::CombatAdvance { space, .. } => {
            legal.offer(
                Verb::AdvanceTo,
                Choices::Units(retreat::advance_candidates(state, side, space)),
            );
            legal.enable(Verb::DoneAdvance);
        }
        Phase::GameOver => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GameState, Location, Snapshot, NAVY_CHITS};
    use crate::config::Options;

    fn new_state() -> GameState {
        GameState::new(1, "Standard Game", Options::default())
    }

    fn sp(n: u8) -> Space {
        Space::new(n).unwrap()
    }

    #[test]
    fn german_must_pick_stance_first() {
        let state = new_state();
        let legal = legal_actions(&state, Side::German);
        assert_eq!(
            legal.get(Verb::SetStance),
            Some(&Choices::Stances(vec![Stance::Land, Stance::Naval]))
        );
        assert!(!legal.contains(Verb::Select));
        assert!(legal_actions(&state, Side::Soviet).is_empty());
    }

    #[test]
    fn permits_checks_arguments() {
        let mut state = new_state();
        state.stance = Some(Stance::Land);
        let gd = UnitId::from_id("ger_gd").unwrap();
        state.selected = Some(gd);
        let legal = legal_actions(&state, Side::German);

        assert!(legal.permits(&Action::Select(gd)));
        assert!(legal.permits(&Action::Place(sp(30))));
        // Soviet-only zone.
        assert!(!legal.permits(&Action::Place(sp(10))));
        assert!(!legal.permits(&Action::Move(sp(30))));
        assert!(!legal.permits(&Action::EndSetup));
    }

    #[test]
    fn undo_offered_only_to_active_role_by_default() {
        let mut state = new_state();
        state.undo.push(state.snapshot());
        assert!(legal_actions(&state, Side::German).contains(Verb::Undo));
        assert!(!legal_actions(&state, Side::Soviet).contains(Verb::Undo));

        state.options.undo_active_only = false;
        assert!(legal_actions(&state, Side::Soviet).contains(Verb::Undo));
    }

    #[test]
    fn combat_resolve_steps() {
        let mut state = new_state();
        state.phase = Phase::CombatResolve { side: Side::German, rolled: false };
        assert!(legal_actions(&state, Side::German).contains(Verb::EndCombat));

        let gd = UnitId::from_id("ger_gd").unwrap();
        let target = UnitId::from_id("sov_94").unwrap();
        state.attacks.push(crate::board::Attack {
            attacker: gd,
            target: AttackTarget::Unit(target),
            source: sp(3),
            target_space: sp(21),
        });
        assert!(legal_actions(&state, Side::German).contains(Verb::RollCombat));

        state.phase = Phase::CombatResolve { side: Side::German, rolled: true };
        let legal = legal_actions(&state, Side::German);
        assert!(legal.contains(Verb::NextAttack));
        assert!(!legal.contains(Verb::RollCombat));
    }

    #[test]
    fn combat_setup_skips_units_out_of_contact() {
        let mut state = new_state();
        state.phase = Phase::CombatSetup(Side::German);
        let gd = UnitId::from_id("ger_gd").unwrap();
        let pz = UnitId::from_id("ger_5pz").unwrap();
        let sov = UnitId::from_id("sov_16g").unwrap();
        state.set_location(gd, Some(Location::Map(sp(30))));
        state.set_location(pz, Some(Location::Map(sp(18))));
        state.set_location(sov, Some(Location::Map(sp(19))));

        let legal = legal_actions(&state, Side::German);
        assert_eq!(legal.get(Verb::Select), Some(&Choices::Units(vec![pz])));

        // An empty neighbour is a target only for a unit in contact.
        state.selected = Some(gd);
        let legal = legal_actions(&state, Side::German);
        assert!(!legal.contains(Verb::Target));
        assert!(!legal.permits(&Action::Target(AttackTarget::Space(sp(31)))));

        state.selected = Some(pz);
        let legal = legal_actions(&state, Side::German);
        assert!(legal.permits(&Action::Target(AttackTarget::Unit(sov))));
        assert!(legal.permits(&Action::Target(AttackTarget::Space(sp(16)))));
    }

    #[test]
    fn event_choice_skips_a_full_track() {
        let mut state = new_state();
        state.phase = Phase::EventChoice;
        let legal = legal_actions(&state, Side::German);
        assert!(legal.contains(Verb::ChooseNavy));
        assert!(legal.contains(Verb::ChooseShipping));

        for (chit, slot) in NAVY_CHITS.iter().zip(NAVY_TRACK) {
            state.set_location(*chit, Some(Location::Track(slot)));
        }
        let legal = legal_actions(&state, Side::German);
        assert!(!legal.contains(Verb::ChooseNavy));
        assert!(legal.contains(Verb::ChooseShipping));
    }

    #[test]
    fn game_over_offers_nothing() {
        let mut state = new_state();
        state.phase = Phase::GameOver;
        let snap: Snapshot = state.snapshot();
        state.undo.push(snap);
        assert!(legal_actions(&state, Side::German).is_empty());
        assert!(legal_actions(&state, Side::Soviet).is_empty());
    }

    #[test]
    fn choices_render_ids() {
        let choices = Choices::Targets(vec![
            AttackTarget::Unit(UnitId::from_id("sov_1tk").unwrap()),
            AttackTarget::Space(sp(9)),
        ]);
        assert_eq!(choices.ids(), Some(vec!["sov_1tk".to_string(), "9".to_string()]));
        assert_eq!(Choices::Enabled.ids(), None);
    }
}
