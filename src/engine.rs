//! Rules engine entry points.
//!
//! `initialize`, `project` and `apply` are pure functions over `GameState`:
//! `apply` works on a copy and returns it, so a rejected action leaves the
//! caller's state untouched. `Engine` wraps them for a host that keeps one
//! live game and a seeded die source.

use rand::rngs::SmallRng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::board::{GameState, Location, Phase, Role, Side, STANCE_CHIT};
use crate::config::{Options, Rules, SetupError, STANDARD_SCENARIO};
use crate::dice::{Dice, RngDice};
use crate::movegen::movement::overstacked_spaces;
use crate::movegen::{legal_actions, LegalActions};
use crate::protocol::action::{Action, Verb};
use crate::protocol::view::View;
use crate::resolve::{combat, event, phase, RuleError};

/// Creates a new game of the named scenario.
pub fn initialize(seed: u64, scenario: &str, options: &Value) -> Result<GameState, SetupError> {
    if scenario != STANDARD_SCENARIO {
        return Err(SetupError::UnknownScenario(scenario.to_string()));
    }
    let options = Options::from_json(options)?;
    let mut state = GameState::new(seed, scenario, options);
    state.log(format!("{} begins.", scenario));
    Ok(state)
}

/// Returns what `role` sees of `state`.
pub fn project(state: &GameState, role: Role) -> View {
    View::new(state, role)
}

/// Applies a typed action for `role`, returning the successor state.
pub fn apply(
    state: &GameState,
    role: Role,
    action: &Action,
    dice: &mut dyn Dice,
) -> Result<GameState, RuleError> {
    if state.phase == Phase::GameOver {
        return Err(RuleError::GameOver);
    }
    let side = role.side().ok_or(RuleError::Observer)?;

    let legal = legal_actions(state, side);
    if !legal.permits(action) {
        return Err(rejection(state, side, &legal, action));
    }

    let mut next = state.clone();
    if action.is_undo_tracked() {
        let snapshot = next.snapshot();
        next.undo.push(snapshot);
    }
    dispatch(&mut next, side, action, dice)?;
    debug!(verb = %action.verb(), phase = next.phase.id(), "applied");
    Ok(next)
}

/// Parses and applies a verb with an optional argument.
///
/// Unknown verbs leave the state unchanged.
pub fn apply_verb(
    state: &GameState,
    role: Role,
    verb: &str,
    arg: Option<&str>,
    dice: &mut dyn Dice,
) -> Result<GameState, RuleError> {
    match Action::parse(verb, arg)? {
        Some(action) => apply(state, role, &action, dice),
        None => {
            debug!(verb, "ignoring unknown verb");
            Ok(state.clone())
        }
    }
}

/// Picks the most specific reason an action is not permitted.
fn rejection(state: &GameState, side: Side, legal: &LegalActions, action: &Action) -> RuleError {
    let verb = action.verb();

    if verb == Verb::Undo {
        return if state.undo.is_empty() {
            RuleError::NothingToUndo
        } else {
            RuleError::NotYourTurn(side.name())
        };
    }
    if state.active() != Some(side) {
        return RuleError::NotYourTurn(side.name());
    }
    if verb == Verb::EndElimination {
        if let Some(space) = overstacked_spaces(state).first() {
            return RuleError::StillOverstacked(*space);
        }
    }
    if legal.contains(verb) {
        return RuleError::IllegalArgument {
            verb,
            arg: action.arg_id().unwrap_or_default(),
        };
    }
    let needs_selection = matches!(
        verb,
        Verb::Deselect | Verb::Place | Verb::Move | Verb::Stop | Verb::Target
    );
    if needs_selection && state.selected.is_none() {
        return RuleError::NoSelection(verb);
    }
    RuleError::IllegalAction {
        verb,
        phase: state.phase.id(),
    }
}

/// Mutates `state` for an action already checked against the legal set.
fn dispatch(
    state: &mut GameState,
    side: Side,
    action: &Action,
    dice: &mut dyn Dice,
) -> Result<(), RuleError> {
    match *action {
        Action::SetStance(stance) => {
            state.stance = Some(stance);
            state.set_location(STANCE_CHIT, Some(Location::Track(stance.slot())));
            state.log(format!("German stance: {}.", stance.name()));
        }
        Action::Select(unit) => state.selected = Some(unit),
        Action::Deselect => state.selected = None,
        Action::Place(space) => {
            let unit = state.selected.take().ok_or(RuleError::NoSelection(Verb::Place))?;
            state.set_location(unit, Some(Location::Map(space)));
            state.log(format!("{} set up in {}.", unit, space.name()));
        }
        Action::Undo => {
            let snapshot = state.undo.pop().ok_or(RuleError::NothingToUndo)?;
            state.restore(snapshot);
        }
        Action::EndSetup => phase::end_setup(state),
        Action::RollEvent => event::roll_event(state, dice),
        Action::ChooseNavy => event::choose_navy(state),
        Action::ChooseShipping => event::choose_shipping(state),
        Action::RollEvacuation => event::roll_evacuation(state, dice),
        Action::RollReaction => event::roll_reaction(state, dice),
        Action::Move(to) => {
            let unit = state.selected.ok_or(RuleError::NoSelection(Verb::Move))?;
            state.set_location(unit, Some(Location::Map(to)));
            state.moved[unit.index()] += 1;
            state.log(format!("{} moves to {}.", unit, to.name()));
            if state.moved[unit.index()] >= Rules::MOVEMENT_ALLOWANCE {
                state.selected = None;
            }
        }
        Action::Stop => {
            let unit = state.selected.take().ok_or(RuleError::NoSelection(Verb::Stop))?;
            state.moved[unit.index()] = Rules::MOVEMENT_ALLOWANCE;
        }
        Action::EndMovement => phase::end_movement(state, side),
        Action::Eliminate(unit) => {
            state.set_location(unit, None);
            state.log(format!("{} is eliminated from an overstacked space.", unit));
        }
        Action::EndElimination => phase::after_movement(state, side),
        Action::Target(target) => {
            let attacker = state.selected.ok_or(RuleError::NoSelection(Verb::Target))?;
            combat::declare(state, attacker, target)?;
        }
        Action::EndCombatSetup => phase::end_combat_setup(state, side),
        Action::RollCombat => combat::roll_combat(state, side, dice)?,
        Action::NextAttack => combat::next_attack(state, side),
        Action::Retreat(to) => combat::retreat(state, to)?,
        Action::DoneAdvance => combat::done_advance(state)?,
        Action::AdvanceTo(unit) => combat::advance_to(state, unit)?,
        Action::EndCombat => combat::end_combat(state, side),
    }
    Ok(())
}

/// A single live game driven by a host.
pub struct Engine {
    state: GameState,
    dice: RngDice<SmallRng>,
}

impl Engine {
    /// Starts a game; dice are seeded from `seed`.
    pub fn new(seed: u64, scenario: &str, options: &Value) -> Result<Self, SetupError> {
        Ok(Engine {
            state: initialize(seed, scenario, options)?,
            dice: RngDice::seeded(seed),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self, role: Role) -> View {
        project(&self.state, role)
    }

    /// Applies an action from `role`. On error the game is unchanged.
    pub fn act(&mut self, role: Role, verb: &str, arg: Option<&str>) -> Result<(), RuleError> {
        match apply_verb(&self.state, role, verb, arg, &mut self.dice) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(e) => {
                warn!(role = role.name(), verb, error = %e, "action rejected");
                Err(e)
            }
        }
    }
}
