//! Game state representation.
//!
//! Holds the complete mutable record of a game: phase, piece locations,
//! movement budgets, declared attacks, event flags, score, undo history and
//! the human-readable log. Static board and roster data live elsewhere and
//! are only referenced by id.

use super::space::{Location, Space, TrackSlot};
use super::unit::{all_units, Side, UnitId, UNIT_COUNT};
use crate::config::{Options, Rules};

/// The German strategic stance, chosen once during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stance {
    Land,
    Naval,
}

impl Stance {
    /// Returns the track slot that records this stance.
    pub const fn slot(self) -> TrackSlot {
        match self {
            Stance::Land => TrackSlot::Land,
            Stance::Naval => TrackSlot::Naval,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Stance::Land => "Land",
            Stance::Naval => "Naval",
        }
    }
}

/// What a declared attack is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackTarget {
    Unit(UnitId),
    /// An empty adjacent space the attacker hopes to advance into.
    Space(Space),
}

/// A declared attack, recorded in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attack {
    pub attacker: UnitId,
    pub target: AttackTarget,
    /// Where the attacker stood when the attack was declared.
    pub source: Space,
    /// Where the target stood when the attack was declared.
    pub target_space: Space,
}

/// The phase of play. Determines which actions are legal and for whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    SetupGerman,
    SetupSoviet,
    Event,
    EventChoice,
    Evacuation,
    RussianReaction,
    Movement(Side),
    Elimination(Side),
    CombatSetup(Side),
    /// `rolled` is set once the current attack has been resolved and is
    /// waiting for `next_attack`.
    CombatResolve { side: Side, rolled: bool },
    /// The defender of the current attack picks a retreat destination.
    CombatRetreat { unit: UnitId, from: Space, acting: Side, resume: Side },
    /// Attackers may advance into the vacated space.
    CombatAdvance { side: Side, space: Space },
    GameOver,
}

impl Phase {
    /// Returns the side whose decision this phase awaits.
    pub const fn active(self) -> Option<Side> {
        match self {
            Phase::SetupGerman
            | Phase::Event
            | Phase::EventChoice
            | Phase::Evacuation => Some(Side::German),
            Phase::SetupSoviet | Phase::RussianReaction => Some(Side::Soviet),
            Phase::Movement(side)
            | Phase::Elimination(side)
            | Phase::CombatSetup(side)
            | Phase::CombatResolve { side, .. }
            | Phase::CombatAdvance { side, .. } => Some(side),
            Phase::CombatRetreat { acting, .. } => Some(acting),
            Phase::GameOver => None,
        }
    }

    /// Returns the phase id shown to clients.
    pub const fn id(self) -> &'static str {
        match self {
            Phase::SetupGerman => "setup_german",
            Phase::SetupSoviet => "setup_soviet",
            Phase::Event => "event_phase",
            Phase::EventChoice => "event_choice",
            Phase::Evacuation => "evacuation_phase",
            Phase::RussianReaction => "russian_reaction_phase",
            Phase::Movement(Side::German) => "movement_german",
            Phase::Movement(Side::Soviet) => "movement_soviet",
            Phase::Elimination(Side::German) => "elimination_german",
            Phase::Elimination(Side::Soviet) => "elimination_soviet",
            Phase::CombatSetup(_) => "combat_setup",
            Phase::CombatResolve { .. } => "combat_resolve",
            Phase::CombatRetreat { .. } => "combat_retreat",
            Phase::CombatAdvance { .. } => "combat_advance",
            Phase::GameOver => "game_over",
        }
    }
}

/// The undo-tracked subset of the state.
///
/// Log, seed and options are deliberately absent so undo never rewinds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub pieces: [Option<Location>; UNIT_COUNT],
    pub moved: [u8; UNIT_COUNT],
    pub stance: Option<Stance>,
    pub attacks: Vec<Attack>,
    pub selected: Option<UnitId>,
}

/// Complete game state.
///
/// Uses fixed-size arrays indexed by `UnitId::index` so every catalog unit
/// has exactly one location entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub seed: u64,
    pub scenario: String,
    pub options: Options,
    pub turn: u8,
    pub phase: Phase,
    /// Location of each unit, or `None` while off-map or eliminated.
    pub pieces: [Option<Location>; UNIT_COUNT],
    /// Movement points spent this movement phase.
    pub moved: [u8; UNIT_COUNT],
    pub selected: Option<UnitId>,
    pub attacks: Vec<Attack>,
    pub combat_index: usize,
    pub stance: Option<Stance>,
    pub cef: u32,
    pub major_exodus: bool,
    pub russian_halt: bool,
    pub major_sinking: bool,
    pub major_sinking_last_turn: bool,
    pub sea_cef_this_turn: u32,
    pub undo: Vec<Snapshot>,
    pub log: Vec<String>,
}

impl GameState {
    /// Creates the opening state: forts on their start spaces, everything
    /// else off-map, German setup pending.
    pub fn new(seed: u64, scenario: &str, options: Options) -> Self {
        let mut pieces = [None; UNIT_COUNT];
        for unit in all_units() {
            pieces[unit.index()] = unit.start_space().map(Location::Map);
        }
        GameState {
            seed,
            scenario: scenario.to_string(),
            options,
            turn: 1,
            phase: Phase::SetupGerman,
            pieces,
            moved: [0; UNIT_COUNT],
            selected: None,
            attacks: Vec::new(),
            combat_index: 0,
            stance: None,
            cef: 0,
            major_exodus: false,
            russian_halt: false,
            major_sinking: false,
            major_sinking_last_turn: false,
            sea_cef_this_turn: 0,
            undo: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Returns the side whose decision the current phase awaits.
    pub fn active(&self) -> Option<Side> {
        self.phase.active()
    }

    /// Returns a unit's location.
    pub fn location(&self, unit: UnitId) -> Option<Location> {
        self.pieces[unit.index()]
    }

    /// Returns a unit's map space, or `None` if it is off-map or on a track.
    pub fn space_of(&self, unit: UnitId) -> Option<Space> {
        self.location(unit).and_then(Location::space)
    }

    /// Moves a unit to a location, or off the board with `None`.
    pub fn set_location(&mut self, unit: UnitId, location: Option<Location>) {
        self.pieces[unit.index()] = location;
    }

    /// Returns every unit currently at `space`, in catalog order.
    pub fn units_at(&self, space: Space) -> impl Iterator<Item = UnitId> + '_ {
        all_units().filter(move |u| self.space_of(*u) == Some(space))
    }

    /// Number of units counting toward the stacking limit at `space`.
    pub fn stack_count(&self, space: Space) -> usize {
        self.units_at(space).filter(|u| u.is_combat_unit()).count()
    }

    /// Returns true if `space` holds more units than the stacking limit.
    pub fn is_overstacked(&self, space: Space) -> bool {
        self.stack_count(space) > Rules::STACKING_LIMIT
    }

    /// Returns true if any piece hostile to `side` is at `space`.
    pub fn enemy_occupied(&self, space: Space, side: Side) -> bool {
        self.units_at(space).any(|u| u.is_enemy_of(side))
    }

    /// Returns true if `space` is held by `side` combat units.
    pub fn occupied_by(&self, space: Space, side: Side) -> bool {
        self.units_at(space).any(|u| u.is_combat_unit() && u.side() == Some(side))
    }

    /// Returns the fort at `space`, if one still stands there.
    pub fn fort_at(&self, space: Space) -> Option<UnitId> {
        self.units_at(space).find(|u| u.is_fort())
    }

    /// Returns the chit occupying a track slot.
    pub fn chit_in(&self, slot: TrackSlot) -> Option<UnitId> {
        all_units().find(|u| self.location(*u) == Some(Location::Track(slot)))
    }

    /// Number of the given track slots holding a chit.
    pub fn track_count(&self, slots: &[TrackSlot]) -> usize {
        slots.iter().filter(|s| self.chit_in(**s).is_some()).count()
    }

    /// Captures the undo-tracked fields.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pieces: self.pieces,
            moved: self.moved,
            stance: self.stance,
            attacks: self.attacks.clone(),
            selected: self.selected,
        }
    }

    /// Restores the undo-tracked fields from a snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.pieces = snapshot.pieces;
        self.moved = snapshot.moved;
        self.stance = snapshot.stance;
        self.attacks = snapshot.attacks;
        self.selected = snapshot.selected;
    }

    /// Appends a line to the game log.
    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }
}
