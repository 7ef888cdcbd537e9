//! Board representation and game-state types.
//!
//! Contains the static map (spaces, track slots, adjacency), the unit
//! roster, and the mutable game state.

pub mod adjacency;
pub mod space;
pub mod state;
pub mod unit;

pub use adjacency::{standard, BoardGraph, ADJACENCY_ROWS};
pub use space::{
    all_spaces, in_german_zone, in_soviet_zone, Location, Space, TrackSlot, ACTIVATION_TRACK,
    HAFF_COAST, KOENIGSBERG_PERIMETER, NAVY_TRACK, SAMLAND_APPROACHES, SHIPPING_TRACK,
    SPACE_COUNT,
};
pub use state::{Attack, AttackTarget, GameState, Phase, Snapshot, Stance};
pub use unit::{
    all_units, combat_units, Army, Faction, Role, Side, UnitId, UnitInfo, UnitType, ACTIVATION_CHITS,
    NAVY_CHITS, SHIPPING_CHITS, STANCE_CHIT, UNIT_COUNT, UNIT_INFO,
};
