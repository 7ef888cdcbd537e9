//! Unit roster for the Standard Game.
//!
//! Every piece in the game, including forts and marker chits, is a catalog
//! entry indexed by `UnitId`. The roster is compile-time data and never
//! changes during a game; only piece locations live in `GameState`.

use std::fmt;

use super::space::Space;

/// A player side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    German,
    Soviet,
}

impl Side {
    /// Returns the other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::German => Side::Soviet,
            Side::Soviet => Side::German,
        }
    }

    /// Returns the display name of this side.
    pub const fn name(self) -> &'static str {
        match self {
            Side::German => "German",
            Side::Soviet => "Soviet",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A seat at the table: one of the two players or an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    German,
    Soviet,
    Observer,
}

impl Role {
    /// Returns the side this role plays, or `None` for observers.
    pub const fn side(self) -> Option<Side> {
        match self {
            Role::German => Some(Side::German),
            Role::Soviet => Some(Side::Soviet),
            Role::Observer => None,
        }
    }

    /// Parses a role name. Anything other than a side name is an observer.
    pub fn from_name(name: &str) -> Role {
        match name {
            "German" => Role::German,
            "Soviet" => Role::Soviet,
            _ => Role::Observer,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Role::German => "German",
            Role::Soviet => "Soviet",
            Role::Observer => "Observer",
        }
    }
}

impl From<Side> for Role {
    fn from(side: Side) -> Self {
        match side {
            Side::German => Role::German,
            Side::Soviet => Role::Soviet,
        }
    }
}

/// The owner of a catalog entry. Forts and chits are neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    German,
    Soviet,
    Neutral,
}

/// The kind of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Infantry,
    Armor,
    Fort,
    Chit,
}

/// Soviet army grouping, used by the setup homogeneity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Army {
    Guards11,
    A39,
    A43,
    A50,
}

/// Static metadata for one catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct UnitInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub faction: Faction,
    pub unit_type: UnitType,
    pub combat: u8,
    pub cohesion: u8,
    pub army: Option<Army>,
    /// Starting space for pre-placed pieces (forts).
    pub start: Option<u8>,
}

const fn combat_unit(
    id: &'static str,
    name: &'static str,
    faction: Faction,
    unit_type: UnitType,
    combat: u8,
    cohesion: u8,
    army: Option<Army>,
) -> UnitInfo {
    UnitInfo { id, name, faction, unit_type, combat, cohesion, army, start: None }
}

const fn fort(id: &'static str, name: &'static str, cohesion: u8, start: u8) -> UnitInfo {
    UnitInfo {
        id,
        name,
        faction: Faction::Neutral,
        unit_type: UnitType::Fort,
        combat: 0,
        cohesion,
        army: None,
        start: Some(start),
    }
}

const fn chit(id: &'static str, name: &'static str) -> UnitInfo {
    UnitInfo {
        id,
        name,
        faction: Faction::Neutral,
        unit_type: UnitType::Chit,
        combat: 0,
        cohesion: 0,
        army: None,
        start: None,
    }
}

use Army::*;
use Faction::{German as Ger, Soviet as Sov};
use UnitType::{Armor, Infantry};

/// Number of catalog entries.
pub const UNIT_COUNT: usize = 30;

/// The complete roster, indexed by `UnitId`.
pub static UNIT_INFO: [UnitInfo; UNIT_COUNT] = [
    // German combat units
    combat_unit("ger_gd", "Panzergrenadier-Division Großdeutschland", Ger, Armor, 5, 4, None),
    combat_unit("ger_5pz", "5. Panzer-Division", Ger, Armor, 5, 4, None),
    combat_unit("ger_1inf", "1. Infanterie-Division", Ger, Infantry, 4, 3, None),
    combat_unit("ger_56inf", "56. Infanterie-Division", Ger, Infantry, 3, 3, None),
    combat_unit("ger_561vg", "561. Volksgrenadier-Division", Ger, Infantry, 3, 2, None),
    combat_unit("ger_548vg", "548. Volksgrenadier-Division", Ger, Infantry, 2, 2, None),
    // Soviet combat units
    combat_unit("sov_16g", "16th Guards Rifle Corps", Sov, Infantry, 4, 3, Some(Guards11)),
    combat_unit("sov_36g", "36th Guards Rifle Corps", Sov, Infantry, 4, 3, Some(Guards11)),
    combat_unit("sov_1tk", "1st Tank Corps", Sov, Armor, 5, 3, Some(Guards11)),
    combat_unit("sov_5g", "5th Guards Rifle Corps", Sov, Infantry, 4, 3, Some(A39)),
    combat_unit("sov_94", "94th Rifle Corps", Sov, Infantry, 3, 2, Some(A39)),
    combat_unit("sov_113", "113th Rifle Corps", Sov, Infantry, 3, 2, Some(A39)),
    combat_unit("sov_13g", "13th Guards Rifle Corps", Sov, Infantry, 4, 3, Some(A43)),
    combat_unit("sov_54", "54th Rifle Corps", Sov, Infantry, 3, 2, Some(A43)),
    combat_unit("sov_90", "90th Rifle Corps", Sov, Infantry, 3, 2, Some(A43)),
    combat_unit("sov_69", "69th Rifle Corps", Sov, Infantry, 3, 2, Some(A50)),
    combat_unit("sov_81", "81st Rifle Corps", Sov, Infantry, 3, 2, Some(A50)),
    combat_unit("sov_124", "124th Rifle Corps", Sov, Infantry, 3, 2, Some(A50)),
    // Forts
    fort("fort_koenigsberg", "Festung Königsberg", 5, 1),
    fort("fort_pillau", "Zitadelle Pillau", 4, 25),
    // Chits
    chit("chit_stance", "Stance"),
    chit("chit_navy1", "Kriegsmarine"),
    chit("chit_navy2", "Kriegsmarine"),
    chit("chit_navy3", "Kriegsmarine"),
    chit("chit_ship1", "Shipping"),
    chit("chit_ship2", "Shipping"),
    chit("chit_ship3", "Shipping"),
    chit("chit_act1", "Soviet Activation"),
    chit("chit_act2", "Soviet Activation"),
    chit("chit_act3", "Soviet Activation"),
];

/// Identifies a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(u8);

/// The stance marker.
pub const STANCE_CHIT: UnitId = UnitId(20);

/// Navy chits, placed in order on the navy track.
pub const NAVY_CHITS: [UnitId; 3] = [UnitId(21), UnitId(22), UnitId(23)];

/// Shipping chits, placed in order on the shipping track.
pub const SHIPPING_CHITS: [UnitId; 3] = [UnitId(24), UnitId(25), UnitId(26)];

/// Soviet activation chits, placed in order on the activation track.
pub const ACTIVATION_CHITS: [UnitId; 3] = [UnitId(27), UnitId(28), UnitId(29)];

impl UnitId {
    /// Returns the id for a catalog index, if it exists.
    pub const fn new(index: usize) -> Option<UnitId> {
        if index < UNIT_COUNT {
            Some(UnitId(index as u8))
        } else {
            None
        }
    }

    /// Returns the catalog index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the static metadata for this unit.
    pub fn info(self) -> &'static UnitInfo {
        &UNIT_INFO[self.0 as usize]
    }

    /// Returns the string id used by clients.
    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Parses a unit from its string id.
    pub fn from_id(id: &str) -> Option<UnitId> {
        UNIT_INFO.iter().position(|u| u.id == id).and_then(UnitId::new)
    }

    /// Returns the owning side, or `None` for neutral pieces.
    pub fn side(self) -> Option<Side> {
        match self.info().faction {
            Faction::German => Some(Side::German),
            Faction::Soviet => Some(Side::Soviet),
            Faction::Neutral => None,
        }
    }

    pub fn is_fort(self) -> bool {
        matches!(self.info().unit_type, UnitType::Fort)
    }

    pub fn is_chit(self) -> bool {
        matches!(self.info().unit_type, UnitType::Chit)
    }

    /// Returns true for units that move, fight and count for stacking.
    pub fn is_combat_unit(self) -> bool {
        matches!(self.info().unit_type, UnitType::Infantry | UnitType::Armor)
    }

    /// Returns true if this piece opposes `side` on the map.
    ///
    /// Forts stand with the German defenders: they are hostile to the
    /// Soviet side only.
    pub fn is_enemy_of(self, side: Side) -> bool {
        match self.side() {
            Some(own) => own != side,
            None => self.is_fort() && side == Side::Soviet,
        }
    }

    /// Returns the starting space for pre-placed pieces.
    pub fn start_space(self) -> Option<Space> {
        self.info().start.and_then(Space::new)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

/// Every catalog entry in index order.
pub fn all_units() -> impl Iterator<Item = UnitId> {
    (0..UNIT_COUNT as u8).map(UnitId)
}

/// Combat units belonging to `side`, in catalog order.
pub fn combat_units(side: Side) -> impl Iterator<Item = UnitId> {
    all_units().filter(move |u| u.is_combat_unit() && u.side() == Some(side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_and_parse_back() {
        let mut seen = HashSet::new();
        for u in all_units() {
            assert!(seen.insert(u.id()), "duplicate id {}", u.id());
            assert_eq!(UnitId::from_id(u.id()), Some(u));
        }
        assert_eq!(UnitId::from_id("ger_tiger"), None);
    }

    #[test]
    fn roster_sizes() {
        assert_eq!(combat_units(Side::German).count(), 6);
        assert_eq!(combat_units(Side::Soviet).count(), 12);
        assert_eq!(all_units().filter(|u| u.is_fort()).count(), 2);
    }

    #[test]
    fn chit_constants_name_chits() {
        assert!(STANCE_CHIT.is_chit());
        for u in NAVY_CHITS.iter().chain(&SHIPPING_CHITS).chain(&ACTIVATION_CHITS) {
            assert!(u.is_chit(), "{} is not a chit", u.id());
        }
        assert_eq!(NAVY_CHITS[0].id(), "chit_navy1");
        assert_eq!(SHIPPING_CHITS[2].id(), "chit_ship3");
        assert_eq!(ACTIVATION_CHITS[0].id(), "chit_act1");
    }

    #[test]
    fn soviet_units_carry_an_army() {
        for u in combat_units(Side::Soviet) {
            assert!(u.info().army.is_some(), "{} has no army", u.id());
        }
    }

    #[test]
    fn forts_are_hostile_to_soviets_only() {
        let fort = UnitId::from_id("fort_koenigsberg").unwrap();
        assert!(fort.is_enemy_of(Side::Soviet));
        assert!(!fort.is_enemy_of(Side::German));
        assert_eq!(fort.start_space().map(Space::number), Some(1));
        assert!(!STANCE_CHIT.is_enemy_of(Side::Soviet));
    }

    #[test]
    fn role_names() {
        assert_eq!(Role::from_name("German").side(), Some(Side::German));
        assert_eq!(Role::from_name("Soviet").side(), Some(Side::Soviet));
        assert_eq!(Role::from_name("Observer"), Role::Observer);
        assert_eq!(Role::from_name("german"), Role::Observer);
        assert_eq!(Role::from(Side::Soviet).name(), "Soviet");
    }

    #[test]
    fn combat_values_are_sane() {
        for u in all_units().filter(|u| u.is_combat_unit()) {
            assert!(u.info().combat >= 1 && u.info().cohesion >= 1, "{}", u.id());
        }
    }
}
