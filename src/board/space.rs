//! Space definitions and metadata for the Standard Game map.
//!
//! The 52 numbered map spaces are the only places units fight and move.
//! Track slots are logical holding areas for markers: they have string ids
//! like `track_navy2`, are never adjacent to anything, and never count for
//! stacking.

use std::fmt;

/// The number of playable map spaces.
pub const SPACE_COUNT: usize = 52;

/// A playable map space, numbered 1..=52.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Space(u8);

impl Space {
    /// Returns the space with the given number, if it is on the map.
    pub const fn new(number: u8) -> Option<Space> {
        if number >= 1 && number as usize <= SPACE_COUNT {
            Some(Space(number))
        } else {
            None
        }
    }

    /// Returns the space number (1-based).
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Returns a zero-based index for array lookups.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Returns the display name of this space.
    pub fn name(self) -> &'static str {
        SPACE_NAMES[self.index()]
    }

    /// Parses a space from its numeric id string.
    pub fn from_id(id: &str) -> Option<Space> {
        id.parse::<u8>().ok().and_then(Space::new)
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every map space in number order.
pub fn all_spaces() -> impl Iterator<Item = Space> {
    (1..=SPACE_COUNT as u8).map(Space)
}

/// Display names, indexed by `Space::index`.
static SPACE_NAMES: [&str; SPACE_COUNT] = [
    "Königsberg",
    "Neuhausen",
    "Ponarth",
    "Lauth",
    "Labiau",
    "Tapiau",
    "Wehlau",
    "Gerdauen",
    "Friedland",
    "Domnau",
    "Preußisch Eylau",
    "Kreuzburg",
    "Zinten",
    "Landsberg",
    "Bartenstein",
    "Heilsberg",
    "Mehlsack",
    "Wormditt",
    "Braunsberg",
    "Brandenburg",
    "Arnau",
    "Löwenhagen",
    "Caymen",
    "Metgethen",
    "Pillau",
    "Fischhausen",
    "Germau",
    "Palmnicken",
    "Rauschen",
    "Cranz",
    "Neukuhren",
    "Powunden",
    "Medenau",
    "Thierenberg",
    "Groß Heydekrug",
    "Juditten",
    "Wargen",
    "Kumehnen",
    "Rudau",
    "Neutief",
    "Kahlholz",
    "Balga",
    "Heiligenbeil",
    "Rosenberg",
    "Deutsch Thierau",
    "Hermsdorf",
    "Leysuhnen",
    "Pörschken",
    "Ludwigsort",
    "Kobbelbude",
    "Frauenburg",
    "Narmeln",
];

/// A logical holding slot for markers, outside the movement graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackSlot {
    Land,
    Naval,
    Navy1,
    Navy2,
    Navy3,
    Shipping1,
    Shipping2,
    Shipping3,
    SovAct1,
    SovAct2,
    SovAct3,
}

/// Navy track slots in fill order.
pub const NAVY_TRACK: [TrackSlot; 3] = [TrackSlot::Navy1, TrackSlot::Navy2, TrackSlot::Navy3];

/// Shipping track slots in fill order.
pub const SHIPPING_TRACK: [TrackSlot; 3] =
    [TrackSlot::Shipping1, TrackSlot::Shipping2, TrackSlot::Shipping3];

/// Soviet activation track slots in fill order.
pub const ACTIVATION_TRACK: [TrackSlot; 3] =
    [TrackSlot::SovAct1, TrackSlot::SovAct2, TrackSlot::SovAct3];

const ALL_TRACK_SLOTS: [TrackSlot; 11] = [
    TrackSlot::Land,
    TrackSlot::Naval,
    TrackSlot::Navy1,
    TrackSlot::Navy2,
    TrackSlot::Navy3,
    TrackSlot::Shipping1,
    TrackSlot::Shipping2,
    TrackSlot::Shipping3,
    TrackSlot::SovAct1,
    TrackSlot::SovAct2,
    TrackSlot::SovAct3,
];

impl TrackSlot {
    /// Returns the string id used by clients.
    pub const fn id(self) -> &'static str {
        match self {
            TrackSlot::Land => "track_land",
            TrackSlot::Naval => "track_naval",
            TrackSlot::Navy1 => "track_navy1",
            TrackSlot::Navy2 => "track_navy2",
            TrackSlot::Navy3 => "track_navy3",
            TrackSlot::Shipping1 => "track_shipping1",
            TrackSlot::Shipping2 => "track_shipping2",
            TrackSlot::Shipping3 => "track_shipping3",
            TrackSlot::SovAct1 => "track_sov_act1",
            TrackSlot::SovAct2 => "track_sov_act2",
            TrackSlot::SovAct3 => "track_sov_act3",
        }
    }

    /// Parses a track slot from its string id.
    pub fn from_id(id: &str) -> Option<TrackSlot> {
        ALL_TRACK_SLOTS.iter().copied().find(|slot| slot.id() == id)
    }
}

/// Where a piece sits: a map space or a track slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    Map(Space),
    Track(TrackSlot),
}

impl Location {
    /// Returns the map space, or `None` for track slots.
    pub const fn space(self) -> Option<Space> {
        match self {
            Location::Map(space) => Some(space),
            Location::Track(_) => None,
        }
    }

    /// Returns the string id used by clients.
    pub fn id(self) -> String {
        match self {
            Location::Map(space) => space.to_string(),
            Location::Track(slot) => slot.id().to_string(),
        }
    }

    /// Parses a location from a numeric space id or a track slot id.
    pub fn from_id(id: &str) -> Option<Location> {
        Space::from_id(id)
            .map(Location::Map)
            .or_else(|| TrackSlot::from_id(id).map(Location::Track))
    }
}

impl From<Space> for Location {
    fn from(space: Space) -> Self {
        Location::Map(space)
    }
}

/// Spaces the German player may set up in.
pub fn in_german_zone(space: Space) -> bool {
    matches!(space.number(), 1..=4 | 20 | 24..=52)
}

/// Spaces the Soviet player may set up in.
pub fn in_soviet_zone(space: Space) -> bool {
    matches!(space.number(), 2..=24)
}

/// Königsberg perimeter: Land CEF doubles while the German holds all of it.
pub const KOENIGSBERG_PERIMETER: [u8; 4] = [2, 3, 4, 24];

/// Samland approaches to Pillau: Sea CEF -1 while the Soviet holds all of it.
pub const SAMLAND_APPROACHES: [u8; 3] = [26, 33, 34];

/// Haff coast of the Heiligenbeil pocket: Sea CEF -1 while the Soviet holds all of it.
pub const HAFF_COAST: [u8; 3] = [42, 43, 49];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_bounds() {
        assert!(Space::new(0).is_none());
        assert!(Space::new(53).is_none());
        assert_eq!(Space::new(1).map(Space::name), Some("Königsberg"));
        assert_eq!(Space::new(52).map(Space::name), Some("Narmeln"));
        assert_eq!(all_spaces().count(), SPACE_COUNT);
    }

    #[test]
    fn location_ids() {
        assert_eq!(Location::from_id("17"), Space::new(17).map(Location::Map));
        assert_eq!(
            Location::from_id("track_sov_act1"),
            Some(Location::Track(TrackSlot::SovAct1))
        );
        assert_eq!(Location::from_id("track_nowhere"), None);
        assert_eq!(Location::from_id("0"), None);
        assert_eq!(Location::Track(TrackSlot::Shipping2).id(), "track_shipping2");
    }

    #[test]
    fn setup_zones_overlap_on_contested_spaces() {
        let both: Vec<u8> = all_spaces()
            .filter(|s| in_german_zone(*s) && in_soviet_zone(*s))
            .map(Space::number)
            .collect();
        assert_eq!(both, vec![2, 3, 4, 20, 24]);
    }
}
