//! Ship catalog, placed ship instances and the cells a ship occupies.

use core::fmt;
use core::str::FromStr;

use crate::common::{Coordinate, Side};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// The closed set of ship kinds a fleet can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    pub const ALL: [ShipKind; 5] = [
        ShipKind::Carrier,
        ShipKind::Battleship,
        ShipKind::Cruiser,
        ShipKind::Submarine,
        ShipKind::Destroyer,
    ];

    /// Catalog entry for this kind.
    pub const fn definition(self) -> ShipDef {
        match self {
            ShipKind::Carrier => ShipDef::new(self, "Carrier", 5),
            ShipKind::Battleship => ShipDef::new(self, "Battleship", 4),
            ShipKind::Cruiser => ShipDef::new(self, "Cruiser", 3),
            ShipKind::Submarine => ShipDef::new(self, "Submarine", 3),
            ShipKind::Destroyer => ShipDef::new(self, "Destroyer", 2),
        }
    }

    /// Stable lowercase id, e.g. `"carrier"`.
    pub fn id(self) -> &'static str {
        match self {
            ShipKind::Carrier => "carrier",
            ShipKind::Battleship => "battleship",
            ShipKind::Cruiser => "cruiser",
            ShipKind::Submarine => "submarine",
            ShipKind::Destroyer => "destroyer",
        }
    }
}

/// Error returned when a ship name does not match any [`ShipKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShipKind(pub String);

impl fmt::Display for UnknownShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown ship '{}'", self.0)
    }
}

impl std::error::Error for UnknownShipKind {}

impl FromStr for ShipKind {
    type Err = UnknownShipKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ShipKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| UnknownShipKind(s.trim().to_string()))
    }
}

/// Catalog entry: kind, display name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShipDef {
    kind: ShipKind,
    name: &'static str,
    length: usize,
}

impl ShipDef {
    const fn new(kind: ShipKind, name: &'static str, length: usize) -> Self {
        Self { kind, name, length }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Cells covered by a ship of `length` starting at `anchor`.
pub(crate) fn span(
    anchor: Coordinate,
    length: usize,
    orientation: Orientation,
) -> impl Iterator<Item = Coordinate> {
    (0..length).map(move |i| anchor.step(orientation, i))
}

/// The `definition.length()` coordinates starting at `anchor`, extending
/// along +x for horizontal and +y for vertical. No bounds clamping.
pub fn occupied_cells(
    definition: &ShipDef,
    anchor: Coordinate,
    orientation: Orientation,
) -> Vec<Coordinate> {
    span(anchor, definition.length(), orientation).collect()
}

/// A ship placed on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ship {
    id: String,
    definition: ShipDef,
    coordinates: Vec<Coordinate>,
    hits: Vec<Coordinate>,
    sunk: bool,
    orientation: Orientation,
}

impl Ship {
    /// Build a ship for `owner`. Placement validity is the caller's concern.
    pub(crate) fn new(
        owner: Side,
        definition: ShipDef,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Self {
        Ship {
            id: format!("{}_{}", owner.id(), definition.id()),
            definition,
            coordinates: occupied_cells(&definition, anchor, orientation),
            hits: Vec::new(),
            sunk: false,
            orientation,
        }
    }

    /// Instance id, e.g. `"player_carrier"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn definition(&self) -> &ShipDef {
        &self.definition
    }

    pub fn kind(&self) -> ShipKind {
        self.definition.kind()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Coordinates hit so far, in the order they were hit.
    pub fn hits(&self) -> &[Coordinate] {
        &self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// First cell of the ship.
    pub fn anchor(&self) -> Coordinate {
        self.coordinates[0]
    }

    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.coordinates.contains(&coord)
    }

    /// Record a hit at `coord`. Returns `false` if the ship does not occupy
    /// `coord` or that cell was already hit.
    pub(crate) fn register_hit(&mut self, coord: Coordinate) -> bool {
        if !self.occupies(coord) || self.hits.contains(&coord) {
            return false;
        }
        self.hits.push(coord);
        self.sunk = self.hits.len() == self.definition.length();
        true
    }
}
