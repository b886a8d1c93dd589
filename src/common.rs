//! Common value types for Battleship: coordinates, cell states, sides,
//! attack results and board errors.

use core::fmt;

use crate::grid::GridError;
use crate::ship::{Orientation, ShipKind};

/// A cell on the N×N grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The coordinate `steps` cells further along `orientation`.
    /// Saturates instead of wrapping so huge anchors stay out of bounds.
    pub fn step(self, orientation: Orientation, steps: usize) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(self.x.saturating_add(steps), self.y),
            Orientation::Vertical => Self::new(self.x, self.y.saturating_add(steps)),
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellState {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
    Sunk,
}

impl CellState {
    /// Whether an attack has already landed on this cell.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss | CellState::Sunk)
    }

    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Ship => 'S',
            CellState::Hit => 'X',
            CellState::Miss => 'o',
            CellState::Sunk => '#',
        }
    }
}

/// Outcome of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttackResult {
    Hit,
    Miss,
    Sunk,
}

impl AttackResult {
    /// `Sunk` counts as a hit.
    pub fn is_hit(self) -> bool {
        !matches!(self, AttackResult::Miss)
    }

    /// Result carried by a cell that was already attacked.
    pub fn from_resolved(cell: CellState) -> Option<Self> {
        match cell {
            CellState::Hit => Some(AttackResult::Hit),
            CellState::Miss => Some(AttackResult::Miss),
            CellState::Sunk => Some(AttackResult::Sunk),
            CellState::Empty | CellState::Ship => None,
        }
    }
}

impl From<AttackResult> for CellState {
    fn from(result: AttackResult) -> Self {
        match result {
            AttackResult::Hit => CellState::Hit,
            AttackResult::Miss => CellState::Miss,
            AttackResult::Sunk => CellState::Sunk,
        }
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Prefix used for ship instance ids.
    pub fn id(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Ai => "ai",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying grid error (coordinate outside the board).
    Grid(GridError),
    /// Placement leaves the board or overlaps another ship.
    InvalidPlacement {
        kind: ShipKind,
        anchor: Coordinate,
        orientation: Orientation,
    },
    /// The fleet already holds a ship of this kind.
    ShipAlreadyPlaced(ShipKind),
    /// An attack was already recorded at this coordinate.
    AlreadyAttacked(Coordinate),
    /// Random search ran out of attempts for this ship.
    NoPlacementFound(ShipKind),
}

impl From<GridError> for BoardError {
    fn from(err: GridError) -> Self {
        BoardError::Grid(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Grid(e) => write!(f, "{}", e),
            BoardError::InvalidPlacement {
                kind,
                anchor,
                orientation,
            } => write!(
                f,
                "Cannot place {} {} at {}: out of bounds or overlapping",
                kind.definition().name(),
                orientation,
                anchor
            ),
            BoardError::ShipAlreadyPlaced(kind) => {
                write!(f, "{} is already placed", kind.definition().name())
            }
            BoardError::AlreadyAttacked(coord) => {
                write!(f, "{} was already attacked", coord)
            }
            BoardError::NoPlacementFound(kind) => write!(
                f,
                "No room found for the {}",
                kind.definition().name()
            ),
        }
    }
}

impl std::error::Error for BoardError {}
