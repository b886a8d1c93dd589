//! Board state: ship placement, attack resolution and the attacker's record.
//!
//! Every operation that changes a board returns a fresh [`BoardState`] and
//! leaves its input untouched.

use core::fmt;
use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::common::{AttackResult, BoardError, CellState, Coordinate, Side};
use crate::grid::{is_within_bounds, Grid};
use crate::ship::{span, Orientation, Ship, ShipDef, ShipKind};

/// `true` if a ship of `definition` at `anchor` stays on the grid and does
/// not share a cell with `existing`. Adjacent ships are allowed.
pub fn validate_placement(
    grid: &Grid,
    existing: &[Ship],
    definition: &ShipDef,
    anchor: Coordinate,
    orientation: Orientation,
) -> bool {
    span(anchor, definition.length(), orientation)
        .all(|c| grid.contains(c) && !existing.iter().any(|s| s.occupies(c)))
}

/// Search for a random valid placement of a ship of `length`.
///
/// Anchors are drawn uniformly from the whole grid together with a random
/// orientation; triples already tried are skipped but still count against
/// `max_attempts`. Returns `None` once the budget is spent or every triple
/// has been tried.
pub(crate) fn search_placement<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    length: usize,
    max_attempts: usize,
    is_taken: impl Fn(Coordinate) -> bool,
) -> Option<(Coordinate, Orientation)> {
    let total = size * size * Orientation::BOTH.len();
    let mut tried: HashSet<(Coordinate, Orientation)> = HashSet::new();
    for _ in 0..max_attempts {
        if tried.len() == total {
            break;
        }
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let anchor = Coordinate::new(rng.random_range(0..size), rng.random_range(0..size));
        if !tried.insert((anchor, orientation)) {
            continue;
        }
        if span(anchor, length, orientation).all(|c| is_within_bounds(c, size) && !is_taken(c)) {
            return Some((anchor, orientation));
        }
    }
    None
}

/// Random valid `(anchor, orientation)` for `definition`, or `None` when the
/// grid is too crowded to find one within `max_attempts`.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    definition: &ShipDef,
    existing: &[Ship],
    grid: &Grid,
    max_attempts: usize,
) -> Option<(Coordinate, Orientation)> {
    if grid.size() == 0 {
        return None;
    }
    search_placement(rng, grid.size(), definition.length(), max_attempts, |c| {
        existing.iter().any(|s| s.occupies(c))
    })
}

/// `true` iff every ship in `fleet` is sunk.
pub fn is_fleet_destroyed(fleet: &[Ship]) -> bool {
    fleet.iter().all(Ship::is_sunk)
}

/// Result of [`BoardState::resolve_attack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Board after the attack.
    pub board: BoardState,
    pub result: AttackResult,
    /// Kind of the ship hit, if any.
    pub ship: Option<ShipKind>,
    /// Cells of the ship this attack sank; empty unless `result` is `Sunk`.
    pub sunk_cells: Vec<Coordinate>,
    /// The cell had already been attacked and nothing changed.
    pub repeated: bool,
}

/// One side's own board: the grid and the fleet on it.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoardState {
    owner: Side,
    grid: Grid,
    fleet: Vec<Ship>,
}

impl BoardState {
    /// An empty `size`×`size` board with no ships.
    pub fn new(owner: Side, size: usize) -> Self {
        BoardState {
            owner,
            grid: Grid::new(size),
            fleet: Vec::new(),
        }
    }

    /// Place every definition of `fleet` at random, in order.
    /// Fails with the first ship that found no room; nothing is kept then.
    pub fn random_fleet<R: Rng + ?Sized>(
        owner: Side,
        size: usize,
        fleet: &[ShipDef],
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut board = BoardState::new(owner, size);
        for def in fleet {
            let (anchor, orientation) =
                random_placement(rng, def, &board.fleet, &board.grid, max_attempts)
                    .ok_or(BoardError::NoPlacementFound(def.kind()))?;
            board = board.place_ship(def, anchor, orientation)?;
        }
        Ok(board)
    }

    pub fn owner(&self) -> Side {
        self.owner
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &[Ship] {
        &self.fleet
    }

    pub fn ship(&self, kind: ShipKind) -> Option<&Ship> {
        self.fleet.iter().find(|s| s.kind() == kind)
    }

    pub fn has_ship(&self, kind: ShipKind) -> bool {
        self.ship(kind).is_some()
    }

    /// Ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        self.fleet.iter().find(|s| s.occupies(coord))
    }

    pub fn validate_placement(
        &self,
        definition: &ShipDef,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> bool {
        validate_placement(&self.grid, &self.fleet, definition, anchor, orientation)
    }

    /// New board with the ship appended and its cells marked `Ship`.
    pub fn place_ship(
        &self,
        definition: &ShipDef,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        if self.has_ship(definition.kind()) {
            return Err(BoardError::ShipAlreadyPlaced(definition.kind()));
        }
        if !self.validate_placement(definition, anchor, orientation) {
            return Err(BoardError::InvalidPlacement {
                kind: definition.kind(),
                anchor,
                orientation,
            });
        }
        let ship = Ship::new(self.owner, *definition, anchor, orientation);
        let mut next = self.clone();
        for &c in ship.coordinates() {
            next.grid.set(c, CellState::Ship)?;
        }
        debug!(
            "{} placed {} at {} ({})",
            self.owner,
            definition.name(),
            anchor,
            orientation
        );
        next.fleet.push(ship);
        Ok(next)
    }

    /// Apply an attack at `coord`.
    ///
    /// Attacking a cell that is already `Hit`, `Miss` or `Sunk` changes
    /// nothing and reports the existing state again. When the last cell of
    /// a ship is hit, every cell of that ship becomes `Sunk`.
    pub fn resolve_attack(&self, coord: Coordinate) -> Result<AttackOutcome, BoardError> {
        let cell = self.grid.get(coord)?;
        if let Some(prior) = AttackResult::from_resolved(cell) {
            return Ok(AttackOutcome {
                board: self.clone(),
                result: prior,
                ship: self.ship_at(coord).map(Ship::kind),
                sunk_cells: Vec::new(),
                repeated: true,
            });
        }

        let mut next = self.clone();
        let Some(idx) = self.fleet.iter().position(|s| s.occupies(coord)) else {
            next.grid.set(coord, CellState::Miss)?;
            return Ok(AttackOutcome {
                board: next,
                result: AttackResult::Miss,
                ship: None,
                sunk_cells: Vec::new(),
                repeated: false,
            });
        };

        let ship = &mut next.fleet[idx];
        ship.register_hit(coord);
        let kind = ship.kind();
        if !ship.is_sunk() {
            next.grid.set(coord, CellState::Hit)?;
            return Ok(AttackOutcome {
                board: next,
                result: AttackResult::Hit,
                ship: Some(kind),
                sunk_cells: Vec::new(),
                repeated: false,
            });
        }

        let sunk_cells = ship.coordinates().to_vec();
        for &c in &sunk_cells {
            next.grid.set(c, CellState::Sunk)?;
        }
        Ok(AttackOutcome {
            board: next,
            result: AttackResult::Sunk,
            ship: Some(kind),
            sunk_cells,
            repeated: false,
        })
    }

    pub fn is_fleet_destroyed(&self) -> bool {
        is_fleet_destroyed(&self.fleet)
    }

    /// Grid as the opponent may see it: `Ship` cells read as `Empty`.
    pub fn public_view(&self) -> Grid {
        self.grid.map(|c| match c {
            CellState::Ship => CellState::Empty,
            other => other,
        })
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BoardState {{\n  owner: {:?},\n  grid: {:?},\n  fleet: {:?}\n}}",
            self.owner, self.grid, self.fleet
        )
    }
}

/// A cell of the attacker's view handed to the attack strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TargetCell {
    Unknown,
    Hit,
    Miss,
    Sunk,
}

impl TargetCell {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetCell::Unknown => "?",
            TargetCell::Hit => "hit",
            TargetCell::Miss => "miss",
            TargetCell::Sunk => "sunk",
        }
    }
}

impl fmt::Display for TargetCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side's record of its attacks on the other.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttackRecord {
    grid: Grid,
    hits: usize,
    misses: usize,
}

impl AttackRecord {
    pub fn new(size: usize) -> Self {
        AttackRecord {
            grid: Grid::new(size),
            hits: 0,
            misses: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn shots(&self) -> usize {
        self.hits + self.misses
    }

    /// `true` if `coord` is on the grid and has not been attacked yet.
    pub fn is_available(&self, coord: Coordinate) -> bool {
        matches!(self.grid.get(coord), Ok(CellState::Empty))
    }

    /// Cells not attacked yet, row by row.
    pub fn available_coordinates(&self) -> Vec<Coordinate> {
        self.grid
            .cells()
            .filter(|&(_, c)| c == CellState::Empty)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Mirror an attack result at `coord` and bump the counters.
    pub fn record(&mut self, coord: Coordinate, result: AttackResult) -> Result<(), BoardError> {
        if self.grid.get(coord)? != CellState::Empty {
            return Err(BoardError::AlreadyAttacked(coord));
        }
        self.grid.set(coord, result.into())?;
        if result.is_hit() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        Ok(())
    }

    /// Upgrade the cells of a ship just sunk to `Sunk`.
    pub fn mark_sunk(&mut self, cells: &[Coordinate]) -> Result<(), BoardError> {
        for &c in cells {
            self.grid.set(c, CellState::Sunk)?;
        }
        Ok(())
    }

    /// The record as the attack strategy sees it.
    pub fn opponent_view(&self) -> Vec<Vec<TargetCell>> {
        self.grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&c| match c {
                        CellState::Hit => TargetCell::Hit,
                        CellState::Miss => TargetCell::Miss,
                        CellState::Sunk => TargetCell::Sunk,
                        CellState::Empty | CellState::Ship => TargetCell::Unknown,
                    })
                    .collect()
            })
            .collect()
    }

    /// Hits on ships that are not sunk yet.
    pub fn active_hits(&self) -> Vec<Coordinate> {
        self.grid
            .cells()
            .filter(|&(_, c)| c == CellState::Hit)
            .map(|(coord, _)| coord)
            .collect()
    }
}
