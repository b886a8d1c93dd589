//! Boundary to the opponent's decision making.
//!
//! The session only ever talks to the AI through [`PlacementStrategy`] and
//! [`AttackStrategy`]. Any backing works: the built-in heuristics in
//! [`crate::ai`], a scripted test double, or a remote service. The helpers
//! here enforce the contract at the session's side of the boundary.

use core::fmt;

use log::warn;
use rand::Rng;

use crate::board::{BoardState, TargetCell};
use crate::common::{Coordinate, Side};
use crate::config::GameConfig;
use crate::ship::{Orientation, ShipDef};

/// Inputs for a full-fleet placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub board_size: usize,
    pub ship_lengths: Vec<usize>,
}

/// One ship as returned by a placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShipPlacement {
    pub anchor: Coordinate,
    pub length: usize,
    pub orientation: Orientation,
}

/// Public information handed to the attack strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackRequest {
    pub board_size: usize,
    /// Cells not attacked yet; the only legal answers.
    pub available: Vec<Coordinate>,
    /// Attacker's record, unattacked cells as `Unknown`.
    pub view: Vec<Vec<TargetCell>>,
    /// Hits on ships that are still afloat.
    pub active_hits: Vec<Coordinate>,
    /// Lengths of the opponent's ships not sunk yet.
    pub remaining_lengths: Vec<usize>,
}

/// A chosen target and the strategy's explanation for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttackDecision {
    pub coordinate: Coordinate,
    pub rationale: String,
}

/// Places the AI's fleet at the start of the game.
#[async_trait::async_trait]
pub trait PlacementStrategy: Send {
    /// Return exactly one placement per entry of `request.ship_lengths`.
    async fn place_fleet(&mut self, request: &PlacementRequest)
        -> anyhow::Result<Vec<ShipPlacement>>;
}

/// Picks the AI's next target.
#[async_trait::async_trait]
pub trait AttackStrategy: Send {
    /// Return a member of `request.available`.
    async fn choose_attack(&mut self, request: &AttackRequest) -> anyhow::Result<AttackDecision>;
}

/// Replace an attack choice outside `available` with a uniformly random
/// member of it, noting the substitution in the rationale.
///
/// # Panics
///
/// If `available` is empty. The session ends the game before the defending
/// fleet can run out of unattacked cells, so there is always a target.
pub fn enforce_available<R: Rng + ?Sized>(
    decision: AttackDecision,
    available: &[Coordinate],
    rng: &mut R,
) -> AttackDecision {
    assert!(
        !available.is_empty(),
        "attack requested with no coordinates left to attack"
    );
    if available.contains(&decision.coordinate) {
        return decision;
    }
    let fallback = available[rng.random_range(0..available.len())];
    warn!(
        "AI chose unavailable coordinate {}; substituting {}",
        decision.coordinate, fallback
    );
    AttackDecision {
        coordinate: fallback,
        rationale: format!(
            "AI original choice was invalid {}. Fallback to random available coordinate. Original reasoning: {}",
            decision.coordinate, decision.rationale
        ),
    }
}

/// Why a strategy's fleet was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    /// Number of ships differs from the catalog.
    WrongCount { expected: usize, actual: usize },
    /// No unused catalog entry has this length.
    UnmatchedLength(usize),
    /// Out of bounds or overlapping an earlier ship.
    Invalid(ShipPlacement),
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRejection::WrongCount { expected, actual } => {
                write!(f, "expected {} ships, got {}", expected, actual)
            }
            PlacementRejection::UnmatchedLength(len) => {
                write!(f, "no unused ship of length {}", len)
            }
            PlacementRejection::Invalid(p) => write!(
                f,
                "ship of length {} at {} ({}) is out of bounds or overlapping",
                p.length, p.anchor, p.orientation
            ),
        }
    }
}

/// Build `owner`'s board from strategy placements.
///
/// Each placement consumes one unused catalog entry of the same length, so
/// the returned lengths must match the catalog as a multiset. Geometry is
/// validated like a manual placement.
pub fn assemble_fleet(
    owner: Side,
    config: &GameConfig,
    placements: &[ShipPlacement],
) -> Result<BoardState, PlacementRejection> {
    let expected = config.fleet().len();
    if placements.len() != expected {
        return Err(PlacementRejection::WrongCount {
            expected,
            actual: placements.len(),
        });
    }
    let mut unused: Vec<ShipDef> = config.fleet().to_vec();
    let mut board = BoardState::new(owner, config.board_size());
    for placement in placements {
        let pos = unused
            .iter()
            .position(|d| d.length() == placement.length)
            .ok_or(PlacementRejection::UnmatchedLength(placement.length))?;
        let def = unused.remove(pos);
        board = board
            .place_ship(&def, placement.anchor, placement.orientation)
            .map_err(|_| PlacementRejection::Invalid(*placement))?;
    }
    Ok(board)
}
