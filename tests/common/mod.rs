#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use battleship::{
    AttackDecision, AttackRequest, AttackStrategy, Coordinate, GameConfig, Orientation,
    PlacementRequest, PlacementStrategy, Session, ShipPlacement,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Returns the same placements every time.
pub struct FixedPlacement(pub Vec<ShipPlacement>);

#[async_trait]
impl PlacementStrategy for FixedPlacement {
    async fn place_fleet(&mut self, _request: &PlacementRequest) -> anyhow::Result<Vec<ShipPlacement>> {
        Ok(self.0.clone())
    }
}

pub struct FailingPlacement;

#[async_trait]
impl PlacementStrategy for FailingPlacement {
    async fn place_fleet(&mut self, _request: &PlacementRequest) -> anyhow::Result<Vec<ShipPlacement>> {
        anyhow::bail!("placement service unavailable")
    }
}

/// Requests seen by a [`ScriptedAttack`], shared with the test after the
/// strategy is boxed into a session.
pub type RequestLog = Arc<Mutex<Vec<AttackRequest>>>;

/// Fires at the queued coordinates in order; fails once the queue is empty.
pub struct ScriptedAttack {
    queue: VecDeque<Coordinate>,
    requests: RequestLog,
}

impl ScriptedAttack {
    pub fn new(coords: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            queue: coords.into_iter().collect(),
            requests: RequestLog::default(),
        }
    }

    pub fn log(&self) -> RequestLog {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl AttackStrategy for ScriptedAttack {
    async fn choose_attack(&mut self, request: &AttackRequest) -> anyhow::Result<AttackDecision> {
        self.requests.lock().unwrap().push(request.clone());
        let coordinate = self
            .queue
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))?;
        Ok(AttackDecision {
            coordinate,
            rationale: format!("scripted shot at {}", coordinate),
        })
    }
}

/// Carrier, Battleship, Cruiser, Submarine, Destroyer laid out horizontally
/// on rows 0 to 4, each starting in column 0.
pub fn stacked_placements() -> Vec<ShipPlacement> {
    [5, 4, 3, 3, 2]
        .iter()
        .enumerate()
        .map(|(row, &length)| ShipPlacement {
            anchor: Coordinate::new(0, row),
            length,
            orientation: Orientation::Horizontal,
        })
        .collect()
}

/// Every cell covered by [`stacked_placements`], ship by ship.
pub fn stacked_cells() -> Vec<Coordinate> {
    stacked_placements()
        .iter()
        .flat_map(|p| (0..p.length).map(move |i| Coordinate::new(p.anchor.x + i, p.anchor.y)))
        .collect()
}

/// Cells on rows 8 and 9, which [`stacked_placements`] never touches.
pub fn open_water() -> Vec<Coordinate> {
    (8..10)
        .rev()
        .flat_map(|y| (0..10).map(move |x| Coordinate::new(x, y)))
        .collect()
}

pub fn session_with(
    placement: impl PlacementStrategy + 'static,
    attack: impl AttackStrategy + 'static,
) -> Session {
    Session::new(
        GameConfig::default(),
        Box::new(placement),
        Box::new(attack),
        SmallRng::seed_from_u64(7),
    )
}

/// Place the player's fleet like [`stacked_placements`].
pub fn place_stacked_fleet(session: &mut Session) {
    for p in stacked_placements() {
        if session.state().orientation() != p.orientation {
            session.toggle_orientation().unwrap();
        }
        session.place_ship(p.anchor).unwrap();
    }
}
