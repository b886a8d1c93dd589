//! Orchestrates a human-vs-AI game.
//!
//! [`Session`] owns the [`GameState`] and is its only writer. Front-ends call
//! its methods and render [`Session::state`]; the AI is reached through the
//! strategy traits, which may suspend for as long as they like.

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::{ProbabilityTargeter, RandomPlacer};
use crate::board::BoardState;
use crate::common::{Coordinate, Side};
use crate::config::GameConfig;
use crate::game::{GameError, GameState, Phase, TurnReport};
use crate::ship::{Orientation, ShipKind};
use crate::strategy::{
    assemble_fleet, enforce_available, AttackDecision, AttackRequest, AttackStrategy,
    PlacementRejection, PlacementStrategy,
};

/// What happened on an AI turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiTurn {
    Attacked(TurnReport),
    /// The strategy failed; the turn went back to the player unplayed.
    Forfeited { reason: String },
}

pub struct Session {
    state: GameState,
    placement: Box<dyn PlacementStrategy>,
    attack: Box<dyn AttackStrategy>,
    rng: SmallRng,
}

impl Session {
    /// `rng` drives the session's own randomness: the player's random fleet,
    /// fallback AI fleets and fallback attack targets.
    pub fn new(
        config: GameConfig,
        placement: Box<dyn PlacementStrategy>,
        attack: Box<dyn AttackStrategy>,
        rng: SmallRng,
    ) -> Self {
        Session {
            state: GameState::new(config),
            placement,
            attack,
            rng,
        }
    }

    /// Session against the built-in AI, fully determined by `seed`.
    pub fn with_builtin_ai(config: GameConfig, seed: u64) -> Self {
        let mut master = SmallRng::seed_from_u64(seed);
        let placement = RandomPlacer::new(SmallRng::from_rng(&mut master));
        let attack = ProbabilityTargeter::new(SmallRng::from_rng(&mut master), config.ship_lengths());
        Session::new(config, Box::new(placement), Box::new(attack), master)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state for renderers.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// `true` when the next move belongs to the AI and nobody asked it yet.
    pub fn awaiting_ai(&self) -> bool {
        self.state.phase() == Phase::Playing
            && self.state.current_turn() == Side::Ai
            && !self.state.is_ai_thinking()
    }

    pub fn select_ship(&mut self, kind: ShipKind) -> Result<(), GameError> {
        self.state.select_ship(kind)
    }

    pub fn toggle_orientation(&mut self) -> Result<Orientation, GameError> {
        self.state.toggle_orientation()
    }

    pub fn place_ship(&mut self, anchor: Coordinate) -> Result<ShipKind, GameError> {
        self.state.place_player_ship(anchor)
    }

    pub fn randomize_fleet(&mut self) -> Result<(), GameError> {
        self.state.randomize_player_ships(&mut self.rng)
    }

    /// Back to a fresh setup phase. Strategies and rng are kept.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.state.config().clone());
        info!("game reset");
    }

    /// Ask the placement strategy for the AI fleet and start playing.
    ///
    /// A wrong ship count is a setup error: the session stays in setup.
    /// Any other bad placement is replaced by a random AI fleet.
    pub async fn start_game(&mut self) -> Result<(), GameError> {
        let request = self.state.begin_start()?;
        let placements = match self.placement.place_fleet(&request).await {
            Ok(p) => p,
            Err(e) => {
                warn!("placement strategy failed: {:#}", e);
                self.state.abort_start();
                return Err(GameError::Strategy(e.to_string()));
            }
        };

        let board = match assemble_fleet(Side::Ai, self.state.config(), &placements) {
            Ok(board) => board,
            Err(PlacementRejection::WrongCount { expected, actual }) => {
                warn!("AI placed {} ships, expected {}", actual, expected);
                self.state.abort_start();
                return Err(GameError::FleetCountMismatch { expected, actual });
            }
            Err(rejection) => {
                warn!("AI fleet rejected ({}); placing it at random", rejection);
                let config = self.state.config();
                match BoardState::random_fleet(
                    Side::Ai,
                    config.board_size(),
                    config.fleet(),
                    config.max_placement_attempts(),
                    &mut self.rng,
                ) {
                    Ok(board) => board,
                    Err(e) => {
                        self.state.abort_start();
                        return Err(e.into());
                    }
                }
            }
        };
        if let Err(e) = self.state.enter_play(board) {
            warn!("AI fleet not accepted: {}", e);
            self.state.abort_start();
            return Err(e);
        }
        Ok(())
    }

    pub fn player_attack(&mut self, coord: Coordinate) -> Result<TurnReport, GameError> {
        self.state.player_attack(coord)
    }

    /// Mark the AI as thinking and return its view of the game. Pair with
    /// [`Session::finish_ai_turn`].
    pub fn begin_ai_turn(&mut self) -> Result<AttackRequest, GameError> {
        self.state.begin_ai_turn()
    }

    /// Apply what the attack strategy answered to `request`.
    ///
    /// Availability is taken from the current state, not from `request`: a
    /// target the AI has already fired at or that lies off the board is
    /// swapped for a random available one. A strategy error forfeits the turn.
    pub fn finish_ai_turn(
        &mut self,
        request: &AttackRequest,
        answer: anyhow::Result<AttackDecision>,
    ) -> Result<AiTurn, GameError> {
        match answer {
            Ok(decision) => {
                let available = self.state.attacks(Side::Ai).available_coordinates();
                if available.len() != request.available.len() {
                    warn!(
                        "stale AI request: {} cells offered, {} open",
                        request.available.len(),
                        available.len()
                    );
                }
                let decision = enforce_available(decision, &available, &mut self.rng);
                match self.state.apply_ai_decision(decision) {
                    Ok(report) => Ok(AiTurn::Attacked(report)),
                    Err(GameError::Board(e)) => {
                        warn!("AI move rejected: {}", e);
                        Ok(AiTurn::Forfeited {
                            reason: e.to_string(),
                        })
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => {
                warn!("attack strategy failed: {:#}", e);
                self.state.forfeit_ai_turn()?;
                Ok(AiTurn::Forfeited {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Play the AI's turn with the session's attack strategy.
    pub async fn run_ai_turn(&mut self) -> Result<AiTurn, GameError> {
        let request = self.begin_ai_turn()?;
        let answer = self.attack.choose_attack(&request).await;
        self.finish_ai_turn(&request, answer)
    }
}
