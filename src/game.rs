//! Game state and its transitions: setup, turn-by-turn play, game over.
//!
//! [`GameState`] holds everything a renderer needs and nothing else. Each
//! transition validates first and only then mutates, so a rejected action
//! leaves the state as it was. The asynchronous parts of a game (asking the
//! AI for a fleet or a target) are driven by [`crate::session::Session`].

use core::fmt;

use log::{debug, info};
use rand::Rng;

use crate::board::{AttackRecord, BoardState};
use crate::common::{AttackResult, BoardError, Coordinate, Side};
use crate::config::GameConfig;
use crate::ship::{Orientation, ShipKind};
use crate::strategy::{AttackDecision, AttackRequest, PlacementRequest};

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Phase {
    Setup,
    Playing,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Playing => write!(f, "playing"),
            Phase::GameOver => write!(f, "game over"),
        }
    }
}

/// Errors returned by game transitions. None of them end the process; a
/// rejected action leaves the state unchanged unless noted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Underlying board error (bad coordinate, overlap, repeated attack).
    Board(BoardError),
    /// Action not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// The player tried to act during the AI's turn.
    NotYourTurn,
    /// An AI request is outstanding.
    AiThinking,
    /// No AI request is outstanding.
    AiNotThinking,
    /// Placement requested with no ship selected.
    NoShipSelected,
    /// Ship kind is not part of this game's fleet.
    ShipNotInFleet(ShipKind),
    /// Start requested before the whole fleet is placed.
    SetupIncomplete { placed: usize, required: usize },
    /// Random fleet placement ran out of attempts; the board was reset.
    RandomPlacementFailed(ShipKind),
    /// The placement strategy returned the wrong number of ships.
    FleetCountMismatch { expected: usize, actual: usize },
    /// The AI board handed to the game does not hold this game's fleet.
    InvalidAiFleet { placed: usize, required: usize },
    /// The strategy collaborator failed.
    Strategy(String),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "{}", e),
            GameError::WrongPhase { expected, actual } => {
                write!(f, "Not allowed during {} (only during {})", actual, expected)
            }
            GameError::NotYourTurn => write!(f, "It is not your turn"),
            GameError::AiThinking => write!(f, "The AI is still deciding"),
            GameError::AiNotThinking => write!(f, "No AI move is pending"),
            GameError::NoShipSelected => write!(f, "Select a ship to place first"),
            GameError::ShipNotInFleet(kind) => {
                write!(f, "{} is not part of this fleet", kind.definition().name())
            }
            GameError::SetupIncomplete { placed, required } => write!(
                f,
                "Place all your ships before starting ({} of {} placed)",
                placed, required
            ),
            GameError::RandomPlacementFailed(kind) => write!(
                f,
                "Could not place all ships randomly (no room for the {}). Try again or place manually",
                kind.definition().name()
            ),
            GameError::FleetCountMismatch { expected, actual } => write!(
                f,
                "AI placed {} ships, expected {}",
                actual, expected
            ),
            GameError::InvalidAiFleet { placed, required } => write!(
                f,
                "AI board does not hold this game's fleet ({} of {} ships)",
                placed, required
            ),
            GameError::Strategy(msg) => write!(f, "AI error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

/// What one attack did, for messages and renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TurnReport {
    pub attacker: Side,
    pub coordinate: Coordinate,
    pub result: AttackResult,
    pub ship: Option<ShipKind>,
    /// Set when this attack ended the game.
    pub winner: Option<Side>,
    pub message: String,
}

fn attack_message(attacker: Side, result: AttackResult, ship: Option<ShipKind>) -> String {
    let name = ship.map(|k| k.definition().name());
    match (attacker, result, name) {
        (Side::Player, AttackResult::Miss, _) => "Your shot missed.".to_string(),
        (Side::Player, AttackResult::Hit, Some(n)) => format!("You hit AI's {}!", n),
        (Side::Player, AttackResult::Sunk, Some(n)) => format!("You sunk AI's {}!", n),
        (Side::Player, AttackResult::Hit, None) => "You hit an AI ship!".to_string(),
        (Side::Player, AttackResult::Sunk, None) => "You sunk an AI ship!".to_string(),
        (Side::Ai, AttackResult::Miss, _) => "AI's shot missed.".to_string(),
        (Side::Ai, AttackResult::Hit, Some(n)) => format!("AI hit your {}!", n),
        (Side::Ai, AttackResult::Sunk, Some(n)) => format!("AI sunk your {}!", n),
        (Side::Ai, AttackResult::Hit, None) => "AI hit one of your ships!".to_string(),
        (Side::Ai, AttackResult::Sunk, None) => "AI sunk one of your ships!".to_string(),
    }
}

/// Full snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameState {
    config: GameConfig,
    player_board: BoardState,
    ai_board: BoardState,
    player_attacks: AttackRecord,
    ai_attacks: AttackRecord,
    current_turn: Side,
    phase: Phase,
    winner: Option<Side>,
    selected_ship: Option<ShipKind>,
    orientation: Orientation,
    status: String,
    ai_rationale: Option<String>,
    ai_thinking: bool,
}

impl GameState {
    /// A fresh game in the setup phase with the first catalog entry selected.
    pub fn new(config: GameConfig) -> Self {
        let size = config.board_size();
        let selected_ship = config.fleet().first().map(|d| d.kind());
        GameState {
            player_board: BoardState::new(Side::Player, size),
            ai_board: BoardState::new(Side::Ai, size),
            player_attacks: AttackRecord::new(size),
            ai_attacks: AttackRecord::new(size),
            current_turn: Side::Player,
            phase: Phase::Setup,
            winner: None,
            selected_ship,
            orientation: Orientation::Horizontal,
            status: "Place your ships.".to_string(),
            ai_rationale: None,
            ai_thinking: false,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// `side`'s own board.
    pub fn board(&self, side: Side) -> &BoardState {
        match side {
            Side::Player => &self.player_board,
            Side::Ai => &self.ai_board,
        }
    }

    /// `side`'s record of its attacks on the other side.
    pub fn attacks(&self, side: Side) -> &AttackRecord {
        match side {
            Side::Player => &self.player_attacks,
            Side::Ai => &self.ai_attacks,
        }
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn selected_ship(&self) -> Option<ShipKind> {
        self.selected_ship
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Rationale the AI gave for its last attack.
    pub fn ai_rationale(&self) -> Option<&str> {
        self.ai_rationale.as_deref()
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    /// Every catalog entry has exactly one ship on the player's board.
    pub fn is_setup_complete(&self) -> bool {
        self.config
            .fleet()
            .iter()
            .all(|d| self.player_board.has_ship(d.kind()))
            && self.player_board.fleet().len() == self.config.fleet().len()
    }

    fn board_mut(&mut self, side: Side) -> &mut BoardState {
        match side {
            Side::Player => &mut self.player_board,
            Side::Ai => &mut self.ai_board,
        }
    }

    fn attacks_mut(&mut self, side: Side) -> &mut AttackRecord {
        match side {
            Side::Player => &mut self.player_attacks,
            Side::Ai => &mut self.ai_attacks,
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn expect_setup(&self) -> Result<(), GameError> {
        self.expect_phase(Phase::Setup)?;
        if self.ai_thinking {
            return Err(GameError::AiThinking);
        }
        Ok(())
    }

    fn next_unplaced(&self) -> Option<ShipKind> {
        self.config
            .fleet()
            .iter()
            .map(|d| d.kind())
            .find(|&k| !self.player_board.has_ship(k))
    }

    /// Choose which ship the next placement puts down.
    pub fn select_ship(&mut self, kind: ShipKind) -> Result<(), GameError> {
        self.expect_setup()?;
        let def = self
            .config
            .definition(kind)
            .ok_or(GameError::ShipNotInFleet(kind))?;
        self.status = format!("Place your {}.", def.name());
        self.selected_ship = Some(kind);
        Ok(())
    }

    pub fn toggle_orientation(&mut self) -> Result<Orientation, GameError> {
        self.expect_setup()?;
        self.orientation = self.orientation.toggled();
        Ok(self.orientation)
    }

    /// Place the selected ship at `anchor` with the current orientation and
    /// select the next unplaced one.
    pub fn place_player_ship(&mut self, anchor: Coordinate) -> Result<ShipKind, GameError> {
        self.expect_setup()?;
        let kind = self.selected_ship.ok_or(GameError::NoShipSelected)?;
        let def = *self
            .config
            .definition(kind)
            .ok_or(GameError::ShipNotInFleet(kind))?;
        self.player_board = self
            .player_board
            .place_ship(&def, anchor, self.orientation)?;
        self.selected_ship = self.next_unplaced();
        self.status = match self.selected_ship.and_then(|k| self.config.definition(k)) {
            Some(next) => format!("Place your {}.", next.name()),
            None => "All ships placed. Ready to start!".to_string(),
        };
        Ok(kind)
    }

    /// Place the whole fleet at random.
    ///
    /// All or nothing: if any ship finds no room, the player's board is
    /// reset to empty and the first catalog entry selected again.
    pub fn randomize_player_ships<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.expect_setup()?;
        match BoardState::random_fleet(
            Side::Player,
            self.config.board_size(),
            self.config.fleet(),
            self.config.max_placement_attempts(),
            rng,
        ) {
            Ok(board) => {
                self.player_board = board;
                self.selected_ship = None;
                self.status = "Random placement complete. Ready to start!".to_string();
                Ok(())
            }
            Err(BoardError::NoPlacementFound(kind)) => {
                self.player_board = BoardState::new(Side::Player, self.config.board_size());
                self.selected_ship = self.config.fleet().first().map(|d| d.kind());
                self.status = "Randomization failed. Try again or place manually.".to_string();
                Err(GameError::RandomPlacementFailed(kind))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check the player's fleet is complete and mark the AI as placing its
    /// ships. Returns what the placement strategy needs to know.
    pub fn begin_start(&mut self) -> Result<PlacementRequest, GameError> {
        self.expect_setup()?;
        if !self.is_setup_complete() {
            return Err(GameError::SetupIncomplete {
                placed: self.player_board.fleet().len(),
                required: self.config.fleet().len(),
            });
        }
        self.ai_thinking = true;
        self.status = "AI is placing its ships...".to_string();
        Ok(PlacementRequest {
            board_size: self.config.board_size(),
            ship_lengths: self.config.ship_lengths(),
        })
    }

    /// Install the AI's board and begin play with the player to move.
    ///
    /// The board must belong to the AI, match the configured size and hold
    /// exactly one ship per catalog entry.
    pub fn enter_play(&mut self, ai_board: BoardState) -> Result<(), GameError> {
        self.expect_phase(Phase::Setup)?;
        if !self.ai_thinking {
            return Err(GameError::AiNotThinking);
        }
        let complete = ai_board.owner() == Side::Ai
            && ai_board.size() == self.config.board_size()
            && ai_board.fleet().len() == self.config.fleet().len()
            && self.config.fleet().iter().all(|d| ai_board.has_ship(d.kind()));
        if !complete {
            return Err(GameError::InvalidAiFleet {
                placed: ai_board.fleet().len(),
                required: self.config.fleet().len(),
            });
        }
        self.ai_board = ai_board;
        self.phase = Phase::Playing;
        self.current_turn = Side::Player;
        self.ai_thinking = false;
        self.status = "Game started! Your turn to attack.".to_string();
        info!("game started on a {0}x{0} board", self.config.board_size());
        Ok(())
    }

    /// Leave setup pending after the AI failed to produce a fleet.
    pub fn abort_start(&mut self) {
        self.ai_thinking = false;
        self.status = "Error with AI setup. Please try starting again.".to_string();
    }

    /// The player's attack on the AI's board.
    pub fn player_attack(&mut self, coord: Coordinate) -> Result<TurnReport, GameError> {
        self.expect_phase(Phase::Playing)?;
        if self.current_turn != Side::Player {
            return Err(GameError::NotYourTurn);
        }
        if self.ai_thinking {
            return Err(GameError::AiThinking);
        }
        self.apply_attack(Side::Player, coord)
    }

    /// Mark the AI as deciding and build its view of the game.
    pub fn begin_ai_turn(&mut self) -> Result<AttackRequest, GameError> {
        self.expect_phase(Phase::Playing)?;
        if self.current_turn != Side::Ai {
            return Err(GameError::NotYourTurn);
        }
        if self.ai_thinking {
            return Err(GameError::AiThinking);
        }
        self.ai_thinking = true;
        self.status = "AI is thinking...".to_string();
        Ok(self.attack_request(Side::Ai))
    }

    /// What `side` knows about the opponent's board, in strategy form.
    pub fn attack_request(&self, side: Side) -> AttackRequest {
        let record = self.attacks(side);
        AttackRequest {
            board_size: self.config.board_size(),
            available: record.available_coordinates(),
            view: record.opponent_view(),
            active_hits: record.active_hits(),
            remaining_lengths: self
                .board(side.opponent())
                .fleet()
                .iter()
                .filter(|s| !s.is_sunk())
                .map(|s| s.definition().length())
                .collect(),
        }
    }

    /// Apply the AI's (already validated) decision.
    ///
    /// A target the board rejects forfeits the turn before the error is
    /// returned.
    pub fn apply_ai_decision(&mut self, decision: AttackDecision) -> Result<TurnReport, GameError> {
        self.expect_phase(Phase::Playing)?;
        if self.current_turn != Side::Ai || !self.ai_thinking {
            return Err(GameError::AiNotThinking);
        }
        match self.apply_attack(Side::Ai, decision.coordinate) {
            Ok(report) => {
                self.ai_thinking = false;
                self.ai_rationale = Some(decision.rationale);
                Ok(report)
            }
            Err(e) => {
                self.hand_back_turn();
                Err(e)
            }
        }
    }

    /// The AI failed to move: hand the turn back without recording anything.
    pub fn forfeit_ai_turn(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::Playing)?;
        if !self.ai_thinking {
            return Err(GameError::AiNotThinking);
        }
        self.hand_back_turn();
        Ok(())
    }

    fn hand_back_turn(&mut self) {
        self.ai_thinking = false;
        self.current_turn = Side::Player;
        self.status = "AI error. Your turn.".to_string();
    }

    /// Resolve, mirror, check for a winner, pass the turn.
    fn apply_attack(&mut self, attacker: Side, coord: Coordinate) -> Result<TurnReport, GameError> {
        let defender = attacker.opponent();
        if !self.attacks(attacker).is_available(coord) {
            // Out-of-bounds coordinates surface as a grid error.
            self.attacks(attacker).grid().get(coord).map_err(BoardError::from)?;
            return Err(BoardError::AlreadyAttacked(coord).into());
        }
        let outcome = self.board(defender).resolve_attack(coord)?;

        // Validate the record update on a copy before committing anything.
        let mut record = self.attacks(attacker).clone();
        record.record(coord, outcome.result)?;
        record.mark_sunk(&outcome.sunk_cells)?;

        *self.attacks_mut(attacker) = record;
        *self.board_mut(defender) = outcome.board;
        debug!("{} attacked {}: {:?}", attacker, coord, outcome.result);

        let message = attack_message(attacker, outcome.result, outcome.ship);
        let winner = if self.board(defender).is_fleet_destroyed() {
            self.phase = Phase::GameOver;
            self.winner = Some(attacker);
            self.status = match attacker {
                Side::Player => "Congratulations! You won!".to_string(),
                Side::Ai => "Game Over. AI wins.".to_string(),
            };
            info!("{} wins", attacker);
            Some(attacker)
        } else {
            self.current_turn = defender;
            self.status = match defender {
                Side::Player => "Your turn.".to_string(),
                Side::Ai => "AI's turn.".to_string(),
            };
            None
        };

        Ok(TurnReport {
            attacker,
            coordinate: coord,
            result: outcome.result,
            ship: outcome.ship,
            winner,
            message,
        })
    }
}
