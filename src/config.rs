//! Game configuration: board size, the fleet catalog and the random
//! placement budget.

use core::fmt;

use crate::ship::{ShipDef, ShipKind};

pub const BOARD_SIZE: usize = 10;
/// Largest board the text front-end can label (columns A to Z).
pub const MAX_BOARD_SIZE: usize = 26;
/// Attempt budget for a single randomized ship placement.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;
pub const FLEET: [ShipKind; 5] = ShipKind::ALL;

/// Errors returned when building a [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BoardSize(usize),
    EmptyFleet,
    DuplicateShip(ShipKind),
    ShipTooLong {
        kind: ShipKind,
        length: usize,
        board_size: usize,
    },
    ZeroAttempts,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize(n) => write!(
                f,
                "Board size {} is outside 1..={}",
                n, MAX_BOARD_SIZE
            ),
            ConfigError::EmptyFleet => write!(f, "Fleet must contain at least one ship"),
            ConfigError::DuplicateShip(kind) => {
                write!(f, "{} appears more than once in the fleet", kind.definition().name())
            }
            ConfigError::ShipTooLong {
                kind,
                length,
                board_size,
            } => write!(
                f,
                "{} (length {}) does not fit on a {}x{} board",
                kind.definition().name(),
                length,
                board_size,
                board_size
            ),
            ConfigError::ZeroAttempts => write!(f, "Placement attempt budget must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Board size, fleet catalog and placement budget of a game.
///
/// The fleet is resolved from [`ShipKind`]s once, when the config is built,
/// and looked up by kind afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameConfig {
    board_size: usize,
    fleet: Vec<ShipDef>,
    max_placement_attempts: usize,
}

impl GameConfig {
    pub fn new(board_size: usize, kinds: &[ShipKind]) -> Result<Self, ConfigError> {
        if board_size == 0 || board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardSize(board_size));
        }
        if kinds.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        let mut fleet: Vec<ShipDef> = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if fleet.iter().any(|d| d.kind() == kind) {
                return Err(ConfigError::DuplicateShip(kind));
            }
            let def = kind.definition();
            if def.length() > board_size {
                return Err(ConfigError::ShipTooLong {
                    kind,
                    length: def.length(),
                    board_size,
                });
            }
            fleet.push(def);
        }
        Ok(GameConfig {
            board_size,
            fleet,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Result<Self, ConfigError> {
        if attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        self.max_placement_attempts = attempts;
        Ok(self)
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Catalog in placement order.
    pub fn fleet(&self) -> &[ShipDef] {
        &self.fleet
    }

    pub fn definition(&self, kind: ShipKind) -> Option<&ShipDef> {
        self.fleet.iter().find(|d| d.kind() == kind)
    }

    pub fn ship_lengths(&self) -> Vec<usize> {
        self.fleet.iter().map(ShipDef::length).collect()
    }

    pub fn max_placement_attempts(&self) -> usize {
        self.max_placement_attempts
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: BOARD_SIZE,
            fleet: FLEET.iter().map(|k| k.definition()).collect(),
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}
