mod ai;
mod board;
mod cli;
mod common;
mod config;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod session;
mod ship;
pub mod strategy;
mod ui;

pub use ai::*;
pub use board::*;
pub use cli::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from_env};
pub use session::*;
pub use ship::*;
pub use strategy::*;
pub use ui::*;
