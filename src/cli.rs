//! Line-oriented commands for the interactive terminal game.

use core::fmt;
use core::str::FromStr;

use crate::common::Coordinate;
use crate::ship::ShipKind;
use crate::ui::parse_coord;

pub const HELP: &str = "\
Commands:
  select <ship>   choose the ship to place (carrier, battleship, cruiser, submarine, destroyer)
  rotate          toggle horizontal / vertical
  place <A1>      place the selected ship with its bow at A1
  random          place the whole fleet at random
  start           start the game once every ship is placed
  fire <A1>       attack a cell of the enemy board
  reset           start over
  show            print the boards
  help            show this text
  quit            leave the game";

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(ShipKind),
    Rotate,
    Place(Coordinate),
    Random,
    Start,
    Fire(Coordinate),
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    BadCoordinate(String),
    BadShip(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Type a command, or 'help'"),
            CommandError::Unknown(cmd) => write!(f, "Unknown command '{}'. Type 'help'", cmd),
            CommandError::MissingArgument(cmd) => write!(f, "'{}' needs an argument", cmd),
            CommandError::BadCoordinate(s) => {
                write!(f, "Invalid coordinate '{}' (expected e.g. B3)", s)
            }
            CommandError::BadShip(s) => write!(f, "Unknown ship '{}'", s),
        }
    }
}

impl std::error::Error for CommandError {}

fn coordinate_arg(cmd: &'static str, arg: Option<&str>) -> Result<Coordinate, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(cmd))?;
    parse_coord(arg).ok_or_else(|| CommandError::BadCoordinate(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let arg = parts.next();
        match cmd.as_str() {
            "select" | "s" => {
                let name = arg.ok_or(CommandError::MissingArgument("select"))?;
                name.parse()
                    .map(Command::Select)
                    .map_err(|_| CommandError::BadShip(name.to_string()))
            }
            "rotate" | "r" => Ok(Command::Rotate),
            "place" | "p" => coordinate_arg("place", arg).map(Command::Place),
            "random" => Ok(Command::Random),
            "start" => Ok(Command::Start),
            "fire" | "f" => coordinate_arg("fire", arg).map(Command::Fire),
            "reset" => Ok(Command::Reset),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            // A bare coordinate is a shot.
            other => parse_coord(other)
                .map(Command::Fire)
                .ok_or_else(|| CommandError::Unknown(other.to_string())),
        }
    }
}
