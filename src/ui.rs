//! Text rendering of boards and coordinate labels for terminal front-ends.
//!
//! Columns are letters (`A` is `x = 0`), rows are 1-based numbers, so
//! `"B3"` is `Coordinate { x: 1, y: 2 }`.

use core::fmt::Write;

use crate::board::BoardState;
use crate::common::{CellState, Coordinate, Side};
use crate::config::MAX_BOARD_SIZE;
use crate::game::{GameState, Phase};
use crate::grid::Grid;

/// Label such as `"B3"` for `coord`.
pub fn coord_label(coord: Coordinate) -> String {
    let col = (b'A' + (coord.x % MAX_BOARD_SIZE) as u8) as char;
    format!("{}{}", col, coord.y + 1)
}

/// Parse a label such as `"b3"` or `"J10"`. Does not check any board size.
pub fn parse_coord(input: &str) -> Option<Coordinate> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(Coordinate::new(col, row - 1))
}

/// `grid` with a column-letter header and row numbers.
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::from("   ");
    for c in 0..grid.size() {
        out.push(' ');
        out.push((b'A' + (c % MAX_BOARD_SIZE) as u8) as char);
    }
    out.push('\n');
    for (r, row) in grid.rows().enumerate() {
        let _ = write!(out, "{:2} ", r + 1);
        for cell in row {
            out.push(' ');
            out.push(cell.symbol());
        }
        out.push('\n');
    }
    out
}

/// Both of the player's grids, the status line and the AI's last rationale.
pub fn render_state(state: &GameState) -> String {
    let mut out = String::new();
    if state.phase() != Phase::Setup {
        out.push_str("Enemy waters:\n");
        out.push_str(&render_grid(state.attacks(Side::Player).grid()));
        out.push('\n');
    }
    out.push_str("Your fleet:\n");
    out.push_str(&render_grid(state.board(Side::Player).grid()));
    if state.phase() == Phase::Setup {
        let placed: Vec<&str> = state
            .board(Side::Player)
            .fleet()
            .iter()
            .map(|s| s.definition().name())
            .collect();
        if !placed.is_empty() {
            let _ = writeln!(out, "Placed: {}", placed.join(", "));
        }
        if let Some(kind) = state.selected_ship() {
            let def = kind.definition();
            let _ = writeln!(
                out,
                "Selected: {} (length {}), {}",
                def.name(),
                def.length(),
                state.orientation()
            );
        }
    } else {
        let you = state.attacks(Side::Player);
        let ai = state.attacks(Side::Ai);
        let _ = writeln!(
            out,
            "Shots: you {} hits / {} misses, AI {} hits / {} misses",
            you.hits(),
            you.misses(),
            ai.hits(),
            ai.misses()
        );
        let _ = writeln!(out, "Your ships: {}", fleet_status(state.board(Side::Player)));
        let _ = writeln!(out, "Enemy ships: {}", fleet_status(state.board(Side::Ai)));
    }
    if let Some(rationale) = state.ai_rationale() {
        let _ = writeln!(out, "AI: {}", rationale);
    }
    let _ = writeln!(out, "{}", state.status());
    out
}

/// Ship names with sunk ones marked. Positions stay hidden.
fn fleet_status(board: &BoardState) -> String {
    board
        .fleet()
        .iter()
        .map(|s| {
            if s.is_sunk() {
                format!("{} (sunk)", s.definition().name())
            } else {
                s.definition().name().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Legend for the cell symbols.
pub fn legend() -> String {
    [
        (CellState::Empty, "water"),
        (CellState::Ship, "ship"),
        (CellState::Hit, "hit"),
        (CellState::Miss, "miss"),
        (CellState::Sunk, "sunk"),
    ]
    .iter()
    .map(|(c, name)| format!("{} {}", c.symbol(), name))
    .collect::<Vec<_>>()
    .join("  ")
}
