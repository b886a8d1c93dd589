//! Fixed-size square grid of cell states.
//!
//! The grid is stored row-major in a flat `Vec`, so a cell lives at
//! `y * size + x`. Every access is bounds checked and reports a
//! [`GridError`] instead of panicking.

use core::fmt;

use crate::common::{CellState, Coordinate};

/// Errors returned by grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Column or row is outside [0..size).
    OutOfBounds { x: usize, y: usize, size: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y, size } => {
                write!(f, "OutOfBounds: ({},{}) is outside a {}x{} grid", x, y, size, size)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Returns `true` if `coord` lies on a `size`×`size` grid.
#[inline]
pub fn is_within_bounds(coord: Coordinate, size: usize) -> bool {
    coord.x < size && coord.y < size
}

/// An N×N grid of [`CellState`].
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// A `size`×`size` grid with every cell `Empty`.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, coord: Coordinate) -> bool {
        is_within_bounds(coord, self.size)
    }

    #[inline]
    fn index(&self, coord: Coordinate) -> Result<usize, GridError> {
        if self.contains(coord) {
            Ok(coord.y * self.size + coord.x)
        } else {
            Err(GridError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                size: self.size,
            })
        }
    }

    /// State at `coord`.
    pub fn get(&self, coord: Coordinate) -> Result<CellState, GridError> {
        let idx = self.index(coord)?;
        Ok(self.cells[idx])
    }

    /// Overwrite the state at `coord`.
    pub fn set(&mut self, coord: Coordinate, state: CellState) -> Result<(), GridError> {
        let idx = self.index(coord)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Every coordinate, row by row.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let size = self.size;
        (0..size * size).map(move |idx| Coordinate::new(idx % size, idx / size))
    }

    /// Every `(coordinate, state)` pair, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        self.coordinates().zip(self.cells.iter().copied())
    }

    /// Rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    /// Copy with every cell passed through `f`.
    pub fn map(&self, f: impl Fn(CellState) -> CellState) -> Self {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{}x{}>:", self.size, self.size)?;
        write!(f, "{}", self)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
            if y + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
