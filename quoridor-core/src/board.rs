//! The 9×9 grid of cells and their adjacency.
//!
//! Purely structural: cells know which orthogonal neighbors they can still
//! step to and who stands on them. Legality lives in [`crate::game`].

use serde::Serialize;
use thiserror::Error;

use crate::{Coord, Orientation, Player, BOARD_SIZE};

/// Lookup of a coordinate that is not on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate {0} is off the board")]
    OutOfBounds(Coord),
}

/// A single square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    coord: Coord,
    neighbors: Vec<Coord>,
    occupant: Option<Player>,
    horizontal_fences: Vec<Coord>,
    vertical_fences: Vec<Coord>,
}

impl Cell {
    fn new(coord: Coord) -> Cell {
        Cell {
            coord,
            neighbors: coord.orthogonal().collect(),
            occupant: None,
            horizontal_fences: Vec::new(),
            vertical_fences: Vec::new(),
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Cells reachable by one unblocked orthogonal step.
    #[inline]
    pub fn neighbors(&self) -> &[Coord] {
        &self.neighbors
    }

    #[inline]
    pub fn occupant(&self) -> Option<Player> {
        self.occupant
    }

    /// Cells cut off from this one by horizontal fences.
    #[inline]
    pub fn horizontal_fences(&self) -> &[Coord] {
        &self.horizontal_fences
    }

    /// Cells cut off from this one by vertical fences.
    #[inline]
    pub fn vertical_fences(&self) -> &[Coord] {
        &self.vertical_fences
    }

    #[inline]
    pub fn is_open_to(&self, other: Coord) -> bool {
        self.neighbors.contains(&other)
    }
}

/// All 81 cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// A board with full adjacency and no pawns.
    pub fn new() -> Board {
        Board {
            cells: Coord::all().map(Cell::new).collect(),
        }
    }

    #[inline]
    fn index(coord: Coord) -> Result<usize, BoardError> {
        if coord.on_board() {
            Ok((coord.y * BOARD_SIZE + coord.x) as usize)
        } else {
            Err(BoardError::OutOfBounds(coord))
        }
    }

    /// Get the cell at a coordinate.
    pub fn cell_at(&self, coord: Coord) -> Result<&Cell, BoardError> {
        Self::index(coord).map(|i| &self.cells[i])
    }

    fn cell_at_mut(&mut self, coord: Coord) -> Result<&mut Cell, BoardError> {
        let i = Self::index(coord)?;
        Ok(&mut self.cells[i])
    }

    /// Set or clear the pawn on a cell.
    /// Does NOT check that the player stands nowhere else.
    pub fn set_occupant(&mut self, coord: Coord, occupant: Option<Player>) -> Result<(), BoardError> {
        self.cell_at_mut(coord)?.occupant = occupant;
        Ok(())
    }

    /// Cut `blocked` out of the cell's neighbors and record the fence.
    ///
    /// Removing a neighbor that is already gone is not an error.
    pub fn apply_fence(
        &mut self,
        coord: Coord,
        orientation: Orientation,
        blocked: Coord,
    ) -> Result<(), BoardError> {
        let cell = self.cell_at_mut(coord)?;
        cell.neighbors.retain(|&c| c != blocked);
        match orientation {
            Orientation::Horizontal => cell.horizontal_fences.push(blocked),
            Orientation::Vertical => cell.vertical_fences.push(blocked),
        }
        Ok(())
    }

    /// Whether a pawn on `from` may step straight onto `to`.
    /// Off-board coordinates are never open.
    pub fn is_open(&self, from: Coord, to: Coord) -> bool {
        self.cell_at(from).map(|c| c.is_open_to(to)).unwrap_or(false)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
