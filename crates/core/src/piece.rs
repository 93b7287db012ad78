//! Active piece - kind, rotation index and anchor, plus fit testing

use crate::grid::{Grid, Pos};
use crate::shapes::{next_rotation, shape, RotationState};
use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at the spawn anchor in its first rotation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn shape(&self) -> RotationState {
        shape(self.kind, self.rotation)
    }

    /// Grid positions of the four cells, or `None` if any is out of range
    pub fn cells(&self) -> Option<[Pos; 4]> {
        placement(self.kind, self.rotation, self.x, self.y)
    }

    pub fn fits(&self, grid: &Grid) -> bool {
        fits(grid, self.kind, self.rotation, self.x, self.y)
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: next_rotation(self.kind, self.rotation),
            ..*self
        }
    }

    /// True when the piece cannot move one row down
    pub fn is_grounded(&self, grid: &Grid) -> bool {
        !self.shifted(0, -1).fits(grid)
    }

    /// The piece moved as far down as it can go
    pub fn dropped(&self, grid: &Grid) -> Self {
        let mut piece = *self;
        while !piece.is_grounded(grid) {
            piece = piece.shifted(0, -1);
        }
        piece
    }
}

/// Grid positions for `kind` at `rotation` anchored at `(x, y)`
pub fn placement(kind: PieceKind, rotation: usize, x: i8, y: i8) -> Option<[Pos; 4]> {
    let offsets = shape(kind, rotation);
    let mut out = [Pos::new(0, 0)?; 4];
    for (slot, &(dx, dy)) in out.iter_mut().zip(offsets.iter()) {
        *slot = Pos::new(x.checked_add(dx)?, y.checked_add(dy)?)?;
    }
    Some(out)
}

/// True iff every cell is in bounds and unoccupied
pub fn fits(grid: &Grid, kind: PieceKind, rotation: usize, x: i8, y: i8) -> bool {
    shape(kind, rotation)
        .iter()
        .all(|&(dx, dy)| match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(cx), Some(cy)) => grid.is_free(cx, cy),
            _ => false,
        })
}
