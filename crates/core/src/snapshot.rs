use crate::grid::{Pos, COLS, ROWS};
use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view handed to the renderer once per tick or input event.
///
/// `grid[y][x]` with `y = 0` as the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[Cell; COLS]; ROWS],
    pub active: Option<ActiveSnapshot>,
    pub active_cells: Option<[Pos; 4]>,
    pub ghost_cells: Option<[Pos; 4]>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub combo: i32,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; COLS]; ROWS],
            active: None,
            active_cells: None,
            ghost_cells: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            score: 0,
            level: 1,
            high_score: 0,
            combo: -1,
            phase: Phase::Spawning,
            paused: false,
            game_over: false,
        }
    }
}
