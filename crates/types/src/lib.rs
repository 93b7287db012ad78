//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so the simulation
//! core, the terminal front end and tests can share them freely.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, **row 0 is the bottom**)
//! - **Spawn anchor**: (3, 16), four rows below the top so tall pieces fit
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_CLEAR_POINTS` | 100 | Points per cleared row |
//! | `COMBO_POINTS` | 50 | Points per combo step |
//! | `HARD_DROP_POINTS_PER_ROW` | 2 | Bonus per row fallen on hard drop |
//! | `LEVEL_SCORE_STEP` | 500 | Score needed per level |
//!
//! # Fall Speed
//!
//! The fall interval is `max(50, 300 - (level - 1) * 20)` milliseconds:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 300ms |
//! | 2 | 280ms |
//! | 6 | 200ms |
//! | 13+ | 60ms, then 50ms floor from level 14 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{fall_interval_ms, GameAction, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color().as_str(), "purple");
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(fall_interval_ms(1), 300);
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Spawn anchor column
pub const SPAWN_X: i8 = 3;

/// Spawn anchor row (near the top, leaving room for tall pieces)
pub const SPAWN_Y: i8 = GRID_HEIGHT as i8 - 4;

/// Points awarded per cleared row
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points awarded per combo step
pub const COMBO_POINTS: u32 = 50;

/// Bonus points per row a piece falls during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Score needed to advance one level
pub const LEVEL_SCORE_STEP: u32 = 500;

/// Fall interval at level 1
pub const BASE_FALL_MS: u32 = 300;

/// Fall interval reduction per level
pub const FALL_STEP_MS: u32 = 20;

/// Fastest fall interval
pub const MIN_FALL_MS: u32 = 50;

/// Input poll interval for the terminal loop
pub const FRAME_MS: u32 = 16;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop DAS in milliseconds.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Soft drop ARR in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Level for a given score: one level per `LEVEL_SCORE_STEP` points, starting at 1.
pub fn level_for_score(score: u32) -> u32 {
    1 + score / LEVEL_SCORE_STEP
}

/// Milliseconds between gravity ticks at `level`.
///
/// Levels below 1 are treated as level 1.
pub fn fall_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    BASE_FALL_MS
        .saturating_sub(steps.saturating_mul(FALL_STEP_MS))
        .max(MIN_FALL_MS)
}

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter used in the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }

    /// Fixed color tag for this kind
    pub fn color(&self) -> ColorTag {
        match self {
            PieceKind::I => ColorTag::Cyan,
            PieceKind::O => ColorTag::Yellow,
            PieceKind::T => ColorTag::Purple,
            PieceKind::L => ColorTag::Orange,
            PieceKind::J => ColorTag::Blue,
            PieceKind::S => ColorTag::Green,
            PieceKind::Z => ColorTag::Red,
        }
    }
}

/// Color tag of a locked cell, one per piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Green,
    Red,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Cyan => "cyan",
            ColorTag::Yellow => "yellow",
            ColorTag::Purple => "purple",
            ColorTag::Orange => "orange",
            ColorTag::Blue => "blue",
            ColorTag::Green => "green",
            ColorTag::Red => "red",
        }
    }
}

/// Player commands delivered by the input collaborator
///
/// Every command is applied immediately; illegal ones are silently rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece clockwise, with wall kicks
    Rotate,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Swap with the hold slot (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Placement cycle of a session
///
/// `Spawning`, `Locking` and `Clearing` are only held inside a single
/// lock/spawn step; between calls a live session is `Falling` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

/// Event recorded each time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// Hard-drop bonus earned by the move that ended in this lock.
    pub drop_bonus: u32,
    pub combo: i32,
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by a piece of that kind (color via [`PieceKind::color`])
pub type Cell = Option<PieceKind>;
