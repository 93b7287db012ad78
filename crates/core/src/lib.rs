//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: the piece catalog, the
//! playfield, the active piece controller, scoring and the session state
//! machine. It has no dependency on terminals, timers or files. Persistence
//! goes through the [`HighScoreStore`] trait, so the core can run headless
//! with a [`MemoryStore`] or in the terminal with a file-backed store.
//!
//! # Module Structure
//!
//! - [`shapes`]: piece kinds' rotation states and the uniform wall-kick list
//! - [`grid`]: 10x20 playfield with full-row detection and order-independent compaction
//! - [`piece`]: active piece and fit testing
//! - [`scoring`]: line-clear, combo and hard-drop points, level and fall speed
//! - [`session`]: the complete game state and its command entry points
//! - [`rng`]: deterministic uniform piece source
//! - [`snapshot`]: read-only view for renderers
//! - [`store`]: best-score persistence seam
//!
//! # Game Rules
//!
//! - **Grid**: row 0 is the bottom; pieces spawn at (3, 16) and fall downward
//! - **Rotation**: clockwise only; kicks `(+1,0)`, `(-1,0)`, `(0,+1)` in order
//! - **Gravity**: one row per tick; a piece that cannot fall locks on the next tick
//! - **Hard drop**: 2 points per row fallen, then immediate lock
//! - **Line clears**: `rows * 100 + combo * 50`; combo resets to -1 on a dry lock
//! - **Hold**: once per piece
//! - **Game over**: the next piece does not fit at the spawn anchor
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The core owns no clock. Call [`GameSession::tick`] every
//! [`GameSession::fall_interval_ms`] milliseconds; the interval shrinks as the
//! level rises (300ms at level 1, 20ms less per level, never below 50ms).

pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod store;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use grid::{Grid, Pos};
pub use piece::{fits, ActivePiece};
pub use rng::{PieceSource, SimpleRng};
pub use scoring::{clear_score, hard_drop_score, ClearScore};
pub use session::GameSession;
pub use shapes::{next_rotation, rotation_states, shape, RotationState, KICK_OFFSETS};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use store::{HighScoreStore, MemoryStore};
