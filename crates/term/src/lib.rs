//! Terminal game renderer.
//!
//! A small rendering layer for terminal gameplay: the view draws a
//! [`core::GameSnapshot`] into a framebuffer, and the renderer flushes that
//! framebuffer to the terminal as a diff against the previous frame.
//!
//! - `core` stays deterministic and terminal-free
//! - Board cells are 2 columns wide to roughly square up terminal glyphs

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod throttle;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use throttle::{fingerprint, RenderThrottle};
