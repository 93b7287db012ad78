//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides a
//! DAS/ARR input handler for held movement keys, including terminals that never
//! report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
