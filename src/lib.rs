//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core,input,store,term,types}`
//! and holds the binary's configuration and logger setup.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_store as store;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::Config;
