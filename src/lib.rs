//! twenty48 - sliding tile puzzle engine
//!
//! The `core` module is the rule engine and has no terminal dependencies.
//! The remaining modules are the terminal frontend built on top of it.

pub mod config;
pub mod core;
pub mod input;
pub mod logging;
pub mod ui;
pub mod utils;

pub use crate::core::constants::*;
pub use crate::core::{Board, BoardError, Direction, Position, Tile, TileId, TileState};
