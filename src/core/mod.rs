//! Rule engine: tiles, move resolution, step scheduling and spawning.
//!
//! Nothing in here knows about terminals, fonts or input devices. Frontends
//! feed [`Direction`]s into [`Board::on_direction`], call [`Board::tick`] once
//! per frame, and draw from [`Board::snapshot`].

pub mod animation;
pub mod arena;
pub mod board;
pub mod constants;
pub mod direction;
pub mod error;
pub mod resolver;
pub mod scheduler;
pub mod snapshot;
pub mod spawn;
pub mod tile;

pub use animation::{TileAnimation, TileVisual};
pub use arena::{TileArena, TileId};
pub use board::{Board, TickEvent, TickResult};
pub use direction::{Direction, Position};
pub use error::{BoardError, BoardResult};
pub use resolver::{MergeRecord, MoveResolution};
pub use scheduler::{StepAction, StepScheduler, StepStatus};
pub use snapshot::{BoardSnapshot, TileSnapshot};
pub use tile::{Tile, TileState};
