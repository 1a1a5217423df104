//! Random tile spawning.

use super::arena::{TileArena, TileId};
use super::constants::{SPAWN_RARE_ONE_IN, SPAWN_VALUE, SPAWN_VALUE_RARE};
use super::error::{BoardError, BoardResult};
use super::tile::Tile;
use rand::Rng;
use tracing::debug;

/// Value for a new tile: the rare value one time in `SPAWN_RARE_ONE_IN`.
pub fn roll_spawn_value<R: Rng>(rng: &mut R) -> u32 {
    if rng.gen_range(0..SPAWN_RARE_ONE_IN) == 0 {
        SPAWN_VALUE_RARE
    } else {
        SPAWN_VALUE
    }
}

/// Place a new tile on a uniformly chosen empty cell.
///
/// # Panics
///
/// Panics if a tile is still sliding; empty cells are only well defined at rest.
pub fn add_random_tile<R: Rng>(
    tiles: &mut TileArena,
    size: usize,
    rng: &mut R,
) -> BoardResult<TileId> {
    for (id, tile) in tiles.iter() {
        assert!(!tile.is_moving(), "{id:?} is moving during spawn");
    }

    let empty = tiles.empty_cells(size);
    if empty.is_empty() {
        return Err(BoardError::BoardFull);
    }

    let pos = empty[rng.gen_range(0..empty.len())];
    let value = roll_spawn_value(rng);
    let id = tiles.insert(Tile::new(value, pos.x, pos.y));
    debug!(?id, x = pos.x, y = pos.y, value, "spawned tile");
    Ok(id)
}
