//! Move resolution: slides, merges and merge-lock for one directional command.
//!
//! Tiles are visited from the edge they move toward, so a leading tile claims
//! its destination before any tile behind it probes that cell. A cell that
//! received a merge is locked for the rest of the pass, so a tile merges at
//! most once per move: `[2, 2, 2, 2]` moving left becomes `[4, 4]`, never `[8]`.

use super::arena::{TileArena, TileId};
use super::direction::{scan_order, Direction, Position};
use super::tile::{Tile, TileState};
use tracing::trace;

/// One merge produced by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    /// The tile that slides in and carries the summed value.
    pub survivor: TileId,
    /// The tile that slides into the same cell and vanishes at commit.
    pub absorbed: TileId,
    pub position: Position,
    pub value: u32,
}

/// Outcome of [`resolve_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResolution {
    pub direction: Direction,
    pub moved: bool,
    /// Tiles that slid onto an empty cell.
    pub slides: usize,
    pub merges: Vec<MergeRecord>,
}

/// Compute every tile's next state for `direction` and arm its slide.
///
/// Returns `moved == false` and leaves every tile untouched when nothing can
/// slide or merge.
///
/// # Panics
///
/// Panics if any tile still has an animation counter running or carries a
/// pending state from an earlier pass. Callers stop all animations first.
pub fn resolve_move(tiles: &mut TileArena, size: usize, direction: Direction) -> MoveResolution {
    for (id, tile) in tiles.iter() {
        assert!(
            tile.next().is_empty(),
            "{id:?} has stale pending state {:?}",
            tile.next()
        );
        assert!(
            tile.moving_count() == 0
                && tile.start_popping_count() == 0
                && tile.popping_count() == 0,
            "{id:?} is still animating"
        );
    }

    let origins = tiles.cell_index(size);
    // Who a probing tile runs into: stationary tiles at their cell, movers at
    // their destination. Absorbed tiles drop out.
    let mut claims = origins.clone();
    let mut merge_locked = vec![false; size * size];

    let mut resolution = MoveResolution {
        direction,
        moved: false,
        slides: 0,
        merges: Vec::new(),
    };

    for origin in scan_order(direction, size) {
        let Some(id) = origins[origin.index(size)] else {
            continue;
        };
        let Some(value) = tiles.get(id).map(Tile::value) else {
            continue;
        };

        let mut dest = origin;
        let mut target: Option<(TileId, u32)> = None;
        while let Some(probe) = dest.step(direction, size) {
            let cell = probe.index(size);
            let Some(other) = claims[cell] else {
                dest = probe;
                continue;
            };
            let other_value = tiles.get(other).map_or(0, Tile::value);
            // A sum past u32::MAX blocks like a different value.
            let merged = value.checked_add(other_value);
            if other_value == value && !merge_locked[cell] {
                if let Some(merged) = merged {
                    dest = probe;
                    target = Some((other, merged));
                }
            }
            break;
        }

        if dest == origin {
            continue;
        }

        claims[origin.index(size)] = None;
        claims[dest.index(size)] = Some(id);

        let next_value = match target {
            Some((absorbed, merged)) => {
                merge_locked[dest.index(size)] = true;
                if let Some(tile) = tiles.get_mut(absorbed) {
                    tile.absorb_into(dest);
                }
                resolution.merges.push(MergeRecord {
                    survivor: id,
                    absorbed,
                    position: dest,
                    value: merged,
                });
                trace!(?id, ?absorbed, ?dest, merged, "merge");
                merged
            }
            None => {
                resolution.slides += 1;
                trace!(?id, ?origin, ?dest, "slide");
                value
            }
        };

        if let Some(tile) = tiles.get_mut(id) {
            tile.begin_move(TileState::at(next_value, dest));
        }
    }

    resolution.moved = resolution.slides > 0 || !resolution.merges.is_empty();
    if !resolution.moved {
        for (_, tile) in tiles.iter_mut() {
            tile.clear_pending();
        }
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MAX_MOVING_COUNT;

    fn arena_from(tiles: &[(usize, usize, u32)]) -> (TileArena, Vec<TileId>) {
        let mut arena = TileArena::new();
        let ids = tiles
            .iter()
            .map(|&(x, y, value)| arena.insert(Tile::settled(value, x, y)))
            .collect();
        (arena, ids)
    }

    fn next_of(arena: &TileArena, id: TileId) -> TileState {
        arena.get(id).map(Tile::next).unwrap()
    }

    #[test]
    fn test_single_tile_slides_to_edge() {
        let (mut arena, ids) = arena_from(&[(1, 2, 2)]);
        let res = resolve_move(&mut arena, 4, Direction::Right);
        assert!(res.moved);
        assert_eq!(res.slides, 1);
        assert_eq!(next_of(&arena, ids[0]), TileState::new(2, 3, 2));
        assert_eq!(arena.get(ids[0]).unwrap().moving_count(), MAX_MOVING_COUNT);
    }

    #[test]
    fn test_pair_merges_toward_edge() {
        let (mut arena, ids) = arena_from(&[(0, 0, 2), (1, 0, 2)]);
        let res = resolve_move(&mut arena, 4, Direction::Left);
        assert!(res.moved);
        assert_eq!(res.merges.len(), 1);
        let merge = res.merges[0];
        assert_eq!(merge.survivor, ids[1]);
        assert_eq!(merge.absorbed, ids[0]);
        assert_eq!(merge.value, 4);
        assert_eq!(next_of(&arena, ids[1]), TileState::new(4, 0, 0));
        assert_eq!(next_of(&arena, ids[0]), TileState::new(0, 0, 0));
        assert!(arena.get(ids[0]).unwrap().is_moving());
    }

    #[test]
    fn test_three_in_a_row_merges_leading_pair_only() {
        let (mut arena, ids) = arena_from(&[(0, 0, 2), (1, 0, 2), (2, 0, 2)]);
        let res = resolve_move(&mut arena, 4, Direction::Left);
        assert_eq!(res.merges.len(), 1);
        assert_eq!(next_of(&arena, ids[1]), TileState::new(4, 0, 0));
        assert_eq!(next_of(&arena, ids[2]), TileState::new(2, 1, 0));
    }

    #[test]
    fn test_four_in_a_row_makes_two_merges() {
        let (mut arena, ids) = arena_from(&[(0, 1, 2), (1, 1, 2), (2, 1, 2), (3, 1, 2)]);
        let res = resolve_move(&mut arena, 4, Direction::Right);
        assert_eq!(res.merges.len(), 2);
        assert_eq!(next_of(&arena, ids[2]), TileState::new(4, 3, 1));
        assert_eq!(next_of(&arena, ids[0]), TileState::new(4, 2, 1));
    }

    #[test]
    fn test_merged_value_does_not_merge_again() {
        // [2, 2, 4] moving right: 2+2 forms a 4 beside the existing 4, no chain
        let (mut arena, ids) = arena_from(&[(0, 0, 2), (1, 0, 2), (2, 0, 4)]);
        let res = resolve_move(&mut arena, 3, Direction::Right);
        assert_eq!(res.merges.len(), 1);
        assert!(!arena.get(ids[2]).unwrap().is_moving());
        assert_eq!(next_of(&arena, ids[0]), TileState::new(4, 1, 0));
    }

    #[test]
    fn test_different_values_stack_without_merging() {
        let (mut arena, ids) = arena_from(&[(0, 3, 2), (0, 0, 4)]);
        let res = resolve_move(&mut arena, 4, Direction::Down);
        assert!(res.merges.is_empty());
        assert_eq!(res.slides, 1);
        assert!(!arena.get(ids[0]).unwrap().is_moving());
        assert_eq!(next_of(&arena, ids[1]), TileState::new(4, 0, 2));
    }

    #[test]
    fn test_gap_then_merge() {
        let (mut arena, ids) = arena_from(&[(0, 0, 8), (0, 3, 8)]);
        let res = resolve_move(&mut arena, 4, Direction::Up);
        assert_eq!(res.merges.len(), 1);
        assert_eq!(next_of(&arena, ids[1]), TileState::new(16, 0, 0));
    }

    #[test]
    fn test_overflowing_pair_stacks_instead_of_merging() {
        let top = 1 << 31;
        let (mut arena, ids) = arena_from(&[(0, 0, top), (2, 0, top)]);
        let res = resolve_move(&mut arena, 4, Direction::Left);
        assert!(res.moved);
        assert!(res.merges.is_empty());
        assert_eq!(next_of(&arena, ids[1]), TileState::new(top, 1, 0));
        assert!(!arena.get(ids[0]).unwrap().is_moving());
    }

    #[test]
    #[should_panic(expected = "still animating")]
    fn test_panics_while_spawn_grow_runs() {
        let mut arena = TileArena::new();
        arena.insert(Tile::new(2, 3, 0));
        resolve_move(&mut arena, 4, Direction::Left);
    }

    #[test]
    fn test_rejected_move_leaves_tiles_untouched() {
        let (mut arena, ids) = arena_from(&[(0, 0, 2), (1, 0, 4)]);
        let before: Vec<Tile> = ids.iter().map(|&id| arena.get(id).unwrap().clone()).collect();
        let res = resolve_move(&mut arena, 4, Direction::Left);
        assert!(!res.moved);
        assert_eq!(res.slides, 0);
        let after: Vec<Tile> = ids.iter().map(|&id| arena.get(id).unwrap().clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    #[should_panic(expected = "stale pending state")]
    fn test_panics_on_stale_pending_state() {
        let (mut arena, _) = arena_from(&[(1, 0, 2)]);
        resolve_move(&mut arena, 4, Direction::Left);
        resolve_move(&mut arena, 4, Direction::Left);
    }
}
