//! Tile storage keyed by generational handles.
//!
//! A [`TileId`] pairs a slot index with the slot's generation, so a handle to
//! a removed tile never aliases the tile that later reuses its slot.

use super::direction::Position;
use super::tile::Tile;
use std::fmt;

/// Handle to a tile in a [`TileArena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    index: u32,
    generation: u32,
}

impl TileId {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    tile: Option<Tile>,
}

#[derive(Debug, Clone, Default)]
pub struct TileArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl TileArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, tile: Tile) -> TileId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.tile = Some(tile);
            return TileId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            tile: Some(tile),
        });
        TileId {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let tile = slot.tile.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(tile)
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_ref())
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.tile.as_ref().map(|tile| {
                (
                    TileId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    tile,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TileId, &mut Tile)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.tile.as_mut().map(|tile| {
                (
                    TileId {
                        index: index as u32,
                        generation,
                    },
                    tile,
                )
            })
        })
    }

    /// Remove every tile for which `keep` returns false. Returns the count removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Tile) -> bool) -> usize {
        let doomed: Vec<TileId> = self
            .iter()
            .filter(|(_, tile)| !keep(tile))
            .map(|(id, _)| id)
            .collect();
        for &id in &doomed {
            self.remove(id);
        }
        doomed.len()
    }

    /// Dense row-major index of live tiles by current cell.
    ///
    /// # Panics
    ///
    /// Panics if two live tiles share a cell or a tile sits off the board;
    /// either means the board's invariants are already broken.
    pub fn cell_index(&self, size: usize) -> Vec<Option<TileId>> {
        let mut cells = vec![None; size * size];
        for (id, tile) in self.iter() {
            if !tile.is_alive() {
                continue;
            }
            let pos = tile.position();
            assert!(
                pos.x < size && pos.y < size,
                "{id:?} at {pos:?} is off a {size}x{size} board"
            );
            let cell = &mut cells[pos.index(size)];
            assert!(cell.is_none(), "{id:?} overlaps {cell:?} at {pos:?}");
            *cell = Some(id);
        }
        cells
    }

    /// Cells with no live tile, in row-major order.
    pub fn empty_cells(&self, size: usize) -> Vec<Position> {
        self.cell_index(size)
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| Position::from_index(index, size))
            .collect()
    }
}
