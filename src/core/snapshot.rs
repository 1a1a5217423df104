//! Read-only copies of board state for renderers.

use super::animation::{TileAnimation, TileVisual};
use super::arena::TileId;
use super::tile::{Tile, TileState};

/// One tile as seen after a tick's mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSnapshot {
    pub id: TileId,
    pub current: TileState,
    pub next: TileState,
    pub moving_count: u8,
    pub start_popping_count: u8,
    pub popping_count: u8,
    pub animation: TileAnimation,
    pub visual: TileVisual,
}

impl TileSnapshot {
    pub fn capture(id: TileId, tile: &Tile) -> Self {
        Self {
            id,
            current: tile.current(),
            next: tile.next(),
            moving_count: tile.moving_count(),
            start_popping_count: tile.start_popping_count(),
            popping_count: tile.popping_count(),
            animation: tile.animation(),
            visual: tile.visual(),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving_count > 0
    }

    /// Value to print on the tile. An absorbed tile keeps showing its old
    /// value until its slide ends.
    pub fn display_value(&self) -> u32 {
        self.current.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub size: usize,
    /// A move is sliding or waiting to commit.
    pub resolving: bool,
    pub tiles: Vec<TileSnapshot>,
}

impl BoardSnapshot {
    /// Tiles in draw order: resting tiles first, sliding tiles on top.
    pub fn draw_order(&self) -> Vec<&TileSnapshot> {
        let mut ordered: Vec<&TileSnapshot> = self
            .tiles
            .iter()
            .filter(|tile| tile.current.value > 0)
            .collect();
        ordered.sort_by_key(|tile| tile.is_moving());
        ordered
    }
}
