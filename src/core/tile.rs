//! Tile state and its per-tick animation state machine.

use super::constants::{MAX_MOVING_COUNT, MAX_POPPING_COUNT};
use super::direction::Position;
use serde::{Deserialize, Serialize};

/// Value and cell of a tile at one instant. `value == 0` means absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileState {
    pub value: u32,
    pub x: usize,
    pub y: usize,
}

impl TileState {
    /// The zero state: no pending move.
    pub const EMPTY: TileState = TileState {
        value: 0,
        x: 0,
        y: 0,
    };

    pub const fn new(value: u32, x: usize, y: usize) -> Self {
        Self { value, x, y }
    }

    pub fn at(value: u32, pos: Position) -> Self {
        Self {
            value,
            x: pos.x,
            y: pos.y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// A numbered tile.
///
/// Animation phases are exclusive and run in a fixed priority: slide, then
/// spawn-grow, then merge-grow. Only one counter is non-zero at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    current: TileState,
    /// Pending state while sliding; `TileState::EMPTY` otherwise.
    next: TileState,
    moving_count: u8,
    start_popping_count: u8,
    popping_count: u8,
}

impl Tile {
    /// A freshly spawned tile with its spawn-grow animation armed.
    pub fn new(value: u32, x: usize, y: usize) -> Self {
        Self {
            current: TileState::new(value, x, y),
            next: TileState::EMPTY,
            moving_count: 0,
            start_popping_count: MAX_POPPING_COUNT,
            popping_count: 0,
        }
    }

    /// A tile at rest with no animation running.
    pub fn settled(value: u32, x: usize, y: usize) -> Self {
        Self {
            start_popping_count: 0,
            ..Self::new(value, x, y)
        }
    }

    pub fn current(&self) -> TileState {
        self.current
    }

    pub fn next(&self) -> TileState {
        self.next
    }

    pub fn position(&self) -> Position {
        self.current.position()
    }

    /// Pending cell. Only meaningful while `is_moving()`.
    pub fn next_position(&self) -> Position {
        self.next.position()
    }

    pub fn value(&self) -> u32 {
        self.current.value
    }

    pub fn next_value(&self) -> u32 {
        self.next.value
    }

    /// False once a merge has absorbed this tile and its slide finished.
    pub fn is_alive(&self) -> bool {
        self.current.value > 0
    }

    pub fn is_moving(&self) -> bool {
        self.moving_count > 0
    }

    pub fn moving_count(&self) -> u8 {
        self.moving_count
    }

    pub fn start_popping_count(&self) -> u8 {
        self.start_popping_count
    }

    pub fn popping_count(&self) -> u8 {
        self.popping_count
    }

    /// Fast-forward any running animation to its end state.
    pub fn stop_animation(&mut self) {
        if self.is_moving() {
            self.current = self.next;
            self.next = TileState::EMPTY;
        }
        self.moving_count = 0;
        self.start_popping_count = 0;
        self.popping_count = 0;
    }

    /// Advance one tick. Exactly one phase counter moves.
    pub fn advance(&mut self) {
        if self.moving_count > 0 {
            self.moving_count -= 1;
            if self.moving_count == 0 {
                self.finish_slide();
            }
        } else if self.start_popping_count > 0 {
            self.start_popping_count -= 1;
        } else if self.popping_count > 0 {
            self.popping_count -= 1;
        }
    }

    fn finish_slide(&mut self) {
        // Survivor of a merge: the value changed and the tile stays alive.
        if self.current.value != self.next.value && self.next.value > 0 {
            self.popping_count = MAX_POPPING_COUNT;
        }
        self.current = self.next;
        self.next = TileState::EMPTY;
    }

    /// Start sliding toward `next`.
    pub(crate) fn begin_move(&mut self, next: TileState) {
        self.next = next;
        self.moving_count = MAX_MOVING_COUNT;
    }

    /// Slide into `target` and vanish there.
    pub(crate) fn absorb_into(&mut self, target: Position) {
        self.begin_move(TileState::at(0, target));
    }

    /// Drop pending state after a rejected move.
    pub(crate) fn clear_pending(&mut self) {
        self.next = TileState::EMPTY;
        self.moving_count = 0;
    }
}
