// Board geometry
pub const DEFAULT_BOARD_SIZE: usize = 4;
pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 8;
pub const INITIAL_TILE_COUNT: usize = 2;

// Animation lengths, in ticks
pub const MAX_MOVING_COUNT: u8 = 5;
pub const MAX_POPPING_COUNT: u8 = 6;
/// Peak scale of the merge-grow pop.
pub const POP_MAX_SCALE: f32 = 1.2;

// Spawning
pub const SPAWN_VALUE: u32 = 2;
pub const SPAWN_VALUE_RARE: u32 = 4;
/// One spawn in this many is the rare value.
pub const SPAWN_RARE_ONE_IN: u32 = 10;

// Tick and timing (~60 ticks per second)
pub const TICK_INTERVAL_MS: u64 = 16;
