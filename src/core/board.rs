//! The game board: tiles, geometry and the move/commit cycle.
//!
//! Per tick the board advances every tile's animation, then runs at most one
//! queued [`StepAction`]. A direction is only accepted while the queue is
//! empty, so a move's slide, commit and spawn finish before the next move
//! starts.

use super::arena::{TileArena, TileId};
use super::constants::{INITIAL_TILE_COUNT, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use super::direction::{Direction, Position};
use super::error::{BoardError, BoardResult};
use super::resolver::{resolve_move, MoveResolution};
use super::scheduler::{StepAction, StepScheduler, StepStatus};
use super::snapshot::{BoardSnapshot, TileSnapshot};
use super::spawn::add_random_tile;
use super::tile::Tile;
use rand::Rng;
use tracing::debug;

/// Something that happened during a tick, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// Every slide of the current move finished.
    AnimationsSettled,
    /// Absorbed tiles were dropped.
    Committed { removed: usize },
    /// A new tile appeared after a commit.
    TileSpawned {
        id: TileId,
        position: Position,
        value: u32,
    },
}

/// What a single [`Board::tick`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    tiles: TileArena,
    scheduler: StepScheduler,
    /// Moves accepted since the board was created.
    moves: u64,
    /// Ticks processed since the board was created.
    ticks: u64,
}

fn check_size(size: usize) -> BoardResult<()> {
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::InvalidSize {
            size,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        })
    }
}

impl Board {
    /// A new board seeded with its opening tiles.
    pub fn new<R: Rng>(size: usize, rng: &mut R) -> BoardResult<Self> {
        let mut board = Self::empty(size)?;
        for _ in 0..INITIAL_TILE_COUNT {
            add_random_tile(&mut board.tiles, size, rng)?;
        }
        Ok(board)
    }

    pub fn empty(size: usize) -> BoardResult<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            tiles: TileArena::new(),
            scheduler: StepScheduler::new(),
            moves: 0,
            ticks: 0,
        })
    }

    /// A board with settled tiles at the given `(x, y, value)` cells.
    ///
    /// Values must be powers of two, 2 or larger.
    pub fn from_layout(size: usize, layout: &[(usize, usize, u32)]) -> BoardResult<Self> {
        let mut board = Self::empty(size)?;
        let mut occupied = vec![false; size * size];
        for &(x, y, value) in layout {
            if x >= size || y >= size {
                return Err(BoardError::OutOfBounds { x, y, size });
            }
            if value < 2 || !value.is_power_of_two() {
                return Err(BoardError::InvalidValue { x, y, value });
            }
            let cell = Position::new(x, y).index(size);
            if occupied[cell] {
                return Err(BoardError::CellOccupied { x, y });
            }
            occupied[cell] = true;
            board.tiles.insert(Tile::settled(value, x, y));
        }
        Ok(board)
    }

    /// A board from a row-major grid of values; 0 is an empty cell.
    pub fn from_rows(rows: &[Vec<u32>]) -> BoardResult<Self> {
        let size = rows.len();
        let mut layout = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::InvalidSize {
                    size: row.len(),
                    min: size,
                    max: size,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                if value > 0 {
                    layout.push((x, y, value));
                }
            }
        }
        Self::from_layout(size, &layout)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.tiles.iter()
    }

    /// The live tile whose current cell is `pos`.
    pub fn tile_at(&self, pos: Position) -> Option<TileId> {
        if pos.x >= self.size || pos.y >= self.size {
            return None;
        }
        self.tiles.cell_index(self.size)[pos.index(self.size)]
    }

    /// True while a move is sliding or waiting to commit. Directions are ignored.
    pub fn is_resolving(&self) -> bool {
        !self.scheduler.is_idle()
    }

    pub fn pending_action(&self) -> Option<StepAction> {
        self.scheduler.front()
    }

    pub fn is_animating(&self) -> bool {
        self.tiles.iter().any(|(_, tile)| tile.is_moving())
    }

    /// Largest live tile value, 0 on an empty board.
    pub fn max_value(&self) -> u32 {
        self.tiles
            .iter()
            .map(|(_, tile)| tile.value().max(tile.next_value()))
            .max()
            .unwrap_or(0)
    }

    /// Row-major values of live tiles at their current cells.
    pub fn values(&self) -> Vec<Vec<u32>> {
        let mut rows = vec![vec![0; self.size]; self.size];
        for (_, tile) in self.tiles.iter() {
            if tile.is_alive() {
                let pos = tile.position();
                rows[pos.y][pos.x] = tile.value();
            }
        }
        rows
    }

    /// Accept a directional command. Ignored (returns false) while a move is
    /// resolving or when nothing can slide or merge.
    pub fn on_direction(&mut self, direction: Direction) -> bool {
        if self.is_resolving() {
            debug!(%direction, "direction ignored while a move resolves");
            return false;
        }
        self.stop_animations();
        let resolution = self.resolve_move(direction);
        if resolution.moved {
            self.scheduler.schedule_move();
        }
        resolution.moved
    }

    /// What `direction` would do right now, computed on a copy.
    ///
    /// The board itself is left untouched, animations included. While a move
    /// resolves this previews the layout it is sliding into.
    pub fn preview_move(&self, direction: Direction) -> MoveResolution {
        let mut tiles = self.tiles.clone();
        for (_, tile) in tiles.iter_mut() {
            tile.stop_animation();
        }
        resolve_move(&mut tiles, self.size, direction)
    }

    /// Whether `direction` would slide or merge anything.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.preview_move(direction).moved
    }

    fn stop_animations(&mut self) {
        for (_, tile) in self.tiles.iter_mut() {
            tile.stop_animation();
        }
    }

    fn resolve_move(&mut self, direction: Direction) -> MoveResolution {
        let resolution = resolve_move(&mut self.tiles, self.size, direction);
        if resolution.moved {
            self.moves += 1;
            debug!(
                %direction,
                slides = resolution.slides,
                merges = resolution.merges.len(),
                "move resolved"
            );
        } else {
            debug!(%direction, "move rejected");
        }
        resolution
    }

    /// Advance one simulation step.
    ///
    /// A `BoardFull` error from the spawn is fatal; the board is left with the
    /// commit action still queued.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> BoardResult<TickResult> {
        self.ticks += 1;
        for (_, tile) in self.tiles.iter_mut() {
            tile.advance();
        }

        let mut result = TickResult::default();
        let mut scheduler = std::mem::take(&mut self.scheduler);
        let step = scheduler.step(|action| self.run_action(action, rng, &mut result.events));
        self.scheduler = scheduler;
        step?;
        Ok(result)
    }

    fn run_action<R: Rng>(
        &mut self,
        action: StepAction,
        rng: &mut R,
        events: &mut Vec<TickEvent>,
    ) -> BoardResult<StepStatus> {
        match action {
            StepAction::AwaitAnimations => {
                if self.is_animating() {
                    return Ok(StepStatus::Pending);
                }
                events.push(TickEvent::AnimationsSettled);
                Ok(StepStatus::Terminated)
            }
            StepAction::CommitAndSpawn => {
                let removed = self.commit();
                events.push(TickEvent::Committed { removed });

                let id = add_random_tile(&mut self.tiles, self.size, rng)?;
                if let Some(tile) = self.tiles.get(id) {
                    events.push(TickEvent::TileSpawned {
                        id,
                        position: tile.position(),
                        value: tile.value(),
                    });
                }
                Ok(StepStatus::Terminated)
            }
        }
    }

    /// Drop tiles absorbed by the finished move.
    ///
    /// # Panics
    ///
    /// Panics if a tile is still sliding or holds a pending state.
    fn commit(&mut self) -> usize {
        for (id, tile) in self.tiles.iter() {
            assert!(
                !tile.is_moving() && tile.next_value() == 0,
                "{id:?} still pending at commit"
            );
        }
        let removed = self.tiles.retain(Tile::is_alive);
        // Rebuilding the index checks that no two survivors share a cell.
        self.tiles.cell_index(self.size);
        debug!(removed, remaining = self.tiles.len(), "move committed");
        removed
    }

    /// Copy of every tile's read-only state for a renderer.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            resolving: self.is_resolving(),
            tiles: self
                .tiles
                .iter()
                .map(|(id, tile)| TileSnapshot::capture(id, tile))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_board_has_two_tiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = Board::new(4, &mut rng).unwrap();
        assert_eq!(board.tile_count(), INITIAL_TILE_COUNT);
        assert!(!board.is_resolving());
        assert_eq!(board.moves(), 0);
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert!(matches!(
            Board::empty(1),
            Err(BoardError::InvalidSize { size: 1, .. })
        ));
        assert!(matches!(
            Board::empty(9),
            Err(BoardError::InvalidSize { size: 9, .. })
        ));
        assert!(Board::empty(2).is_ok());
    }

    #[test]
    fn test_from_layout_rejects_bad_cells() {
        assert_eq!(
            Board::from_layout(4, &[(4, 0, 2)]).unwrap_err(),
            BoardError::OutOfBounds { x: 4, y: 0, size: 4 }
        );
        assert_eq!(
            Board::from_layout(4, &[(1, 1, 2), (1, 1, 4)]).unwrap_err(),
            BoardError::CellOccupied { x: 1, y: 1 }
        );
    }

    #[test]
    fn test_from_layout_rejects_bad_values() {
        assert_eq!(
            Board::from_layout(4, &[(0, 0, 2), (1, 0, 0)]).unwrap_err(),
            BoardError::InvalidValue { x: 1, y: 0, value: 0 }
        );
        assert_eq!(
            Board::from_layout(4, &[(2, 2, 6)]).unwrap_err(),
            BoardError::InvalidValue { x: 2, y: 2, value: 6 }
        );
        assert_eq!(
            Board::from_layout(4, &[(0, 0, 1)]).unwrap_err(),
            BoardError::InvalidValue { x: 0, y: 0, value: 1 }
        );
    }

    #[test]
    fn test_largest_pair_does_not_overflow() {
        let top = 1 << 31;
        let mut board = Board::from_rows(&[vec![top, top], vec![0, 0]]).unwrap();
        assert!(!board.on_direction(Direction::Left));
        assert!(board.on_direction(Direction::Down));
        assert_eq!(board.max_value(), top);
    }

    #[test]
    fn test_preview_leaves_board_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let board = Board::new(4, &mut rng).unwrap();
        let before = board.snapshot();
        let movable = Direction::ALL
            .into_iter()
            .filter(|&direction| board.can_move(direction))
            .count();
        assert!(movable > 0);
        assert_eq!(board.snapshot(), before);
        assert_eq!(board.moves(), 0);
        assert!(!board.is_resolving());
    }

    #[test]
    fn test_preview_matches_on_direction() {
        let board = Board::from_rows(&[vec![2, 2, 0], vec![0, 4, 0], vec![0, 0, 8]]).unwrap();
        for direction in Direction::ALL {
            let preview = board.preview_move(direction);
            let mut real = board.clone();
            assert_eq!(real.on_direction(direction), preview.moved);
        }
        assert_eq!(board.preview_move(Direction::Left).merges.len(), 1);
    }

    #[test]
    fn test_one_counter_runs_after_move_on_fresh_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut board = Board::new(4, &mut rng).unwrap();
        let direction = Direction::ALL
            .into_iter()
            .find(|&direction| board.can_move(direction))
            .unwrap();
        assert!(board.on_direction(direction));
        for (_, tile) in board.tiles() {
            let running = [
                tile.moving_count(),
                tile.start_popping_count(),
                tile.popping_count(),
            ]
            .iter()
            .filter(|&&count| count > 0)
            .count();
            assert!(running <= 1);
        }
    }

    #[test]
    fn test_from_rows_roundtrip_values() {
        let rows = vec![vec![2, 0, 0], vec![0, 4, 0], vec![0, 0, 8]];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.values(), rows);
        assert_eq!(board.max_value(), 8);
    }

    #[test]
    fn test_tile_at_finds_live_tile() {
        let board = Board::from_layout(4, &[(2, 3, 16)]).unwrap();
        let id = board.tile_at(Position::new(2, 3)).unwrap();
        assert_eq!(board.tile(id).map(Tile::value), Some(16));
        assert_eq!(board.tile_at(Position::new(0, 0)), None);
        assert_eq!(board.tile_at(Position::new(7, 7)), None);
    }

    #[test]
    fn test_direction_ignored_while_resolving() {
        let mut board = Board::from_layout(4, &[(3, 0, 2)]).unwrap();
        assert!(board.on_direction(Direction::Left));
        assert!(board.is_resolving());
        assert!(!board.on_direction(Direction::Right));
        assert_eq!(board.moves(), 1);
    }

    #[test]
    fn test_rejected_move_queues_nothing() {
        let mut board = Board::from_layout(4, &[(0, 0, 2)]).unwrap();
        assert!(!board.on_direction(Direction::Left));
        assert!(!board.is_resolving());
        assert_eq!(board.moves(), 0);
    }

    #[test]
    fn test_move_commits_and_spawns() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut board = Board::from_layout(4, &[(0, 0, 2), (1, 0, 2)]).unwrap();
        assert!(board.on_direction(Direction::Left));

        let mut events = Vec::new();
        for _ in 0..20 {
            events.extend(board.tick(&mut rng).unwrap().events);
            if !board.is_resolving() {
                break;
            }
        }
        assert!(!board.is_resolving());
        assert_eq!(events[0], TickEvent::AnimationsSettled);
        assert_eq!(events[1], TickEvent::Committed { removed: 1 });
        assert!(matches!(events[2], TickEvent::TileSpawned { .. }));
        assert_eq!(board.tile_count(), 2);
        assert_eq!(board.values()[0][0], 4);
    }

    #[test]
    fn test_board_full_surfaces_from_tick() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut board = Board::from_rows(&[vec![2, 4], vec![8, 16]]).unwrap();
        board.scheduler.push(StepAction::CommitAndSpawn);
        assert_eq!(board.tick(&mut rng), Err(BoardError::BoardFull));
        assert_eq!(board.pending_action(), Some(StepAction::CommitAndSpawn));
    }

    #[test]
    fn test_snapshot_reflects_tiles() {
        let board = Board::from_layout(3, &[(0, 0, 2), (2, 2, 4)]).unwrap();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.size, 3);
        assert!(!snapshot.resolving);
        assert_eq!(snapshot.tiles.len(), 2);
    }
}
