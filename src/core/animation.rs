//! Normalized animation data for renderers.
//!
//! Nothing here depends on a drawing library. A renderer maps [`TileVisual`]
//! cell coordinates and scale onto whatever it draws with.

use super::constants::{MAX_MOVING_COUNT, MAX_POPPING_COUNT, POP_MAX_SCALE};
use super::tile::Tile;

/// The phase a tile is in, with progress normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileAnimation {
    Idle,
    Sliding { progress: f32 },
    Spawning { progress: f32 },
    Popping { progress: f32 },
}

/// Where and how large to draw a tile this frame, in cell units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileVisual {
    pub x: f32,
    pub y: f32,
    /// 1.0 is a full cell.
    pub scale: f32,
}

fn lerp(a: f32, b: f32, rate: f32) -> f32 {
    a * (1.0 - rate) + b * rate
}

fn remaining_rate(count: u8, max: u8) -> f32 {
    1.0 - f32::from(count) / f32::from(max)
}

/// Merge-grow scale: up to the peak over the first third, back down over the rest.
fn pop_scale(popping_count: u8) -> f32 {
    let max = MAX_POPPING_COUNT;
    let rise_start = max * 2 / 3;
    let rate = if popping_count >= rise_start {
        1.0 - f32::from(popping_count - rise_start) / f32::from(max / 3)
    } else {
        f32::from(popping_count) / f32::from(rise_start)
    };
    lerp(1.0, POP_MAX_SCALE, rate)
}

impl Tile {
    pub fn animation(&self) -> TileAnimation {
        if self.moving_count() > 0 {
            TileAnimation::Sliding {
                progress: remaining_rate(self.moving_count(), MAX_MOVING_COUNT),
            }
        } else if self.start_popping_count() > 0 {
            TileAnimation::Spawning {
                progress: remaining_rate(self.start_popping_count(), MAX_POPPING_COUNT),
            }
        } else if self.popping_count() > 0 {
            TileAnimation::Popping {
                progress: remaining_rate(self.popping_count(), MAX_POPPING_COUNT),
            }
        } else {
            TileAnimation::Idle
        }
    }

    pub fn visual(&self) -> TileVisual {
        let current = self.current();
        let mut visual = TileVisual {
            x: current.x as f32,
            y: current.y as f32,
            scale: 1.0,
        };
        match self.animation() {
            TileAnimation::Sliding { progress } => {
                let next = self.next();
                visual.x = lerp(current.x as f32, next.x as f32, progress);
                visual.y = lerp(current.y as f32, next.y as f32, progress);
            }
            TileAnimation::Spawning { progress } => visual.scale = progress,
            TileAnimation::Popping { .. } => visual.scale = pop_scale(self.popping_count()),
            TileAnimation::Idle => {}
        }
        visual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tile::TileState;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_settled_tile_is_idle_full_size() {
        let tile = Tile::settled(2, 1, 2);
        assert_eq!(tile.animation(), TileAnimation::Idle);
        let visual = tile.visual();
        assert!(close(visual.x, 1.0));
        assert!(close(visual.y, 2.0));
        assert!(close(visual.scale, 1.0));
    }

    #[test]
    fn test_spawn_grows_from_zero() {
        let mut tile = Tile::new(2, 0, 0);
        assert!(close(tile.visual().scale, 0.0));
        tile.advance();
        tile.advance();
        tile.advance();
        assert!(close(tile.visual().scale, 0.5));
    }

    #[test]
    fn test_slide_interpolates_position() {
        let mut tile = Tile::settled(2, 0, 0);
        tile.begin_move(TileState::new(2, 0, 3));
        // Progress 0 at the start of the slide.
        assert!(close(tile.visual().y, 0.0));
        tile.advance();
        tile.advance();
        let visual = tile.visual();
        assert!(close(visual.x, 0.0));
        assert!(close(visual.y, 3.0 * 2.0 / 5.0));
        assert!(matches!(tile.animation(), TileAnimation::Sliding { .. }));
    }

    #[test]
    fn test_pop_scale_rises_then_falls() {
        assert!(close(pop_scale(6), 1.0));
        assert!(close(pop_scale(5), 1.1));
        assert!(close(pop_scale(4), POP_MAX_SCALE));
        assert!(close(pop_scale(2), 1.1));
        assert!(close(pop_scale(0), 1.0));
        for count in 0..=MAX_POPPING_COUNT {
            let scale = pop_scale(count);
            assert!((1.0..=POP_MAX_SCALE + 1e-5).contains(&scale));
        }
    }

    #[test]
    fn test_merge_survivor_reports_popping() {
        let mut tile = Tile::settled(2, 1, 0);
        tile.begin_move(TileState::new(4, 0, 0));
        for _ in 0..MAX_MOVING_COUNT {
            tile.advance();
        }
        assert_eq!(tile.animation(), TileAnimation::Popping { progress: 0.0 });
        tile.advance();
        tile.advance();
        assert!(tile.visual().scale > 1.0);
    }
}
