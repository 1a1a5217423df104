//! Move directions and board cell coordinates.

use serde::{Deserialize, Serialize};

/// Cardinal direction of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the (dx, dy) unit vector. Rows grow downward.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Map a drag/swipe vector to a direction.
    ///
    /// Drags shorter than `threshold` on both axes are ignored. Otherwise the
    /// dominant axis wins; ties go to the horizontal axis.
    pub fn from_drag(dx: i32, dy: i32, threshold: i32) -> Option<Self> {
        if dx.abs() < threshold && dy.abs() < threshold {
            return None;
        }
        if dx.abs() < dy.abs() {
            return Some(if dy < 0 { Self::Up } else { Self::Down });
        }
        Some(if dx < 0 { Self::Left } else { Self::Right })
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A zero-based (column, row) cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`, or `None` past the board edge.
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < size && y < size).then_some(Self { x, y })
    }

    /// Row-major index into a `size * size` cell array.
    pub fn index(self, size: usize) -> usize {
        self.y * size + self.x
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size,
            y: index / size,
        }
    }
}

/// Cell visit order for resolving a move: rows outer, columns inner, each axis
/// starting from the edge the tiles are moving toward.
pub fn scan_order(direction: Direction, size: usize) -> Vec<Position> {
    let (dx, dy) = direction.delta();
    let axis = |positive: bool| -> Vec<usize> {
        if positive {
            (0..size).rev().collect()
        } else {
            (0..size).collect()
        }
    };
    let columns = axis(dx > 0);
    let rows = axis(dy > 0);

    let mut order = Vec::with_capacity(size * size);
    for &y in &rows {
        for &x in &columns {
            order.push(Position { x, y });
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_from_drag_below_threshold_is_ignored() {
        assert_eq!(Direction::from_drag(1, -1, 2), None);
        assert_eq!(Direction::from_drag(0, 0, 2), None);
    }

    #[test]
    fn test_from_drag_dominant_axis_wins() {
        assert_eq!(Direction::from_drag(5, 2, 2), Some(Direction::Right));
        assert_eq!(Direction::from_drag(-5, 2, 2), Some(Direction::Left));
        assert_eq!(Direction::from_drag(1, 6, 2), Some(Direction::Down));
        assert_eq!(Direction::from_drag(1, -6, 2), Some(Direction::Up));
        // Equal magnitude resolves horizontally
        assert_eq!(Direction::from_drag(-3, 3, 2), Some(Direction::Left));
    }

    #[test]
    fn test_step_stops_at_edges() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Left, 4), None);
        assert_eq!(corner.step(Direction::Up, 4), None);
        assert_eq!(corner.step(Direction::Right, 4), Some(Position::new(1, 0)));

        let far = Position::new(3, 3);
        assert_eq!(far.step(Direction::Right, 4), None);
        assert_eq!(far.step(Direction::Down, 4), None);
        assert_eq!(far.step(Direction::Up, 4), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_index_roundtrip() {
        let pos = Position::new(2, 3);
        assert_eq!(pos.index(4), 14);
        assert_eq!(Position::from_index(14, 4), pos);
    }

    #[test]
    fn test_scan_order_starts_at_leading_edge() {
        let right = scan_order(Direction::Right, 3);
        assert_eq!(right.len(), 9);
        assert_eq!(right[0], Position::new(2, 0));
        assert_eq!(right[2], Position::new(0, 0));

        let down = scan_order(Direction::Down, 3);
        assert_eq!(down[0], Position::new(0, 2));
        assert_eq!(down[8], Position::new(2, 0));

        let left = scan_order(Direction::Left, 3);
        assert_eq!(left[0], Position::new(0, 0));
        assert_eq!(left[1], Position::new(1, 0));

        let up = scan_order(Direction::Up, 3);
        assert_eq!(up[0], Position::new(0, 0));
        assert_eq!(up[3], Position::new(0, 1));
    }
}
