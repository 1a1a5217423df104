//! Terminal input mapping: keys and mouse drags to game commands.

use crate::core::Direction;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

/// UI-agnostic commands for the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Move(Direction),
    /// Start a fresh board
    Restart,
    Quit,
    /// Any other key
    Other,
}

pub fn map_key(code: KeyCode) -> GameInput {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => GameInput::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
            GameInput::Move(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
            GameInput::Move(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
            GameInput::Move(Direction::Right)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => GameInput::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    None,
    Pressing { column: u16, row: u16 },
    Settled(Direction),
}

/// Turns a left-button press, drag and release into one swipe direction.
#[derive(Debug, Clone)]
pub struct DragTracker {
    state: DragState,
    threshold: i32,
}

impl DragTracker {
    pub fn new(threshold: i32) -> Self {
        Self {
            state: DragState::None,
            threshold,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match (self.state, event.kind) {
            (DragState::None, MouseEventKind::Down(MouseButton::Left)) => {
                self.state = DragState::Pressing {
                    column: event.column,
                    row: event.row,
                };
            }
            (DragState::Pressing { column, row }, MouseEventKind::Up(MouseButton::Left)) => {
                // Terminal cells are about twice as tall as they are wide.
                let dx = (i32::from(event.column) - i32::from(column)) / 2;
                let dy = i32::from(event.row) - i32::from(row);
                self.state = match Direction::from_drag(dx, dy, self.threshold) {
                    Some(direction) => DragState::Settled(direction),
                    None => DragState::None,
                };
            }
            _ => {}
        }
    }

    /// The completed swipe, if any. Consumes it.
    pub fn take_direction(&mut self) -> Option<Direction> {
        match self.state {
            DragState::Settled(direction) => {
                self.state = DragState::None;
                Some(direction)
            }
            _ => None,
        }
    }
}
