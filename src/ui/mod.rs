pub mod board_scene;
pub mod game_common;

use crate::core::Board;
use board_scene::{render_board_scene, BoardStats};
use ratatui::Frame;

/// Main UI drawing function. `fatal` replaces the board with an error popup.
pub fn draw_ui(frame: &mut Frame, board: &Board, seed: Option<u64>, fatal: Option<&str>) {
    let area = frame.size();
    let stats = BoardStats {
        moves: board.moves(),
        max_value: board.max_value(),
        seed,
    };
    render_board_scene(frame, area, &board.snapshot(), &stats);

    if let Some(message) = fatal {
        game_common::render_error_overlay(frame, area, " Game stopped ", message);
    }
}
