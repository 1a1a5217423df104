//! Board rendering.
//!
//! Each cell is a `CELL_W`×`CELL_H` block of terminal characters separated by
//! one-character gutters. Tiles are placed from their [`TileVisual`], so a
//! sliding tile is drawn between cells and a spawning tile starts as a dot.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_status_bar, GameLayout,
};
use crate::core::{BoardSnapshot, TileSnapshot, TileVisual};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub const CELL_W: u16 = 7;
pub const CELL_H: u16 = 3;
const GAP_W: u16 = 1;
const GAP_H: u16 = 1;

const FRAME_BG: Color = Color::Rgb(187, 173, 160);
const EMPTY_BG: Color = Color::Rgb(205, 193, 180);
const DARK_TEXT: Color = Color::Rgb(119, 110, 101);
const LIGHT_TEXT: Color = Color::Rgb(249, 246, 242);

/// Facts shown in the info panel next to the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardStats {
    pub moves: u64,
    pub max_value: u32,
    pub seed: Option<u64>,
}

/// Terminal size of a `size`×`size` board including gutters.
pub fn board_extent(size: usize) -> (u16, u16) {
    let size = size as u16;
    (
        size * CELL_W + (size + 1) * GAP_W,
        size * CELL_H + (size + 1) * GAP_H,
    )
}

/// Background and text color for a tile value.
pub fn tile_colors(value: u32) -> (Color, Color) {
    let bg = match value {
        2 => Color::Rgb(238, 228, 218),
        4 => Color::Rgb(237, 224, 200),
        8 => Color::Rgb(242, 177, 121),
        16 => Color::Rgb(245, 149, 99),
        32 => Color::Rgb(246, 124, 95),
        64 => Color::Rgb(246, 94, 59),
        128 => Color::Rgb(237, 207, 114),
        256 => Color::Rgb(237, 204, 97),
        512 => Color::Rgb(237, 200, 80),
        1024 => Color::Rgb(237, 197, 63),
        2048 => Color::Rgb(237, 194, 46),
        _ => Color::Rgb(60, 58, 50),
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    (bg, fg)
}

/// Screen rectangle for a tile, clipped to `board`.
pub fn tile_rect(board: Rect, visual: TileVisual) -> Rect {
    let step_x = f32::from(CELL_W + GAP_W);
    let step_y = f32::from(CELL_H + GAP_H);
    let cell_x = board.x + GAP_W + (visual.x * step_x).round() as u16;
    let cell_y = board.y + GAP_H + (visual.y * step_y).round() as u16;

    let rect = if visual.scale < 1.0 {
        let w = ((f32::from(CELL_W) * visual.scale).round() as u16).clamp(1, CELL_W);
        let h = ((f32::from(CELL_H) * visual.scale).round() as u16).clamp(1, CELL_H);
        Rect::new(cell_x + (CELL_W - w) / 2, cell_y + (CELL_H - h) / 2, w, h)
    } else if visual.scale >= 1.1 {
        // Merge pop: bleed one column into each gutter.
        Rect::new(cell_x.saturating_sub(1), cell_y, CELL_W + 2, CELL_H)
    } else {
        Rect::new(cell_x, cell_y, CELL_W, CELL_H)
    };
    rect.intersection(board)
}

/// Render the whole game screen for one frame.
pub fn render_board_scene(
    frame: &mut Frame,
    area: Rect,
    snapshot: &BoardSnapshot,
    stats: &BoardStats,
) {
    let (board_w, board_h) = board_extent(snapshot.size);
    let layout: GameLayout =
        create_game_layout(frame, area, " 2048 ", Color::Rgb(237, 194, 46), board_h, 22);

    render_board(frame, layout.content, snapshot, board_w, board_h);

    let (status, color) = if snapshot.resolving {
        ("Sliding...", Color::Yellow)
    } else {
        ("Your move", Color::Green)
    };
    render_status_bar(
        frame,
        layout.status_bar,
        status,
        color,
        &[("[Arrows]", "Move"), ("[R]", "Restart"), ("[Q]", "Quit")],
    );
    render_info_panel(frame, layout.info_panel, snapshot, stats);
}

fn render_board(
    frame: &mut Frame,
    area: Rect,
    snapshot: &BoardSnapshot,
    board_w: u16,
    board_h: u16,
) {
    if area.width < board_w || area.height < board_h {
        let msg = Paragraph::new("Terminal too small for this board")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let board = Rect::new(
        area.x + (area.width - board_w) / 2,
        area.y + (area.height - board_h) / 2,
        board_w,
        board_h,
    );
    frame.render_widget(Block::default().style(Style::default().bg(FRAME_BG)), board);

    for y in 0..snapshot.size {
        for x in 0..snapshot.size {
            let cell = tile_rect(
                board,
                TileVisual {
                    x: x as f32,
                    y: y as f32,
                    scale: 1.0,
                },
            );
            frame.render_widget(Block::default().style(Style::default().bg(EMPTY_BG)), cell);
        }
    }

    for tile in snapshot.draw_order() {
        render_tile(frame, board, tile);
    }
}

fn render_tile(frame: &mut Frame, board: Rect, tile: &TileSnapshot) {
    let rect = tile_rect(board, tile.visual);
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let value = tile.display_value();
    let (bg, fg) = tile_colors(value);
    let mut text_style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
    if tile.popping_count > 0 {
        text_style = text_style.add_modifier(Modifier::REVERSED);
    }

    let label = value.to_string();
    let mut lines = vec![Line::from(""); rect.height as usize];
    if label.len() as u16 <= rect.width {
        lines[rect.height as usize / 2] = Line::from(Span::styled(label, text_style));
    }
    let widget = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .alignment(Alignment::Center);
    frame.render_widget(widget, rect);
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    snapshot: &BoardSnapshot,
    stats: &BoardStats,
) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let live = snapshot
        .tiles
        .iter()
        .filter(|tile| tile.current.value > 0)
        .count();
    let seed = stats
        .seed
        .map_or_else(|| "random".to_string(), |seed| seed.to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled(" Board:   ", label),
            Span::styled(format!("{0}x{0}", snapshot.size), value),
        ]),
        Line::from(vec![
            Span::styled(" Tiles:   ", label),
            Span::styled(live.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Largest: ", label),
            Span::styled(stats.max_value.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Moves:   ", label),
            Span::styled(stats.moves.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Seed:    ", label),
            Span::styled(seed, value),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Arrows/WASD/hjkl", label)),
        Line::from(Span::styled(" or drag the mouse", label)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
