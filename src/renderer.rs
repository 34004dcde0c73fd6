use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::config::{
    CELL_WIDTH, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GridSize, Theme,
};
use crate::game::{GameSnapshot, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Renders the full game frame from an engine snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, hud_info);

    let (board_width, board_height) = board_dimensions(snapshot.grid);
    if play_area.width < board_width || play_area.height < board_height {
        render_too_small(frame, play_area, board_width, board_height);
        return;
    }

    let board = centered(play_area, board_width, board_height);
    let theme = hud_info.theme;
    let block = Block::bordered().border_style(Style::new().fg(theme.border));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    let buffer = frame.buffer_mut();
    render_grid(buffer, inner, snapshot.grid, theme);
    render_food(buffer, inner, snapshot, theme);
    render_snake(buffer, inner, snapshot, theme);

    if hud_info.awaiting_start && snapshot.status == GameStatus::Ready {
        render_start_menu(frame, board, hud_info.high_score, theme);
        return;
    }

    if snapshot.is_over {
        render_game_over_menu(
            frame,
            board,
            snapshot.score,
            hud_info.high_score,
            hud_info.new_high_score,
            snapshot.outcome,
            theme,
        );
    }
}

/// Terminal size of the bordered board for `grid`.
#[must_use]
pub fn board_dimensions(grid: GridSize) -> (u16, u16) {
    (
        grid.width.saturating_mul(CELL_WIDTH).saturating_add(2),
        grid.height.saturating_add(2),
    )
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, width: u16, height: u16) {
    frame.render_widget(
        Paragraph::new(format!("Enlarge the terminal to at least {width}x{height}"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Dim dot per empty cell stands in for grid lines.
fn render_grid(buffer: &mut Buffer, inner: Rect, grid: GridSize, theme: &Theme) {
    let style = Style::new().fg(theme.grid_dot);

    for y in 0..i32::from(grid.height) {
        for x in 0..i32::from(grid.width) {
            if let Some((column, row)) = logical_to_terminal(inner, grid, Position { x, y }) {
                buffer.set_string(column, row, GLYPH_EMPTY, style);
            }
        }
    }
}

fn render_food(buffer: &mut Buffer, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, snapshot.food) else {
        return;
    };

    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(buffer: &mut Buffer, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let body_style = Style::new().fg(theme.snake_body);

    // Tail first so the head always paints last.
    for segment in snapshot.snake.iter().skip(1).rev() {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, *segment) {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, body_style);
        }
    }

    if let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, snapshot.head()) {
        buffer.set_string(
            x,
            y,
            head_glyph(snapshot.direction),
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
