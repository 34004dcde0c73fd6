use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::GameOutcome;

const POPUP_WIDTH: u16 = 32;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, theme: &Theme) {
    let lines = vec![
        Line::from("SNAKE").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    render_popup(frame, area, " start ", lines, theme);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    new_high_score: bool,
    outcome: Option<GameOutcome>,
    theme: &Theme,
) {
    let mut lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("High score: {high_score}")),
        Line::from(outcome_text(outcome)),
    ];

    if new_high_score {
        lines.push(Line::from("New high score!").style(Style::default().fg(theme.hud_accent)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("[Enter]/[R] Play Again"));
    lines.push(Line::from("[Q]/[Esc] Quit"));

    render_popup(frame, area, " game over ", lines, theme);
}

fn outcome_text(outcome: Option<GameOutcome>) -> &'static str {
    match outcome {
        Some(GameOutcome::WallCollision) => "Cause: hit wall",
        Some(GameOutcome::SelfCollision) => "Cause: hit yourself",
        Some(GameOutcome::BoardFilled) => "Board filled!",
        None => "",
    }
}

fn render_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &'static str,
    lines: Vec<Line<'static>>,
    theme: &Theme,
) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_popup(area, POPUP_WIDTH, height);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(theme.menu_footer)),
        ),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    center
}
