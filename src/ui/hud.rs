use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::GameSnapshot;

const SEPARATOR: &str = " │ ";
const CONTROLS_HINT: &str = "arrows/WASD move · r restart · q quit";

/// Session values displayed next to the engine snapshot.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    /// Best score this session, including the current game.
    pub high_score: u32,
    /// The game that just ended beat the previous best.
    pub new_high_score: bool,
    /// Waiting on the start screen; the driver is not ticking yet.
    pub awaiting_start: bool,
    pub theme: &'a Theme,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, stats_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(stats_line(
            snapshot,
            info,
            usize::from(stats_area.width),
        ))
        .alignment(Alignment::Center),
        stats_area,
    );

    frame.render_widget(
        Paragraph::new(CONTROLS_HINT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(info.theme.hud_label)),
        hint_area,
    );

    play_area
}

/// Score | Hi | Length | Tick, with one-letter labels when space is short.
fn stats_line(
    snapshot: &GameSnapshot,
    info: &HudInfo<'_>,
    available_width: usize,
) -> Line<'static> {
    let values = [
        ("Score", "S", snapshot.score.to_string()),
        ("Hi", "H", info.high_score.to_string()),
        ("Length", "L", snapshot.len().to_string()),
        ("Tick", "T", format!("{}ms", snapshot.tick_interval_ms)),
    ];

    let compact = full_stats_width(&values) > available_width;
    let label_style = Style::default().fg(info.theme.hud_label);
    let value_style = Style::default().fg(info.theme.hud_value);
    let high_style = if snapshot.score > 0 && snapshot.score == info.high_score {
        Style::default().fg(info.theme.hud_accent)
    } else {
        value_style
    };

    let mut spans = Vec::with_capacity(values.len() * 3);
    for (index, (label, short, value)) in values.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, label_style));
        }

        let label = if compact { short } else { label };
        let style = if index < 2 { high_style } else { value_style };
        spans.push(Span::styled(format!("{label}: "), label_style));
        spans.push(Span::styled(value, style));
    }

    Line::from(spans)
}

fn full_stats_width(values: &[(&str, &str, String); 4]) -> usize {
    let fields: usize = values
        .iter()
        .map(|(label, _, value)| label.width() + 2 + value.width())
        .sum();

    fields + SEPARATOR.width() * (values.len() - 1)
}
