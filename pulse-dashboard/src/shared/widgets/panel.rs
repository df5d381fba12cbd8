//! Configuration panel: the three input controls and the render status line

use pulse_data::LookbackDays;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{C_BRIGHT, C_DIM, C_INFO, C_POSITIVE, C_WARN};
use crate::shared::controls::{Controls, Focus, TextField};
use crate::shared::state::{DashboardView, RenderStatus};

pub const STATUS_COMPLETE: &str = "Configuration complete. Explore the insights!";
pub const STATUS_RUNNING: &str = "Running...";

/// Slider track: filled up to the position of `days` within the allowed range
pub fn slider_bar(days: LookbackDays, width: usize) -> String {
    let span = f64::from(LookbackDays::MAX - LookbackDays::MIN);
    let ratio = f64::from(days.get() - LookbackDays::MIN) / span;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn control_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { C_INFO } else { C_DIM };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_text_field(f: &mut Frame, area: Rect, title: &str, field: &TextField, focused: bool) {
    let block = control_block(title, focused);
    let inner = block.inner(area);
    f.render_widget(
        Paragraph::new(Span::styled(field.value(), Style::default().fg(C_BRIGHT))).block(block),
        area,
    );

    if focused && inner.width > 0 {
        let x = inner.x + (field.cursor() as u16).min(inner.width - 1);
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

fn render_slider(f: &mut Frame, area: Rect, days: LookbackDays, focused: bool) {
    let block = control_block(" Days of historical data ", focused);
    let inner = block.inner(area);
    let bar_width = (inner.width as usize).saturating_sub(6).max(4);

    let line = Line::from(vec![
        Span::styled(slider_bar(days, bar_width), Style::default().fg(C_INFO)),
        Span::styled(
            format!(" {:>4}", days.get()),
            Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn status_line(controls: &Controls, view: &DashboardView) -> Vec<Line<'static>> {
    let mut lines = vec![match view.status {
        RenderStatus::Running | RenderStatus::Idle => {
            Line::from(Span::styled(STATUS_RUNNING, Style::default().fg(C_WARN)))
        }
        RenderStatus::Complete => {
            Line::from(Span::styled(STATUS_COMPLETE, Style::default().fg(C_POSITIVE)))
        }
    }];

    if let Some(snapshot) = &view.snapshot {
        lines.push(Line::from(Span::styled(
            format!("Last run {}", snapshot.rendered_at.format("%H:%M:%S UTC")),
            Style::default().fg(C_DIM),
        )));
    }

    if controls.is_dirty() {
        lines.push(Line::from(Span::styled(
            "Edited: press Enter to apply",
            Style::default().fg(C_WARN),
        )));
    }

    lines
}

pub fn render_config_panel(f: &mut Frame, area: Rect, controls: &Controls, view: &DashboardView) {
    let block = Block::default()
        .title(" Configuration Panel ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_INFO));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let focus = controls.focus();
    render_text_field(
        f,
        chunks[0],
        " Tickers (comma separated) ",
        controls.tickers(),
        focus == Focus::Tickers,
    );
    render_slider(f, chunks[1], controls.days(), focus == Focus::Days);
    render_text_field(
        f,
        chunks[2],
        " Portfolio tickers ",
        controls.portfolio(),
        focus == Focus::Portfolio,
    );

    f.render_widget(
        Paragraph::new(status_line(controls, view)).wrap(Wrap { trim: true }),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::{DashboardInputs, DashboardState, render_dashboard, Sources};
    use crate::shared::testing::{FakeNews, FakePrices};
    use crate::shared::widgets::test_util::buffer_text;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn draw(controls: &Controls, view: &DashboardView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(36, 20)).unwrap();
        terminal
            .draw(|f| render_config_panel(f, f.area(), controls, view))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(LookbackDays::min(), 4), "░░░░");
        assert_eq!(slider_bar(LookbackDays::max(), 4), "████");
        assert_eq!(slider_bar(LookbackDays::new(197), 4), "██░░");
    }

    #[tokio::test]
    async fn test_panel_shows_controls_and_complete_status() {
        let sources = Sources::new(
            Arc::new(FakePrices::default()),
            Arc::new(FakeNews::with_titles(&["Headline"])),
        );
        let mut state = DashboardState::new();
        let generation = state.begin_render();
        let snapshot = render_dashboard(DashboardInputs::default(), &sources).await;
        state.complete_render(generation, snapshot);

        let controls = Controls::new(DashboardInputs::default());
        let text = draw(&controls, &state.view());

        assert!(text.contains("AAPL, TSLA, MSFT"));
        assert!(text.contains("180"));
        assert!(text.contains("Configuration complete."));
    }

    #[test]
    fn test_panel_shows_running_status() {
        let mut state = DashboardState::new();
        state.begin_render();
        let controls = Controls::new(DashboardInputs::default());

        let text = draw(&controls, &state.view());

        assert!(text.contains(STATUS_RUNNING));
    }
}
