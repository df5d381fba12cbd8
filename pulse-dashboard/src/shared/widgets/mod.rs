//! Ratatui widgets for the dashboard page
//!
//! Layout: title bar on top, the configuration panel as a left sidebar, and the
//! three sections stacked in page order on the right.

pub mod heatmap;
pub mod headlines;
pub mod panel;
pub mod risk;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::controls::Controls;
use super::sections::{CorrelationSection, RiskSection, SentimentSection};
use super::state::DashboardView;

pub const C_POSITIVE: Color = Color::Rgb(100, 220, 100);
pub const C_NEGATIVE: Color = Color::Rgb(220, 100, 100);
pub const C_WARN: Color = Color::Rgb(220, 200, 80);
pub const C_INFO: Color = Color::Rgb(100, 180, 220);
pub const C_DIM: Color = Color::Rgb(120, 120, 120);
pub const C_BRIGHT: Color = Color::Rgb(220, 220, 220);

const SIDEBAR_WIDTH: u16 = 36;
const RISK_HEIGHT: u16 = 6;

/// Draw the whole page
pub fn render_ui(f: &mut Frame, controls: &Controls, view: &DashboardView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(f.area());

    render_title(f, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    panel::render_config_panel(f, body[0], controls, view);

    let snapshot = view.snapshot.as_ref();
    let heatmap_height = snapshot
        .and_then(|s| match &s.correlation {
            CorrelationSection::Matrix(matrix) => Some(matrix.size() as u16 + 4),
            CorrelationSection::NoData => None,
        })
        .unwrap_or(4);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(heatmap_height),
            Constraint::Min(6),
            Constraint::Length(RISK_HEIGHT),
        ])
        .split(body[1]);

    match snapshot {
        Some(snapshot) => {
            heatmap::render_heatmap(f, sections[0], &snapshot.correlation);
            headlines::render_headlines(f, sections[1], &snapshot.sentiment);
            risk::render_risk(f, sections[2], &snapshot.risk);
        }
        None => {
            heatmap::render_heatmap(f, sections[0], &CorrelationSection::NoData);
            headlines::render_headlines(f, sections[1], &SentimentSection::Headlines(Vec::new()));
            risk::render_risk(f, sections[2], &RiskSection::Prompt);
        }
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Dynamic Market Sentiment Analyzer ",
            Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Tab: next control  Enter: apply  F5: rerun  Esc: quit",
            Style::default().fg(C_DIM),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

/// Colour for a signed value: green above zero, red below
pub fn signed_color(value: f64) -> Color {
    if value > 0.0 {
        C_POSITIVE
    } else if value < 0.0 {
        C_NEGATIVE
    } else {
        C_BRIGHT
    }
}
