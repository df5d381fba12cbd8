//! Portfolio risk: VaR figure with a loss bar, or the section's prompt or error

use itertools::Itertools;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{C_BRIGHT, C_DIM, C_INFO, C_NEGATIVE, signed_color};
use crate::shared::sections::RiskSection;

/// Daily loss that fills the whole bar
const BAR_FULL_SCALE: f64 = 0.10;

/// Loss bar: one filled cell per `BAR_FULL_SCALE / width` of loss
pub fn loss_bar(var: f64, width: usize) -> String {
    let loss = (-var).max(0.0);
    let filled = ((loss / BAR_FULL_SCALE) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn render_risk(f: &mut Frame, area: Rect, section: &RiskSection) {
    let block = Block::default()
        .title(" Portfolio Risk Analysis ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_INFO));
    let inner_width = block.inner(area).width as usize;

    let lines = match section {
        RiskSection::Prompt => vec![Line::from(Span::styled(
            section.message(),
            Style::default().fg(C_INFO),
        ))],
        RiskSection::ValueAtRisk {
            tickers,
            var,
            observations,
            ..
        } => {
            let bar_width = inner_width.saturating_sub(12).max(10);
            vec![
                Line::from(Span::styled(
                    section.message(),
                    Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled("Loss  ", Style::default().fg(C_DIM)),
                    Span::styled(loss_bar(*var, bar_width), Style::default().fg(signed_color(*var))),
                    Span::styled(format!(" {:.0}%", BAR_FULL_SCALE * 100.0), Style::default().fg(C_DIM)),
                ]),
                Line::from(Span::styled(
                    format!(
                        "{} equal-weighted, {} daily returns",
                        tickers.iter().join(", "),
                        observations
                    ),
                    Style::default().fg(C_DIM),
                )),
            ]
        }
        RiskSection::NoData | RiskSection::InsufficientHistory => vec![Line::from(Span::styled(
            section.message(),
            Style::default().fg(C_NEGATIVE),
        ))],
    };

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}
