//! Market sentiment: headline/score pairs, or the section's warning or error

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{C_BRIGHT, C_DIM, C_INFO, C_NEGATIVE, C_WARN, signed_color};
use crate::shared::sections::SentimentSection;

pub fn render_headlines(f: &mut Frame, area: Rect, section: &SentimentSection) {
    let block = Block::default()
        .title(" Real-Time Market Sentiment ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_INFO));

    let lines: Vec<Line> = match section {
        SentimentSection::Headlines(headlines) => headlines
            .iter()
            .flat_map(|headline| {
                let mut title = vec![
                    Span::styled("Headline: ", Style::default().fg(C_DIM)),
                    Span::styled(
                        headline.title.clone(),
                        Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
                    ),
                ];
                if let Some(source) = &headline.source {
                    title.push(Span::styled(format!("  ({})", source), Style::default().fg(C_DIM)));
                }
                [
                    Line::from(title),
                    Line::from(vec![
                        Span::styled("Sentiment Score: ", Style::default().fg(C_DIM)),
                        Span::styled(
                            format!("{:.4}", headline.score),
                            Style::default().fg(signed_color(headline.score)),
                        ),
                    ]),
                    Line::from(Span::styled("---", Style::default().fg(C_DIM))),
                ]
            })
            .collect(),
        SentimentSection::NoNews => vec![Line::from(Span::styled(
            section.message().unwrap_or_default(),
            Style::default().fg(C_WARN),
        ))],
        SentimentSection::Failed(_) => vec![Line::from(Span::styled(
            section.message().unwrap_or_default(),
            Style::default().fg(C_NEGATIVE),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
