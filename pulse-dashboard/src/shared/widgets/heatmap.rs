//! Correlation heatmap: annotated matrix on a diverging cool-warm ramp

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::{C_BRIGHT, C_DIM, C_INFO, C_NEGATIVE};
use crate::shared::calc::CorrelationMatrix;
use crate::shared::sections::{CorrelationSection, NO_TICKER_DATA};

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

const CELL_WIDTH: u16 = 8;

/// Map a correlation in [-1, 1] onto the cool-warm ramp
pub fn coolwarm(value: f64) -> Color {
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 { (MID, COOL, -v) } else { (MID, WARM, v) };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    Color::Rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Two decimals, or `nan` where the correlation is undefined
pub fn format_correlation(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "nan".to_string(),
    }
}

fn cell_style(value: Option<f64>) -> Style {
    match value {
        Some(v) => {
            let fg = if v.abs() > 0.5 { Color::White } else { Color::Black };
            Style::default().bg(coolwarm(v)).fg(fg)
        }
        None => Style::default().fg(C_DIM),
    }
}

pub fn render_heatmap(f: &mut Frame, area: Rect, section: &CorrelationSection) {
    let block = Block::default()
        .title(" Stock Correlation Heatmap ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_INFO));

    match section {
        CorrelationSection::Matrix(matrix) => render_matrix(f, area, matrix, block),
        CorrelationSection::NoData => {
            let message = Line::from(Span::styled(NO_TICKER_DATA, Style::default().fg(C_NEGATIVE)));
            f.render_widget(Paragraph::new(message).block(block), area);
        }
    }
}

fn render_matrix(f: &mut Frame, area: Rect, matrix: &CorrelationMatrix, block: Block) {
    let label_width = matrix
        .tickers()
        .iter()
        .map(|t| t.as_str().chars().count() as u16)
        .max()
        .unwrap_or(0)
        + 1;

    let label_style = Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD);

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(matrix.tickers().iter().map(|t| Cell::from(t.to_string())))
            .map(|cell| cell.style(label_style)),
    );

    let rows = matrix.tickers().iter().enumerate().map(|(i, ticker)| {
        let cells = std::iter::once(Cell::from(ticker.to_string()).style(label_style)).chain(
            (0..matrix.size()).map(|j| {
                let value = matrix.get(i, j);
                Cell::from(format!("{:^width$}", format_correlation(value), width = CELL_WIDTH as usize))
                    .style(cell_style(value))
            }),
        );
        Row::new(cells)
    });

    let widths = std::iter::once(Constraint::Length(label_width))
        .chain(std::iter::repeat_n(Constraint::Length(CELL_WIDTH), matrix.size()));

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(0)
        .block(block);

    f.render_widget(table, area);
}
