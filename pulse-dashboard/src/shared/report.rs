//! Plain text rendering of a dashboard snapshot, for the non-interactive report

use std::fmt;

use itertools::Itertools;

use super::sections::{CorrelationSection, NO_TICKER_DATA, SentimentSection};
use super::state::DashboardSnapshot;
use super::widgets::heatmap::format_correlation;

const COLUMN_WIDTH: usize = 8;

/// Plain text view of a snapshot, one block per section in page order
pub struct Report<'a>(pub &'a DashboardSnapshot);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let inputs = &snapshot.inputs;

        writeln!(f, "Dynamic Market Sentiment Analyzer")?;
        writeln!(
            f,
            "Tickers: {} | Lookback: {} | Portfolio: {}",
            inputs.tickers.trim(),
            inputs.days,
            if inputs.portfolio.trim().is_empty() { "-" } else { inputs.portfolio.trim() }
        )?;
        writeln!(f, "Rendered: {}", snapshot.rendered_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

        writeln!(f, "\n== Stock Correlation Heatmap ==")?;
        match &snapshot.correlation {
            CorrelationSection::Matrix(matrix) => {
                let label_width = matrix
                    .tickers()
                    .iter()
                    .map(|t| t.as_str().chars().count())
                    .max()
                    .unwrap_or(0);
                let header = matrix
                    .tickers()
                    .iter()
                    .map(|t| format!("{:>COLUMN_WIDTH$}", t.as_str()))
                    .join("");
                writeln!(f, "{:label_width$}{}", "", header)?;
                for (i, ticker) in matrix.tickers().iter().enumerate() {
                    let cells = (0..matrix.size())
                        .map(|j| format!("{:>COLUMN_WIDTH$}", format_correlation(matrix.get(i, j))))
                        .join("");
                    writeln!(f, "{:label_width$}{}", ticker.as_str(), cells)?;
                }
            }
            CorrelationSection::NoData => writeln!(f, "{}", NO_TICKER_DATA)?,
        }

        writeln!(f, "\n== Real-Time Market Sentiment ==")?;
        match &snapshot.sentiment {
            SentimentSection::Headlines(headlines) => {
                for headline in headlines {
                    writeln!(f, "Headline: {}", headline.title)?;
                    writeln!(f, "Sentiment Score: {:.4}", headline.score)?;
                    writeln!(f, "---")?;
                }
            }
            other => writeln!(f, "{}", other.message().unwrap_or_default())?,
        }

        writeln!(f, "\n== Portfolio Risk Analysis ==")?;
        writeln!(f, "{}", snapshot.risk.message())
    }
}

/// Format `snapshot` as text
pub fn format_report(snapshot: &DashboardSnapshot) -> String {
    Report(snapshot).to_string()
}
