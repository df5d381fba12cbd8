//! Daily closing price series and the date-aligned table built from them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ticker::Ticker;

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closing prices for one ticker, ascending by date with at most one point per date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by date and keeping the last close seen for a repeated date.
    pub fn new(ticker: Ticker, points: impl IntoIterator<Item = PricePoint>) -> Self {
        let by_date: BTreeMap<NaiveDate, f64> = points
            .into_iter()
            .map(|point| (point.date, point.close))
            .collect();

        Self {
            ticker,
            points: by_date
                .into_iter()
                .map(|(date, close)| PricePoint { date, close })
                .collect(),
        }
    }

    /// Series for a ticker that could not be resolved.
    pub fn empty(ticker: Ticker) -> Self {
        Self {
            ticker,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }
}

/// One date of a [`PriceTable`], holding a close per column (`None` where that ticker has no
/// close on this date).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub closes: Vec<Option<f64>>,
}

impl PriceRow {
    pub fn is_complete(&self) -> bool {
        self.closes.iter().all(Option::is_some)
    }
}

/// Closing prices for several tickers aligned by date (outer join, no forward-fill).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PriceTable {
    tickers: Vec<Ticker>,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Align a set of series into one table. Columns follow the order of `series`.
    pub fn from_series(series: Vec<PriceSeries>) -> Self {
        let width = series.len();
        let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

        for (column, s) in series.iter().enumerate() {
            for point in &s.points {
                rows.entry(point.date).or_insert_with(|| vec![None; width])[column] =
                    Some(point.close);
            }
        }

        Self {
            tickers: series.into_iter().map(|s| s.ticker).collect(),
            rows: rows
                .into_iter()
                .map(|(date, closes)| PriceRow { date, closes })
                .collect(),
        }
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Rows where every ticker has a close.
    pub fn complete_rows(&self) -> impl Iterator<Item = &PriceRow> {
        self.rows.iter().filter(|row| row.is_complete())
    }

    /// Cells of one column, one per row.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| row.closes.get(index).copied().flatten())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.tickers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// A table with no rows or no columns has nothing to analyse.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty() || self.rows.is_empty()
    }
}
