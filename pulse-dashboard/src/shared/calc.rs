//! Correlation, return, percentile and Value-at-Risk calculation functions
//!
//! Correlations are computed on daily closing price levels. VaR uses day-to-day
//! percentage returns of an equal-weighted portfolio series.

use pulse_data::{PriceTable, Ticker};

/// Confidence level used for the portfolio VaR figure.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Pearson correlation coefficient
/// Returns value from -1.0 to +1.0, `None` when undefined (fewer than two
/// observations, mismatched lengths or a constant side).
pub fn calc_correlation(series_a: &[f64], series_b: &[f64]) -> Option<f64> {
    if series_a.len() != series_b.len() || series_a.len() < 2 {
        return None;
    }
    if is_constant(series_a) || is_constant(series_b) {
        return None;
    }

    let n = series_a.len() as f64;
    let mean_a: f64 = series_a.iter().sum::<f64>() / n;
    let mean_b: f64 = series_b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;

    for (a, b) in series_a.iter().zip(series_b) {
        let diff_a = a - mean_a;
        let diff_b = b - mean_b;
        cov += diff_a * diff_b;
        var_a += diff_a * diff_a;
        var_b += diff_b * diff_b;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return None;
    }

    let corr = cov / (var_a.sqrt() * var_b.sqrt());
    corr.is_finite().then(|| corr.clamp(-1.0, 1.0))
}

/// Pearson correlation over the rows where both columns have a value
pub fn calc_pairwise_correlation(column_a: &[Option<f64>], column_b: &[Option<f64>]) -> Option<f64> {
    let (a, b): (Vec<f64>, Vec<f64>) = column_a
        .iter()
        .zip(column_b)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();
    calc_correlation(&a, &b)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Square, symmetric matrix of pairwise correlations between tickers
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    tickers: Vec<Ticker>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of columns of `table` on price levels.
    ///
    /// The diagonal is exactly 1.0 for a ticker with a non-constant history.
    pub fn from_table(table: &PriceTable) -> Self {
        let n = table.width();
        let columns: Vec<Vec<Option<f64>>> = (0..n).map(|i| table.column(i)).collect();
        let mut values = vec![vec![None; n]; n];

        for i in 0..n {
            for j in i..n {
                let corr = calc_pairwise_correlation(&columns[i], &columns[j]);
                let corr = if i == j { corr.map(|_| 1.0) } else { corr };
                values[i][j] = corr;
                values[j][i] = corr;
            }
        }

        Self {
            tickers: table.tickers().to_vec(),
            values,
        }
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn size(&self) -> usize {
        self.tickers.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied().flatten()
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }
}

/// Simple day-to-day percentage returns. Returns N-1 values for N prices,
/// skipping steps from a non-positive price.
pub fn calc_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Equal-weighted portfolio series: the mean close of each row where every ticker
/// with data has a close. Tickers that returned nothing at all are left out.
pub fn equal_weight_series(table: &PriceTable) -> Vec<f64> {
    let live: Vec<usize> = (0..table.width())
        .filter(|&i| table.column(i).iter().any(Option::is_some))
        .collect();
    if live.is_empty() {
        return Vec::new();
    }

    table
        .rows()
        .iter()
        .filter_map(|row| {
            let closes = live
                .iter()
                .map(|&i| row.closes.get(i).copied().flatten())
                .collect::<Option<Vec<f64>>>()?;
            Some(closes.iter().sum::<f64>() / closes.len() as f64)
        })
        .collect()
}

/// Percentile (0..=100) with linear interpolation between order statistics
pub fn calc_percentile(values: &[f64], percentile: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&percentile) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = percentile / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Historical Value-at-Risk: the `(1 - confidence)` percentile of the daily
/// percentage returns of `prices`. Negative values are losses.
pub fn calc_historical_var(prices: &[f64], confidence: f64) -> Option<f64> {
    if !(0.0..1.0).contains(&confidence) {
        return None;
    }
    let returns = calc_returns(prices);
    calc_percentile(&returns, (1.0 - confidence) * 100.0)
}
