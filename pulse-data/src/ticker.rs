//! Ticker symbols and the lookback window entered by the user.

use derive_more::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A trimmed, non-empty ticker symbol exactly as the user typed it (e.g. "AAPL").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deserialize, Serialize)]
pub struct Ticker(SmolStr);

impl Ticker {
    /// Construct a ticker from raw input, returning `None` if nothing is left after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(SmolStr::new(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Split a free-text, comma separated ticker list.
///
/// Whitespace around each symbol is trimmed, empty segments are skipped and
/// duplicates are removed keeping the first occurrence.
pub fn parse_tickers(input: &str) -> Vec<Ticker> {
    input.split(',').filter_map(Ticker::new).unique().collect()
}

/// Number of trailing calendar days of price history to analyse.
///
/// Always within [`LookbackDays::MIN`]..=[`LookbackDays::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deserialize, Serialize)]
#[display("{_0}d")]
pub struct LookbackDays(u16);

impl LookbackDays {
    pub const MIN: u16 = 30;
    pub const MAX: u16 = 365;
    pub const DEFAULT: u16 = 180;

    /// Construct a lookback window, clamping out of range values.
    pub fn new(days: u16) -> Self {
        Self(days.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Move the window by `delta` days, staying within bounds.
    pub fn saturating_add(self, delta: i32) -> Self {
        let days = (i32::from(self.0) + delta).clamp(i32::from(Self::MIN), i32::from(Self::MAX));
        Self(days as u16)
    }

    pub fn min() -> Self {
        Self(Self::MIN)
    }

    pub fn max() -> Self {
        Self(Self::MAX)
    }
}

impl Default for LookbackDays {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(tickers: &[Ticker]) -> Vec<&str> {
        tickers.iter().map(Ticker::as_str).collect()
    }

    #[test]
    fn test_parse_tickers_trims_whitespace() {
        let tickers = parse_tickers("AAPL, TSLA ,  MSFT");
        assert_eq!(symbols(&tickers), vec!["AAPL", "TSLA", "MSFT"]);
    }

    #[test]
    fn test_parse_tickers_skips_empty_segments() {
        let tickers = parse_tickers(" ,AAPL,, ,TSLA,");
        assert_eq!(symbols(&tickers), vec!["AAPL", "TSLA"]);
        assert!(parse_tickers("").is_empty());
        assert!(parse_tickers("  ,  ").is_empty());
    }

    #[test]
    fn test_parse_tickers_deduplicates_in_order() {
        let tickers = parse_tickers("MSFT, AAPL, MSFT, AAPL , NVDA");
        assert_eq!(symbols(&tickers), vec!["MSFT", "AAPL", "NVDA"]);
    }

    #[test]
    fn test_parse_tickers_keeps_case() {
        let tickers = parse_tickers("aapl, BRK-B");
        assert_eq!(symbols(&tickers), vec!["aapl", "BRK-B"]);
    }

    #[test]
    fn test_lookback_days_clamps() {
        assert_eq!(LookbackDays::new(5).get(), 30);
        assert_eq!(LookbackDays::new(1000).get(), 365);
        assert_eq!(LookbackDays::new(90).get(), 90);
        assert_eq!(LookbackDays::default().get(), 180);
    }

    #[test]
    fn test_lookback_days_saturating_add() {
        let days = LookbackDays::new(40);
        assert_eq!(days.saturating_add(-30).get(), 30);
        assert_eq!(days.saturating_add(10).get(), 50);
        assert_eq!(LookbackDays::new(360).saturating_add(30).get(), 365);
    }

    #[test]
    fn test_lookback_days_display() {
        assert_eq!(LookbackDays::new(180).to_string(), "180d");
    }
}
