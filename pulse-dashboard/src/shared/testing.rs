//! In-memory price and news sources for tests

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use pulse_data::{
    Article, DataError, LookbackDays, NewsSource, PricePoint, PriceSeries, PriceSource, Ticker,
};

/// Serves deterministic closes for AAPL, TSLA, MSFT, FLAT and GAP (zero first close);
/// any other symbol fails to resolve. Counts every request.
#[derive(Debug, Default)]
pub struct FakePrices {
    calls: AtomicUsize,
}

impl FakePrices {
    pub const DAYS: usize = 30;

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn close(symbol: &str, day: usize) -> Option<f64> {
        let t = day as f64;
        match symbol {
            "AAPL" => Some(170.0 + 5.0 * (t * 0.7).sin() + t * 0.2),
            "TSLA" => Some(200.0 + 12.0 * (t * 0.45).cos()),
            "MSFT" => Some(400.0 + 3.0 * (t * 1.3).sin() + t * 0.5),
            "FLAT" => Some(50.0),
            "GAP" => Some(if day == 0 { 0.0 } else { 80.0 + t }),
            _ => None,
        }
    }
}

#[async_trait]
impl PriceSource for FakePrices {
    async fn daily_closes(
        &self,
        ticker: &Ticker,
        _days: LookbackDays,
    ) -> Result<PriceSeries, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let points = (0..Self::DAYS)
            .map(|day| {
                let close = Self::close(ticker.as_str(), day)
                    .ok_or_else(|| DataError::NoData(ticker.to_string()))?;
                let date = start + Days::new(day as u64);
                Ok(PricePoint::new(date, close))
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        Ok(PriceSeries::new(ticker.clone(), points))
    }
}

/// Returns a fixed article list or a fixed error
#[derive(Debug)]
pub struct FakeNews {
    response: Result<Vec<Article>, DataError>,
    calls: AtomicUsize,
}

impl FakeNews {
    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            response: Ok(titles.iter().map(|title| Article::new(*title)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: DataError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for FakeNews {
    async fn latest_articles(&self) -> Result<Vec<Article>, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
