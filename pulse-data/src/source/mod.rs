//! External data sources: daily price history and news headlines.

use async_trait::async_trait;

use crate::{
    error::DataError,
    series::PriceSeries,
    ticker::{LookbackDays, Ticker},
};

pub mod news;
pub mod yahoo;

pub use news::{Article, NewsApiClient, NewsApiConfig};
pub use yahoo::{YahooClient, YahooConfig};

/// Provider of daily closing prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Daily closes for `ticker` over the trailing `days` calendar days.
    async fn daily_closes(
        &self,
        ticker: &Ticker,
        days: LookbackDays,
    ) -> Result<PriceSeries, DataError>;
}

/// Provider of recent news articles, newest first.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn latest_articles(&self) -> Result<Vec<Article>, DataError>;
}
