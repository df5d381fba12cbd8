/// Market Pulse - data layer
///
/// Everything the dashboard needs from the outside world:
/// - Ticker parsing and the lookback window
/// - Daily closing price series and the date-aligned price table
/// - Yahoo Finance (prices) and NewsAPI (headlines) clients behind async traits
/// - The error type shared by all sources
pub mod error;
pub mod fetch;
pub mod series;
pub mod source;
pub mod ticker;

pub use error::DataError;
pub use fetch::fetch_price_table;
pub use series::{PricePoint, PriceRow, PriceSeries, PriceTable};
pub use source::{
    Article, NewsApiClient, NewsApiConfig, NewsSource, PriceSource, YahooClient, YahooConfig,
};
pub use ticker::{LookbackDays, Ticker, parse_tickers};
