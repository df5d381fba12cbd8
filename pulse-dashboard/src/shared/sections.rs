//! The three dashboard sections. Each runs on its own; a failure only replaces
//! that section's content with a message.

use pulse_data::{LookbackDays, NewsSource, PriceSource, Ticker, fetch_price_table, parse_tickers};
use tracing::{info, warn};

use super::calc::{
    CorrelationMatrix, DEFAULT_CONFIDENCE, calc_historical_var, calc_returns, equal_weight_series,
};
use super::sentiment::{Headline, SentimentAnalyzer};

/// Headlines taken from the top of the news response
pub const MAX_HEADLINES: usize = 10;

pub const NO_TICKER_DATA: &str = "No data available for the selected tickers.";
pub const NO_NEWS_DATA: &str = "No news data available. Check your API key or the news source.";
pub const PORTFOLIO_PROMPT: &str = "Please enter your portfolio tickers above.";
pub const NO_PORTFOLIO_DATA: &str = "No data available for the portfolio tickers.";
pub const NOT_ENOUGH_HISTORY: &str = "Not enough price history to compute VaR.";

/// Stock correlation heatmap content
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationSection {
    Matrix(CorrelationMatrix),
    /// Nothing could be fetched for the entered tickers
    NoData,
}

/// Market sentiment content
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentSection {
    Headlines(Vec<Headline>),
    /// Non-200 response or no articles (warning)
    NoNews,
    /// Transport or decoding failure (error)
    Failed(String),
}

impl SentimentSection {
    pub fn headlines(&self) -> &[Headline] {
        match self {
            SentimentSection::Headlines(headlines) => headlines,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<String> {
        match self {
            SentimentSection::Headlines(_) => None,
            SentimentSection::NoNews => Some(NO_NEWS_DATA.to_string()),
            SentimentSection::Failed(error) => {
                Some(format!("Error fetching news sentiment: {}", error))
            }
        }
    }
}

/// Portfolio risk content
#[derive(Debug, Clone, PartialEq)]
pub enum RiskSection {
    /// Portfolio input is empty; nothing was fetched
    Prompt,
    ValueAtRisk {
        tickers: Vec<Ticker>,
        confidence: f64,
        /// Return at the lower tail, e.g. -0.031 for a 3.1% loss
        var: f64,
        /// Number of daily returns behind the estimate
        observations: usize,
    },
    NoData,
    InsufficientHistory,
}

impl RiskSection {
    pub fn message(&self) -> String {
        match self {
            RiskSection::Prompt => PORTFOLIO_PROMPT.to_string(),
            RiskSection::ValueAtRisk {
                confidence, var, ..
            } => format!(
                "Portfolio Value at Risk (VaR) at {:.0}% confidence: {:.2}%",
                confidence * 100.0,
                var * 100.0
            ),
            RiskSection::NoData => NO_PORTFOLIO_DATA.to_string(),
            RiskSection::InsufficientHistory => NOT_ENOUGH_HISTORY.to_string(),
        }
    }
}

/// Fetch prices for `tickers_text` and correlate them
pub async fn correlation_section(
    prices: &dyn PriceSource,
    tickers_text: &str,
    days: LookbackDays,
) -> CorrelationSection {
    let tickers = parse_tickers(tickers_text);
    let table = fetch_price_table(prices, &tickers, days).await;

    if table.is_empty() {
        warn!("[correlation] no data for '{}'", tickers_text);
        return CorrelationSection::NoData;
    }

    CorrelationSection::Matrix(CorrelationMatrix::from_table(&table))
}

/// Fetch the latest articles and score the first [`MAX_HEADLINES`] titles
pub async fn sentiment_section(
    news: &dyn NewsSource,
    analyzer: &SentimentAnalyzer,
) -> SentimentSection {
    match news.latest_articles().await {
        Ok(articles) => {
            let headlines =
                analyzer.score_headlines(articles.into_iter().take(MAX_HEADLINES));
            if headlines.is_empty() {
                SentimentSection::NoNews
            } else {
                SentimentSection::Headlines(headlines)
            }
        }
        Err(e) if e.is_status() => {
            warn!("[sentiment] {}", e);
            SentimentSection::NoNews
        }
        Err(e) => {
            warn!("[sentiment] failed: {}", e);
            SentimentSection::Failed(e.to_string())
        }
    }
}

/// Fetch the portfolio prices and compute historical VaR at [`DEFAULT_CONFIDENCE`]
///
/// An empty portfolio returns [`RiskSection::Prompt`] without touching `prices`.
pub async fn risk_section(
    prices: &dyn PriceSource,
    portfolio_text: &str,
    days: LookbackDays,
) -> RiskSection {
    let tickers = parse_tickers(portfolio_text);
    if tickers.is_empty() {
        return RiskSection::Prompt;
    }

    let table = fetch_price_table(prices, &tickers, days).await;
    if table.is_empty() {
        warn!("[risk] no data for '{}'", portfolio_text);
        return RiskSection::NoData;
    }

    let portfolio = equal_weight_series(&table);
    match calc_historical_var(&portfolio, DEFAULT_CONFIDENCE) {
        Some(var) => {
            info!("[risk] VaR {:.4} over {} closes", var, portfolio.len());
            RiskSection::ValueAtRisk {
                tickers,
                confidence: DEFAULT_CONFIDENCE,
                var,
                observations: calc_returns(&portfolio).len(),
            }
        }
        None => RiskSection::InsufficientHistory,
    }
}
