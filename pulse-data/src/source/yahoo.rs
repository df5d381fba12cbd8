//! Yahoo Finance chart API client for daily closing prices.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::PriceSource;
use crate::{
    error::DataError,
    series::{PricePoint, PriceSeries},
    ticker::{LookbackDays, Ticker},
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Yahoo Finance client configuration
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// API host, e.g. `https://query1.finance.yahoo.com`
    pub base_url: String,
    /// Yahoo rejects requests without a browser-like user agent
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl YahooConfig {
    /// Create a new configuration with custom API host
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds, used to find the trading date
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance client
#[derive(Debug, Clone)]
pub struct YahooClient {
    base_url: Url,
    client: reqwest::Client,
}

impl YahooClient {
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let base_url = Url::parse(&config.base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    fn chart_url(&self, ticker: &Ticker, days: LookbackDays) -> Result<Url, DataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DataError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker.as_str()]);
        url.query_pairs_mut()
            .append_pair("range", &days.to_string())
            .append_pair("interval", "1d");
        Ok(url)
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn daily_closes(
        &self,
        ticker: &Ticker,
        days: LookbackDays,
    ) -> Result<PriceSeries, DataError> {
        let url = self.chart_url(ticker, days)?;
        debug!("Fetching Yahoo chart from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let status_error = || DataError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        };

        // Yahoo reports unknown symbols as a 404 carrying a chart error body
        let result = match serde_json::from_str::<ChartResponse>(&body) {
            Ok(ChartResponse {
                chart: Chart { result, error },
            }) => {
                if let Some(error) = error {
                    return Err(DataError::Provider {
                        code: error.code,
                        description: error.description,
                    });
                }
                if !status.is_success() {
                    return Err(status_error());
                }
                result
            }
            Err(_) if !status.is_success() => return Err(status_error()),
            Err(error) => return Err(error.into()),
        };

        let data = result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::NoData(ticker.to_string()))?;

        let series = parse_chart(ticker.clone(), data);
        info!("Fetched {} daily closes for {}", series.len(), ticker);
        Ok(series)
    }
}

fn parse_chart(ticker: Ticker, data: ChartData) -> PriceSeries {
    let closes = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|quote| quote.close)
        .unwrap_or_default();
    let offset = data.meta.gmtoffset;

    let points = data
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close.filter(|c| c.is_finite())?;
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(PricePoint::new(date, close))
        });

    PriceSeries::new(ticker, points)
}
