//! Dashboard configuration from environment variables
//!
//! Every variable is optional; an unset or unparsable value falls back to its default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use pulse_data::{LookbackDays, NewsApiConfig, YahooConfig};
use tracing::warn;

use super::state::DashboardInputs;

const DEFAULT_LOG_FILE: &str = "market-pulse.log";
const DEFAULT_TICK_RATE: Duration = Duration::from_millis(200);
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Log file for the interactive dashboard, from PULSE_LOG_FILE (default: market-pulse.log)
pub fn log_file_path() -> PathBuf {
    std::env::var("PULSE_LOG_FILE")
        .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string())
        .into()
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Initial control values (TICKERS, LOOKBACK_DAYS, PORTFOLIO)
    pub inputs: DashboardInputs,
    /// Price source (YAHOO_API_URL, HTTP_TIMEOUT_SECS)
    pub yahoo: YahooConfig,
    /// News source (NEWS_API_KEY, NEWS_API_URL, HTTP_TIMEOUT_SECS)
    pub news: NewsApiConfig,
    /// Redraw interval of the terminal UI
    pub tick_rate: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            inputs: DashboardInputs::default(),
            yahoo: YahooConfig::default(),
            news: NewsApiConfig::default(),
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let timeout = Duration::from_secs(parse_or(
            &lookup,
            "HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        ));

        let days = parse_or(&lookup, "LOOKBACK_DAYS", defaults.inputs.days.get());
        if !(LookbackDays::MIN..=LookbackDays::MAX).contains(&days) {
            warn!(
                "LOOKBACK_DAYS={} outside {}..={}, clamping",
                days,
                LookbackDays::MIN,
                LookbackDays::MAX
            );
        }

        let inputs = DashboardInputs {
            tickers: lookup("TICKERS").unwrap_or(defaults.inputs.tickers),
            days: LookbackDays::new(days),
            portfolio: lookup("PORTFOLIO").unwrap_or(defaults.inputs.portfolio),
        };

        let yahoo = YahooConfig {
            base_url: lookup("YAHOO_API_URL").unwrap_or(defaults.yahoo.base_url),
            timeout,
            ..defaults.yahoo
        };

        let news = NewsApiConfig {
            base_url: lookup("NEWS_API_URL").unwrap_or(defaults.news.base_url),
            api_key: lookup("NEWS_API_KEY").unwrap_or(defaults.news.api_key),
            timeout,
            ..defaults.news
        };

        Self {
            inputs,
            yahoo,
            news,
            tick_rate: defaults.tick_rate,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {}='{}', using default {}", key, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(config.inputs.tickers, "AAPL, TSLA, MSFT");
        assert_eq!(config.inputs.days.get(), 180);
        assert_eq!(config.inputs.portfolio, "");
        assert_eq!(config.yahoo.base_url, "https://query1.finance.yahoo.com");
        assert_eq!(config.news.base_url, "https://newsapi.org");
        assert_eq!(config.news.api_key, "YOUR_NEWS_API_KEY");
        assert_eq!(config.news.timeout, Duration::from_secs(10));
        assert_eq!(config.tick_rate, Duration::from_millis(200));
    }

    #[test]
    fn test_config_from_vars() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("TICKERS", "NVDA, AMD"),
            ("LOOKBACK_DAYS", "90"),
            ("PORTFOLIO", "SPY, QQQ"),
            ("NEWS_API_KEY", "secret"),
            ("NEWS_API_URL", "http://localhost:9000"),
            ("YAHOO_API_URL", "http://localhost:9001"),
            ("HTTP_TIMEOUT_SECS", "3"),
        ]));

        assert_eq!(config.inputs.tickers, "NVDA, AMD");
        assert_eq!(config.inputs.days.get(), 90);
        assert_eq!(config.inputs.portfolio, "SPY, QQQ");
        assert_eq!(config.news.api_key, "secret");
        assert_eq!(config.news.base_url, "http://localhost:9000");
        assert_eq!(config.news.query, "stocks");
        assert_eq!(config.yahoo.base_url, "http://localhost:9001");
        assert_eq!(config.yahoo.timeout, Duration::from_secs(3));
        assert_eq!(config.news.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("LOOKBACK_DAYS", "lots"),
            ("HTTP_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(config.inputs.days.get(), 180);
        assert_eq!(config.yahoo.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_lookback_days_clamped() {
        let config = DashboardConfig::from_lookup(lookup(&[("LOOKBACK_DAYS", "7")]));
        assert_eq!(config.inputs.days.get(), 30);

        let config = DashboardConfig::from_lookup(lookup(&[("LOOKBACK_DAYS", "1000")]));
        assert_eq!(config.inputs.days.get(), 365);
    }
}
