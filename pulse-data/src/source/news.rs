//! NewsAPI `everything` endpoint client for recent market headlines.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use super::NewsSource;
use crate::error::DataError;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const PLACEHOLDER_API_KEY: &str = "YOUR_NEWS_API_KEY";

/// A news article. Only the headline is scored; the rest is display context.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Headline, empty if the provider sent none
    pub title: String,
    /// Publisher name (e.g. "Reuters")
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: None,
            published_at: None,
        }
    }
}

/// NewsAPI client configuration
#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    /// API host, e.g. `https://newsapi.org`
    pub base_url: String,
    pub api_key: String,
    /// Search topic (`q`)
    pub query: String,
    /// Article language (`language`)
    pub language: String,
    /// Ordering (`sortBy`)
    pub sort_by: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            query: "stocks".to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl NewsApiConfig {
    /// Create a new configuration with custom API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set search topic
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
}

/// Error body NewsAPI sends with non-200 responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            source: raw.source.and_then(|source| source.name),
            published_at: raw.published_at,
        }
    }
}

/// NewsAPI client
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    config: NewsApiConfig,
    endpoint: Url,
    client: reqwest::Client,
}

impl NewsApiClient {
    pub fn new(config: NewsApiConfig) -> Result<Self, DataError> {
        let mut endpoint = Url::parse(&config.base_url)?;
        endpoint
            .path_segments_mut()
            .map_err(|_| DataError::InvalidUrl(config.base_url.clone()))?
            .pop_if_empty()
            .extend(["v2", "everything"]);
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            endpoint,
            client,
        })
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn latest_articles(&self) -> Result<Vec<Article>, DataError> {
        // The endpoint is logged and reported without its query so the key never leaks
        debug!("Fetching news for '{}' from {}", self.config.query, self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", self.config.query.as_str()),
                ("language", self.config.language.as_str()),
                ("sortBy", self.config.sort_by.as_str()),
                ("apiKey", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body).ok();
            warn!(
                "News request rejected with {}: {} {}",
                status,
                detail.as_ref().and_then(|d| d.code.as_deref()).unwrap_or("-"),
                detail.as_ref().and_then(|d| d.message.as_deref()).unwrap_or("")
            );
            return Err(DataError::Status {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body: EverythingResponse = response.json().await?;
        let articles: Vec<Article> = body.articles.into_iter().map(Article::from).collect();
        info!("Fetched {} news articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client(server: &MockServer) -> NewsApiClient {
        NewsApiClient::new(NewsApiConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = NewsApiConfig::default();
        assert_eq!(config.base_url, "https://newsapi.org");
        assert_eq!(config.query, "stocks");
        assert_eq!(config.language, "en");
        assert_eq!(config.sort_by, "publishedAt");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_latest_articles_sends_query_and_parses_titles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("q", "stocks"))
            .and(query_param("language", "en"))
            .and(query_param("sortBy", "publishedAt"))
            .and(query_param("apiKey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "totalResults": 3,
                "articles": [
                    {
                        "source": { "id": null, "name": "Reuters" },
                        "title": "Stocks rally as inflation cools",
                        "publishedAt": "2024-03-05T14:00:00Z"
                    },
                    { "source": { "id": null, "name": "Bloomberg" }, "title": null },
                    { "title": "Markets slide on weak earnings" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let articles = client(&server).latest_articles().await.unwrap();

        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Stocks rally as inflation cools", "", "Markets slide on weak earnings"]
        );
        assert_eq!(articles[0].source.as_deref(), Some("Reuters"));
        assert!(articles[0].published_at.is_some());
        assert_eq!(articles[2].source, None);
    }

    #[tokio::test]
    async fn test_latest_articles_missing_list_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "totalResults": 0
            })))
            .mount(&server)
            .await;

        let articles = client(&server).latest_articles().await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_latest_articles_rejected_key_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "Your API key is invalid or incorrect."
            })))
            .mount(&server)
            .await;

        let error = client(&server).latest_articles().await.unwrap_err();
        assert!(error.is_status());
        assert!(!error.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_latest_articles_transport_error_hides_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;
        let client = NewsApiClient::new(
            NewsApiConfig::new("SECRET-KEY")
                .with_base_url(server.uri())
                .with_timeout(Duration::from_millis(100)),
        )
        .unwrap();

        let error = client.latest_articles().await.unwrap_err();
        assert!(matches!(error, DataError::Http(_)));
        assert!(!error.to_string().contains("SECRET-KEY"));
        assert!(!error.to_string().contains("apiKey"));
    }

    #[tokio::test]
    async fn test_latest_articles_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let error = client(&server).latest_articles().await.unwrap_err();
        assert!(matches!(error, DataError::Decode(_)));
    }
}
