use thiserror::Error;

/// All errors generated in `pulse-data`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DataError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP error: {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("provider error: {code} - {description}")]
    Provider { code: String, description: String },

    #[error("no price data returned for: {0}")]
    NoData(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl DataError {
    /// Determine if the error is a non-success HTTP status rather than a transport or
    /// decoding failure.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_status(&self) -> bool {
        match self {
            DataError::Status { .. } => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DataError {
    /// The request URL is dropped from the message since it can carry an API key.
    fn from(value: reqwest::Error) -> Self {
        let value = value.without_url();
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Http(value.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

impl From<url::ParseError> for DataError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUrl(value.to_string())
    }
}
