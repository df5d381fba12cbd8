//! Render pipeline and the state shared between the render task and the UI loop.
//!
//! A render recomputes every section from the committed inputs, top to bottom. The
//! UI only ever draws the latest completed snapshot.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use pulse_data::{
    DataError, LookbackDays, NewsApiClient, NewsSource, PriceSource, YahooClient,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::config::DashboardConfig;
use super::sections::{
    CorrelationSection, RiskSection, SentimentSection, correlation_section, risk_section,
    sentiment_section,
};
use super::sentiment::SentimentAnalyzer;

/// Values of the three input controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardInputs {
    /// Comma separated tickers for the correlation heatmap
    pub tickers: String,
    pub days: LookbackDays,
    /// Comma separated tickers for the risk section
    pub portfolio: String,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        Self {
            tickers: "AAPL, TSLA, MSFT".to_string(),
            days: LookbackDays::default(),
            portfolio: String::new(),
        }
    }
}

/// Output of one render
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub inputs: DashboardInputs,
    pub correlation: CorrelationSection,
    pub sentiment: SentimentSection,
    pub risk: RiskSection,
    pub rendered_at: DateTime<Utc>,
}

/// Everything a render reads from
#[derive(Clone)]
pub struct Sources {
    pub prices: Arc<dyn PriceSource>,
    pub news: Arc<dyn NewsSource>,
    pub analyzer: Arc<SentimentAnalyzer>,
}

impl Sources {
    pub fn new(prices: Arc<dyn PriceSource>, news: Arc<dyn NewsSource>) -> Self {
        Self {
            prices,
            news,
            analyzer: Arc::new(SentimentAnalyzer::new()),
        }
    }

    /// Yahoo Finance prices and NewsAPI headlines
    pub fn from_config(config: &DashboardConfig) -> Result<Self, DataError> {
        let prices = YahooClient::new(config.yahoo.clone())?;
        let news = NewsApiClient::new(config.news.clone())?;
        Ok(Self::new(Arc::new(prices), Arc::new(news)))
    }
}

/// Run every section in page order. Each network call completes before the next starts.
pub async fn render_dashboard(inputs: DashboardInputs, sources: &Sources) -> DashboardSnapshot {
    let started = Instant::now();

    let correlation =
        correlation_section(sources.prices.as_ref(), &inputs.tickers, inputs.days).await;
    let sentiment = sentiment_section(sources.news.as_ref(), &sources.analyzer).await;
    let risk = risk_section(sources.prices.as_ref(), &inputs.portfolio, inputs.days).await;

    info!("Rendered dashboard in {:?}", started.elapsed());

    DashboardSnapshot {
        inputs,
        correlation,
        sentiment,
        risk,
        rendered_at: Utc::now(),
    }
}

/// Render progress shown in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Idle,
    Running,
    Complete,
}

/// Latest snapshot plus render bookkeeping
pub struct DashboardState {
    latest: Option<DashboardSnapshot>,
    /// Generation of the most recently requested render
    generation: u64,
    status: RenderStatus,
}

/// Copy of [`DashboardState`] taken for one draw
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub snapshot: Option<DashboardSnapshot>,
    pub status: RenderStatus,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            latest: None,
            generation: 0,
            status: RenderStatus::Idle,
        }
    }

    /// Register a new render and return its generation
    pub fn begin_render(&mut self) -> u64 {
        self.generation += 1;
        self.status = RenderStatus::Running;
        self.generation
    }

    /// Store the snapshot of render `generation` unless a newer render has started.
    /// Returns whether the snapshot was kept.
    pub fn complete_render(&mut self, generation: u64, snapshot: DashboardSnapshot) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding render {} superseded by {}",
                generation, self.generation
            );
            return false;
        }
        self.latest = Some(snapshot);
        self.status = RenderStatus::Complete;
        true
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.latest.as_ref()
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            snapshot: self.latest.clone(),
            status: self.status,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Start a render of `inputs` in the background.
/// The generation is taken before spawning so renders are ordered by request.
pub async fn spawn_render(
    state: Arc<Mutex<DashboardState>>,
    sources: Sources,
    inputs: DashboardInputs,
) -> tokio::task::JoinHandle<()> {
    let generation = state.lock().await.begin_render();
    debug!("Starting render {} for {:?}", generation, inputs);

    tokio::spawn(async move {
        let snapshot = render_dashboard(inputs, &sources).await;
        state.lock().await.complete_render(generation, snapshot);
    })
}
