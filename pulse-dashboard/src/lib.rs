/// Market Pulse - Dashboard Library
///
/// This library provides the functionality behind the two binaries:
/// - market-pulse: interactive terminal dashboard
/// - pulse-report: one-shot text report of the same page
///
/// The library includes:
/// - Pearson correlation, returns, percentile and historical VaR
/// - Headline sentiment scoring
/// - The render pipeline producing one dashboard snapshot per run
/// - Input controls and ratatui widgets
pub mod shared;

pub use shared::calc::{
    CorrelationMatrix, DEFAULT_CONFIDENCE, calc_correlation, calc_historical_var,
    calc_percentile, calc_returns, equal_weight_series,
};
pub use shared::config::{DashboardConfig, log_file_path};
pub use shared::controls::{ControlAction, Controls, Focus, TextField};
pub use shared::logging::{init_file_logging, init_stderr_logging};
pub use shared::report::{Report, format_report};
pub use shared::sections::{CorrelationSection, RiskSection, SentimentSection};
pub use shared::sentiment::{Headline, SentimentAnalyzer};

// Render pipeline
pub use shared::state::{
    DashboardInputs, DashboardSnapshot, DashboardState, DashboardView, RenderStatus, Sources,
    render_dashboard, spawn_render,
};

pub use shared::widgets::render_ui;
