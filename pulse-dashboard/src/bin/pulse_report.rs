/// Market Pulse report: render the dashboard once and print it as text
///
/// Reads the same environment variables as market-pulse; logs go to stderr.
use std::error::Error;

use pulse_dashboard::{
    DashboardConfig, Sources, format_report, init_stderr_logging, render_dashboard,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_stderr_logging();

    let config = DashboardConfig::from_env();
    let sources = Sources::from_config(&config)?;

    let snapshot = render_dashboard(config.inputs, &sources).await;
    print!("{}", format_report(&snapshot));

    Ok(())
}
