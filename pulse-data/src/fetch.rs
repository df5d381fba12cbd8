use tracing::{info, warn};

use crate::{
    series::{PriceSeries, PriceTable},
    source::PriceSource,
    ticker::{LookbackDays, Ticker},
};

/// Fetch daily closes for every ticker and align them by date.
///
/// Tickers are queried one after another. A ticker that fails to resolve is logged
/// and contributes an empty column, so the column set always equals `tickers`. If
/// every ticker fails the returned table is empty.
pub async fn fetch_price_table(
    source: &dyn PriceSource,
    tickers: &[Ticker],
    days: LookbackDays,
) -> PriceTable {
    let mut series = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        match source.daily_closes(ticker, days).await {
            Ok(s) => series.push(s),
            Err(e) => {
                warn!("[prices] {} failed: {}", ticker, e);
                series.push(PriceSeries::empty(ticker.clone()));
            }
        }
    }

    let table = PriceTable::from_series(series);
    info!(
        "Assembled price table: {} tickers x {} dates over {}",
        table.width(),
        table.height(),
        days
    );
    table
}
