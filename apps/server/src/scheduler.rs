//! Background scheduler for periodic quote refreshes.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first refresh, letting the server finish starting.
const INITIAL_DELAY_SECS: u64 = 30;

/// Starts the quote refresh loop. Runs one reconciliation per `period`.
pub fn start_quote_refresh_scheduler(state: Arc<AppState>, period: Duration) {
    tokio::spawn(async move {
        info!("Quote refresh scheduler started ({}s interval)", period.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut refresh_interval = interval(period);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

async fn run_scheduled_refresh(state: &Arc<AppState>) {
    info!("Running scheduled quote refresh...");
    match state.reconciliation_service.reconcile().await {
        Ok(summary) => match summary.message {
            Some(message) => info!("Scheduled quote refresh: {}", message),
            None => info!(
                "Scheduled quote refresh completed: {} tickers, {} asset quotes, {} catalog quotes, {} valuations",
                summary.tickers,
                summary.updated_assets,
                summary.updated_catalog,
                summary.updated_valuations
            ),
        },
        Err(e) => warn!("Scheduled quote refresh failed: {}", e),
    }
}
