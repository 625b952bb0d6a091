use crate::core::currency::{RateFeed, RateSnapshot, RateTable};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Holds the latest daily rate table and refreshes it from the feed once it is stale.
///
/// A table is stale as soon as the calendar date moves past its effective date.
/// Concurrent callers may both decide to refresh; the second commit is then a
/// no-op because its feed is not newer than the stored one.
#[derive(Clone)]
pub struct RateCache {
    feed: Arc<dyn RateFeed>,
    state: Arc<RwLock<RateSnapshot>>,
}

impl RateCache {
    pub fn new(feed: impl RateFeed + 'static) -> Self {
        Self {
            feed: Arc::new(feed),
            state: Arc::new(RwLock::new(RateSnapshot::default())),
        }
    }

    /// Current rates, refreshed first when the local date is past the effective date.
    pub async fn get_rates(&self) -> RateTable {
        self.get_rates_on(Local::now().date_naive()).await
    }

    pub async fn get_rates_on(&self, today: NaiveDate) -> RateTable {
        let effective_date = self.effective_date().await;
        if today > effective_date {
            debug!(%today, %effective_date, "Rates are stale");
            self.refresh().await;
        } else {
            debug!(%effective_date, "Serving cached rates");
        }
        self.state.read().await.rates.clone()
    }

    /// Refreshes from the feed, keeping the stored table on any failure.
    pub async fn refresh(&self) {
        if let Err(e) = self.try_refresh().await {
            warn!(error = %e, "Failed to refresh exchange rates, keeping cached table");
        }
    }

    /// Fetches the feed and commits it if its effective date is strictly newer.
    ///
    /// Returns whether a new table was committed.
    pub async fn try_refresh(&self) -> Result<bool> {
        let snapshot = self
            .feed
            .fetch_rates()
            .await
            .context("Failed to load exchange rates from feed")?;

        let mut state = self.state.write().await;
        if snapshot.effective_date <= state.effective_date {
            debug!(
                feed_date = %snapshot.effective_date,
                stored_date = %state.effective_date,
                "Feed is not newer than cached rates"
            );
            return Ok(false);
        }

        info!(
            effective_date = %snapshot.effective_date,
            currencies = snapshot.rates.len(),
            "Loaded new exchange rates"
        );
        *state = snapshot;
        Ok(true)
    }

    pub async fn effective_date(&self) -> NaiveDate {
        self.state.read().await.effective_date
    }

    /// Copy of the stored table and its date, without refreshing.
    pub async fn snapshot(&self) -> RateSnapshot {
        self.state.read().await.clone()
    }
}
