//! # Search Debounce
//!
//! Typing fires one event per keystroke. [`SearchDebounce`] turns a burst of
//! them into a single catalog search issued once the input has been quiet for a
//! while.
//!
//! At most one evaluation is pending at any time. Each new text aborts it and
//! schedules a fresh one. Clearing the input skips the timer and restores the
//! full catalog right away.
//!
//! ```rust,ignore
//! let mut search = SearchDebounce::new(catalog.clone(), Duration::from_millis(500));
//! search.on_query_change("p").await?;
//! search.on_query_change("ph").await?;
//! search.on_query_change("pho").await?; // only this one reaches the backend
//! search.on_query_change("").await?;    // full catalog, no waiting
//! ```

use crate::catalog_actor::CatalogError;
use crate::clients::CatalogClient;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default quiet period before a search is issued.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

pub struct SearchDebounce {
    catalog: CatalogClient,
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebounce {
    pub fn new(catalog: CatalogClient, quiet: Duration) -> Self {
        Self {
            catalog,
            quiet,
            pending: None,
        }
    }

    /// Record a new value of the search input.
    ///
    /// A non-empty `text` returns immediately; its search runs later on a
    /// background task and reports failures only through the log and the
    /// (emptied) catalog. An empty `text` awaits the full catalog and returns
    /// its error, if any.
    pub async fn on_query_change(&mut self, text: &str) -> Result<(), CatalogError> {
        self.cancel();

        if text.is_empty() {
            debug!("Search cleared, restoring catalog");
            self.catalog.show_all().await?;
            return Ok(());
        }

        let catalog = self.catalog.clone();
        let query = text.to_string();
        let quiet = self.quiet;
        debug!(query = %query, "Search scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if let Err(e) = catalog.search(&query).await {
                warn!(query = %query, error = %e, "Debounced search failed");
            }
        }));
        Ok(())
    }

    /// Whether an evaluation is scheduled or running.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
