//! Aggregate summary panels: most popular and recently seen.
//!
//! Two symmetric refresh operations, re-run after every successful location
//! resolution and on demand when the user changes a grouping level. They
//! are secondary panels: a failed fetch clears its busy flag, logs, and
//! otherwise stays quiet so it never alarms a user who is primarily trying
//! to resolve their own position.

use crate::busy::{BusyTracker, Operation};
use crate::services::{PopularityBucket, RecentLocation, SummaryService};
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// How many recent locations the panel shows.
pub const RECENT_LOCATIONS_LIMIT: usize = 15;

#[derive(Debug, Default)]
struct SummaryState {
    popularity: Vec<PopularityBucket>,
    recent: Vec<RecentLocation>,
}

/// Keeps the two summary panels up to date.
///
/// Cloning is cheap; clones share the same panel state, busy tracker and
/// service handle, which is what lets the workflow fire refreshes without
/// waiting for them.
#[derive(Clone)]
pub struct SummaryRefresher {
    service: Arc<dyn SummaryService>,
    busy: BusyTracker,
    state: Arc<Mutex<SummaryState>>,
}

impl SummaryRefresher {
    pub fn new(service: Arc<dyn SummaryService>, busy: BusyTracker) -> Self {
        Self {
            service,
            busy,
            state: Arc::new(Mutex::new(SummaryState::default())),
        }
    }

    /// Refresh the popularity panel at the given group level.
    pub async fn refresh_popularity(&self, group_level: u32) {
        self.busy.begin(Operation::MostPopular);
        match self.service.popularity(group_level).await {
            Ok(buckets) => {
                self.busy.end(Operation::MostPopular);
                debug!(buckets = buckets.len(), group_level, "popularity summary refreshed");
                self.state.lock().unwrap().popularity = buckets;
            }
            Err(error) => {
                self.busy.end(Operation::MostPopular);
                debug!(%error, "popularity summary refresh failed");
            }
        }
    }

    /// Refresh the recent-locations panel.
    pub async fn refresh_recency(&self) {
        self.busy.begin(Operation::OthersBeen);
        match self.service.recent_locations(RECENT_LOCATIONS_LIMIT).await {
            Ok(locations) => {
                self.busy.end(Operation::OthersBeen);
                debug!(locations = locations.len(), "recent locations refreshed");
                self.state.lock().unwrap().recent = locations;
            }
            Err(error) => {
                self.busy.end(Operation::OthersBeen);
                debug!(%error, "recent locations refresh failed");
            }
        }
    }

    /// Fire both refreshes in the background.
    ///
    /// Used after a resolution, where neither panel should delay the
    /// primary flow.
    pub fn spawn_refresh_all(&self, group_level: u32) {
        let popularity = self.clone();
        tokio::spawn(async move {
            popularity.refresh_popularity(group_level).await;
        });

        let recency = self.clone();
        tokio::spawn(async move {
            recency.refresh_recency().await;
        });
    }

    /// Current popularity panel contents.
    pub fn popularity(&self) -> Vec<PopularityBucket> {
        self.state.lock().unwrap().popularity.clone()
    }

    /// Current recent-locations panel contents.
    pub fn recent_locations(&self) -> Vec<RecentLocation> {
        self.state.lock().unwrap().recent.clone()
    }
}

impl fmt::Debug for SummaryRefresher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryRefresher").finish_non_exhaustive()
    }
}
