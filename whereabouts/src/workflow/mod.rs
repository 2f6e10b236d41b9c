//! Location resolution orchestration.
//!
//! [`LocationWorkflow`] sequences one resolution end to end:
//!
//! ```text
//! locate()
//!    │  seed display from cache (first run) / reset state (refresh)
//!    ▼
//! GeolocationResolver ──failure──► danger alert, busy cleared
//!    │ fix
//!    ▼
//! ResultCache ──valid entry within jitter──► Resolved (no lookup)
//!    │ miss / moved
//!    ▼
//! LocationLookup ──failure──► danger alert, busy cleared
//!    │ location
//!    ▼
//! Resolved: no-address notice, summary refreshes (background),
//!           cache write, busy cleared
//! ```
//!
//! Steps never reorder: the cache check waits for the fix, the lookup and
//! the summary refreshes wait for the cache check. A travel-boundary
//! sub-workflow runs independently under its own busy flag and alert
//! channel, always against the live service because its cost/units
//! parameters are user-chosen per call.
//!
//! Re-running `locate` while a prior run is still waiting on a collaborator
//! is safe: each run takes a generation token and a completion whose token
//! is no longer current is discarded instead of overwriting newer state.

mod error;
mod state;

pub use error::{BoundaryError, BuildError, LocateError};
pub use state::{LocationResult, Resolution, ResolutionSource};

use state::WorkflowState;

use crate::alert::{Alert, AlertChannel, Severity};
use crate::busy::{BusyTracker, NoOpProgressIndicator, Operation, ProgressIndicator};
use crate::cache::{CachedEntry, KeyValueStore, MemoryStore, ResultCache};
use crate::config::WorkflowConfig;
use crate::coord::Coordinates;
use crate::geolocation::{GeolocationResolver, PositionProvider};
use crate::services::{
    BoundaryOverlay, BoundaryQuery, BoundaryService, LocationLookup, LookupOptions,
    ResolvedLocation, SummaryService,
};
use crate::summary::SummaryRefresher;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Wording used when the lookup fails without a server message.
pub const LOOKUP_FALLBACK_MESSAGE: &str = "Error occurred posting geolocation to server.";

/// Wording used when the boundary fetch fails without a server message.
pub const BOUNDARY_FALLBACK_MESSAGE: &str = "Error occurred retrieving travel boundary.";

/// Orchestrates location resolution and its follow-up refreshes.
///
/// One instance owns one user's state. All methods take `&self`; share the
/// workflow behind an [`Arc`] to drive it from several tasks.
pub struct LocationWorkflow {
    config: WorkflowConfig,
    resolver: GeolocationResolver,
    lookup: Arc<dyn LocationLookup>,
    boundary_service: Arc<dyn BoundaryService>,
    cache: ResultCache,
    busy: BusyTracker,
    summaries: SummaryRefresher,
    where_am_i_alerts: AlertChannel,
    boundary_alerts: AlertChannel,
    state: Mutex<WorkflowState>,
    generation: AtomicU64,
}

impl LocationWorkflow {
    /// Start assembling a workflow.
    pub fn builder() -> LocationWorkflowBuilder {
        LocationWorkflowBuilder::new()
    }

    /// Resolve the user's current location.
    ///
    /// On the first run the display is seeded from the cached result while
    /// the fix is acquired; on later runs the previous resolution, boundary
    /// overlay and notice are cleared first. A fix within jitter of a valid
    /// cached entry is served from the cache without a remote lookup.
    pub async fn locate(&self) -> Result<LocationResult, LocateError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.prepare_run();
        self.busy.begin(Operation::WhereAmI);

        let coordinates = match self.resolver.resolve().await {
            Ok(coordinates) => coordinates,
            Err(error) => {
                self.fail_where_am_i(generation, error.message().to_string());
                return Err(error.into());
            }
        };

        if self.superseded(generation) {
            return Err(LocateError::Superseded);
        }

        if let Some(entry) = self.cache.read() {
            if ResultCache::is_fresh(coordinates, entry.coordinates) {
                debug!(
                    location = %entry.location.id,
                    "fix within jitter of cached result, skipping lookup"
                );
                return self.complete(
                    generation,
                    entry.options,
                    coordinates,
                    entry.location,
                    ResolutionSource::CacheHit,
                );
            }
        }

        let options = LookupOptions::new(self.config.search_distance_ft, coordinates);
        match self.lookup.resolve_location(options).await {
            Ok(location) => self.complete(
                generation,
                options,
                coordinates,
                location,
                ResolutionSource::Lookup,
            ),
            Err(error) => {
                let message = error
                    .message()
                    .unwrap_or(LOOKUP_FALLBACK_MESSAGE)
                    .to_string();
                self.fail_where_am_i(generation, message);
                Err(LocateError::Lookup(error))
            }
        }
    }

    /// Fetch the reachable area around the resolved location.
    ///
    /// Independent of `locate`: it runs under its own busy flag and alert
    /// channel and never touches the resolution state. There is no cache
    /// layer here; cost and units change per call, so a cached overlay is
    /// never reusable.
    pub async fn travel_boundary(
        &self,
        query: BoundaryQuery,
    ) -> Result<BoundaryOverlay, BoundaryError> {
        self.busy.begin(Operation::WhereCanIGo);
        self.state.lock().unwrap().reset_boundary();
        self.boundary_alerts.clear();

        let location_id = {
            let state = self.state.lock().unwrap();
            state.resolution.location_id().map(str::to_string)
        };
        let Some(location_id) = location_id else {
            self.busy.end(Operation::WhereCanIGo);
            return Err(BoundaryError::NotResolved);
        };

        match self
            .boundary_service
            .travel_boundary(&location_id, query)
            .await
        {
            Ok(overlay) => {
                self.busy.end(Operation::WhereCanIGo);
                self.state.lock().unwrap().boundary = Some(overlay.clone());
                info!(cost = query.cost, units = %query.units, "travel boundary updated");
                Ok(overlay)
            }
            Err(error) => {
                let message = error
                    .message()
                    .unwrap_or(BOUNDARY_FALLBACK_MESSAGE)
                    .to_string();
                self.boundary_alerts.set(Severity::Danger, message);
                self.busy.end(Operation::WhereCanIGo);
                Err(BoundaryError::Remote(error))
            }
        }
    }

    /// The current resolution state.
    pub fn resolution(&self) -> Resolution {
        self.state.lock().unwrap().resolution.clone()
    }

    /// The current boundary overlay, if one is held.
    pub fn boundary(&self) -> Option<BoundaryOverlay> {
        self.state.lock().unwrap().boundary.clone()
    }

    /// The notice on the resolution channel, if any.
    pub fn where_am_i_alert(&self) -> Option<Alert> {
        self.where_am_i_alerts.current()
    }

    /// The notice on the boundary channel, if any.
    pub fn boundary_alert(&self) -> Option<Alert> {
        self.boundary_alerts.current()
    }

    /// The summary panels refreshed after each resolution.
    pub fn summaries(&self) -> &SummaryRefresher {
        &self.summaries
    }

    /// The busy flags for all operations this workflow drives.
    pub fn busy(&self) -> &BusyTracker {
        &self.busy
    }

    /// The workflow configuration.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Seed the display on a first run, or clear state on a refresh.
    fn prepare_run(&self) {
        let mut state = self.state.lock().unwrap();
        if state.resolution.has_live_fix() {
            // User-triggered refresh: drop the resolution, the boundary
            // overlay and any stale notice before acquiring the new fix.
            state.reset_location();
            state.resolution = Resolution::Resolving;
            self.where_am_i_alerts.clear();
        } else if state.resolution == Resolution::NotResolved {
            match self.cache.read() {
                Some(entry) => {
                    debug!(
                        location = %entry.location.id,
                        "seeding display from cached result"
                    );
                    state.resolution = Resolution::Resolved(LocationResult::seeded(entry));
                }
                None => state.resolution = Resolution::Resolving,
            }
        }
        // A seeded display stays visible while the new fix resolves.
    }

    /// Finish a successful resolution.
    fn complete(
        &self,
        generation: u64,
        options: LookupOptions,
        coordinates: Coordinates,
        location: ResolvedLocation,
        source: ResolutionSource,
    ) -> Result<LocationResult, LocateError> {
        if self.superseded(generation) {
            return Err(LocateError::Superseded);
        }

        let address_available = location.has_address();
        let result = LocationResult {
            coordinates,
            location,
            address_available,
            source,
        };
        self.state.lock().unwrap().resolution = Resolution::Resolved(result.clone());

        if !address_available {
            self.where_am_i_alerts.set(
                Severity::Info,
                format!("No address within {} ft.", options.search_distance_ft),
            );
        }

        self.summaries
            .spawn_refresh_all(self.config.popularity_group_level);

        let entry = CachedEntry {
            options,
            coordinates,
            location: result.location.clone(),
            address_available,
        };
        if let Err(error) = self.cache.write(&entry) {
            warn!(%error, "failed to cache resolution result");
        }

        self.busy.end(Operation::WhereAmI);
        info!(location = %result.location.id, source = ?source, "location resolved");
        Ok(result)
    }

    /// Surface a resolution failure, unless a newer run took over.
    fn fail_where_am_i(&self, generation: u64, message: String) {
        if self.superseded(generation) {
            return;
        }
        self.where_am_i_alerts.set(Severity::Danger, message);
        {
            let mut state = self.state.lock().unwrap();
            if state.resolution == Resolution::Resolving {
                state.resolution = Resolution::NotResolved;
            }
        }
        self.busy.end(Operation::WhereAmI);
    }

    /// Whether a newer `locate` run has started since this token was taken.
    fn superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }
}

impl fmt::Debug for LocationWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationWorkflow")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`LocationWorkflow`] from its collaborators.
///
/// The position provider, lookup, boundary and summary services are
/// required; the store defaults to an in-memory one and the progress
/// indicator to a no-op.
#[derive(Default)]
pub struct LocationWorkflowBuilder {
    config: WorkflowConfig,
    position_provider: Option<Arc<dyn PositionProvider>>,
    lookup: Option<Arc<dyn LocationLookup>>,
    boundary_service: Option<Arc<dyn BoundaryService>>,
    summary_service: Option<Arc<dyn SummaryService>>,
    store: Option<Arc<dyn KeyValueStore>>,
    indicator: Option<Arc<dyn ProgressIndicator>>,
}

impl LocationWorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the workflow configuration.
    pub fn config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the platform position source (required).
    pub fn position_provider(mut self, provider: Arc<dyn PositionProvider>) -> Self {
        self.position_provider = Some(provider);
        self
    }

    /// Set the remote location lookup (required).
    pub fn lookup(mut self, lookup: Arc<dyn LocationLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Set the travel boundary service (required).
    pub fn boundary_service(mut self, service: Arc<dyn BoundaryService>) -> Self {
        self.boundary_service = Some(service);
        self
    }

    /// Set the summary service (required).
    pub fn summary_service(mut self, service: Arc<dyn SummaryService>) -> Self {
        self.summary_service = Some(service);
        self
    }

    /// Set the persistent store backing the result cache.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the progress indicator notified by the busy tracker.
    pub fn progress_indicator(mut self, indicator: Arc<dyn ProgressIndicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Build the workflow.
    pub fn build(self) -> Result<LocationWorkflow, BuildError> {
        let position_provider = self
            .position_provider
            .ok_or(BuildError::MissingCollaborator("position provider"))?;
        let lookup = self
            .lookup
            .ok_or(BuildError::MissingCollaborator("location lookup"))?;
        let boundary_service = self
            .boundary_service
            .ok_or(BuildError::MissingCollaborator("boundary service"))?;
        let summary_service = self
            .summary_service
            .ok_or(BuildError::MissingCollaborator("summary service"))?;

        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let indicator = self
            .indicator
            .unwrap_or_else(|| Arc::new(NoOpProgressIndicator));

        let busy = BusyTracker::new(indicator);
        Ok(LocationWorkflow {
            config: self.config,
            resolver: GeolocationResolver::new(position_provider),
            lookup,
            boundary_service,
            cache: ResultCache::new(store),
            busy: busy.clone(),
            summaries: SummaryRefresher::new(summary_service, busy),
            where_am_i_alerts: AlertChannel::new("whereAmI"),
            boundary_alerts: AlertChannel::new("whereCanIGo"),
            state: Mutex::new(WorkflowState::default()),
            generation: AtomicU64::new(0),
        })
    }
}

impl fmt::Debug for LocationWorkflowBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationWorkflowBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
