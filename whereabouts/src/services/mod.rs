//! Remote service collaborator traits.
//!
//! The library owns no transport. Everything it needs from the backend is
//! expressed as one of the object-safe traits below, so the workflow can be
//! wired to an HTTP client, an in-process simulation, or test mocks without
//! changing. Methods return boxed futures to keep the traits usable behind
//! `Arc<dyn …>`.

mod types;

pub use types::{
    Address, BoundaryOverlay, BoundaryQuery, BoundaryUnits, DeviceUsage, LookupOptions,
    PopularityBucket, RecentLocation, RemoteError, ResolvedLocation, UsageSample,
};

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by remote service calls.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RemoteError>> + Send + 'a>>;

/// Resolves a geolocation fix into a server-confirmed location record.
///
/// The server persists the fix as a side effect; the returned record's id
/// is the handle for follow-up queries.
pub trait LocationLookup: Send + Sync {
    /// Post the fix and search distance, returning the stored location.
    fn resolve_location(&self, options: LookupOptions) -> RemoteFuture<'_, ResolvedLocation>;
}

/// Computes the reachable area around a resolved location.
pub trait BoundaryService: Send + Sync {
    /// Fetch the travel boundary for a previously resolved location.
    fn travel_boundary<'a>(
        &'a self,
        location_id: &'a str,
        query: BoundaryQuery,
    ) -> RemoteFuture<'a, BoundaryOverlay>;
}

/// Serves the aggregate summary panels.
pub trait SummaryService: Send + Sync {
    /// Visit counts grouped to the given level.
    fn popularity(&self, group_level: u32) -> RemoteFuture<'_, Vec<PopularityBucket>>;

    /// The most recently resolved locations, newest first.
    fn recent_locations(&self, limit: usize) -> RemoteFuture<'_, Vec<RecentLocation>>;
}

/// Serves the usage statistics series.
pub trait UsageService: Send + Sync {
    /// Daily resolution counts, grouped to the given level.
    fn usage_by_time(&self, group_level: u32) -> RemoteFuture<'_, Vec<UsageSample>>;

    /// Resolution counts per device type.
    fn usage_by_device(&self, group_level: u32) -> RemoteFuture<'_, Vec<DeviceUsage>>;
}
