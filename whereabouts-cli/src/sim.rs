//! Simulated collaborators for the demo commands.
//!
//! The library's collaborator traits normally face a browser geolocation
//! bridge and an HTTP backend. The CLI wires them to deterministic
//! in-process stand-ins instead, so every command works offline and the
//! orchestration behavior (caching, alerts, busy flags) is what's on
//! display.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::info;
use whereabouts::busy::{Operation, ProgressIndicator};
use whereabouts::coord::Coordinates;
use whereabouts::geolocation::{PositionError, PositionFix, PositionFuture, PositionProvider};
use whereabouts::services::{
    Address, BoundaryOverlay, BoundaryQuery, BoundaryService, DeviceUsage, LocationLookup,
    LookupOptions, PopularityBucket, RecentLocation, RemoteFuture, ResolvedLocation,
    SummaryService, UsageSample, UsageService,
};

/// Position source returning a fixed reading, or a scripted refusal.
pub struct SimulatedPositionProvider {
    outcome: Result<Coordinates, PositionError>,
}

impl SimulatedPositionProvider {
    /// Always produce the given fix.
    pub fn at(coordinates: Coordinates) -> Self {
        Self {
            outcome: Ok(coordinates),
        }
    }

    /// Always refuse, the way a browser does when permission is denied.
    pub fn denied() -> Self {
        Self {
            outcome: Err(PositionError::with_message("User denied geolocation.")),
        }
    }
}

impl PositionProvider for SimulatedPositionProvider {
    fn current_position(&self) -> PositionFuture<'_> {
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome.map(|coords| PositionFix { coords }) })
    }
}

/// In-process stand-in for the remote location services.
pub struct SimulatedBackend {
    /// When set, lookups find no address near the fix.
    vacant: bool,
}

impl SimulatedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { vacant: false })
    }

    pub fn vacant() -> Arc<Self> {
        Arc::new(Self { vacant: true })
    }

    fn demo_address() -> Address {
        Address {
            street: Some("11 Harbour Way".to_string()),
            city: Some("Portside".to_string()),
            region: Some("CA".to_string()),
            postal_code: Some("94111".to_string()),
        }
    }
}

impl LocationLookup for SimulatedBackend {
    fn resolve_location(&self, options: LookupOptions) -> RemoteFuture<'_, ResolvedLocation> {
        let address = if self.vacant {
            Some(Address::default())
        } else {
            Some(Self::demo_address())
        };
        Box::pin(async move {
            Ok(ResolvedLocation {
                id: format!(
                    "loc-{:.5}-{:.5}",
                    options.coordinates.latitude, options.coordinates.longitude
                ),
                address,
                recorded_at: Some(Utc::now()),
            })
        })
    }
}

impl BoundaryService for SimulatedBackend {
    fn travel_boundary<'a>(
        &'a self,
        location_id: &'a str,
        query: BoundaryQuery,
    ) -> RemoteFuture<'a, BoundaryOverlay> {
        let location_id = location_id.to_string();
        Box::pin(async move {
            Ok(BoundaryOverlay {
                geojson: serde_json::json!({
                    "type": "FeatureCollection",
                    "features": [{
                        "type": "Feature",
                        "properties": {
                            "locationId": location_id,
                            "cost": query.cost,
                            "units": query.units.to_string(),
                        },
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[
                                [-122.41, 37.77], [-122.39, 37.77],
                                [-122.39, 37.79], [-122.41, 37.79],
                                [-122.41, 37.77],
                            ]],
                        },
                    }],
                }),
            })
        })
    }
}

impl SummaryService for SimulatedBackend {
    fn popularity(&self, group_level: u32) -> RemoteFuture<'_, Vec<PopularityBucket>> {
        Box::pin(async move {
            let buckets = [
                (vec!["US", "CA"], 42),
                (vec!["US", "TX"], 17),
                (vec!["DE", "HH"], 9),
            ];
            Ok(buckets
                .into_iter()
                .map(|(key, value)| PopularityBucket {
                    key: key
                        .into_iter()
                        .take(group_level as usize)
                        .map(str::to_string)
                        .collect(),
                    value,
                })
                .collect())
        })
    }

    fn recent_locations(&self, limit: usize) -> RemoteFuture<'_, Vec<RecentLocation>> {
        Box::pin(async move {
            let now = Utc::now();
            let visits = [
                ("visit-31", 40),
                ("visit-30", 90),
                ("visit-29", 60 * 45),
                ("visit-28", 60 * 60 * 5),
                ("visit-27", 60 * 60 * 24 * 2),
            ];
            Ok(visits
                .into_iter()
                .take(limit)
                .map(|(id, seconds_ago)| RecentLocation {
                    id: id.to_string(),
                    address: Some(Self::demo_address()),
                    recorded_at: now - Duration::seconds(seconds_ago),
                })
                .collect())
        })
    }
}

impl UsageService for SimulatedBackend {
    fn usage_by_time(&self, _group_level: u32) -> RemoteFuture<'_, Vec<UsageSample>> {
        Box::pin(async {
            let today = Utc::now().date_naive();
            let values = [4, 6, 2, 9, 5, 7, 3];
            Ok(values
                .into_iter()
                .enumerate()
                .map(|(i, value)| UsageSample {
                    date: today - Duration::days((values.len() - 1 - i) as i64),
                    value,
                })
                .collect())
        })
    }

    fn usage_by_device(&self, _group_level: u32) -> RemoteFuture<'_, Vec<DeviceUsage>> {
        Box::pin(async {
            Ok(vec![
                DeviceUsage {
                    device: "iPhone".to_string(),
                    value: 23,
                },
                DeviceUsage {
                    device: "Android".to_string(),
                    value: 18,
                },
                DeviceUsage {
                    device: "Desktop".to_string(),
                    value: 6,
                },
            ])
        })
    }
}

/// Progress indicator that narrates busy transitions to the log.
pub struct ConsoleIndicator;

impl ProgressIndicator for ConsoleIndicator {
    fn started(&self, operation: Operation) {
        info!(operation = %operation, "working...");
    }

    fn stopped(&self, operation: Operation) {
        info!(operation = %operation, "done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_provider_at_returns_the_fix() {
        let provider = SimulatedPositionProvider::at(Coordinates::new(37.78, -122.40));
        let fix = provider.current_position().await.unwrap();
        assert_eq!(fix.coords, Coordinates::new(37.78, -122.40));
    }

    #[tokio::test]
    async fn test_denied_provider_carries_a_message() {
        let provider = SimulatedPositionProvider::denied();
        let err = provider.current_position().await.unwrap_err();
        assert_eq!(err.message(), Some("User denied geolocation."));
    }

    #[tokio::test]
    async fn test_vacant_backend_returns_empty_address() {
        let backend = SimulatedBackend::vacant();
        let location = backend
            .resolve_location(LookupOptions::new(750, Coordinates::new(1.0, 2.0)))
            .await
            .unwrap();
        assert!(!location.has_address());
    }

    #[tokio::test]
    async fn test_popularity_respects_group_level() {
        let backend = SimulatedBackend::new();
        let buckets = backend.popularity(1).await.unwrap();
        assert!(buckets.iter().all(|b| b.key.len() == 1));
    }

    #[tokio::test]
    async fn test_recent_locations_respects_limit() {
        let backend = SimulatedBackend::new();
        let locations = backend.recent_locations(2).await.unwrap();
        assert_eq!(locations.len(), 2);
    }
}
