//! Workflow state container.
//!
//! "No current fix" is one value of one sum type rather than a pair of
//! independently nullable fields, so coordinates and location can never go
//! out of sync; a reset replaces the whole resolution at once.

use crate::cache::CachedEntry;
use crate::coord::Coordinates;
use crate::services::{BoundaryOverlay, ResolvedLocation};

/// Where a resolution's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// A live fix resolved through the remote lookup.
    Lookup,
    /// A live fix served from the cached result (fix within jitter).
    CacheHit,
    /// Display state restored from the cache before any fix existed.
    Seeded,
}

/// A completed resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResult {
    pub coordinates: Coordinates,
    pub location: ResolvedLocation,
    pub address_available: bool,
    pub source: ResolutionSource,
}

impl LocationResult {
    /// Restore a result from a cached entry, marked as seeded.
    pub(crate) fn seeded(entry: CachedEntry) -> Self {
        Self {
            coordinates: entry.coordinates,
            location: entry.location,
            address_available: entry.address_available,
            source: ResolutionSource::Seeded,
        }
    }
}

/// The workflow's resolution state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Resolution {
    /// Nothing resolved and nothing in flight.
    #[default]
    NotResolved,
    /// A fix is being acquired and there is nothing to display yet.
    Resolving,
    /// The most recent resolution.
    Resolved(LocationResult),
}

impl Resolution {
    /// Whether any result (live or seeded) is held.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// Whether a live fix is held.
    ///
    /// A display seeded from the cache does not count: the next `locate`
    /// after seeding is still the first resolution, not a refresh.
    pub fn has_live_fix(&self) -> bool {
        matches!(
            self,
            Resolution::Resolved(result) if result.source != ResolutionSource::Seeded
        )
    }

    /// The held result, if any.
    pub fn result(&self) -> Option<&LocationResult> {
        match self {
            Resolution::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Server id of the held location, if any.
    pub fn location_id(&self) -> Option<&str> {
        self.result().map(|result| result.location.id.as_str())
    }

    /// Coordinates of the held result, if any.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.result().map(|result| result.coordinates)
    }
}

/// Mutable state owned by one workflow instance.
#[derive(Debug, Default)]
pub(crate) struct WorkflowState {
    pub resolution: Resolution,
    pub boundary: Option<BoundaryOverlay>,
}

impl WorkflowState {
    /// Drop the resolution and everything derived from it.
    pub fn reset_location(&mut self) {
        self.resolution = Resolution::NotResolved;
        self.reset_boundary();
    }

    /// Drop the boundary overlay only.
    pub fn reset_boundary(&mut self) {
        self.boundary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LookupOptions;

    fn result(source: ResolutionSource) -> LocationResult {
        LocationResult {
            coordinates: Coordinates::new(1.0, 2.0),
            location: ResolvedLocation {
                id: "loc-1".to_string(),
                address: None,
                recorded_at: None,
            },
            address_available: false,
            source,
        }
    }

    #[test]
    fn test_default_state() {
        let state = WorkflowState::default();
        assert_eq!(state.resolution, Resolution::NotResolved);
        assert!(state.boundary.is_none());
    }

    #[test]
    fn test_not_resolved_has_nothing() {
        let resolution = Resolution::NotResolved;
        assert!(!resolution.is_resolved());
        assert!(!resolution.has_live_fix());
        assert!(resolution.location_id().is_none());
        assert!(resolution.coordinates().is_none());
    }

    #[test]
    fn test_live_fix_detection() {
        assert!(Resolution::Resolved(result(ResolutionSource::Lookup)).has_live_fix());
        assert!(Resolution::Resolved(result(ResolutionSource::CacheHit)).has_live_fix());
        assert!(!Resolution::Resolved(result(ResolutionSource::Seeded)).has_live_fix());
        assert!(!Resolution::Resolving.has_live_fix());
    }

    #[test]
    fn test_seeded_result_still_exposes_location() {
        let resolution = Resolution::Resolved(result(ResolutionSource::Seeded));
        assert!(resolution.is_resolved());
        assert_eq!(resolution.location_id(), Some("loc-1"));
        assert_eq!(resolution.coordinates(), Some(Coordinates::new(1.0, 2.0)));
    }

    #[test]
    fn test_seeded_from_cache_entry() {
        let coordinates = Coordinates::new(3.0, 4.0);
        let entry = CachedEntry {
            options: LookupOptions::new(750, coordinates),
            coordinates,
            location: ResolvedLocation {
                id: "loc-2".to_string(),
                address: None,
                recorded_at: None,
            },
            address_available: true,
        };

        let seeded = LocationResult::seeded(entry);
        assert_eq!(seeded.source, ResolutionSource::Seeded);
        assert_eq!(seeded.coordinates, coordinates);
        assert!(seeded.address_available);
    }

    #[test]
    fn test_reset_location_clears_boundary_too() {
        let mut state = WorkflowState {
            resolution: Resolution::Resolved(result(ResolutionSource::Lookup)),
            boundary: Some(BoundaryOverlay {
                geojson: serde_json::json!({"type": "FeatureCollection"}),
            }),
        };

        state.reset_location();

        assert_eq!(state.resolution, Resolution::NotResolved);
        assert!(state.boundary.is_none());
    }
}
