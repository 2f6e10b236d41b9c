//! Cached result entry and cache errors.

use crate::config::DEFAULT_SEARCH_DISTANCE_FT;
use crate::coord::Coordinates;
use crate::services::{LookupOptions, ResolvedLocation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single persisted resolution result.
///
/// At most one entry exists at any time; every successful resolution
/// overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedEntry {
    pub options: LookupOptions,
    pub coordinates: Coordinates,
    pub location: ResolvedLocation,
    pub address_available: bool,
}

/// Wire form of a stored entry, tolerant of partial data.
///
/// Values written by other versions (or corrupted in place) may lack
/// fields; the read path decides what is recoverable.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredEntry {
    pub options: Option<LookupOptions>,
    pub coordinates: Option<Coordinates>,
    pub location: Option<ResolvedLocation>,
    #[serde(default)]
    pub address_available: bool,
}

impl StoredEntry {
    /// Promote to a full entry, or `None` when the required fields
    /// (coordinates and location) are missing.
    ///
    /// A missing options record is reconstructed from the stored
    /// coordinates and the default search distance; it only ever feeds the
    /// no-address notice text.
    pub(crate) fn into_entry(self) -> Option<CachedEntry> {
        let coordinates = self.coordinates?;
        let location = self.location?;
        let options = self
            .options
            .unwrap_or_else(|| LookupOptions::new(DEFAULT_SEARCH_DISTANCE_FT, coordinates));
        Some(CachedEntry {
            options,
            coordinates,
            location,
            address_available: self.address_available,
        })
    }
}

/// Cache-related errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The entry could not be serialized for storage.
    #[error("failed to encode cached result: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: &str) -> ResolvedLocation {
        ResolvedLocation {
            id: id.to_string(),
            address: None,
            recorded_at: None,
        }
    }

    #[test]
    fn test_stored_entry_with_all_fields() {
        let coords = Coordinates::new(1.0, 2.0);
        let stored = StoredEntry {
            options: Some(LookupOptions::new(500, coords)),
            coordinates: Some(coords),
            location: Some(location("x")),
            address_available: true,
        };

        let entry = stored.into_entry().expect("entry should be valid");
        assert_eq!(entry.options.search_distance_ft, 500);
        assert!(entry.address_available);
    }

    #[test]
    fn test_stored_entry_without_coordinates_is_invalid() {
        let stored = StoredEntry {
            options: None,
            coordinates: None,
            location: Some(location("x")),
            address_available: false,
        };
        assert!(stored.into_entry().is_none());
    }

    #[test]
    fn test_stored_entry_without_location_is_invalid() {
        let stored = StoredEntry {
            options: None,
            coordinates: Some(Coordinates::new(1.0, 2.0)),
            location: None,
            address_available: false,
        };
        assert!(stored.into_entry().is_none());
    }

    #[test]
    fn test_missing_options_fall_back_to_default_distance() {
        let coords = Coordinates::new(1.0, 2.0);
        let stored = StoredEntry {
            options: None,
            coordinates: Some(coords),
            location: Some(location("x")),
            address_available: false,
        };

        let entry = stored.into_entry().expect("entry should be valid");
        assert_eq!(entry.options.search_distance_ft, DEFAULT_SEARCH_DISTANCE_FT);
        assert_eq!(entry.options.coordinates, coords);
    }
}
