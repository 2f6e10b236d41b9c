//! Value types exchanged with the remote location services.

use crate::coord::Coordinates;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Street address attached to a resolved location.
///
/// Every field is optional; the remote lookup returns whatever it could
/// reverse-geocode within the search distance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
}

impl Address {
    /// True when no component is populated.
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.region.is_none()
            && self.postal_code.is_none()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in [&self.street, &self.city, &self.region, &self.postal_code]
            .into_iter()
            .flatten()
        {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(part)?;
            first = false;
        }
        Ok(())
    }
}

/// A server-confirmed location record.
///
/// Returned by the remote lookup after it has persisted the fix. The id is
/// the server's handle for follow-up queries such as travel boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// Server-assigned identifier.
    pub id: String,
    /// Nearest address, if one was found within the search distance.
    pub address: Option<Address>,
    /// When the server recorded the fix.
    pub recorded_at: Option<DateTime<Utc>>,
}

impl ResolvedLocation {
    /// Whether a non-empty address was found near the fix.
    pub fn has_address(&self) -> bool {
        self.address.as_ref().is_some_and(|a| !a.is_empty())
    }
}

/// Parameters for a remote location lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookupOptions {
    /// How far around the fix to search for an address, in feet.
    pub search_distance_ft: u32,
    /// The fix being resolved.
    pub coordinates: Coordinates,
}

impl LookupOptions {
    pub fn new(search_distance_ft: u32, coordinates: Coordinates) -> Self {
        Self {
            search_distance_ft,
            coordinates,
        }
    }
}

/// Cost units for a travel boundary query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryUnits {
    /// Drive-time boundary.
    Minutes,
    /// Drive-distance boundary.
    Miles,
}

impl fmt::Display for BoundaryUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryUnits::Minutes => f.write_str("Minutes"),
            BoundaryUnits::Miles => f.write_str("Miles"),
        }
    }
}

/// User-chosen parameters for a travel boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryQuery {
    /// How far the boundary extends, in `units`.
    pub cost: u32,
    pub units: BoundaryUnits,
}

impl Default for BoundaryQuery {
    fn default() -> Self {
        Self {
            cost: 5,
            units: BoundaryUnits::Minutes,
        }
    }
}

/// Map overlay returned by the boundary service.
///
/// The payload is opaque GeoJSON; the library stores and hands it back to
/// the frontend without interpreting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryOverlay {
    pub geojson: serde_json::Value,
}

/// One bucket of the popularity summary.
///
/// The key is the grouping path at the requested group level (e.g.
/// `["US", "TX"]`), the value the visit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularityBucket {
    pub key: Vec<String>,
    pub value: u64,
}

/// A location another user recently resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentLocation {
    pub id: String,
    pub address: Option<Address>,
    pub recorded_at: DateTime<Utc>,
}

/// One day of aggregate usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSample {
    pub date: NaiveDate,
    pub value: u64,
}

/// Aggregate usage attributed to one device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUsage {
    pub device: String,
    pub value: u64,
}

/// Failure reported by a remote service call.
///
/// Carries the server-provided message when one exists; callers pick the
/// fallback wording appropriate to their channel when it doesn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    message: Option<String>,
}

impl RemoteError {
    /// Failure with a server-provided message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Failure without any usable message.
    pub fn unspecified() -> Self {
        Self { message: None }
    }

    /// The server-provided message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str("remote service call failed"),
        }
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address() {
        assert!(Address::default().is_empty());
    }

    #[test]
    fn test_partial_address_is_not_empty() {
        let address = Address {
            city: Some("Hamburg".to_string()),
            ..Default::default()
        };
        assert!(!address.is_empty());
    }

    #[test]
    fn test_address_display_joins_parts() {
        let address = Address {
            street: Some("1 Main St".to_string()),
            city: Some("Austin".to_string()),
            region: Some("TX".to_string()),
            postal_code: None,
        };
        assert_eq!(address.to_string(), "1 Main St, Austin, TX");
    }

    #[test]
    fn test_has_address_requires_non_empty() {
        let bare = ResolvedLocation {
            id: "x".to_string(),
            address: Some(Address::default()),
            recorded_at: None,
        };
        assert!(!bare.has_address());

        let missing = ResolvedLocation {
            id: "x".to_string(),
            address: None,
            recorded_at: None,
        };
        assert!(!missing.has_address());

        let populated = ResolvedLocation {
            id: "x".to_string(),
            address: Some(Address {
                street: Some("1 Main St".to_string()),
                ..Default::default()
            }),
            recorded_at: None,
        };
        assert!(populated.has_address());
    }

    #[test]
    fn test_boundary_query_defaults() {
        let query = BoundaryQuery::default();
        assert_eq!(query.cost, 5);
        assert_eq!(query.units, BoundaryUnits::Minutes);
        assert_eq!(query.units.to_string(), "Minutes");
    }

    #[test]
    fn test_remote_error_message_passthrough() {
        let err = RemoteError::with_message("service unavailable");
        assert_eq!(err.message(), Some("service unavailable"));
        assert_eq!(err.to_string(), "service unavailable");
    }

    #[test]
    fn test_remote_error_without_message() {
        let err = RemoteError::unspecified();
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "remote service call failed");
    }
}
