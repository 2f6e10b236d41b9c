//! Normalizes a platform position reading into workflow terms.

use super::provider::{PositionError, PositionProvider};
use crate::coord::Coordinates;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Wording used when the position source gives no reason for failing.
pub const GEOLOCATION_FALLBACK_MESSAGE: &str = "Unable to determine current position.";

/// A fix could not be obtained.
///
/// Always carries an alert-ready message: the provider's wording when it
/// gave one, [`GEOLOCATION_FALLBACK_MESSAGE`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeolocationError {
    message: String,
}

impl GeolocationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The alert-ready failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GeolocationError {}

impl From<PositionError> for GeolocationError {
    fn from(error: PositionError) -> Self {
        Self::new(
            error
                .message()
                .unwrap_or(GEOLOCATION_FALLBACK_MESSAGE)
                .to_string(),
        )
    }
}

/// Wraps one call to the [`PositionProvider`], normalizing its result.
///
/// Success becomes plain [`Coordinates`] (rejected if out of range),
/// failure becomes a [`GeolocationError`] with a usable message. No retry:
/// whether to ask again is the caller's decision.
#[derive(Clone)]
pub struct GeolocationResolver {
    provider: Arc<dyn PositionProvider>,
}

impl GeolocationResolver {
    pub fn new(provider: Arc<dyn PositionProvider>) -> Self {
        Self { provider }
    }

    /// Acquire and validate one fix.
    pub async fn resolve(&self) -> Result<Coordinates, GeolocationError> {
        match self.provider.current_position().await {
            Ok(fix) => {
                if !fix.coords.is_valid() {
                    warn!(coords = %fix.coords, "position source returned out-of-range fix");
                    return Err(GeolocationError::new(GEOLOCATION_FALLBACK_MESSAGE));
                }
                debug!(coords = %fix.coords, "acquired fix");
                Ok(fix.coords)
            }
            Err(error) => {
                warn!(%error, "position source failed");
                Err(error.into())
            }
        }
    }
}

impl fmt::Debug for GeolocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeolocationResolver").finish_non_exhaustive()
    }
}
