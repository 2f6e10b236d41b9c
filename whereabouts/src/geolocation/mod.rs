//! Geolocation fix acquisition.
//!
//! [`PositionProvider`] is the platform collaborator; [`GeolocationResolver`]
//! wraps a single call to it and normalizes the outcome for the workflow.

mod provider;
mod resolver;

pub use provider::{PositionError, PositionFix, PositionFuture, PositionProvider};
pub use resolver::{GeolocationError, GeolocationResolver, GEOLOCATION_FALLBACK_MESSAGE};
