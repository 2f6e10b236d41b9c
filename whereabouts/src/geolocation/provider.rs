//! Platform position source collaborator.

use crate::coord::Coordinates;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// A successful reading from the platform position source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coords: Coordinates,
}

/// Failure reported by the platform position source.
///
/// Providers vary in how much they say: permission refusals usually carry a
/// message, hardware timeouts often don't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionError {
    message: Option<String>,
}

impl PositionError {
    /// Failure with a provider-supplied message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Failure without any usable message.
    pub fn unspecified() -> Self {
        Self { message: None }
    }

    /// The provider-supplied message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str("position source failed"),
        }
    }
}

impl std::error::Error for PositionError {}

/// Boxed future returned by [`PositionProvider::current_position`].
pub type PositionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<PositionFix, PositionError>> + Send + 'a>>;

/// The platform's geolocation capability.
///
/// One call produces one fix. The provider owns its own timeout policy;
/// callers treat a slow provider the same as a failing one.
pub trait PositionProvider: Send + Sync {
    /// Acquire the device's current position.
    fn current_position(&self) -> PositionFuture<'_>;
}
