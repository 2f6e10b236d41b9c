//! Workflow error types.

use crate::geolocation::GeolocationError;
use crate::services::RemoteError;
use thiserror::Error;

/// A `locate` run failed or was abandoned.
///
/// Every variant is terminal for its run; the externally visible effect is
/// the alert-channel write and the cleared busy flag, except for
/// `Superseded` runs which touch nothing.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The platform could not produce a fix.
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// The remote lookup rejected or failed.
    #[error("location lookup failed: {0}")]
    Lookup(RemoteError),

    /// A newer `locate` run started while this one was waiting; its result
    /// was discarded rather than overwriting newer state.
    #[error("superseded by a newer resolution request")]
    Superseded,
}

/// A travel boundary fetch failed.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// No location has been resolved yet, so there is nothing to query
    /// a boundary around.
    #[error("no resolved location to query a travel boundary for")]
    NotResolved,

    /// The boundary service rejected or failed.
    #[error("travel boundary fetch failed: {0}")]
    Remote(RemoteError),
}

/// A workflow was built without a required collaborator.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),
}
