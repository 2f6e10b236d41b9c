//! Progress indicator collaborator trait.

use super::Operation;

/// External progress widget, notified when operations start and stop.
///
/// Purely observational: the tracker never reads anything back from the
/// indicator, and implementations must not block.
pub trait ProgressIndicator: Send + Sync {
    /// An operation entered its busy state.
    fn started(&self, operation: Operation);

    /// An operation left its busy state.
    ///
    /// May be called for an operation that never started; implementations
    /// should treat that as a stop of an already-stopped widget.
    fn stopped(&self, operation: Operation);
}

/// Indicator that ignores every notification.
///
/// Default wiring for tests and headless embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgressIndicator;

impl ProgressIndicator for NoOpProgressIndicator {
    fn started(&self, _operation: Operation) {}

    fn stopped(&self, _operation: Operation) {}
}
