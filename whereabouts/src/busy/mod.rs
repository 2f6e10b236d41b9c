//! In-flight operation tracking.
//!
//! Every long-running operation owns a named busy flag. The flags are
//! independent: resolving the user's position and refreshing a summary panel
//! can be busy at the same time without blocking each other. Flag changes
//! are mirrored to a [`ProgressIndicator`] collaborator so a frontend can
//! spin/stop whatever widget it attaches to the operation.

mod indicator;

pub use indicator::{NoOpProgressIndicator, ProgressIndicator};

use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The named operations the library tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Resolving the user's current position.
    WhereAmI,
    /// Fetching a travel boundary for the resolved location.
    WhereCanIGo,
    /// Refreshing the popularity summary panel.
    MostPopular,
    /// Refreshing the recent-locations panel.
    OthersBeen,
}

impl Operation {
    /// Stable identifier, matching the frontend widget ids.
    pub fn id(&self) -> &'static str {
        match self {
            Operation::WhereAmI => "whereAmI",
            Operation::WhereCanIGo => "whereCanIGo",
            Operation::MostPopular => "mostPopular",
            Operation::OthersBeen => "othersBeen",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Tracks which operations are currently in flight.
///
/// Flags are created on first use and toggled thereafter, never removed.
/// `end` on an idle flag is a no-op apart from the indicator callback, so
/// callers don't need to know whether an operation actually started.
///
/// Cloning is cheap and clones share the same flag table and indicator.
#[derive(Clone)]
pub struct BusyTracker {
    flags: Arc<DashMap<Operation, bool>>,
    indicator: Arc<dyn ProgressIndicator>,
}

impl BusyTracker {
    /// Create a tracker reporting to the given indicator.
    pub fn new(indicator: Arc<dyn ProgressIndicator>) -> Self {
        Self {
            flags: Arc::new(DashMap::new()),
            indicator,
        }
    }

    /// Mark an operation busy and start its indicator.
    pub fn begin(&self, operation: Operation) {
        trace!(%operation, "operation started");
        self.flags.insert(operation, true);
        self.indicator.started(operation);
    }

    /// Mark an operation idle and stop its indicator.
    pub fn end(&self, operation: Operation) {
        trace!(%operation, "operation finished");
        self.flags.insert(operation, false);
        self.indicator.stopped(operation);
    }

    /// Whether the operation is currently in flight.
    pub fn is_busy(&self, operation: Operation) -> bool {
        self.flags.get(&operation).map(|flag| *flag).unwrap_or(false)
    }
}

impl Default for BusyTracker {
    fn default() -> Self {
        Self::new(Arc::new(NoOpProgressIndicator))
    }
}

impl fmt::Debug for BusyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusyTracker")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
