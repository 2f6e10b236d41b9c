//! Single-slot user notices, one per named channel.
//!
//! Each workflow concern (resolving the user's position, fetching a travel
//! boundary) owns its own [`AlertChannel`]. A channel holds at most one
//! [`Alert`]; setting a new one replaces the old, there is no queueing or
//! history. Channels never interact with each other.

use std::fmt;
use std::sync::Mutex;
use tracing::debug;

/// How prominently a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Advisory notice, resolution still succeeded.
    Info,
    /// The operation failed.
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Danger => f.write_str("danger"),
        }
    }
}

/// A user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

/// A named slot holding zero or one [`Alert`].
///
/// `set` replaces whatever is in the slot, `clear` empties it. Reads return
/// a clone so callers never hold the internal lock.
#[derive(Debug)]
pub struct AlertChannel {
    name: &'static str,
    slot: Mutex<Option<Alert>>,
}

impl AlertChannel {
    /// Create an empty channel. The name is only used for logging.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(None),
        }
    }

    /// Replace the channel's notice.
    pub fn set(&self, severity: Severity, message: impl Into<String>) {
        let alert = Alert {
            severity,
            message: message.into(),
        };
        debug!(channel = self.name, severity = ?alert.severity, message = %alert.message, "alert set");
        *self.slot.lock().unwrap() = Some(alert);
    }

    /// Empty the channel.
    pub fn clear(&self) {
        let mut slot = self.slot.lock().unwrap();
        if slot.take().is_some() {
            debug!(channel = self.name, "alert cleared");
        }
    }

    /// The current notice, if any.
    pub fn current(&self) -> Option<Alert> {
        self.slot.lock().unwrap().clone()
    }

    /// The channel name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}
