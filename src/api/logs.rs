//! Export/import activity log, streamed to clients via SSE.
//!
//! A broadcast channel carries activity entries to any connected SSE
//! client; entries are also echoed to stdout so CLI runs see the same
//! trail.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Severity of an activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub level: ActivityLevel,
    pub message: String,
}

impl ActivityEntry {
    pub fn new(level: ActivityLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Global activity broadcaster.
pub static ACTIVITY_LOG: Lazy<ActivityLog> = Lazy::new(ActivityLog::new);

/// Broadcasts activity entries to all connected SSE clients.
pub struct ActivityLog {
    sender: broadcast::Sender<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Record an entry: echo to stdout, broadcast to subscribers.
    pub fn record(&self, entry: ActivityEntry) {
        let prefix = match entry.level {
            ActivityLevel::Info => "   ",
            ActivityLevel::Success => "   ✓",
            ActivityLevel::Warning => "   ⚠️",
            ActivityLevel::Error => "   ❌",
        };
        println!("{} {}", prefix, entry.message);

        // No receivers is fine; the send result is irrelevant.
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for SSE streaming.
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEntry> {
        self.sender.subscribe()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    ACTIVITY_LOG.record(ActivityEntry::new(ActivityLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    ACTIVITY_LOG.record(ActivityEntry::new(ActivityLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    ACTIVITY_LOG.record(ActivityEntry::new(ActivityLevel::Warning, msg));
}

pub fn log_error(msg: impl Into<String>) {
    ACTIVITY_LOG.record(ActivityEntry::new(ActivityLevel::Error, msg));
}
