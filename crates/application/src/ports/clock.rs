//! Clock port

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Feeds `{{date}}`, log timestamps and new-note names, and lets tests pin
/// time.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
