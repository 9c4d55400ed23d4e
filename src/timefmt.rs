//! Human-facing local-time formatting for CLI listings.

use chrono::{DateTime, Utc};

/// Render a UTC instant in the process's local timezone, or an empty
/// string for `None` (used throughout the `runs`/`schedule` listings).
pub fn to_local_display(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        None => String::new(),
        Some(ts) => {
            let local = ts.with_timezone(&chrono::Local);
            local.format("%Y-%m-%d %I:%M:%S %p %Z").to_string()
        }
    }
}
