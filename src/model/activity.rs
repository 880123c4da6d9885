use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key for the activity log
pub const ACTIVITY_KEY: &str = "pmLite_activity_log";

/// One user-initiated mutation, as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: String,
    pub timestamp: DateTime<Utc>,
}
