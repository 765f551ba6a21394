// Calendar event entity
// One entry in the upstream event catalog

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    /// Start timestamp in the canonical form `YYYY-MM-DD HH:MM:SS`.
    pub starts_at: String,
}
