// Access log entry
// Write-only audit record of every report read

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::ReportDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn from_hit(was_cache_hit: bool) -> CacheStatus {
        if was_cache_hit {
            CacheStatus::Hit
        } else {
            CacheStatus::Miss
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub entry_id: String,
    pub actor_id: String,
    pub report_date: String,
    pub cache_status: CacheStatus,
    pub origin: String,
    pub recorded_at: String,
}

impl AccessLogEntry {
    pub fn new(
        actor_id: &str,
        date: &ReportDate,
        cache_status: CacheStatus,
        origin: &str,
    ) -> AccessLogEntry {
        AccessLogEntry {
            entry_id: Uuid::new_v4().to_string(),
            actor_id: actor_id.to_string(),
            report_date: date.as_str().to_string(),
            cache_status,
            origin: origin.to_string(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_captures_date_and_cache_status() {
        let date = ReportDate::parse("2025-06-15").expect("valid date");
        let entry = AccessLogEntry::new("op-1", &date, CacheStatus::from_hit(true), "10.0.0.9");
        assert_eq!(entry.report_date, "2025-06-15");
        assert_eq!(entry.cache_status, CacheStatus::Hit);
        assert_eq!(entry.origin, "10.0.0.9");
        assert!(!entry.entry_id.is_empty());
    }
}
