// Runtime configuration and acting identity

use serde::{Deserialize, Serialize};

/// The named permission gating this feature, distinct from merely
/// holding a valid token.
pub const MANAGE_EVENT_REPORTS: &str = "manage_event_reports";

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub operators: Vec<OperatorAccount>,
    pub events_base_url: String,
    pub events_api_token: Option<String>,
    pub orders_base_url: String,
    pub orders_api_token: Option<String>,
    pub cache_ttl_seconds: u64,
    pub csrf_secret: String,
    pub preferences_path: String,
    pub access_log_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorAccount {
    pub id: String,
    pub token: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// The authenticated identity a request acts as. Threaded explicitly
/// through every application call.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub capabilities: Vec<String>,
}

impl Actor {
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities
            .iter()
            .any(|candidate| candidate == capability)
    }
}
