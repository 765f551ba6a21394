use std::collections::HashSet;
use std::sync::Arc;

use backend_domain::ports::{
    AccessLogSink,
    CacheStore,
    EventProvider,
    OrderProvider,
    PreferenceRepository,
};
use backend_domain::services::ReportAggregator;
use backend_domain::RuntimeConfig;
use tokio::sync::RwLock;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_provider: Arc<dyn EventProvider>,
    pub order_provider: Arc<dyn OrderProvider>,
    pub cache_store: Arc<dyn CacheStore>,
    pub preference_repo: Arc<dyn PreferenceRepository>,
    pub access_log: Arc<dyn AccessLogSink>,
    pub aggregator: Arc<ReportAggregator>,
    /// Keys this subsystem has written to the cache store. Bulk
    /// invalidation enumerates exactly this set.
    pub cache_keys: Arc<RwLock<HashSet<String>>>,
    pub metrics: Arc<Metrics>,
}
