use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use backend_application::{AppState, Metrics};
use backend_domain::services::ReportAggregator;
use backend_infrastructure::{
    AppConfig, FileAccessLogSink, FilePreferenceRepository, HttpEventProvider, HttpOrderProvider,
    InMemoryCacheStore,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let event_provider = Arc::new(HttpEventProvider::new(
            &runtime_config.events_base_url,
            runtime_config.events_api_token.clone(),
            runtime_config.request_timeout_seconds,
        )?);
        let order_provider = Arc::new(HttpOrderProvider::new(
            &runtime_config.orders_base_url,
            runtime_config.orders_api_token.clone(),
            runtime_config.request_timeout_seconds,
        )?);
        let aggregator = Arc::new(ReportAggregator::new(
            event_provider.clone(),
            order_provider.clone(),
        ));

        let preference_repo = Arc::new(FilePreferenceRepository::new(
            &runtime_config.preferences_path,
        ));
        let access_log = Arc::new(FileAccessLogSink::new(&runtime_config.access_log_path));

        let state = AppState {
            config: runtime_config,
            event_provider,
            order_provider,
            cache_store: Arc::new(InMemoryCacheStore::new()),
            preference_repo,
            access_log,
            aggregator,
            cache_keys: Arc::new(RwLock::new(HashSet::new())),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
