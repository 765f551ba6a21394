// Report cache orchestration
// TTL-cached daily aggregation keyed by a hash of the date

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use backend_domain::{OrderRow, ReportDate};

use crate::{AppError, AppState};

const CACHE_KEY_PREFIX: &str = "report:";

#[derive(Debug, Serialize, Deserialize)]
pub struct CachedReport {
    pub stored_at: String,
    pub rows: Vec<OrderRow>,
}

pub fn cache_key(date: &ReportDate) -> String {
    let digest = Sha256::digest(date.as_str().as_bytes());
    let mut out = String::with_capacity(CACHE_KEY_PREFIX.len() + digest.len() * 2);
    out.push_str(CACHE_KEY_PREFIX);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Returns the day's rows and whether they came from the cache. A
/// store read failure, a missing or undecodable entry, and
/// `force_refresh` all fall through to recomputation; the store is
/// never allowed to fail the request.
pub async fn get_or_compute(
    state: &AppState,
    date: &ReportDate,
    force_refresh: bool,
) -> Result<(Vec<OrderRow>, bool), AppError> {
    let key = cache_key(date);

    if !force_refresh {
        match state.cache_store.get(&key).await {
            Ok(Some(payload)) => match serde_json::from_str::<CachedReport>(&payload) {
                Ok(cached) => {
                    state.metrics.record_cache_hit();
                    return Ok((cached.rows, true));
                }
                Err(err) => {
                    warn!("cache entry for {} is undecodable, recomputing: {}", date, err);
                }
            },
            Ok(None) => {}
            Err(err) => {
                warn!("cache store read failed for {}, recomputing: {}", date, err);
            }
        }
    }

    let outcome = state
        .aggregator
        .aggregate(date)
        .await
        .map_err(AppError::Internal)?;
    if !outcome.skipped.is_empty() {
        state.metrics.record_provider_skips(outcome.skipped.len());
        for skip in &outcome.skipped {
            warn!(
                "report for {} dropped event {} order {:?}: {}",
                date, skip.event_id, skip.order_id, skip.reason
            );
        }
    }

    let entry = CachedReport {
        stored_at: Utc::now().to_rfc3339(),
        rows: outcome.rows,
    };
    match serde_json::to_string(&entry) {
        Ok(payload) => {
            let ttl = Duration::from_secs(state.config.cache_ttl_seconds);
            // Whole-entry overwrite: concurrent writers may race, last
            // writer wins.
            match state.cache_store.put(&key, &payload, ttl).await {
                Ok(()) => {
                    state.cache_keys.write().await.insert(key);
                }
                Err(err) => warn!("cache store write failed for {}: {}", date, err),
            }
        }
        Err(err) => warn!("cache entry for {} failed to encode: {}", date, err),
    }

    state.metrics.record_cache_miss();
    Ok((entry.rows, false))
}

/// Deletes one entry when the affected date is known, otherwise every
/// key this subsystem has written. A key whose delete fails stays in
/// the index for the next attempt.
pub async fn invalidate(state: &AppState, date: Option<&ReportDate>) -> usize {
    let keys: Vec<String> = match date {
        Some(date) => vec![cache_key(date)],
        None => state.cache_keys.read().await.iter().cloned().collect(),
    };

    let mut removed = 0;
    for key in keys {
        match state.cache_store.delete(&key).await {
            Ok(()) => {
                state.cache_keys.write().await.remove(&key);
                removed += 1;
            }
            Err(err) => warn!("cache delete failed for {}: {}", key, err),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use tokio::sync::{Mutex, RwLock};

    use backend_domain::ports::{
        AccessLogSink,
        CacheStore,
        EventProvider,
        OrderProvider,
        PreferenceRepository,
    };
    use backend_domain::services::ReportAggregator;
    use backend_domain::{
        AccessLogEntry,
        BillingDetails,
        CalendarEvent,
        Order,
        OrderStatus,
        ReportColumn,
        RuntimeConfig,
        TicketLineItem,
    };

    use super::*;
    use crate::Metrics;

    struct StubEventProvider {
        events: Vec<CalendarEvent>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EventProvider for StubEventProvider {
        async fn events_for_date(&self, _date: &ReportDate) -> anyhow::Result<Vec<CalendarEvent>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.events.clone())
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct StubOrderProvider {
        orders: HashMap<i64, Vec<Order>>,
    }

    #[async_trait]
    impl OrderProvider for StubOrderProvider {
        async fn orders_for_event(&self, event_id: i64) -> anyhow::Result<Vec<Order>> {
            Ok(self.orders.get(&event_id).cloned().unwrap_or_default())
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MapCacheStore {
        entries: Mutex<HashMap<String, String>>,
        fail_reads: bool,
    }

    #[async_trait]
    impl CacheStore for MapCacheStore {
        async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            if self.fail_reads {
                return Err(anyhow!("store offline"));
            }
            Ok(self.entries.lock().await.get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str, _ttl: Duration) -> anyhow::Result<()> {
            self.entries
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> anyhow::Result<()> {
            self.entries.lock().await.remove(key);
            Ok(())
        }
    }

    struct NoopPreferenceRepository;

    #[async_trait]
    impl PreferenceRepository for NoopPreferenceRepository {
        async fn load(&self, _actor_id: &str) -> anyhow::Result<Option<Vec<ReportColumn>>> {
            Ok(None)
        }

        async fn save(&self, _actor_id: &str, _columns: &[ReportColumn]) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct NoopAccessLogSink;

    #[async_trait]
    impl AccessLogSink for NoopAccessLogSink {
        async fn record(&self, _entry: AccessLogEntry) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn test_config() -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            operators: Vec::new(),
            events_base_url: "http://127.0.0.1:1".to_string(),
            events_api_token: None,
            orders_base_url: "http://127.0.0.1:1".to_string(),
            orders_api_token: None,
            cache_ttl_seconds: 3600,
            csrf_secret: "test-secret".to_string(),
            preferences_path: String::new(),
            access_log_path: String::new(),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 5,
        }
    }

    fn gala_event() -> CalendarEvent {
        CalendarEvent {
            id: 10,
            title: "Summer Gala".to_string(),
            starts_at: "2025-06-15 19:00:00".to_string(),
        }
    }

    fn gala_order() -> Order {
        Order {
            id: 1,
            number: "#1".to_string(),
            edit_reference: "https://shop.example.test/orders/1/edit".to_string(),
            status: OrderStatus("processing".to_string()),
            created_at: "2025-06-01 12:00:00".to_string(),
            billing: Some(BillingDetails {
                first_name: "Pat".to_string(),
                last_name: "Buyer".to_string(),
                email: "pat@example.test".to_string(),
                phone: None,
            }),
            line_items: vec![TicketLineItem {
                event_id: 10,
                ticket_name: "General".to_string(),
                quantity: 2,
            }],
        }
    }

    fn test_state(
        events: Vec<CalendarEvent>,
        orders: HashMap<i64, Vec<Order>>,
        store: Arc<MapCacheStore>,
    ) -> (AppState, Arc<StubEventProvider>) {
        let event_provider = Arc::new(StubEventProvider {
            events,
            calls: AtomicUsize::new(0),
        });
        let order_provider = Arc::new(StubOrderProvider { orders });
        let aggregator = Arc::new(ReportAggregator::new(
            event_provider.clone(),
            order_provider.clone(),
        ));
        let state = AppState {
            config: test_config(),
            event_provider: event_provider.clone(),
            order_provider,
            cache_store: store,
            preference_repo: Arc::new(NoopPreferenceRepository),
            access_log: Arc::new(NoopAccessLogSink),
            aggregator,
            cache_keys: Arc::new(RwLock::new(HashSet::new())),
            metrics: Arc::new(Metrics::default()),
        };
        (state, event_provider)
    }

    fn date(value: &str) -> ReportDate {
        ReportDate::parse(value).expect("valid date")
    }

    #[tokio::test]
    async fn second_lookup_within_ttl_is_a_hit_with_identical_rows() {
        let mut orders = HashMap::new();
        orders.insert(10, vec![gala_order()]);
        let (state, events) = test_state(vec![gala_event()], orders, Arc::default());
        let date = date("2025-06-15");

        let (first_rows, first_hit) = get_or_compute(&state, &date, false).await.expect("first");
        let (second_rows, second_hit) = get_or_compute(&state, &date, false).await.expect("second");

        assert!(!first_hit);
        assert!(second_hit);
        assert_eq!(first_rows, second_rows);
        assert_eq!(events.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn force_refresh_recomputes_and_overwrites() {
        let mut orders = HashMap::new();
        orders.insert(10, vec![gala_order()]);
        let (state, events) = test_state(vec![gala_event()], orders, Arc::default());
        let date = date("2025-06-15");

        get_or_compute(&state, &date, false).await.expect("warm");
        let (_, hit) = get_or_compute(&state, &date, true).await.expect("refresh");

        assert!(!hit);
        assert_eq!(events.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidated_date_misses_on_next_lookup() {
        let mut orders = HashMap::new();
        orders.insert(10, vec![gala_order()]);
        let (state, _) = test_state(vec![gala_event()], orders, Arc::default());
        let date = date("2025-06-15");

        get_or_compute(&state, &date, false).await.expect("warm");
        let removed = invalidate(&state, Some(&date)).await;
        let (_, hit) = get_or_compute(&state, &date, false).await.expect("after");

        assert_eq!(removed, 1);
        assert!(!hit);
    }

    #[tokio::test]
    async fn blanket_invalidation_clears_every_indexed_key() {
        let mut orders = HashMap::new();
        orders.insert(10, vec![gala_order()]);
        let (state, _) = test_state(vec![gala_event()], orders, Arc::default());

        get_or_compute(&state, &date("2025-06-15"), false)
            .await
            .expect("first day");
        get_or_compute(&state, &date("2025-06-16"), false)
            .await
            .expect("second day");
        assert_eq!(state.cache_keys.read().await.len(), 2);

        let removed = invalidate(&state, None).await;
        assert_eq!(removed, 2);
        assert!(state.cache_keys.read().await.is_empty());

        let (_, hit) = get_or_compute(&state, &date("2025-06-15"), false)
            .await
            .expect("after");
        assert!(!hit);
    }

    #[tokio::test]
    async fn store_read_failure_degrades_to_direct_computation() {
        let mut orders = HashMap::new();
        orders.insert(10, vec![gala_order()]);
        let store = Arc::new(MapCacheStore {
            entries: Mutex::new(HashMap::new()),
            fail_reads: true,
        });
        let (state, _) = test_state(vec![gala_event()], orders, store);

        let (rows, hit) = get_or_compute(&state, &date("2025-06-15"), false)
            .await
            .expect("degraded");

        assert!(!hit);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticket_count, 2);
    }

    #[tokio::test]
    async fn empty_day_is_cached_and_served_as_a_hit() {
        let (state, _) = test_state(Vec::new(), HashMap::new(), Arc::default());
        let date = date("2025-06-15");

        let (first_rows, first_hit) = get_or_compute(&state, &date, false).await.expect("first");
        let (second_rows, second_hit) = get_or_compute(&state, &date, false).await.expect("second");

        assert!(first_rows.is_empty());
        assert!(!first_hit);
        assert!(second_rows.is_empty());
        assert!(second_hit);
    }

    #[test]
    fn cache_keys_are_prefixed_and_distinct_per_date() {
        let a = cache_key(&ReportDate::parse("2025-06-15").expect("valid"));
        let b = cache_key(&ReportDate::parse("2025-06-16").expect("valid"));
        assert!(a.starts_with(CACHE_KEY_PREFIX));
        assert_eq!(a.len(), CACHE_KEY_PREFIX.len() + 64);
        assert_ne!(a, b);
    }
}
