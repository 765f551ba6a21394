// In-memory TTL blob store

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use backend_domain::ports::CacheStore;

struct CacheSlot {
    value: String,
    expires_at: Instant,
}

#[derive(Default)]
pub struct InMemoryCacheStore {
    slots: RwLock<HashMap<String, CacheSlot>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let now = Instant::now();
        {
            let slots = self.slots.read().await;
            match slots.get(key) {
                Some(slot) if slot.expires_at > now => return Ok(Some(slot.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // Expired: drop the slot before reporting the miss.
        let mut slots = self.slots.write().await;
        if let Some(slot) = slots.get(key) {
            if slot.expires_at <= now {
                slots.remove(key);
            }
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()> {
        let slot = CacheSlot {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.slots.write().await.insert(key.to_string(), slot);
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stored_value_is_returned_before_expiry() {
        let store = InMemoryCacheStore::new();
        store
            .put("k", "v", Duration::from_secs(60))
            .await
            .expect("put");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
    }

    #[tokio::test]
    async fn expired_value_is_a_miss() {
        let store = InMemoryCacheStore::new();
        store
            .put("k", "v", Duration::from_millis(20))
            .await
            .expect("put");
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.get("k").await.expect("get"), None);
    }

    #[tokio::test]
    async fn put_overwrites_the_whole_entry() {
        let store = InMemoryCacheStore::new();
        store
            .put("k", "old", Duration::from_secs(60))
            .await
            .expect("put");
        store
            .put("k", "new", Duration::from_secs(60))
            .await
            .expect("overwrite");
        assert_eq!(store.get("k").await.expect("get"), Some("new".to_string()));
    }

    #[tokio::test]
    async fn delete_removes_the_entry_and_is_idempotent() {
        let store = InMemoryCacheStore::new();
        store
            .put("k", "v", Duration::from_secs(60))
            .await
            .expect("put");
        store.delete("k").await.expect("delete");
        store.delete("k").await.expect("delete again");
        assert_eq!(store.get("k").await.expect("get"), None);
    }
}
