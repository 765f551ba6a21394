use std::time::Duration;

use async_trait::async_trait;

use crate::entities::ReportColumn;

/// Generic key/value blob store with per-entry TTL. The application
/// layer owns key derivation and keeps its own index of written keys.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// Per-actor column visibility preference, overwritten wholesale on
/// each save.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn load(&self, actor_id: &str) -> anyhow::Result<Option<Vec<ReportColumn>>>;
    async fn save(&self, actor_id: &str, columns: &[ReportColumn]) -> anyhow::Result<()>;
}
