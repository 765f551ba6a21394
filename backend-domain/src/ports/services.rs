use async_trait::async_trait;

use crate::entities::AccessLogEntry;

/// Append-only audit trail. Entries are never read back by this
/// system.
#[async_trait]
pub trait AccessLogSink: Send + Sync {
    async fn record(&self, entry: AccessLogEntry) -> anyhow::Result<()>;
}
