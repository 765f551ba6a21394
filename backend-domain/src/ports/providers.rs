use async_trait::async_trait;

use crate::entities::{CalendarEvent, Order};
use crate::value_objects::ReportDate;

/// Upstream event catalog: events starting within one calendar day.
#[async_trait]
pub trait EventProvider: Send + Sync {
    async fn events_for_date(&self, date: &ReportDate) -> anyhow::Result<Vec<CalendarEvent>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Upstream order ledger: orders holding ticket line items for one event.
#[async_trait]
pub trait OrderProvider: Send + Sync {
    async fn orders_for_event(&self, event_id: i64) -> anyhow::Result<Vec<Order>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
