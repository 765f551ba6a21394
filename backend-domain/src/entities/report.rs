// Report entities
// Flattened output rows plus the per-request view envelope

use serde::{Deserialize, Serialize};

use crate::entities::preference::ReportColumn;

/// One row of the daily report: a single (order, event) pairing. An
/// order holding tickets for several events on the same day appears
/// once per event, counting only that event's line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    pub event_id: i64,
    pub event_title: String,
    pub event_start: String,
    pub order_id: i64,
    pub order_number: String,
    pub order_edit_reference: String,
    pub purchaser_name: String,
    pub purchaser_email: String,
    pub purchaser_phone: Option<String>,
    pub order_status: String,
    pub order_status_label: String,
    pub ticket_count: i64,
    pub ticket_summary: String,
    pub order_created_at: String,
}

/// Aggregation result: the rows that made it, and what was dropped on
/// the way. Skips carry typed reasons so callers can log, count, or
/// assert on them instead of parsing diagnostics.
#[derive(Debug, Clone)]
pub struct AggregationOutcome {
    pub rows: Vec<OrderRow>,
    pub skipped: Vec<SkippedFetch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFetch {
    pub event_id: i64,
    pub order_id: Option<i64>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The order provider failed for this event; its orders are absent
    /// from the report.
    OrderLookupFailed(String),
    /// The order could not be resolved to full billing detail.
    MissingBilling,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::OrderLookupFailed(detail) => {
                write!(f, "order lookup failed: {}", detail)
            }
            SkipReason::MissingBilling => f.write_str("missing billing details"),
        }
    }
}

/// What the request handler returns for one report read.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub date: String,
    pub formatted_date: String,
    pub was_cache_hit: bool,
    pub visible_columns: Vec<ReportColumn>,
    pub rows: Vec<OrderRow>,
}
