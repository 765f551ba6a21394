// Daily report aggregation
// Joins the event catalog with the order ledger for one calendar day

use std::sync::Arc;

use futures_util::future::join_all;

use crate::entities::{
    AggregationOutcome,
    CalendarEvent,
    Order,
    OrderRow,
    SkipReason,
    SkippedFetch,
};
use crate::ports::{EventProvider, OrderProvider};
use crate::value_objects::ReportDate;

pub struct ReportAggregator {
    event_provider: Arc<dyn EventProvider>,
    order_provider: Arc<dyn OrderProvider>,
}

enum RowBuild {
    Row(Box<OrderRow>),
    NoValidItems,
    MissingBilling,
}

impl ReportAggregator {
    pub fn new(
        event_provider: Arc<dyn EventProvider>,
        order_provider: Arc<dyn OrderProvider>,
    ) -> Self {
        Self {
            event_provider,
            order_provider,
        }
    }

    /// Joins the day's events with their orders and flattens to one row
    /// per (order, event) pair. Failure of the initial event listing is
    /// the only fatal error; everything downstream degrades into typed
    /// skips.
    pub async fn aggregate(&self, date: &ReportDate) -> anyhow::Result<AggregationOutcome> {
        let mut events = self.event_provider.events_for_date(date).await?;
        // The provider is asked for the day window, but the inclusive-day
        // invariant is enforced here.
        events.retain(|event| event.starts_at.starts_with(date.as_str()));
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));

        let lookups = events
            .iter()
            .map(|event| self.order_provider.orders_for_event(event.id));
        let fetched = join_all(lookups).await;

        let mut rows = Vec::new();
        let mut skipped = Vec::new();
        for (event, result) in events.iter().zip(fetched) {
            match result {
                Ok(orders) => {
                    for order in &orders {
                        match build_row(event, order) {
                            RowBuild::Row(row) => rows.push(*row),
                            RowBuild::NoValidItems => {}
                            RowBuild::MissingBilling => skipped.push(SkippedFetch {
                                event_id: event.id,
                                order_id: Some(order.id),
                                reason: SkipReason::MissingBilling,
                            }),
                        }
                    }
                }
                Err(err) => skipped.push(SkippedFetch {
                    event_id: event.id,
                    order_id: None,
                    reason: SkipReason::OrderLookupFailed(err.to_string()),
                }),
            }
        }

        // Canonical timestamp strings compare lexicographically in
        // chronological order.
        rows.sort_by(|a, b| {
            a.event_start
                .cmp(&b.event_start)
                .then_with(|| a.order_created_at.cmp(&b.order_created_at))
        });

        Ok(AggregationOutcome { rows, skipped })
    }
}

fn build_row(event: &CalendarEvent, order: &Order) -> RowBuild {
    let valid_items: Vec<_> = order
        .line_items
        .iter()
        .filter(|item| item.is_valid_for(event.id))
        .collect();
    if valid_items.is_empty() {
        return RowBuild::NoValidItems;
    }
    let Some(billing) = &order.billing else {
        return RowBuild::MissingBilling;
    };

    let ticket_count = valid_items.iter().map(|item| item.quantity).sum();
    let ticket_summary = valid_items
        .iter()
        .map(|item| format!("{} x {}", item.ticket_name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ");

    RowBuild::Row(Box::new(OrderRow {
        event_id: event.id,
        event_title: event.title.clone(),
        event_start: event.starts_at.clone(),
        order_id: order.id,
        order_number: order.number.clone(),
        order_edit_reference: order.edit_reference.clone(),
        purchaser_name: billing.purchaser_name(),
        purchaser_email: billing.email.clone(),
        purchaser_phone: billing.phone.clone(),
        order_status: order.status.as_str().to_string(),
        order_status_label: order.status.label(),
        ticket_count,
        ticket_summary,
        order_created_at: order.created_at.clone(),
    }))
}
