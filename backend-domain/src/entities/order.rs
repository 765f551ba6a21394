// Order entities
// Shapes returned by the order provider for one event

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub number: String,
    /// Opaque link into the commerce system's admin UI.
    pub edit_reference: String,
    pub status: OrderStatus,
    /// Creation timestamp in the canonical form `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
    pub billing: Option<BillingDetails>,
    pub line_items: Vec<TicketLineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl BillingDetails {
    pub fn purchaser_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketLineItem {
    pub event_id: i64,
    pub ticket_name: String,
    pub quantity: i64,
}

impl TicketLineItem {
    /// A line item counts toward an event only when it belongs to that
    /// event and carries a positive quantity.
    pub fn is_valid_for(&self, event_id: i64) -> bool {
        self.event_id == event_id && self.quantity > 0
    }
}

/// Order status slug as reported by the provider. The set is open;
/// well-known slugs get proper display labels, anything else is
/// capitalized as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatus(pub String);

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn label(&self) -> String {
        match self.0.as_str() {
            "pending" => "Pending payment".to_string(),
            "processing" => "Processing".to_string(),
            "on-hold" => "On hold".to_string(),
            "completed" => "Completed".to_string(),
            "cancelled" => "Cancelled".to_string(),
            "refunded" => "Refunded".to_string(),
            "failed" => "Failed".to_string(),
            other => capitalize(other),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
