// Order ledger HTTP adapter

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use backend_domain::ports::OrderProvider;
use backend_domain::{BillingDetails, Order, OrderStatus, TicketLineItem};

use crate::providers::codec::normalize_timestamp;

pub struct HttpOrderProvider {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpOrderProvider {
    pub fn new(base_url: &str, api_token: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[derive(Debug, Deserialize)]
struct OrderDto {
    id: i64,
    #[serde(default)]
    number: String,
    status: String,
    created_at: String,
    #[serde(default)]
    edit_url: String,
    #[serde(default)]
    billing: Option<BillingDto>,
    #[serde(default)]
    line_items: Vec<LineItemDto>,
}

#[derive(Debug, Deserialize)]
struct BillingDto {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LineItemDto {
    event_id: i64,
    #[serde(default)]
    ticket_name: String,
    quantity: i64,
}

impl OrderDto {
    fn into_entity(self) -> Order {
        Order {
            id: self.id,
            number: self.number,
            edit_reference: self.edit_url,
            status: normalize_status(&self.status),
            created_at: normalize_timestamp(&self.created_at),
            billing: self.billing.and_then(map_billing),
            line_items: self
                .line_items
                .into_iter()
                .map(|item| TicketLineItem {
                    event_id: item.event_id,
                    ticket_name: item.ticket_name,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// The ledger reports status slugs with an internal `wc-` prefix on
/// some endpoints; the domain works with the bare slug.
fn normalize_status(raw: &str) -> OrderStatus {
    let slug = raw.trim().trim_start_matches("wc-").to_lowercase();
    OrderStatus(slug)
}

/// A billing block with no name and no email cannot identify the
/// purchaser; the aggregator treats it as unresolved.
fn map_billing(dto: BillingDto) -> Option<BillingDetails> {
    if dto.first_name.trim().is_empty()
        && dto.last_name.trim().is_empty()
        && dto.email.trim().is_empty()
    {
        return None;
    }
    Some(BillingDetails {
        first_name: dto.first_name,
        last_name: dto.last_name,
        email: dto.email,
        phone: dto.phone.filter(|phone| !phone.trim().is_empty()),
    })
}

#[async_trait]
impl OrderProvider for HttpOrderProvider {
    async fn orders_for_event(&self, event_id: i64) -> Result<Vec<Order>> {
        let response = self
            .get(&format!("{}/orders", self.base_url))
            .query(&[("event_id", event_id.to_string().as_str())])
            .send()
            .await?
            .error_for_status()?;
        let orders: Vec<OrderDto> = response.json().await?;
        Ok(orders.into_iter().map(OrderDto::into_entity).collect())
    }

    async fn ping(&self) -> Result<()> {
        self.get(&format!("{}/orders", self.base_url))
            .query(&[("per_page", "1")])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
