// Event catalog HTTP adapter

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use backend_domain::ports::EventProvider;
use backend_domain::{CalendarEvent, ReportDate};

use crate::providers::codec::normalize_timestamp;

pub struct HttpEventProvider {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpEventProvider {
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
struct EventDto {
    id: i64,
    #[serde(default)]
    title: String,
    start_date: String,
}

impl EventDto {
    fn into_entity(self) -> CalendarEvent {
        CalendarEvent {
            id: self.id,
            title: self.title,
            starts_at: normalize_timestamp(&self.start_date),
        }
    }
}

#[async_trait]
impl EventProvider for HttpEventProvider {
    async fn events_for_date(&self, date: &ReportDate) -> Result<Vec<CalendarEvent>> {
        let response = self
            .get(&format!("{}/events", self.base_url))
            .query(&[
                ("starts_after", date.day_start().as_str()),
                ("starts_before", date.day_end().as_str()),
                ("orderby", "start_date"),
                ("order", "asc"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let events: Vec<EventDto> = response.json().await?;
        Ok(events.into_iter().map(EventDto::into_entity).collect())
    }

    async fn ping(&self) -> Result<()> {
        self.get(&format!("{}/events", self.base_url))
            .query(&[("per_page", "1")])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
