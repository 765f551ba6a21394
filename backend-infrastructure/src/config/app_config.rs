use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use backend_domain::{OperatorAccount, RuntimeConfig};

use crate::config::validation::validate_base_url;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub operators: Vec<OperatorAccount>,
    pub events_base_url: String,
    pub events_api_token: Option<String>,
    pub orders_base_url: String,
    pub orders_api_token: Option<String>,
    pub cache_ttl_seconds: u64,
    pub csrf_secret: Option<String>,
    pub preferences_path: String,
    pub access_log_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3310".to_string(),
            operators: Vec::new(),
            events_base_url: "http://127.0.0.1:8081".to_string(),
            events_api_token: None,
            orders_base_url: "http://127.0.0.1:8082".to_string(),
            orders_api_token: None,
            cache_ttl_seconds: 3600,
            csrf_secret: None,
            preferences_path: "./column_preferences.json".to_string(),
            access_log_path: "./access_log.jsonl".to_string(),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("BOXOFFICE_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(token) = &self.events_api_token {
            if token.trim().is_empty() {
                self.events_api_token = None;
            }
        }
        if let Some(token) = &self.orders_api_token {
            if token.trim().is_empty() {
                self.orders_api_token = None;
            }
        }
        self.events_base_url = self.events_base_url.trim().trim_end_matches('/').to_string();
        self.orders_base_url = self.orders_base_url.trim().trim_end_matches('/').to_string();
        self.operators = normalize_operators(std::mem::take(&mut self.operators));
        match &self.csrf_secret {
            Some(secret) if !secret.trim().is_empty() => {}
            _ => {
                // Tokens signed with a generated secret expire with the
                // process.
                warn!("csrf_secret not configured, generating one for this process");
                self.csrf_secret = Some(Uuid::new_v4().simple().to_string());
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.preferences_path = resolve_path(base, &self.preferences_path);
        self.access_log_path = resolve_path(base, &self.access_log_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_base_url("events_base_url", &self.events_base_url)?;
        validate_base_url("orders_base_url", &self.orders_base_url)?;
        if self.cache_ttl_seconds == 0 {
            return Err(anyhow!("cache_ttl_seconds must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        let mut seen_tokens = Vec::new();
        for operator in &self.operators {
            if operator.id.is_empty() {
                return Err(anyhow!("operator id must not be empty"));
            }
            if operator.token.is_empty() {
                return Err(anyhow!("operator '{}' has an empty token", operator.id));
            }
            if seen_tokens.contains(&operator.token) {
                return Err(anyhow!("operator tokens must be unique"));
            }
            seen_tokens.push(operator.token.clone());
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            operators: self.operators.clone(),
            events_base_url: self.events_base_url.clone(),
            events_api_token: self.events_api_token.clone(),
            orders_base_url: self.orders_base_url.clone(),
            orders_api_token: self.orders_api_token.clone(),
            cache_ttl_seconds: self.cache_ttl_seconds,
            csrf_secret: self.csrf_secret.clone().unwrap_or_default(),
            preferences_path: self.preferences_path.clone(),
            access_log_path: self.access_log_path.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("BOXOFFICE_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("BOXOFFICE_EVENTS_BASE_URL") {
            self.events_base_url = value;
        }
        if let Ok(value) = env::var("BOXOFFICE_EVENTS_API_TOKEN") {
            self.events_api_token = Some(value);
        }
        if let Ok(value) = env::var("BOXOFFICE_ORDERS_BASE_URL") {
            self.orders_base_url = value;
        }
        if let Ok(value) = env::var("BOXOFFICE_ORDERS_API_TOKEN") {
            self.orders_api_token = Some(value);
        }
        if let Ok(value) = env::var("BOXOFFICE_CACHE_TTL_SECONDS") {
            self.cache_ttl_seconds = value.parse().unwrap_or(self.cache_ttl_seconds);
        }
        if let Ok(value) = env::var("BOXOFFICE_CSRF_SECRET") {
            self.csrf_secret = Some(value);
        }
        if let Ok(value) = env::var("BOXOFFICE_PREFERENCES_PATH") {
            self.preferences_path = value;
        }
        if let Ok(value) = env::var("BOXOFFICE_ACCESS_LOG_PATH") {
            self.access_log_path = value;
        }
        if let Ok(value) = env::var("BOXOFFICE_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("BOXOFFICE_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn normalize_operators(operators: Vec<OperatorAccount>) -> Vec<OperatorAccount> {
    operators
        .into_iter()
        .map(|mut operator| {
            operator.id = operator.id.trim().to_string();
            operator.token = operator.token.trim().to_string();
            operator.capabilities = operator
                .capabilities
                .into_iter()
                .map(|capability| capability.trim().to_string())
                .filter(|capability| !capability.is_empty())
                .collect();
            operator
        })
        .collect()
}
