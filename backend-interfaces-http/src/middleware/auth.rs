// Bearer authentication and the capability gate

use axum::http::HeaderMap;

use backend_domain::{Actor, RuntimeConfig, MANAGE_EVENT_REPORTS};

/// Resolves the request to an authenticated actor holding the report
/// capability. Whether the token was unknown or the capability missing
/// is not distinguished for the caller.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> Option<Actor> {
    let token = extract_bearer(headers)?;
    let account = config
        .operators
        .iter()
        .find(|account| account.token == token)?;
    let actor = Actor {
        id: account.id.clone(),
        capabilities: account.capabilities.clone(),
    };
    if !actor.has_capability(MANAGE_EVENT_REPORTS) {
        return None;
    }
    Some(actor)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Remote address as reported by proxy headers, for the access log.
pub fn extract_origin(headers: &HeaderMap) -> String {
    for header in ["X-Forwarded-For", "X-Real-Ip"] {
        if let Some(value) = headers.get(header).and_then(|value| value.to_str().ok()) {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use backend_domain::OperatorAccount;

    use super::*;

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            operators: vec![
                OperatorAccount {
                    id: "box-office-lead".to_string(),
                    token: "lead-token".to_string(),
                    capabilities: vec![MANAGE_EVENT_REPORTS.to_string()],
                },
                OperatorAccount {
                    id: "intern".to_string(),
                    token: "intern-token".to_string(),
                    capabilities: Vec::new(),
                },
            ],
            events_base_url: "http://127.0.0.1:1".to_string(),
            events_api_token: None,
            orders_base_url: "http://127.0.0.1:1".to_string(),
            orders_api_token: None,
            cache_ttl_seconds: 3600,
            csrf_secret: "secret".to_string(),
            preferences_path: String::new(),
            access_log_path: String::new(),
            max_body_bytes: 1024,
            request_timeout_seconds: 5,
        }
    }

    fn headers_with_bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", token)).expect("header"),
        );
        headers
    }

    #[test]
    fn valid_token_with_capability_resolves_the_actor() {
        let actor = authorize(&config(), &headers_with_bearer("lead-token")).expect("actor");
        assert_eq!(actor.id, "box-office-lead");
    }

    #[test]
    fn token_without_the_capability_is_refused() {
        assert!(authorize(&config(), &headers_with_bearer("intern-token")).is_none());
    }

    #[test]
    fn unknown_or_missing_token_is_refused() {
        assert!(authorize(&config(), &headers_with_bearer("wrong")).is_none());
        assert!(authorize(&config(), &HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic abc"));
        assert!(authorize(&config(), &headers).is_none());
    }

    #[test]
    fn origin_prefers_the_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Forwarded-For",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(extract_origin(&headers), "203.0.113.7");
        assert_eq!(extract_origin(&HeaderMap::new()), "unknown");
    }
}
