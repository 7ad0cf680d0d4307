//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (budgets > 0, addresses parse)
//! - Check URLs are usable HTTP endpoints
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use crate::config::schema::{ClientConfig, RelayConfig};

/// One semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(&mut errors, "server.bind_address", &config.server.bind_address);
    if !config.server.route.starts_with('/') {
        errors.push(ValidationError::new("server.route", "must start with '/'"));
    }
    check_budget(&mut errors, "server.request_timeout_ms", config.server.request_timeout_ms);

    check_http_url(&mut errors, "upstream.url", &config.upstream.url);
    if config.upstream.pair.trim().is_empty() {
        errors.push(ValidationError::new("upstream.pair", "must not be empty"));
    }
    check_budget(&mut errors, "upstream.timeout_ms", config.upstream.timeout_ms);

    check_budget(&mut errors, "store.insert_timeout_ms", config.store.insert_timeout_ms);
    if config.store.max_connections == 0 {
        errors.push(ValidationError::new("store.max_connections", "must be greater than 0"));
    }

    check_client(&mut errors, &config.client);

    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate only the `[client]` section, e.g. after command-line overrides.
pub fn validate_client(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_client(&mut errors, config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_client(errors: &mut Vec<ValidationError>, client: &ClientConfig) {
    check_http_url(errors, "client.service_url", &client.service_url);
    check_budget(errors, "client.timeout_ms", client.timeout_ms);
    if client.output_path.trim().is_empty() {
        errors.push(ValidationError::new("client.output_path", "must not be empty"));
    }
}

fn check_budget(errors: &mut Vec<ValidationError>, field: &'static str, value_ms: u64) {
    if value_ms == 0 {
        errors.push(ValidationError::new(field, "must be greater than 0"));
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if let Err(e) = value.parse::<SocketAddr>() {
        errors.push(ValidationError::new(field, format!("invalid address '{}': {}", value, e)));
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
        Ok(u) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", u.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            field,
            format!("invalid URL '{}': {}", value, e),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_violation() {
        let mut config = RelayConfig::default();
        config.server.route = "cotacao".into();
        config.server.request_timeout_ms = 0;
        config.upstream.url = "ftp://example.com/quote".into();
        config.client.service_url = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "server.route",
                "server.request_timeout_ms",
                "upstream.url",
                "client.service_url",
            ]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }

    #[test]
    fn test_client_overrides_are_checked() {
        assert!(validate_client(&ClientConfig::default()).is_ok());

        let client = ClientConfig {
            service_url: "ftp://x".into(),
            timeout_ms: 0,
            ..ClientConfig::default()
        };
        let errors = validate_client(&client).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["client.service_url", "client.timeout_ms"]);
    }
}
