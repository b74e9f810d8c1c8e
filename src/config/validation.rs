//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0)
//! - Check addresses and log filters parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("`{}` is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::new(
            "listener.max_connections",
            "must be greater than zero",
        ));
    } else if config.listener.max_connections > Semaphore::MAX_PERMITS {
        errors.push(ValidationError::new(
            "listener.max_connections",
            format!("must be at most {}", Semaphore::MAX_PERMITS),
        ));
    }

    if config.storage.root.as_os_str().is_empty() {
        errors.push(ValidationError::new("storage.root", "must not be empty"));
    }
    for (field, mode) in [
        ("storage.create_mode", config.storage.create_mode),
        ("storage.append_mode", config.storage.append_mode),
    ] {
        if mode > 0o7777 {
            errors.push(ValidationError::new(field, format!("{mode:o} is not a permission mode")));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    if let Err(e) = EnvFilter::try_new(&config.observability.log_level) {
        errors.push(ValidationError::new("observability.log_level", e.to_string()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "`{}` is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "localhost".to_string();
        config.listener.max_connections = 0;
        config.timeouts.request_secs = 0;
        config.storage.root = "".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "listener.max_connections",
                "storage.root",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_max_connections_upper_bound() {
        let mut config = ServerConfig::default();
        config.listener.max_connections = Semaphore::MAX_PERMITS;
        assert!(validate_config(&config).is_ok());

        config.listener.max_connections = usize::MAX;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "listener.max_connections");
    }

    #[test]
    fn test_storage_modes_checked() {
        let mut config = ServerConfig::default();
        config.storage.append_mode = 0o17777;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "storage.append_mode");
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }
}
