//! Telemetry initialization.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Service name attached to the startup event.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "blogpost-api".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            service_name: std::env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "blogpost-api".to_string()),
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,blogpost_infra=debug"));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
}
