//! Configuration loading and the injected application context

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Process-level configuration.
///
/// Every field has a default so a missing or partial YAML file still yields a
/// working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Identifier stamped into log events
    pub service_id: String,

    /// URI prefix the transport layer mounts the API under
    pub base_path: String,

    /// Default page size for list operations
    pub page_offset: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_id: "dev-book_status-api".to_string(),
            base_path: "/v1".to_string(),
            page_offset: 20,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Context handle passed into every access-layer value.
///
/// Owned by the process entry point and injected explicitly; no operation
/// reaches for global mutable state.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub config: ServiceConfig,
}

impl AppContext {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` level. Call once from the process entry point.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
