//! REST API server exposing the dashboard view model

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::FilterQueryParams;
pub use routes::create_router;
pub use state::AppState;

use crate::dataset::DatasetGenerator;
use crate::view::ViewOptions;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// When the served dataset is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DataRefresh {
    /// Generate once at startup and serve the same data until regenerated
    #[default]
    #[serde(rename = "process")]
    PerProcess,
    /// Generate fresh data for every dashboard request
    #[serde(rename = "request")]
    PerRequest,
}

impl FromStr for DataRefresh {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "process" => Ok(DataRefresh::PerProcess),
            "request" => Ok(DataRefresh::PerRequest),
            other => Err(ConfigError::InvalidValue {
                key: "DASHBOARD_REFRESH",
                value: other.to_string(),
            }),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address (default: "127.0.0.1")
    pub host: String,
    /// Server port (default: 3000)
    pub port: u16,
    /// Seed for reproducible datasets (default: none, fresh entropy)
    pub seed: Option<u64>,
    /// Dataset lifecycle (default: per process)
    pub refresh: DataRefresh,
    /// Currency symbol for sales amounts (default: "¥")
    pub currency_symbol: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed: None,
            refresh: DataRefresh::PerProcess,
            currency_symbol: "¥".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new server configuration with default dataset settings
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        ServerConfig {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Reads configuration from `HOST`, `PORT`, `DASHBOARD_SEED`,
    /// `DASHBOARD_REFRESH` and `DASHBOARD_CURRENCY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults; set but invalid ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(seed) = lookup("DASHBOARD_SEED") {
            let seed = seed.trim();
            if !seed.is_empty() {
                config.seed = Some(seed.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "DASHBOARD_SEED",
                    value: seed.to_string(),
                })?);
            }
        }
        if let Some(refresh) = lookup("DASHBOARD_REFRESH") {
            config.refresh = refresh.parse()?;
        }
        if let Some(symbol) = lookup("DASHBOARD_CURRENCY") {
            config.currency_symbol = symbol;
        }

        Ok(config)
    }

    /// Dataset generator for this configuration.
    pub fn generator(&self) -> DatasetGenerator {
        match self.seed {
            Some(seed) => DatasetGenerator::with_seed(seed),
            None => DatasetGenerator::new(),
        }
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runs the API server
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Returns an error if the server fails to start or encounters a fatal error
///
/// # Example
/// ```rust,no_run
/// use sales_dashboard::server::{run_server, ServerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ServerConfig::default();
///     run_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG controls verbosity, e.g. RUST_LOG=sales_dashboard=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let state = Arc::new(AppState::new(
        config.generator(),
        config.refresh,
        config.view_options(),
    ));

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        seeded = config.seed.is_some(),
        refresh = ?config.refresh,
        "Server listening on http://{}",
        addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.seed, None);
        assert_eq!(config.refresh, DataRefresh::PerProcess);
        assert_eq!(config.currency_symbol, "¥");
    }

    #[test]
    fn test_config_reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DASHBOARD_SEED", "42"),
            ("DASHBOARD_REFRESH", "Request"),
            ("DASHBOARD_CURRENCY", "$"),
        ]))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.refresh, DataRefresh::PerRequest);
        assert_eq!(config.view_options().currency_symbol, "$");
        assert_eq!(config.generator().seed(), Some(42));
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "abc")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "PORT",
                value: "abc".to_string()
            }
        );

        let err =
            ServerConfig::from_lookup(lookup_from(&[("DASHBOARD_REFRESH", "hourly")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "DASHBOARD_REFRESH", .. }
        ));
    }
}
