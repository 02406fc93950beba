//! Route configuration storage and persistence.

use dashmap::DashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::bridge::defaults::default_route_config;
use crate::bridge::types::{BridgeTransferDirection, NetworkKind, RouteConfig};
use crate::bridge::validation::{validate_route_config, RouteConfigError};
use crate::observability::metrics;

type RouteKey = (NetworkKind, BridgeTransferDirection);

/// Why a route configuration change was not applied.
#[derive(Debug, Error)]
pub enum RouteStoreError {
    #[error("invalid route configuration: {}", join_errors(.0))]
    Invalid(Vec<RouteConfigError>),

    #[error("failed to persist route configuration: {0}")]
    Io(#[from] std::io::Error),
}

fn join_errors(errors: &[RouteConfigError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
}

/// Thread-safe store of user-edited route configurations.
///
/// Routes without an override fall back to the built-in defaults.
#[derive(Clone, Default)]
pub struct RouteConfigStore {
    inner: Arc<DashMap<RouteKey, RouteConfig>>,
    persistence_path: Option<String>,
}

impl RouteConfigStore {
    /// Create an empty store.
    pub fn new(persistence_path: Option<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load overrides from a JSON file if it exists.
    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let store = Self::new(Some(path.to_string()));
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let configs: Vec<RouteConfig> = serde_json::from_reader(reader)?;

            for config in configs {
                store.inner.insert((config.network, config.direction), config);
            }
            tracing::info!(path = %path, routes = store.inner.len(), "Loaded route configuration overrides");
        }
        Ok(store)
    }

    /// Write all overrides to the persistence file, if one is configured.
    pub fn save_to_file(&self) -> std::io::Result<()> {
        if let Some(path) = &self.persistence_path {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);

            let mut configs: Vec<RouteConfig> = self.inner.iter().map(|r| r.value().clone()).collect();
            configs.sort_by_key(|c| (c.network, c.direction));

            serde_json::to_writer_pretty(writer, &configs)?;
            tracing::debug!(path = %path, routes = configs.len(), "Saved route configuration overrides");
        }
        Ok(())
    }

    /// Effective configuration of a route: the override or the default.
    pub fn get(&self, network: NetworkKind, direction: BridgeTransferDirection) -> RouteConfig {
        self.inner
            .get(&(network, direction))
            .map(|r| r.value().clone())
            .unwrap_or_else(|| default_route_config(network, direction))
    }

    /// Whether the route currently carries a user override.
    pub fn is_overridden(&self, network: NetworkKind, direction: BridgeTransferDirection) -> bool {
        self.inner.contains_key(&(network, direction))
    }

    /// Validate and store an edited configuration, then persist.
    ///
    /// The in-memory override is rolled back when persisting fails.
    pub fn update(&self, config: RouteConfig) -> Result<(), RouteStoreError> {
        validate_route_config(&config).map_err(RouteStoreError::Invalid)?;

        let direction = config.direction;
        let network = config.network;
        let previous = self.inner.insert((network, direction), config);

        if let Err(e) = self.save_to_file() {
            match previous {
                Some(previous) => {
                    self.inner.insert((network, direction), previous);
                }
                None => {
                    self.inner.remove(&(network, direction));
                }
            }
            tracing::error!(error = %e, "Failed to persist route configuration");
            return Err(RouteStoreError::Io(e));
        }

        metrics::record_route_config_update(direction.as_str());
        tracing::info!(direction = %direction, network = %network, "Route configuration updated");
        Ok(())
    }

    /// Drop the override of a route and return the default now in effect.
    pub fn reset(
        &self,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    ) -> Result<RouteConfig, RouteStoreError> {
        let removed = self.inner.remove(&(network, direction));
        if let Err(e) = self.save_to_file() {
            if let Some((key, previous)) = removed {
                self.inner.insert(key, previous);
            }
            tracing::error!(error = %e, "Failed to persist route configuration");
            return Err(RouteStoreError::Io(e));
        }
        tracing::info!(direction = %direction, network = %network, "Route configuration reset");
        Ok(default_route_config(network, direction))
    }

    /// Number of overridden routes.
    pub fn count(&self) -> usize {
        self.inner.len()
    }
}
