//! Bridge service backed by the local route configuration store.

use async_trait::async_trait;

use crate::bridge::store::{RouteConfigStore, RouteStoreError};
use crate::bridge::types::{BridgeTransferDirection, NetworkKind, RouteConfig};
use crate::services::{BridgeService, ServiceError, ServiceResult};

/// Serves route configuration from a `RouteConfigStore`.
#[derive(Clone)]
pub struct LocalBridgeService {
    store: RouteConfigStore,
}

impl LocalBridgeService {
    pub fn new(store: RouteConfigStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RouteConfigStore {
        &self.store
    }
}

#[async_trait]
impl BridgeService for LocalBridgeService {
    async fn retrieve_route_config(
        &self,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    ) -> ServiceResult<RouteConfig> {
        Ok(self.store.get(network, direction))
    }

    async fn update_route_config(&self, config: RouteConfig) -> ServiceResult<()> {
        self.store.update(config).map_err(store_error)
    }

    async fn reset_route_config(
        &self,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    ) -> ServiceResult<RouteConfig> {
        self.store.reset(network, direction).map_err(store_error)
    }
}

fn store_error(err: RouteStoreError) -> ServiceError {
    match err {
        RouteStoreError::Invalid(errors) => {
            let message = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ");
            ServiceError::Rejected(message)
        }
        RouteStoreError::Io(e) => ServiceError::Transport(e.to_string()),
    }
}
