use std::sync::Arc;

use formsight_gateway::GatewayClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`) and read-only;
/// nothing is mutated across requests.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the external vision-model gateway.
    pub gateway: Arc<GatewayClient>,
}

impl AppState {
    /// Build state from configuration, constructing the gateway client with
    /// its per-attempt timeout.
    pub fn from_config(config: ServerConfig) -> Self {
        let gateway = GatewayClient::new(
            config.gateway.url.clone(),
            config.gateway.model.clone(),
            std::time::Duration::from_secs(config.gateway.request_timeout_secs),
        );
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        }
    }
}
