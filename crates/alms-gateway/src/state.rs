//! Gateway application state.
//!
//! The state holds everything the request handlers need: the immutable
//! client registry, the payment gateway connector, and the optional
//! notification publisher.

use std::sync::Arc;

use alms_core::{ClientConfig, ClientRegistry};
use alms_payments::{GatewayConnector, PaymentGateway};
use alms_pubsub::PubsubClient;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
pub struct AppState<C, P>
where
    C: GatewayConnector,
    P: PubsubClient,
{
    /// Immutable per-client configuration, loaded once at startup.
    pub registry: Arc<ClientRegistry>,
    /// Factory for per-request payment gateway handles.
    pub connector: C,
    /// Messaging client for donation notifications; `None` disables them.
    pub publisher: Option<Arc<P>>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<C, P> AppState<C, P>
where
    C: GatewayConnector,
    P: PubsubClient,
{
    /// Create a new application state.
    #[must_use]
    pub fn new(
        registry: Arc<ClientRegistry>,
        connector: C,
        publisher: Option<Arc<P>>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            registry,
            connector,
            publisher,
            config,
        }
    }

    /// Look up a client's configuration.
    #[must_use]
    pub fn client(&self, client_id: &str) -> Option<&ClientConfig> {
        self.registry.get(client_id)
    }

    /// Resolve the client's credentials and bind a gateway handle to them.
    ///
    /// Handlers validate the client id before calling this; an unknown id
    /// here is a handler bug, surfaced as `None` rather than a panic. The
    /// handle is rebuilt on every call, so nothing credential-shaped
    /// survives the request.
    #[must_use]
    pub fn load_gateway(&self, client_id: &str) -> Option<Box<dyn PaymentGateway>> {
        let client = self.registry.get(client_id)?;
        tracing::debug!(client_id = %client_id, "Loading gateway configuration for client");
        Some(self.connector.connect(&client.credentials))
    }
}

impl<C, P> Clone for AppState<C, P>
where
    C: GatewayConnector + Clone,
    P: PubsubClient,
{
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            connector: self.connector.clone(),
            publisher: self.publisher.clone(),
            config: self.config.clone(),
        }
    }
}
