//! Alms Gateway - donation processing HTTP service.
//!
//! This is the main entry point for the gateway service. It loads the
//! client registry, wires the payment gateway and pub/sub collaborators,
//! and serves the HTTP API.
//!
//! # Configuration
//!
//! All configuration comes from the environment:
//!
//! - `LISTEN_ADDR` - bind address (default `0.0.0.0:8080`)
//! - `CLIENTS_FILE` - path to the client registry JSON (default
//!   `clients.json`)
//! - `PAYMENT_GATEWAY_URL` - payment gateway base URL (default: the
//!   sandbox environment)
//! - `PUBSUB_URL` - broker base URL; unset disables donation notifications

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alms_core::ClientRegistry;
use alms_gateway::{create_router, AppState, GatewayConfig};
use alms_payments::HttpGatewayConnector;
use alms_pubsub::HttpPubsubClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,alms_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Alms Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let clients_file = std::env::var("CLIENTS_FILE").unwrap_or_else(|_| "clients.json".into());
    let gateway_url = std::env::var("PAYMENT_GATEWAY_URL")
        .unwrap_or_else(|_| alms_payments::SANDBOX_URL.into());
    let pubsub_url = std::env::var("PUBSUB_URL").ok();

    tracing::info!(
        listen_addr = %listen_addr,
        clients_file = %clients_file,
        gateway_url = %gateway_url,
        pubsub_url = ?pubsub_url,
        "Gateway configuration loaded"
    );

    // Load the static client registry
    let registry = Arc::new(ClientRegistry::from_path(&clients_file)?);
    tracing::info!(clients = registry.len(), "Client registry loaded");

    // Payment gateway connector (per-request handles over one pool)
    let connector = HttpGatewayConnector::new(gateway_url);

    // Optional notification broker
    let publisher = pubsub_url.map(|url| {
        tracing::info!(pubsub_url = %url, "Donation notifications enabled");
        Arc::new(HttpPubsubClient::new(url))
    });

    if publisher.is_none() {
        tracing::warn!("No PUBSUB_URL set - donation notifications disabled");
    }

    let config = GatewayConfig {
        listen_addr: listen_addr.clone(),
        ..GatewayConfig::default()
    };
    let state = AppState::new(registry, connector, publisher, config);

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
