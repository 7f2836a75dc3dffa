//! HTTP gateway for donation processing.
//!
//! This crate provides the public-facing API that fronts the payment
//! gateway and the notification broker. It handles:
//!
//! - Client token minting for browser-side payment forms
//! - Donation submission with request validation
//! - Best-effort donation notifications over pub/sub
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients                              │
//! │                   (payment forms, HTTP)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       alms-gateway                          │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐   │
//! │  │ Validators  │ │   Router    │ │   Notification      │   │
//! │  │  (core)     │ │  + Handlers │ │   (fire-and-forget) │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┼──────────────┐
//!               ▼              ▼              ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │ Registry │   │ Payment  │   │  Pub/Sub │
//!        │ (static) │   │ Gateway  │   │  Broker  │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use alms_core::ClientRegistry;
//! use alms_gateway::{create_router, AppState, GatewayConfig};
//! use alms_payments::HttpGatewayConnector;
//! use alms_pubsub::HttpPubsubClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ClientRegistry::from_path("clients.json")?);
//! let connector = HttpGatewayConnector::new(alms_payments::SANDBOX_URL);
//! let publisher = Some(Arc::new(HttpPubsubClient::new("http://broker:8085")));
//!
//! let state = AppState::new(registry, connector, publisher, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod notify;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
