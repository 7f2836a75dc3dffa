//! Payment gateway client for the alms donation platform.
//!
//! This crate fronts the external card-processing service. Handlers talk to
//! it through the [`PaymentGateway`] trait; a [`GatewayConnector`] binds a
//! fresh handle to one client's merchant credentials per request, so
//! credential changes in the registry take effect without any cache
//! invalidation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   Gateway        │────▶│  GatewayConnector│
//! │   (HTTP)         │     │  (per-request)   │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │  PaymentGateway  │
//!                          │  (trait)         │
//!                          └────────┬─────────┘
//!                                   │ HTTPS
//!                          ┌────────▼─────────┐
//!                          │  Merchant API    │
//!                          │  (sandbox)       │
//!                          └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use alms_core::MerchantCredentials;
//! use alms_payments::{GatewayConnector, HttpGatewayConnector, SANDBOX_URL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = HttpGatewayConnector::new(SANDBOX_URL);
//!
//! let credentials = MerchantCredentials {
//!     merchant_id: "m-1".to_string(),
//!     public_key: "pk-1".to_string(),
//!     private_key: "sk-1".to_string(),
//! };
//!
//! let gateway = connector.connect(&credentials);
//! let token = gateway.generate_client_token().await?;
//! println!("client token: {}", token.client_token);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod gateway;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{GatewayError, Result};
pub use gateway::{
    GatewayConnector, HttpGateway, HttpGatewayConnector, PaymentGateway, SANDBOX_URL,
};
pub use types::{ChargeRequest, ClientToken, Customer, SaleOutcome, Transaction};

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockConnector, MockSale, MockToken};
