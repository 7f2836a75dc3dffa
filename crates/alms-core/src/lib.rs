//! Core types and validation for the alms donation platform.
//!
//! This crate provides the pieces shared by the HTTP gateway and the
//! collaborator clients:
//!
//! - **Client registry**: immutable per-client credential bundles keyed by
//!   [`ClientId`], loaded once at process start
//! - **Validators**: pure predicate functions over incoming request fields
//! - **Error types**: configuration-loading errors
//!
//! # Example
//!
//! ```
//! use alms_core::{ClientRegistry, validate};
//!
//! let registry = ClientRegistry::from_json_str(r#"{
//!     "clients": {
//!         "stroke-research-fund": {
//!             "display_name": "Stroke Research Fund",
//!             "merchant_id": "m-1",
//!             "public_key": "pk-1",
//!             "private_key": "sk-1"
//!         }
//!     }
//! }"#).unwrap();
//!
//! assert!(validate::is_valid_client(&registry, Some("stroke-research-fund")));
//! assert!(!validate::is_valid_client(&registry, Some("unknown")));
//! assert!(validate::is_amount_valid(Some("10.95"), registry.limits()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod registry;
pub mod validate;

pub use client::{ClientConfig, ClientId, MerchantCredentials};
pub use error::{ConfigError, Result};
pub use registry::{AmountLimits, ClientRegistry};
