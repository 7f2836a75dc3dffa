//! Topic-based messaging client for donation notifications.
//!
//! This crate fronts the external pub/sub broker. The gateway publishes a
//! notification after each approved donation; delivery is best effort and
//! never on the critical path of an HTTP response.
//!
//! Topic creation is idempotent through [`resolve_topic`]: creation is
//! always attempted and an "already exists" conflict is treated as success,
//! so the steady state costs a single network call.
//!
//! # Example
//!
//! ```no_run
//! use alms_pubsub::{resolve_topic, HttpPubsubClient, PubsubClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpPubsubClient::new("http://broker:8085");
//!
//! let topic = resolve_topic(&client, "donations-stroke").await?;
//! let ids = client
//!     .publish(&topic, &serde_json::json!({ "transaction_id": "t-1" }))
//!     .await?;
//! println!("published as {}", ids[0]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use client::{resolve_topic, HttpPubsubClient, MessageId, PubsubClient, TopicHandle};
pub use error::{PubsubError, Result};

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockCreate, MockPublish, MockPubsub};
