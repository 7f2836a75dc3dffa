//! Per-client identity and configuration types.
//!
//! Every caller of the donation API identifies itself with a client id; the
//! registry maps that id to the merchant credentials and settings used on
//! its behalf.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A client (tenant) identifier, e.g. `"stroke-research-fund"`.
///
/// The id is an opaque string key into the client registry. It carries no
/// structure; an id is valid exactly when the registry has an entry for it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Create a new `ClientId`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ClientId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({})", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credentials for the payment gateway's merchant API.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantCredentials {
    /// Merchant account identifier at the gateway.
    pub merchant_id: String,
    /// Public API key.
    pub public_key: String,
    /// Private API key.
    pub private_key: String,
}

/// Per-client configuration bundle.
///
/// Immutable for the process lifetime; absence of an entry for a given id
/// means the client is invalid.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Validated display name, used as the company on charges.
    pub display_name: String,
    /// Gateway credentials for this client's merchant account.
    #[serde(flatten)]
    pub credentials: MerchantCredentials,
    /// Donation-notification topic; absent disables notifications for the
    /// client.
    #[serde(default)]
    pub topic_name: Option<String>,
}
