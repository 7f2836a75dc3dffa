//! The static client registry.
//!
//! The registry is loaded once at process start and injected into the
//! handler state; the mapping is read-only for the process lifetime, so
//! concurrent requests share it without locking.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::client::{ClientConfig, ClientId};
use crate::error::Result;

/// Inclusive bounds on an accepted donation amount.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AmountLimits {
    /// Smallest accepted amount.
    #[serde(default = "AmountLimits::default_min")]
    pub min: f64,
    /// Largest accepted amount.
    #[serde(default = "AmountLimits::default_max")]
    pub max: f64,
}

impl AmountLimits {
    const fn default_min() -> f64 {
        1.0
    }

    const fn default_max() -> f64 {
        1_000_000.0
    }
}

impl Default for AmountLimits {
    fn default() -> Self {
        Self {
            min: Self::default_min(),
            max: Self::default_max(),
        }
    }
}

/// Immutable mapping from [`ClientId`] to [`ClientConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRegistry {
    /// Donation amount bounds applied to every client.
    #[serde(default)]
    limits: AmountLimits,
    /// Per-client configuration, keyed by client id.
    clients: HashMap<ClientId, ClientConfig>,
}

impl ClientRegistry {
    /// Build a registry from already-parsed entries.
    pub fn from_clients<I>(limits: AmountLimits, clients: I) -> Self
    where
        I: IntoIterator<Item = (ClientId, ClientConfig)>,
    {
        Self {
            limits,
            clients: clients.into_iter().collect(),
        }
    }

    /// Parse a registry from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or has the wrong
    /// shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Look up a client's configuration.
    #[must_use]
    pub fn get(&self, client_id: &str) -> Option<&ClientConfig> {
        self.clients.get(client_id)
    }

    /// Whether the registry has an entry for the given id.
    #[must_use]
    pub fn contains(&self, client_id: &str) -> bool {
        self.clients.contains_key(client_id)
    }

    /// The configured donation amount bounds.
    #[must_use]
    pub const fn limits(&self) -> &AmountLimits {
        &self.limits
    }

    /// Number of configured clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
