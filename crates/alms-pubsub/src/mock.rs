//! Scripted broker for notification tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{MessageId, PubsubClient, TopicHandle};
use crate::error::{PubsubError, Result};

/// Canned response for `create_topic`.
#[derive(Debug, Clone)]
pub enum MockCreate {
    /// The topic is created.
    Created,
    /// The topic already exists (conflict).
    AlreadyExists,
    /// Fail with this status and message.
    Fail {
        /// HTTP-ish status carried on the error.
        status: u16,
        /// Error message carried on the error.
        message: String,
    },
}

/// Canned response for `publish`.
#[derive(Debug, Clone)]
pub enum MockPublish {
    /// Succeed with these message ids.
    Ids(Vec<String>),
    /// Fail with this error text.
    Fail(String),
}

struct MockInner {
    create: Mutex<MockCreate>,
    publish: Mutex<MockPublish>,
    published: Mutex<Vec<(String, serde_json::Value)>>,
}

/// Broker that replays scripted outcomes and records published messages.
#[derive(Clone)]
pub struct MockPubsub {
    inner: Arc<MockInner>,
}

impl MockPubsub {
    /// Create a broker that creates every topic and publishes with id
    /// `"mock-message-1"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockInner {
                create: Mutex::new(MockCreate::Created),
                publish: Mutex::new(MockPublish::Ids(vec!["mock-message-1".to_string()])),
                published: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Script the `create_topic` outcome.
    #[must_use]
    pub fn with_create(self, create: MockCreate) -> Self {
        *self.inner.create.lock() = create;
        self
    }

    /// Script the `publish` outcome.
    #[must_use]
    pub fn with_publish(self, publish: MockPublish) -> Self {
        *self.inner.publish.lock() = publish;
        self
    }

    /// Messages published so far, as `(topic, message)` pairs.
    #[must_use]
    pub fn published(&self) -> Vec<(String, serde_json::Value)> {
        self.inner.published.lock().clone()
    }
}

impl Default for MockPubsub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PubsubClient for MockPubsub {
    async fn create_topic(&self, name: &str) -> Result<TopicHandle> {
        match self.inner.create.lock().clone() {
            MockCreate::Created => Ok(TopicHandle::new(name)),
            MockCreate::AlreadyExists => Err(PubsubError::TopicExists(name.to_string())),
            MockCreate::Fail { status, message } => Err(PubsubError::Api { status, message }),
        }
    }

    async fn publish(
        &self,
        topic: &TopicHandle,
        message: &serde_json::Value,
    ) -> Result<Vec<MessageId>> {
        match self.inner.publish.lock().clone() {
            MockPublish::Ids(ids) => {
                self.inner
                    .published
                    .lock()
                    .push((topic.name().to_string(), message.clone()));
                Ok(ids.into_iter().map(MessageId::new).collect())
            }
            MockPublish::Fail(message) => Err(PubsubError::Transport(message)),
        }
    }
}
