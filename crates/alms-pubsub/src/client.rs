//! HTTP client for the pub/sub broker's REST API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{PubsubError, Result};

/// Handle to a named topic, either freshly created or already existing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHandle {
    name: String,
}

impl TopicHandle {
    /// Create a handle for the given topic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The topic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Identifier the broker assigned to a published message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Create a message id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operations the pub/sub broker exposes.
#[async_trait]
pub trait PubsubClient: Send + Sync {
    /// Create a topic.
    ///
    /// # Errors
    ///
    /// Returns [`PubsubError::TopicExists`] if the topic already exists,
    /// or another error if the HTTP request fails.
    async fn create_topic(&self, name: &str) -> Result<TopicHandle>;

    /// Publish a JSON message to a topic, returning the assigned ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the broker rejects it.
    async fn publish(
        &self,
        topic: &TopicHandle,
        message: &serde_json::Value,
    ) -> Result<Vec<MessageId>>;
}

/// Return an existing or newly created topic.
///
/// Creation is always attempted first; an "already exists" conflict is
/// treated as success and resolved to a handle by name, with no separate
/// existence check. Other errors propagate unchanged and are not retried.
///
/// # Errors
///
/// Returns any `create_topic` error other than the conflict.
pub async fn resolve_topic<C>(client: &C, name: &str) -> Result<TopicHandle>
where
    C: PubsubClient + ?Sized,
{
    match client.create_topic(name).await {
        Ok(topic) => Ok(topic),
        Err(PubsubError::TopicExists(_)) => Ok(TopicHandle::new(name)),
        Err(err) => Err(err),
    }
}

/// REST client for the broker.
#[derive(Debug, Clone)]
pub struct HttpPubsubClient {
    http: reqwest::Client,
    base_url: String,
}

/// Error body returned by the broker on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Response from the broker's publish endpoint.
#[derive(Debug, Deserialize)]
struct PublishResponse {
    message_ids: Vec<MessageId>,
}

impl HttpPubsubClient {
    /// Create a client for the given broker base URL.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Create a client with a custom reqwest client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// The broker base URL this client targets.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

async fn error_from_response(response: reqwest::Response) -> PubsubError {
    let status = response.status();
    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("broker returned status {status}"));

    PubsubError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl PubsubClient for HttpPubsubClient {
    async fn create_topic(&self, name: &str) -> Result<TopicHandle> {
        let url = format!("{}/v1/topics/{}", self.base_url, name);

        let response = self
            .http
            .put(&url)
            .send()
            .await
            .map_err(|e| PubsubError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(PubsubError::TopicExists(name.to_string()));
        }

        if response.status().is_success() {
            tracing::debug!(topic = %name, "Topic created");
            Ok(TopicHandle::new(name))
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn publish(
        &self,
        topic: &TopicHandle,
        message: &serde_json::Value,
    ) -> Result<Vec<MessageId>> {
        let url = format!("{}/v1/topics/{}:publish", self.base_url, topic.name());

        let body = serde_json::json!({ "messages": [{ "data": message }] });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PubsubError::Transport(e.to_string()))?;

        if response.status().is_success() {
            let parsed = response
                .json::<PublishResponse>()
                .await
                .map_err(|e| PubsubError::InvalidResponse(e.to_string()))?;
            Ok(parsed.message_ids)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn client_reports_base_url() {
        let client = HttpPubsubClient::new("http://localhost:8085");
        assert_eq!(client.base_url(), "http://localhost:8085");
    }

    #[tokio::test]
    async fn create_topic_success() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/topics/donations"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = HttpPubsubClient::new(server.uri());
        let topic = client.create_topic("donations").await.unwrap();
        assert_eq!(topic.name(), "donations");
    }

    #[tokio::test]
    async fn create_topic_conflict_is_topic_exists() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/topics/donations"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = HttpPubsubClient::new(server.uri());
        let err = client.create_topic("donations").await.unwrap_err();
        assert!(matches!(err, PubsubError::TopicExists(name) if name == "donations"));
    }

    #[tokio::test]
    async fn resolve_topic_tolerates_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/topics/donations"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = HttpPubsubClient::new(server.uri());
        let topic = resolve_topic(&client, "donations").await.unwrap();
        assert_eq!(topic.name(), "donations");
    }

    #[tokio::test]
    async fn resolve_topic_propagates_other_errors() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/topics/donations"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "forbidden" })),
            )
            .mount(&server)
            .await;

        let client = HttpPubsubClient::new(server.uri());
        let err = resolve_topic(&client, "donations").await.unwrap_err();
        match err {
            PubsubError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn publish_returns_message_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/topics/donations:publish"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message_ids": ["msg-1", "msg-2"] })),
            )
            .mount(&server)
            .await;

        let client = HttpPubsubClient::new(server.uri());
        let topic = TopicHandle::new("donations");
        let ids = client.publish(&topic, &json!({ "k": "v" })).await.unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].as_str(), "msg-1");
    }

    #[tokio::test]
    async fn publish_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/topics/donations:publish"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = HttpPubsubClient::new(server.uri());
        let topic = TopicHandle::new("donations");
        let err = client.publish(&topic, &json!({})).await.unwrap_err();
        assert!(matches!(err, PubsubError::Api { status: 500, .. }));
    }
}
