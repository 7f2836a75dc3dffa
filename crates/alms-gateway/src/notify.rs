//! Fire-and-forget donation notifications.
//!
//! Publishing is not on the critical path of the donation response: the
//! HTTP response is sent regardless of the outcome here, and every failure
//! is logged and swallowed. There is no retry and no dead-letter handling.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use alms_payments::GatewayConnector;
use alms_pubsub::{resolve_topic, PubsubClient};

use crate::state::AppState;

/// Message published to a client's topic after an approved donation.
#[derive(Debug, Clone, Serialize)]
pub struct DonationNotice {
    /// Client the donation was collected for.
    pub client_id: String,
    /// Gateway-assigned transaction id.
    pub transaction_id: String,
    /// Donation amount as submitted.
    pub amount: String,
    /// Caller-supplied order reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
}

/// Spawn the best-effort publish task; the caller does not await it.
///
/// Handler completion and publish completion are unordered relative to each
/// other. That race is accepted: notification delivery is not guaranteed
/// before, or even eventually relative to, the HTTP response.
pub fn spawn_publish<C, P>(state: Arc<AppState<C, P>>, notice: DonationNotice)
where
    C: GatewayConnector + 'static,
    P: PubsubClient + 'static,
{
    tokio::spawn(async move {
        publish_donation_message(&state, notice).await;
    });
}

/// Publish a donation notice to the client's configured topic.
///
/// Errors are logged, never returned; the donation response has already
/// been sent by the time this runs.
pub async fn publish_donation_message<C, P>(state: &AppState<C, P>, notice: DonationNotice)
where
    C: GatewayConnector,
    P: PubsubClient,
{
    let Some(publisher) = state.publisher.as_deref() else {
        tracing::debug!(
            client_id = %notice.client_id,
            "Notifications disabled; skipping publish"
        );
        return;
    };

    let Some(topic_name) = state
        .client(&notice.client_id)
        .and_then(|c| c.topic_name.clone())
    else {
        tracing::debug!(
            client_id = %notice.client_id,
            "No topic configured for client; skipping publish"
        );
        return;
    };

    let topic = match resolve_topic(publisher, &topic_name).await {
        Ok(topic) => topic,
        Err(err) => {
            tracing::error!(
                topic = %topic_name,
                error = %err,
                "Failed to resolve notification topic"
            );
            return;
        }
    };

    let message = match serde_json::to_value(&notice) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "Failed to encode donation notice");
            return;
        }
    };

    match publisher.publish(&topic, &message).await {
        Ok(ids) => match ids.first() {
            Some(first) => {
                tracing::info!(
                    topic = %topic_name,
                    message_id = %first,
                    "Donation notice published"
                );
            }
            None => {
                tracing::info!(topic = %topic_name, "Donation notice published");
            }
        },
        Err(err) => {
            tracing::error!(
                topic = %topic_name,
                error = %err,
                "Error occurred while queuing donation notice"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use alms_core::{
        AmountLimits, ClientConfig, ClientId, ClientRegistry, MerchantCredentials,
    };
    use alms_payments::MockConnector;
    use alms_pubsub::{MockCreate, MockPublish, MockPubsub};

    fn notice() -> DonationNotice {
        DonationNotice {
            client_id: "stroke-research-fund".to_string(),
            transaction_id: "fauxId".to_string(),
            amount: "10.95".to_string(),
            order_id: Some("order-1".to_string()),
            created_at: Utc::now(),
        }
    }

    fn state_with(
        topic_name: Option<&str>,
        pubsub: Option<MockPubsub>,
    ) -> AppState<MockConnector, MockPubsub> {
        let config = ClientConfig {
            display_name: "Stroke Research Fund".to_string(),
            credentials: MerchantCredentials {
                merchant_id: "m-1".to_string(),
                public_key: "pk-1".to_string(),
                private_key: "sk-1".to_string(),
            },
            topic_name: topic_name.map(ToString::to_string),
        };
        let registry = ClientRegistry::from_clients(
            AmountLimits::default(),
            [(ClientId::new("stroke-research-fund"), config)],
        );
        AppState::new(
            Arc::new(registry),
            MockConnector::new(),
            pubsub.map(Arc::new),
            GatewayConfig::default(),
        )
    }

    #[tokio::test]
    async fn publishes_to_configured_topic() {
        let pubsub = MockPubsub::new();
        let state = state_with(Some("donations"), Some(pubsub.clone()));

        publish_donation_message(&state, notice()).await;

        let published = pubsub.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "donations");
        assert_eq!(published[0].1["transaction_id"], "fauxId");
    }

    #[tokio::test]
    async fn existing_topic_is_still_published_to() {
        let pubsub = MockPubsub::new().with_create(MockCreate::AlreadyExists);
        let state = state_with(Some("donations"), Some(pubsub.clone()));

        publish_donation_message(&state, notice()).await;

        assert_eq!(pubsub.published().len(), 1);
    }

    #[tokio::test]
    async fn resolver_failure_is_swallowed() {
        let pubsub = MockPubsub::new().with_create(MockCreate::Fail {
            status: 500,
            message: "boom".to_string(),
        });
        let state = state_with(Some("donations"), Some(pubsub.clone()));

        publish_donation_message(&state, notice()).await;

        assert!(pubsub.published().is_empty());
    }

    #[tokio::test]
    async fn publish_failure_is_swallowed() {
        let pubsub = MockPubsub::new().with_publish(MockPublish::Fail("queue down".to_string()));
        let state = state_with(Some("donations"), Some(pubsub.clone()));

        publish_donation_message(&state, notice()).await;

        assert!(pubsub.published().is_empty());
    }

    #[tokio::test]
    async fn missing_topic_config_skips_publish() {
        let pubsub = MockPubsub::new();
        let state = state_with(None, Some(pubsub.clone()));

        publish_donation_message(&state, notice()).await;

        assert!(pubsub.published().is_empty());
    }

    #[tokio::test]
    async fn disabled_publisher_skips_publish() {
        let state = state_with(Some("donations"), None);
        publish_donation_message(&state, notice()).await;
    }
}
