//! HTTP client for the payment gateway's merchant API.
//!
//! [`HttpGateway`] is a handle bound to one client's merchant credentials.
//! Handles are cheap; [`HttpGatewayConnector`] builds one per request over a
//! shared connection pool, so no credential state outlives a request.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use alms_core::MerchantCredentials;

use crate::error::{GatewayError, Result};
use crate::types::{ChargeRequest, ClientToken, SaleOutcome, Transaction};

/// Base URL of the gateway's sandbox environment.
pub const SANDBOX_URL: &str = "https://api.sandbox.cardgate.example/v2";

/// Operations the payment gateway exposes to the request handlers.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint a client authorization token for the browser payment form.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway rejects it.
    async fn generate_client_token(&self) -> Result<ClientToken>;

    /// Submit a sale.
    ///
    /// A decline is a successful call ([`SaleOutcome::Declined`]); the error
    /// channel carries transport and gateway-level failures only.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway rejects it.
    async fn sale(&self, charge: &ChargeRequest) -> Result<SaleOutcome>;
}

/// Factory producing a gateway handle bound to one client's credentials.
///
/// Handles are constructed per request and nothing is cached across
/// requests, so a registry reload picks up rotated credentials immediately.
pub trait GatewayConnector: Send + Sync {
    /// Bind a gateway handle to the given merchant credentials.
    fn connect(&self, credentials: &MerchantCredentials) -> Box<dyn PaymentGateway>;
}

/// REST client for the gateway's merchant API, bound to one merchant.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    credentials: MerchantCredentials,
}

impl HttpGateway {
    /// Bind a gateway handle to the given environment and credentials.
    #[must_use]
    pub fn connect(
        http: reqwest::Client,
        base_url: impl Into<String>,
        credentials: MerchantCredentials,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            credentials,
        }
    }

    fn merchant_url(&self, suffix: &str) -> String {
        format!(
            "{}/merchants/{}/{}",
            self.base_url, self.credentials.merchant_id, suffix
        )
    }
}

/// Error body returned by the gateway on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Result object returned by the gateway for a processed sale.
#[derive(Debug, Deserialize)]
struct SaleResponse {
    success: bool,
    #[serde(default)]
    transaction: Option<Transaction>,
    #[serde(default)]
    message: Option<String>,
}

impl SaleResponse {
    fn into_outcome(self) -> Result<SaleOutcome> {
        if self.success {
            let transaction = self.transaction.ok_or_else(|| {
                GatewayError::InvalidResponse(
                    "successful sale without a transaction object".to_string(),
                )
            })?;
            Ok(SaleOutcome::Approved(transaction))
        } else {
            Ok(SaleOutcome::Declined {
                message: self
                    .message
                    .unwrap_or_else(|| "transaction declined".to_string()),
            })
        }
    }
}

async fn error_from_response(response: reqwest::Response) -> GatewayError {
    let status = response.status();
    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("gateway returned status {status}"));

    GatewayError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn generate_client_token(&self) -> Result<ClientToken> {
        let url = self.merchant_url("client-tokens");

        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.credentials.public_key,
                Some(&self.credentials.private_key),
            )
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if response.status().is_success() {
            tracing::debug!(merchant_id = %self.credentials.merchant_id, "Client token minted");
            response
                .json::<ClientToken>()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn sale(&self, charge: &ChargeRequest) -> Result<SaleOutcome> {
        let url = self.merchant_url("transactions");

        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.credentials.public_key,
                Some(&self.credentials.private_key),
            )
            .json(charge)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if response.status().is_success() {
            let result = response
                .json::<SaleResponse>()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
            result.into_outcome()
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Connector producing [`HttpGateway`] handles over one shared HTTP pool.
#[derive(Debug, Clone)]
pub struct HttpGatewayConnector {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGatewayConnector {
    /// Create a connector for the given gateway base URL.
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

    /// Create a connector with a custom reqwest client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// The gateway base URL this connector targets.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl GatewayConnector for HttpGatewayConnector {
    fn connect(&self, credentials: &MerchantCredentials) -> Box<dyn PaymentGateway> {
        Box::new(HttpGateway::connect(
            self.http.clone(),
            self.base_url.clone(),
            credentials.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Customer;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> MerchantCredentials {
        MerchantCredentials {
            merchant_id: "m-1".to_string(),
            public_key: "pk-1".to_string(),
            private_key: "sk-1".to_string(),
        }
    }

    fn charge() -> ChargeRequest {
        ChargeRequest {
            amount: "10.95".to_string(),
            order_id: Some("order-1".to_string()),
            customer: Customer::default(),
            payment_method_nonce: "nonce".to_string(),
            submit_for_settlement: true,
        }
    }

    #[test]
    fn connector_reports_base_url() {
        let connector = HttpGatewayConnector::new("http://localhost:8080");
        assert_eq!(connector.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn client_token_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/merchants/m-1/client-tokens"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "client_token": "tok-123" })),
            )
            .mount(&server)
            .await;

        let gateway = HttpGatewayConnector::new(server.uri()).connect(&credentials());
        let token = gateway.generate_client_token().await.unwrap();
        assert_eq!(token.client_token, "tok-123");
    }

    #[tokio::test]
    async fn client_token_failure_carries_gateway_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/merchants/m-1/client-tokens"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "bad keys" })),
            )
            .mount(&server)
            .await;

        let gateway = HttpGatewayConnector::new(server.uri()).connect(&credentials());
        let err = gateway.generate_client_token().await.unwrap_err();
        match err {
            GatewayError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad keys");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sale_success_is_approved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/merchants/m-1/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "transaction": { "id": "fauxId" }
            })))
            .mount(&server)
            .await;

        let gateway = HttpGatewayConnector::new(server.uri()).connect(&credentials());
        match gateway.sale(&charge()).await.unwrap() {
            SaleOutcome::Approved(transaction) => assert_eq!(transaction.id, "fauxId"),
            SaleOutcome::Declined { message } => panic!("unexpected decline: {message}"),
        }
    }

    #[tokio::test]
    async fn sale_decline_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/merchants/m-1/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Insufficient Funds"
            })))
            .mount(&server)
            .await;

        let gateway = HttpGatewayConnector::new(server.uri()).connect(&credentials());
        match gateway.sale(&charge()).await.unwrap() {
            SaleOutcome::Declined { message } => assert_eq!(message, "Insufficient Funds"),
            SaleOutcome::Approved(t) => panic!("unexpected approval: {}", t.id),
        }
    }

    #[tokio::test]
    async fn sale_server_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/merchants/m-1/transactions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let gateway = HttpGatewayConnector::new(server.uri()).connect(&credentials());
        let err = gateway.sale(&charge()).await.unwrap_err();
        match err {
            GatewayError::Api { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_sale_without_transaction_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/merchants/m-1/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let gateway = HttpGatewayConnector::new(server.uri()).connect(&credentials());
        let err = gateway.sale(&charge()).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
