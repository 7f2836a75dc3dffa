//! Scripted gateway for handler tests.
//!
//! [`MockConnector`] hands out gateway handles that replay a canned token
//! and sale outcome, and records which merchants were connected.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use alms_core::MerchantCredentials;

use crate::error::{GatewayError, Result};
use crate::gateway::{GatewayConnector, PaymentGateway};
use crate::types::{ChargeRequest, ClientToken, SaleOutcome, Transaction};

/// Canned response for `generate_client_token`.
#[derive(Debug, Clone)]
pub enum MockToken {
    /// Return a token with this value.
    Token(String),
    /// Fail with this error text.
    Fail(String),
}

/// Canned response for `sale`.
#[derive(Debug, Clone)]
pub enum MockSale {
    /// Approve with this transaction id.
    Approve {
        /// Transaction id returned to the handler.
        transaction_id: String,
    },
    /// Decline with this message.
    Decline {
        /// Decline reason returned to the handler.
        message: String,
    },
    /// Fail at the transport level with this error text.
    Fail {
        /// Error text carried on the error channel.
        message: String,
    },
}

struct MockInner {
    token: Mutex<MockToken>,
    sale: Mutex<MockSale>,
    connected: Mutex<Vec<String>>,
}

/// Connector handing out scripted gateway handles.
#[derive(Clone)]
pub struct MockConnector {
    inner: Arc<MockInner>,
}

impl MockConnector {
    /// Create a connector that mints `"mock-client-token"` and approves
    /// every sale with transaction id `"fauxId"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockInner {
                token: Mutex::new(MockToken::Token("mock-client-token".to_string())),
                sale: Mutex::new(MockSale::Approve {
                    transaction_id: "fauxId".to_string(),
                }),
                connected: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Script the token response.
    #[must_use]
    pub fn with_token(self, token: MockToken) -> Self {
        *self.inner.token.lock() = token;
        self
    }

    /// Script the sale outcome.
    #[must_use]
    pub fn with_sale(self, sale: MockSale) -> Self {
        *self.inner.sale.lock() = sale;
        self
    }

    /// Merchant ids the handlers connected to, in order.
    #[must_use]
    pub fn connected_merchants(&self) -> Vec<String> {
        self.inner.connected.lock().clone()
    }
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayConnector for MockConnector {
    fn connect(&self, credentials: &MerchantCredentials) -> Box<dyn PaymentGateway> {
        self.inner
            .connected
            .lock()
            .push(credentials.merchant_id.clone());
        Box::new(MockGateway {
            inner: Arc::clone(&self.inner),
        })
    }
}

struct MockGateway {
    inner: Arc<MockInner>,
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn generate_client_token(&self) -> Result<ClientToken> {
        match self.inner.token.lock().clone() {
            MockToken::Token(client_token) => Ok(ClientToken { client_token }),
            MockToken::Fail(message) => Err(GatewayError::Transport(message)),
        }
    }

    async fn sale(&self, _charge: &ChargeRequest) -> Result<SaleOutcome> {
        match self.inner.sale.lock().clone() {
            MockSale::Approve { transaction_id } => {
                Ok(SaleOutcome::Approved(Transaction { id: transaction_id }))
            }
            MockSale::Decline { message } => Ok(SaleOutcome::Declined { message }),
            MockSale::Fail { message } => Err(GatewayError::Transport(message)),
        }
    }
}
