//! Request and response types for the payment gateway API.

use serde::{Deserialize, Serialize};

/// A client authorization token minted for the browser-side payment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientToken {
    /// Opaque token consumed by the client-side SDK.
    pub client_token: String,
}

/// Customer details attached to a charge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    /// Donor first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Donor last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Donor email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Organization the donation is collected for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// A sale submitted to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Decimal amount as text, e.g. `"10.95"`.
    pub amount: String,
    /// Caller-supplied order reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Donor details.
    pub customer: Customer,
    /// Single-use token representing the tokenized payment method.
    pub payment_method_nonce: String,
    /// Submit for settlement immediately rather than authorize-only.
    pub submit_for_settlement: bool,
}

/// A transaction the gateway created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Gateway-assigned transaction id.
    pub id: String,
}

/// Outcome of a sale the gateway processed.
///
/// Transport-level failures are reported through the error channel; a
/// decline means the gateway handled the request and said no.
#[derive(Debug, Clone)]
pub enum SaleOutcome {
    /// The gateway accepted the charge.
    Approved(Transaction),
    /// The gateway processed the request but declined the charge.
    Declined {
        /// Human-readable decline reason, safe to echo to the caller.
        message: String,
    },
}
