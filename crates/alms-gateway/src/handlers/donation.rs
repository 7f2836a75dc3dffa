//! Donation submission endpoint.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use alms_core::validate::{is_amount_valid, is_email_valid, is_valid_client};
use alms_payments::{ChargeRequest, Customer, GatewayConnector, SaleOutcome};
use alms_pubsub::PubsubClient;

use crate::error::ApiError;
use crate::notify::{self, DonationNotice};
use crate::state::AppState;

/// Donation amount as it arrives on the wire, either a JSON number or a
/// decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    /// `{"amount": 10.95}`
    Number(serde_json::Number),
    /// `{"amount": "10.95"}`
    Text(String),
}

impl AmountField {
    /// The decimal text handed to validation and the gateway.
    fn to_raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Request body for `POST /postDonation`.
///
/// Every field is optional at this layer so that a missing field becomes a
/// validation message, never a deserialization error.
#[derive(Debug, Deserialize)]
pub struct DonationBody {
    /// Donation amount.
    #[serde(default)]
    pub amount: Option<AmountField>,
    /// Caller-supplied order reference.
    #[serde(default, rename = "orderId")]
    pub order_id: Option<String>,
    /// Donor first name.
    #[serde(default)]
    pub firstname: Option<String>,
    /// Donor last name.
    #[serde(default)]
    pub lastname: Option<String>,
    /// Donor email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Client the donation is collected for.
    #[serde(default, rename = "clientId")]
    pub client_id: Option<String>,
    /// Single-use token from the client-side payment form.
    #[serde(default)]
    pub payment_method_nonce: Option<String>,
}

/// Submit a donation charge.
///
/// # Errors
///
/// Returns 400 when validation fails (the message enumerates every violated
/// rule) or the gateway declines the charge, and 500 when the gateway fails
/// at the transport level.
pub async fn post_donation<C, P>(
    State(state): State<Arc<AppState<C, P>>>,
    Json(body): Json<DonationBody>,
) -> Result<impl IntoResponse, ApiError>
where
    C: GatewayConnector + 'static,
    P: PubsubClient + 'static,
{
    let limits = state.registry.limits();
    let amount_raw = body.amount.as_ref().map(AmountField::to_raw);
    let nonce = body.payment_method_nonce.as_deref().unwrap_or_default();

    // Reject obviously bad requests before the gateway does, collecting
    // every violation into one message.
    let mut message = String::new();
    if !is_valid_client(&state.registry, body.client_id.as_deref()) {
        message.push_str("Please provide a clientId. ");
    }
    if !is_amount_valid(amount_raw.as_deref(), limits) {
        let _ = write!(
            message,
            "Invalid amount - please provide an amount greater than {}. ",
            limits.min
        );
    }
    if nonce.is_empty() {
        message.push_str("Nonce field cannot be empty. ");
    }
    if !is_email_valid(body.email.as_deref()) {
        message.push_str("Please ensure you provide a valid email address. ");
    }
    if !message.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Invalid params in the request body: {message}"
        )));
    }

    // Checked by is_valid_client above.
    let client_id = body.client_id.as_deref().unwrap_or_default();
    let client = state
        .client(client_id)
        .ok_or_else(|| ApiError::Internal("client configuration missing".to_string()))?;
    let amount = amount_raw.unwrap_or_default();

    let charge = ChargeRequest {
        amount: amount.clone(),
        order_id: body.order_id.clone(),
        customer: Customer {
            first_name: body.firstname.clone(),
            last_name: body.lastname.clone(),
            email: body.email.clone(),
            company: Some(client.display_name.clone()),
        },
        payment_method_nonce: nonce.to_string(),
        submit_for_settlement: true,
    };

    let gateway = state
        .load_gateway(client_id)
        .ok_or_else(|| ApiError::Internal("client configuration missing".to_string()))?;

    match gateway.sale(&charge).await {
        Err(err) => {
            tracing::error!(
                client_id = %client_id,
                error = %err,
                "Sale failed at the gateway"
            );
            Err(ApiError::GatewayUnavailable)
        }
        Ok(SaleOutcome::Approved(transaction)) => {
            tracing::info!(
                client_id = %client_id,
                transaction_id = %transaction.id,
                "Transaction created"
            );

            let notice = DonationNotice {
                client_id: client_id.to_string(),
                transaction_id: transaction.id,
                amount,
                order_id: body.order_id,
                created_at: Utc::now(),
            };
            notify::spawn_publish(Arc::clone(&state), notice);

            Ok((StatusCode::OK, "OK"))
        }
        Ok(SaleOutcome::Declined { message }) => {
            tracing::warn!(
                client_id = %client_id,
                message = %message,
                "Sale declined by the gateway"
            );
            Err(ApiError::BadRequest(message))
        }
    }
}
