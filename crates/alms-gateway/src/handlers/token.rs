//! Client token endpoint.
//!
//! Browser-side payment forms call this before tokenizing a card; the
//! returned token authorizes the form against the payment gateway.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use alms_core::validate::is_valid_client;
use alms_payments::GatewayConnector;
use alms_pubsub::PubsubClient;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /getToken`.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    /// Client the token is minted for.
    #[serde(default, rename = "clientId")]
    pub client_id: Option<String>,
}

/// Mint a client authorization token for the browser payment form.
///
/// # Errors
///
/// Returns 400 when the client id is missing or unknown, or when the
/// gateway call fails (the gateway error text is echoed back).
pub async fn get_token<C, P>(
    State(state): State<Arc<AppState<C, P>>>,
    Query(query): Query<TokenQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    C: GatewayConnector + 'static,
    P: PubsubClient + 'static,
{
    if !is_valid_client(&state.registry, query.client_id.as_deref()) {
        return Err(ApiError::BadRequest(
            "Please provide a clientId param in the query string".to_string(),
        ));
    }

    // Checked by is_valid_client above.
    let client_id = query.client_id.as_deref().unwrap_or_default();
    let gateway = state
        .load_gateway(client_id)
        .ok_or_else(|| ApiError::Internal("client configuration missing".to_string()))?;

    match gateway.generate_client_token().await {
        Ok(token) => Ok(Json(token)),
        Err(err) => {
            tracing::error!(
                client_id = %client_id,
                error = %err,
                "Client token generation failed"
            );
            Err(ApiError::BadRequest(err.to_string()))
        }
    }
}
