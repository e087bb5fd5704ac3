use lambda_http::{http::StatusCode, Body, Error, Response};
use serde_json::Value;

use crate::responses::{error_response, json_response};
use crate::store::UserStore;
use crate::types::{VerifyPlayerRequest, VerifyPlayerResponse, PLAYER_ROLE};

/// Confirm a player account exists and return its id.
///
/// The lookup is by role only; the email is presence-checked but not used
/// as a filter. Store failures are reported as "User not found". A body
/// that is not valid JSON, or is JSON `null` and so cannot be destructured,
/// comes back as `Err` for the caller's fault boundary to turn into a 500.
pub async fn verify_player(store: &dyn UserStore, body: &[u8]) -> Result<Response<Body>, Error> {
    let value: Value = serde_json::from_slice(body)?;
    if value.is_null() {
        return Err("request body is JSON null".into());
    }
    let req = VerifyPlayerRequest::from_value(&value);

    if !req.has_email() {
        tracing::info!("Rejecting verify request without email");
        return error_response(StatusCode::BAD_REQUEST, "Email is required");
    }

    let record = match store.find_single_by_role(PLAYER_ROLE).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::info!("No {} row in {} store", PLAYER_ROLE, store.backend());
            return error_response(StatusCode::NOT_FOUND, "User not found");
        }
        Err(e) => {
            tracing::warn!("User lookup failed on {} store: {}", store.backend(), e);
            return error_response(StatusCode::NOT_FOUND, "User not found");
        }
    };

    if !record.is_player() {
        tracing::warn!("User {} has role {}, expected {}", record.id, record.role, PLAYER_ROLE);
        return error_response(StatusCode::BAD_REQUEST, "User is not a player");
    }

    tracing::info!("Verified player {}", record.id);
    json_response(
        StatusCode::OK,
        &VerifyPlayerResponse {
            user_id: record.id,
            role: record.role,
        },
    )
}
