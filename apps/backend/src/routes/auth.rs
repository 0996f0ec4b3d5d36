//! Bearer-token authentication for the quiz routes

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Device that sent the request, available to handlers as an extension
#[derive(Clone, Debug)]
pub struct AuthenticatedDevice {
    pub device_id: Uuid,
    pub token: String,
}

/// Resolve the device token and reject unknown devices with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = token_from_headers(request.headers())?.to_string();

    let Some(device) = state.store.get_device_by_token(&token).await else {
        tracing::debug!("Rejected unknown device token");
        return Err(ApiError::Unauthorized("Invalid device token".to_string()));
    };
    state.store.update_last_seen(&token).await;

    request.extensions_mut().insert(AuthenticatedDevice {
        device_id: device.id,
        token,
    });

    Ok(next.run(request).await)
}

fn token_from_headers(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Authorization header is not ASCII".to_string()))?;

    parse_bearer(value)
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))
}

/// Token of a `Bearer <token>` header value. The scheme is case-insensitive.
fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
