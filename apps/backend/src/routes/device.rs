//! Device endpoints
//!
//! A device stands in for one player's browser: it owns its sessions and
//! its best scores.

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{DeviceRegisterRequest, DeviceRegisterResponse, DeviceStatusResponse};
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// POST /api/device/register
/// The body is optional; `{"name": ...}` labels the device.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<DeviceRegisterRequest>>,
) -> Result<(StatusCode, Json<DeviceRegisterResponse>)> {
    let name = payload
        .and_then(|p| p.name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let device = state.store.create_device(name.as_deref()).await;
    tracing::info!(device_id = %device.id, "Registered device");

    Ok((
        StatusCode::CREATED,
        Json(DeviceRegisterResponse {
            device_id: device.id,
            token: device.token,
        }),
    ))
}

/// GET /api/device/status
pub async fn status(
    Extension(auth): Extension<AuthenticatedDevice>,
    State(state): State<AppState>,
) -> Result<Json<DeviceStatusResponse>> {
    let device = state
        .store
        .get_device_by_token(&auth.token)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Device {} not found", auth.device_id)))?;

    let played_sets = state
        .store
        .best_scores(device.id)
        .await
        .scores()
        .values()
        .filter(|&&score| score > 0.0)
        .count();
    let active_sessions = state.store.active_sessions(device.id).await;

    Ok(Json(DeviceStatusResponse {
        device_id: device.id,
        name: device.name,
        registered_at: device.created_at,
        last_seen_at: device.last_seen_at,
        played_sets,
        active_sessions,
    }))
}
