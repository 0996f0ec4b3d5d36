//! Verb set endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use verb_quiz_core::{BestScoreStore, QuizError};

use crate::error::Result;
use crate::models::{SetInfo, SetListResponse};
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// GET /api/sets
/// Every set in catalog order, with the device's best scores
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<SetListResponse>> {
    let scores = state.store.best_scores(auth.device_id).await;
    let recommended = state
        .catalog
        .recommended_set(|set_name| scores.get(set_name))
        .map(|set| set.name.as_str());

    let sets = state
        .catalog
        .sets()
        .iter()
        .map(|set| {
            SetInfo::new(
                set,
                scores.get(&set.name),
                &state.thresholds,
                recommended == Some(set.name.as_str()),
            )
        })
        .collect();

    Ok(Json(SetListResponse { sets }))
}

/// GET /api/sets/{name}
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(name): Path<String>,
) -> Result<Json<SetInfo>> {
    let set = state
        .catalog
        .find(&name)
        .ok_or_else(|| QuizError::SetNotFound(name.clone()))?;

    let scores = state.store.best_scores(auth.device_id).await;
    let recommended = state
        .catalog
        .recommended_set(|set_name| scores.get(set_name))
        .is_some_and(|r| r.name == set.name);

    Ok(Json(SetInfo::new(
        set,
        scores.get(&set.name),
        &state.thresholds,
        recommended,
    )))
}
