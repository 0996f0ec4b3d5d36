//! Best score endpoint

use axum::{extract::State, Extension, Json};
use verb_quiz_core::BestScoreStore;

use crate::error::Result;
use crate::models::{ScoreEntry, ScoresResponse};
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// GET /api/scores
/// Best score of the device for every set, unplayed sets at zero
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<ScoresResponse>> {
    let best = state.store.best_scores(auth.device_id).await;

    let scores = state
        .catalog
        .sets()
        .iter()
        .map(|set| {
            let best_score = best.get(&set.name);
            ScoreEntry {
                set_name: set.name.clone(),
                best_score,
                rank: state.thresholds.rank(best_score),
            }
        })
        .collect();

    let recommended = state
        .catalog
        .recommended_set(|name| best.get(name))
        .map(|set| set.name.clone());

    Ok(Json(ScoresResponse {
        scores,
        recommended,
    }))
}
