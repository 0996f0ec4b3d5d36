//! Quiz session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use verb_quiz_core::{feedback, QuizSession, SessionState};

use crate::error::{ApiError, Result};
use crate::models::{
    QuestionView, ResultsResponse, SessionResponse, StartSessionRequest, StoredSession,
    SubmitAnswerRequest, SubmitAnswerResponse,
};
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// POST /api/sessions
/// Starts a quiz on a set with freshly shuffled questions
pub async fn start(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let set_name = payload.set_name.trim();
    if set_name.is_empty() {
        return Err(ApiError::BadRequest("set_name must not be empty".to_string()));
    }

    let mut session = QuizSession::new(state.catalog.clone()).with_thresholds(state.thresholds);
    let events = session.start(set_name)?;
    let completed = session.state() == SessionState::Completed;
    let percent = session.percent();

    let mut stored = StoredSession::new(auth.device_id, session);
    if completed {
        let (_, new_best) = state
            .store
            .record_best_score(auth.device_id, set_name, percent)
            .await;
        stored.new_best = new_best;
    }

    let session_id = state.store.insert_session(stored).await;

    tracing::info!(
        "Device {} started session {} on set {:?}",
        auth.device_id,
        session_id,
        set_name
    );

    let response = state
        .store
        .with_session(auth.device_id, session_id, |stored| {
            SessionResponse::new(session_id, stored, events)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let response = state
        .store
        .with_session(auth.device_id, session_id, |stored| {
            SessionResponse::new(session_id, stored, Vec::new())
        })
        .await?;

    Ok(Json(response))
}

/// POST /api/sessions/{id}/answer
/// Grades the answer, records it and moves to the next question
pub async fn answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>> {
    let ((mut response, summary), update) = state
        .store
        .advance_session(auth.device_id, session_id, |stored| {
            let outcome = stored.session.submit_answer(&payload.answer)?;

            let mut rng = rand::rng();
            let message = feedback::pick_message(outcome.classification, &mut rng).to_string();
            let cue_variant = outcome
                .cue
                .variant_name(outcome.cue.pick_variant(&mut rng));

            let (next_question, summary) = if outcome.completed {
                (None, Some(stored.session.summary()?))
            } else {
                (Some(QuestionView::from_session(&stored.session)?), None)
            };

            let response = SubmitAnswerResponse {
                classification: outcome.classification,
                cue: outcome.cue,
                cue_variant,
                message,
                answer: outcome.answer,
                most_used_answer: outcome.most_used_answer,
                accepted: outcome.accepted,
                all_answers_message: outcome.all_answers_message,
                completed: outcome.completed,
                events: outcome.events,
                next_question,
                results: None,
            };
            Ok((response, summary))
        })
        .await?;

    if let (Some(summary), Some(update)) = (summary, update) {
        tracing::info!(
            "Session {} completed set {:?} with {:.1}% ({})",
            session_id,
            summary.set_name,
            summary.percent,
            summary.rank
        );

        response.results = Some(ResultsResponse::new(
            summary,
            update.best_score,
            update.new_best,
        ));
    }

    Ok(Json(response))
}

/// GET /api/sessions/{id}/results
/// Results table; only available once every question was answered
pub async fn results(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResultsResponse>> {
    let (summary, new_best) = state
        .store
        .with_session(auth.device_id, session_id, |stored| {
            Ok((stored.session.summary()?, stored.new_best))
        })
        .await?;

    let best_score = state
        .store
        .best_score(auth.device_id, &summary.set_name)
        .await;

    Ok(Json(ResultsResponse::new(summary, best_score, new_best)))
}

/// DELETE /api/sessions/{id}
/// Abandons a session
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.store.remove_session(auth.device_id, session_id).await?;

    tracing::info!("Session {} abandoned", session_id);

    Ok(StatusCode::NO_CONTENT)
}
