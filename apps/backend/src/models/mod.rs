//! Stored entities and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use verb_quiz_core::{
    AnswerClassification, Cue, Progress, QuizEvent, Rank, ResultRow, SessionState, VerbForm,
};

use verb_quiz_core::{feedback, QuizSession, RankThresholds, SessionSummary, VerbSet};

use crate::error::Result;

// === Stored Entity Types ===

/// Device registration info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// A quiz session owned by one device
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub device_id: Uuid,
    pub session: QuizSession,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Last time the owning device read or answered the session.
    pub last_active_at: DateTime<Utc>,
    /// Whether completing this session raised the device's best score.
    pub new_best: bool,
}

impl StoredSession {
    pub fn new(device_id: Uuid, session: QuizSession) -> Self {
        let now = Utc::now();
        let completed_at = (session.state() == SessionState::Completed).then_some(now);
        Self {
            device_id,
            session,
            started_at: now,
            completed_at,
            last_active_at: now,
            new_best: false,
        }
    }
}

// === Device API Types ===

#[derive(Debug, Deserialize)]
pub struct DeviceRegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeviceRegisterResponse {
    pub device_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceStatusResponse {
    pub device_id: Uuid,
    pub name: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    /// Sets with a best score above zero.
    pub played_sets: usize,
    /// Sessions still waiting for answers.
    pub active_sessions: usize,
}

// === Set API Types ===

/// A verb set as shown on the set picker
#[derive(Debug, Serialize)]
pub struct SetInfo {
    pub name: String,
    pub subtitle: String,
    pub verbs: Vec<String>,
    pub verb_count: usize,
    pub question_count: usize,
    pub best_score: f64,
    pub best_rank: Rank,
    pub recommended: bool,
}

impl SetInfo {
    pub fn new(set: &VerbSet, best_score: f64, thresholds: &RankThresholds, recommended: bool) -> Self {
        Self {
            name: set.name.clone(),
            subtitle: set.subtitle(),
            verbs: set.verbs.iter().map(|v| v.key().to_string()).collect(),
            verb_count: set.verbs.len(),
            question_count: set.question_count(),
            best_score,
            best_rank: thresholds.rank(best_score),
            recommended,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SetListResponse {
    pub sets: Vec<SetInfo>,
}

// === Session API Types ===

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub set_name: String,
}

/// The card currently waiting for an answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub prompt: String,
    pub displayed_word: String,
    pub subtitle: String,
    pub form: VerbForm,
    pub progress: Progress,
    pub progress_message: String,
}

impl QuestionView {
    /// View of the current question; fails unless the session is in progress.
    pub fn from_session(session: &QuizSession) -> Result<Self> {
        let question = session.current_question()?;
        let subtitle = session.current_subtitle()?;
        let progress = session.progress().unwrap_or(Progress {
            current: 0,
            total: 0,
        });

        Ok(Self {
            prompt: question.prompt.to_string(),
            displayed_word: question.displayed_word.clone(),
            subtitle,
            form: question.form,
            progress,
            progress_message: feedback::progress_message(progress.current, progress.total),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub set_name: Option<String>,
    pub state: SessionState,
    pub question: Option<QuestionView>,
    pub percent: f64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<QuizEvent>,
}

impl SessionResponse {
    pub fn new(session_id: Uuid, stored: &StoredSession, events: Vec<QuizEvent>) -> Result<Self> {
        let session = &stored.session;
        let question = match session.state() {
            SessionState::InProgress => Some(QuestionView::from_session(session)?),
            _ => None,
        };

        Ok(Self {
            session_id,
            set_name: session.set_name().map(str::to_string),
            state: session.state(),
            question,
            percent: session.percent(),
            started_at: stored.started_at,
            completed_at: stored.completed_at,
            events,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub classification: AnswerClassification,
    pub cue: Cue,
    /// Sound asset to play, e.g. `answer-correct-3`.
    pub cue_variant: String,
    pub message: String,
    pub answer: String,
    pub most_used_answer: String,
    pub accepted: Vec<String>,
    pub all_answers_message: String,
    pub completed: bool,
    pub events: Vec<QuizEvent>,
    pub next_question: Option<QuestionView>,
    pub results: Option<ResultsResponse>,
}

/// Results table of a completed session
#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub set_name: String,
    pub percent: f64,
    pub rounded_percent: u32,
    pub rank: Rank,
    pub correct_count: usize,
    pub question_count: usize,
    pub rows: Vec<ResultRow>,
    pub summary_message: String,
    pub completed_message: String,
    pub cue: Cue,
    pub best_score: f64,
    pub new_best: bool,
}

impl ResultsResponse {
    pub fn new(summary: SessionSummary, best_score: f64, new_best: bool) -> Self {
        Self {
            summary_message: feedback::results_message(summary.question_count, summary.correct_count),
            completed_message: feedback::completed_set_message(&summary.set_name),
            rounded_percent: summary.percent.round() as u32,
            set_name: summary.set_name,
            percent: summary.percent,
            rank: summary.rank,
            correct_count: summary.correct_count,
            question_count: summary.question_count,
            rows: summary.rows,
            cue: Cue::GameCompleted,
            best_score,
            new_best,
        }
    }
}

// === Score API Types ===

#[derive(Debug, Serialize)]
pub struct ScoreEntry {
    pub set_name: String,
    pub best_score: f64,
    pub rank: Rank,
}

#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub scores: Vec<ScoreEntry>,
    pub recommended: Option<String>,
}
