//! Quiz session state machine.
//!
//! ```text
//! NotStarted --start--> InProgress --last answer--> Completed
//!                           ^                           |
//!                           +---------start-------------+
//! ```
//!
//! Operations that make no sense in the current state return
//! [`QuizError::InvalidState`] instead of handing back stale data.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::VerbCatalog;
use crate::error::{QuizError, Result};
use crate::events::{Cue, QuizEvent};
use crate::matching::normalize_answer;
use crate::questions::{make_questions, Question};
use crate::scores::best_score_candidate;
use crate::statistics::{ResultRow, ScoreTracker};
use crate::types::{AnswerClassification, Rank, RankThresholds, VerbSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        })
    }
}

/// Position in the question sequence. `current` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub classification: AnswerClassification,
    pub cue: Cue,
    /// The normalized submission.
    pub answer: String,
    pub most_used_answer: String,
    pub accepted: Vec<String>,
    pub all_answers_message: String,
    pub completed: bool,
    pub events: Vec<QuizEvent>,
}

/// Final results of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub set_name: String,
    pub percent: f64,
    pub rank: Rank,
    pub correct_count: usize,
    pub question_count: usize,
    pub rows: Vec<ResultRow>,
}

/// Data that only exists once a set has been picked.
#[derive(Debug, Clone)]
struct Run {
    set: VerbSet,
    questions: Vec<Question>,
    index: usize,
    tracker: ScoreTracker,
}

/// One play-through of a verb set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    catalog: Arc<VerbCatalog>,
    thresholds: RankThresholds,
    state: SessionState,
    run: Option<Run>,
}

impl QuizSession {
    pub fn new(catalog: Arc<VerbCatalog>) -> Self {
        Self {
            catalog,
            thresholds: RankThresholds::default(),
            state: SessionState::NotStarted,
            run: None,
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: RankThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Start (or restart) the session on the named set.
    ///
    /// Questions are reshuffled from scratch on every call. Returns the event
    /// for the first question, or a completion event for a set with no verbs.
    pub fn start(&mut self, set_name: &str) -> Result<Vec<QuizEvent>> {
        self.start_with_rng(set_name, &mut rand::rng())
    }

    pub fn start_with_rng<R>(&mut self, set_name: &str, rng: &mut R) -> Result<Vec<QuizEvent>>
    where
        R: Rng + ?Sized,
    {
        let set = self
            .catalog
            .find(set_name)
            .ok_or_else(|| QuizError::SetNotFound(set_name.to_string()))?
            .clone();

        let tracker = ScoreTracker::with_thresholds(&set, self.thresholds);
        let questions = make_questions(&set, rng);

        self.run = Some(Run {
            set,
            questions,
            index: 0,
            tracker,
        });

        if self.question_count() == 0 {
            self.state = SessionState::Completed;
            return Ok(vec![self.completion_event()]);
        }

        self.state = SessionState::InProgress;
        Ok(vec![QuizEvent::QuestionShown {
            index: 0,
            total: self.question_count(),
        }])
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn set(&self) -> Option<&VerbSet> {
        self.run.as_ref().map(|run| &run.set)
    }

    pub fn set_name(&self) -> Option<&str> {
        self.set().map(|set| set.name.as_str())
    }

    pub fn questions(&self) -> &[Question] {
        self.run
            .as_ref()
            .map(|run| run.questions.as_slice())
            .unwrap_or_default()
    }

    pub fn question_count(&self) -> usize {
        self.questions().len()
    }

    pub fn tracker(&self) -> Option<&ScoreTracker> {
        self.run.as_ref().map(|run| &run.tracker)
    }

    fn in_progress(&self, operation: &'static str) -> Result<&Run> {
        match (&self.run, self.state) {
            (Some(run), SessionState::InProgress) => Ok(run),
            _ => Err(self.invalid(operation)),
        }
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidState {
            operation,
            state: self.state,
        }
    }

    /// The question waiting for an answer.
    pub fn current_question(&self) -> Result<&Question> {
        let run = self.in_progress("read the current question")?;
        run.questions
            .get(run.index)
            .ok_or_else(|| self.invalid("read the current question"))
    }

    /// Subtitle for the current question: its note or the set subtitle.
    pub fn current_subtitle(&self) -> Result<String> {
        let question = self.current_question()?;
        let run = self.in_progress("read the current subtitle")?;
        Ok(question.subtitle(&run.set))
    }

    pub fn progress(&self) -> Option<Progress> {
        let run = self.run.as_ref()?;
        let total = run.questions.len();
        Some(Progress {
            current: (run.index + 1).min(total),
            total,
        })
    }

    /// Grade raw input against the current question, record it and move on.
    pub fn submit_answer(&mut self, raw: &str) -> Result<AnswerOutcome> {
        let answer = normalize_answer(raw);

        let (classification, verb, form, most_used_answer, accepted, all_answers_message) = {
            let question = self.current_question()?;
            (
                question.classify(&answer),
                question.verb_key().to_string(),
                question.form,
                question.most_used_answer().to_string(),
                question.accepted.variants().to_vec(),
                question.all_answers_message(),
            )
        };

        let cue = Cue::from(classification);
        let mut events = vec![QuizEvent::AnswerClassified {
            verb: verb.clone(),
            form,
            classification,
            cue,
        }];

        let Some(run) = self.run.as_mut() else {
            return Err(self.invalid("submit an answer"));
        };
        run.tracker.record(&verb, form, classification);

        if run.index + 1 >= run.questions.len() {
            self.state = SessionState::Completed;
            events.push(self.completion_event());
        } else {
            run.index += 1;
            events.push(QuizEvent::QuestionShown {
                index: run.index,
                total: run.questions.len(),
            });
        }

        Ok(AnswerOutcome {
            classification,
            cue,
            answer,
            most_used_answer,
            accepted,
            all_answers_message,
            completed: self.state == SessionState::Completed,
            events,
        })
    }

    pub fn is_complete(&self) -> bool {
        match (&self.run, self.state) {
            (_, SessionState::Completed) => true,
            (Some(run), _) => run.index >= run.questions.len(),
            (None, _) => false,
        }
    }

    /// Current score; unanswered questions count as zero.
    pub fn percent(&self) -> f64 {
        self.tracker().map_or(0.0, ScoreTracker::calculate_percent)
    }

    pub fn rank(&self) -> Rank {
        self.thresholds.rank(self.percent())
    }

    fn completion_event(&self) -> QuizEvent {
        QuizEvent::SessionCompleted {
            percent: self.percent(),
            rank: self.rank(),
            cue: Cue::GameCompleted,
        }
    }

    /// Results of a completed session.
    pub fn summary(&self) -> Result<SessionSummary> {
        match (&self.run, self.state) {
            (Some(run), SessionState::Completed) => Ok(SessionSummary {
                set_name: run.set.name.clone(),
                percent: run.tracker.calculate_percent(),
                rank: run.tracker.calculate_rank(),
                correct_count: run.tracker.count_correct(),
                question_count: run.tracker.question_count(),
                rows: run.tracker.rows().to_vec(),
            }),
            _ => Err(self.invalid("summarize")),
        }
    }

    /// Best score to persist for the set once the session is completed.
    pub fn best_score_candidate(&self, existing_best: f64) -> Result<f64> {
        if self.state != SessionState::Completed {
            return Err(self.invalid("compute the best score"));
        }
        Ok(best_score_candidate(existing_best, self.percent()))
    }
}
