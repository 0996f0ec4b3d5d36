//! Grading and scoring engine for the Norwegian irregular verb quiz.
//!
//! Provides:
//! - Answer matching (exact, single-edit typo, wrong) on Levenshtein distance
//! - The verb catalog and its text file parser
//! - Question generation and the quiz session state machine
//! - Per-verb statistics, percent score and letter rank
//! - Sound cues, feedback text and the best-score contract

pub mod catalog;
pub mod error;
pub mod events;
pub mod feedback;
pub mod matching;
pub mod parser;
pub mod questions;
pub mod scores;
pub mod session;
pub mod statistics;
pub mod types;

pub use catalog::VerbCatalog;
pub use error::{CatalogError, EmptyAnswers, ParseError, QuizError, Result, ThresholdError, UnknownCue};
pub use events::{Cue, QuizEvent};
pub use matching::{classify_answer, is_correct_answer, is_typo_answer, levenshtein_distance, normalize_answer};
pub use questions::{make_questions, Question};
pub use scores::{best_score_candidate, record_best_score, BestScoreStore, InMemoryBestScores};
pub use session::{AnswerOutcome, Progress, QuizSession, SessionState, SessionSummary};
pub use statistics::{ResultRow, ScoreTracker};
pub use types::{
    calculate_rank, AnswerClassification, Answers, CellStatus, Rank, RankThresholds, Verb, VerbForm,
    VerbSet,
};
