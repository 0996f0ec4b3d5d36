//! Error types for verb-quiz-core.

use thiserror::Error;

use crate::session::SessionState;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors raised by a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The requested verb set is not in the catalog. Safe to show to the user.
    #[error("no verb set named {0:?}")]
    SetNotFound(String),

    /// A session operation was called in a state that does not allow it.
    /// This is a caller bug, not a user mistake.
    #[error("cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

/// Errors that can occur while parsing a verb catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("verb at line {line} appears before any SET header")]
    VerbOutsideSet { line: usize },

    #[error("expected 5 or 6 fields at line {line}, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("empty {field} at line {line}")]
    EmptyField { line: usize, field: &'static str },

    #[error("missing set name at line {line}")]
    MissingSetName { line: usize },

    #[error("duplicate set {name:?} at line {line}")]
    DuplicateSet { name: String, line: usize },

    #[error("duplicate verb {key:?} at line {line}")]
    DuplicateVerb { key: String, line: usize },

    #[error("set {name:?} starting at line {line} has no verbs")]
    EmptySet { name: String, line: usize },

    #[error("empty file")]
    EmptyFile,
}

/// A catalog built from sets that would break per-verb statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate set {0:?}")]
    DuplicateSet(String),

    #[error("duplicate verb {key:?} in set {set:?}")]
    DuplicateVerb { set: String, key: String },
}

/// A cue name outside the registered set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no cue registered with name {0:?}")]
pub struct UnknownCue(pub String);

/// An accepted-answer list was built without any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("an answer list needs at least one variant")]
pub struct EmptyAnswers;

/// Invalid rank threshold table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("expected 4 comma-separated thresholds, found {0}")]
    Count(usize),

    #[error("invalid threshold value {0:?}")]
    Invalid(String),

    #[error("thresholds must lie within 0..=100 and be strictly descending")]
    Order,
}
