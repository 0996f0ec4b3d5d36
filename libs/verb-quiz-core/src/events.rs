//! Sound cues and session events handed to the presentation layer.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::UnknownCue;
use crate::types::{AnswerClassification, Rank, VerbForm};

/// Symbolic sound cue. The set is closed: the core never emits anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cue {
    AnswerCorrect,
    AnswerTypo,
    AnswerWrong,
    GameCompleted,
}

impl Cue {
    pub const ALL: [Cue; 4] = [
        Cue::AnswerCorrect,
        Cue::AnswerTypo,
        Cue::AnswerWrong,
        Cue::GameCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnswerCorrect => "answer-correct",
            Self::AnswerTypo => "answer-typo",
            Self::AnswerWrong => "answer-wrong",
            Self::GameCompleted => "game-completed",
        }
    }

    /// Number of recorded variants the audio player can choose from.
    pub fn variant_count(&self) -> usize {
        match self {
            Self::AnswerCorrect => 5,
            Self::AnswerTypo => 3,
            Self::AnswerWrong => 1,
            Self::GameCompleted => 4,
        }
    }

    /// Pick a random variant index in `0..variant_count()`.
    pub fn pick_variant<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        rng.random_range(0..self.variant_count())
    }

    /// Asset name for a variant, e.g. `answer-typo-2`.
    pub fn variant_name(&self, variant: usize) -> String {
        format!("{}-{}", self.as_str(), variant)
    }
}

impl From<AnswerClassification> for Cue {
    fn from(classification: AnswerClassification) -> Self {
        match classification {
            AnswerClassification::Correct => Self::AnswerCorrect,
            AnswerClassification::Typo => Self::AnswerTypo,
            AnswerClassification::Incorrect => Self::AnswerWrong,
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cue {
    type Err = UnknownCue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cue| cue.as_str() == s)
            .ok_or_else(|| UnknownCue(s.to_string()))
    }
}

/// Something the presentation layer should react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizEvent {
    /// A new question is current. `index` is 0-based.
    QuestionShown { index: usize, total: usize },
    AnswerClassified {
        verb: String,
        form: VerbForm,
        classification: AnswerClassification,
        cue: Cue,
    },
    SessionCompleted { percent: f64, rank: Rank, cue: Cue },
}
