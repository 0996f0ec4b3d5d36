//! Core types for the verb quiz.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EmptyAnswers, ThresholdError};

/// Grammatical form a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbForm {
    Infinitive,
    Present,
    Past,
    Perfect,
}

impl VerbForm {
    /// All forms, in the order questions are asked.
    pub const ALL: [VerbForm; 4] = [
        VerbForm::Infinitive,
        VerbForm::Present,
        VerbForm::Past,
        VerbForm::Perfect,
    ];

    /// Get the form name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Infinitive => "infinitive",
            Self::Present => "present",
            Self::Past => "past",
            Self::Perfect => "perfect",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "infinitive" => Some(Self::Infinitive),
            "present" => Some(Self::Present),
            "past" => Some(Self::Past),
            "perfect" => Some(Self::Perfect),
            _ => None,
        }
    }

    /// Position of the form in [`VerbForm::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Infinitive => 0,
            Self::Present => 1,
            Self::Past => 2,
            Self::Perfect => 3,
        }
    }
}

impl fmt::Display for VerbForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted spellings of one verb form, most used first.
///
/// A single accepted form is a one-element list; the list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Answers(Vec<String>);

impl Answers {
    /// Build from variants. Returns `None` for an empty list.
    pub fn new(variants: Vec<String>) -> Option<Self> {
        if variants.is_empty() {
            None
        } else {
            Some(Self(variants))
        }
    }

    /// A form with exactly one accepted spelling.
    pub fn single(answer: impl Into<String>) -> Self {
        Self(vec![answer.into()])
    }

    /// The canonical ("most used") spelling.
    pub fn canonical(&self) -> &str {
        &self.0[0]
    }

    pub fn variants(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_multiple(&self) -> bool {
        self.0.len() > 1
    }

    /// All variants joined with ", ".
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl TryFrom<Vec<String>> for Answers {
    type Error = EmptyAnswers;

    fn try_from(variants: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(variants).ok_or(EmptyAnswers)
    }
}

impl From<Answers> for Vec<String> {
    fn from(answers: Answers) -> Self {
        answers.0
    }
}

impl From<&str> for Answers {
    fn from(answer: &str) -> Self {
        Self::single(answer)
    }
}

/// An irregular verb with its four conjugated forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub infinitive: Answers,
    pub present: Answers,
    pub past: Answers,
    pub perfect: Answers,
    pub translation: String,
    /// Replaces the subtitle of the infinitive question when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Verb {
    pub fn new(
        infinitive: impl Into<Answers>,
        present: impl Into<Answers>,
        past: impl Into<Answers>,
        perfect: impl Into<Answers>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            infinitive: infinitive.into(),
            present: present.into(),
            past: past.into(),
            perfect: perfect.into(),
            translation: translation.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Key used for statistics: the canonical infinitive.
    pub fn key(&self) -> &str {
        self.infinitive.canonical()
    }

    /// Accepted answers for the given form.
    pub fn form(&self, form: VerbForm) -> &Answers {
        match form {
            VerbForm::Infinitive => &self.infinitive,
            VerbForm::Present => &self.present,
            VerbForm::Past => &self.past,
            VerbForm::Perfect => &self.perfect,
        }
    }
}

/// A named group of verbs played as one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbSet {
    pub name: String,
    pub verbs: Vec<Verb>,
}

impl VerbSet {
    pub fn new(name: impl Into<String>, verbs: Vec<Verb>) -> Self {
        Self {
            name: name.into(),
            verbs,
        }
    }

    /// Subtitle shown under questions that carry no note.
    pub fn subtitle(&self) -> String {
        format!("Набор слов \"{}\" · Lykke til!", self.name)
    }

    /// Number of questions a session over this set asks.
    pub fn question_count(&self) -> usize {
        self.verbs.len() * VerbForm::ALL.len()
    }
}

/// How a submitted answer was graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerClassification {
    Correct,
    /// One edit away from an accepted answer.
    Typo,
    Incorrect,
}

impl AnswerClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Typo => "typo",
            Self::Incorrect => "incorrect",
        }
    }
}

/// State of one (verb, form) cell in the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Unanswered,
    Correct,
    Typo,
    Incorrect,
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Unanswered
    }
}

impl CellStatus {
    /// Whether the cell counts toward the score.
    pub fn is_scored(self) -> bool {
        matches!(self, Self::Correct | Self::Typo)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unanswered => "unanswered",
            Self::Correct => "correct",
            Self::Typo => "typo",
            Self::Incorrect => "incorrect",
        }
    }
}

impl From<AnswerClassification> for CellStatus {
    fn from(classification: AnswerClassification) -> Self {
        match classification {
            AnswerClassification::Correct => Self::Correct,
            AnswerClassification::Typo => Self::Typo,
            AnswerClassification::Incorrect => Self::Incorrect,
        }
    }
}

/// Letter rank derived from a percent score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    S,
    A,
    B,
    C,
    /// Below the lowest threshold.
    None,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::None => "None",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum percent for each rank tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedThresholds")]
pub struct RankThresholds {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self {
            s: 90.0,
            a: 75.0,
            b: 60.0,
            c: 30.0,
        }
    }
}

impl RankThresholds {
    /// Build a validated table. Values must be within 0..=100 and strictly descending.
    pub fn new(s: f64, a: f64, b: f64, c: f64) -> Result<Self, ThresholdError> {
        let in_range = [s, a, b, c].iter().all(|v| (0.0..=100.0).contains(v));
        if !in_range || !(s > a && a > b && b > c) {
            return Err(ThresholdError::Order);
        }
        Ok(Self { s, a, b, c })
    }

    /// Map a percent to its rank. Tiers are checked from the highest down, so
    /// a boundary value belongs to the higher tier.
    pub fn rank(&self, percent: f64) -> Rank {
        if percent >= self.s {
            Rank::S
        } else if percent >= self.a {
            Rank::A
        } else if percent >= self.b {
            Rank::B
        } else if percent >= self.c {
            Rank::C
        } else {
            Rank::None
        }
    }
}

/// Wire shape of [`RankThresholds`] before validation.
#[derive(Deserialize)]
struct UncheckedThresholds {
    s: f64,
    a: f64,
    b: f64,
    c: f64,
}

impl TryFrom<UncheckedThresholds> for RankThresholds {
    type Error = ThresholdError;

    fn try_from(raw: UncheckedThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.s, raw.a, raw.b, raw.c)
    }
}

impl FromStr for RankThresholds {
    type Err = ThresholdError;

    /// Parse `"S,A,B,C"`, e.g. `"90,75,60,30"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ThresholdError::Count(parts.len()));
        }

        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse::<f64>()
                .map_err(|_| ThresholdError::Invalid(part.to_string()))?;
        }

        Self::new(values[0], values[1], values[2], values[3])
    }
}

/// Rank for a percent using the default thresholds.
pub fn calculate_rank(percent: f64) -> Rank {
    RankThresholds::default().rank(percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(calculate_rank(100.0), Rank::S);
        assert_eq!(calculate_rank(90.0), Rank::S);
        assert_eq!(calculate_rank(89.999), Rank::A);
        assert_eq!(calculate_rank(75.0), Rank::A);
        assert_eq!(calculate_rank(60.0), Rank::B);
        assert_eq!(calculate_rank(59.9), Rank::C);
        assert_eq!(calculate_rank(30.0), Rank::C);
        assert_eq!(calculate_rank(29.9), Rank::None);
        assert_eq!(calculate_rank(0.0), Rank::None);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds: RankThresholds = "95, 80, 50, 10".parse().unwrap();
        assert_eq!(thresholds.rank(94.0), Rank::A);
        assert_eq!(thresholds.rank(50.0), Rank::B);
        assert_eq!(thresholds.rank(10.0), Rank::C);
        assert_eq!(thresholds.rank(9.0), Rank::None);
    }

    #[test]
    fn test_thresholds_rejects_bad_input() {
        assert_eq!(
            "90,75,60".parse::<RankThresholds>(),
            Err(ThresholdError::Count(3))
        );
        assert_eq!(
            "90,75,x,30".parse::<RankThresholds>(),
            Err(ThresholdError::Invalid("x".to_string()))
        );
        assert_eq!(
            "75,90,60,30".parse::<RankThresholds>(),
            Err(ThresholdError::Order)
        );
        assert_eq!(
            "190,75,60,30".parse::<RankThresholds>(),
            Err(ThresholdError::Order)
        );
    }

    #[test]
    fn test_thresholds_deserialize_validates() {
        let thresholds: RankThresholds =
            serde_json::from_str(r#"{"s": 95, "a": 85, "b": 70, "c": 40}"#).unwrap();
        assert_eq!(thresholds, RankThresholds::new(95.0, 85.0, 70.0, 40.0).unwrap());

        assert!(serde_json::from_str::<RankThresholds>(r#"{"s": 60, "a": 75, "b": 90, "c": 30}"#).is_err());
        assert!(serde_json::from_str::<RankThresholds>(r#"{"s": 120, "a": 75, "b": 60, "c": 30}"#).is_err());

        let round_trip: RankThresholds =
            serde_json::from_value(serde_json::to_value(RankThresholds::default()).unwrap()).unwrap();
        assert_eq!(round_trip, RankThresholds::default());
    }

    #[test]
    fn test_answers_never_empty() {
        assert!(Answers::new(vec![]).is_none());
        assert_eq!(Answers::try_from(Vec::<String>::new()), Err(EmptyAnswers));

        let answers = Answers::new(vec!["ble".into(), "blei".into()]).unwrap();
        assert_eq!(answers.canonical(), "ble");
        assert!(answers.has_multiple());
        assert_eq!(answers.joined(), "ble, blei");
    }

    #[test]
    fn test_answers_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<Answers>("[]").is_err());

        let answers: Answers = serde_json::from_str(r#"["synes", "syns"]"#).unwrap();
        assert_eq!(answers.variants(), ["synes", "syns"]);
    }

    #[test]
    fn test_verb_form_order_and_names() {
        for (i, form) in VerbForm::ALL.iter().enumerate() {
            assert_eq!(form.index(), i);
            assert_eq!(VerbForm::from_str(form.as_str()), Some(*form));
        }
        assert_eq!(VerbForm::from_str("future"), None);
    }

    #[test]
    fn test_verb_key_is_canonical_infinitive() {
        let verb = Verb::new(
            Answers::new(vec!["dra".into(), "drage".into()]).unwrap(),
            "drar",
            "drog",
            "dratt",
            "Тащить",
        );
        assert_eq!(verb.key(), "dra");
        assert_eq!(verb.form(VerbForm::Past).canonical(), "drog");
    }

    #[test]
    fn test_cell_status_scoring() {
        assert!(CellStatus::Correct.is_scored());
        assert!(CellStatus::Typo.is_scored());
        assert!(!CellStatus::Incorrect.is_scored());
        assert!(!CellStatus::Unanswered.is_scored());
        assert_eq!(CellStatus::from(AnswerClassification::Typo), CellStatus::Typo);
    }
}
