//! Per-verb, per-form answer statistics and the score derived from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{AnswerClassification, CellStatus, Rank, RankThresholds, VerbForm, VerbSet};

/// Results of one verb across the four forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub verb: String,
    /// Indexed by [`VerbForm::index`].
    pub forms: [CellStatus; 4],
}

impl ResultRow {
    fn unanswered(verb: &str) -> Self {
        Self {
            verb: verb.to_string(),
            forms: [CellStatus::Unanswered; 4],
        }
    }

    pub fn status(&self, form: VerbForm) -> CellStatus {
        self.forms[form.index()]
    }
}

/// Statistics for one session.
///
/// Holds one row per verb of the set, every cell starting out unanswered.
/// Verb keys are expected to be unique within the set, as
/// [`VerbCatalog`](crate::VerbCatalog) guarantees. Rows recorded for verbs outside the set are kept for
/// inspection but never count toward the score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTracker {
    rows: Vec<ResultRow>,
    index: HashMap<String, usize>,
    /// Rows `0..set_len` belong to the set.
    set_len: usize,
    thresholds: RankThresholds,
}

impl ScoreTracker {
    pub fn new(set: &VerbSet) -> Self {
        Self::with_thresholds(set, RankThresholds::default())
    }

    pub fn with_thresholds(set: &VerbSet, thresholds: RankThresholds) -> Self {
        let mut tracker = Self {
            rows: Vec::with_capacity(set.verbs.len()),
            index: HashMap::with_capacity(set.verbs.len()),
            set_len: 0,
            thresholds,
        };

        for verb in &set.verbs {
            tracker.row_mut(verb.key());
        }
        tracker.set_len = tracker.rows.len();

        tracker
    }

    fn row_mut(&mut self, verb_key: &str) -> &mut ResultRow {
        let idx = match self.index.get(verb_key) {
            Some(&idx) => idx,
            None => {
                self.rows.push(ResultRow::unanswered(verb_key));
                self.index.insert(verb_key.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }

    /// Record a classification. Last write wins.
    pub fn record(&mut self, verb_key: &str, form: VerbForm, classification: AnswerClassification) {
        self.row_mut(verb_key).forms[form.index()] = classification.into();
    }

    /// Status of a cell, `None` for an unknown verb.
    pub fn status(&self, verb_key: &str, form: VerbForm) -> Option<CellStatus> {
        self.index
            .get(verb_key)
            .map(|&idx| self.rows[idx].status(form))
    }

    /// Rows of the set's verbs, in set order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows[..self.set_len]
    }

    /// Number of scored cells: the set's verbs times four forms.
    pub fn question_count(&self) -> usize {
        self.set_len * VerbForm::ALL.len()
    }

    /// Cells answered correctly or with a typo.
    pub fn count_correct(&self) -> usize {
        self.rows()
            .iter()
            .flat_map(|row| row.forms.iter())
            .filter(|status| status.is_scored())
            .count()
    }

    /// Share of scored cells in percent, within `0.0..=100.0`.
    ///
    /// Unanswered cells count as zero, so an interrupted session scores only
    /// what was answered.
    pub fn calculate_percent(&self) -> f64 {
        let total = self.question_count();
        if total == 0 {
            return 0.0;
        }

        let percent = 100.0 * self.count_correct() as f64 / total as f64;
        percent.clamp(0.0, 100.0)
    }

    pub fn calculate_rank(&self) -> Rank {
        self.thresholds.rank(self.calculate_percent())
    }
}
