//! Best score per set.
//!
//! Storage belongs to the caller. The core only decides what the new best
//! should be.

use std::collections::HashMap;

/// Keeps the best percent ever reached per set name.
pub trait BestScoreStore: Send + Sync {
    /// Best score for the set, `0.0` if it was never played.
    fn get(&self, set_name: &str) -> f64;

    fn set(&mut self, set_name: &str, score: f64);
}

/// New best score after a session: the higher of the two.
pub fn best_score_candidate(existing_best: f64, session_percent: f64) -> f64 {
    existing_best.max(session_percent)
}

/// Write the session's score to the store if it beats the stored best.
///
/// Returns the best score after the update and whether it changed.
pub fn record_best_score<S>(store: &mut S, set_name: &str, session_percent: f64) -> (f64, bool)
where
    S: BestScoreStore + ?Sized,
{
    let existing = store.get(set_name);
    let candidate = best_score_candidate(existing, session_percent);
    let improved = candidate > existing;
    if improved {
        store.set(set_name, candidate);
    }
    (candidate, improved)
}

/// Store that lives as long as the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryBestScores {
    scores: HashMap<String, f64>,
}

impl InMemoryBestScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded scores.
    pub fn scores(&self) -> &HashMap<String, f64> {
        &self.scores
    }
}

impl BestScoreStore for InMemoryBestScores {
    fn get(&self, set_name: &str) -> f64 {
        self.scores.get(set_name).copied().unwrap_or(0.0)
    }

    fn set(&mut self, set_name: &str, score: f64) {
        self.scores.insert(set_name.to_string(), score);
    }
}
