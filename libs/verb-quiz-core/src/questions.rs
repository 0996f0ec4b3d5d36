//! Question generation: one question per verb per form.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::feedback;
use crate::matching::classify_answer;
use crate::types::{AnswerClassification, Answers, Verb, VerbForm, VerbSet};

pub const INFINITIVE_PROMPT: &str = "Как сказать это слово по-норвежски?";
pub const PRESENT_PROMPT: &str = "А как сказать это слово в настоящем времени?";
pub const PAST_PROMPT: &str = "Как будет это слово в прошедшем времени?";
pub const PERFECT_PROMPT: &str = "А в Present Perfect (напиши ответ без har)?";

/// A single quiz card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub verb: Arc<Verb>,
    pub form: VerbForm,
    /// The word shown on the card: the translation for the infinitive
    /// question, the canonical infinitive otherwise.
    pub displayed_word: String,
    pub accepted: Answers,
    pub note: Option<String>,
}

impl Question {
    fn new(verb: &Arc<Verb>, form: VerbForm) -> Self {
        let (prompt, displayed_word, note) = match form {
            VerbForm::Infinitive => (
                INFINITIVE_PROMPT,
                verb.translation.clone(),
                verb.note.clone(),
            ),
            VerbForm::Present => (PRESENT_PROMPT, verb.key().to_string(), Some(translation_hint(verb))),
            VerbForm::Past => (PAST_PROMPT, verb.key().to_string(), Some(translation_hint(verb))),
            VerbForm::Perfect => (PERFECT_PROMPT, verb.key().to_string(), Some(translation_hint(verb))),
        };

        Self {
            prompt,
            verb: Arc::clone(verb),
            form,
            displayed_word,
            accepted: verb.form(form).clone(),
            note,
        }
    }

    /// Statistics key of the verb this question is about.
    pub fn verb_key(&self) -> &str {
        self.verb.key()
    }

    /// Grade an already-normalized answer.
    pub fn classify(&self, submission: &str) -> AnswerClassification {
        classify_answer(submission, &self.accepted)
    }

    pub fn most_used_answer(&self) -> &str {
        self.accepted.canonical()
    }

    pub fn all_answers_message(&self) -> String {
        feedback::all_answers_message(&self.accepted)
    }

    /// Line shown under the displayed word: the note, or the set subtitle.
    pub fn subtitle(&self, set: &VerbSet) -> String {
        self.note.clone().unwrap_or_else(|| set.subtitle())
    }
}

fn translation_hint(verb: &Verb) -> String {
    format!("Перевод слова - {}", verb.translation)
}

/// Build the question sequence for a session.
///
/// The set's verbs are copied and shuffled; the set itself is left untouched.
/// Each verb then yields its four questions in [`VerbForm::ALL`] order.
pub fn make_questions<R>(set: &VerbSet, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    let mut verbs: Vec<Arc<Verb>> = set.verbs.iter().cloned().map(Arc::new).collect();
    verbs.shuffle(rng);

    verbs
        .iter()
        .flat_map(|verb| VerbForm::ALL.map(|form| Question::new(verb, form)))
        .collect()
}
