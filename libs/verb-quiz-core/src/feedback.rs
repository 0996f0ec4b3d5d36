//! Player-facing feedback text.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::types::{AnswerClassification, Answers};

pub const COMPLIMENT_MESSAGES: &[&str] = &[
    "Браво!",
    "Отлично сыграно!",
    "Неплохо!",
    "Молодец!",
    "Не верим своим глазам!",
    "Ура!",
    "Супер!",
    "Круто!",
    "Ты на высоте",
    "Ты просто супер!",
    "Правильно!",
    "Тебя не остановить!",
    "Ха, слишком легко!",
    "Не останавливайся!",
    "Ты умница!",
    "Ты просто непобедим!",
    "Ты на верном пути к успеху!",
    "Хорошая работа!",
];

pub const TYPO_MESSAGES: &[&str] = &[
    "Всё хорошо, но внимательнее!",
    "Только одна буква, это близко к совершенству",
    "Почти идеально",
    "Опечатки бывают у всех, не расстраивайся!",
    "Ой, опечаточка, но ничего!",
    "Немножко неточно",
];

pub const WRONG_ANSWER_MESSAGES: &[&str] = &[
    "Из ошибок тоже можно извлечь уроки",
    "Маленькие ошибки никогда тебя не остановят",
    "Сделай глубокий вдох и продолжай",
    "Не переживай, ошибаться - это нормально",
    "Нет ошибок, только опыт!",
    "Нельзя достичь успеха без ошибок",
    "Помни, что научиться чему-то новому требуется время и терпение",
    "Хм, это был сложный вопрос!",
];

/// Message pool for a classification.
pub fn messages_for(classification: AnswerClassification) -> &'static [&'static str] {
    match classification {
        AnswerClassification::Correct => COMPLIMENT_MESSAGES,
        AnswerClassification::Typo => TYPO_MESSAGES,
        AnswerClassification::Incorrect => WRONG_ANSWER_MESSAGES,
    }
}

/// Pick a random message from the classification's pool.
pub fn pick_message<R>(classification: AnswerClassification, rng: &mut R) -> &'static str
where
    R: Rng + ?Sized,
{
    let pool = messages_for(classification);
    pool.choose(rng).copied().unwrap_or(pool[0])
}

pub fn all_answers_message(answers: &Answers) -> String {
    format!("Все возможные варианты ответа: {}", answers.joined())
}

/// `current` is 1-based.
pub fn progress_message(current: usize, total: usize) -> String {
    format!("{current} вопрос из {total}")
}

pub fn results_message(total: usize, correct: usize) -> String {
    format!("{total} ответов, из них {correct} правильных, вау!")
}

pub fn completed_set_message(set_name: &str) -> String {
    format!("Ты прошёл набор #{set_name}")
}
