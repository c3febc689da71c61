use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::IndexedRandom;
use regex::Regex;
use tracing::debug;

use crate::question::{Answer, Question, QuestionType};

pub const KEY_DELIMITER: char = ',';

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
// Full-width comma, enumeration comma and both semicolons all separate keys.
static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[，、;；]").unwrap());

pub fn normalize_reply(reply: &str) -> String {
    let compact = WHITESPACE_RE.replace_all(reply.trim(), "");
    DELIMITER_RE
        .replace_all(&compact, KEY_DELIMITER.to_string())
        .into_owned()
}

/// Tokens of the reply that name one of `keys`, in reply order, first occurrence only.
pub fn valid_keys_in_reply(reply: &str, keys: &[&str]) -> Vec<String> {
    let normalized = normalize_reply(reply);
    let mut found: Vec<String> = Vec::new();

    for token in normalized.split(KEY_DELIMITER) {
        if token.is_empty() {
            continue;
        }
        if !keys.contains(&token) {
            debug!("Dropping token {token:?}: not an option key");
            continue;
        }
        if found.iter().any(|seen| seen == token) {
            continue;
        }
        found.push(token.to_string());
    }

    found
}

/// Applies the per-type answer count rules.
///
/// Single-choice and poll answers are cut to their first key. Multiple-choice
/// answers with fewer than two keys are topped up with random unused keys,
/// provided the question has at least two options to pick from.
pub fn enforce_cardinality<R: Rng + ?Sized>(
    kind: QuestionType,
    mut answers: Vec<String>,
    keys: &[&str],
    rng: &mut R,
) -> Vec<String> {
    if let Some(max) = kind.max_answers() {
        answers.truncate(max);
        return answers;
    }

    let min = kind.min_answers();
    if keys.len() < min {
        return answers;
    }
    // Keeps going past one extra key so an answer with no valid key still reaches the minimum.
    while answers.len() < min {
        let remaining: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|key| !answers.iter().any(|answer| answer == key))
            .collect();
        let Some(extra) = remaining.choose(rng) else {
            break;
        };
        debug!("Backfilling {} answer with {extra}", kind.description());
        answers.push(extra.to_string());
    }

    answers
}

pub fn answer_from_reply<R: Rng + ?Sized>(question: &Question, reply: &str, rng: &mut R) -> Answer {
    let keys = question.keys();
    let answers = valid_keys_in_reply(reply, &keys);
    Answer::from(enforce_cardinality(question.kind, answers, &keys, rng))
}
