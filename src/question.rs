use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Poll,
    /// Any code the quiz platform sends that we don't have a dedicated prompt for.
    Other(i64),
}

impl From<i64> for QuestionType {
    fn from(code: i64) -> Self {
        match code {
            1 => QuestionType::SingleChoice,
            2 => QuestionType::MultipleChoice,
            3 => QuestionType::Poll,
            other => QuestionType::Other(other),
        }
    }
}

impl From<QuestionType> for i64 {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::SingleChoice => 1,
            QuestionType::MultipleChoice => 2,
            QuestionType::Poll => 3,
            QuestionType::Other(code) => code,
        }
    }
}

impl QuestionType {
    /// Upper bound on how many keys an answer may carry, if any.
    pub fn max_answers(&self) -> Option<usize> {
        match self {
            QuestionType::SingleChoice | QuestionType::Poll => Some(1),
            QuestionType::MultipleChoice | QuestionType::Other(_) => None,
        }
    }

    pub fn min_answers(&self) -> usize {
        match self {
            QuestionType::MultipleChoice => 2,
            _ => 0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single choice",
            QuestionType::MultipleChoice => "multiple choice",
            QuestionType::Poll => "poll",
            QuestionType::Other(_) => "unknown type",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub key: String,
    pub value: String,
}

impl QuestionOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub body: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn new(kind: QuestionType, body: impl Into<String>, options: Vec<QuestionOption>) -> Self {
        Self {
            kind,
            body: body.into(),
            options,
        }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let question: Question = serde_json::from_str(contents)?;
        question.validate()?;
        Ok(question)
    }

    /// Keys must be non-empty and unique within the question.
    pub fn validate(&self) -> Result<()> {
        for (idx, option) in self.options.iter().enumerate() {
            if option.key.trim().is_empty() {
                bail!("Option #{} has an empty key", idx + 1);
            }
            // Replies are matched after all whitespace is stripped.
            if option.key.chars().any(char::is_whitespace) {
                bail!("Option key {:?} contains whitespace", option.key);
            }
            if self.options[..idx].iter().any(|prev| prev.key == option.key) {
                bail!("Duplicate option key: {}", option.key);
            }
        }
        Ok(())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.key.as_str()).collect()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Answer(Vec<String>);

impl Answer {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_keys(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Answer {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}
