pub mod commands;
pub mod config;
pub mod llm;
pub mod logging;
pub mod palette;
pub mod parser;
pub mod question;
pub mod utils;

pub use config::{AiConfig, ConfigStore};
pub use llm::{answer_question, solve};
pub use question::{Answer, Question, QuestionOption, QuestionType};
