pub mod client;
pub mod prompt;
pub mod response;
pub mod secrets;
pub mod solver;

pub use client::{initialize_client, test_configured_api_key};
pub use prompt::{SYSTEM_PROMPT, build_user_prompt};
pub use response::{ChatCompletionService, CompletionService};
pub use secrets::prompt_for_api_key;
pub use solver::{answer_question, solve};
