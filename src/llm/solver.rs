use anyhow::Result;
use tracing::{info, warn};

use crate::config::ConfigStore;
use crate::parser::answer_from_reply;
use crate::question::{Answer, Question};

use super::prompt::{SYSTEM_PROMPT, build_user_prompt};
use super::response::{ChatCompletionService, CompletionService};

/// Asks the model for the answer to `question` and keeps only the option keys it names.
///
/// Never fails: any error on the way (bad credentials, network, timeout, an empty
/// reply) is logged and turned into an empty answer.
pub async fn solve<S: CompletionService>(service: &S, question: &Question) -> Answer {
    match request_reply(service, question).await {
        Ok(reply) => {
            let answer = answer_from_reply(question, &reply, &mut rand::rng());
            info!(
                "Answered {} question with [{answer}] (raw reply {reply:?})",
                question.kind.description()
            );
            answer
        }
        Err(err) => {
            warn!("Failed to get an answer from the LLM: {err:#}");
            Answer::empty()
        }
    }
}

async fn request_reply<S: CompletionService>(service: &S, question: &Question) -> Result<String> {
    let user_prompt = build_user_prompt(question);
    service.complete(SYSTEM_PROMPT, &user_prompt).await
}

/// Resolves the configured endpoint from `store` and solves `question` against it.
pub async fn answer_question(store: &ConfigStore, question: &Question) -> Answer {
    let resolved = store.resolve();
    let service = match ChatCompletionService::from_config(&resolved.ai) {
        Ok(service) => service,
        Err(err) => {
            warn!("Failed to set up the LLM client: {err:#}");
            return Answer::empty();
        }
    };
    solve(&service, question).await
}
