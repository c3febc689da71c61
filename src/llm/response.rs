use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use tracing::debug;

use crate::config::AiConfig;

use super::client::initialize_client;

/// Low sampling temperature keeps the model on the most likely option letters.
pub const ANSWER_TEMPERATURE: f32 = 0.15;

/// A remote model that turns a system and user prompt into one text reply.
pub trait CompletionService {
    fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// [`CompletionService`] backed by any OpenAI-compatible chat-completion API.
#[derive(Clone, Debug)]
pub struct ChatCompletionService {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl ChatCompletionService {
    pub fn new(client: Client<OpenAIConfig>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: ANSWER_TEMPERATURE,
            timeout,
        }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let client = initialize_client(config)?;
        Ok(Self::new(
            client,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }
}

impl CompletionService for ChatCompletionService {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        request_single_text_response(
            &self.client,
            &self.model,
            self.temperature,
            self.timeout,
            system_prompt,
            user_prompt,
        )
        .await
    }
}

pub async fn request_single_text_response(
    client: &Client<OpenAIConfig>,
    model: &str,
    temperature: f32,
    timeout: Duration,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String> {
    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()?
                .into(),
        ])
        .temperature(temperature)
        .stream(false)
        .build()?;

    let response = tokio::time::timeout(timeout, client.chat().create(request))
        .await
        .with_context(|| format!("LLM did not answer within {}s", timeout.as_secs()))?
        .with_context(|| "Failed to get response from LLM")?;

    for choice in response.choices {
        let Some(content) = choice.message.content else {
            continue;
        };
        let trimmed = content.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!("LLM replied: {trimmed}");
        return Ok(trimmed.to_string());
    }

    bail!("No text output returned from model")
}
