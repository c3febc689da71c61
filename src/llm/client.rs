use anyhow::{Context, Result, anyhow};

use async_openai::{Client, config::OpenAIConfig};
use tracing::warn;

use crate::config::{API_KEY_ENV, AiConfig, ApiKeySource, ConfigStore};

pub fn initialize_client(config: &AiConfig) -> Result<Client<OpenAIConfig>> {
    if !config.has_api_key() {
        warn!(
            "No API key configured; requests to {} will likely be rejected. Set {} or run `quiz-oracle llm --set <KEY>`.",
            config.base_url, API_KEY_ENV
        );
    }

    let openai_config = OpenAIConfig::new()
        .with_api_key(config.api_key.trim())
        .with_api_base(config.base_url.trim_end_matches('/'));

    let client = Client::with_config(openai_config);
    Ok(client)
}

pub async fn test_configured_api_key(store: &ConfigStore) -> Result<ApiKeySource> {
    let resolved = store.resolve();
    let source = resolved.source.ok_or_else(|| {
        anyhow!(
            "No API key configured. To enable, set {} or run `quiz-oracle llm --set <KEY>`.",
            API_KEY_ENV
        )
    })?;
    let client = initialize_client(&resolved.ai)?;
    healthcheck_client(&client, &resolved.ai.base_url).await?;
    Ok(source)
}

async fn healthcheck_client(client: &Client<OpenAIConfig>, base_url: &str) -> Result<()> {
    client
        .models()
        .list()
        .await
        .with_context(|| format!("Failed to validate API key with {base_url}"))?;
    Ok(())
}
