use anyhow::{Context, Result};
use dialoguer::{Password, theme::ColorfulTheme};

use crate::palette::Palette;
use crate::utils::strip_controls_and_escapes;

pub fn prompt_for_api_key() -> Result<String> {
    println!(
        "{} for the chat-completion endpoint in your config (DeepSeek by default). It's stored locally for future use.",
        Palette::paint(Palette::SUCCESS, "Enter your API key")
    );
    println!("{}", Palette::dim("Leave the field blank to cancel."));
    let raw_password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("API Key")
        .allow_empty_password(true)
        .interact()
        .with_context(|| "Failed to read API key from the terminal")?;

    Ok(sanitize_api_key(&raw_password))
}

fn sanitize_api_key(raw: &str) -> String {
    strip_controls_and_escapes(raw).trim().to_string()
}
