use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueHint};

use quiz_oracle::commands::{answer, demo};
use quiz_oracle::config::ConfigStore;
use quiz_oracle::{llm, logging};

#[derive(Parser, Debug)]
#[command(
    name = "quiz-oracle",
    version,
    about = "Answer quiz questions with an LLM.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Config file holding the `ai_config` section. Defaults to the platform config directory.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a question read from a JSON file
    Answer {
        /// Question file with `type`, `body` and `options`. Use `-` for stdin.
        #[arg(value_name = "PATH", value_hint = ValueHint::FilePath)]
        path: PathBuf,
        /// Print the answer as a JSON array
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Answer one sample question of each type
    Demo,
    /// Manage LLM settings
    Llm {
        /// Store an API key in the config file. Prompts for it when no value is given.
        #[arg(long, value_name = "KEY", num_args = 0..=1, conflicts_with = "clear")]
        set: Option<Option<String>>,
        /// Remove the stored API key from the config file
        #[arg(long, conflicts_with = "test")]
        clear: bool,
        /// Verify the configured API key by listing the endpoint's models
        #[arg(long, conflicts_with = "clear")]
        test: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_location()?,
    };

    match cli.command {
        Command::Answer { path, json } => answer::run(&store, path, json).await?,
        Command::Demo => demo::run(&store).await?,
        Command::Llm { set, clear, test } => handle_llm_command(&store, set, clear, test).await?,
    }

    Ok(())
}

async fn handle_llm_command(
    store: &ConfigStore,
    set: Option<Option<String>>,
    clear: bool,
    test: bool,
) -> Result<()> {
    let mut action_taken = false;

    if let Some(key) = set {
        let key = match key {
            Some(key) => key,
            None => llm::prompt_for_api_key()?,
        };
        if key.trim().is_empty() {
            bail!("No API key provided.");
        }
        store.store_api_key(&key)?;
        println!("Stored API key in {}.", store.path().display());
        action_taken = true;
    }

    if clear {
        let removed = store.clear_api_key()?;
        if removed {
            println!("Removed the stored API key.");
        } else {
            println!("No API key found in {}.", store.path().display());
        }
        action_taken = true;
    }

    if test {
        let source = llm::test_configured_api_key(store).await?;
        println!("API key from the {} is valid.", source.description());
        action_taken = true;
    }

    if !action_taken {
        bail!("No action provided. Use --set, --clear, or --test.");
    }
    Ok(())
}
