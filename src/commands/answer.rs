use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{config::ConfigStore, llm::answer_question, question::Question};

pub async fn run(store: &ConfigStore, question_path: PathBuf, json: bool) -> Result<()> {
    let question = read_question(&question_path)?;
    let answer = answer_question(store, &question).await;

    if json {
        println!("{}", serde_json::to_string(&answer)?);
    } else {
        println!("{answer}");
    }
    Ok(())
}

fn read_question(path: &Path) -> Result<Question> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .with_context(|| "Failed to read question from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read question file {}", path.display()))?
    };

    Question::from_json(&contents)
        .with_context(|| format!("Invalid question in {}", path.display()))
}
