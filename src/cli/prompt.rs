//! Line-oriented prompts on the terminal
//!
//! Answers are read asynchronously so an interrupt can still be observed while
//! the session waits for input.

use std::io::{self, Write};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

use crate::errors::{PromptError, PromptResult};

/// Source of answers to interactive questions
#[async_trait]
pub trait Prompter: Send {
    /// Show `message` and return the trimmed answer
    async fn ask(&mut self, message: &str) -> PromptResult<String>;
}

/// Reads answers from standard input
pub struct StdinPrompter {
    reader: BufReader<Stdin>,
}

impl StdinPrompter {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for StdinPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for StdinPrompter {
    async fn ask(&mut self, message: &str) -> PromptResult<String> {
        print!("{}", message);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            return Err(PromptError::InputClosed);
        }

        Ok(line.trim().to_string())
    }
}

/// Ask a yes/no question, falling back to `default_yes` on an empty answer
pub async fn confirm(
    prompter: &mut dyn Prompter,
    message: &str,
    default_yes: bool,
) -> PromptResult<bool> {
    let answer = prompter.ask(message).await?.to_lowercase();
    Ok(match answer.as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        _ => false,
    })
}
