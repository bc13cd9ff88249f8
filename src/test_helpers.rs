//! Fakes for the process and prompt seams, shared by unit tests

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::runner::{CommandOutput, OutputMode, ProcessRunner};
use crate::cli::prompt::Prompter;
use crate::errors::{PromptError, PromptResult, ToolError, ToolResult};

/// Answers questions from a fixed script and records what was asked
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, message: &str) -> PromptResult<String> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or(PromptError::InputClosed)
    }
}

/// Canned reply for one pac subcommand
#[derive(Clone)]
pub enum Reply {
    Output(CommandOutput),
    /// Exit zero and write an archive of `size` bytes at the `--path` argument
    WriteArchive { size: usize },
    Missing,
}

impl Reply {
    pub fn ok(stdout: &str) -> Self {
        Reply::Output(CommandOutput {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    pub fn failed(exit_code: i32, stderr: &str) -> Self {
        Reply::Output(CommandOutput {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }
}

/// Records invocations and answers them by subcommand prefix
#[derive(Default)]
pub struct FakeRunner {
    replies: Vec<(Vec<String>, Reply)>,
    calls: Mutex<Vec<(Vec<String>, OutputMode)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer invocations whose arguments start with `prefix`
    pub fn on(mut self, prefix: &[&str], reply: Reply) -> Self {
        self.replies
            .push((prefix.iter().map(|s| s.to_string()).collect(), reply));
        self
    }

    pub fn calls(&self) -> Vec<(Vec<String>, OutputMode)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, args: &[&str], mode: OutputMode) -> ToolResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((args.clone(), mode));
        }

        let reply = self
            .replies
            .iter()
            .find(|(prefix, _)| args.starts_with(prefix))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Reply::failed(1, "unexpected command"));

        match reply {
            Reply::Output(output) => Ok(output),
            Reply::WriteArchive { size } => {
                let path = args
                    .iter()
                    .position(|a| a == "--path")
                    .and_then(|i| args.get(i + 1))
                    .map(PathBuf::from)
                    .ok_or_else(|| ToolError::NotFound {
                        executable: "pac".to_string(),
                    })?;
                std::fs::write(&path, vec![0u8; size]).map_err(|source| ToolError::Spawn {
                    executable: "pac".to_string(),
                    source,
                })?;
                Ok(CommandOutput::default())
            }
            Reply::Missing => Err(ToolError::NotFound {
                executable: "pac".to_string(),
            }),
        }
    }
}
