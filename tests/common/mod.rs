//! Shared test doubles for integration tests

#![allow(dead_code)]

use archsetup::command_args::CommandArgs;
use archsetup::{ProvisionError, Result, SystemOps};

/// `SystemOps` that records every invocation instead of executing it.
#[derive(Debug, Default)]
pub struct RecordingSystem {
    pub superuser: bool,
    /// Binaries reported as present by `command_exists`
    pub installed: Vec<String>,
    /// Answer returned by `confirm`
    pub confirm_answer: bool,
    /// Behave as if stdin were closed when asked to confirm
    pub stdin_closed: bool,
    /// Command lines passed to `run`, in order
    pub calls: Vec<String>,
    /// Command line prefixes that fail with exit code 1
    pub failing: Vec<String>,
    pub questions: Vec<String>,
}

impl RecordingSystem {
    /// Regular user, helper already installed, confirms everything
    pub fn ready() -> Self {
        Self {
            installed: vec!["paru".to_string()],
            confirm_answer: true,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<&String> {
        self.calls.iter().filter(|c| c.starts_with(prefix)).collect()
    }
}

impl SystemOps for RecordingSystem {
    fn is_superuser(&self) -> bool {
        self.superuser
    }

    fn command_exists(&self, name: &str) -> bool {
        self.installed.iter().any(|b| b == name)
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.questions.push(question.to_string());
        if self.stdin_closed {
            return Err(ProvisionError::ConfirmationUnavailable);
        }
        Ok(self.confirm_answer)
    }

    fn run(&mut self, args: &dyn CommandArgs) -> Result<()> {
        let line = args.command_line();
        self.calls.push(line.clone());
        if self.failing.iter().any(|p| line.starts_with(p)) {
            return Err(ProvisionError::command_failed(line, Some(1)));
        }
        Ok(())
    }
}
