//! System mutation interface.
//!
//! [`SystemOps`] is the only way the pipeline touches the host: privilege
//! query, command lookup, operator confirmation, and running typed external
//! commands. [`HostSystem`] implements it against the real machine; tests
//! substitute a recording implementation.
//!
//! Every invocation is blocking. A zero exit status is success; anything
//! else becomes `ExternalCommandFailed` and stops the run.

use std::io::{self, BufRead, Write};
use std::process::{Command, Stdio};

use tracing::{error, info, warn};

use crate::command_args::CommandArgs;
use crate::error::{ProvisionError, Result};

/// Capabilities the orchestrator and bootstrap need from the host
pub trait SystemOps {
    /// True if the effective user is root.
    fn is_superuser(&self) -> bool;

    /// True if `name` resolves to an executable on `PATH`.
    fn command_exists(&self, name: &str) -> bool;

    /// Ask the operator a yes/no question.
    ///
    /// An empty answer is "no". A closed or unreadable stdin is an error,
    /// never a decline.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Run a command to completion; non-zero exit is an error.
    fn run(&mut self, args: &dyn CommandArgs) -> Result<()>;
}

/// [`SystemOps`] backed by the running machine
#[derive(Debug, Default)]
pub struct HostSystem {
    dry_run: bool,
}

impl HostSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// In dry-run mode commands are printed instead of executed.
    /// Privilege and command lookups still run.
    pub fn with_dry_run(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl SystemOps for HostSystem {
    fn is_superuser(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }

    fn command_exists(&self, name: &str) -> bool {
        // Name is passed as a positional parameter, never spliced into the script
        Command::new("sh")
            .args(["-c", "command -v \"$1\"", "sh", name])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        print!("{} [y/N] ", question);
        io::stdout().flush()?;

        let mut answer = String::new();
        let read = io::stdin().lock().read_line(&mut answer);
        interpret_answer(read, &answer)
    }

    fn run(&mut self, args: &dyn CommandArgs) -> Result<()> {
        let command_line = args.command_line();

        if self.dry_run {
            info!("dry-run: {}", command_line);
            println!("  [dry-run] {}", command_line);
            return Ok(());
        }

        info!(
            "run: {} args={:?} cwd={:?}",
            args.program(),
            args.to_cli_args(),
            args.working_dir()
        );

        // Output is inherited so pacman progress and sudo prompts reach the
        // operator's terminal.
        let mut cmd = Command::new(args.program());
        cmd.args(args.to_cli_args());
        if let Some(dir) = args.working_dir() {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|e| {
            error!("Failed to spawn {}: {}", args.program(), e);
            ProvisionError::command_failed(format!("{} ({})", command_line, e), None)
        })?;

        if status.success() {
            info!("Command succeeded: {}", command_line);
            Ok(())
        } else {
            error!("Command failed with exit code {:?}: {}", status.code(), command_line);
            Err(ProvisionError::command_failed(command_line, status.code()))
        }
    }
}

/// Map the outcome of reading stdin to a confirmation.
fn interpret_answer(read: io::Result<usize>, answer: &str) -> Result<bool> {
    match read {
        Ok(0) => {
            warn!("stdin closed before confirmation");
            Err(ProvisionError::ConfirmationUnavailable)
        }
        Ok(_) => Ok(parse_answer(answer)),
        Err(e) => {
            warn!("Failed to read confirmation: {}", e);
            Err(ProvisionError::ConfirmationUnavailable)
        }
    }
}

fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
