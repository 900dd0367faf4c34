//! Installer orchestration.
//!
//! Runs an [`InstallPlan`] through a fixed sequence of stages:
//!
//! ```text
//! PrivilegeCheck
//!     ↓
//! EnsureAurHelper      (always runs; no-op when the helper exists)
//!     ↓
//! SystemUpdate         (always runs)
//!     ↓
//! InstallNative        (skipped when no native packages)
//!     ↓
//! InstallAur           (skipped when no AUR packages)
//!     ↓
//! RunCustomCommands    (skipped when no commands)
//!     ↓
//! Completed
//! ```
//!
//! Each stage returns a `Result`; the first error stops the run and is
//! returned to the caller. There are no retries and no rollback.
//!
//! # Custom commands
//!
//! `[cmd]` entries are handed to `bash -c` exactly as written in the
//! manifest. This is an unsandboxed trust boundary: the manifest author can
//! run anything the invoking user (and sudo) can. Entries are not escaped or
//! validated, since doing so would change which manifests are accepted.

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info};

use crate::bootstrap::{self, BootstrapOutcome};
use crate::commands::{AurInstallArgs, PacmanInstallArgs, ShellArgs, SystemUpdateArgs};
use crate::console;
use crate::error::{ProvisionError, Result};
use crate::manifest::InstallPlan;
use crate::system::SystemOps;
use crate::types::AurHelper;

/// Orchestrator stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InstallStage {
    NotStarted = 0,
    PrivilegeCheck = 1,
    EnsureAurHelper = 2,
    SystemUpdate = 3,
    InstallNative = 4,
    InstallAur = 5,
    RunCustomCommands = 6,
    Completed = 7,
}

impl InstallStage {
    /// Numeric order of this stage
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Next stage, or `None` once completed
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::NotStarted => Some(Self::PrivilegeCheck),
            Self::PrivilegeCheck => Some(Self::EnsureAurHelper),
            Self::EnsureAurHelper => Some(Self::SystemUpdate),
            Self::SystemUpdate => Some(Self::InstallNative),
            Self::InstallNative => Some(Self::InstallAur),
            Self::InstallAur => Some(Self::RunCustomCommands),
            Self::RunCustomCommands => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Banner text for this stage
    pub const fn description(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::PrivilegeCheck => "Checking privileges",
            Self::EnsureAurHelper => "Ensuring AUR helper",
            Self::SystemUpdate => "Updating system",
            Self::InstallNative => "Installing native packages",
            Self::InstallAur => "Installing AUR packages",
            Self::RunCustomCommands => "Running custom commands",
            Self::Completed => "Provisioning complete",
        }
    }

    /// The stages that do work, in order
    pub const fn pipeline() -> &'static [Self] {
        &[
            Self::PrivilegeCheck,
            Self::EnsureAurHelper,
            Self::SystemUpdate,
            Self::InstallNative,
            Self::InstallAur,
            Self::RunCustomCommands,
        ]
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// How a stage finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// Stage did its work
    Completed,
    /// Input collection was empty; nothing was invoked
    Skipped,
    /// Requirement already met (AUR helper present)
    AlreadySatisfied,
}

/// Per-stage results of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub stages: Vec<(InstallStage, StageStatus)>,
}

impl RunReport {
    /// Status recorded for `stage`, if it ran
    pub fn status(&self, stage: InstallStage) -> Option<StageStatus> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, status)| *status)
    }
}

/// How a run ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// All stages finished
    Completed(RunReport),
    /// Operator declined the confirmation prompt; nothing was changed.
    ///
    /// A prompt that cannot be answered is `ConfirmationUnavailable`, not this.
    Cancelled,
}

/// Drives an [`InstallPlan`] through the stage pipeline.
pub struct Orchestrator<'a> {
    ops: &'a mut dyn SystemOps,
    helper: AurHelper,
    assume_yes: bool,
    scratch_dir: Option<PathBuf>,
    current: InstallStage,
}

impl<'a> Orchestrator<'a> {
    pub fn new(ops: &'a mut dyn SystemOps, helper: AurHelper) -> Self {
        Self {
            ops,
            helper,
            assume_yes: false,
            scratch_dir: None,
            current: InstallStage::NotStarted,
        }
    }

    /// Skip the confirmation prompt
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Parent directory for the helper build
    pub fn scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Stage currently (or last) being executed.
    ///
    /// After a failed run this is the stage that failed.
    pub fn current_stage(&self) -> InstallStage {
        self.current
    }

    /// Execute every stage against `plan`.
    pub fn run(&mut self, plan: &InstallPlan) -> Result<RunOutcome> {
        let mut report = RunReport::default();

        for &stage in InstallStage::pipeline() {
            self.current = stage;
            console::banner(stage.description());
            info!("Entering stage {:?}", stage);

            let status = match self.run_stage(stage, plan) {
                Ok(status) => status,
                Err(e) => {
                    error!("Stage {:?} failed: {}", stage, e);
                    return Err(e);
                }
            };

            match status {
                StageStatus::Completed => console::success(&format!("{} done", stage)),
                StageStatus::Skipped => console::success(&format!("{}: nothing to do", stage)),
                StageStatus::AlreadySatisfied => {
                    console::success(&format!("{}: already satisfied", stage))
                }
            }
            report.stages.push((stage, status));

            if stage == InstallStage::PrivilegeCheck && !self.confirm(plan)? {
                info!("Operator declined confirmation");
                console::note("Cancelled; no changes were made.");
                return Ok(RunOutcome::Cancelled);
            }
        }

        self.current = InstallStage::Completed;
        info!("All stages finished");
        Ok(RunOutcome::Completed(report))
    }

    fn confirm(&mut self, plan: &InstallPlan) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let question = format!("Proceed with installation of {}?", plan.summary());
        self.ops.confirm(&question)
    }

    fn run_stage(&mut self, stage: InstallStage, plan: &InstallPlan) -> Result<StageStatus> {
        match stage {
            InstallStage::PrivilegeCheck => self.check_privileges(),
            InstallStage::EnsureAurHelper => self.ensure_helper(),
            InstallStage::SystemUpdate => {
                self.ops.run(&SystemUpdateArgs)?;
                Ok(StageStatus::Completed)
            }
            InstallStage::InstallNative => self.install_native(plan.native()),
            InstallStage::InstallAur => self.install_aur(plan.aur()),
            InstallStage::RunCustomCommands => self.run_commands(plan.commands()),
            InstallStage::NotStarted | InstallStage::Completed => Ok(StageStatus::Skipped),
        }
    }

    fn check_privileges(&mut self) -> Result<StageStatus> {
        if self.ops.is_superuser() {
            return Err(ProvisionError::InvalidPrivilegeLevel);
        }
        Ok(StageStatus::Completed)
    }

    fn ensure_helper(&mut self) -> Result<StageStatus> {
        let outcome =
            bootstrap::ensure_aur_helper(&mut *self.ops, self.helper, self.scratch_dir.as_deref())?;
        Ok(match outcome {
            BootstrapOutcome::AlreadyInstalled => StageStatus::AlreadySatisfied,
            BootstrapOutcome::Installed => StageStatus::Completed,
        })
    }

    fn install_native(&mut self, packages: &[String]) -> Result<StageStatus> {
        if packages.is_empty() {
            return Ok(StageStatus::Skipped);
        }
        for name in packages {
            console::note(&format!("- {}", name));
        }
        self.ops.run(&PacmanInstallArgs::new(packages.to_vec()))?;
        Ok(StageStatus::Completed)
    }

    fn install_aur(&mut self, packages: &[String]) -> Result<StageStatus> {
        if packages.is_empty() {
            return Ok(StageStatus::Skipped);
        }
        for name in packages {
            console::note(&format!("- {}", name));
        }
        self.ops.run(&AurInstallArgs {
            helper: self.helper,
            packages: packages.to_vec(),
        })?;
        Ok(StageStatus::Completed)
    }

    fn run_commands(&mut self, commands: &[String]) -> Result<StageStatus> {
        if commands.is_empty() {
            return Ok(StageStatus::Skipped);
        }
        for command in commands {
            console::note(&format!("$ {}", command));
            self.ops.run(&ShellArgs {
                command: command.clone(),
            })?;
        }
        Ok(StageStatus::Completed)
    }
}
