//! archsetup library
//!
//! Manifest-driven provisioning for Arch Linux: reads a line-oriented
//! manifest, splits it into native packages, AUR packages, and custom shell
//! commands, and installs them in a fixed, stop-on-first-error order.

pub mod bootstrap;
pub mod cli;
pub mod command_args;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod provision;
pub mod source;
pub mod system;
pub mod types;

// Re-export main types for convenience
pub use bootstrap::{ensure_aur_helper, BootstrapOutcome};
pub use command_args::CommandArgs;
pub use config::ProvisionConfig;
pub use error::{ProvisionError, Result};
pub use manifest::{Directive, InstallPlan, PlanSummary};
pub use orchestrator::{InstallStage, Orchestrator, RunOutcome, RunReport, StageStatus};
pub use provision::provision;
pub use source::ManifestSource;
pub use system::{HostSystem, SystemOps};
pub use types::AurHelper;
