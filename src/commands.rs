//! Typed arguments for the external commands used during provisioning.
//!
//! - `SystemUpdateArgs` for `pacman -Syu`
//! - `PacmanInstallArgs` for `pacman -S --needed`
//! - `AurInstallArgs` for `<helper> -S --needed`
//! - `ShellArgs` for manifest `[cmd]` lines
//! - `GitCloneArgs` for fetching a PKGBUILD repository
//! - `MakepkgArgs` for building and installing a cloned package

use std::path::{Path, PathBuf};

use crate::command_args::CommandArgs;
use crate::types::AurHelper;

// ============================================================================
// System Update
// ============================================================================

/// `sudo pacman -Syu --noconfirm`
#[derive(Debug, Clone, Default)]
pub struct SystemUpdateArgs;

impl CommandArgs for SystemUpdateArgs {
    fn program(&self) -> &'static str {
        "sudo"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["pacman".into(), "-Syu".into(), "--noconfirm".into()]
    }
}

// ============================================================================
// Native Install
// ============================================================================

/// `sudo pacman -S --needed --noconfirm <packages...>`
///
/// All packages go into one batched call; a single invalid name fails the
/// whole batch.
#[derive(Debug, Clone)]
pub struct PacmanInstallArgs {
    pub packages: Vec<String>,
}

impl PacmanInstallArgs {
    pub fn new(packages: Vec<String>) -> Self {
        Self { packages }
    }
}

impl CommandArgs for PacmanInstallArgs {
    fn program(&self) -> &'static str {
        "sudo"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "pacman".to_string(),
            "-S".to_string(),
            "--needed".to_string(),
            "--noconfirm".to_string(),
        ];
        args.extend(self.packages.iter().cloned());
        args
    }
}

// ============================================================================
// AUR Install
// ============================================================================

/// `<helper> -S --needed --noconfirm <packages...>`
///
/// The helper escalates through sudo itself, so it is run unprivileged.
#[derive(Debug, Clone)]
pub struct AurInstallArgs {
    pub helper: AurHelper,
    pub packages: Vec<String>,
}

impl CommandArgs for AurInstallArgs {
    fn program(&self) -> &'static str {
        self.helper.binary()
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            "--needed".to_string(),
            "--noconfirm".to_string(),
        ];
        args.extend(self.packages.iter().cloned());
        args
    }
}

// ============================================================================
// Custom Shell Command
// ============================================================================

/// `bash -c <command>`
///
/// The command is manifest-supplied shell text passed through verbatim.
/// Nothing is escaped, validated, or sandboxed: whoever controls the
/// manifest controls this shell.
#[derive(Debug, Clone)]
pub struct ShellArgs {
    pub command: String,
}

impl CommandArgs for ShellArgs {
    fn program(&self) -> &'static str {
        "bash"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["-c".to_string(), self.command.clone()]
    }
}

// ============================================================================
// Git Clone
// ============================================================================

/// `git clone <url> <dest>`
#[derive(Debug, Clone)]
pub struct GitCloneArgs {
    pub url: String,
    pub dest: PathBuf,
}

impl CommandArgs for GitCloneArgs {
    fn program(&self) -> &'static str {
        "git"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec![
            "clone".to_string(),
            self.url.clone(),
            self.dest.display().to_string(),
        ]
    }
}

// ============================================================================
// Makepkg
// ============================================================================

/// `makepkg -si --noconfirm`, run inside the cloned package directory
#[derive(Debug, Clone)]
pub struct MakepkgArgs {
    pub dir: PathBuf,
}

impl CommandArgs for MakepkgArgs {
    fn program(&self) -> &'static str {
        "makepkg"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["-si".to_string(), "--noconfirm".to_string()]
    }

    fn working_dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}
