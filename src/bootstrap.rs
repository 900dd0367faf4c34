//! AUR helper bootstrap.
//!
//! Ensures the configured helper binary is on `PATH`. When it is missing the
//! helper is built from its AUR recipe:
//!
//! ```text
//! pacman -S --needed git base-devel
//! git clone https://aur.archlinux.org/<helper>.git <scratch>/<helper>
//! (cd <scratch>/<helper> && makepkg -si --noconfirm)
//! ```
//!
//! The scratch directory is removed when the bootstrap returns, on success
//! or failure; a removal failure after a successful build is logged as a
//! warning. A failed clone or build is not rolled back.

use std::path::Path;

use tracing::{info, warn};

use crate::commands::{GitCloneArgs, MakepkgArgs, PacmanInstallArgs};
use crate::error::Result;
use crate::system::SystemOps;
use crate::types::AurHelper;

/// Packages needed to build anything from the AUR
pub const BUILD_PREREQUISITES: &[&str] = &["git", "base-devel"];

/// Result of [`ensure_aur_helper`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Helper was already on `PATH`; nothing was done
    AlreadyInstalled,
    /// Helper was built and installed
    Installed,
}

/// Make sure `helper` is installed, building it from source if needed.
///
/// `scratch_parent` selects where the temporary build directory is created;
/// `None` uses the system temp directory.
pub fn ensure_aur_helper(
    ops: &mut dyn SystemOps,
    helper: AurHelper,
    scratch_parent: Option<&Path>,
) -> Result<BootstrapOutcome> {
    if ops.command_exists(helper.binary()) {
        info!("AUR helper {} already installed", helper);
        return Ok(BootstrapOutcome::AlreadyInstalled);
    }

    info!("AUR helper {} not found, building from {}", helper, helper.recipe_url());

    ops.run(&PacmanInstallArgs::new(
        BUILD_PREREQUISITES.iter().map(|p| p.to_string()).collect(),
    ))?;

    let mut builder = tempfile::Builder::new();
    builder.prefix("archsetup-");
    let scratch = match scratch_parent {
        Some(parent) => builder.tempdir_in(parent)?,
        None => builder.tempdir()?,
    };
    let build_dir = scratch.path().join(helper.binary());

    ops.run(&GitCloneArgs {
        url: helper.recipe_url(),
        dest: build_dir.clone(),
    })?;
    ops.run(&MakepkgArgs { dir: build_dir })?;

    // On the error paths above the build tree goes with the `TempDir` drop
    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!("Failed to remove build directory {}: {}", scratch_path.display(), e);
    }

    info!("AUR helper {} installed", helper);
    Ok(BootstrapOutcome::Installed)
}
