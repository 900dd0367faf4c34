//! Type-safe configuration types for archsetup

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Base URL of the AUR git repositories
pub const AUR_GIT_BASE: &str = "https://aur.archlinux.org";

/// AUR helper selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AurHelper {
    #[default]
    Paru,
    Yay,
}

impl AurHelper {
    /// Name of the helper executable (also its AUR package name)
    pub const fn binary(self) -> &'static str {
        match self {
            Self::Paru => "paru",
            Self::Yay => "yay",
        }
    }

    /// Canonical source-package repository holding the helper's PKGBUILD
    pub fn recipe_url(self) -> String {
        format!("{}/{}.git", AUR_GIT_BASE, self.binary())
    }
}
