//! Manifest parsing.
//!
//! A manifest is line-oriented text. Each line is classified independently:
//!
//! ```text
//! # comment            -> skipped
//!                      -> skipped (blank)
//! [cmd] echo done      -> Command("echo done")
//! [aur] paru-bin       -> AurPackage("paru-bin")
//! firefox              -> NativePackage("firefox")
//! ```
//!
//! Markers are checked in that order (`[cmd]` before `[aur]` before the
//! native fallthrough). Only edge whitespace is trimmed, so the payload of a
//! `[cmd]` line keeps its internal spacing and any later `#` characters.
//! A marker with nothing after it yields an empty entry; it is passed through
//! unchanged and left for the package manager or shell to reject.

use std::fmt;

/// Marker selecting the custom shell command mechanism
pub const CMD_MARKER: &str = "[cmd]";

/// Marker selecting the AUR mechanism
pub const AUR_MARKER: &str = "[aur]";

/// One classified manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Package installed through pacman
    NativePackage(String),
    /// Package installed through the AUR helper
    AurPackage(String),
    /// Opaque shell text, evaluated verbatim
    Command(String),
}

impl Directive {
    /// Classify a raw manifest line.
    ///
    /// Returns `None` for blank and comment lines.
    pub fn classify(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let directive = if let Some(rest) = line.strip_prefix(CMD_MARKER) {
            Self::Command(rest.trim().to_string())
        } else if let Some(rest) = line.strip_prefix(AUR_MARKER) {
            Self::AurPackage(rest.trim().to_string())
        } else {
            Self::NativePackage(line.to_string())
        };
        Some(directive)
    }

    /// The payload carried by this directive
    pub fn payload(&self) -> &str {
        match self {
            Self::NativePackage(s) | Self::AurPackage(s) | Self::Command(s) => s,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativePackage(name) => write!(f, "{}", name),
            Self::AurPackage(name) => write!(f, "{} {}", AUR_MARKER, name),
            Self::Command(cmd) => write!(f, "{} {}", CMD_MARKER, cmd),
        }
    }
}

/// The parsed manifest: three ordered collections.
///
/// Built once by [`InstallPlan::parse`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    native: Vec<String>,
    aur: Vec<String>,
    commands: Vec<String>,
}

impl InstallPlan {
    /// Parse raw manifest text
    pub fn parse(text: &str) -> Self {
        let plan: Self = text.lines().filter_map(Directive::classify).collect();
        tracing::debug!(
            "Parsed manifest: native={} aur={} commands={}",
            plan.native.len(),
            plan.aur.len(),
            plan.commands.len()
        );
        plan
    }

    /// Native package names, in manifest order
    pub fn native(&self) -> &[String] {
        &self.native
    }

    /// AUR package names, in manifest order
    pub fn aur(&self) -> &[String] {
        &self.aur
    }

    /// Custom shell commands, in manifest order
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// True when the manifest produced no entries at all
    pub fn is_empty(&self) -> bool {
        self.native.is_empty() && self.aur.is_empty() && self.commands.is_empty()
    }

    /// Total number of entries across all collections
    pub fn len(&self) -> usize {
        self.native.len() + self.aur.len() + self.commands.len()
    }

    /// Counts-only summary shown to the operator after parsing
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            native: self.native.len(),
            aur: self.aur.len(),
            commands: self.commands.len(),
        }
    }

    fn push(&mut self, directive: Directive) {
        match directive {
            Directive::NativePackage(name) => self.native.push(name),
            Directive::AurPackage(name) => self.aur.push(name),
            Directive::Command(cmd) => self.commands.push(cmd),
        }
    }
}

impl FromIterator<Directive> for InstallPlan {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        let mut plan = Self::default();
        for directive in iter {
            plan.push(directive);
        }
        plan
    }
}

/// Post-parse entry counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub native: usize,
    pub aur: usize,
    pub commands: usize,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} native package(s), {} AUR package(s), {} custom command(s)",
            self.native, self.aur, self.commands
        )
    }
}
