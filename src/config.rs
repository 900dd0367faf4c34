//! Provisioning configuration.
//!
//! Settings come from three layers, later layers winning:
//! built-in defaults, an optional JSON config file, and `ARCHSETUP_*`
//! environment variables. The CLI itself only carries the manifest path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::AurHelper;

/// Remote manifest used when no argument and no local manifest are present
pub const DEFAULT_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/live4thamuzik/archsetup/main/packages.txt";

/// Conventional local manifest filename, looked up in the working directory
pub const DEFAULT_MANIFEST_FILE: &str = "packages.txt";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "ARCHSETUP_CONFIG";

/// Provisioning settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Remote fallback manifest URL
    pub manifest_url: String,
    /// Conventional local manifest path
    pub manifest_file: PathBuf,
    /// AUR helper to bootstrap and install AUR packages with
    pub aur_helper: AurHelper,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
    /// Print invocations instead of executing them
    pub dry_run: bool,
    /// Overall timeout for the remote manifest fetch (none by default)
    pub fetch_timeout_secs: Option<u64>,
    /// Parent directory for the AUR helper build (system temp dir if unset)
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            manifest_file: PathBuf::from(DEFAULT_MANIFEST_FILE),
            aur_helper: AurHelper::default(),
            assume_yes: false,
            dry_run: false,
            fetch_timeout_secs: None,
            scratch_dir: None,
        }
    }
}

impl ProvisionConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads `$ARCHSETUP_CONFIG` if set (it must exist), otherwise
    /// `<config_dir>/archsetup/config.json` if present, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from_file(PathBuf::from(path))?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::load_from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        tracing::debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse configuration JSON {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply `ARCHSETUP_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ARCHSETUP_MANIFEST_URL") {
            self.manifest_url = url;
        }
        if let Some(file) = lookup("ARCHSETUP_MANIFEST_FILE") {
            self.manifest_file = PathBuf::from(file);
        }
        if let Some(helper) = lookup("ARCHSETUP_AUR_HELPER") {
            self.aur_helper = helper
                .trim()
                .parse()
                .with_context(|| format!("Unknown AUR helper '{}' (expected paru or yay)", helper))?;
        }
        if let Some(value) = lookup("ARCHSETUP_ASSUME_YES") {
            self.assume_yes = is_truthy(&value);
        }
        if let Some(value) = lookup("ARCHSETUP_DRY_RUN") {
            self.dry_run = is_truthy(&value);
        }
        if let Some(value) = lookup("ARCHSETUP_FETCH_TIMEOUT") {
            let secs = value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid fetch timeout '{}' (expected seconds)", value))?;
            self.fetch_timeout_secs = Some(secs);
        }
        if let Some(dir) = lookup("ARCHSETUP_SCRATCH_DIR") {
            self.scratch_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Fetch timeout as a `Duration`, if configured
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.manifest_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("Manifest URL must start with http:// or https://: {}", url);
        }
        if self.manifest_file.as_os_str().is_empty() {
            anyhow::bail!("Manifest file must not be empty");
        }
        Ok(())
    }
}

/// `<config_dir>/archsetup/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("archsetup").join("config.json"))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
