//! Manifest source resolution and retrieval.
//!
//! Resolution picks where the manifest comes from and never fails:
//!
//! 1. the explicit argument, if given
//! 2. the conventional local file, if it exists
//! 3. the configured remote URL
//!
//! Retrieval then reads the file or fetches the URL. Both failures are fatal
//! for the run since there is nothing to install without a manifest.
//!
//! A zero-byte HTTP body is treated as a failed transfer. Any other content,
//! including blank or comment-only text, is a manifest like a local file of
//! the same content; a local file is read as-is, even when empty, since it
//! is exactly what the operator wrote.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{ProvisionError, Result};

/// Where the manifest text is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A file on the local filesystem
    Local(PathBuf),
    /// An HTTP(S) URL
    Remote(String),
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}

impl ManifestSource {
    /// Resolve the manifest source.
    ///
    /// An explicit argument that looks like an HTTP(S) URL is treated as a
    /// remote source; any other explicit argument is a local path, whether or
    /// not it exists (a missing path surfaces as `FileNotFound` on read).
    pub fn resolve(explicit: Option<&str>, conventional: &Path, default_url: &str) -> Self {
        let source = match explicit {
            Some(arg) if is_url(arg) => Self::Remote(arg.to_string()),
            Some(arg) => Self::Local(PathBuf::from(arg)),
            None if conventional.is_file() => Self::Local(conventional.to_path_buf()),
            None => Self::Remote(default_url.to_string()),
        };
        debug!(
            "Resolved manifest source: {} (explicit={:?}, conventional={})",
            source,
            explicit,
            conventional.display()
        );
        source
    }

    /// Read the full manifest text.
    pub fn retrieve(&self, timeout: Option<Duration>) -> Result<String> {
        match self {
            Self::Local(path) => read_local(path),
            Self::Remote(url) => fetch_remote(url, timeout),
        }
    }
}

fn is_url(arg: &str) -> bool {
    arg.starts_with("https://") || arg.starts_with("http://")
}

fn read_local(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ProvisionError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    info!("Read manifest from {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

fn fetch_remote(url: &str, timeout: Option<Duration>) -> Result<String> {
    if url.trim().is_empty() {
        return Err(ProvisionError::SourceUnavailable);
    }
    info!("Fetching remote manifest: {}", url);

    let mut builder = ureq::AgentBuilder::new();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let agent = builder.build();

    let response = agent
        .get(url)
        .call()
        .map_err(|e| ProvisionError::retrieval(url, e.to_string()))?;

    let mut body = String::new();
    response
        .into_reader()
        .read_to_string(&mut body)
        .map_err(|e| ProvisionError::retrieval(url, e.to_string()))?;

    if body.is_empty() {
        return Err(ProvisionError::retrieval(url, "empty response body"));
    }

    info!("Fetched manifest from {} ({} bytes)", url, body.len());
    Ok(body)
}
