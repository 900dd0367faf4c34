//! Tests for manifest source resolution, retrieval, and the full pipeline
//!
//! Remote retrieval is exercised against a one-shot HTTP listener on
//! localhost, so no external network access is needed.

mod common;

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use archsetup::{
    provision, InstallPlan, ManifestSource, ProvisionConfig, ProvisionError, RunOutcome,
};
use common::RecordingSystem;

const DEFAULT_URL: &str = "https://example.org/archsetup/packages.txt";

/// Serve a single HTTP response and return the URL to fetch it from.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/packages.txt", addr)
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_no_argument_no_local_file_uses_remote_default() {
    let dir = tempfile::tempdir().unwrap();
    let conventional = dir.path().join("packages.txt");

    let source = ManifestSource::resolve(None, &conventional, DEFAULT_URL);
    assert_eq!(source, ManifestSource::Remote(DEFAULT_URL.to_string()));
}

#[test]
fn test_no_argument_local_file_wins_over_remote() {
    let dir = tempfile::tempdir().unwrap();
    let conventional = dir.path().join("packages.txt");
    fs::write(&conventional, "git\n").unwrap();

    let source = ManifestSource::resolve(None, &conventional, DEFAULT_URL);
    assert_eq!(source, ManifestSource::Local(conventional));
}

#[test]
fn test_explicit_missing_path_is_not_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let conventional = dir.path().join("packages.txt");
    fs::write(&conventional, "git\n").unwrap();
    let explicit = dir.path().join("missing.txt");

    let source =
        ManifestSource::resolve(Some(explicit.to_str().unwrap()), &conventional, DEFAULT_URL);
    assert_eq!(source, ManifestSource::Local(explicit.clone()));

    let err = source.retrieve(None).unwrap_err();
    match err {
        ProvisionError::FileNotFound { path } => assert_eq!(path, explicit),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Remote Retrieval
// =============================================================================

#[test]
fn test_remote_fetch_returns_body() {
    let url = serve_once("200 OK", "firefox\n[aur] paru-bin\n");
    let text = ManifestSource::Remote(url).retrieve(None).unwrap();
    assert_eq!(text, "firefox\n[aur] paru-bin\n");
}

#[test]
fn test_remote_empty_body_is_retrieval_failure() {
    let url = serve_once("200 OK", "");
    let err = ManifestSource::Remote(url).retrieve(None).unwrap_err();
    assert!(matches!(err, ProvisionError::RetrievalFailed { .. }));
}

#[test]
fn test_remote_blank_body_is_an_empty_manifest() {
    let url = serve_once("200 OK", "\n  \n");
    let text = ManifestSource::Remote(url).retrieve(None).unwrap();
    assert!(InstallPlan::parse(&text).is_empty());
}

#[test]
fn test_remote_http_error_is_retrieval_failure() {
    let url = serve_once("404 Not Found", "not found");
    let err = ManifestSource::Remote(url.clone()).retrieve(None).unwrap_err();
    match err {
        ProvisionError::RetrievalFailed { url: failed, .. } => assert_eq!(failed, url),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unreachable_host_is_retrieval_failure() {
    // Bind then drop to get a port with no listener
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{}/packages.txt", port);
    let err = ManifestSource::Remote(url).retrieve(None).unwrap_err();
    assert!(matches!(err, ProvisionError::RetrievalFailed { .. }));
}

// =============================================================================
// Full Pipeline
// =============================================================================

fn config_in(dir: &std::path::Path, url: &str) -> ProvisionConfig {
    ProvisionConfig {
        manifest_url: url.to_string(),
        manifest_file: dir.join("packages.txt"),
        assume_yes: true,
        scratch_dir: Some(PathBuf::from(dir)),
        ..ProvisionConfig::default()
    }
}

#[test]
fn test_provision_from_local_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("packages.txt"),
        "firefox\n# comment\n\n[aur]  visual-studio-code-bin\n[cmd] echo done",
    )
    .unwrap();
    let config = config_in(dir.path(), DEFAULT_URL);
    let mut ops = RecordingSystem::ready();

    let outcome = provision(None, &config, &mut ops).unwrap();

    assert!(matches!(outcome, RunOutcome::Completed(_)));
    assert_eq!(
        ops.calls,
        vec![
            "sudo pacman -Syu --noconfirm",
            "sudo pacman -S --needed --noconfirm firefox",
            "paru -S --needed --noconfirm visual-studio-code-bin",
            "bash -c echo done",
        ]
    );
}

#[test]
fn test_provision_from_remote_default() {
    let dir = tempfile::tempdir().unwrap();
    let url = serve_once("200 OK", "[cmd] touch /tmp/archsetup-marker\n");
    let config = config_in(dir.path(), &url);
    let mut ops = RecordingSystem::ready();

    provision(None, &config, &mut ops).unwrap();

    assert_eq!(
        ops.calls_starting_with("bash -c"),
        vec!["bash -c touch /tmp/archsetup-marker"]
    );
}

#[test]
fn test_provision_missing_manifest_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), DEFAULT_URL);
    let mut ops = RecordingSystem::ready();
    let missing = dir.path().join("nope.txt");

    let err = provision(Some(missing.to_str().unwrap()), &config, &mut ops).unwrap_err();

    assert!(matches!(err, ProvisionError::FileNotFound { .. }));
    assert!(ops.calls.is_empty());
}
