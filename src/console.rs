//! Operator-facing console output.
//!
//! Banners and status lines framing each stage. These go straight to the
//! terminal and are separate from the `tracing` log stream.

/// Width of the banner box interior
const BANNER_WIDTH: usize = 66;

/// Render a boxed banner
pub fn format_banner(title: &str) -> String {
    let bar = "═".repeat(BANNER_WIDTH);
    format!(
        "╔{bar}╗\n║ {:<width$} ║\n╚{bar}╝",
        title,
        width = BANNER_WIDTH - 2
    )
}

/// Print a stage banner
pub fn banner(title: &str) {
    println!();
    println!("{}", format_banner(title));
}

/// Print an informational line
pub fn note(msg: &str) {
    println!("  {}", msg);
}

/// Print a completion line
pub fn success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a failure line to stderr
pub fn failure(msg: &str) {
    eprintln!("✗ {}", msg);
}
