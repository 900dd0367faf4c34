use clap::Parser;

/// archsetup - manifest-driven Arch Linux package provisioning
#[derive(Parser, Debug)]
#[command(name = "archsetup")]
#[command(about = "Install native packages, AUR packages, and custom commands from a manifest")]
#[command(
    long_about = "Install native packages, AUR packages, and custom commands from a manifest.\n\n\
    Manifest lines:\n  \
    <name>          native package (pacman)\n  \
    [aur] <name>    AUR package (AUR helper)\n  \
    [cmd] <shell>   shell command, run verbatim\n  \
    # ...           comment\n\n\
    Settings are read from ARCHSETUP_* environment variables or \
    ~/.config/archsetup/config.json."
)]
#[command(version)]
pub struct Cli {
    /// Manifest path or http(s) URL. Defaults to ./packages.txt if present,
    /// otherwise the configured remote manifest.
    pub manifest: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
