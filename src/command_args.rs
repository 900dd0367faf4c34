//! Type-safe external command contracts.
//!
//! Every external invocation made during provisioning is described by a
//! struct implementing [`CommandArgs`] instead of a raw argv vector. The
//! struct definition is the contract: the program, its flags, and the
//! directory it runs in.

use std::path::Path;

/// Trait for typed external command arguments.
///
/// # Contract
///
/// - `program()`: the executable to spawn (resolved through `PATH`).
/// - `to_cli_args()`: arguments exactly as the program expects them.
/// - `working_dir()`: directory to run in, `None` for the current one.
///
/// # Example
///
/// ```
/// use archsetup::command_args::CommandArgs;
/// use archsetup::commands::PacmanInstallArgs;
///
/// let args = PacmanInstallArgs::new(vec!["git".to_string()]);
/// assert_eq!(args.program(), "sudo");
/// assert_eq!(args.command_line(), "sudo pacman -S --needed --noconfirm git");
/// ```
pub trait CommandArgs {
    /// Executable name.
    fn program(&self) -> &'static str;

    /// Convert struct fields to CLI arguments.
    fn to_cli_args(&self) -> Vec<String>;

    /// Working directory for the invocation.
    fn working_dir(&self) -> Option<&Path> {
        None
    }

    /// Human-readable command line, used in logs and error messages.
    fn command_line(&self) -> String {
        let mut line = self.program().to_string();
        for arg in self.to_cli_args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}
