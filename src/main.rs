//! archsetup - main entry point

use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use archsetup::cli::Cli;
use archsetup::console;
use archsetup::{provision, HostSystem, ProvisionConfig, ProvisionError, RunOutcome};

/// Initialize the logger; `RUST_LOG` overrides the default level
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load and validate configuration, surfacing failures as `ProvisionError::Config`
fn load_config() -> Result<ProvisionConfig, ProvisionError> {
    let config = ProvisionConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    init_logger();
    info!("archsetup starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed: {:?}", cli);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            console::failure(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let mut host = HostSystem::with_dry_run(config.dry_run);
    match provision(cli.manifest.as_deref(), &config, &mut host) {
        Ok(RunOutcome::Completed(_)) => {
            info!("Provisioning completed successfully");
            console::success("All done!");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Cancelled) => {
            info!("Provisioning cancelled by operator");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Provisioning failed: {}", e);
            console::failure(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
