//! End-to-end provisioning run: resolve, retrieve, parse, orchestrate.

use tracing::info;

use crate::config::ProvisionConfig;
use crate::console;
use crate::error::Result;
use crate::manifest::InstallPlan;
use crate::orchestrator::{Orchestrator, RunOutcome};
use crate::source::ManifestSource;
use crate::system::SystemOps;

/// Run the whole pipeline for an optional explicit manifest argument.
pub fn provision(
    explicit: Option<&str>,
    config: &ProvisionConfig,
    ops: &mut dyn SystemOps,
) -> Result<RunOutcome> {
    let source =
        ManifestSource::resolve(explicit, &config.manifest_file, &config.manifest_url);
    console::banner("Reading manifest");
    console::note(&format!("Source: {}", source));

    let text = source.retrieve(config.fetch_timeout())?;
    let plan = InstallPlan::parse(&text);
    info!("Manifest {} parsed: {}", source, plan.summary());
    console::success(&format!("Parsed {}", plan.summary()));

    Orchestrator::new(ops, config.aur_helper)
        .assume_yes(config.assume_yes)
        .scratch_dir(config.scratch_dir.clone())
        .run(&plan)
}
