//! Ablation study analysis: effect of the number of inference steps.

use clap::Parser;
use tracing::debug;

use dockstat_cli::args::AblationArgs;
use dockstat_cli::config::Config;
use dockstat_cli::logging;
use dockstat_eval::ablation;

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = AblationArgs::parse();
    let config = Config::load(args.config.as_deref())?;
    let options = args.resolve(&config);
    debug!("Resolved options: {:?}", options);

    ablation::run(&options)?;
    Ok(())
}
