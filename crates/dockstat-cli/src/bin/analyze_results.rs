//! Compare evaluation results across named docking experiments.

use clap::Parser;
use tracing::{debug, error};

use dockstat_cli::args::ComparisonArgs;
use dockstat_cli::config::Config;
use dockstat_cli::logging;
use dockstat_common::DockstatError;
use dockstat_eval::comparison;

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = ComparisonArgs::parse();
    let config = Config::load(args.config.as_deref())?;
    let options = args.resolve(&config);
    debug!("Resolved options: {:?}", options);

    match comparison::run(&options) {
        Ok(_) => Ok(()),
        Err(e @ DockstatError::ResultsDirMissing(_)) => {
            error!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
