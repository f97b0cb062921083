use crate::cli::RunArgs;
use crate::config::PartialSweepConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use flowsweep::core::report;
use flowsweep::engine::progress::ProgressReporter;
use flowsweep::engine::stub::StubEngine;
use flowsweep::workflows;
use tracing::{info, warn};

pub fn run(args: RunArgs) -> Result<()> {
    let partial = match &args.config {
        Some(path) => PartialSweepConfig::from_file(path)?,
        None => PartialSweepConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial.merge_with_cli(&args)?;

    info!("Initializing the simulation engine session...");
    let session = StubEngine::initialize(config.engine_install_path.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting parameter sweep...");
    let results = workflows::sweep::run(&session, &config.sweep, &reporter);

    let summary = report::export_csv(&results, &args.output)?;
    info!("Results written to {:?}", &args.output);

    println!("Results written to: {}", args.output.display());
    println!("Total cases: {}", summary.total);
    println!("  Successful: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    if summary.failed > 0 {
        warn!(
            failed = summary.failed,
            "Some cases failed; see the error column in the results table."
        );
    }

    Ok(())
}
