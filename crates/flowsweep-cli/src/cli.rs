use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "flowsweep - parametric screening of process flowsheets (plug-flow reactor and binary distillation) through an external simulation engine.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a parameter sweep and export the results table.
    Run(RunArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a sweep configuration file in TOML format.
    /// Omitted sections fall back to the built-in screening grids.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path for the exported CSV results table.
    #[arg(short, long, value_name = "PATH", default_value = "screening_results.csv")]
    pub output: PathBuf,

    /// Override the simulation engine installation directory.
    #[arg(long, value_name = "PATH")]
    pub engine_path: Option<PathBuf>,

    // --- Reactor grid overrides ---
    /// Override the reactor volume axis, in m3.
    #[arg(long, value_name = "M3", value_delimiter = ',', num_args(1..))]
    pub volumes: Option<Vec<f64>>,

    /// Override the feed temperature axis, in degrees Celsius.
    #[arg(long, value_name = "C", value_delimiter = ',', num_args(1..))]
    pub temperatures: Option<Vec<f64>>,

    /// Override the fixed feed pressure, in bar.
    #[arg(long, value_name = "BAR")]
    pub pressure: Option<f64>,

    // --- Column grid overrides ---
    /// Override the stage count axis.
    #[arg(long, value_name = "INT", value_delimiter = ',', num_args(1..))]
    pub stages: Option<Vec<usize>>,

    /// Override the reflux ratio axis.
    #[arg(long, value_name = "RATIO", value_delimiter = ',', num_args(1..))]
    pub reflux_ratios: Option<Vec<f64>>,

    /// Override the fixed distillate rate, in kmol/h.
    #[arg(long, value_name = "KMOL_H")]
    pub distillate_rate: Option<f64>,

    // --- Scope restriction ---
    /// Skip all plug-flow reactor cases.
    #[arg(long, conflicts_with = "skip_column")]
    pub skip_pfr: bool,

    /// Skip all distillation cases.
    #[arg(long, conflicts_with = "skip_pfr")]
    pub skip_column: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_subcommand_parses_with_defaults() {
        let cli = Cli::parse_from(["flowsweep", "run"]);
        let Commands::Run(args) = cli.command;
        assert_eq!(args.output, PathBuf::from("screening_results.csv"));
        assert!(args.config.is_none());
        assert!(args.volumes.is_none());
        assert!(!args.skip_pfr);
    }

    #[test]
    fn axis_overrides_accept_comma_separated_values() {
        let cli = Cli::parse_from([
            "flowsweep",
            "run",
            "--volumes",
            "0.5,1,2",
            "--stages",
            "8,20",
        ]);
        let Commands::Run(args) = cli.command;
        assert_eq!(args.volumes, Some(vec![0.5, 1.0, 2.0]));
        assert_eq!(args.stages, Some(vec![8, 20]));
    }

    #[test]
    fn skip_flags_are_mutually_exclusive() {
        let result = Cli::try_parse_from(["flowsweep", "run", "--skip-pfr", "--skip-column"]);
        assert!(result.is_err());
    }
}
