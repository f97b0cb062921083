pub mod defaults;

use crate::cli::RunArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use flowsweep::engine::config::{ColumnGrid, PfrGrid, SweepConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fully resolved run configuration after merging the file, the command line,
/// and the built-in defaults.
pub struct AppConfig {
    pub sweep: SweepConfig,
    pub engine_install_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEngineConfig {
    #[serde(rename = "install-path")]
    install_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPfrGrid {
    #[serde(rename = "volumes-m3")]
    volumes_m3: Option<Vec<f64>>,
    #[serde(rename = "temperatures-c")]
    temperatures_c: Option<Vec<f64>>,
    #[serde(rename = "pressure-bar")]
    pressure_bar: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialColumnGrid {
    #[serde(rename = "stage-counts")]
    stage_counts: Option<Vec<usize>>,
    #[serde(rename = "reflux-ratios")]
    reflux_ratios: Option<Vec<f64>>,
    #[serde(rename = "distillate-rate-kmol-h")]
    distillate_rate_kmol_h: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSweepConfig {
    engine: Option<PartialEngineConfig>,
    pfr: Option<PartialPfrGrid>,
    column: Option<PartialColumnGrid>,
}

impl PartialSweepConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final configuration. Precedence per value: command-line
    /// argument, then configuration file, then built-in default.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<AppConfig> {
        let defaults = DefaultsConfig::default();
        let mut builder = SweepConfig::builder();

        if !args.skip_pfr {
            let file = self.pfr.take().unwrap_or_default();
            builder = builder.pfr_grid(PfrGrid {
                volumes_m3: args
                    .volumes
                    .clone()
                    .or(file.volumes_m3)
                    .unwrap_or(defaults.volumes_m3),
                temperatures_c: args
                    .temperatures
                    .clone()
                    .or(file.temperatures_c)
                    .unwrap_or(defaults.temperatures_c),
                pressure_bar: args
                    .pressure
                    .or(file.pressure_bar)
                    .unwrap_or(defaults.pressure_bar),
            });
        }

        if !args.skip_column {
            let file = self.column.take().unwrap_or_default();
            builder = builder.column_grid(ColumnGrid {
                stage_counts: args
                    .stages
                    .clone()
                    .or(file.stage_counts)
                    .unwrap_or(defaults.stage_counts),
                reflux_ratios: args
                    .reflux_ratios
                    .clone()
                    .or(file.reflux_ratios)
                    .unwrap_or(defaults.reflux_ratios),
                distillate_rate_kmol_h: args
                    .distillate_rate
                    .or(file.distillate_rate_kmol_h)
                    .unwrap_or(defaults.distillate_rate_kmol_h),
            });
        }

        let sweep = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

        let engine_install_path = args
            .engine_path
            .clone()
            .or(self.engine.take().and_then(|e| e.install_path));

        Ok(AppConfig {
            sweep,
            engine_install_path,
        })
    }
}
