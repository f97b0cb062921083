use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Sweep axis '{0}' must not be empty")]
    EmptyAxis(&'static str),

    #[error("Sweep configuration contains no parameter grid")]
    NoGrid,
}

/// Parameter grid for the plug-flow reactor sweep: the Cartesian product of
/// `volumes_m3` (outer) and `temperatures_c` (inner) at a fixed feed pressure.
#[derive(Debug, Clone, PartialEq)]
pub struct PfrGrid {
    pub volumes_m3: Vec<f64>,
    pub temperatures_c: Vec<f64>,
    pub pressure_bar: f64,
}

/// Parameter grid for the distillation sweep: the Cartesian product of
/// `stage_counts` (outer) and `reflux_ratios` (inner) at a fixed distillate
/// rate. The feed stage is derived per case as `max(3, stage_count / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGrid {
    pub stage_counts: Vec<usize>,
    pub reflux_ratios: Vec<f64>,
    pub distillate_rate_kmol_h: f64,
}

/// Explicit configuration for one sweep run, passed into the workflow by the
/// caller. Either grid may be omitted to restrict the run to one case type.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub pfr: Option<PfrGrid>,
    pub column: Option<ColumnGrid>,
}

impl SweepConfig {
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct SweepConfigBuilder {
    pfr: Option<PfrGrid>,
    column: Option<ColumnGrid>,
}

impl SweepConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pfr_grid(mut self, grid: PfrGrid) -> Self {
        self.pfr = Some(grid);
        self
    }

    pub fn column_grid(mut self, grid: ColumnGrid) -> Self {
        self.column = Some(grid);
        self
    }

    pub fn build(self) -> Result<SweepConfig, ConfigError> {
        if let Some(grid) = &self.pfr {
            if grid.volumes_m3.is_empty() {
                return Err(ConfigError::EmptyAxis("pfr.volumes_m3"));
            }
            if grid.temperatures_c.is_empty() {
                return Err(ConfigError::EmptyAxis("pfr.temperatures_c"));
            }
        }
        if let Some(grid) = &self.column {
            if grid.stage_counts.is_empty() {
                return Err(ConfigError::EmptyAxis("column.stage_counts"));
            }
            if grid.reflux_ratios.is_empty() {
                return Err(ConfigError::EmptyAxis("column.reflux_ratios"));
            }
        }
        if self.pfr.is_none() && self.column.is_none() {
            return Err(ConfigError::NoGrid);
        }
        Ok(SweepConfig {
            pfr: self.pfr,
            column: self.column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pfr_grid() -> PfrGrid {
        PfrGrid {
            volumes_m3: vec![0.5, 1.0],
            temperatures_c: vec![80.0, 100.0],
            pressure_bar: 1.0,
        }
    }

    fn column_grid() -> ColumnGrid {
        ColumnGrid {
            stage_counts: vec![8, 10],
            reflux_ratios: vec![1.5, 2.0],
            distillate_rate_kmol_h: 50.0,
        }
    }

    #[test]
    fn builder_accepts_either_or_both_grids() {
        assert!(
            SweepConfig::builder()
                .pfr_grid(pfr_grid())
                .build()
                .is_ok()
        );
        assert!(
            SweepConfig::builder()
                .column_grid(column_grid())
                .build()
                .is_ok()
        );
        assert!(
            SweepConfig::builder()
                .pfr_grid(pfr_grid())
                .column_grid(column_grid())
                .build()
                .is_ok()
        );
    }

    #[test]
    fn builder_rejects_an_empty_sweep() {
        assert_eq!(
            SweepConfig::builder().build().unwrap_err(),
            ConfigError::NoGrid
        );
    }

    #[test]
    fn builder_rejects_empty_axes() {
        let mut grid = pfr_grid();
        grid.volumes_m3.clear();
        assert_eq!(
            SweepConfig::builder().pfr_grid(grid).build().unwrap_err(),
            ConfigError::EmptyAxis("pfr.volumes_m3")
        );

        let mut grid = column_grid();
        grid.reflux_ratios.clear();
        assert_eq!(
            SweepConfig::builder().column_grid(grid).build().unwrap_err(),
            ConfigError::EmptyAxis("column.reflux_ratios")
        );
    }
}
