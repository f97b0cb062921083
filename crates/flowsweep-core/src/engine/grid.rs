//! Deterministic enumeration of the sweep grid.
//!
//! PFR cases come first (volumes outer, temperatures inner), then distillation
//! cases (stage counts outer, reflux ratios inner). The order affects only
//! presentation; every combination appears exactly once.

use super::config::SweepConfig;
use crate::core::models::case::{CaseSpec, ColumnSpec, PfrSpec};

/// Feed enters at the middle stage, never above stage 3.
pub(crate) fn feed_stage_for(stage_count: usize) -> usize {
    (stage_count / 2).max(3)
}

pub(crate) fn enumerate_cases(config: &SweepConfig) -> Vec<CaseSpec> {
    let mut cases = Vec::new();

    if let Some(grid) = &config.pfr {
        for &volume_m3 in &grid.volumes_m3 {
            for &temperature_c in &grid.temperatures_c {
                cases.push(CaseSpec::Pfr(PfrSpec {
                    volume_m3,
                    temperature_c,
                    pressure_bar: grid.pressure_bar,
                }));
            }
        }
    }

    if let Some(grid) = &config.column {
        for &stage_count in &grid.stage_counts {
            for &reflux_ratio in &grid.reflux_ratios {
                cases.push(CaseSpec::Column(ColumnSpec {
                    stage_count,
                    feed_stage: feed_stage_for(stage_count),
                    reflux_ratio,
                    distillate_rate_kmol_h: grid.distillate_rate_kmol_h,
                }));
            }
        }
    }

    cases
}
