//! CSV export of one run's accumulated case results.
//!
//! PFR and distillation records are written into a single table with a
//! union-of-columns schema: the four common columns (`case_type`, `success`,
//! `error`, `traceback`) are populated on every row, while each variant's
//! parameter and metric columns are populated only for rows of that variant
//! and left empty otherwise. Column order is fixed by [`ReportRow`] field
//! order, so identical result sets export byte-identically.

use crate::core::models::case::CaseSpec;
use crate::core::models::result::{CaseMetrics, CaseOutcome, CaseResult, ResultSet, RunSummary};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report row: {0}")]
    Csv(#[from] csv::Error),
}

/// One exported row. Field order is the column order of the table.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    case_type: &'static str,
    success: bool,
    error: Option<&'a str>,
    traceback: Option<&'a str>,

    // PFR parameters and metrics.
    volume_m3: Option<f64>,
    temperature_c: Option<f64>,
    pressure_bar: Option<f64>,
    conversion: Option<f64>,
    outlet_b_flow_mol_s: Option<f64>,
    outlet_temperature_c: Option<f64>,
    heat_duty_kw: Option<f64>,
    outlet_pressure_bar: Option<f64>,

    // Distillation parameters and metrics.
    n_stages: Option<usize>,
    feed_stage: Option<usize>,
    reflux_ratio: Option<f64>,
    distillate_rate_kmol_h: Option<f64>,
    distillate_purity_light: Option<f64>,
    bottoms_purity_heavy: Option<f64>,
    condenser_duty_kw: Option<f64>,
    reboiler_duty_kw: Option<f64>,
    condenser_temperature_c: Option<f64>,
}

impl<'a> ReportRow<'a> {
    fn from_result(result: &'a CaseResult) -> Self {
        let mut row = Self {
            case_type: result.kind().as_str(),
            success: result.is_success(),
            error: None,
            traceback: None,
            volume_m3: None,
            temperature_c: None,
            pressure_bar: None,
            conversion: None,
            outlet_b_flow_mol_s: None,
            outlet_temperature_c: None,
            heat_duty_kw: None,
            outlet_pressure_bar: None,
            n_stages: None,
            feed_stage: None,
            reflux_ratio: None,
            distillate_rate_kmol_h: None,
            distillate_purity_light: None,
            bottoms_purity_heavy: None,
            condenser_duty_kw: None,
            reboiler_duty_kw: None,
            condenser_temperature_c: None,
        };

        match &result.spec {
            CaseSpec::Pfr(spec) => {
                row.volume_m3 = Some(spec.volume_m3);
                row.temperature_c = Some(spec.temperature_c);
                row.pressure_bar = Some(spec.pressure_bar);
            }
            CaseSpec::Column(spec) => {
                row.n_stages = Some(spec.stage_count);
                row.feed_stage = Some(spec.feed_stage);
                row.reflux_ratio = Some(spec.reflux_ratio);
                row.distillate_rate_kmol_h = Some(spec.distillate_rate_kmol_h);
            }
        }

        match &result.outcome {
            CaseOutcome::Failure { error, trace } => {
                row.error = Some(error);
                row.traceback = trace.as_deref();
            }
            CaseOutcome::Success(CaseMetrics::Pfr(m)) => {
                row.conversion = Some(m.conversion);
                row.outlet_b_flow_mol_s = Some(m.outlet_b_flow_mol_s);
                row.outlet_temperature_c = Some(m.outlet_temperature_c);
                row.heat_duty_kw = Some(m.heat_duty_kw);
                row.outlet_pressure_bar = Some(m.outlet_pressure_bar);
            }
            CaseOutcome::Success(CaseMetrics::Column(m)) => {
                row.distillate_purity_light = Some(m.distillate_purity_light);
                row.bottoms_purity_heavy = Some(m.bottoms_purity_heavy);
                row.condenser_duty_kw = Some(m.condenser_duty_kw);
                row.reboiler_duty_kw = Some(m.reboiler_duty_kw);
                row.condenser_temperature_c = Some(m.condenser_temperature_c);
            }
        }

        row
    }
}

/// Writes the full table (header row included) to `writer`.
///
/// Does not mutate the result set; returns the run summary so callers can
/// report counts without a second pass.
pub fn write_csv<W: Write>(results: &ResultSet, writer: W) -> Result<RunSummary, ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(ReportRow::from_result(result))?;
    }
    csv_writer.flush()?;
    Ok(results.summary())
}

/// Writes the table to `path`, creating or truncating the file.
pub fn export_csv(results: &ResultSet, path: &Path) -> Result<RunSummary, ReportError> {
    let file = std::fs::File::create(path)?;
    write_csv(results, file)
}
