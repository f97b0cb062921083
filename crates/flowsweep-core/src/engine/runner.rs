//! Case execution.
//!
//! Applies one case's parameters to a built flowsheet, configures the variant's
//! operating specifications, triggers the solve, and extracts the fixed metric
//! set. Every failure — configuration, convergence, or extraction — is captured
//! here and mapped to a failed [`CaseResult`]; nothing propagates past this
//! boundary.

use super::adapter::{Flowsheet, PropertyValue};
use super::builder::{BOTTOMS, COLUMN, DISTILLATE, FEED, OUTLET, REACTOR};
use super::error::EngineError;
use crate::core::models::case::{CaseSpec, ColumnSpec, PfrSpec};
use crate::core::models::result::{CaseMetrics, CaseResult, ColumnMetrics, PfrMetrics};

/// Fixed stoichiometric conversion of the reactor's base compound, as a
/// fraction. Simple conversion kinetics, not Arrhenius kinetics.
pub(crate) const REACTION_CONVERSION_FRACTION: f64 = 0.5;

const KELVIN_OFFSET: f64 = 273.15;
const PA_PER_BAR: f64 = 1.0e5;
const W_PER_KW: f64 = 1.0e3;
/// kmol/h divided by this gives mol/s.
const KMOL_H_PER_MOL_S: f64 = 3.6;

pub(crate) fn run_case<F: Flowsheet>(flowsheet: &mut F, spec: &CaseSpec) -> CaseResult {
    match execute(flowsheet, spec) {
        Ok(metrics) => CaseResult::success(spec.clone(), metrics),
        Err(err) => CaseResult::failure(spec.clone(), err.to_string(), Some(format!("{err:?}"))),
    }
}

fn execute<F: Flowsheet>(fs: &mut F, spec: &CaseSpec) -> Result<CaseMetrics, EngineError> {
    match spec {
        CaseSpec::Pfr(spec) => execute_pfr(fs, spec),
        CaseSpec::Column(spec) => execute_column(fs, spec),
    }
}

fn execute_pfr<F: Flowsheet>(fs: &mut F, spec: &PfrSpec) -> Result<CaseMetrics, EngineError> {
    fs.set_property(
        FEED,
        "Temperature",
        PropertyValue::Scalar(spec.temperature_c + KELVIN_OFFSET),
    )?;
    fs.set_property(
        FEED,
        "Pressure",
        PropertyValue::Scalar(spec.pressure_bar * PA_PER_BAR),
    )?;

    fs.set_property(REACTOR, "Volume", PropertyValue::Scalar(spec.volume_m3))?;
    fs.set_property(
        REACTOR,
        "OperationMode",
        PropertyValue::Text("Isothermal".into()),
    )?;

    fs.add_conversion_reaction(
        "EthyleneToEthane",
        "Ethylene",
        &[("Ethylene", -1.0), ("Ethane", 1.0)],
        REACTION_CONVERSION_FRACTION,
    )?;

    fs.solve()?;

    let conversion = fs.read_property(REACTOR, "Conversion")?;
    let outlet_molar_flow_kmol_h = fs.read_property(OUTLET, "MolarFlow")?;
    let outlet_b_fraction = fs.read_property(OUTLET, "MoleFraction:Ethane")?;

    Ok(CaseMetrics::Pfr(PfrMetrics {
        conversion,
        outlet_b_flow_mol_s: outlet_molar_flow_kmol_h * outlet_b_fraction / KMOL_H_PER_MOL_S,
        outlet_temperature_c: fs.read_property(OUTLET, "Temperature")? - KELVIN_OFFSET,
        heat_duty_kw: fs.read_property(REACTOR, "HeatDuty")? / W_PER_KW,
        outlet_pressure_bar: fs.read_property(OUTLET, "Pressure")? / PA_PER_BAR,
    }))
}

fn execute_column<F: Flowsheet>(fs: &mut F, spec: &ColumnSpec) -> Result<CaseMetrics, EngineError> {
    fs.set_property(
        COLUMN,
        "NumberOfStages",
        PropertyValue::Count(spec.stage_count),
    )?;
    fs.set_property(COLUMN, "FeedStage", PropertyValue::Count(spec.feed_stage))?;
    fs.set_property(COLUMN, "CondenserType", PropertyValue::Text("Total".into()))?;
    fs.set_property(COLUMN, "ReboilerType", PropertyValue::Text("Kettle".into()))?;

    // The column's two operating specifications.
    fs.set_property(
        COLUMN,
        "RefluxRatio",
        PropertyValue::Scalar(spec.reflux_ratio),
    )?;
    fs.set_property(
        COLUMN,
        "DistillateRate",
        PropertyValue::Scalar(spec.distillate_rate_kmol_h),
    )?;

    fs.solve()?;

    Ok(CaseMetrics::Column(ColumnMetrics {
        distillate_purity_light: fs.read_property(DISTILLATE, "MoleFraction:Benzene")?,
        bottoms_purity_heavy: fs.read_property(BOTTOMS, "MoleFraction:Toluene")?,
        condenser_duty_kw: fs.read_property(COLUMN, "CondenserDuty")?.abs() / W_PER_KW,
        reboiler_duty_kw: fs.read_property(COLUMN, "ReboilerDuty")?.abs() / W_PER_KW,
        condenser_temperature_c: fs.read_property(COLUMN, "CondenserTemperature")? - KELVIN_OFFSET,
    }))
}
