//! Flowsheet construction.
//!
//! Builds the full topology for one case type on a freshly allocated
//! flowsheet: compounds, property package, unit operations, streams, and
//! connectivity, plus the case-independent feed conditions. Per-case
//! parameters are applied afterwards by the runner.

use super::adapter::{EngineSession, Flowsheet, PropertyValue, UnitKind};
use super::error::EngineError;
use crate::core::models::case::CaseKind;

pub(crate) const PROPERTY_PACKAGE: &str = "Peng-Robinson (PR)";

pub(crate) const PFR_COMPOUNDS: [&str; 2] = ["Ethylene", "Ethane"];
pub(crate) const COLUMN_COMPOUNDS: [&str; 2] = ["Benzene", "Toluene"];

pub(crate) const FEED: &str = "Feed";
pub(crate) const REACTOR: &str = "PFR";
pub(crate) const OUTLET: &str = "Outlet";
pub(crate) const COLUMN: &str = "Column";
pub(crate) const DISTILLATE: &str = "Distillate";
pub(crate) const BOTTOMS: &str = "Bottoms";

/// Feed basis shared by both topologies, kmol/h.
pub(crate) const FEED_MOLAR_FLOW_KMOL_H: f64 = 100.0;

const COLUMN_FEED_TEMPERATURE_K: f64 = 363.15;
const COLUMN_FEED_PRESSURE_PA: f64 = 101_325.0;

/// Allocates a fresh flowsheet on `session` and wires the topology for `kind`.
///
/// Any engine-side rejection propagates as a build failure; the caller records
/// it as a failed case, never a process abort.
pub(crate) fn build_flowsheet<S: EngineSession>(
    session: &S,
    kind: CaseKind,
) -> Result<S::Flowsheet, EngineError> {
    let mut flowsheet = session.create_flowsheet()?;
    match kind {
        CaseKind::Pfr => build_pfr_topology(&mut flowsheet)?,
        CaseKind::Column => build_column_topology(&mut flowsheet)?,
    }
    Ok(flowsheet)
}

fn build_pfr_topology<F: Flowsheet>(fs: &mut F) -> Result<(), EngineError> {
    for compound in PFR_COMPOUNDS {
        fs.add_compound(compound)?;
    }
    fs.select_property_package(PROPERTY_PACKAGE)?;

    fs.add_stream(FEED)?;
    fs.add_unit(UnitKind::PlugFlowReactor, REACTOR)?;
    fs.add_stream(OUTLET)?;

    // Pure ethylene feed on a molar basis; temperature and pressure are case
    // parameters applied by the runner.
    fs.set_property(
        FEED,
        "MolarFlow",
        PropertyValue::Scalar(FEED_MOLAR_FLOW_KMOL_H),
    )?;
    fs.set_property(FEED, "MoleFractions", PropertyValue::Composition(vec![1.0, 0.0]))?;

    fs.connect(FEED, 0, REACTOR, 0)?;
    fs.connect(REACTOR, 0, OUTLET, 0)?;
    Ok(())
}

fn build_column_topology<F: Flowsheet>(fs: &mut F) -> Result<(), EngineError> {
    for compound in COLUMN_COMPOUNDS {
        fs.add_compound(compound)?;
    }
    fs.select_property_package(PROPERTY_PACKAGE)?;

    fs.add_stream(FEED)?;
    fs.add_unit(UnitKind::DistillationColumn, COLUMN)?;
    fs.add_stream(DISTILLATE)?;
    fs.add_stream(BOTTOMS)?;

    // Equimolar benzene/toluene feed at 90 C and 1 atm.
    fs.set_property(
        FEED,
        "Temperature",
        PropertyValue::Scalar(COLUMN_FEED_TEMPERATURE_K),
    )?;
    fs.set_property(
        FEED,
        "Pressure",
        PropertyValue::Scalar(COLUMN_FEED_PRESSURE_PA),
    )?;
    fs.set_property(
        FEED,
        "MolarFlow",
        PropertyValue::Scalar(FEED_MOLAR_FLOW_KMOL_H),
    )?;
    fs.set_property(FEED, "MoleFractions", PropertyValue::Composition(vec![0.5, 0.5]))?;

    fs.connect(FEED, 0, COLUMN, 0)?;
    fs.connect(COLUMN, 0, DISTILLATE, 0)?;
    fs.connect(COLUMN, 1, BOTTOMS, 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stub::StubEngine;

    #[test]
    fn pfr_topology_registers_compounds_units_and_streams() {
        let session = StubEngine::new();
        let fs = build_flowsheet(&session, CaseKind::Pfr).unwrap();

        assert_eq!(fs.compounds(), &["Ethylene", "Ethane"]);
        assert_eq!(fs.property_package(), Some(PROPERTY_PACKAGE));
        assert!(fs.has_unit(REACTOR));
        assert!(fs.has_stream(FEED));
        assert!(fs.has_stream(OUTLET));
        assert!(fs.is_connected(FEED, REACTOR));
        assert!(fs.is_connected(REACTOR, OUTLET));
    }

    #[test]
    fn column_topology_registers_all_product_streams() {
        let session = StubEngine::new();
        let fs = build_flowsheet(&session, CaseKind::Column).unwrap();

        assert_eq!(fs.compounds(), &["Benzene", "Toluene"]);
        assert!(fs.has_unit(COLUMN));
        assert!(fs.has_stream(DISTILLATE));
        assert!(fs.has_stream(BOTTOMS));
        assert!(fs.is_connected(FEED, COLUMN));
        assert!(fs.is_connected(COLUMN, DISTILLATE));
        assert!(fs.is_connected(COLUMN, BOTTOMS));
    }

    #[test]
    fn column_feed_conditions_are_fixed_at_build_time() {
        let session = StubEngine::new();
        let fs = build_flowsheet(&session, CaseKind::Column).unwrap();

        assert_eq!(fs.scalar(FEED, "Temperature"), Some(363.15));
        assert_eq!(fs.scalar(FEED, "MolarFlow"), Some(100.0));
    }

    #[test]
    fn build_failure_propagates_as_engine_error() {
        let session = StubEngine::new().with_build_fault("Ethylene");
        let result = build_flowsheet(&session, CaseKind::Pfr);
        assert!(matches!(result, Err(EngineError::Build { .. })));
    }
}
