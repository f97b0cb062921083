//! The capability boundary between the orchestration core and a simulation
//! engine.
//!
//! The core never depends on engine-specific details beyond these two traits:
//! a session creates flowsheets, and a flowsheet accepts topology, property
//! writes, a solve trigger, and result reads. Any call may fail, and a failed
//! configure call may leave the flowsheet indeterminate — callers discard the
//! instance and rebuild rather than retry it.
//!
//! Compound mole fractions on a solved stream are read back with the
//! `"MoleFraction:<Compound>"` property-name convention.

use super::error::EngineError;

/// Unit operation types the builder can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    PlugFlowReactor,
    DistillationColumn,
}

/// A value written into an engine object's property bag.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A physical quantity in the engine's expected unit for that property.
    Scalar(f64),
    /// An integer quantity such as a stage count or stage index.
    Count(usize),
    /// A symbolic setting such as a condenser type.
    Text(String),
    /// Mole fractions, ordered like the registered compounds.
    Composition(Vec<f64>),
}

/// One live engine session. Created once at process start; reused read-only
/// (only for flowsheet creation) by every case.
pub trait EngineSession {
    type Flowsheet: Flowsheet;

    /// Allocates a fresh, empty flowsheet owned by the caller.
    fn create_flowsheet(&self) -> Result<Self::Flowsheet, EngineError>;
}

/// One in-engine simulation instance: compounds, property package, unit
/// operations, streams, and connectivity. Owned by exactly one case.
pub trait Flowsheet {
    fn add_compound(&mut self, name: &str) -> Result<(), EngineError>;

    fn select_property_package(&mut self, name: &str) -> Result<(), EngineError>;

    fn add_unit(&mut self, kind: UnitKind, name: &str) -> Result<(), EngineError>;

    fn add_stream(&mut self, name: &str) -> Result<(), EngineError>;

    fn set_property(
        &mut self,
        object: &str,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), EngineError>;

    /// Registers a stoichiometric fixed-conversion reaction and attaches it to
    /// the flowsheet's reactor. `conversion` is a fraction in `0..=1`.
    fn add_conversion_reaction(
        &mut self,
        name: &str,
        base_compound: &str,
        stoichiometry: &[(&str, f64)],
        conversion: f64,
    ) -> Result<(), EngineError>;

    fn connect(
        &mut self,
        from: &str,
        from_port: usize,
        to: &str,
        to_port: usize,
    ) -> Result<(), EngineError>;

    /// Triggers the engine's convergence step. Blocking, opaque, and atomic
    /// from the orchestrator's point of view.
    fn solve(&mut self) -> Result<(), EngineError>;

    /// Reads a named scalar result off a converged object.
    fn read_property(&self, object: &str, property: &str) -> Result<f64, EngineError>;
}
