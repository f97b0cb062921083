//! A deterministic in-memory engine adapter.
//!
//! The stub records topology and property writes, validates object names, and
//! produces fixed synthetic metrics on solve — no thermodynamics, no kinetics.
//! It backs the test suite and the CLI's bundled engine: identical inputs
//! always yield identical results, reflux ratios below a configurable minimum
//! fail to converge, and an injectable solve fault lets tests fail arbitrary
//! parameter combinations.

use super::adapter::{EngineSession, Flowsheet, PropertyValue, UnitKind};
use super::error::EngineError;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

type SolveFault = Arc<dyn Fn(&StubFlowsheet) -> Option<String> + Send + Sync>;

#[derive(Clone)]
struct Behavior {
    min_reflux_ratio: f64,
    build_fault: Option<String>,
    solve_fault: Option<SolveFault>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            min_reflux_ratio: 1.0,
            build_fault: None,
            solve_fault: None,
        }
    }
}

/// Session handle for the stub engine. Cheap to clone; flowsheets created from
/// it share the session's configured behavior.
#[derive(Clone)]
pub struct StubEngine {
    behavior: Arc<Behavior>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            behavior: Arc::new(Behavior::default()),
        }
    }

    /// Session constructor used by front-ends. The install path is accepted
    /// for interface parity with bridged engines; the stub has nothing to
    /// load from it.
    pub fn initialize(install_path: Option<&Path>) -> Result<Self, EngineError> {
        if let Some(path) = install_path {
            debug!(path = %path.display(), "Stub engine ignores the engine install path.");
        }
        Ok(Self::new())
    }

    /// Rejects registration of the named compound, for exercising build
    /// failure paths.
    pub fn with_build_fault(mut self, compound: &str) -> Self {
        self.behavior_mut().build_fault = Some(compound.to_string());
        self
    }

    /// Fails any solve for which `fault` returns a message. The predicate may
    /// inspect the flowsheet's recorded properties to target specific cases.
    pub fn with_solve_fault(
        mut self,
        fault: impl Fn(&StubFlowsheet) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.behavior_mut().solve_fault = Some(Arc::new(fault));
        self
    }

    pub fn with_min_reflux_ratio(mut self, minimum: f64) -> Self {
        self.behavior_mut().min_reflux_ratio = minimum;
        self
    }

    // Copy-on-write: reconfiguring a shared session affects only this handle
    // and flowsheets created from it afterwards.
    fn behavior_mut(&mut self) -> &mut Behavior {
        Arc::make_mut(&mut self.behavior)
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineSession for StubEngine {
    type Flowsheet = StubFlowsheet;

    fn create_flowsheet(&self) -> Result<StubFlowsheet, EngineError> {
        Ok(StubFlowsheet::new(self.behavior.clone()))
    }
}

struct Reaction {
    base_compound: String,
    product_compound: Option<String>,
    conversion: f64,
}

/// One recorded flowsheet instance.
pub struct StubFlowsheet {
    behavior: Arc<Behavior>,
    compounds: Vec<String>,
    property_package: Option<String>,
    units: Vec<(String, UnitKind)>,
    streams: Vec<String>,
    properties: BTreeMap<(String, String), PropertyValue>,
    connections: Vec<(String, usize, String, usize)>,
    reactions: Vec<Reaction>,
    solved: bool,
    results: BTreeMap<(String, String), f64>,
}

impl StubFlowsheet {
    fn new(behavior: Arc<Behavior>) -> Self {
        Self {
            behavior,
            compounds: Vec::new(),
            property_package: None,
            units: Vec::new(),
            streams: Vec::new(),
            properties: BTreeMap::new(),
            connections: Vec::new(),
            reactions: Vec::new(),
            solved: false,
            results: BTreeMap::new(),
        }
    }

    // --- Inspection helpers for tests and fault predicates ---

    pub fn compounds(&self) -> &[String] {
        &self.compounds
    }

    pub fn property_package(&self) -> Option<&str> {
        self.property_package.as_deref()
    }

    pub fn has_unit(&self, name: &str) -> bool {
        self.units.iter().any(|(n, _)| n == name)
    }

    pub fn has_stream(&self, name: &str) -> bool {
        self.streams.iter().any(|n| n == name)
    }

    pub fn is_connected(&self, from: &str, to: &str) -> bool {
        self.connections
            .iter()
            .any(|(f, _, t, _)| f == from && t == to)
    }

    /// Recorded scalar property write, if any.
    pub fn scalar(&self, object: &str, property: &str) -> Option<f64> {
        match self.properties.get(&(object.to_string(), property.to_string())) {
            Some(PropertyValue::Scalar(v)) => Some(*v),
            Some(PropertyValue::Count(n)) => Some(*n as f64),
            _ => None,
        }
    }

    // --- Internal lookups ---

    fn object_exists(&self, name: &str) -> bool {
        self.has_unit(name) || self.has_stream(name)
    }

    fn invalidate(&mut self) {
        self.solved = false;
        self.results.clear();
    }

    fn require_scalar(&self, object: &str, property: &str) -> Result<f64, EngineError> {
        self.scalar(object, property).ok_or_else(|| {
            EngineError::Convergence(format!("'{object}' is missing required input '{property}'"))
        })
    }

    fn require_count(&self, object: &str, property: &str) -> Result<usize, EngineError> {
        match self.properties.get(&(object.to_string(), property.to_string())) {
            Some(PropertyValue::Count(n)) => Ok(*n),
            _ => Err(EngineError::Convergence(format!(
                "'{object}' is missing required input '{property}'"
            ))),
        }
    }

    /// Stream connected into `to` at `to_port`.
    fn inlet_of(&self, to: &str, to_port: usize) -> Result<&str, EngineError> {
        self.connections
            .iter()
            .find(|(_, _, t, tp)| t == to && *tp == to_port)
            .map(|(f, _, _, _)| f.as_str())
            .ok_or_else(|| {
                EngineError::Convergence(format!("'{to}' has no inlet connected at port {to_port}"))
            })
    }

    /// Stream connected out of `from` at `from_port`.
    fn outlet_of(&self, from: &str, from_port: usize) -> Result<&str, EngineError> {
        self.connections
            .iter()
            .find(|(f, fp, _, _)| f == from && *fp == from_port)
            .map(|(_, _, t, _)| t.as_str())
            .ok_or_else(|| {
                EngineError::Convergence(format!(
                    "'{from}' has no outlet connected at port {from_port}"
                ))
            })
    }

    fn record(&mut self, object: &str, property: &str, value: f64) {
        self.results
            .insert((object.to_string(), property.to_string()), value);
    }

    fn solve_reactor(&mut self, name: String) -> Result<(), EngineError> {
        let volume = self.require_scalar(&name, "Volume")?;
        if volume <= 0.0 {
            return Err(EngineError::Convergence(format!(
                "non-physical reactor volume {volume} m3"
            )));
        }

        let reaction = self.reactions.last().ok_or_else(|| {
            EngineError::Convergence(format!("reactor '{name}' has no reaction attached"))
        })?;
        let conversion = reaction.conversion.clamp(0.0, 1.0);
        let base = reaction.base_compound.clone();
        let product = reaction.product_compound.clone();

        let feed = self.inlet_of(&name, 0)?.to_string();
        let outlet = self.outlet_of(&name, 0)?.to_string();
        let temperature = self.require_scalar(&feed, "Temperature")?;
        let pressure = self.require_scalar(&feed, "Pressure")?;
        let molar_flow = self.require_scalar(&feed, "MolarFlow")?;

        // 1:1 stoichiometry over a pure base-compound feed; isothermal and
        // isobaric by construction.
        self.record(&outlet, "MolarFlow", molar_flow);
        self.record(&outlet, "Temperature", temperature);
        self.record(&outlet, "Pressure", pressure);
        self.record(&outlet, &format!("MoleFraction:{base}"), 1.0 - conversion);
        if let Some(product) = product {
            self.record(&outlet, &format!("MoleFraction:{product}"), conversion);
        }
        self.record(&name, "Conversion", conversion);
        self.record(&name, "HeatDuty", conversion * molar_flow * 950.0);
        Ok(())
    }

    fn solve_column(&mut self, name: String) -> Result<(), EngineError> {
        let reflux_ratio = self.require_scalar(&name, "RefluxRatio")?;
        let stage_count = self.require_count(&name, "NumberOfStages")?;
        let feed_stage = self.require_count(&name, "FeedStage")?;
        let distillate_rate = self.require_scalar(&name, "DistillateRate")?;

        if feed_stage == 0 || feed_stage >= stage_count {
            return Err(EngineError::Convergence(format!(
                "feed stage {feed_stage} outside column with {stage_count} stages"
            )));
        }
        if reflux_ratio < self.behavior.min_reflux_ratio {
            return Err(EngineError::Convergence(format!(
                "reflux ratio {reflux_ratio} below the minimum {}",
                self.behavior.min_reflux_ratio
            )));
        }

        let _feed = self.inlet_of(&name, 0)?;
        let distillate = self.outlet_of(&name, 0)?.to_string();
        let bottoms = self.outlet_of(&name, 1)?.to_string();

        let light = self.compounds.first().cloned().ok_or_else(|| {
            EngineError::Convergence("no compounds registered".to_string())
        })?;
        let heavy = self.compounds.get(1).cloned().ok_or_else(|| {
            EngineError::Convergence("binary separation requires two compounds".to_string())
        })?;

        // Synthetic separation: improves monotonically with reflux ratio and
        // stage count, saturating short of a perfect split.
        let stage_factor = stage_count as f64 / 8.0;
        let separation = (1.0 - 0.5 / ((1.0 + reflux_ratio) * stage_factor)).clamp(0.5, 0.9995);

        let condenser_duty_w = (1.0 + reflux_ratio) * distillate_rate * 8_500.0;
        self.record(&distillate, &format!("MoleFraction:{light}"), separation);
        self.record(&distillate, &format!("MoleFraction:{heavy}"), 1.0 - separation);
        self.record(&bottoms, &format!("MoleFraction:{heavy}"), separation);
        self.record(&bottoms, &format!("MoleFraction:{light}"), 1.0 - separation);
        self.record(&name, "CondenserDuty", -condenser_duty_w);
        self.record(&name, "ReboilerDuty", condenser_duty_w * 1.08);
        self.record(&name, "CondenserTemperature", 353.25);
        Ok(())
    }
}

impl Flowsheet for StubFlowsheet {
    fn add_compound(&mut self, name: &str) -> Result<(), EngineError> {
        if self.behavior.build_fault.as_deref() == Some(name) {
            return Err(EngineError::Build {
                context: "adding compound",
                message: format!("compound '{name}' not found in the engine database"),
            });
        }
        if self.compounds.iter().any(|c| c == name) {
            return Err(EngineError::Build {
                context: "adding compound",
                message: format!("compound '{name}' already registered"),
            });
        }
        self.invalidate();
        self.compounds.push(name.to_string());
        Ok(())
    }

    fn select_property_package(&mut self, name: &str) -> Result<(), EngineError> {
        self.invalidate();
        self.property_package = Some(name.to_string());
        Ok(())
    }

    fn add_unit(&mut self, kind: UnitKind, name: &str) -> Result<(), EngineError> {
        if self.object_exists(name) {
            return Err(EngineError::Build {
                context: "adding unit operation",
                message: format!("object name '{name}' already in use"),
            });
        }
        self.invalidate();
        self.units.push((name.to_string(), kind));
        Ok(())
    }

    fn add_stream(&mut self, name: &str) -> Result<(), EngineError> {
        if self.object_exists(name) {
            return Err(EngineError::Build {
                context: "adding stream",
                message: format!("object name '{name}' already in use"),
            });
        }
        self.invalidate();
        self.streams.push(name.to_string());
        Ok(())
    }

    fn set_property(
        &mut self,
        object: &str,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), EngineError> {
        if !self.object_exists(object) {
            return Err(EngineError::UnknownObject(object.to_string()));
        }
        self.invalidate();
        self.properties
            .insert((object.to_string(), property.to_string()), value);
        Ok(())
    }

    fn add_conversion_reaction(
        &mut self,
        _name: &str,
        base_compound: &str,
        stoichiometry: &[(&str, f64)],
        conversion: f64,
    ) -> Result<(), EngineError> {
        for (compound, _) in stoichiometry {
            if !self.compounds.iter().any(|c| c == compound) {
                return Err(EngineError::Build {
                    context: "registering reaction",
                    message: format!("stoichiometry references unknown compound '{compound}'"),
                });
            }
        }
        if !self.compounds.iter().any(|c| c == base_compound) {
            return Err(EngineError::Build {
                context: "registering reaction",
                message: format!("unknown base compound '{base_compound}'"),
            });
        }
        self.invalidate();
        let product_compound = stoichiometry
            .iter()
            .find(|(_, coefficient)| *coefficient > 0.0)
            .map(|(compound, _)| compound.to_string());
        self.reactions.push(Reaction {
            base_compound: base_compound.to_string(),
            product_compound,
            conversion,
        });
        Ok(())
    }

    fn connect(
        &mut self,
        from: &str,
        from_port: usize,
        to: &str,
        to_port: usize,
    ) -> Result<(), EngineError> {
        if !self.object_exists(from) {
            return Err(EngineError::UnknownObject(from.to_string()));
        }
        if !self.object_exists(to) {
            return Err(EngineError::UnknownObject(to.to_string()));
        }
        self.invalidate();
        self.connections
            .push((from.to_string(), from_port, to.to_string(), to_port));
        Ok(())
    }

    fn solve(&mut self) -> Result<(), EngineError> {
        if self.property_package.is_none() {
            return Err(EngineError::Convergence(
                "no property package selected".to_string(),
            ));
        }

        if let Some(fault) = self.behavior.solve_fault.clone() {
            if let Some(message) = fault(self) {
                return Err(EngineError::Convergence(message));
            }
        }

        let units = self.units.clone();
        for (name, kind) in units {
            match kind {
                UnitKind::PlugFlowReactor => self.solve_reactor(name)?,
                UnitKind::DistillationColumn => self.solve_column(name)?,
            }
        }

        self.solved = true;
        Ok(())
    }

    fn read_property(&self, object: &str, property: &str) -> Result<f64, EngineError> {
        if !self.solved {
            return Err(EngineError::Extraction {
                object: object.to_string(),
                property: property.to_string(),
                message: "flowsheet has not been solved".to_string(),
            });
        }
        self.results
            .get(&(object.to_string(), property.to_string()))
            .copied()
            .ok_or_else(|| EngineError::Extraction {
                object: object.to_string(),
                property: property.to_string(),
                message: "no such result on the converged flowsheet".to_string(),
            })
    }
}
