use super::case::{CaseKind, CaseSpec};

/// Converged metrics extracted from a plug-flow reactor case.
///
/// `conversion` is a fraction in `0..=1`, both here and in the exported table.
#[derive(Debug, Clone, PartialEq)]
pub struct PfrMetrics {
    pub conversion: f64,
    pub outlet_b_flow_mol_s: f64,
    pub outlet_temperature_c: f64,
    pub heat_duty_kw: f64,
    pub outlet_pressure_bar: f64,
}

/// Converged metrics extracted from a distillation case.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetrics {
    pub distillate_purity_light: f64,
    pub bottoms_purity_heavy: f64,
    pub condenser_duty_kw: f64,
    pub reboiler_duty_kw: f64,
    pub condenser_temperature_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseMetrics {
    Pfr(PfrMetrics),
    Column(ColumnMetrics),
}

/// How one case ended. Failures carry a human-readable message and, when
/// available, the full diagnostic rendering of the underlying error.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Success(CaseMetrics),
    Failure {
        error: String,
        trace: Option<String>,
    },
}

/// Output record of a single case. Immutable once returned by the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub spec: CaseSpec,
    pub outcome: CaseOutcome,
}

impl CaseResult {
    pub fn success(spec: CaseSpec, metrics: CaseMetrics) -> Self {
        Self {
            spec,
            outcome: CaseOutcome::Success(metrics),
        }
    }

    pub fn failure(spec: CaseSpec, error: impl Into<String>, trace: Option<String>) -> Self {
        Self {
            spec,
            outcome: CaseOutcome::Failure {
                error: error.into(),
                trace,
            },
        }
    }

    pub fn kind(&self) -> CaseKind {
        self.spec.kind()
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CaseOutcome::Failure { error, .. } => Some(error),
            CaseOutcome::Success(_) => None,
        }
    }

    pub fn metrics(&self) -> Option<&CaseMetrics> {
        match &self.outcome {
            CaseOutcome::Success(metrics) => Some(metrics),
            CaseOutcome::Failure { .. } => None,
        }
    }
}

/// Aggregate counts over one run, reported after export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Ordered sequence of case results; insertion order is execution order.
/// Lives for one program run and is persisted at the end by the exporter.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<CaseResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: CaseResult) {
        self.records.push(result);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaseResult> {
        self.records.iter()
    }

    pub fn summary(&self) -> RunSummary {
        let succeeded = self.records.iter().filter(|r| r.is_success()).count();
        RunSummary {
            total: self.records.len(),
            succeeded,
            failed: self.records.len() - succeeded,
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CaseResult;
    type IntoIter = std::slice::Iter<'a, CaseResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
