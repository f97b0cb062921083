use serde::Serialize;

/// Discriminator between the two supported case topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CaseKind {
    Pfr,
    Column,
}

impl CaseKind {
    /// Stable label used in logs and in the `case_type` report column.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseKind::Pfr => "PFR",
            CaseKind::Column => "Distillation",
        }
    }
}

impl std::fmt::Display for CaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent variables for one plug-flow reactor case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PfrSpec {
    pub volume_m3: f64,
    pub temperature_c: f64,
    pub pressure_bar: f64,
}

/// Independent variables for one binary distillation case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub stage_count: usize,
    pub feed_stage: usize,
    pub reflux_ratio: f64,
    pub distillate_rate_kmol_h: f64,
}

/// One point in the sweep grid. Immutable once constructed; produced by the
/// grid enumeration and consumed by exactly one case execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CaseSpec {
    Pfr(PfrSpec),
    Column(ColumnSpec),
}

impl CaseSpec {
    pub fn kind(&self) -> CaseKind {
        match self {
            CaseSpec::Pfr(_) => CaseKind::Pfr,
            CaseSpec::Column(_) => CaseKind::Column,
        }
    }

    /// Short human-readable description for logs and progress display.
    pub fn label(&self) -> String {
        match self {
            CaseSpec::Pfr(s) => format!(
                "PFR V={} m3, T={} C, P={} bar",
                s.volume_m3, s.temperature_c, s.pressure_bar
            ),
            CaseSpec::Column(s) => format!(
                "Column N={}, feed@{}, RR={}, D={} kmol/h",
                s.stage_count, s.feed_stage, s.reflux_ratio, s.distillate_rate_kmol_h
            ),
        }
    }
}
