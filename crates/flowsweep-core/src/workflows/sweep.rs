use crate::core::models::result::{CaseResult, ResultSet};
use crate::engine::adapter::EngineSession;
use crate::engine::builder::build_flowsheet;
use crate::engine::config::SweepConfig;
use crate::engine::grid::enumerate_cases;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::runner::run_case;
use tracing::{info, instrument, warn};

/// Runs the full parameter sweep described by `config` against `session`.
///
/// Cases are enumerated deterministically (reactor cases first, outer axes
/// varying slowest) and executed strictly in sequence, each on a freshly built
/// flowsheet. A failing case is recorded and the sweep moves on; this function
/// itself never fails.
#[instrument(skip_all, name = "sweep_workflow")]
pub fn run<S: EngineSession>(
    session: &S,
    config: &SweepConfig,
    reporter: &ProgressReporter,
) -> ResultSet {
    let cases = enumerate_cases(config);
    info!(total = cases.len(), "Starting parameter sweep.");
    reporter.report(Progress::SweepStart {
        total_cases: cases.len() as u64,
    });

    let mut results = ResultSet::new();
    for (index, spec) in cases.into_iter().enumerate() {
        let label = spec.label();
        reporter.report(Progress::CaseStart {
            index: index as u64,
            label: label.clone(),
        });

        let result = match build_flowsheet(session, spec.kind()) {
            Ok(mut flowsheet) => run_case(&mut flowsheet, &spec),
            Err(err) => {
                CaseResult::failure(spec, err.to_string(), Some(format!("{err:?}")))
            }
        };

        if let Some(error) = result.error() {
            warn!(case = %label, error = %error, "Case failed.");
            reporter.report(Progress::Message(format!("{label}: {error}")));
        }
        reporter.report(Progress::CaseFinish {
            success: result.is_success(),
        });
        results.push(result);
    }

    let summary = results.summary();
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Sweep finished."
    );
    reporter.report(Progress::SweepFinish);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::case::{CaseKind, CaseSpec};
    use crate::core::models::result::CaseMetrics;
    use crate::core::report::write_csv;
    use crate::engine::config::{ColumnGrid, PfrGrid};
    use crate::engine::stub::StubEngine;
    use std::sync::Mutex;

    fn full_config() -> SweepConfig {
        SweepConfig::builder()
            .pfr_grid(PfrGrid {
                volumes_m3: vec![0.5, 1.0],
                temperatures_c: vec![80.0, 100.0],
                pressure_bar: 1.0,
            })
            .column_grid(ColumnGrid {
                stage_counts: vec![8, 10, 15],
                reflux_ratios: vec![1.5, 2.0],
                distillate_rate_kmol_h: 50.0,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn produces_one_result_per_grid_combination() {
        let session = StubEngine::new();
        let results = run(&session, &full_config(), &ProgressReporter::new());

        let summary = results.summary();
        assert_eq!(summary.total, 2 * 2 + 3 * 2);
        assert_eq!(summary.succeeded, summary.total);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn pfr_cases_all_reach_the_fixed_conversion() {
        let session = StubEngine::new();
        let config = SweepConfig::builder()
            .pfr_grid(PfrGrid {
                volumes_m3: vec![0.5, 1.0],
                temperatures_c: vec![80.0, 100.0],
                pressure_bar: 1.0,
            })
            .build()
            .unwrap();

        let results = run(&session, &config, &ProgressReporter::new());
        assert_eq!(results.len(), 4);
        for result in &results {
            match result.metrics().unwrap() {
                CaseMetrics::Pfr(m) => assert_eq!(m.conversion, 0.5),
                other => panic!("expected PFR metrics, got {other:?}"),
            }
        }

        // Each (volume, temperature) pair appears exactly once.
        let mut pairs: Vec<_> = results
            .iter()
            .map(|r| match &r.spec {
                CaseSpec::Pfr(p) => (p.volume_m3.to_bits(), p.temperature_c.to_bits()),
                _ => unreachable!(),
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn one_failing_case_does_not_disturb_its_neighbors() {
        // Fail exactly the cases run at 100 C feed temperature.
        let session = StubEngine::new().with_solve_fault(|fs| {
            (fs.scalar("Feed", "Temperature") == Some(373.15))
                .then(|| "flash calculation diverged".to_string())
        });
        let config = SweepConfig::builder()
            .pfr_grid(PfrGrid {
                volumes_m3: vec![0.5, 1.0],
                temperatures_c: vec![80.0, 100.0],
                pressure_bar: 1.0,
            })
            .build()
            .unwrap();

        let results = run(&session, &config, &ProgressReporter::new());
        let summary = results.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);

        for result in &results {
            let is_hot = matches!(&result.spec, CaseSpec::Pfr(p) if p.temperature_c == 100.0);
            assert_eq!(result.is_success(), !is_hot);
            if is_hot {
                assert!(result.error().unwrap().contains("diverged"));
            }
        }
    }

    #[test]
    fn rerunning_the_grid_exports_identical_bytes() {
        // Grid includes a sub-minimum reflux ratio so failed rows are part
        // of the comparison too.
        let config = SweepConfig::builder()
            .pfr_grid(PfrGrid {
                volumes_m3: vec![0.5, 1.0],
                temperatures_c: vec![80.0, 100.0],
                pressure_bar: 1.0,
            })
            .column_grid(ColumnGrid {
                stage_counts: vec![8, 10],
                reflux_ratios: vec![0.5, 2.0],
                distillate_rate_kmol_h: 50.0,
            })
            .build()
            .unwrap();

        let export = || {
            let session = StubEngine::new();
            let results = run(&session, &config, &ProgressReporter::new());
            let mut buffer = Vec::new();
            write_csv(&results, &mut buffer).unwrap();
            buffer
        };

        let first = export();
        let second = export();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn build_failures_are_recorded_as_failed_cases() {
        // Rejecting benzene breaks column construction but leaves the
        // reactor topology untouched.
        let session = StubEngine::new().with_build_fault("Benzene");
        let results = run(&session, &full_config(), &ProgressReporter::new());

        for result in &results {
            match result.kind() {
                CaseKind::Pfr => assert!(result.is_success()),
                CaseKind::Column => {
                    assert!(!result.is_success());
                    assert!(result.error().unwrap().contains("Benzene"));
                }
            }
        }
    }

    #[test]
    fn reports_the_expected_progress_sequence() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        let session = StubEngine::new();
        let config = SweepConfig::builder()
            .column_grid(ColumnGrid {
                stage_counts: vec![8],
                reflux_ratios: vec![1.5, 2.0],
                distillate_rate_kmol_h: 50.0,
            })
            .build()
            .unwrap();
        run(&session, &config, &reporter);
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 1 + 2 * 2 + 1);
        assert!(matches!(events[0], Progress::SweepStart { total_cases: 2 }));
        assert!(matches!(events[1], Progress::CaseStart { index: 0, .. }));
        assert!(matches!(events[2], Progress::CaseFinish { success: true }));
        assert!(matches!(events[3], Progress::CaseStart { index: 1, .. }));
        assert!(matches!(events.last(), Some(Progress::SweepFinish)));
    }

    #[test]
    fn failing_cases_emit_a_progress_message() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        let session = StubEngine::new();
        let config = SweepConfig::builder()
            .column_grid(ColumnGrid {
                stage_counts: vec![8],
                reflux_ratios: vec![0.5, 2.0],
                distillate_rate_kmol_h: 50.0,
            })
            .build()
            .unwrap();
        run(&session, &config, &reporter);
        drop(reporter);

        let events = events.into_inner().unwrap();
        let messages: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Progress::Message(m) => Some(m.as_str()),
                _ => None,
            })
            .collect();
        // One notice for the sub-minimum reflux case, none for the success.
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("RR=0.5"));
        assert!(messages[0].contains("converge"));
    }
}
