use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
};

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber: a compact stderr layer filtered by the
/// verbosity flags, plus an unfiltered plain-text file layer when `--log-file`
/// is given. The file keeps per-case records even when stderr only shows
/// warnings.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(&path).map_err(CliError::Io)?;
            registry
                .with(fmt::layer().with_writer(file).with_ansi(false))
                .init();
        }
        None => registry.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{info, warn};

    static INIT: Once = Once::new();

    #[test]
    fn verbosity_flags_map_to_level_filters() {
        assert_eq!(level_filter(0, true), LevelFilter::OFF);
        assert_eq!(level_filter(3, true), LevelFilter::OFF);
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(3, false), LevelFilter::TRACE);
        assert_eq!(level_filter(9, false), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn global_subscriber_accepts_sweep_events() {
        INIT.call_once(|| {
            setup_logging(2, false, None).expect("global subscriber for tests");
        });

        info!(total = 16, "Starting parameter sweep.");
        warn!(case = "Column N=8, feed@4, RR=0.5, D=50 kmol/h", "Case failed.");
    }

    #[test]
    fn file_layer_captures_per_case_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.log");

        let file = File::create(&path).unwrap();
        let subscriber =
            tracing_subscriber::registry().with(fmt::layer().with_writer(file).with_ansi(false));

        tracing::subscriber::with_default(subscriber, || {
            info!(case = "PFR V=0.5 m3, T=80 C, P=1 bar", "Case converged.");
            warn!("2 of 16 cases failed to converge.");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("PFR V=0.5 m3"));
        assert!(content.contains("cases failed to converge"));
        assert!(content.contains("WARN"));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        // File::create on a directory fails before the subscriber is
        // installed, so the global state is untouched.
        let dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
