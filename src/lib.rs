//! check_psi - monitoring plugin for Linux Pressure Stall Information.
//!
//! Reads `/proc/pressure/<resource>`, checks every average against
//! warning/critical thresholds and reduces the results to one status line
//! with performance data and a matching exit code.

pub mod alert;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod resource;
pub mod threshold;

pub use alert::{AlertChecker, FieldOutcome, Severity, Thresholds};
pub use config::{Args, CheckConfig, OutputFormat};
pub use error::{CheckError, FormatError, ThresholdError};
pub use metrics::{PsiCollector, PsiRecord};
pub use report::{Report, Status};
pub use resource::{Field, Qualifier, Resource, Window};
pub use threshold::Threshold;

/// Initialize stderr logging. `RUST_LOG` takes precedence over `verbosity`.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Run one check. Every failure ends up as an UNKNOWN report.
pub fn run(config: &CheckConfig) -> Report {
    let collector = PsiCollector::new(&config.pressure_dir);
    let checker = AlertChecker::new(config.thresholds.clone());

    match collector.collect(config.resource) {
        Ok(record) => {
            let report = Report::aggregate(config.resource, checker.check(&record));
            log::info!("{} pressure status {}", config.resource, report.status);
            report
        }
        Err(e) => {
            log::info!("{} pressure check failed: {}", config.resource, e);
            Report::unknown(config.resource, &e)
        }
    }
}
