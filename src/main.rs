//! check_psi - monitoring plugin entry point.
//!
//! Prints one status line on stdout and exits with the plugin status code.

use anyhow::{Context, Result};
use check_psi::{config::Args, CheckConfig, OutputFormat, Report, Status};
use clap::Parser;
use std::io::{self, Write};
use std::process;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        // Bad arguments must not exit 2, which monitoring reads as CRITICAL
        Err(e) => {
            let _ = e.print();
            process::exit(Status::Unknown.exit_code());
        }
    };

    check_psi::init_logging(args.verbose);

    let config = CheckConfig::from_args(&args);
    let report = check_psi::run(&config);

    let code = match emit(&report, config.output) {
        Ok(()) => report.exit_code(),
        Err(e) => {
            log::error!("{:#}", e);
            Status::Unknown.exit_code()
        }
    };
    process::exit(code);
}

fn emit(report: &Report, output: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match output {
        OutputFormat::Line => writeln!(stdout, "{}", report.render()),
        OutputFormat::Json => {
            let json = serde_json::to_string(report).context("Failed to serialize report")?;
            writeln!(stdout, "{}", json)
        }
    }
    .context("Failed to write report to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
