//! Command line options and the resolved per-run configuration.

use crate::alert::Thresholds;
use crate::metrics::DEFAULT_PRESSURE_DIR;
use crate::resource::{Field, Qualifier, Resource, Window};
use crate::threshold::Threshold;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Check Linux Pressure Stall Information against warning/critical thresholds
#[derive(Parser, Debug)]
#[command(name = "check_psi")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the per-resource pressure files
    #[arg(
        long,
        global = true,
        env = "CHECK_PSI_PRESSURE_DIR",
        default_value = DEFAULT_PRESSURE_DIR
    )]
    pub pressure_dir: PathBuf,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Line)]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check cpu pressure
    Cpu(ThresholdArgs),
    /// Check io pressure
    Io(ThresholdArgs),
    /// Check memory pressure
    Memory(ThresholdArgs),
}

impl Command {
    pub fn resource(&self) -> Resource {
        match self {
            Command::Cpu(_) => Resource::Cpu,
            Command::Io(_) => Resource::Io,
            Command::Memory(_) => Resource::Memory,
        }
    }

    pub fn overrides(&self) -> &ThresholdArgs {
        match self {
            Command::Cpu(o) | Command::Io(o) | Command::Memory(o) => o,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Monitoring plugin status line
    Line,
    /// JSON document on stdout
    Json,
}

/// Per-field `WARN:CRIT` overrides. Unset fields keep the resource defaults.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ThresholdArgs {
    /// Thresholds for "some" stall over 10s
    #[arg(long, value_name = "WARN:CRIT")]
    pub some_avg10: Option<Threshold>,

    /// Thresholds for "some" stall over 60s
    #[arg(long, value_name = "WARN:CRIT")]
    pub some_avg60: Option<Threshold>,

    /// Thresholds for "some" stall over 300s
    #[arg(long, value_name = "WARN:CRIT")]
    pub some_avg300: Option<Threshold>,

    /// Thresholds for "full" stall over 10s (not reported for cpu)
    #[arg(long, value_name = "WARN:CRIT")]
    pub full_avg10: Option<Threshold>,

    /// Thresholds for "full" stall over 60s (not reported for cpu)
    #[arg(long, value_name = "WARN:CRIT")]
    pub full_avg60: Option<Threshold>,

    /// Thresholds for "full" stall over 300s (not reported for cpu)
    #[arg(long, value_name = "WARN:CRIT")]
    pub full_avg300: Option<Threshold>,
}

impl ThresholdArgs {
    /// Overrides that were actually given
    pub fn overrides(&self) -> Vec<(Field, Threshold)> {
        use Qualifier::{Full, Some as Partial};

        [
            (Field::new(Partial, Window::Avg10), self.some_avg10),
            (Field::new(Partial, Window::Avg60), self.some_avg60),
            (Field::new(Partial, Window::Avg300), self.some_avg300),
            (Field::new(Full, Window::Avg10), self.full_avg10),
            (Field::new(Full, Window::Avg60), self.full_avg60),
            (Field::new(Full, Window::Avg300), self.full_avg300),
        ]
        .into_iter()
        .filter_map(|(field, threshold)| threshold.map(|t| (field, t)))
        .collect()
    }
}

/// Everything a run needs, resolved before any file is read
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub resource: Resource,
    pub pressure_dir: PathBuf,
    pub thresholds: Thresholds,
    pub output: OutputFormat,
}

impl CheckConfig {
    /// Defaults for the resource with no overrides
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            pressure_dir: PathBuf::from(DEFAULT_PRESSURE_DIR),
            thresholds: Thresholds::defaults(resource),
            output: OutputFormat::Line,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        let resource = args.command.resource();
        let mut thresholds = Thresholds::defaults(resource);
        for (field, threshold) in args.command.overrides().overrides() {
            thresholds.set(field, threshold);
        }

        Self {
            resource,
            pressure_dir: args.pressure_dir.clone(),
            thresholds,
            output: args.output,
        }
    }
}
