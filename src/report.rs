//! Reduces field outcomes to one plugin status line.
//!
//! Output follows the monitoring plugin convention:
//!
//! ```text
//! WARNING io pressure - some_avg10 is 15.00 (warn at 10.00) | some_avg10=15.00;10.00;20.00 ...
//! ```

use crate::alert::{FieldOutcome, Severity};
use crate::error::CheckError;
use crate::resource::Resource;
use serde::Serialize;
use std::error::Error;
use std::fmt;

pub const ALL_WITHIN: &str = "all values within thresholds";

/// Overall plugin status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Process exit code expected by monitoring systems
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Ok => Status::Ok,
            Severity::Warning => Status::Warning,
            Severity::Critical => Status::Critical,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        })
    }
}

/// Final result of one check run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub resource: Resource,
    pub status: Status,
    pub summary: String,
    /// Empty for UNKNOWN results
    pub perfdata: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<FieldOutcome>,
}

impl Report {
    /// Reduce outcomes to the most severe status.
    ///
    /// Outcomes are expected in the resource's output order, as produced by
    /// `AlertChecker::check`; they are re-sorted anyway so the summary and
    /// perfdata never depend on evaluation order.
    pub fn aggregate(resource: Resource, mut outcomes: Vec<FieldOutcome>) -> Self {
        outcomes.sort_by_key(|o| o.field);

        let severity = outcomes
            .iter()
            .map(|o| o.severity)
            .max()
            .unwrap_or(Severity::Ok);

        let breaches: Vec<String> = outcomes.iter().filter_map(FieldOutcome::describe).collect();
        let summary = if breaches.is_empty() {
            ALL_WITHIN.to_string()
        } else {
            breaches.join(", ")
        };

        Self {
            resource,
            status: severity.into(),
            summary,
            perfdata: outcomes.iter().map(FieldOutcome::perfdata).collect(),
            outcomes,
        }
    }

    /// UNKNOWN result carrying the error chain, no perfdata
    pub fn unknown(resource: Resource, error: &CheckError) -> Self {
        let mut summary = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !summary.contains(&text) {
                summary.push_str(": ");
                summary.push_str(&text);
            }
            source = cause.source();
        }

        Self {
            resource,
            status: Status::Unknown,
            summary,
            perfdata: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// The single plugin output line
    pub fn render(&self) -> String {
        let mut line = format!("{} {} pressure - {}", self.status, self.resource, self.summary);
        if !self.perfdata.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.perfdata.join(" "));
        }
        line
    }
}
