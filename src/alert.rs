//! Threshold checks for individual PSI fields.

use crate::metrics::PsiRecord;
use crate::resource::{Field, Resource};
use crate::threshold::Threshold;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Per-field severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        })
    }
}

/// Result of checking one field against its threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOutcome {
    pub field: Field,
    pub value: f64,
    pub threshold: Threshold,
    pub severity: Severity,
}

impl FieldOutcome {
    /// Performance data token: `field=value;warn;crit`
    pub fn perfdata(&self) -> String {
        format!(
            "{}={:.2};{:.2};{:.2}",
            self.field, self.value, self.threshold.warn, self.threshold.crit
        )
    }

    /// Human readable description of a breached level, `None` when OK
    pub fn describe(&self) -> Option<String> {
        let level = self.threshold.level(self.severity)?;
        let kind = match self.severity {
            Severity::Critical => "crit",
            _ => "warn",
        };
        Some(format!(
            "{} is {:.2} ({} at {:.2})",
            self.field, self.value, kind, level
        ))
    }
}

/// Check one field value against a threshold
pub fn evaluate(field: Field, value: f64, threshold: Threshold) -> FieldOutcome {
    FieldOutcome {
        field,
        value,
        threshold,
        severity: threshold.evaluate(value),
    }
}

/// Fully resolved thresholds for one resource
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    resource: Resource,
    levels: BTreeMap<Field, Threshold>,
}

impl Thresholds {
    /// Built-in levels for every field of the resource
    pub fn defaults(resource: Resource) -> Self {
        let levels = resource
            .fields()
            .iter()
            .map(|&field| (field, resource.default_threshold(field)))
            .collect();
        Self { resource, levels }
    }

    /// Override one field. Returns false if the resource has no such field.
    pub fn set(&mut self, field: Field, threshold: Threshold) -> bool {
        if !self.resource.has_field(field) {
            log::debug!(
                "ignoring {} override for {}, field not reported",
                field,
                self.resource
            );
            return false;
        }
        if threshold.is_inverted() {
            log::warn!(
                "{} threshold {} has warn above crit, values between report CRITICAL",
                field,
                threshold
            );
        }
        self.levels.insert(field, threshold);
        true
    }

    pub fn get(&self, field: Field) -> Threshold {
        self.levels
            .get(&field)
            .copied()
            .unwrap_or_else(|| self.resource.default_threshold(field))
    }
}

/// Applies resolved thresholds to parsed records
pub struct AlertChecker {
    thresholds: Thresholds,
}

impl AlertChecker {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate every field of a record, in output order
    pub fn check(&self, record: &PsiRecord) -> Vec<FieldOutcome> {
        record
            .iter()
            .map(|(field, value)| {
                let outcome = evaluate(field, value, self.thresholds.get(field));
                log::debug!(
                    "{} {}={:.2} warn={} crit={} -> {}",
                    record.resource(),
                    field,
                    value,
                    outcome.threshold.warn,
                    outcome.threshold.crit,
                    outcome.severity
                );
                outcome
            })
            .collect()
    }
}
