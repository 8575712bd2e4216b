//! Warning/critical level pair and its `WARN:CRIT` text form.

use crate::alert::Severity;
use crate::error::ThresholdError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Warning and critical levels for one field.
///
/// No ordering between `warn` and `crit` is enforced. Critical is always
/// checked first, so with `warn > crit` a value between the two reports
/// CRITICAL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub warn: f64,
    pub crit: f64,
}

impl Threshold {
    pub const fn new(warn: f64, crit: f64) -> Self {
        Self { warn, crit }
    }

    /// Parse `WARN:CRIT`, both parts non-negative decimals
    pub fn parse(text: &str) -> Result<Self, ThresholdError> {
        let mut parts = text.split(':');
        let (warn, crit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(warn), Some(crit), None) => (warn, crit),
            _ => {
                return Err(ThresholdError::Shape {
                    input: text.to_string(),
                })
            }
        };

        Ok(Self {
            warn: parse_level(text, warn)?,
            crit: parse_level(text, crit)?,
        })
    }

    /// Inclusive at both levels, critical wins
    pub fn evaluate(&self, value: f64) -> Severity {
        if value >= self.crit {
            Severity::Critical
        } else if value >= self.warn {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    /// Level that was crossed for a given severity, if any
    pub fn level(&self, severity: Severity) -> Option<f64> {
        match severity {
            Severity::Ok => None,
            Severity::Warning => Some(self.warn),
            Severity::Critical => Some(self.crit),
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.warn > self.crit
    }
}

fn parse_level(input: &str, part: &str) -> Result<f64, ThresholdError> {
    let value: f64 = part
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ThresholdError::NotANumber {
            input: input.to_string(),
            part: part.to_string(),
        })?;

    // "-0" parses to negative zero, which passes
    if value < 0.0 {
        return Err(ThresholdError::Negative {
            input: input.to_string(),
            part: part.to_string(),
        });
    }
    // drop the sign of negative zero
    Ok(value + 0.0)
}

impl FromStr for Threshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.warn, self.crit)
    }
}
