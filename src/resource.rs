//! Pressure resources and the fields each one exposes.
//!
//! The capability table here is the single place that knows cpu has no
//! `full` line. The parser uses it to validate a record and the report
//! uses it to order output.

use crate::threshold::Threshold;
use serde::{Serialize, Serializer};
use std::fmt;

/// A resource with a file under `/proc/pressure/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Cpu,
    Io,
    Memory,
}

/// `some`: at least one task stalled. `full`: all non-idle tasks stalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    Some,
    Full,
}

/// Trailing average window reported by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Window {
    Avg10,
    Avg60,
    Avg300,
}

/// One monitored value, e.g. `some_avg10`.
///
/// The derived ordering (qualifier first, then window) is the fixed
/// output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Field {
    pub qualifier: Qualifier,
    pub window: Window,
}

const fn field(qualifier: Qualifier, window: Window) -> Field {
    Field { qualifier, window }
}

const SOME_FIELDS: [Field; 3] = [
    field(Qualifier::Some, Window::Avg10),
    field(Qualifier::Some, Window::Avg60),
    field(Qualifier::Some, Window::Avg300),
];

const ALL_FIELDS: [Field; 6] = [
    field(Qualifier::Some, Window::Avg10),
    field(Qualifier::Some, Window::Avg60),
    field(Qualifier::Some, Window::Avg300),
    field(Qualifier::Full, Window::Avg10),
    field(Qualifier::Full, Window::Avg60),
    field(Qualifier::Full, Window::Avg300),
];

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Cpu, Resource::Io, Resource::Memory];

    pub fn name(self) -> &'static str {
        match self {
            Resource::Cpu => "cpu",
            Resource::Io => "io",
            Resource::Memory => "memory",
        }
    }

    /// File name under the pressure directory
    pub fn source_file(self) -> &'static str {
        self.name()
    }

    /// Fields this resource must report, in output order
    pub fn fields(self) -> &'static [Field] {
        match self {
            Resource::Cpu => &SOME_FIELDS,
            Resource::Io | Resource::Memory => &ALL_FIELDS,
        }
    }

    pub fn has_field(self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    /// Built-in warning/critical levels for a field
    pub fn default_threshold(self, field: Field) -> Threshold {
        use Qualifier::{Full, Some as Partial};
        use Window::*;

        let (warn, crit) = match (self, field.qualifier, field.window) {
            (Resource::Io, Partial, Avg10) => (10.0, 20.0),
            (Resource::Io, Partial, Avg60) => (7.0, 15.0),
            (Resource::Io, Partial, Avg300) => (5.0, 10.0),
            (Resource::Io, Full, Avg10) => (5.0, 10.0),
            (Resource::Io, Full, Avg60) => (3.0, 7.0),
            (Resource::Io, Full, Avg300) => (1.0, 3.0),
            // cpu and memory share the same levels
            (_, Partial, Avg10) => (5.0, 10.0),
            (_, Partial, Avg60) => (3.0, 7.0),
            (_, Partial, Avg300) => (2.0, 5.0),
            (_, Full, Avg10) => (3.0, 5.0),
            (_, Full, Avg60) => (2.0, 3.0),
            (_, Full, Avg300) => (1.0, 2.0),
        };
        Threshold::new(warn, crit)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Qualifier {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "some" => Some(Qualifier::Some),
            "full" => Some(Qualifier::Full),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Qualifier::Some => "some",
            Qualifier::Full => "full",
        }
    }
}

impl Window {
    /// Map a kernel key (`avg10`, ...) to a window; other keys are not windows.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "avg10" => Some(Window::Avg10),
            "avg60" => Some(Window::Avg60),
            "avg300" => Some(Window::Avg300),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Window::Avg10 => "avg10",
            Window::Avg60 => "avg60",
            Window::Avg300 => "avg300",
        }
    }
}

impl Field {
    pub const fn new(qualifier: Qualifier, window: Window) -> Self {
        field(qualifier, window)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.qualifier.as_str(), self.window.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_has_only_some_fields() {
        let names: Vec<String> = Resource::Cpu.fields().iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["some_avg10", "some_avg60", "some_avg300"]);
        assert!(!Resource::Cpu.has_field(Field::new(Qualifier::Full, Window::Avg10)));
    }

    #[test]
    fn test_io_and_memory_fields_in_output_order() {
        for resource in [Resource::Io, Resource::Memory] {
            let names: Vec<String> = resource.fields().iter().map(|f| f.to_string()).collect();
            assert_eq!(
                names,
                [
                    "some_avg10",
                    "some_avg60",
                    "some_avg300",
                    "full_avg10",
                    "full_avg60",
                    "full_avg300"
                ]
            );
        }
    }

    #[test]
    fn test_field_ordering_matches_table() {
        let mut sorted = ALL_FIELDS.to_vec();
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, ALL_FIELDS.to_vec());
    }

    #[test]
    fn test_default_thresholds() {
        let some_avg10 = Field::new(Qualifier::Some, Window::Avg10);
        assert_eq!(Resource::Io.default_threshold(some_avg10), Threshold::new(10.0, 20.0));
        assert_eq!(Resource::Cpu.default_threshold(some_avg10), Threshold::new(5.0, 10.0));

        let full_avg300 = Field::new(Qualifier::Full, Window::Avg300);
        assert_eq!(Resource::Memory.default_threshold(full_avg300), Threshold::new(1.0, 2.0));
        assert_eq!(Resource::Io.default_threshold(full_avg300), Threshold::new(1.0, 3.0));
    }

    #[test]
    fn test_window_keys() {
        assert_eq!(Window::from_key("avg60"), Some(Window::Avg60));
        assert_eq!(Window::from_key("total"), None);
        assert_eq!(Qualifier::parse("full"), Some(Qualifier::Full));
        assert_eq!(Qualifier::parse("bogus"), None);
    }
}
