//! Pressure Stall Information (PSI) parsing and collection from /proc/pressure/.
//!
//! File format, one line per qualifier:
//!
//! ```text
//! some avg10=0.00 avg60=0.00 avg300=0.00 total=0
//! full avg10=0.00 avg60=0.00 avg300=0.00 total=0
//! ```

use crate::error::{CheckError, FormatError, Result};
use crate::resource::{Field, Qualifier, Resource, Window};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PRESSURE_DIR: &str = "/proc/pressure";

/// Parsed PSI values for one resource
#[derive(Debug, Clone, PartialEq)]
pub struct PsiRecord {
    resource: Resource,
    values: BTreeMap<Field, f64>,
}

impl PsiRecord {
    /// Parse the text of a pressure file.
    ///
    /// Line order and token order within a line do not matter. Keys other
    /// than the three averages (`total`) are ignored, and a `full` line on
    /// cpu is validated but not kept.
    pub fn parse(resource: Resource, text: &str) -> std::result::Result<Self, FormatError> {
        let mut values = BTreeMap::new();

        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let Some(head) = tokens.next() else {
                continue;
            };
            let qualifier = Qualifier::parse(head)
                .ok_or_else(|| FormatError::UnrecognizedQualifier(head.to_string()))?;

            for token in tokens {
                let (key, value) = match token.split_once('=') {
                    Some((k, v)) if !k.is_empty() && !v.is_empty() => (k, v),
                    _ => return Err(FormatError::MalformedToken(token.to_string())),
                };
                let Some(window) = Window::from_key(key) else {
                    continue;
                };
                let number = value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| FormatError::InvalidNumber {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;

                let field = Field::new(qualifier, window);
                if resource.has_field(field) {
                    values.insert(field, number);
                }
            }
        }

        if let Some(missing) = resource.fields().iter().find(|f| !values.contains_key(*f)) {
            return Err(FormatError::MissingField(*missing));
        }

        Ok(Self { resource, values })
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied()
    }

    /// Values in fixed output order
    pub fn iter(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }
}

/// PSI collector reading from a pressure directory
pub struct PsiCollector {
    dir: PathBuf,
}

impl PsiCollector {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.source_file())
    }

    /// Read and parse the pressure file for a resource.
    ///
    /// The file is read in one go and closed before parsing starts.
    pub fn collect(&self, resource: Resource) -> Result<PsiRecord> {
        let path = self.path_for(resource);
        let content = fs::read_to_string(&path).map_err(|source| CheckError::SourceUnavailable {
            resource,
            path: path.clone(),
            source,
        })?;
        log::debug!("read {} bytes from {}", content.len(), path.display());
        log::trace!("{} pressure contents: {:?}", resource, content);

        PsiRecord::parse(resource, &content).map_err(|source| CheckError::Format { resource, source })
    }
}

impl Default for PsiCollector {
    fn default() -> Self {
        Self::new(DEFAULT_PRESSURE_DIR)
    }
}
