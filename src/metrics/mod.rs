//! Metrics collection from the kernel's pressure interface.

pub mod psi;

pub use psi::{PsiCollector, PsiRecord, DEFAULT_PRESSURE_DIR};
