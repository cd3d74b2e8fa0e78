//! Console rendering for inspection results.
//!
//! A run prints either the full three-line report or exactly one error line,
//! never a mix.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::InspectError;
use crate::types::{BitDepth, ColorMode};

/// The conclusion of one successful inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionReport {
    path: PathBuf,
    mode: ColorMode,
    depth: BitDepth,
    label: String,
}

impl InspectionReport {
    pub fn new(path: &Path, mode: ColorMode, depth: BitDepth) -> Self {
        let label = depth.label(&mode);
        Self {
            path: path.to_path_buf(),
            mode,
            depth,
            label,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> &ColorMode {
        &self.mode
    }

    pub fn depth(&self) -> &BitDepth {
        &self.depth
    }

    /// Derived bit depth conclusion, e.g. `RGBA8888 (Standard)`.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path.display())?;
        writeln!(f, "Pillow Mode: {}", self.mode)?;
        write!(f, "Image Bit Depth: {}", self.label)
    }
}

/// The single line printed when inspection fails.
pub fn error_line(err: &InspectError) -> String {
    match err {
        InspectError::NotFound(_) => format!("Error: {}", err),
        InspectError::Inspection { .. } => format!("An error occurred: {}", err),
    }
}
