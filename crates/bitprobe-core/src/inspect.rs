//! The inspector: open an image, read its mode and bit metadata, conclude.

use std::path::Path;

use crate::config::Config;
use crate::error::{InspectResult, Result};
use crate::report::InspectionReport;
use crate::source::{DecoderSource, ImageMetadata, ImageSource};
use crate::types::BitDepth;

/// Inspect the image at `path` using the default decoder-backed source.
pub fn inspect(path: &Path) -> InspectResult<InspectionReport> {
    Inspector::new().inspect(path)
}

/// Load the config file at `config_path` and inspect its default image.
///
/// Config failures and inspection failures both surface as [`BitprobeError`].
///
/// [`BitprobeError`]: crate::error::BitprobeError
pub fn inspect_configured(config_path: &Path) -> Result<InspectionReport> {
    let config = Config::load_from(config_path)?;
    let report = inspect(&config.default_image_path())?;
    Ok(report)
}

/// Runs one inspection per call against an [`ImageSource`].
#[derive(Debug, Clone, Default)]
pub struct Inspector<S = DecoderSource> {
    source: S,
}

impl Inspector<DecoderSource> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ImageSource> Inspector<S> {
    /// Use a custom image source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Inspect the image at `path`.
    ///
    /// The handle is dropped before the report is built, on success and on
    /// every error path.
    pub fn inspect(&self, path: &Path) -> InspectResult<InspectionReport> {
        tracing::debug!("Inspecting: {:?}", path);

        let (mode, bits) = {
            let mut handle = self.source.open(path)?;
            let mode = handle.color_mode()?;
            let bits = handle.bit_depth_info()?;
            (mode, bits)
        };

        let depth = BitDepth::classify(bits, &mode);
        tracing::debug!("Mode {} with bit depth {:?}", mode, depth);

        Ok(InspectionReport::new(path, mode, depth))
    }
}
