//! Image sources: open a path and answer metadata queries about it.
//!
//! The inspector only needs three things from an image library: open by
//! path, the color mode, and the recorded per-channel bit depth. The
//! [`ImageSource`] / [`ImageMetadata`] pair captures exactly that, so tests
//! can drive the inspector without touching the filesystem.

use image::{ImageDecoder, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::bits;
use crate::error::{InspectError, InspectResult};
use crate::types::{ColorMode, RawBits};

/// Something that can open an image by path.
pub trait ImageSource {
    /// Open handle. Released when dropped.
    type Handle: ImageMetadata;

    fn open(&self, path: &Path) -> InspectResult<Self::Handle>;
}

/// Metadata queries against an open image.
pub trait ImageMetadata {
    /// Channel layout of the stored image.
    fn color_mode(&mut self) -> InspectResult<ColorMode>;

    /// Per-channel bit depth recorded by the container, if any.
    fn bit_depth_info(&mut self) -> InspectResult<Option<RawBits>>;
}

/// Default source backed by the `image` crate's header parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderSource;

impl ImageSource for DecoderSource {
    type Handle = ImageHandle;

    fn open(&self, path: &Path) -> InspectResult<ImageHandle> {
        ImageHandle::open(path)
    }
}

/// An open image file with its detected container format.
///
/// Owns the file descriptor; dropping the handle closes it. Only headers are
/// ever parsed, no pixel buffer is allocated.
pub struct ImageHandle {
    path: PathBuf,
    reader: BufReader<File>,
    format: ImageFormat,
}

impl ImageHandle {
    /// Open `path` and detect its format from content.
    pub fn open(path: &Path) -> InspectResult<Self> {
        let file = File::open(path).map_err(|e| InspectError::from_io(path, e))?;
        let mut reader = BufReader::new(file);

        let format = ImageReader::new(&mut reader)
            .with_guessed_format()
            .map_err(|e| InspectError::from_io(path, e))?
            .format()
            .ok_or_else(|| {
                InspectError::inspection(
                    path,
                    format!("cannot identify image file '{}'", path.display()),
                )
            })?;

        tracing::debug!("Opened {:?} as {:?}", path, format);

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            format,
        })
    }

    /// Detected container format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rewind(&mut self) -> InspectResult<()> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map(|_| ())
            .map_err(|e| InspectError::from_io(&self.path, e))
    }
}

impl ImageMetadata for ImageHandle {
    fn color_mode(&mut self) -> InspectResult<ColorMode> {
        self.rewind()?;
        let decoder = ImageReader::with_format(&mut self.reader, self.format)
            .into_decoder()
            .map_err(|e| InspectError::inspection(&self.path, e.to_string()))?;
        let color = decoder.original_color_type();
        tracing::debug!("Stored color type: {:?}", color);
        Ok(ColorMode::from(color))
    }

    fn bit_depth_info(&mut self) -> InspectResult<Option<RawBits>> {
        let recorded = if self.format == ImageFormat::Png {
            let sbit = bits::png_significant_bits(&mut self.reader)
                .map_err(|e| InspectError::from_io(&self.path, e))?;
            if sbit.is_some() {
                tracing::debug!("Bit depth from PNG sBIT chunk: {:?}", sbit);
            }
            sbit
        } else {
            None
        };

        let recorded = match recorded {
            Some(values) => Some(values),
            None => {
                let bps = bits::exif_bits_per_sample(&mut self.reader);
                if bps.is_some() {
                    tracing::debug!("Bit depth from BitsPerSample tag: {:?}", bps);
                }
                bps
            }
        };

        Ok(recorded.and_then(RawBits::new))
    }
}
