//! Core data types for image inspection.
//!
//! These are read-only snapshots taken from an open image: its color mode,
//! the raw per-channel bit metadata (if the container carries any), and the
//! validated pairing of the two.

use image::ExtendedColorType;
use std::fmt;

/// Channel layout of an image, named the way imaging tools conventionally
/// name modes ("L", "RGB", "RGBA", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// 1-bit black and white
    Bilevel,
    /// 8-bit (or lower) grayscale
    L,
    /// Grayscale with alpha
    La,
    /// 16-bit grayscale
    I16,
    Rgb,
    Rgba,
    Cmyk,
    /// Anything the decoder reports that has no conventional mode name
    Other { name: String, channels: u8 },
}

impl ColorMode {
    /// Short mode name as printed in the report.
    pub fn name(&self) -> &str {
        match self {
            Self::Bilevel => "1",
            Self::L => "L",
            Self::La => "LA",
            Self::I16 => "I;16",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
            Self::Cmyk => "CMYK",
            Self::Other { name, .. } => name,
        }
    }

    /// Channel names in storage order. Empty for `Other`.
    pub fn channels(&self) -> &'static [&'static str] {
        match self {
            Self::Bilevel => &["1"],
            Self::L => &["L"],
            Self::La => &["L", "A"],
            Self::I16 => &["I"],
            Self::Rgb => &["R", "G", "B"],
            Self::Rgba => &["R", "G", "B", "A"],
            Self::Cmyk => &["C", "M", "Y", "K"],
            Self::Other { .. } => &[],
        }
    }

    /// Number of channels implied by the mode.
    pub fn channel_count(&self) -> usize {
        match self {
            Self::Other { channels, .. } => *channels as usize,
            _ => self.channels().len(),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ExtendedColorType> for ColorMode {
    fn from(color: ExtendedColorType) -> Self {
        use ExtendedColorType as C;
        match color {
            C::L1 => Self::Bilevel,
            C::L2 | C::L4 | C::L8 => Self::L,
            C::La1 | C::La2 | C::La4 | C::La8 | C::La16 => Self::La,
            C::L16 => Self::I16,
            C::Rgb1 | C::Rgb2 | C::Rgb4 | C::Rgb8 | C::Rgb16 | C::Rgb32F | C::Bgr8 => Self::Rgb,
            C::Rgba1
            | C::Rgba2
            | C::Rgba4
            | C::Rgba8
            | C::Rgba16
            | C::Rgba32F
            | C::Bgra8 => Self::Rgba,
            C::Cmyk8 => Self::Cmyk,
            other => Self::Other {
                name: format!("{:?}", other),
                channels: other.channel_count(),
            },
        }
    }
}

/// Per-channel bit counts exactly as a container recorded them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBits(pub Vec<u16>);

impl RawBits {
    /// Wrap recorded values. An empty record or a bare zero counts as
    /// absent; a multi-channel record is kept even when every entry is zero.
    pub fn new(values: Vec<u16>) -> Option<Self> {
        match values.as_slice() {
            [] | [0] => None,
            _ => Some(Self(values)),
        }
    }

    pub fn values(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RawBits {
    /// A single value prints bare; several print as `(8, 8, 8)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            values => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", joined.join(", "))
            }
        }
    }
}

/// Outcome of checking raw bit metadata against the color mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitDepth {
    /// One entry per channel, in channel order
    Matched(Vec<u16>),
    /// Present but not pairable with the mode's channels
    Mismatched(RawBits),
    /// The container exposes no bit metadata
    Absent,
}

impl BitDepth {
    /// Validate `bits` against the channel count of `mode`.
    pub fn classify(bits: Option<RawBits>, mode: &ColorMode) -> Self {
        match bits {
            None => Self::Absent,
            Some(raw) if raw.len() == mode.channel_count() => Self::Matched(raw.0),
            Some(raw) => Self::Mismatched(raw),
        }
    }

    /// Human-readable bit depth conclusion for `mode`.
    pub fn label(&self, mode: &ColorMode) -> String {
        match self {
            Self::Matched(values) => {
                let digits: String = values.iter().map(|v| v.to_string()).collect();
                format!("{}{}", mode.name(), digits)
            }
            Self::Mismatched(raw) => {
                format!("{} bits per channel (or an unknown format)", raw)
            }
            Self::Absent => standard_depth(mode).to_string(),
        }
    }
}

/// Assumed depth for common modes when the container records none.
fn standard_depth(mode: &ColorMode) -> &'static str {
    match mode {
        ColorMode::Rgba => "RGBA8888 (Standard)",
        ColorMode::Rgb => "RGB888 (Standard)",
        ColorMode::L => "8-bit Grayscale (L8)",
        _ => "Format details are not explicitly available.",
    }
}
