//! bitprobe core - report an image's color mode and per-channel bit depth.
//!
//! Opens one image, reads only its header, and concludes a bit depth label
//! either from metadata the container records (PNG `sBIT`, TIFF/EXIF
//! `BitsPerSample`) or from the standard depth of its color mode.
//!
//! ```text
//! Path → Open (format sniff) → Color mode → Bit metadata → Classify → Report
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use bitprobe_core::{inspect, report::error_line};
//!
//! match inspect("title_background.png".as_ref()) {
//!     Ok(report) => println!("{report}"),
//!     Err(e) => println!("{}", error_line(&e)),
//! }
//! ```

pub mod bits;
pub mod config;
pub mod error;
pub mod inspect;
pub mod report;
pub mod source;
pub mod types;

pub use config::Config;
pub use error::{BitprobeError, ConfigError, InspectError, InspectResult, Result};
pub use inspect::{inspect, inspect_configured, Inspector};
pub use report::{error_line, InspectionReport};
pub use source::{DecoderSource, ImageHandle, ImageMetadata, ImageSource};
pub use types::{BitDepth, ColorMode, RawBits};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
