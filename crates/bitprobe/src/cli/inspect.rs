//! The `bitprobe inspect` command: report one image's mode and bit depth.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bitprobe_core::{error_line, Config};
use clap::Args;

/// Arguments for the `inspect` command.
#[derive(Args, Debug, Default)]
pub struct InspectArgs {
    /// Image file to inspect [default: inspect.default_path from config]
    #[arg(env = "BITPROBE_PATH")]
    pub path: Option<PathBuf>,

    /// Exit with a nonzero status when inspection fails
    #[arg(long)]
    pub strict: bool,
}

/// Execute the inspect command.
///
/// Inspection failures are printed, not propagated. The exit status stays
/// successful unless strict mode is on.
pub fn execute(args: InspectArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let path = match args.path {
        Some(path) => expand(&path),
        None => config.default_image_path(),
    };
    let strict = args.strict || config.inspect.strict_exit;

    let mut stdout = std::io::stdout().lock();
    let inspected = run(&path, &mut stdout)?;
    stdout.flush()?;

    if inspected || !strict {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Inspect `path` and write the report (or the single error line) to `out`.
///
/// Returns whether inspection succeeded.
pub fn run<W: Write>(path: &Path, out: &mut W) -> std::io::Result<bool> {
    match bitprobe_core::inspect(path) {
        Ok(report) => {
            writeln!(out, "{}", report)?;
            Ok(true)
        }
        Err(e) => {
            tracing::debug!("Inspection of {:?} failed: {:?}", e.path(), e);
            writeln!(out, "{}", error_line(&e))?;
            Ok(false)
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(path: &Path) -> (bool, String) {
        let mut out = Vec::new();
        let ok = run(path, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_rgba_without_bits_matches_example() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title_background.png");
        image::RgbaImage::new(8, 8).save(&path).unwrap();

        let (ok, text) = run_to_string(&path);
        assert!(ok);
        let expected = format!(
            "File: {}\nPillow Mode: RGBA\nImage Bit Depth: RGBA8888 (Standard)\n",
            path.display()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_rgb_and_gray_standard_depths() {
        let dir = tempfile::tempdir().unwrap();

        let rgb = dir.path().join("rgb.png");
        image::RgbImage::new(2, 2).save(&rgb).unwrap();
        let (_, text) = run_to_string(&rgb);
        assert_eq!(text.lines().nth(2), Some("Image Bit Depth: RGB888 (Standard)"));

        let gray = dir.path().join("gray.png");
        image::GrayImage::new(2, 2).save(&gray).unwrap();
        let (_, text) = run_to_string(&gray);
        assert_eq!(text.lines().nth(1), Some("Pillow Mode: L"));
        assert_eq!(
            text.lines().nth(2),
            Some("Image Bit Depth: 8-bit Grayscale (L8)")
        );
    }

    #[test]
    fn test_missing_file_prints_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");

        let (ok, text) = run_to_string(&path);
        assert!(!ok);
        assert_eq!(
            text,
            format!("Error: The file '{}' was not found.\n", path.display())
        );
    }

    #[test]
    fn test_non_image_prints_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readme.png");
        std::fs::write(&path, "plain text pretending to be a png").unwrap();

        let (ok, text) = run_to_string(&path);
        assert!(!ok);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("An error occurred: "));
        assert!(text.contains("cannot identify image file"));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("same.png");
        image::RgbaImage::new(3, 3).save(&path).unwrap();

        let (_, first) = run_to_string(&path);
        let (_, second) = run_to_string(&path);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strict_exit_only_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();

        let missing = InspectArgs {
            path: Some(dir.path().join("missing.png")),
            strict: true,
        };
        let code = execute(missing, &config).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));

        let lenient = InspectArgs {
            path: Some(dir.path().join("missing.png")),
            strict: false,
        };
        let code = execute(lenient, &config).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));
    }

    #[test]
    fn test_tiff_reports_recorded_depth() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.tif");
        image::RgbImage::new(2, 2).save(&path).unwrap();

        let (ok, text) = run_to_string(&path);
        assert!(ok);
        assert_eq!(text.lines().nth(1), Some("Pillow Mode: RGB"));
        assert_eq!(text.lines().nth(2), Some("Image Bit Depth: RGB888"));
    }
}
