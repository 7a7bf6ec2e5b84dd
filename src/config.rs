//! Command-line configuration for the `photo-meta` binary.
//!
//! Options can be given as flags or through environment variables with the
//! `PHOTO_META_` prefix:
//!
//! - `PHOTO_META_OUTPUT` - Output format for `inspect` (default: json)
//! - `PHOTO_META_THUMB_WIDTH` - Target thumbnail width
//! - `PHOTO_META_THUMB_HEIGHT` - Target thumbnail height
//! - `PHOTO_META_THUMB_FIT` - Thumbnail fit mode (default: cover)
//!
//! `RUST_LOG` overrides the log filter selected by `--verbose`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::thumbnail::Fit;

// =============================================================================
// Default Values
// =============================================================================

/// Largest thumbnail side accepted on the command line.
pub const MAX_THUMBNAIL_SIDE: u32 = 16_384;

// =============================================================================
// CLI Arguments
// =============================================================================

/// photo-meta - Read image dimensions and EXIF metadata.
///
/// Works directly on the encoded bytes: no pixels are decoded.
#[derive(Parser, Debug, Clone)]
#[command(name = "photo-meta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print format, dimensions and EXIF metadata of image files
    Inspect(InspectConfig),

    /// Compute the thumbnail size for an image
    Thumbnail(ThumbnailConfig),
}

/// Output format for `inspect`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Human-readable key/value lines
    Text,
}

// =============================================================================
// Inspect
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct InspectConfig {
    /// Image files to read.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, env = "PHOTO_META_OUTPUT")]
    pub output: OutputFormat,

    /// Only probe container dimensions, skip EXIF.
    #[arg(long, default_value_t = false)]
    pub dimensions_only: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl InspectConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one file is required".to_string());
        }
        if let Some(empty) = self.files.iter().find(|p| p.as_os_str().is_empty()) {
            return Err(format!("Invalid empty file path: {:?}", empty));
        }
        Ok(())
    }
}

// =============================================================================
// Thumbnail
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ThumbnailConfig {
    /// Image file to size.
    pub file: PathBuf,

    /// Target width in pixels.
    #[arg(long, env = "PHOTO_META_THUMB_WIDTH")]
    pub width: Option<u32>,

    /// Target height in pixels.
    #[arg(long, env = "PHOTO_META_THUMB_HEIGHT")]
    pub height: Option<u32>,

    /// How the image is fitted into the target box.
    #[arg(long, value_enum, default_value_t = Fit::Cover, env = "PHOTO_META_THUMB_FIT")]
    pub fit: Fit,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ThumbnailConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.width.is_none() && self.height.is_none() {
            return Err("Set --width, --height, or both".to_string());
        }

        for (name, value) in [("width", self.width), ("height", self.height)] {
            match value {
                Some(0) => return Err(format!("{name} must be greater than 0")),
                Some(v) if v > MAX_THUMBNAIL_SIDE => {
                    return Err(format!("{name} must be at most {MAX_THUMBNAIL_SIDE}"))
                }
                _ => {}
            }
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
