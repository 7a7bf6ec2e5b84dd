//! photo-meta - Read image dimensions and EXIF metadata from files.
//!
//! This binary wraps the library for use from scripts and sync jobs.

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_meta::{
    calculate_thumbnail_size,
    config::{Cli, Command, InspectConfig, OutputFormat, ThumbnailConfig},
    detect_format, dimensions_for_format, inspect, is_supported_image_extension,
    try_probe_dimensions, ExifRecord, ImageInfo,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Inspect(config) => run_inspect(config),
        Command::Thumbnail(config) => run_thumbnail(config),
    }
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "photo_meta=debug"
    } else {
        "photo_meta=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Inspect Command
// =============================================================================

fn run_inspect(config: InspectConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut failures = 0usize;

    for path in &config.files {
        if !is_supported_image_extension(&path.to_string_lossy()) {
            warn!("{}: unexpected file extension, probing anyway", path.display());
        }

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };
        debug!(path = %path.display(), bytes = data.len(), "read file");

        let info = if config.dimensions_only {
            let format = detect_format(&data);
            ImageInfo {
                format,
                dimensions: dimensions_for_format(&data, format).ok(),
                exif: None,
            }
        } else {
            inspect(&data)
        };

        if let Err(e) = print_info(path, &info, config.output) {
            error!("Failed to write output for {}: {}", path.display(), e);
            failures += 1;
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_info(path: &Path, info: &ImageInfo, output: OutputFormat) -> Result<(), serde_json::Error> {
    match output {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(info)?;
            value["file"] = serde_json::Value::String(path.display().to_string());
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Pretty => {
            let mut value = serde_json::to_value(info)?;
            value["file"] = serde_json::Value::String(path.display().to_string());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => print_text(path, info),
    }
    Ok(())
}

fn print_text(path: &Path, info: &ImageInfo) {
    println!("{}", path.display());
    println!("  Format:      {}", info.format);
    if let Some(size) = info.dimensions {
        println!("  Dimensions:  {}x{}", size.width, size.height);
    }
    if let Some(ref exif) = info.exif {
        print_exif_text(exif);
    }
}

fn print_exif_text(exif: &ExifRecord) {
    if let Some(ref camera) = exif.camera {
        println!("  Camera:      {}", camera);
    }
    if let Some(ref lens) = exif.lens {
        println!("  Lens:        {}", lens);
    }
    if let Some(ref date) = exif.date_taken {
        println!("  Taken:       {}", date);
    }
    if let Some(ref settings) = exif.settings {
        let parts: Vec<String> = [
            settings.focal_length.clone(),
            settings.aperture.clone(),
            settings.shutter_speed.clone(),
            settings.iso.map(|iso| format!("ISO {}", iso)),
        ]
        .into_iter()
        .flatten()
        .collect();
        println!("  Settings:    {}", parts.join("  "));
    }
    if let Some(gps) = exif.gps {
        match gps.altitude {
            Some(alt) => println!(
                "  GPS:         {:.6}, {:.6} ({:.1} m)",
                gps.latitude, gps.longitude, alt
            ),
            None => println!("  GPS:         {:.6}, {:.6}", gps.latitude, gps.longitude),
        }
    }
    if let Some(size) = exif.dimensions {
        println!("  EXIF size:   {}x{}", size.width, size.height);
    }
}

// =============================================================================
// Thumbnail Command
// =============================================================================

fn run_thumbnail(config: ThumbnailConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let data = match std::fs::read(&config.file) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let original = match try_probe_dimensions(&data) {
        Ok(size) => size,
        Err(e) => {
            error!("Cannot size {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let size = calculate_thumbnail_size(original, config.width, config.height, config.fit);
    debug!(
        original_width = original.width,
        original_height = original.height,
        fit = ?config.fit,
        "computed thumbnail size"
    );
    println!("{}x{}", size.width, size.height);

    ExitCode::SUCCESS
}
