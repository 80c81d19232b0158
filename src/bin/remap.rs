//! Palette remapper.
//!
//! Replaces every pixel of a source image with the closest colour found anywhere in a
//! palette image, and reports how many distinct colours both images contain.

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::Logger;
use palettree::{Palette, count_unique_colors, pixels};
use std::path::PathBuf;
use std::time::Instant;

/// Remap an image onto the colours of another image.
#[derive(Parser, Debug)]
#[command(name = "remap")]
#[command(about = "Remaps every pixel of an image to the nearest colour of a palette image")]
struct Args {
    /// Image whose pixels are remapped.
    #[arg(short, long)]
    source: PathBuf,

    /// Image whose distinct colours form the palette.
    #[arg(short, long)]
    palette: PathBuf,

    /// Where to write the remapped image; the format follows the extension.
    #[arg(short, long, default_value = "Image-C.png")]
    output: PathBuf,

    /// Log level, overridden by `RUST_LOG` when set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str(&args.log_level)
        .context("Invalid log specification")?
        .start()
        .context("Failed to start logger")?;

    let source = image::open(&args.source)
        .with_context(|| format!("Failed to read source image: {}", args.source.display()))?
        .to_rgba8();
    let palette_image = image::open(&args.palette)
        .with_context(|| format!("Failed to read palette image: {}", args.palette.display()))?
        .to_rgb8();
    log::info!(
        "Source {}x{}, palette image {}x{}",
        source.width(),
        source.height(),
        palette_image.width(),
        palette_image.height()
    );

    let start = Instant::now();
    let mut output = source.clone();

    // Count the source colours while the palette is built and applied
    let (source_colors, remapped) = rayon::join(
        || count_unique_colors(pixels(source.as_raw(), 4)),
        || -> Result<usize> {
            let palette = Palette::from_bytes(palette_image.as_raw(), 3);
            log::debug!("Palette built after {:?}", start.elapsed());
            palette
                .remap_bytes(&mut output, 4)
                .map(|_| palette.len())
                .context("Palette image has no pixels")
        },
    );
    let palette_colors = remapped?;

    output
        .save(&args.output)
        .with_context(|| format!("Failed to write output image: {}", args.output.display()))?;

    let elapsed = start.elapsed();
    println!("Time: {:.3} s", elapsed.as_secs_f64());
    println!("Palette image: {} colours", palette_colors);
    println!("Source image: {} colours", source_colors);
    println!("Output written to: {}", args.output.display());

    Ok(())
}
