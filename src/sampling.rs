//! Decimated pixel sampling at the image boundary
//!
//! Decoding goes through the `image` crate. The decoded image is resized to a
//! small square thumbnail and every Nth pixel (row-major) is kept, which with
//! the defaults yields 1600 samples per image. Alpha is ignored.
//!
//! The returned vectors are owned snapshots, so callers can hand them to an
//! analysis pass while loading the next image.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage, ImageReader};
use tracing::debug;

use crate::color::Rgb;
use crate::config::SamplingConfig;
use crate::{AnalysisError, Result};

/// Sample an already decoded image
pub fn sample_image(image: &DynamicImage, config: &SamplingConfig) -> Vec<Rgb> {
    let side = config.resize_dimension.max(1);
    let stride = config.pixel_stride.max(1);

    let thumbnail = image.resize_exact(side, side, FilterType::Triangle).to_rgb8();
    let samples = sample_rgb_buffer(thumbnail.as_raw(), stride);

    debug!(
        width = image.width(),
        height = image.height(),
        samples = samples.len(),
        "sampled image"
    );
    samples
}

/// Keep every `stride`-th pixel of an interleaved RGB8 buffer.
///
/// Trailing bytes that do not form a whole pixel are ignored.
pub fn sample_rgb_buffer(raw: &[u8], stride: usize) -> Vec<Rgb> {
    raw.chunks_exact(3)
        .step_by(stride.max(1))
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect()
}

/// Keep every `stride`-th pixel of an interleaved RGBA8 buffer, dropping alpha
pub fn sample_rgba_buffer(raw: &[u8], stride: usize) -> Vec<Rgb> {
    raw.chunks_exact(4)
        .step_by(stride.max(1))
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect()
}

/// Open, decode and sample an image file
///
/// # Errors
///
/// Returns `ImageLoadError` if the file cannot be opened or decoded, and
/// `InvalidParameter` for a sampling configuration that selects no pixels
pub fn load_samples(path: &Path, config: &SamplingConfig) -> Result<Vec<Rgb>> {
    config.validate()?;

    let reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;
    let reader = reader.with_guessed_format().map_err(|e| {
        AnalysisError::image_load(format!("Failed to detect image format: {}", path.display()), e)
    })?;
    let image = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(sample_image(&image, config))
}

/// Check whether a file extension names a format the decoder supports
pub fn is_supported_extension(ext: &str) -> bool {
    image::ImageFormat::from_extension(ext)
        .map(|format| format.reading_enabled())
        .unwrap_or(false)
}
