//! # Color Census
//!
//! A Rust crate for extracting perceptual color information from a sample of
//! image pixels.
//!
//! This library provides:
//! - sRGB to CIE L*a*b* (D65) conversion
//! - CIE76, CIE94 and CIEDE2000 color differences
//! - Classification of every sample against a named reference palette
//! - Deterministic k-means extraction of dominant colors
//! - A stable percentage export of the classification
//!
//! ## Example
//!
//! ```rust,no_run
//! use color_census::{analyze_image, AnalysisConfig, ReferencePalette};
//! use std::path::Path;
//!
//! let palette = ReferencePalette::builtin();
//! let report = analyze_image(Path::new("photo.jpg"), &palette, &AnalysisConfig::default())?;
//! println!("{}", report.export().to_json_pretty()?);
//! println!("Dominant: {:?}", report.dominant_hex());
//! # Ok::<(), color_census::AnalysisError>(())
//! ```

use std::path::Path;

pub mod clustering;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod reference;
pub mod sampling;

pub use clustering::KMeansClusterer;
pub use color::{
    cie76, cie94, ciede2000, rgb_to_lab, AnalysisReport, ColorAnalyzer, ColorConverter, DistanceFormula, LabColor,
    MatchTally, PaletteMatcher, Rgb,
};
pub use config::{AnalysisConfig, SamplingConfig};
pub use error::{AnalysisError, Result};
pub use export::PercentageExport;
pub use reference::{PaletteEntry, ReferencePalette};

/// Analyze a snapshot of RGB samples
///
/// # Errors
///
/// Returns `AnalysisError` if the configuration is invalid. Empty samples are
/// not an error and produce an empty report.
pub fn analyze_samples(
    samples: &[Rgb],
    palette: &ReferencePalette,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    let analyzer = ColorAnalyzer::new(config.clone())?;
    Ok(analyzer.analyze(palette, samples))
}

/// Load, sample and analyze an image file
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - The configuration is invalid
/// - The image cannot be opened or decoded
pub fn analyze_image(
    image_path: &Path,
    palette: &ReferencePalette,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    let analyzer = ColorAnalyzer::new(config.clone())?;
    let samples = sampling::load_samples(image_path, &config.sampling)?;
    Ok(analyzer.analyze(palette, &samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_samples_rejects_bad_config() {
        let config = AnalysisConfig {
            iterations: 0,
            ..AnalysisConfig::default()
        };
        let result = analyze_samples(&[], &ReferencePalette::builtin(), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_samples_builtin_palette() {
        let samples = vec![Rgb::new(0, 0, 130); 10];
        let report =
            analyze_samples(&samples, &ReferencePalette::builtin(), &AnalysisConfig::default())
                .unwrap();

        assert_eq!(report.tally.get("Navy"), 10);
        assert_eq!(report.export().get("Navy"), Some("100.0"));
        assert_eq!(report.dominant_colors.len(), 5);
    }
}
