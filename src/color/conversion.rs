//! Color space conversion utilities
//!
//! Provides the conversions the matcher and the palette need:
//! - sRGB (0-255) to CIE L*a*b* under D65
//! - Hex display strings to and from sRGB
//!
//! The sRGB→Lab path is the standard one: inverse sRGB companding, the
//! sRGB→XYZ (D65) matrix, normalization by the D65 white point and the CIE
//! piecewise cube root. All arithmetic is done in `f64`.

use palette::{white_point::D65, FromColor, Lab, Srgb};

use crate::{AnalysisError, Result};

/// 8-bit sRGB sample or centroid
pub type Rgb = Srgb<u8>;

/// CIE L*a*b* color under D65, double precision
pub type LabColor = Lab<D65, f64>;

/// Convert an 8-bit sRGB triple to CIE Lab (D65).
///
/// Total and pure: every input maps to a valid Lab value, and the same input
/// always maps to the same output.
pub fn rgb_to_lab(rgb: Rgb) -> LabColor {
    LabColor::from_color(rgb.into_format::<f64>())
}

/// Color converter bound to the D65 reference white
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a new color converter with D65 as reference white
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to Lab color space
    ///
    /// # Arguments
    ///
    /// * `r`, `g`, `b` - RGB values in range [0, 255]
    ///
    /// # Returns
    ///
    /// Lab color in D65 illuminant
    pub fn rgb_to_lab(&self, r: u8, g: u8, b: u8) -> LabColor {
        rgb_to_lab(Rgb::new(r, g, b))
    }

    /// Convert a batch of samples, preserving order
    pub fn samples_to_lab(&self, samples: &[Rgb]) -> Vec<LabColor> {
        samples.iter().map(|&rgb| rgb_to_lab(rgb)).collect()
    }

    /// Convert sRGB to hexadecimal color string
    ///
    /// # Returns
    ///
    /// Uppercase hex color string (e.g., "#FF0000")
    pub fn rgb_to_hex(&self, rgb: Rgb) -> String {
        format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
    }

    /// Parse hexadecimal color string to sRGB
    ///
    /// Accepts `#RRGGBB`, `RRGGBB` and the `#RGB` shorthand.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHexColor` if the string has the wrong length or
    /// contains non-hex characters
    pub fn hex_to_rgb(&self, hex: &str) -> Result<Rgb> {
        let digits = hex.trim().trim_start_matches('#');

        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            len => {
                return Err(AnalysisError::InvalidHexColor {
                    value: hex.to_string(),
                    reason: format!("expected 3 or 6 hex digits, got {}", len),
                })
            }
        };

        let channel = |range: std::ops::Range<usize>, label: &str| -> Result<u8> {
            let part = expanded.get(range).ok_or_else(|| AnalysisError::InvalidHexColor {
                value: hex.to_string(),
                reason: "non-ASCII characters".to_string(),
            })?;
            u8::from_str_radix(part, 16).map_err(|e| AnalysisError::InvalidHexColor {
                value: hex.to_string(),
                reason: format!("invalid {} value: {}", label, e),
            })
        };

        Ok(Rgb::new(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Chroma, the magnitude of the (a, b) vector
    pub fn chroma(&self, lab: LabColor) -> f64 {
        lab.a.hypot(lab.b)
    }
}
