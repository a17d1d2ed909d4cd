//! Reference values and default parameters for color analysis
//!
//! This module contains compile-time constants for color conversion and
//! color difference formulas, based on CIE publications.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. It is the only reference white this crate uses.
pub mod d65 {
    /// D65 white point in CIE XYZ color space (2° observer, Y normalized to 1)
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    ///
    /// Conversion itself uses `palette`'s built-in D65; this value is the
    /// published reference it is checked against.
    pub const WHITE_POINT_XYZ: [f64; 3] = [0.95047, 1.00000, 1.08883];
}

/// Color difference (Delta E) constants
pub mod delta_e {
    /// CIE94 graphic arts chroma weight
    pub const CIE94_K1: f64 = 0.045;

    /// CIE94 graphic arts hue weight
    pub const CIE94_K2: f64 = 0.015;

    /// Parametric lightness factor (kL) used by CIE94 and CIEDE2000
    pub const K_L: f64 = 1.0;

    /// Parametric chroma factor (kC)
    pub const K_C: f64 = 1.0;

    /// Parametric hue factor (kH)
    pub const K_H: f64 = 1.0;

    /// 25^7, the chroma pivot of the CIEDE2000 G and RC terms
    pub const POW25_7: f64 = 6_103_515_625.0;
}

/// Default analysis parameters
pub mod defaults {
    /// Number of dominant colors extracted by k-means
    pub const CLUSTER_COUNT: usize = 5;

    /// Fixed number of k-means iterations
    pub const ITERATIONS: usize = 6;

    /// Side length of the square thumbnail pixels are sampled from
    pub const RESIZE_DIMENSION: u32 = 80;

    /// Keep every Nth pixel of the thumbnail
    pub const PIXEL_STRIDE: usize = 4;
}
