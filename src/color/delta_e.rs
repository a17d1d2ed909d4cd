//! Color difference formulas (Delta E)
//!
//! Three interchangeable distances over two Lab colors:
//! - [`cie76`]: Euclidean distance in Lab
//! - [`cie94`]: graphic-arts weighted distance
//! - [`ciede2000`]: CIE Technical Report 142-2001, with the lightness, chroma
//!   and hue weights, the neutral-axis G correction and the blue rotation term
//!
//! CIE94 and CIEDE2000 are not symmetric in general. Throughout this crate the
//! first argument is the sample and the second the reference swatch.
//!
//! Angles are kept in degrees and converted with `to_radians()` right at each
//! trig call.

#![allow(clippy::many_single_char_names)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::LabColor;
use crate::constants::delta_e::{CIE94_K1, CIE94_K2, K_C, K_H, K_L, POW25_7};
use crate::AnalysisError;

/// Selects which Delta E function an analysis pass uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceFormula {
    /// Euclidean distance in Lab (ΔE*ab)
    #[serde(rename = "CIE76")]
    Cie76,
    /// Weighted distance with graphic-arts constants (ΔE*94)
    #[serde(rename = "CIE94")]
    Cie94,
    /// CIEDE2000 (ΔE00)
    #[default]
    #[serde(rename = "CIEDE2000")]
    Ciede2000,
}

impl DistanceFormula {
    /// All formulas, cheapest first
    pub const ALL: [DistanceFormula; 3] = [
        DistanceFormula::Cie76,
        DistanceFormula::Cie94,
        DistanceFormula::Ciede2000,
    ];

    /// Distance between a sample and a reference color under this formula
    #[inline]
    pub fn distance(self, sample: LabColor, reference: LabColor) -> f64 {
        match self {
            DistanceFormula::Cie76 => cie76(sample, reference),
            DistanceFormula::Cie94 => cie94(sample, reference),
            DistanceFormula::Ciede2000 => ciede2000(sample, reference),
        }
    }

    /// Canonical name, as used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            DistanceFormula::Cie76 => "CIE76",
            DistanceFormula::Cie94 => "CIE94",
            DistanceFormula::Ciede2000 => "CIEDE2000",
        }
    }
}

impl fmt::Display for DistanceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceFormula {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CIE76" | "DE76" => Ok(DistanceFormula::Cie76),
            "CIE94" | "DE94" => Ok(DistanceFormula::Cie94),
            "CIEDE2000" | "DE2000" | "DE00" => Ok(DistanceFormula::Ciede2000),
            _ => Err(AnalysisError::invalid_parameter("formula", s)),
        }
    }
}

/// CIE76: plain Euclidean distance in Lab.
pub fn cie76(sample: LabColor, reference: LabColor) -> f64 {
    let dl = sample.l - reference.l;
    let da = sample.a - reference.a;
    let db = sample.b - reference.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIE94 with graphic-arts weights (K1 = 0.045, K2 = 0.015, kL = kC = kH = 1).
///
/// SC and SH are scaled by the chroma of `sample`.
pub fn cie94(sample: LabColor, reference: LabColor) -> f64 {
    let c1 = sample.a.hypot(sample.b);
    let c2 = reference.a.hypot(reference.b);

    let dl = sample.l - reference.l;
    let da = sample.a - reference.a;
    let db = sample.b - reference.b;
    let dc = c1 - c2;
    // Cancellation can push this slightly below zero
    let dh = (da * da + db * db - dc * dc).max(0.0).sqrt();

    let sl = 1.0;
    let sc = 1.0 + CIE94_K1 * c1;
    let sh = 1.0 + CIE94_K2 * c1;

    let l_term = dl / (K_L * sl);
    let c_term = dc / (K_C * sc);
    let h_term = dh / (K_H * sh);
    (l_term * l_term + c_term * c_term + h_term * h_term).sqrt()
}

/// CIEDE2000 color difference (ΔE00).
pub fn ciede2000(sample: LabColor, reference: LabColor) -> f64 {
    let (l1, a1, b1) = (sample.l, sample.a, sample.b);
    let (l2, a2, b2) = (reference.l, reference.a, reference.b);

    // Neutral-axis correction from the mean of the uncorrected chromas
    let c_ab_mean = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let g = 0.5 * (1.0 - chroma_pivot(c_ab_mean));

    let a1_prime = a1 * (1.0 + g);
    let a2_prime = a2 * (1.0 + g);

    let c1_prime = a1_prime.hypot(b1);
    let c2_prime = a2_prime.hypot(b2);
    let h1_prime = hue_angle(a1_prime, b1);
    let h2_prime = hue_angle(a2_prime, b2);

    let delta_l_prime = l2 - l1;
    let delta_c_prime = c2_prime - c1_prime;

    let achromatic = c1_prime * c2_prime == 0.0;

    // Signed hue difference in (-180, 180]
    let delta_h_prime = if achromatic {
        0.0
    } else {
        let diff = h2_prime - h1_prime;
        if diff > 180.0 {
            diff - 360.0
        } else if diff <= -180.0 {
            diff + 360.0
        } else {
            diff
        }
    };
    let delta_big_h_prime =
        2.0 * (c1_prime * c2_prime).max(0.0).sqrt() * (delta_h_prime / 2.0).to_radians().sin();

    let l_prime_mean = (l1 + l2) / 2.0;
    let c_prime_mean = (c1_prime + c2_prime) / 2.0;
    let h_prime_mean = if achromatic {
        h1_prime + h2_prime
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        (h1_prime + h2_prime) / 2.0
    } else if h1_prime + h2_prime < 360.0 {
        (h1_prime + h2_prime + 360.0) / 2.0
    } else {
        (h1_prime + h2_prime - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_prime_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_prime_mean).to_radians().cos()
        + 0.32 * (3.0 * h_prime_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_prime_mean - 63.0).to_radians().cos();

    let l_offset_sq = (l_prime_mean - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let sc = 1.0 + 0.045 * c_prime_mean;
    let sh = 1.0 + 0.015 * c_prime_mean * t;

    let delta_theta = 30.0 * (-((h_prime_mean - 275.0) / 25.0).powi(2)).exp();
    let rc = 2.0 * chroma_pivot(c_prime_mean);
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let l_term = delta_l_prime / (K_L * sl);
    let c_term = delta_c_prime / (K_C * sc);
    let h_term = delta_big_h_prime / (K_H * sh);

    (l_term * l_term + c_term * c_term + h_term * h_term + rt * c_term * h_term)
        .max(0.0)
        .sqrt()
}

/// sqrt(C^7 / (C^7 + 25^7)), shared by the G factor and the rotation term
#[inline]
fn chroma_pivot(chroma: f64) -> f64 {
    let c7 = chroma.powi(7);
    (c7 / (c7 + POW25_7)).max(0.0).sqrt()
}

/// Hue angle in degrees within [0, 360); 0 at the origin
#[inline]
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::color_difference::Ciede2000;

    fn lab(l: f64, a: f64, b: f64) -> LabColor {
        LabColor::new(l, a, b)
    }

    const COLORS: [(f64, f64, f64); 6] = [
        (50.0, 0.0, 0.0),
        (0.0, 0.0, 0.0),
        (100.0, 0.0, 0.0),
        (53.24, 80.09, 67.20),
        (32.30, 79.19, -107.86),
        (71.5, -12.25, 3.8),
    ];

    #[test]
    fn test_identity_is_zero_for_every_formula() {
        for (l, a, b) in COLORS {
            let c = lab(l, a, b);
            for formula in DistanceFormula::ALL {
                assert_eq!(formula.distance(c, c), 0.0, "{} on {:?}", formula, (l, a, b));
            }
        }
    }

    #[test]
    fn test_cie76_symmetric() {
        for (l1, a1, b1) in COLORS {
            for (l2, a2, b2) in COLORS {
                let x = lab(l1, a1, b1);
                let y = lab(l2, a2, b2);
                assert_eq!(cie76(x, y), cie76(y, x));
            }
        }
    }

    #[test]
    fn test_cie76_known_value() {
        let d = cie76(lab(50.0, 0.0, 0.0), lab(53.0, 4.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_cie94_lightness_only() {
        // Pure lightness difference is unweighted (SL = 1)
        let d = cie94(lab(40.0, 20.0, 20.0), lab(47.0, 20.0, 20.0));
        assert!((d - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_cie94_chroma_weighting_uses_sample() {
        let sample = lab(50.0, 40.0, 0.0);
        let reference = lab(50.0, 30.0, 0.0);

        // ΔC = 10, SC = 1 + 0.045 * 40 = 2.8, ΔH = 0
        let d = cie94(sample, reference);
        assert!((d - 10.0 / 2.8).abs() < 1e-9);

        // Swapping roles changes the weight
        let swapped = cie94(reference, sample);
        assert!((swapped - 10.0 / 2.35).abs() < 1e-9);
    }

    #[test]
    fn test_cie94_non_negative_under_cancellation() {
        let d = cie94(lab(50.0, 1e-9, 1e-9), lab(50.0, 0.0, 0.0));
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    // Reference pairs from Sharma, Wu & Dalal (2005)
    const SHARMA_PAIRS: [((f64, f64, f64), (f64, f64, f64), f64); 8] = [
        ((50.0, 2.6772, -79.7751), (50.0, 0.0, -82.7485), 2.0425),
        ((50.0, 3.1571, -77.2803), (50.0, 0.0, -82.7485), 2.8615),
        ((50.0, 2.8361, -74.0200), (50.0, 0.0, -82.7485), 3.4412),
        ((50.0, -1.3802, -84.2814), (50.0, 0.0, -82.7485), 1.0000),
        ((50.0, 0.0, 0.0), (50.0, -1.0, 2.0), 2.3669),
        ((50.0, -1.0, 2.0), (50.0, 0.0, 0.0), 2.3669),
        ((50.0, 2.4900, -0.0010), (50.0, -2.4900, 0.0009), 7.1792),
        ((50.0, 2.4900, -0.0010), (50.0, -2.4900, 0.0011), 7.2195),
    ];

    #[test]
    fn test_ciede2000_reference_pairs() {
        for ((l1, a1, b1), (l2, a2, b2), expected) in SHARMA_PAIRS {
            let d = ciede2000(lab(l1, a1, b1), lab(l2, a2, b2));
            assert!(
                (d - expected).abs() < 1e-4,
                "ΔE00({:?}, {:?}) = {}, expected {}",
                (l1, a1, b1),
                (l2, a2, b2),
                d,
                expected
            );
        }
    }

    #[test]
    fn test_ciede2000_matches_palette_crate() {
        for (l1, a1, b1) in COLORS {
            for (l2, a2, b2) in COLORS {
                let x = lab(l1, a1, b1);
                let y = lab(l2, a2, b2);
                let ours = ciede2000(x, y);
                let theirs = x.difference(y);
                assert!((ours - theirs).abs() < 1e-6, "{} vs {}", ours, theirs);
            }
        }
    }

    #[test]
    fn test_ciede2000_neutral_axis_has_no_hue_term() {
        // Two grays differing only in lightness
        let d = ciede2000(lab(40.0, 0.0, 0.0), lab(60.0, 0.0, 0.0));
        let sl = 1.0 + 0.015 * 0.0 / 20f64.sqrt();
        assert!((d - 20.0 / sl).abs() < 1e-9);
    }

    #[test]
    fn test_hue_angle_origin_is_zero() {
        assert_eq!(hue_angle(0.0, 0.0), 0.0);
        assert!((hue_angle(0.0, -1.0) - 270.0).abs() < 1e-12);
        assert!((hue_angle(-1.0, 0.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_formula_parse_and_display() {
        assert_eq!("cie76".parse::<DistanceFormula>().unwrap(), DistanceFormula::Cie76);
        assert_eq!("DE94".parse::<DistanceFormula>().unwrap(), DistanceFormula::Cie94);
        assert_eq!(" CIEDE2000 ".parse::<DistanceFormula>().unwrap(), DistanceFormula::Ciede2000);
        assert!("cmc".parse::<DistanceFormula>().is_err());

        for formula in DistanceFormula::ALL {
            assert_eq!(formula.to_string().parse::<DistanceFormula>().unwrap(), formula);
        }
    }

    #[test]
    fn test_formula_serde_names() {
        let json = serde_json::to_string(&DistanceFormula::Ciede2000).unwrap();
        assert_eq!(json, "\"CIEDE2000\"");
        let parsed: DistanceFormula = serde_json::from_str("\"CIE94\"").unwrap();
        assert_eq!(parsed, DistanceFormula::Cie94);
        assert_eq!(DistanceFormula::default(), DistanceFormula::Ciede2000);
    }
}
