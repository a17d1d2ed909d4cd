//! Color conversion, difference and classification module
//!
//! This module handles sRGB to Lab conversion, the Delta E formulas,
//! nearest-palette matching and the combined analysis pass.

pub mod analysis;
pub mod conversion;
pub mod delta_e;
pub mod matcher;

pub use analysis::{AnalysisReport, ColorAnalyzer};
pub use conversion::{rgb_to_lab, ColorConverter, LabColor, Rgb};
pub use delta_e::{cie76, cie94, ciede2000, DistanceFormula};
pub use matcher::{MatchTally, PaletteMatcher};
