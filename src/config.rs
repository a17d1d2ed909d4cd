//! Configuration structures for a color census pass.
//!
//! All tunable parameters live here, grouped into the analysis settings and
//! the sampling settings used at the image boundary.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use color_census::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("census.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), color_census::AnalysisError>(())
//! ```
//!
//! Missing fields fall back to their defaults, so `{"formula": "CIE94"}` is a
//! complete configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::DistanceFormula;
use crate::constants::defaults;
use crate::{AnalysisError, Result};

/// Complete configuration for one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Distance formula applied to every sample in the pass
    pub formula: DistanceFormula,

    /// Number of dominant colors to extract
    pub cluster_count: usize,

    /// Fixed number of k-means iterations (must be at least 1)
    pub iterations: usize,

    /// Image sampling configuration
    pub sampling: SamplingConfig,
}

/// Decimated sampling parameters.
///
/// The image is resized to a `resize_dimension` square and every
/// `pixel_stride`-th pixel is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Side length of the square thumbnail
    pub resize_dimension: u32,

    /// Keep every Nth pixel in row-major order
    pub pixel_stride: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            formula: DistanceFormula::default(),
            cluster_count: defaults::CLUSTER_COUNT,
            iterations: defaults::ITERATIONS,
            sampling: SamplingConfig::default(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            resize_dimension: defaults::RESIZE_DIMENSION,
            pixel_stride: defaults::PIXEL_STRIDE,
        }
    }
}

impl SamplingConfig {
    /// Number of samples one image yields
    pub fn expected_samples(&self) -> usize {
        let pixels = self.resize_dimension as usize * self.resize_dimension as usize;
        pixels.div_ceil(self.pixel_stride.max(1))
    }

    /// Check that sampling would produce any pixels
    pub fn validate(&self) -> Result<()> {
        if self.resize_dimension == 0 {
            return Err(AnalysisError::invalid_parameter(
                "sampling.resize_dimension",
                self.resize_dimension,
            ));
        }
        if self.pixel_stride == 0 {
            return Err(AnalysisError::invalid_parameter(
                "sampling.pixel_stride",
                self.pixel_stride,
            ));
        }
        Ok(())
    }
}

impl AnalysisConfig {
    /// Configuration with a given formula and default everything else
    pub fn with_formula(formula: DistanceFormula) -> Self {
        Self {
            formula,
            ..Self::default()
        }
    }

    /// Reject settings that cannot produce a meaningful pass.
    ///
    /// A `cluster_count` of zero is allowed and yields no dominant colors.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(AnalysisError::invalid_parameter("iterations", self.iterations));
        }
        self.sampling.validate()
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::config("Invalid configuration JSON", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read config file: {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write config file: {}", path.display()), e)
        })
    }
}
