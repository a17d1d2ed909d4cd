//! Full analysis pass over one sample snapshot
//!
//! Runs the two independent pipelines on the same read-only samples:
//! - palette classification (Lab + Delta E) into a match tally
//! - k-means in RGB into dominant colors
//!
//! With the `parallel` feature both pipelines run concurrently.

use serde::Serialize;
use tracing::debug;

use crate::clustering::KMeansClusterer;
use crate::color::{ColorConverter, DistanceFormula, MatchTally, PaletteMatcher, Rgb};
use crate::config::AnalysisConfig;
use crate::export::PercentageExport;
use crate::reference::ReferencePalette;
use crate::Result;

/// Outcome of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Number of samples analyzed
    pub sample_count: usize,
    /// Formula used for every sample in this pass
    pub formula: DistanceFormula,
    /// Matches per palette entry
    pub tally: MatchTally,
    /// K-means centroids in seeding order
    pub dominant_colors: Vec<Rgb>,
}

impl AnalysisReport {
    /// Percent of samples per matched palette entry
    pub fn percentages(&self) -> Vec<(String, f64)> {
        self.tally.percentages()
    }

    /// Export shape: name → percentage rounded to one decimal
    pub fn export(&self) -> PercentageExport {
        self.tally.export()
    }

    /// Dominant colors as `#RRGGBB` strings
    pub fn dominant_hex(&self) -> Vec<String> {
        let converter = ColorConverter::new();
        self.dominant_colors
            .iter()
            .map(|&rgb| converter.rgb_to_hex(rgb))
            .collect()
    }
}

/// Color analyzer implementing palette census and dominant color extraction
#[derive(Debug, Clone)]
pub struct ColorAnalyzer {
    config: AnalysisConfig,
    clusterer: KMeansClusterer,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            clusterer: KMeansClusterer::default(),
        }
    }
}

impl ColorAnalyzer {
    /// Create an analyzer, validating the configuration up front
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for zero iterations or a sampling
    /// configuration that selects no pixels
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let clusterer = KMeansClusterer::new(config.cluster_count, config.iterations)?;
        Ok(Self { config, clusterer })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one snapshot of samples against `palette`
    ///
    /// An empty snapshot yields an empty tally and no dominant colors.
    pub fn analyze(&self, palette: &ReferencePalette, samples: &[Rgb]) -> AnalysisReport {
        let formula = self.config.formula;
        let matcher = PaletteMatcher::new(palette);

        debug!(
            samples = samples.len(),
            palette = palette.len(),
            %formula,
            clusters = self.clusterer.k(),
            "starting analysis pass"
        );

        #[cfg(feature = "parallel")]
        let (tally, dominant_colors) = rayon::join(
            || matcher.tally(samples, formula),
            || self.clusterer.cluster(samples),
        );
        #[cfg(not(feature = "parallel"))]
        let (tally, dominant_colors) = (
            matcher.tally(samples, formula),
            self.clusterer.cluster(samples),
        );

        AnalysisReport {
            sample_count: samples.len(),
            formula,
            tally,
            dominant_colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::PaletteEntry;
    use crate::AnalysisError;

    fn palette() -> ReferencePalette {
        ReferencePalette::new(vec![
            PaletteEntry::from_rgb("White", Rgb::new(255, 255, 255)),
            PaletteEntry::from_rgb("Black", Rgb::new(0, 0, 0)),
            PaletteEntry::from_rgb("Red", Rgb::new(255, 0, 0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_analyzer_matches_default_config() {
        let analyzer = ColorAnalyzer::default();
        assert_eq!(analyzer.config(), &AnalysisConfig::default());
        assert_eq!(analyzer.clusterer.k(), 5);
        assert_eq!(analyzer.clusterer.iterations(), 6);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            iterations: 0,
            ..AnalysisConfig::default()
        };
        let err = ColorAnalyzer::new(config).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
    }

    #[test]
    fn test_empty_samples() {
        let analyzer = ColorAnalyzer::default();
        let report = analyzer.analyze(&palette(), &[]);

        assert_eq!(report.sample_count, 0);
        assert!(report.tally.is_empty());
        assert!(report.dominant_colors.is_empty());
        assert!(report.export().is_empty());
    }

    #[test]
    fn test_report_contents() {
        let analyzer = ColorAnalyzer::new(AnalysisConfig {
            cluster_count: 2,
            ..AnalysisConfig::default()
        })
        .unwrap();
        let mut samples = vec![Rgb::new(250, 5, 5); 6];
        samples.extend(vec![Rgb::new(3, 3, 3); 2]);

        let report = analyzer.analyze(&palette(), &samples);

        assert_eq!(report.sample_count, 8);
        assert_eq!(report.formula, DistanceFormula::Ciede2000);
        assert_eq!(report.tally.get("Red"), 6);
        assert_eq!(report.tally.get("Black"), 2);
        assert_eq!(report.export().get("Red"), Some("75.0"));
        // Both seeds are red; the dark samples pull centroid 0 away in the
        // first pass and centroid 1 picks up the reds in the second.
        assert_eq!(report.dominant_colors, vec![Rgb::new(3, 3, 3), Rgb::new(250, 5, 5)]);
        assert_eq!(report.dominant_hex(), vec!["#030303", "#FA0505"]);
    }

    #[test]
    fn test_report_serializes() {
        let report = ColorAnalyzer::default().analyze(&palette(), &[Rgb::new(0, 0, 0)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sample_count"], 1);
        assert_eq!(json["formula"], "CIEDE2000");
    }
}
