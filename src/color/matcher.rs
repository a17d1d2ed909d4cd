//! Nearest palette entry matching
//!
//! Each sample is compared with every palette entry in palette order. The
//! running minimum only moves on a strictly smaller distance, so the first
//! entry reaching the minimum wins ties. Do not reorder the palette or swap
//! this scan for a spatial index without accepting a different tie-break.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{rgb_to_lab, DistanceFormula, LabColor, Rgb};
use crate::export::PercentageExport;
use crate::reference::{PaletteEntry, ReferencePalette};

/// Per-entry sample counts from one matching pass
///
/// Only entries with at least one match are present, listed in palette
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTally {
    counts: Vec<(String, usize)>,
    total: usize,
}

impl MatchTally {
    /// Count for a palette entry name, zero if it never matched
    pub fn get(&self, name: &str) -> usize {
        self.counts
            .iter()
            .find(|(entry, _)| entry == name)
            .map_or(0, |&(_, count)| count)
    }

    /// (name, count) pairs in palette order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of distinct entries that matched at least once
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of samples tallied
    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of samples per entry, in percent
    ///
    /// Empty when no samples were tallied.
    pub fn percentages(&self) -> Vec<(String, f64)> {
        if self.total == 0 {
            return Vec::new();
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|(name, count)| (name.clone(), *count as f64 * 100.0 / total))
            .collect()
    }

    /// Percentages rounded to one decimal, keyed by entry name
    pub fn export(&self) -> PercentageExport {
        PercentageExport::from_tally(self)
    }
}

/// Finds the closest reference color for Lab samples
#[derive(Debug, Clone, Copy)]
pub struct PaletteMatcher<'a> {
    palette: &'a ReferencePalette,
}

impl<'a> PaletteMatcher<'a> {
    pub fn new(palette: &'a ReferencePalette) -> Self {
        Self { palette }
    }

    /// Palette this matcher scans
    pub fn palette(&self) -> &'a ReferencePalette {
        self.palette
    }

    /// Closest entry to `sample` and its distance
    pub fn nearest(&self, sample: LabColor, formula: DistanceFormula) -> (&'a PaletteEntry, f64) {
        let (position, distance) = self.nearest_index(sample, formula);
        (&self.palette.entries()[position], distance)
    }

    /// Position of the closest entry in palette order, and its distance
    pub fn nearest_index(&self, sample: LabColor, formula: DistanceFormula) -> (usize, f64) {
        let entries = self.palette.entries();
        // A ReferencePalette is never empty
        let mut best = 0;
        let mut best_distance = formula.distance(sample, entries[0].lab());

        for (position, entry) in entries.iter().enumerate().skip(1) {
            let distance = formula.distance(sample, entry.lab());
            if distance < best_distance {
                best = position;
                best_distance = distance;
            }
        }

        (best, best_distance)
    }

    /// Classify every sample and count matches per entry
    pub fn tally(&self, samples: &[Rgb], formula: DistanceFormula) -> MatchTally {
        let nearest = |rgb: &Rgb| self.nearest_index(rgb_to_lab(*rgb), formula).0;

        #[cfg(feature = "parallel")]
        let assignments: Vec<usize> = samples.par_iter().map(nearest).collect();
        #[cfg(not(feature = "parallel"))]
        let assignments: Vec<usize> = samples.iter().map(nearest).collect();

        self.collect_tally(&assignments)
    }

    /// Same as [`tally`](Self::tally) for samples already converted to Lab
    pub fn tally_lab(&self, samples: &[LabColor], formula: DistanceFormula) -> MatchTally {
        let nearest = |lab: &LabColor| self.nearest_index(*lab, formula).0;

        #[cfg(feature = "parallel")]
        let assignments: Vec<usize> = samples.par_iter().map(nearest).collect();
        #[cfg(not(feature = "parallel"))]
        let assignments: Vec<usize> = samples.iter().map(nearest).collect();

        self.collect_tally(&assignments)
    }

    fn collect_tally(&self, assignments: &[usize]) -> MatchTally {
        let mut counts = vec![0usize; self.palette.len()];
        for &position in assignments {
            counts[position] += 1;
        }

        let counts: Vec<(String, usize)> = self
            .palette
            .iter()
            .zip(counts)
            .filter(|&(_, count)| count > 0)
            .map(|(entry, count)| (entry.name().to_string(), count))
            .collect();

        debug!(
            samples = assignments.len(),
            matched_entries = counts.len(),
            "palette tally complete"
        );

        MatchTally {
            counts,
            total: assignments.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_and_white() -> ReferencePalette {
        ReferencePalette::new(vec![
            PaletteEntry::from_rgb("White", Rgb::new(255, 255, 255)),
            PaletteEntry::from_rgb("Black", Rgb::new(0, 0, 0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_nearest_white() {
        let palette = black_and_white();
        let matcher = PaletteMatcher::new(&palette);

        let (entry, distance) =
            matcher.nearest(rgb_to_lab(Rgb::new(250, 250, 250)), DistanceFormula::Cie76);
        assert_eq!(entry.name(), "White");
        assert!(distance < 2.5);
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let palette = ReferencePalette::new(vec![
            PaletteEntry::from_rgb("A", Rgb::new(90, 30, 160)),
            PaletteEntry::from_rgb("B", Rgb::new(90, 30, 160)),
        ])
        .unwrap();
        let matcher = PaletteMatcher::new(&palette);
        let sample = palette.entries()[0].lab();

        for formula in DistanceFormula::ALL {
            let (entry, distance) = matcher.nearest(sample, formula);
            assert_eq!(entry.name(), "A");
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn test_tally_counts_in_palette_order() {
        let palette = black_and_white();
        let matcher = PaletteMatcher::new(&palette);
        let samples = vec![
            Rgb::new(5, 5, 5),
            Rgb::new(240, 240, 240),
            Rgb::new(10, 0, 0),
            Rgb::new(20, 20, 20),
        ];

        let tally = matcher.tally(&samples, DistanceFormula::Ciede2000);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.get("Black"), 3);
        assert_eq!(tally.get("White"), 1);

        let order: Vec<&str> = tally.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["White", "Black"]);
    }

    #[test]
    fn test_tally_omits_unmatched_entries() {
        let palette = black_and_white();
        let matcher = PaletteMatcher::new(&palette);

        let tally = matcher.tally(&[Rgb::new(1, 1, 1)], DistanceFormula::Cie94);
        assert_eq!(tally.len(), 1);
        assert_eq!(tally.get("White"), 0);
        assert!(tally.iter().all(|(name, _)| name != "White"));
    }

    #[test]
    fn test_tally_empty_samples() {
        let palette = black_and_white();
        let matcher = PaletteMatcher::new(&palette);

        let tally = matcher.tally(&[], DistanceFormula::Ciede2000);
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
        assert!(tally.percentages().is_empty());
    }

    #[test]
    fn test_tally_lab_matches_tally() {
        let palette = ReferencePalette::builtin();
        let matcher = PaletteMatcher::new(&palette);
        let samples: Vec<Rgb> = (0..64u8)
            .map(|i| Rgb::new(i.wrapping_mul(37), i.wrapping_mul(11), 255 - i * 3))
            .collect();
        let labs: Vec<LabColor> = samples.iter().map(|&s| rgb_to_lab(s)).collect();

        for formula in DistanceFormula::ALL {
            assert_eq!(matcher.tally(&samples, formula), matcher.tally_lab(&labs, formula));
        }
    }

    #[test]
    fn test_percentages() {
        let palette = black_and_white();
        let matcher = PaletteMatcher::new(&palette);
        let samples = vec![
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
        ];

        let percentages = matcher.tally(&samples, DistanceFormula::Cie76).percentages();
        assert_eq!(
            percentages,
            vec![("White".to_string(), 25.0), ("Black".to_string(), 75.0)]
        );
    }
}
