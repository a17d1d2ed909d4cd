//! Stable export shape for match results
//!
//! Maps each matched palette entry name to its share of the samples as a
//! string rounded to one decimal (`"37.5"`), with exact halves rounded up.
//! Entries that never matched are absent; an empty tally exports an empty
//! map.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::MatchTally;
use crate::{AnalysisError, Result};

/// Palette entry name → percentage string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentageExport(BTreeMap<String, String>);

impl PercentageExport {
    /// Build the export from a tally
    pub fn from_tally(tally: &MatchTally) -> Self {
        let total = tally.total();
        if total == 0 {
            return Self::default();
        }
        Self(
            tally
                .iter()
                .map(|(name, count)| (name.to_string(), format_tenths(count, total)))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Compact JSON object
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AnalysisError::config("Failed to serialize export", e))
    }

    /// Indented JSON object
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize export", e))
    }

    /// Save export to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write export: {}", path.display()), e)
        })
    }
}

/// `count / total` as a percentage with one decimal, halves rounded up.
///
/// Works in integer tenths so shares such as 0.25% are exact ties.
fn format_tenths(count: usize, total: usize) -> String {
    let (count, total) = (count as u128, total as u128);
    let tenths = (count * 2000 + total) / (2 * total);
    format!("{}.{}", tenths / 10, tenths % 10)
}
