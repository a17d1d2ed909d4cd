//! Palette entries and the immutable reference palette
//!
//! Lab values are computed once when an entry is built and cached for the
//! life of the palette. The palette keeps insertion order, which the matcher
//! relies on to break ties.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{rgb_to_lab, ColorConverter, LabColor, Rgb};
use crate::{AnalysisError, Result};

/// One named reference color with its precomputed Lab value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    name: String,
    hex: String,
    rgb: Rgb,
    lab: LabColor,
}

impl PaletteEntry {
    /// Build an entry from a display string and its numeric value
    pub fn new(name: impl Into<String>, hex: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            rgb,
            lab: rgb_to_lab(rgb),
        }
    }

    /// Build an entry from an sRGB value, deriving the `#RRGGBB` display string
    pub fn from_rgb(name: impl Into<String>, rgb: Rgb) -> Self {
        let hex = ColorConverter::new().rgb_to_hex(rgb);
        Self::new(name, hex, rgb)
    }

    /// Build an entry by parsing a hex string
    ///
    /// # Errors
    ///
    /// Returns `InvalidHexColor` if `hex` is not `#RRGGBB`, `RRGGBB` or `#RGB`
    pub fn from_hex(name: impl Into<String>, hex: &str) -> Result<Self> {
        let converter = ColorConverter::new();
        let rgb = converter.hex_to_rgb(hex)?;
        Ok(Self::new(name, converter.rgb_to_hex(rgb), rgb))
    }

    /// Unique name of this entry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display hex string
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Lab value computed at construction
    pub fn lab(&self) -> LabColor {
        self.lab
    }
}

/// Palette record as authored in JSON files
///
/// At least one of `hex` and `rgb` must be present. When both are, they must
/// name the same color; `rgb` provides the numeric value and `hex` is kept
/// verbatim as the display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<[u8; 3]>,
}

impl PaletteRecord {
    fn into_entry(self) -> Result<PaletteEntry> {
        match (self.hex, self.rgb) {
            (Some(hex), Some([r, g, b])) => {
                let rgb = Rgb::new(r, g, b);
                let converter = ColorConverter::new();
                if converter.hex_to_rgb(&hex)? != rgb {
                    return Err(AnalysisError::InvalidHexColor {
                        reason: format!(
                            "entry {:?} gives rgb {}, which differs from its hex",
                            self.name,
                            converter.rgb_to_hex(rgb)
                        ),
                        value: hex,
                    });
                }
                Ok(PaletteEntry::new(self.name, hex, rgb))
            }
            (None, Some([r, g, b])) => Ok(PaletteEntry::from_rgb(self.name, Rgb::new(r, g, b))),
            (Some(hex), None) => PaletteEntry::from_hex(self.name, &hex),
            (None, None) => Err(AnalysisError::invalid_parameter(
                format!("palette entry {:?}", self.name),
                "missing both hex and rgb",
            )),
        }
    }
}

/// Fixed, insertion-ordered set of reference colors
///
/// Constructed once and shared by reference; there is no way to add or
/// remove entries after construction.
#[derive(Debug, Clone)]
pub struct ReferencePalette {
    entries: Vec<PaletteEntry>,
    index: HashMap<String, usize>,
}

impl ReferencePalette {
    /// Create a palette from entries in matching order
    ///
    /// # Errors
    ///
    /// Returns `EmptyPalette` for an empty list and `DuplicatePaletteEntry`
    /// when two entries share a name
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AnalysisError::EmptyPalette);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(AnalysisError::DuplicatePaletteEntry {
                    name: entry.name.clone(),
                });
            }
        }

        debug!(entries = entries.len(), "reference palette loaded");
        Ok(Self { entries, index })
    }

    /// Assemble a palette whose entries are already known to be unique
    pub(crate) fn from_parts(entries: Vec<PaletteEntry>, index: HashMap<String, usize>) -> Self {
        Self { entries, index }
    }

    /// Create a palette from authored records
    pub fn from_records(records: Vec<PaletteRecord>) -> Result<Self> {
        let entries = records
            .into_iter()
            .map(PaletteRecord::into_entry)
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    /// Parse a JSON array of `{ "name": ..., "hex": ... }` records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<PaletteRecord> = serde_json::from_str(json)
            .map_err(|e| AnalysisError::config("Invalid palette JSON", e))?;
        Self::from_records(records)
    }

    /// Load palette from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read palette file: {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Records reproducing this palette, for saving
    pub fn to_records(&self) -> Vec<PaletteRecord> {
        self.entries
            .iter()
            .map(|entry| PaletteRecord {
                name: entry.name.clone(),
                hex: Some(entry.hex.clone()),
                rgb: Some([entry.rgb.red, entry.rgb.green, entry.rgb.blue]),
            })
            .collect()
    }

    /// Entries in matching order
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    /// Number of entries (never zero)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&PaletteEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Position of a named entry in matching order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

impl<'a> IntoIterator for &'a ReferencePalette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
