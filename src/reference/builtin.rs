//! Built-in named reference palette
//!
//! A compact set of everyday color names, used when no palette file is given.

use std::collections::HashMap;

use super::{PaletteEntry, ReferencePalette};
use crate::color::Rgb;

/// Each entry: (name, [r, g, b]). Order is the matching order.
pub const BASIC_COLORS: &[(&str, [u8; 3])] = &[
    // Neutrals
    ("Black", [0, 0, 0]),
    ("Charcoal", [54, 69, 79]),
    ("Gray", [128, 128, 128]),
    ("Silver", [192, 192, 192]),
    ("White", [255, 255, 255]),
    ("Beige", [245, 245, 220]),
    // Reds & browns
    ("Red", [255, 0, 0]),
    ("Maroon", [128, 0, 0]),
    ("Brown", [139, 69, 19]),
    ("Tan", [210, 180, 140]),
    // Oranges & yellows
    ("Orange", [255, 165, 0]),
    ("Gold", [255, 215, 0]),
    ("Yellow", [255, 255, 0]),
    ("Olive", [128, 128, 0]),
    // Greens
    ("Lime", [0, 255, 0]),
    ("Green", [0, 128, 0]),
    ("Forest Green", [34, 139, 34]),
    ("Teal", [0, 128, 128]),
    // Blues
    ("Cyan", [0, 255, 255]),
    ("Sky Blue", [135, 206, 235]),
    ("Blue", [0, 0, 255]),
    ("Navy", [0, 0, 128]),
    // Purples & pinks
    ("Purple", [128, 0, 128]),
    ("Lavender", [230, 230, 250]),
    ("Magenta", [255, 0, 255]),
    ("Pink", [255, 192, 203]),
];

impl ReferencePalette {
    /// Palette built from [`BASIC_COLORS`]
    pub fn builtin() -> Self {
        let entries: Vec<PaletteEntry> = BASIC_COLORS
            .iter()
            .map(|&(name, [r, g, b])| PaletteEntry::from_rgb(name, Rgb::new(r, g, b)))
            .collect();
        let index: HashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.name().to_string(), position))
            .collect();
        Self::from_parts(entries, index)
    }
}
