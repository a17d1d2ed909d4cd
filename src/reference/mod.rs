//! Reference palette module
//!
//! This module holds the named colors samples are classified against:
//! immutable entries with cached Lab values, palette validation and loading,
//! and a built-in default palette.

pub mod builtin;
pub mod entry;

pub use builtin::BASIC_COLORS;
pub use entry::{PaletteEntry, PaletteRecord, ReferencePalette};
