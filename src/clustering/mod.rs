//! Dominant color clustering module
//!
//! Unsupervised discovery of an image's dominant colors from the same RGB
//! samples the palette matcher classifies.

pub mod kmeans;

pub use kmeans::{rgb_distance_sq, KMeansClusterer};
