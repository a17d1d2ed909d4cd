//! Deterministic k-means over 8-bit RGB samples
//!
//! - Seeding: the first `k` samples, in input order, are the initial centroids
//! - Assignment: squared Euclidean distance in RGB, lowest centroid index wins
//!   ties
//! - Update: integer-rounded mean of the assigned samples; a centroid with no
//!   members keeps its previous value
//! - Termination: a fixed number of iterations, no convergence test
//!
//! Clustering runs in RGB rather than Lab so it stays cheap; palette matching
//! is where perceptual distances are used.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::color::Rgb;
use crate::constants::defaults;
use crate::{AnalysisError, Result};

/// Squared Euclidean distance between two RGB triples
#[inline]
pub fn rgb_distance_sq(a: Rgb, b: Rgb) -> u32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Index of the closest centroid; the first one wins on equal distance
#[inline]
fn nearest_centroid(sample: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (index, &centroid) in centroids.iter().enumerate() {
        let distance = rgb_distance_sq(sample, centroid);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// Fixed-iteration k-means clusterer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeansClusterer {
    k: usize,
    iterations: usize,
}

impl Default for KMeansClusterer {
    fn default() -> Self {
        Self {
            k: defaults::CLUSTER_COUNT,
            iterations: defaults::ITERATIONS,
        }
    }
}

impl KMeansClusterer {
    /// Create a clusterer producing up to `k` centroids
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `iterations` is zero
    pub fn new(k: usize, iterations: usize) -> Result<Self> {
        if iterations == 0 {
            return Err(AnalysisError::invalid_parameter("iterations", iterations));
        }
        Ok(Self { k, iterations })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Cluster `samples` into at most `k` centroids, in seeding order.
    ///
    /// Fewer samples than `k` yields one centroid per sample; no samples
    /// yields no centroids.
    pub fn cluster(&self, samples: &[Rgb]) -> Vec<Rgb> {
        let actual_k = self.k.min(samples.len());
        if actual_k < self.k {
            debug!(requested = self.k, actual = actual_k, "cluster count clipped to sample count");
        }
        if actual_k == 0 {
            return Vec::new();
        }

        let mut centroids: Vec<Rgb> = samples[..actual_k].to_vec();
        let mut assignments = vec![0usize; samples.len()];

        for iteration in 0..self.iterations {
            self.assign(samples, &centroids, &mut assignments);
            let starved = update_centroids(samples, &assignments, &mut centroids);
            trace!(iteration, starved, "k-means iteration");
        }

        centroids
    }

    #[cfg(feature = "parallel")]
    fn assign(&self, samples: &[Rgb], centroids: &[Rgb], assignments: &mut [usize]) {
        assignments
            .par_iter_mut()
            .zip(samples.par_iter())
            .for_each(|(slot, &sample)| *slot = nearest_centroid(sample, centroids));
    }

    #[cfg(not(feature = "parallel"))]
    fn assign(&self, samples: &[Rgb], centroids: &[Rgb], assignments: &mut [usize]) {
        for (slot, &sample) in assignments.iter_mut().zip(samples) {
            *slot = nearest_centroid(sample, centroids);
        }
    }
}

/// Recompute each centroid as the rounded mean of its members.
///
/// Sums are accumulated in sample order. Returns how many centroids had no
/// members and were left unchanged.
fn update_centroids(samples: &[Rgb], assignments: &[usize], centroids: &mut [Rgb]) -> usize {
    let mut sums = vec![[0u64; 3]; centroids.len()];
    let mut members = vec![0u64; centroids.len()];

    for (&sample, &cluster) in samples.iter().zip(assignments) {
        let sum = &mut sums[cluster];
        sum[0] += sample.red as u64;
        sum[1] += sample.green as u64;
        sum[2] += sample.blue as u64;
        members[cluster] += 1;
    }

    let mut starved = 0;
    for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&members) {
        if count == 0 {
            starved += 1;
            continue;
        }
        let mean = |total: u64| (total as f64 / count as f64).round() as u8;
        *centroid = Rgb::new(mean(sum[0]), mean(sum[1]), mean(sum[2]));
    }
    starved
}
