//! Font size statistics for heading level assignment.

use std::collections::HashMap;

use crate::model::HeadingLevel;

/// Font size statistics for one document.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Body text font size (most common), if any size was observed
    pub body_size: Option<f32>,
    /// Sizes mapped to H1, H2, H3 in that order (at most three)
    pub heading_sizes: Vec<f32>,
    /// Observed font sizes with frequency, keyed by bit pattern
    size_histogram: HashMap<u32, usize>,
}

impl FontStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font size observation. Non-finite sizes are ignored.
    pub fn add_size(&mut self, size: f32) {
        if !size.is_finite() {
            return;
        }
        // Fold -0.0 into 0.0 so equal sizes share a key
        let key = (size + 0.0).to_bits();
        *self.size_histogram.entry(key).or_insert(0) += 1;
    }

    /// Number of distinct sizes observed.
    pub fn distinct_sizes(&self) -> usize {
        self.size_histogram.len()
    }

    /// Calculate the body size and the heading size tiers.
    ///
    /// With `exclude_body` set, every distinct size except the body size is a
    /// candidate, including sizes smaller than the body; otherwise every
    /// distinct size is. The largest candidate is H1, then H2, then H3.
    pub fn analyze(&mut self, exclude_body: bool) {
        let mut sizes: Vec<(f32, usize)> = self
            .size_histogram
            .iter()
            .map(|(bits, count)| (f32::from_bits(*bits), *count))
            .collect();

        if sizes.is_empty() {
            self.body_size = None;
            self.heading_sizes.clear();
            return;
        }

        // Largest first
        sizes.sort_by(|a, b| b.0.total_cmp(&a.0));

        // Most common size; on a tie the smallest wins
        let body = sizes
            .iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.total_cmp(&a.0)))
            .map(|(size, _)| *size);
        self.body_size = body;

        self.heading_sizes = sizes
            .iter()
            .map(|(size, _)| *size)
            .filter(|size| match (exclude_body, body) {
                (true, Some(body)) => *size != body,
                _ => true,
            })
            .take(3)
            .collect();
    }

    /// Get the heading level mapped to an exact font size.
    pub fn level_for(&self, font_size: f32) -> Option<HeadingLevel> {
        self.heading_sizes
            .iter()
            .position(|size| *size == font_size)
            .and_then(HeadingLevel::from_rank)
    }
}
