//! Analysis options and configuration.

use super::classify::{DocumentClass, ScoringWeights, SPARSE_WEIGHTS, TEXT_HEAVY_WEIGHTS};

/// Options for outline inference.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Fraction of page height treated as header zone (and, mirrored, footer zone)
    pub zone_ratio: f32,

    /// Characters per page above which a document is text-heavy
    pub text_density_threshold: f32,

    /// Number of page-1 fragments, in reading order, considered for the title
    pub title_scan_limit: usize,

    /// Scoring constants for text-heavy documents
    pub text_heavy: ScoringWeights,

    /// Scoring constants for sparse documents
    pub sparse: ScoringWeights,

    /// Whether batches are processed in parallel
    pub parallel: bool,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header/footer zone ratio. Values are clamped to `0.0..=0.5`.
    pub fn with_zone_ratio(mut self, ratio: f32) -> Self {
        self.zone_ratio = ratio.clamp(0.0, 0.5);
        self
    }

    /// Set the text-density threshold, in characters per page.
    pub fn with_density_threshold(mut self, chars_per_page: f32) -> Self {
        self.text_density_threshold = chars_per_page;
        self
    }

    /// Set how many page-1 fragments are considered for the title.
    pub fn with_title_scan_limit(mut self, limit: usize) -> Self {
        self.title_scan_limit = limit;
        self
    }

    /// Replace the scoring constants of one document class.
    pub fn with_weights(mut self, class: DocumentClass, weights: ScoringWeights) -> Self {
        match class {
            DocumentClass::TextHeavy => self.text_heavy = weights,
            DocumentClass::Sparse => self.sparse = weights,
        }
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Scoring constants for a document class.
    pub fn weights(&self, class: DocumentClass) -> &ScoringWeights {
        match class {
            DocumentClass::TextHeavy => &self.text_heavy,
            DocumentClass::Sparse => &self.sparse,
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            zone_ratio: 0.12,
            text_density_threshold: 800.0,
            title_scan_limit: 12,
            text_heavy: TEXT_HEAVY_WEIGHTS,
            sparse: SPARSE_WEIGHTS,
            parallel: true,
        }
    }
}
