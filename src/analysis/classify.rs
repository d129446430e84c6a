//! Document classification and the per-class scoring constants.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::TextFragment;

/// Coarse document density class. Selects the scoring constants used downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentClass {
    /// Reports, papers, books: long runs of body text
    TextHeavy,
    /// Forms, flyers, slides: little running text per page
    Sparse,
}

impl DocumentClass {
    /// Label of the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentClass::TextHeavy => "text_heavy",
            DocumentClass::Sparse => "sparse",
        }
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature weights, penalties and thresholds for one document class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Candidates must score strictly above this to be kept
    pub acceptance_threshold: f32,
    /// Points per unit of relative size above body size
    pub size_weight: f32,
    /// Largest relative size credited
    pub size_cap: f32,
    /// Bonus for bold text
    pub bold_bonus: f32,
    /// Bonus for a leading section number
    pub numbering_bonus: f32,
    /// Bonus for ALL-CAPS text
    pub all_caps_bonus: f32,
    /// Bonus for Title-Case text
    pub title_case_bonus: f32,
    /// Bonus for a structural keyword among the leading words
    pub keyword_bonus: f32,
    /// Points per font-size unit of extra whitespace above the fragment
    pub spacing_weight: f32,
    /// Gap, in font-size units, considered ordinary line spacing
    pub spacing_threshold: f32,
    /// Largest spacing bonus
    pub spacing_cap: f32,
    /// Text ending like a sentence
    pub terminal_period_penalty: f32,
    /// Digits and punctuation only
    pub non_alpha_penalty: f32,
    /// Fewer than `min_heading_chars` characters after the section number
    pub short_text_penalty: f32,
    /// Captions, figure labels, table-of-contents lines
    pub caption_penalty: f32,
    /// Page numbers, dates, copyright lines and similar furniture
    pub artifact_penalty: f32,
    /// More than `max_heading_words` words
    pub long_text_penalty: f32,
    /// Text ending with a colon
    pub label_colon_penalty: f32,
    /// Average fragment length a style needs to qualify as body text
    pub min_body_length: f32,
    /// Shortest heading text, after the section number
    pub min_heading_chars: usize,
    /// Longest heading, in words
    pub max_heading_words: usize,
    /// Best title score must exceed this, or the title stays empty
    pub title_min_score: f32,
}

impl ScoringWeights {
    /// Default constants for a document class.
    pub fn for_class(class: DocumentClass) -> Self {
        match class {
            DocumentClass::TextHeavy => TEXT_HEAVY_WEIGHTS,
            DocumentClass::Sparse => SPARSE_WEIGHTS,
        }
    }

    /// Replace the acceptance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.acceptance_threshold = threshold;
        self
    }
}

/// Constants for text-heavy documents. Body text is rarely bold, so bold is a strong signal.
pub const TEXT_HEAVY_WEIGHTS: ScoringWeights = ScoringWeights {
    acceptance_threshold: 30.0,
    size_weight: 60.0,
    size_cap: 1.0,
    bold_bonus: 30.0,
    numbering_bonus: 30.0,
    all_caps_bonus: 15.0,
    title_case_bonus: 10.0,
    keyword_bonus: 20.0,
    spacing_weight: 10.0,
    spacing_threshold: 0.8,
    spacing_cap: 15.0,
    terminal_period_penalty: 25.0,
    non_alpha_penalty: 60.0,
    short_text_penalty: 30.0,
    caption_penalty: 40.0,
    artifact_penalty: 60.0,
    long_text_penalty: 40.0,
    label_colon_penalty: 10.0,
    min_body_length: 20.0,
    min_heading_chars: 3,
    max_heading_words: 35,
    title_min_score: 50.0,
};

/// Constants for sparse documents. Size dominates; bold labels and colons are common and weak.
pub const SPARSE_WEIGHTS: ScoringWeights = ScoringWeights {
    acceptance_threshold: 35.0,
    size_weight: 75.0,
    size_cap: 1.0,
    bold_bonus: 15.0,
    numbering_bonus: 30.0,
    all_caps_bonus: 15.0,
    title_case_bonus: 10.0,
    keyword_bonus: 15.0,
    spacing_weight: 5.0,
    spacing_threshold: 0.8,
    spacing_cap: 10.0,
    terminal_period_penalty: 20.0,
    non_alpha_penalty: 60.0,
    short_text_penalty: 30.0,
    caption_penalty: 40.0,
    artifact_penalty: 60.0,
    long_text_penalty: 40.0,
    label_colon_penalty: 30.0,
    min_body_length: 8.0,
    min_heading_chars: 3,
    max_heading_words: 35,
    title_min_score: 0.0,
};

/// Average characters of text per page.
pub fn text_density(fragments: &[&TextFragment], page_count: u32) -> f32 {
    if page_count == 0 {
        return 0.0;
    }
    let chars: usize = fragments
        .iter()
        .map(|f| f.text.trim().chars().count())
        .sum();
    chars as f32 / page_count as f32
}

/// Classify a document by its text density.
pub fn classify_document(
    fragments: &[&TextFragment],
    page_count: u32,
    density_threshold: f32,
) -> DocumentClass {
    let density = text_density(fragments, page_count);
    let class = if density > density_threshold {
        DocumentClass::TextHeavy
    } else {
        DocumentClass::Sparse
    };
    log::debug!(
        "Document class: {} ({:.0} chars/page, threshold {:.0})",
        class,
        density,
        density_threshold
    );
    class
}
