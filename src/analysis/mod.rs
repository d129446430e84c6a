//! Structure inference: from flat text fragments to a title and heading outline.
//!
//! The stages run strictly forward:
//!
//! 1. [`header_footer`] removes running headers and footers from the candidate pool.
//! 2. [`classify`] labels the document text-heavy or sparse, which selects the
//!    scoring constants for everything downstream.
//! 3. [`profile`] derives the body style and up to three heading styles.
//! 4. [`title`] picks the title from the first page.
//! 5. [`scoring`] gives every other fragment a heading score.
//! 6. [`cleanup`] thresholds the scores, assigns levels and produces the outline.
//!
//! Each stage is a pure function of the document and the outputs of earlier
//! stages, so running the analyzer twice on the same input gives the same result.

pub mod classify;
pub mod cleanup;
pub mod header_footer;
mod options;
pub mod patterns;
pub mod profile;
pub mod scoring;
pub mod title;

pub use classify::{DocumentClass, ScoringWeights, SPARSE_WEIGHTS, TEXT_HEAVY_WEIGHTS};
pub use header_footer::{HeaderFooterFilter, RunningText};
pub use options::AnalysisOptions;
pub use scoring::{FeatureScores, HeadingCandidate, HeadingScorer};
pub use title::TitleChoice;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{FragmentDocument, OutlineResult, StyleProfile};

/// Everything the analyzer decided about one document.
#[derive(Debug, Clone)]
pub struct AnalysisReport<'d> {
    /// The outline and title
    pub result: OutlineResult,
    /// Strings flagged as running headers/footers
    pub running_text: RunningText,
    /// Document class
    pub class: DocumentClass,
    /// Style profile, absent when no candidate fragments remain
    pub profile: Option<StyleProfile>,
    /// Score of the chosen title fragment
    pub title_score: Option<f32>,
    /// Every scored fragment, in reading order
    pub candidates: Vec<HeadingCandidate<'d>>,
}

/// Runs the inference pipeline over one document at a time.
#[derive(Debug, Clone, Default)]
pub struct OutlineAnalyzer {
    options: AnalysisOptions,
}

impl OutlineAnalyzer {
    /// Create an analyzer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom options.
    pub fn with_options(options: AnalysisOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Infer the title and outline of a document.
    pub fn analyze(&self, doc: &FragmentDocument) -> Result<OutlineResult> {
        self.analyze_report(doc).map(|report| report.result)
    }

    /// Infer the title and outline, keeping the intermediate decisions.
    ///
    /// Fails only when the document violates the input data model; an empty
    /// document yields an empty result.
    pub fn analyze_report<'d>(&self, doc: &'d FragmentDocument) -> Result<AnalysisReport<'d>> {
        doc.validate()?;

        let options = &self.options;
        let running_text = HeaderFooterFilter::new(options.zone_ratio)
            .detect(&doc.fragments, doc.page_count);
        let pool = running_text.retain(&doc.fragments);

        let class = classify::classify_document(
            &pool,
            doc.page_count,
            options.text_density_threshold,
        );
        let weights = options.weights(class);

        let Some(profile) = profile::build_profile(&pool, weights.min_body_length) else {
            log::debug!("No candidate fragments; empty outline");
            return Ok(AnalysisReport {
                result: OutlineResult::empty(),
                running_text,
                class,
                profile: None,
                title_score: None,
                candidates: Vec::new(),
            });
        };

        let title = title::select_title(&pool, &running_text, options.title_scan_limit, weights);

        let mut candidates =
            HeadingScorer::new(&profile, weights).score_all(&pool, title.map(|t| t.fragment));
        let leveled = cleanup::classify_candidates(
            &mut candidates,
            &profile,
            weights.acceptance_threshold,
        );
        let outline = cleanup::build_outline(&candidates, &running_text);

        log::debug!(
            "Scored {} candidates, {} leveled, {} in outline",
            candidates.len(),
            leveled,
            outline.len()
        );

        Ok(AnalysisReport {
            result: OutlineResult {
                title: title.map(|t| t.text()).unwrap_or_default(),
                outline,
            },
            running_text,
            class,
            profile: Some(profile),
            title_score: title.map(|t| t.score),
            candidates,
        })
    }

    /// Analyze several independent documents, in parallel when enabled.
    ///
    /// Results are returned in input order; a failing document does not affect the others.
    pub fn analyze_all(&self, docs: &[FragmentDocument]) -> Vec<Result<OutlineResult>> {
        if self.options.parallel {
            docs.par_iter().map(|doc| self.analyze(doc)).collect()
        } else {
            docs.iter().map(|doc| self.analyze(doc)).collect()
        }
    }
}
