//! # untoc
//!
//! Document outline inference for Rust.
//!
//! This library takes the positioned text fragments a PDF decoder produces
//! and infers the document title and a three-level heading outline from
//! typography and layout alone.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untoc::{infer_file, render};
//!
//! fn main() -> untoc::Result<()> {
//!     // Fragments decoded from a PDF, serialized as JSON
//!     let result = infer_file("report.fragments.json")?;
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Running text removal**: repeated headers and footers never reach the outline
//! - **Style statistics**: body and heading styles derived per document
//! - **Document classes**: separate scoring tables for dense and sparse documents
//! - **Section numbering**: `2.1.3`-style numbers drive heading levels
//! - **Parallel processing**: Uses Rayon for batches of documents

pub mod analysis;
pub mod error;
pub mod input;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    AnalysisOptions, AnalysisReport, DocumentClass, FeatureScores, HeadingCandidate,
    OutlineAnalyzer, RunningText, ScoringWeights, SPARSE_WEIGHTS, TEXT_HEAVY_WEIGHTS,
};
pub use error::{Error, Result};
pub use input::{detect_shape, InputShape};
pub use model::{
    BBox, FragmentDocument, HeadingLevel, OutlineEntry, OutlineResult, Style, StyleProfile,
    TextFragment,
};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Infer the title and outline of a decoded document.
///
/// # Example
///
/// ```
/// use untoc::{infer_outline, FragmentDocument};
///
/// let result = infer_outline(&FragmentDocument::new(0)).unwrap();
/// assert_eq!(result.title, "");
/// assert!(result.outline.is_empty());
/// ```
pub fn infer_outline(doc: &FragmentDocument) -> Result<OutlineResult> {
    OutlineAnalyzer::new().analyze(doc)
}

/// Infer the outline of a document with custom options.
pub fn infer_outline_with_options(
    doc: &FragmentDocument,
    options: AnalysisOptions,
) -> Result<OutlineResult> {
    OutlineAnalyzer::with_options(options).analyze(doc)
}

/// Read a serialized fragment set and infer its outline.
///
/// # Arguments
///
/// * `path` - Path to the fragment JSON file
///
/// # Example
///
/// ```no_run
/// use untoc::infer_file;
///
/// let result = infer_file("report.fragments.json").unwrap();
/// println!("Title: {}", result.title);
/// ```
pub fn infer_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    let doc = input::read_document_file(path)?;
    infer_outline(&doc)
}

/// Infer the outline of a serialized fragment set held in memory.
pub fn infer_bytes(data: &[u8]) -> Result<OutlineResult> {
    let doc = input::read_document_bytes(data)?;
    infer_outline(&doc)
}

/// Infer the outline of a serialized fragment set read from a reader.
pub fn infer_reader<R: Read>(reader: R) -> Result<OutlineResult> {
    let doc = input::read_document_reader(reader)?;
    infer_outline(&doc)
}

/// Convert a fragment file straight to outline JSON.
///
/// # Example
///
/// ```no_run
/// use untoc::{to_json, JsonFormat};
///
/// let json = to_json("report.fragments.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("report.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = infer_file(path)?;
    render::to_json(&result, format)
}

/// Builder for inferring outlines.
///
/// # Example
///
/// ```no_run
/// use untoc::Untoc;
///
/// let json = Untoc::new()
///     .with_zone_ratio(0.1)
///     .sequential()
///     .infer_file("report.fragments.json")?
///     .to_json()?;
/// # Ok::<(), untoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Untoc {
    options: AnalysisOptions,
    format: JsonFormat,
}

impl Untoc {
    /// Create a new Untoc builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing of batches.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set the header/footer zone as a fraction of page height.
    pub fn with_zone_ratio(mut self, ratio: f32) -> Self {
        self.options = self.options.with_zone_ratio(ratio);
        self
    }

    /// Set the characters-per-page density above which a document is text-heavy.
    pub fn with_density_threshold(mut self, chars_per_page: f32) -> Self {
        self.options = self.options.with_density_threshold(chars_per_page);
        self
    }

    /// Set how many page-1 fragments are considered for the title.
    pub fn with_title_scan_limit(mut self, limit: usize) -> Self {
        self.options = self.options.with_title_scan_limit(limit);
        self
    }

    /// Replace all analysis options.
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the JSON format used by [`UntocResult::to_json`].
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Compact JSON output.
    pub fn compact(self) -> Self {
        self.with_format(JsonFormat::Compact)
    }

    /// The analysis options in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    fn analyzer(&self) -> OutlineAnalyzer {
        OutlineAnalyzer::with_options(self.options.clone())
    }

    /// Infer the outline of a decoded document.
    pub fn infer_document(&self, doc: &FragmentDocument) -> Result<UntocResult> {
        let result = self.analyzer().analyze(doc)?;
        Ok(UntocResult {
            result,
            format: self.format,
        })
    }

    /// Read a fragment file and infer its outline.
    pub fn infer_file<P: AsRef<Path>>(&self, path: P) -> Result<UntocResult> {
        let doc = input::read_document_file(path)?;
        self.infer_document(&doc)
    }

    /// Decode fragments from bytes and infer the outline.
    pub fn infer_bytes(&self, data: &[u8]) -> Result<UntocResult> {
        let doc = input::read_document_bytes(data)?;
        self.infer_document(&doc)
    }

    /// Infer outlines of independent documents, in input order.
    ///
    /// Documents are processed in parallel unless [`Untoc::sequential`] was set.
    pub fn infer_batch(&self, docs: &[FragmentDocument]) -> Vec<Result<OutlineResult>> {
        self.analyzer().analyze_all(docs)
    }
}

/// Outline of one document, ready for rendering.
#[derive(Debug, Clone)]
pub struct UntocResult {
    /// The inferred outline
    pub result: OutlineResult,
    format: JsonFormat,
}

impl UntocResult {
    /// Render as JSON in the builder's format.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.result, self.format)
    }

    /// The document title.
    pub fn title(&self) -> &str {
        &self.result.title
    }

    /// The heading entries.
    pub fn outline(&self) -> &[OutlineEntry] {
        &self.result.outline
    }

    /// Take the outline result.
    pub fn into_inner(self) -> OutlineResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading_doc() -> FragmentDocument {
        let mut doc = FragmentDocument::new(1);
        doc.push(
            TextFragment::new("Trail Notes", 1, "Arial-Bold", 24.0, BBox::new(72.0, 60.0, 300.0, 84.0))
                .bold(),
        );
        doc.push(
            TextFragment::new("1 Planning", 1, "Arial-Bold", 16.0, BBox::new(72.0, 140.0, 300.0, 156.0))
                .bold(),
        );
        doc.push(TextFragment::new(
            "Pick a route that matches the group and the season.",
            1,
            "Arial",
            11.0,
            BBox::new(72.0, 170.0, 540.0, 182.0),
        ));
        doc
    }

    #[test]
    fn test_untoc_builder() {
        let untoc = Untoc::new()
            .sequential()
            .with_zone_ratio(0.1)
            .with_density_threshold(500.0)
            .with_title_scan_limit(5)
            .compact();

        assert!(!untoc.options().parallel);
        assert_eq!(untoc.options().zone_ratio, 0.1);
        assert_eq!(untoc.options().text_density_threshold, 500.0);
        assert_eq!(untoc.options().title_scan_limit, 5);
        assert_eq!(untoc.format, JsonFormat::Compact);
    }

    #[test]
    fn test_untoc_builder_default() {
        let untoc = Untoc::default();
        assert!(untoc.options().parallel);
        assert_eq!(untoc.format, JsonFormat::Pretty);
    }

    #[test]
    fn test_infer_document() {
        let result = Untoc::new().infer_document(&heading_doc()).unwrap();
        assert_eq!(result.title(), "Trail Notes");
        assert_eq!(result.outline().len(), 1);
        assert_eq!(result.outline()[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_infer_bytes_round_trip() {
        let json = serde_json::to_vec(&heading_doc()).unwrap();
        let result = infer_bytes(&json).unwrap();
        assert_eq!(result, infer_outline(&heading_doc()).unwrap());
    }

    #[test]
    fn test_infer_reader() {
        let mut data = b"\xEF\xBB\xBF".to_vec();
        data.extend(serde_json::to_vec(&heading_doc()).unwrap());
        let result = infer_reader(data.as_slice()).unwrap();
        assert_eq!(result.title, "Trail Notes");
        assert_eq!(result.outline[0].text, "1 Planning");
    }

    #[test]
    fn test_infer_outline_with_options() {
        let options = AnalysisOptions::new().with_parallel(false).with_title_scan_limit(1);
        let result = infer_outline_with_options(&heading_doc(), options).unwrap();
        assert_eq!(result, infer_outline(&heading_doc()).unwrap());
    }

    #[test]
    fn test_untoc_result_into_inner() {
        let result = Untoc::new().infer_document(&heading_doc()).unwrap();
        let title = result.title().to_string();
        let inner = result.into_inner();
        assert_eq!(inner.title, title);
        assert_eq!(inner.outline.len(), 1);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_infer_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(matches!(infer_bytes(&data), Err(Error::Decode(_))));
    }

    #[test]
    fn test_infer_bytes_not_json() {
        assert!(infer_bytes(b"%PDF-1.7\n%test").is_err());
    }

    #[test]
    fn test_infer_empty_array() {
        let result = infer_bytes(b"[]").unwrap();
        assert!(result.is_empty());
        assert_eq!(
            render::to_json(&result, JsonFormat::Compact).unwrap(),
            r#"{"title":"","outline":[]}"#
        );
    }

    #[test]
    fn test_untoc_result_to_json() {
        let json = Untoc::new()
            .compact()
            .infer_document(&FragmentDocument::new(0))
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_infer_batch() {
        let results = Untoc::new().infer_batch(&[heading_doc(), FragmentDocument::new(0)]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().title, "Trail Notes");
        assert!(results[1].as_ref().unwrap().is_empty());
    }
}
