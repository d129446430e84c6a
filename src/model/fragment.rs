//! Positioned, styled text fragments produced by a document decoder.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Error, Result};

/// Bounding box in page coordinates, y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    fn is_valid(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
            && self.x0 < self.x1
            && self.y0 < self.y1
    }
}

/// One line or run of text with uniform style and a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the run is bold
    pub is_bold: bool,
    /// Whether the run is italic
    #[serde(default)]
    pub is_italic: bool,
    /// Position on the page
    pub bbox: BBox,
    /// Width of the page the fragment sits on
    pub page_width: f32,
    /// Height of the page the fragment sits on
    pub page_height: f32,
}

impl TextFragment {
    /// Create a regular (non-bold, non-italic) fragment on a US Letter page.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        font_name: impl Into<String>,
        font_size: f32,
        bbox: BBox,
    ) -> Self {
        Self {
            text: text.into(),
            page,
            font_name: font_name.into(),
            font_size,
            is_bold: false,
            is_italic: false,
            bbox,
            page_width: 612.0,
            page_height: 792.0,
        }
    }

    /// Mark the fragment as bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Mark the fragment as italic.
    pub fn italic(mut self) -> Self {
        self.is_italic = true;
        self
    }

    /// Set the page dimensions.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Vertical position of the top edge as a fraction of page height (0 = top).
    pub fn relative_top(&self) -> f32 {
        (self.bbox.y0 / self.page_height).clamp(0.0, 1.0)
    }

    /// Reading order: page, then top edge, then left edge.
    pub fn reading_order(&self, other: &Self) -> Ordering {
        self.page
            .cmp(&other.page)
            .then_with(|| self.bbox.y0.total_cmp(&other.bbox.y0))
            .then_with(|| self.bbox.x0.total_cmp(&other.bbox.x0))
    }

    fn check(&self, index: usize, page_count: u32) -> Result<()> {
        if self.page == 0 {
            return Err(Error::invalid_fragment(index, "page 0 is not a valid page"));
        }
        if self.page > page_count {
            return Err(Error::invalid_fragment(
                index,
                format!(
                    "page {} is out of range (document has {} pages)",
                    self.page, page_count
                ),
            ));
        }
        if !self.bbox.is_valid() {
            return Err(Error::invalid_fragment(
                index,
                format!("malformed bounding box {:?}", self.bbox),
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(Error::invalid_fragment(
                index,
                format!("font size {} is not positive", self.font_size),
            ));
        }
        if !(self.page_height.is_finite() && self.page_height > 0.0)
            || !(self.page_width.is_finite() && self.page_width > 0.0)
        {
            return Err(Error::invalid_fragment(
                index,
                format!(
                    "page size {}x{} is not positive",
                    self.page_width, self.page_height
                ),
            ));
        }
        Ok(())
    }
}

/// The fragment set of one document, as handed over by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentDocument {
    /// Total number of pages, including pages without text
    pub page_count: u32,
    /// Fragments in any order
    pub fragments: Vec<TextFragment>,
}

impl FragmentDocument {
    /// Create a document with the given page count and no fragments.
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            fragments: Vec::new(),
        }
    }

    /// Build a document from fragments alone, taking the highest page number as the page count.
    pub fn from_fragments(fragments: Vec<TextFragment>) -> Self {
        let page_count = fragments.iter().map(|f| f.page).max().unwrap_or(0);
        Self {
            page_count,
            fragments,
        }
    }

    /// Add a fragment.
    pub fn push(&mut self, fragment: TextFragment) {
        self.fragments.push(fragment);
    }

    /// Check whether the document has any fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Check every fragment against the data-model invariants.
    pub fn validate(&self) -> Result<()> {
        self.fragments
            .iter()
            .enumerate()
            .try_for_each(|(i, f)| f.check(i, self.page_count))
    }
}
