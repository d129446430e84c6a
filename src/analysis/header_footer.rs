//! Detection of running headers and footers.
//!
//! A string is a running header/footer when it sits entirely inside the top or
//! bottom zone of enough distinct pages. Every fragment carrying such a string
//! is removed from the candidate pool, wherever it appears.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::patterns::normalize_text;
use crate::model::TextFragment;

/// Minimum number of distinct pages a zone string must appear on: `max(2, ceil(N/2))`.
pub fn min_repeat_pages(page_count: u32) -> usize {
    (page_count as usize).div_ceil(2).max(2)
}

/// Finds page-boundary repeats.
#[derive(Debug, Clone, Copy)]
pub struct HeaderFooterFilter {
    zone_ratio: f32,
}

impl HeaderFooterFilter {
    /// Create a filter with the given zone size as a fraction of page height.
    pub fn new(zone_ratio: f32) -> Self {
        Self { zone_ratio }
    }

    /// Which zone, if any, a fragment lies entirely within.
    pub fn zone_of(&self, fragment: &TextFragment) -> Option<Zone> {
        let height = fragment.page_height;
        if fragment.bbox.y1 <= height * self.zone_ratio {
            Some(Zone::Top)
        } else if fragment.bbox.y0 >= height * (1.0 - self.zone_ratio) {
            Some(Zone::Bottom)
        } else {
            None
        }
    }

    /// Collect the strings that repeat in the header/footer zones.
    pub fn detect(&self, fragments: &[TextFragment], page_count: u32) -> RunningText {
        let mut pages_by_text: HashMap<String, HashSet<u32>> = HashMap::new();

        for fragment in fragments {
            if self.zone_of(fragment).is_none() {
                continue;
            }
            let text = normalize_text(&fragment.text);
            if text.is_empty() {
                continue;
            }
            pages_by_text.entry(text).or_default().insert(fragment.page);
        }

        let threshold = min_repeat_pages(page_count);
        let flagged: BTreeSet<String> = pages_by_text
            .into_iter()
            .filter(|(_, pages)| pages.len() >= threshold)
            .map(|(text, _)| text)
            .collect();

        if !flagged.is_empty() {
            log::debug!(
                "Flagged {} running header/footer strings (threshold {} of {} pages): {:?}",
                flagged.len(),
                threshold,
                page_count,
                flagged
            );
        }

        RunningText { flagged }
    }
}

/// Page zone a fragment falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Top of the page
    Top,
    /// Bottom of the page
    Bottom,
}

/// The set of strings judged to be running headers or footers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningText {
    flagged: BTreeSet<String>,
}

impl RunningText {
    /// Check whether a (raw) text matches a flagged string.
    pub fn contains(&self, text: &str) -> bool {
        !self.flagged.is_empty() && self.flagged.contains(&normalize_text(text))
    }

    /// Number of flagged strings.
    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    /// Check whether nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    /// Flagged strings, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flagged.iter().map(String::as_str)
    }

    /// The candidate pool: every non-blank fragment that is not a running header or footer.
    ///
    /// A page whose only text is running text ends up with no candidates.
    pub fn retain<'a>(&self, fragments: &'a [TextFragment]) -> Vec<&'a TextFragment> {
        fragments
            .iter()
            .filter(|f| !f.text.trim().is_empty() && !self.contains(&f.text))
            .collect()
    }
}
