//! Style statistics: body style and heading styles.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{Style, StyleProfile, TextFragment};

/// Accumulated usage of one style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleStats {
    /// Total characters set in the style
    pub chars: usize,
    /// Number of fragments set in the style
    pub lines: usize,
}

impl StyleStats {
    /// Add a fragment observation.
    pub fn add(&mut self, text: &str) {
        self.chars += text.trim().chars().count();
        self.lines += 1;
    }

    /// Average characters per fragment.
    pub fn avg_len(&self) -> f32 {
        if self.lines == 0 {
            0.0
        } else {
            self.chars as f32 / self.lines as f32
        }
    }
}

/// Group fragments by style.
pub fn style_stats(fragments: &[&TextFragment]) -> BTreeMap<Style, StyleStats> {
    let mut stats: BTreeMap<Style, StyleStats> = BTreeMap::new();
    for fragment in fragments {
        stats
            .entry(Style::of(fragment))
            .or_default()
            .add(&fragment.text);
    }
    stats
}

/// Derive the body style and up to three heading styles.
///
/// The body style is the style with the most characters among styles whose
/// average fragment length exceeds `min_body_length`, so that numerous short
/// fragments such as list numbers cannot win. If no style is long enough, all
/// styles compete. Returns `None` when there are no fragments.
pub fn build_profile(fragments: &[&TextFragment], min_body_length: f32) -> Option<StyleProfile> {
    let stats = style_stats(fragments);

    let by_volume = |a: &(&Style, &StyleStats), b: &(&Style, &StyleStats)| {
        a.1.chars.cmp(&b.1.chars).then_with(|| b.0.cmp(a.0))
    };
    let body = stats
        .iter()
        .filter(|(_, s)| s.avg_len() > min_body_length)
        .max_by(by_volume)
        .or_else(|| stats.iter().max_by(by_volume))
        .map(|(style, _)| style.clone())?;

    let mut candidates: Vec<(&Style, &StyleStats)> = stats
        .iter()
        .filter(|(style, _)| style.is_more_prominent_than(&body))
        .collect();
    candidates.sort_by(|a, b| prominence_order(a, b));

    let headings: Vec<Style> = candidates
        .into_iter()
        .take(3)
        .map(|(style, _)| style.clone())
        .collect();

    log::debug!(
        "Body style: {} ({} chars); heading styles: [{}]",
        body,
        stats.get(&body).map_or(0, |s| s.chars),
        headings
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Some(StyleProfile::new(body, headings))
}

/// Most prominent first: larger size, then bold, then rarer.
fn prominence_order(a: &(&Style, &StyleStats), b: &(&Style, &StyleStats)) -> Ordering {
    b.0.size()
        .total_cmp(&a.0.size())
        .then_with(|| b.0.is_bold.cmp(&a.0.is_bold))
        .then_with(|| a.1.chars.cmp(&b.1.chars))
        .then_with(|| a.0.cmp(b.0))
}
