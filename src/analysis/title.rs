//! Title selection from the first page.

use super::classify::ScoringWeights;
use super::header_footer::RunningText;
use super::patterns::{
    ends_with_sentence_period, is_artifact, is_caption_or_toc, is_non_alphabetic, normalize_text,
};
use crate::model::TextFragment;

/// Shortest title, in characters.
pub const MIN_TITLE_CHARS: usize = 4;

/// Longest title, in characters.
pub const MAX_TITLE_CHARS: usize = 150;

/// Weights of the title score terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleWeights {
    /// Points for font size relative to the largest size in the document
    pub size: f32,
    /// Points for bold text
    pub bold: f32,
    /// Points for sitting at the very top of the page
    pub position: f32,
}

/// Default title score weights.
pub const TITLE_WEIGHTS: TitleWeights = TitleWeights {
    size: 60.0,
    bold: 20.0,
    position: 20.0,
};

/// The fragment chosen as title.
#[derive(Debug, Clone, Copy)]
pub struct TitleChoice<'a> {
    /// The title fragment
    pub fragment: &'a TextFragment,
    /// Its title score
    pub score: f32,
}

impl TitleChoice<'_> {
    /// Title text, whitespace-normalized.
    pub fn text(&self) -> String {
        normalize_text(&self.fragment.text)
    }
}

/// Title score of a fragment given the largest font size in the document.
pub fn title_score(fragment: &TextFragment, max_font_size: f32, weights: &TitleWeights) -> f32 {
    let size = if max_font_size > 0.0 {
        fragment.font_size / max_font_size
    } else {
        0.0
    };
    let bold = if fragment.is_bold { 1.0 } else { 0.0 };
    weights.size * size + weights.bold * bold + weights.position * (1.0 - fragment.relative_top())
}

/// Whether a text may serve as a title at all.
pub fn is_title_candidate(text: &str, running: &RunningText) -> bool {
    let len = text.chars().count();
    (MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&len)
        && !ends_with_sentence_period(text)
        && !is_non_alphabetic(text)
        && !is_artifact(text)
        && !is_caption_or_toc(text)
        && !running.contains(text)
}

/// Select the title among the first `scan_limit` page-1 fragments of the pool.
///
/// Ties go to the fragment higher on the page, then further left. Returns
/// `None` when nothing qualifies or the best score does not exceed
/// `weights.title_min_score`.
pub fn select_title<'a>(
    pool: &[&'a TextFragment],
    running: &RunningText,
    scan_limit: usize,
    weights: &ScoringWeights,
) -> Option<TitleChoice<'a>> {
    let max_font_size = pool.iter().map(|f| f.font_size).fold(0.0_f32, f32::max);

    let mut first_page: Vec<&'a TextFragment> =
        pool.iter().copied().filter(|f| f.page == 1).collect();
    first_page.sort_by(|a, b| a.reading_order(b));

    let mut best: Option<TitleChoice<'a>> = None;
    for fragment in first_page.into_iter().take(scan_limit) {
        let text = normalize_text(&fragment.text);
        if !is_title_candidate(&text, running) {
            continue;
        }
        let score = title_score(fragment, max_font_size, &TITLE_WEIGHTS);
        if best.map_or(true, |b| score > b.score) {
            best = Some(TitleChoice { fragment, score });
        }
    }

    match best {
        Some(choice) if choice.score > weights.title_min_score => {
            log::debug!("Title: {:?} (score {:.1})", choice.text(), choice.score);
            Some(choice)
        }
        Some(choice) => {
            log::debug!(
                "Best title candidate {:?} scored {:.1}, below {:.1}",
                choice.text(),
                choice.score,
                weights.title_min_score
            );
            None
        }
        None => None,
    }
}
