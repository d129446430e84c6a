//! Heading-likelihood scoring.
//!
//! Every fragment in the candidate pool except the title gets an additive score
//! built from independent feature terms. Nothing is discarded here.

use super::classify::ScoringWeights;
use super::patterns::{
    capitalization, ends_with_colon, ends_with_sentence_period, is_artifact, is_caption_or_toc,
    is_non_alphabetic, normalize_text, parse_numbering, starts_with_keyword, word_count,
    Capitalization,
};
use crate::model::{HeadingLevel, Style, StyleProfile, TextFragment};

/// Per-feature contributions to a heading score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureScores {
    /// Relative font size above body size
    pub size: f32,
    /// Bold weight
    pub bold: f32,
    /// Leading section number
    pub numbering: f32,
    /// ALL-CAPS or Title-Case
    pub capitalization: f32,
    /// Structural keyword
    pub keyword: f32,
    /// Extra whitespace above
    pub spacing: f32,
    /// Sum of all penalties (positive number, subtracted)
    pub penalty: f32,
}

impl FeatureScores {
    /// The heading score.
    pub fn total(&self) -> f32 {
        self.size + self.bold + self.numbering + self.capitalization + self.keyword + self.spacing
            - self.penalty
    }
}

/// A fragment under consideration for the outline.
#[derive(Debug, Clone)]
pub struct HeadingCandidate<'a> {
    /// Source fragment
    pub fragment: &'a TextFragment,
    /// Normalized text
    pub text: String,
    /// Style of the fragment
    pub style: Style,
    /// Feature breakdown
    pub features: FeatureScores,
    /// Sum of the features
    pub score: f32,
    /// Section numbering depth, 0 when unnumbered
    pub numbering_depth: u8,
    /// Level, set once the candidate is accepted and classified
    pub level: Option<HeadingLevel>,
}

/// Scores fragments against a style profile using one class's weights.
pub struct HeadingScorer<'p> {
    profile: &'p StyleProfile,
    weights: &'p ScoringWeights,
}

impl<'p> HeadingScorer<'p> {
    /// Create a new scorer.
    pub fn new(profile: &'p StyleProfile, weights: &'p ScoringWeights) -> Self {
        Self { profile, weights }
    }

    /// Score every pool fragment except `title`, in reading order.
    ///
    /// Spacing is measured against the previous fragment on the same page,
    /// which may be the title itself.
    pub fn score_all<'a>(
        &self,
        pool: &[&'a TextFragment],
        title: Option<&TextFragment>,
    ) -> Vec<HeadingCandidate<'a>> {
        let mut ordered: Vec<&'a TextFragment> = pool.to_vec();
        ordered.sort_by(|a, b| a.reading_order(b));

        let mut candidates = Vec::with_capacity(ordered.len());
        let mut previous: Option<&TextFragment> = None;
        for fragment in ordered {
            let is_title = title.is_some_and(|t| std::ptr::eq(t, fragment));
            if !is_title {
                let above = previous.filter(|p| p.page == fragment.page);
                candidates.push(self.score(fragment, above));
            }
            previous = Some(fragment);
        }
        candidates
    }

    /// Score one fragment. `above` is the fragment preceding it on the same page.
    pub fn score<'a>(
        &self,
        fragment: &'a TextFragment,
        above: Option<&TextFragment>,
    ) -> HeadingCandidate<'a> {
        let w = self.weights;
        let text = normalize_text(&fragment.text);
        let style = Style::of(fragment);
        let mut features = FeatureScores::default();

        let body_size = self.profile.body().size();
        if body_size > 0.0 {
            let relative = (style.size() / body_size - 1.0).clamp(0.0, w.size_cap);
            features.size = relative * w.size_weight;
        }

        if fragment.is_bold {
            features.bold = w.bold_bonus;
        }

        let numbering = parse_numbering(&text);
        let numbering_depth = numbering.map_or(0, |n| n.depth);
        if numbering.is_some() {
            features.numbering = w.numbering_bonus;
        }
        let remainder = numbering.map_or(text.as_str(), |n| n.remainder);

        features.capitalization = match capitalization(remainder) {
            Capitalization::AllCaps => w.all_caps_bonus,
            Capitalization::TitleCase => w.title_case_bonus,
            Capitalization::Mixed => 0.0,
        };

        if starts_with_keyword(remainder) {
            features.keyword = w.keyword_bonus;
        }

        if let Some(above) = above {
            features.spacing = self.spacing_bonus(fragment, above);
        }

        features.penalty = self.penalties(&text, remainder);

        HeadingCandidate {
            fragment,
            score: features.total(),
            text,
            style,
            features,
            numbering_depth,
            level: None,
        }
    }

    /// Bonus for whitespace above the fragment beyond ordinary line spacing.
    fn spacing_bonus(&self, fragment: &TextFragment, above: &TextFragment) -> f32 {
        let w = self.weights;
        let gap = (fragment.bbox.y0 - above.bbox.y1) / fragment.font_size;
        let excess = gap - w.spacing_threshold;
        if excess > 0.0 {
            (excess * w.spacing_weight).min(w.spacing_cap)
        } else {
            0.0
        }
    }

    fn penalties(&self, text: &str, remainder: &str) -> f32 {
        let w = self.weights;
        let mut penalty = 0.0;
        if ends_with_sentence_period(text) {
            penalty += w.terminal_period_penalty;
        }
        if is_non_alphabetic(text) {
            penalty += w.non_alpha_penalty;
        }
        if remainder.chars().count() < w.min_heading_chars {
            penalty += w.short_text_penalty;
        }
        if is_caption_or_toc(text) {
            penalty += w.caption_penalty;
        }
        if is_artifact(text) {
            penalty += w.artifact_penalty;
        }
        if word_count(text) > w.max_heading_words {
            penalty += w.long_text_penalty;
        }
        if ends_with_colon(text) {
            penalty += w.label_colon_penalty;
        }
        penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify::{SPARSE_WEIGHTS, TEXT_HEAVY_WEIGHTS};
    use crate::model::BBox;

    fn profile() -> StyleProfile {
        StyleProfile::new(
            Style::new("Times-Roman", 11.0, false),
            vec![
                Style::new("Times-Bold", 16.0, true),
                Style::new("Times-Bold", 13.0, true),
            ],
        )
    }

    fn body(text: &str, y0: f32) -> TextFragment {
        TextFragment::new(text, 1, "Times-Roman", 11.0, BBox::new(72.0, y0, 540.0, y0 + 12.0))
    }

    fn heading(text: &str, size: f32, y0: f32) -> TextFragment {
        TextFragment::new(text, 1, "Times-Bold", size, BBox::new(72.0, y0, 400.0, y0 + size))
            .bold()
    }

    #[test]
    fn test_relative_size_is_monotonic_and_capped() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let sizes = [13.0, 16.0, 40.0, 8.0].map(|size| heading("Scope", size, 100.0));
        let [s13, s16, s40, s8] = [0, 1, 2, 3].map(|i| scorer.score(&sizes[i], None).features.size);
        assert!(s13 < s16 && s16 < s40);
        assert!((s40 - TEXT_HEAVY_WEIGHTS.size_weight * TEXT_HEAVY_WEIGHTS.size_cap).abs() < 1e-3);
        assert_eq!(s8, 0.0);
    }

    #[test]
    fn test_bold_weighted_by_class() {
        let profile = profile();
        let fragment = heading("Scope", 11.0, 100.0);
        let heavy = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS).score(&fragment, None);
        let sparse = HeadingScorer::new(&profile, &SPARSE_WEIGHTS).score(&fragment, None);
        assert!(heavy.features.bold > sparse.features.bold);
    }

    #[test]
    fn test_numbering_depth_and_bonus() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);

        let deep = body("1.2.3 Deep Subsection", 300.0);
        let c = scorer.score(&deep, None);
        assert_eq!(c.numbering_depth, 3);
        assert_eq!(c.features.numbering, TEXT_HEAVY_WEIGHTS.numbering_bonus);
        assert_eq!(c.features.capitalization, TEXT_HEAVY_WEIGHTS.title_case_bonus);
        assert!(c.score > TEXT_HEAVY_WEIGHTS.acceptance_threshold);

        let scope = body("2 Scope", 300.0);
        let c = scorer.score(&scope, None);
        assert_eq!(c.numbering_depth, 1);
        assert_eq!(c.features.numbering, TEXT_HEAVY_WEIGHTS.numbering_bonus);

        let plain = body("Scope of work", 300.0);
        let c = scorer.score(&plain, None);
        assert_eq!(c.numbering_depth, 0);
        assert_eq!(c.features.numbering, 0.0);
    }

    #[test]
    fn test_capitalization_bonus() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let fragments = [
            body("RISK FACTORS", 300.0),
            body("Risk Factors", 300.0),
            body("Risk factors", 300.0),
        ];
        let caps = scorer.score(&fragments[0], None);
        let title = scorer.score(&fragments[1], None);
        let mixed = scorer.score(&fragments[2], None);
        assert!(caps.features.capitalization > title.features.capitalization);
        assert!(title.features.capitalization > mixed.features.capitalization);
        assert_eq!(mixed.features.capitalization, 0.0);
    }

    #[test]
    fn test_keyword_bonus_once() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let summary = body("Summary and Conclusion", 300.0);
        let c = scorer.score(&summary, None);
        assert_eq!(c.features.keyword, TEXT_HEAVY_WEIGHTS.keyword_bonus);
        let intro = body("3 Introduction", 300.0);
        let c = scorer.score(&intro, None);
        assert_eq!(c.features.keyword, TEXT_HEAVY_WEIGHTS.keyword_bonus);
    }

    #[test]
    fn test_spacing_bonus() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let above = body("previous line of text", 100.0);

        // next line directly below: gap 2pt
        let tight = body("Tight", 114.0);
        let tight = scorer.score(&tight, Some(&above));
        assert_eq!(tight.features.spacing, 0.0);

        // 22pt gap on an 11pt line: 2.0 - 0.8 = 1.2 units of excess
        let loose = body("Loose", 134.0);
        let loose = scorer.score(&loose, Some(&above));
        assert!((loose.features.spacing - 12.0).abs() < 1e-3);

        let far = body("Far", 500.0);
        let huge = scorer.score(&far, Some(&above));
        assert_eq!(huge.features.spacing, TEXT_HEAVY_WEIGHTS.spacing_cap);
    }

    #[test]
    fn test_page_number_is_penalized() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let number = heading("42", 16.0, 100.0);
        let c = scorer.score(&number, None);
        assert!(c.score < TEXT_HEAVY_WEIGHTS.acceptance_threshold);
        assert!(c.features.penalty >= TEXT_HEAVY_WEIGHTS.non_alpha_penalty);
    }

    #[test]
    fn test_caption_and_sentence_penalties() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let fragments = [
            body("Figure 2 Throughput", 300.0),
            body("Introduction ........ 3", 300.0),
            body("This ends like a sentence.", 300.0),
        ];
        let caption = scorer.score(&fragments[0], None);
        assert!(caption.features.penalty >= TEXT_HEAVY_WEIGHTS.caption_penalty);

        let toc = scorer.score(&fragments[1], None);
        assert!(toc.features.penalty >= TEXT_HEAVY_WEIGHTS.caption_penalty);

        let sentence = scorer.score(&fragments[2], None);
        assert_eq!(
            sentence.features.penalty,
            TEXT_HEAVY_WEIGHTS.terminal_period_penalty
        );
    }

    #[test]
    fn test_short_text_penalty_after_numbering() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let short = body("4 Go", 300.0);
        let c = scorer.score(&short, None);
        assert_eq!(c.numbering_depth, 1);
        assert!(c.features.penalty >= TEXT_HEAVY_WEIGHTS.short_text_penalty);
    }

    #[test]
    fn test_score_all_skips_title_and_orders() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let fragments = vec![
            body("second line", 200.0),
            heading("Document Title", 16.0, 50.0),
            body("first line", 120.0),
        ];
        let pool: Vec<&TextFragment> = fragments.iter().collect();
        let candidates = scorer.score_all(&pool, Some(&fragments[1]));
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first line", "second line"]);
        // spacing of the first line is measured against the title above it
        assert!(candidates[0].features.spacing > 0.0);
    }

    #[test]
    fn test_spacing_not_measured_across_pages() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &TEXT_HEAVY_WEIGHTS);
        let mut next_page = body("Top Of Next Page", 500.0);
        next_page.page = 2;
        let fragments = vec![body("end of page one", 100.0), next_page];
        let pool: Vec<&TextFragment> = fragments.iter().collect();
        let candidates = scorer.score_all(&pool, None);
        assert_eq!(candidates[1].features.spacing, 0.0);
    }

    #[test]
    fn test_score_is_sum_of_features() {
        let profile = profile();
        let scorer = HeadingScorer::new(&profile, &SPARSE_WEIGHTS);
        let intro = heading("1 INTRODUCTION", 16.0, 100.0);
        let c = scorer.score(&intro, None);
        assert!((c.score - c.features.total()).abs() < 1e-6);
        assert!(c.features.size > 0.0 && c.features.bold > 0.0 && c.features.keyword > 0.0);
    }
}
