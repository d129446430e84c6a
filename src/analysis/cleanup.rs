//! Thresholding, level assignment and outline cleanup.

use std::collections::HashSet;

use super::header_footer::RunningText;
use super::patterns::{
    ends_with_sentence_period, is_artifact, is_caption_or_toc, is_meaningful_heading,
    is_non_alphabetic,
};
use super::scoring::HeadingCandidate;
use crate::model::{HeadingLevel, OutlineEntry, StyleProfile};

/// Level of an accepted candidate.
///
/// Numbering depth wins over a heading-style match; a candidate with neither
/// signal gets no level.
pub fn assign_level(candidate: &HeadingCandidate<'_>, profile: &StyleProfile) -> Option<HeadingLevel> {
    HeadingLevel::from_depth(candidate.numbering_depth)
        .or_else(|| profile.level_of(&candidate.style))
}

/// Set levels on candidates scoring strictly above `threshold`. Returns how many got a level.
pub fn classify_candidates(
    candidates: &mut [HeadingCandidate<'_>],
    profile: &StyleProfile,
    threshold: f32,
) -> usize {
    let mut leveled = 0;
    for candidate in candidates.iter_mut() {
        candidate.level = if candidate.score > threshold {
            assign_level(candidate, profile)
        } else {
            None
        };
        if candidate.level.is_some() {
            leveled += 1;
        }
    }
    leveled
}

/// Whether heading text still has a shape that must never reach the outline.
pub fn is_rejected_shape(text: &str, running: &RunningText) -> bool {
    running.contains(text)
        || is_artifact(text)
        || is_caption_or_toc(text)
        || is_non_alphabetic(text)
        || ends_with_sentence_period(text)
        || !is_meaningful_heading(text)
}

/// Build the final outline from classified candidates.
///
/// Entries are ordered by page and vertical position. Leftover artifacts are
/// dropped, back-to-back repeats of the same text, level and page are
/// collapsed, and a given text appears at most once per page. A heading that
/// recurs on the next page is kept.
pub fn build_outline(candidates: &[HeadingCandidate<'_>], running: &RunningText) -> Vec<OutlineEntry> {
    let mut leveled: Vec<(&HeadingCandidate<'_>, HeadingLevel)> = candidates
        .iter()
        .filter_map(|c| c.level.map(|level| (c, level)))
        .collect();
    leveled.sort_by(|a, b| a.0.fragment.reading_order(b.0.fragment));

    let mut outline: Vec<OutlineEntry> = Vec::with_capacity(leveled.len());
    let mut seen: HashSet<(String, u32)> = HashSet::new();

    for (candidate, level) in leveled {
        if is_rejected_shape(&candidate.text, running) {
            continue;
        }
        if outline
            .last()
            .is_some_and(|prev| {
                prev.level == level
                    && prev.page == candidate.fragment.page
                    && prev.text == candidate.text
            })
        {
            continue;
        }
        if !seen.insert((candidate.text.clone(), candidate.fragment.page)) {
            continue;
        }
        outline.push(OutlineEntry::new(
            level,
            candidate.text.clone(),
            candidate.fragment.page,
        ));
    }

    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify::TEXT_HEAVY_WEIGHTS;
    use crate::analysis::scoring::HeadingScorer;
    use crate::model::{BBox, Style, TextFragment};

    fn profile() -> StyleProfile {
        StyleProfile::new(
            Style::new("Times-Roman", 11.0, false),
            vec![
                Style::new("Times-Bold", 18.0, true),
                Style::new("Times-Bold", 14.0, true),
            ],
        )
    }

    fn styled(text: &str, page: u32, y0: f32, size: f32, bold: bool) -> TextFragment {
        let font = if bold { "Times-Bold" } else { "Times-Roman" };
        let f = TextFragment::new(text, page, font, size, BBox::new(72.0, y0, 400.0, y0 + size));
        if bold {
            f.bold()
        } else {
            f
        }
    }

    fn scored<'a>(fragments: &'a [TextFragment], profile: &StyleProfile) -> Vec<HeadingCandidate<'a>> {
        let scorer = HeadingScorer::new(profile, &TEXT_HEAVY_WEIGHTS);
        fragments.iter().map(|f| scorer.score(f, None)).collect()
    }

    #[test]
    fn test_numbering_wins_over_style() {
        let profile = profile();
        // H2 style, but numbered at depth 1
        let fragments = vec![styled("1 Overview", 1, 100.0, 14.0, true)];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 30.0);
        assert_eq!(candidates[0].level, Some(HeadingLevel::H1));
    }

    #[test]
    fn test_style_level_without_numbering() {
        let profile = profile();
        let fragments = vec![
            styled("Overview", 1, 100.0, 18.0, true),
            styled("Details", 1, 200.0, 14.0, true),
        ];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 30.0);
        assert_eq!(candidates[0].level, Some(HeadingLevel::H1));
        assert_eq!(candidates[1].level, Some(HeadingLevel::H2));
    }

    #[test]
    fn test_body_style_numbering_depth_three() {
        let profile = profile();
        let fragments = vec![styled("1.2.3 Deep Subsection", 1, 100.0, 11.0, false)];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 30.0);
        assert_eq!(candidates[0].level, Some(HeadingLevel::H3));
    }

    #[test]
    fn test_score_alone_is_not_enough() {
        let profile = profile();
        // bold 16pt: large score, but neither a heading style nor numbered
        let fragments = vec![styled("Unmapped Heading", 1, 100.0, 16.0, true)];
        let mut candidates = scored(&fragments, &profile);
        assert!(candidates[0].score > 30.0);
        assert_eq!(classify_candidates(&mut candidates, &profile, 30.0), 0);
        assert_eq!(candidates[0].level, None);
    }

    #[test]
    fn test_below_threshold_discarded() {
        let profile = profile();
        let fragments = vec![styled("Overview", 1, 100.0, 18.0, true)];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 1000.0);
        assert_eq!(candidates[0].level, None);
        assert!(build_outline(&candidates, &RunningText::default()).is_empty());
    }

    #[test]
    fn test_outline_order_and_dedup() {
        let profile = profile();
        let fragments = vec![
            styled("Methods", 2, 300.0, 18.0, true),
            styled("Overview", 1, 400.0, 18.0, true),
            styled("Overview", 1, 420.0, 18.0, true),
            styled("Background", 1, 100.0, 14.0, true),
            styled("Methods", 3, 100.0, 18.0, true),
        ];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 30.0);
        let outline = build_outline(&candidates, &RunningText::default());

        let got: Vec<(&str, u32, HeadingLevel)> = outline
            .iter()
            .map(|e| (e.text.as_str(), e.page, e.level))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Background", 1, HeadingLevel::H2),
                ("Overview", 1, HeadingLevel::H1),
                ("Methods", 2, HeadingLevel::H1),
                ("Methods", 3, HeadingLevel::H1),
            ]
        );
    }

    #[test]
    fn test_same_text_same_page_kept_once() {
        let profile = profile();
        let fragments = vec![
            styled("Overview", 1, 100.0, 18.0, true),
            styled("Summary Notes", 1, 200.0, 14.0, true),
            styled("Overview", 1, 300.0, 18.0, true),
        ];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 30.0);
        let outline = build_outline(&candidates, &RunningText::default());
        assert_eq!(outline.len(), 2);
    }

    #[test]
    fn test_rejected_shapes() {
        let running = RunningText::default();
        assert!(is_rejected_shape("Page 4", &running));
        assert!(is_rejected_shape("Table 3 Costs", &running));
        assert!(is_rejected_shape("12.5", &running));
        assert!(is_rejected_shape("Hi", &running));
        assert!(is_rejected_shape("2 Results are summarized below.", &running));
        assert!(!is_rejected_shape("Results", &running));
        assert!(!is_rejected_shape("Notes...", &running));
    }

    #[test]
    fn test_sentence_heading_dropped_from_outline() {
        let profile = profile();
        let fragments = vec![
            styled("2 Results are summarized below.", 1, 100.0, 18.0, true),
            styled("3 Discussion", 1, 300.0, 18.0, true),
        ];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 30.0);
        assert_eq!(candidates[0].level, Some(HeadingLevel::H1));

        let outline = build_outline(&candidates, &RunningText::default());
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "3 Discussion");
    }

    #[test]
    fn test_heading_repeated_on_next_page_kept() {
        let profile = profile();
        let fragments = vec![
            styled("Chapter Summary", 2, 600.0, 18.0, true),
            styled("Chapter Summary", 3, 80.0, 18.0, true),
        ];
        let mut candidates = scored(&fragments, &profile);
        classify_candidates(&mut candidates, &profile, 30.0);
        let outline = build_outline(&candidates, &RunningText::default());

        let pages: Vec<u32> = outline.iter().map(|e| e.page).collect();
        assert_eq!(pages, vec![2, 3]);
    }
}
