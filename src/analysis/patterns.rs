//! Pattern tables and pure text predicates used by every analysis stage.
//!
//! All predicates take already-normalized text (see [`normalize_text`]).

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Structural keywords that commonly open a section heading.
pub const HEADING_KEYWORDS: &[&str] = &[
    "abstract",
    "acknowledgements",
    "acknowledgments",
    "appendix",
    "background",
    "bibliography",
    "conclusion",
    "conclusions",
    "contents",
    "discussion",
    "glossary",
    "introduction",
    "methodology",
    "methods",
    "outlook",
    "overview",
    "preamble",
    "references",
    "results",
    "summary",
    "timeline",
];

/// Short words that may stay lowercase inside Title-Case text.
pub const TITLE_CASE_MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "of", "on", "or", "the", "to",
    "vs", "with",
];

/// How many leading words are checked against [`HEADING_KEYWORDS`].
pub const KEYWORD_WINDOW: usize = 3;

/// Deepest numbering level reported.
pub const MAX_NUMBERING_DEPTH: u8 = 3;

lazy_static! {
    /// "1", "1.2", "2.1.3" followed by `.`/`)` or whitespace and the heading text.
    static ref RE_NUMBERING: Regex =
        Regex::new(r"^(\d{1,2}(?:\.\d{1,2})*)(?:[.)]\s*|\s+)([^\d\s.].*)$").unwrap();

    /// Running headers, page numbers and other layout furniture.
    static ref ARTIFACT_PATTERNS: Vec<Regex> = [
        // "12", "Page 3", "page 3 of 10"
        r"(?i)^(?:page\s+)?\d+(?:\s+of\s+\d+)?$",
        // "3."
        r"^\d+\.$",
        // "3-4", "3 / 10"
        r"^\d+\s*[-/–]\s*\d+$",
        // dates
        r"^\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}$",
        r"(?i)copyright|©|all rights reserved",
        // "(a)", "b)"
        r"(?i)^\(?[a-z]\)$",
        // punctuation, leaders and symbols only
        r"^[\p{P}\p{S}\s]+$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Roman page numbers up to 49, either case.
    static ref RE_ROMAN_PAGE: Regex =
        Regex::new(r"(?i)^(?:xl|l?x{0,3})(?:ix|iv|v?i{0,3})\.?$").unwrap();

    /// Figure/table captions and table-of-contents lines.
    static ref CAPTION_PATTERNS: Vec<Regex> = [
        r"(?i)^(?:figure|fig\.|table|chart|exhibit|plate|illustration)\s*\d",
        // dot leaders followed by a page number
        r"(?:[.…·]\s*){3,}\d+$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Normalize text for comparison: NFC, collapsed whitespace, trimmed. Case is preserved.
pub fn normalize_text(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A leading hierarchical section number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbering<'t> {
    /// Number of numeric components, clamped to 1..=3
    pub depth: u8,
    /// Heading text after the number
    pub remainder: &'t str,
}

/// Match a leading section number such as `2.1.3 Scope`.
///
/// The text after the number must contain a letter and must not start with a
/// digit, so bare numbers, decimal values and "1. 2024 Outlook" never match.
pub fn parse_numbering(text: &str) -> Option<Numbering<'_>> {
    let caps = RE_NUMBERING.captures(text)?;
    let number = caps.get(1)?.as_str();
    let remainder = caps.get(2)?.as_str().trim();
    if !has_letters(remainder) {
        return None;
    }
    let components = number.split('.').count().min(MAX_NUMBERING_DEPTH as usize);
    Some(Numbering {
        depth: components as u8,
        remainder,
    })
}

/// Text with any leading section number removed.
pub fn strip_numbering(text: &str) -> &str {
    parse_numbering(text).map_or(text, |n| n.remainder)
}

/// Capitalization style of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capitalization {
    /// Every letter uppercase
    AllCaps,
    /// Every significant word starts with an uppercase letter
    TitleCase,
    /// Anything else
    Mixed,
}

/// Classify capitalization, ignoring digits and punctuation.
pub fn capitalization(text: &str) -> Capitalization {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        return Capitalization::AllCaps;
    }

    let mut words = text
        .split_whitespace()
        .filter(|w| w.chars().next().is_some_and(char::is_alphabetic))
        .peekable();
    if words.peek().is_none() {
        return Capitalization::Mixed;
    }

    let title_case = words.enumerate().all(|(i, word)| {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        starts_upper || (i > 0 && TITLE_CASE_MINOR_WORDS.contains(&word.to_lowercase().as_str()))
    });
    if title_case {
        Capitalization::TitleCase
    } else {
        Capitalization::Mixed
    }
}

/// Whether one of the leading words is a structural keyword.
pub fn starts_with_keyword(text: &str) -> bool {
    text.split_whitespace()
        .take(KEYWORD_WINDOW)
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .any(|w| HEADING_KEYWORDS.contains(&w.as_str()))
}

/// Whether the text has the shape of a running header, page number or similar artifact.
pub fn is_artifact(text: &str) -> bool {
    is_roman_page_number(text) || ARTIFACT_PATTERNS.iter().any(|re| re.is_match(text))
}

/// "iv", "XII." and the like. Mixed case such as "Liv" is a word, not a numeral.
pub fn is_roman_page_number(text: &str) -> bool {
    let numeral = text.strip_suffix('.').unwrap_or(text);
    if numeral.is_empty() {
        return false;
    }
    let single_case = numeral.chars().all(|c| c.is_ascii_uppercase())
        || numeral.chars().all(|c| c.is_ascii_lowercase());
    single_case && RE_ROMAN_PAGE.is_match(text)
}

/// Whether the text looks like a caption or a table-of-contents line.
pub fn is_caption_or_toc(text: &str) -> bool {
    CAPTION_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Whether the text contains at least one letter.
pub fn has_letters(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

/// Whether the text is made of digits and punctuation only.
pub fn is_non_alphabetic(text: &str) -> bool {
    !text.is_empty() && !has_letters(text)
}

/// Whether the text ends like a sentence. Ellipses and leaders do not count.
pub fn ends_with_sentence_period(text: &str) -> bool {
    text.ends_with('.') && !text.ends_with("..")
}

/// Whether the text ends with a colon, as form labels do.
pub fn ends_with_colon(text: &str) -> bool {
    text.ends_with(':')
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Final sanity check on heading text.
///
/// Requires a letter; numbered headings need at least three characters after
/// the number, single words at least three characters.
pub fn is_meaningful_heading(text: &str) -> bool {
    if !has_letters(text) {
        return false;
    }
    if let Some(numbering) = parse_numbering(text) {
        return numbering.remainder.chars().count() >= 3;
    }
    if word_count(text) == 1 {
        return text.chars().count() >= 3;
    }
    true
}
