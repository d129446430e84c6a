//! Typographic styles and heading levels.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TextFragment;

/// Typographic identity of a fragment: font, rounded size and weight.
///
/// Sizes are kept in tenths of a point so the style can be used as a hash key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Style {
    /// Font name
    pub font_name: String,
    size_tenths: i32,
    /// Whether the font is bold
    pub is_bold: bool,
}

impl Style {
    /// Create a style, rounding the size to 0.1pt.
    pub fn new(font_name: impl Into<String>, font_size: f32, is_bold: bool) -> Self {
        Self {
            font_name: font_name.into(),
            size_tenths: (font_size * 10.0).round() as i32,
            is_bold,
        }
    }

    /// The style of a fragment.
    pub fn of(fragment: &TextFragment) -> Self {
        Self::new(
            fragment.font_name.as_str(),
            fragment.font_size,
            fragment.is_bold,
        )
    }

    /// Rounded font size in points.
    pub fn size(&self) -> f32 {
        self.size_tenths as f32 / 10.0
    }

    /// Whether this style stands out from `body`: strictly larger, or at least as
    /// large and bold where body is not.
    pub fn is_more_prominent_than(&self, body: &Style) -> bool {
        self.size_tenths > body.size_tenths
            || (self.size_tenths >= body.size_tenths && self.is_bold && !body.is_bold)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}pt", self.font_name, self.size())?;
        if self.is_bold {
            write!(f, " bold")?;
        }
        Ok(())
    }
}

/// Outline heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Section heading
    H2,
    /// Subsection heading
    H3,
}

impl HeadingLevel {
    /// All levels, most prominent first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Level for a numbering depth; depths beyond 3 collapse into H3.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            0 => None,
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            _ => Some(HeadingLevel::H3),
        }
    }

    /// Level at a zero-based rank in the heading style list.
    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    /// Label used in serialized outlines.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body style and up to three heading styles of a document.
///
/// Built once per document and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleProfile {
    body: Style,
    headings: Vec<Style>,
}

impl StyleProfile {
    /// Create a profile. Heading styles that are not more prominent than the body,
    /// repeated styles and styles beyond the third are dropped.
    pub fn new(body: Style, headings: Vec<Style>) -> Self {
        let mut kept: Vec<Style> = Vec::with_capacity(3);
        for style in headings {
            if kept.len() == HeadingLevel::ALL.len() {
                break;
            }
            if style.is_more_prominent_than(&body) && !kept.contains(&style) {
                kept.push(style);
            }
        }
        Self {
            body,
            headings: kept,
        }
    }

    /// The style of running text.
    pub fn body(&self) -> &Style {
        &self.body
    }

    /// Heading styles, H1 first.
    pub fn headings(&self) -> &[Style] {
        &self.headings
    }

    /// Heading level mapped to a style, if any.
    pub fn level_of(&self, style: &Style) -> Option<HeadingLevel> {
        self.headings
            .iter()
            .position(|s| s == style)
            .and_then(HeadingLevel::from_rank)
    }

    /// Style mapped to a level, if any.
    pub fn style_for(&self, level: HeadingLevel) -> Option<&Style> {
        self.headings.get(level as usize)
    }
}
