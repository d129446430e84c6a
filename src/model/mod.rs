//! Document model types for outline inference.
//!
//! The input side is a flat set of positioned, styled text fragments; the
//! output side is an [`OutlineResult`]. Styles and style profiles sit in
//! between and are derived from the fragments.

mod fragment;
mod outline;
mod style;

pub use fragment::{BBox, FragmentDocument, TextFragment};
pub use outline::{OutlineEntry, OutlineResult};
pub use style::{HeadingLevel, Style, StyleProfile};
