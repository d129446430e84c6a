//! Fragment-set input: detection and decoding of serialized documents.
//!
//! A fragment set is JSON, either an object `{"page_count": N, "fragments": [...]}`
//! or a bare array of fragments. Decoded documents are validated before they
//! are returned.

use crate::error::{Error, Result};
use crate::model::{FragmentDocument, TextFragment};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Top-level shape of a serialized fragment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// `{"page_count": N, "fragments": [...]}`
    Document,
    /// `[...]`, page count taken from the fragments
    FragmentArray,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputShape::Document => write!(f, "fragment document"),
            InputShape::FragmentArray => write!(f, "fragment array"),
        }
    }
}

/// UTF-8 byte order mark, tolerated in front of the JSON.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the shape from the first significant byte.
///
/// Returns `Error::Decode` when the data is empty or does not start like JSON
/// object or array.
pub fn detect_shape(data: &[u8]) -> Result<InputShape> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(InputShape::Document),
        Some(b'[') => Ok(InputShape::FragmentArray),
        Some(_) => Err(Error::Decode(
            "expected a JSON object or array of fragments".to_string(),
        )),
        None => Err(Error::Decode("empty input".to_string())),
    }
}

/// Decode and validate a fragment set from bytes.
pub fn read_document_bytes(data: &[u8]) -> Result<FragmentDocument> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let doc = match detect_shape(data)? {
        InputShape::Document => serde_json::from_slice::<FragmentDocument>(data)?,
        InputShape::FragmentArray => {
            FragmentDocument::from_fragments(serde_json::from_slice::<Vec<TextFragment>>(data)?)
        }
    };
    doc.validate()?;
    log::debug!(
        "Decoded {} fragments over {} pages",
        doc.fragments.len(),
        doc.page_count
    );
    Ok(doc)
}

/// Decode and validate a fragment set from a string.
pub fn read_document_str(json: &str) -> Result<FragmentDocument> {
    read_document_bytes(json.as_bytes())
}

/// Decode and validate a fragment set from a reader.
pub fn read_document_reader<R: Read>(mut reader: R) -> Result<FragmentDocument> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    read_document_bytes(&data)
}

/// Decode and validate a fragment set from a file.
///
/// # Example
/// ```no_run
/// use untoc::input::read_document_file;
///
/// let doc = read_document_file("report.fragments.json").unwrap();
/// println!("{} fragments", doc.fragments.len());
/// ```
pub fn read_document_file<P: AsRef<Path>>(path: P) -> Result<FragmentDocument> {
    read_document_reader(BufReader::new(File::open(path)?))
}

/// Check whether a file looks like a fragment set without decoding it fully.
pub fn is_fragment_file<P: AsRef<Path>>(path: P) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut head = Vec::with_capacity(64);
    if file.take(64).read_to_end(&mut head).is_err() {
        return false;
    }
    detect_shape(&head).is_ok()
}
