//! Parse results shared by the index and leaf parsers.
//!
//! Field names serialize in camelCase so JSON output matches the document
//! format authors already see in lint reports.

use std::fmt;

use serde::Serialize;

/// A list-item link: the visible text and its raw target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Structure of an index document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedIndex {
    pub label: String,
    pub children: Vec<Link>,
}

/// Result of [`parse_index_content`](super::parse_index_content).
///
/// `result` is `None` whenever `errors` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexParse {
    pub result: Option<ParsedIndex>,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedArticles {
    pub read_first: Vec<Link>,
    pub read_next: Vec<Link>,
}

/// Structure of a leaf document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLeaf {
    /// The document with its related-article sections removed, trimmed.
    pub content: String,
    pub related: RelatedArticles,
    /// First top-level H1 of the residual content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A structural problem found in a document.
///
/// The parser leaves `path` empty; callers that know the file fill it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Copy of this error attributed to `path`.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
