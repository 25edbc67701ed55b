//! Structural markdown parsing.
//!
//! Index documents define a branch: an H1 label and a list of child links.
//! Leaf documents hold an answer and may point at related leaves through
//! `## Read First` and `## Read Next` sections. Both parsers work on a syntax
//! tree built by `pulldown-cmark`, never on raw lines, so code blocks are
//! always inert.

pub mod index;
pub mod leaf;
pub mod links;
pub mod output;
pub mod syntax;
pub mod utils;

pub use index::{parse_index_content, validate_parsed_index};
pub use leaf::{extract_title, has_related_articles, parse_leaf_content};
pub use links::extract_list_links;
pub use output::{IndexParse, Link, ParsedIndex, ParsedLeaf, RelatedArticles, ValidationError};
pub use syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

use std::path::Path;

/// Read and parse an index file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_index_file(path: &Path) -> std::io::Result<IndexParse> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_index_content(&content))
}

/// Read and parse a leaf file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_leaf_file(path: &Path) -> std::io::Result<ParsedLeaf> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_leaf_content(&content))
}
