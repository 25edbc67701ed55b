//! Leaf document parsing.
//!
//! A leaf may carry `## Read First` and `## Read Next` sections listing other
//! leaves. Those sections are lifted out into [`RelatedArticles`] and removed
//! from the displayed content. Everything works on top-level blocks, so a
//! heading inside a code block can never open or close a section.

use std::ops::Range;

use super::index::first_h1;
use super::links::links_in_lists;
use super::output::{Link, ParsedLeaf, RelatedArticles};
use super::syntax::SyntaxTree;
use super::utils::is_section;

pub const READ_FIRST: &str = "Read First";
pub const READ_NEXT: &str = "Read Next";

/// Block ranges of every H2 section called `name`. Each range starts at the
/// heading and ends before the next heading of depth 2 or less.
fn section_ranges(tree: &SyntaxTree<'_>, name: &str) -> Vec<Range<usize>> {
    let blocks = tree.blocks();
    let mut ranges = Vec::new();

    for (start, block) in blocks.iter().enumerate() {
        if block.heading_level() != Some(2) || !is_section(tree.inline_text(block), name) {
            continue;
        }
        let end = blocks[start + 1..]
            .iter()
            .position(|b| b.heading_level().is_some_and(|level| level <= 2))
            .map_or(blocks.len(), |offset| start + 1 + offset);
        ranges.push(start..end);
    }

    ranges
}

/// Links listed in the first section called `name`.
fn section_links(tree: &SyntaxTree<'_>, ranges: &[Range<usize>]) -> Vec<Link> {
    ranges
        .first()
        .map(|range| links_in_lists(tree, &tree.blocks()[range.start + 1..range.end]))
        .unwrap_or_default()
}

/// Parse a leaf document, separating its content from its related links.
///
/// # Examples
///
/// ```
/// # use self_help::parser::parse_leaf_content;
/// let parsed = parse_leaf_content("# Title\n\nMain content here.\n\n## Read Next\n\n- [Next Steps](./next.md)\n");
/// assert_eq!(parsed.content, "# Title\n\nMain content here.");
/// assert_eq!(parsed.related.read_next[0].href, "./next.md");
/// ```
pub fn parse_leaf_content(content: &str) -> ParsedLeaf {
    let tree = SyntaxTree::parse(content);

    let first = section_ranges(&tree, READ_FIRST);
    let next = section_ranges(&tree, READ_NEXT);

    let related = RelatedArticles {
        read_first: section_links(&tree, &first),
        read_next: section_links(&tree, &next),
    };

    let removed = |index: usize| first.iter().chain(&next).any(|r| r.contains(&index));

    let mut residual = String::with_capacity(content.len());
    let mut title = None;
    for (index, block) in tree.blocks().iter().enumerate() {
        if removed(index) {
            continue;
        }
        if title.is_none() && block.heading_level() == Some(1) {
            title = Some(tree.inline_text(block).to_string());
        }
        residual.push_str(tree.segment(index));
    }

    ParsedLeaf {
        content: residual.trim().to_string(),
        related,
        title,
    }
}

/// Whether a leaf links to any other articles.
pub fn has_related_articles(parsed: &ParsedLeaf) -> bool {
    !parsed.related.read_first.is_empty() || !parsed.related.read_next.is_empty()
}

/// First top-level H1 of a document.
pub fn extract_title(content: &str) -> Option<String> {
    first_h1(&SyntaxTree::parse(content))
}
