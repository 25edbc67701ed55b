//! Link extraction from list blocks.
//!
//! Only links that sit inside list items count. Prose links, images and
//! anything inside code are ignored because they never become link nodes in
//! the syntax tree in the first place.

use super::output::Link;
use super::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

/// Collect every link below `node`, depth first, in document order.
///
/// Nested lists and links wrapped in emphasis are included.
pub fn collect_links(tree: &SyntaxTree<'_>, node: &SyntaxNode, links: &mut Vec<Link>) {
    if let SyntaxKind::Link { href } = &node.kind {
        links.push(Link::new(tree.inline_text(node), href.clone()));
    }
    for child in &node.children {
        collect_links(tree, child, links);
    }
}

/// Links from the given top-level blocks, taken from list blocks only.
pub fn links_in_lists<'t>(
    tree: &SyntaxTree<'_>,
    blocks: impl IntoIterator<Item = &'t SyntaxNode>,
) -> Vec<Link> {
    let mut links = Vec::new();
    for block in blocks.into_iter().filter(|b| b.is_list()) {
        collect_links(tree, block, &mut links);
    }
    links
}

/// Extract list links from the whole document.
///
/// # Examples
///
/// ```
/// # use self_help::parser::links::extract_list_links;
/// let links = extract_list_links("See [prose](./x.md).\n\n- [Child](./child.md)\n");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].label, "Child");
/// ```
pub fn extract_list_links(content: &str) -> Vec<Link> {
    let tree = SyntaxTree::parse(content);
    links_in_lists(&tree, tree.blocks())
}
