//! Flatten a help document into a single markdown file.
//!
//! Branches become collapsible `<details>` blocks nested in lists, leaves keep
//! their value verbatim so it still renders as markdown. Lazy nodes are
//! resolved on the way down.

use tracing::debug;

use crate::node::{BoxError, Node};

fn ul(html: &str) -> String {
    format!("<ul>{html}</ul>")
}

fn li(html: &str) -> String {
    format!("<li>{html}</li>")
}

fn details(title: &str, html: &str) -> String {
    format!("<details><summary>{title}</summary>{}</details>", ul(html))
}

fn nested(children: &[Node]) -> Result<String, BoxError> {
    children.iter().map(to_markdown_file).collect()
}

/// Render one node as a list item.
///
/// The shape is `<li><details><summary>label</summary><ul>…</ul></details></li>`
/// with a single `<ul>` around the body. Children of a branch are list items
/// directly inside that `<ul>`, not wrapped in a second list.
///
/// # Errors
///
/// Fails when a lazy node's resolver fails.
pub fn to_markdown_file(node: &Node) -> Result<String, BoxError> {
    debug!(label = %node.label(), kind = node.kind(), "flattening");
    Ok(match node {
        Node::Branch(branch) => li(&details(&branch.label, &nested(&branch.children)?)),
        Node::AsyncBranch(branch) => li(&details(&branch.label, &nested(&branch.resolve()?)?)),
        Node::Leaf(leaf) => li(&details(&leaf.label, &format!("\n\n{}\n\n", leaf.value))),
        Node::AsyncLeaf(leaf) => li(&details(&leaf.label, &format!("\n\n{}\n\n", leaf.resolve()?))),
    })
}

/// Render a whole document, wrapped in a top-level list.
pub fn to_markdown_document(root: &Node) -> Result<String, BoxError> {
    Ok(format!("{}\n", ul(&to_markdown_file(root)?)))
}
