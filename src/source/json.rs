//! JSON help documents.
//!
//! ```json
//! {
//!   "label": "What do you need?",
//!   "children": [
//!     { "label": "An answer", "value": "Here it is." },
//!     { "label": "More docs", "include": "./docs" }
//!   ]
//! }
//! ```
//!
//! `include` nodes load another document lazily, relative to the including
//! file. The target may be another JSON file or a markdown directory.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{SourceError, SourceResult, load_document};
use crate::node::{AsyncBranch, Branch, Leaf, Node};
use crate::paths::resolve_href;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LeafDocument {
    label: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BranchDocument {
    label: String,
    children: Vec<DocumentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IncludeDocument {
    label: String,
    include: String,
}

/// Each object must have exactly one shape; mixed keys match none.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentNode {
    Leaf(LeafDocument),
    Branch(BranchDocument),
    Include(IncludeDocument),
}

/// Read a JSON document into a node tree.
pub fn load_json_document(path: &Path) -> SourceResult<Node> {
    let content = std::fs::read_to_string(path).map_err(|err| SourceError::io(path, err))?;
    parse_json_document(&content, path)
}

/// Parse JSON `content` that was read from `path`.
///
/// `path` anchors relative `include` targets and is reported in errors.
pub fn parse_json_document(content: &str, path: &Path) -> SourceResult<Node> {
    let document: DocumentNode =
        serde_json::from_str(content).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    to_node(document, base_dir, path)
}

fn invalid(path: &Path, message: String) -> SourceError {
    SourceError::InvalidDocument {
        message,
        path: path.to_path_buf(),
    }
}

fn to_node(document: DocumentNode, base_dir: &Path, path: &Path) -> SourceResult<Node> {
    let label = match &document {
        DocumentNode::Leaf(LeafDocument { label, .. })
        | DocumentNode::Branch(BranchDocument { label, .. })
        | DocumentNode::Include(IncludeDocument { label, .. }) => label,
    };
    if label.trim().is_empty() {
        return Err(invalid(path, "Node label cannot be empty".to_string()));
    }

    match document {
        DocumentNode::Leaf(LeafDocument { label, value }) => Ok(Leaf::new(label, value).into()),
        DocumentNode::Branch(BranchDocument { label, children }) => {
            if children.is_empty() {
                return Err(invalid(
                    path,
                    format!("Branch \"{label}\" must have at least one child"),
                ));
            }
            let children = children
                .into_iter()
                .map(|child| to_node(child, base_dir, path))
                .collect::<SourceResult<Vec<_>>>()?;
            Ok(Branch::new(label, children).into())
        }
        DocumentNode::Include(IncludeDocument { label, include }) => {
            let target = resolve_href(base_dir, &include);
            Ok(AsyncBranch::new(label, move || Ok(included_children(&target)?)).into())
        }
    }
}

fn included_children(target: &Path) -> SourceResult<Vec<Node>> {
    debug!(path = %target.display(), "loading included document");
    match load_document(target)? {
        Node::Branch(branch) => Ok(branch.children),
        Node::AsyncBranch(branch) => branch.resolve().map_err(|err| SourceError::InvalidDocument {
            message: err.to_string(),
            path: target.to_path_buf(),
        }),
        leaf @ (Node::Leaf(_) | Node::AsyncLeaf(_)) => Ok(vec![leaf]),
    }
}
