//! Classify index links as branches or leaves by probing the filesystem.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::INDEX_FILE;
use crate::paths::{resolve_href, strip_fragment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Branch,
    Leaf,
}

/// Where a link points and what it is.
///
/// For branches `path` is the branch's index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub path: PathBuf,
    pub kind: LinkKind,
}

impl ResolvedLink {
    fn branch(path: PathBuf) -> Self {
        Self {
            path,
            kind: LinkKind::Branch,
        }
    }

    fn leaf(path: PathBuf) -> Self {
        Self {
            path,
            kind: LinkKind::Leaf,
        }
    }
}

/// Resolve `href`, found in a document inside `base_dir`.
///
/// - `folder/README.md` is a branch when the folder and file exist.
/// - any other `*.md` is a leaf when the file exists.
/// - anything else is a folder, a branch when it holds a `README.md`.
///
/// Returns `None` when nothing matching exists, and for in-page anchors such
/// as `#faq`.
pub fn resolve_link(href: &str, base_dir: &Path) -> Option<ResolvedLink> {
    if strip_fragment(href).is_empty() {
        return None;
    }
    let href = href.strip_suffix('/').unwrap_or(href);
    let target = resolve_href(base_dir, href);

    if target.file_name().is_some_and(|name| name == INDEX_FILE) {
        let folder = target.parent()?;
        return (folder.is_dir() && target.is_file()).then(|| ResolvedLink::branch(target));
    }

    if target.extension().is_some_and(|ext| ext == "md") {
        return target.is_file().then(|| ResolvedLink::leaf(target));
    }

    let index = target.join(INDEX_FILE);
    (target.is_dir() && index.is_file()).then(|| ResolvedLink::branch(index))
}
