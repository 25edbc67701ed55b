//! Document sources.
//!
//! A markdown directory becomes a lazy tree: the root index is validated up
//! front, everything below it is read from disk each time it is visited so
//! edits show up without restarting. JSON documents are supported through
//! [`json`], and [`load_document`] picks the right source for a path.

pub mod json;
pub mod resolve;

pub use resolve::{LinkKind, ResolvedLink, resolve_link};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::gather::{format_articles_for_cli, gather_from_parsed};
use crate::node::{AsyncBranch, AsyncLeaf, Node};
use crate::parser::{ValidationError, has_related_articles, parse_index_content, parse_leaf_content};
use crate::paths::normalize_path;

/// File that turns a directory into a branch.
pub const INDEX_FILE: &str = "README.md";

/// A document source that cannot be loaded.
///
/// Every variant carries the offending path and displays as
/// `<message> (<path>)`.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Root README.md not found ({})", .path.display())]
    RootNotFound { path: PathBuf },

    #[error("Index file not found ({})", .path.display())]
    IndexNotFound { path: PathBuf },

    #[error("{message} ({})", .path.display())]
    InvalidIndex { message: String, path: PathBuf },

    #[error("Link target not found: \"{href}\" ({})", .path.display())]
    LinkNotFound { href: String, path: PathBuf },

    #[error("Leaf file not found ({})", .path.display())]
    LeafNotFound { path: PathBuf },

    #[error("{message} ({})", .path.display())]
    InvalidDocument { message: String, path: PathBuf },

    #[error("Failed to read file: {source} ({})", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON document: {source} ({})", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type SourceResult<T> = Result<T, SourceError>;

impl SourceError {
    /// The file or directory the error is about.
    pub fn path(&self) -> &Path {
        match self {
            SourceError::RootNotFound { path }
            | SourceError::IndexNotFound { path }
            | SourceError::InvalidIndex { path, .. }
            | SourceError::LinkNotFound { path, .. }
            | SourceError::LeafNotFound { path }
            | SourceError::InvalidDocument { path, .. }
            | SourceError::Io { path, .. }
            | SourceError::Json { path, .. } => path,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn read(path: &Path) -> SourceResult<String> {
    std::fs::read_to_string(path).map_err(|err| SourceError::io(path, err))
}

fn join_messages(errors: &[ValidationError], fallback: &str) -> String {
    if errors.is_empty() {
        return fallback.to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Index file for a root given as a directory or as the index itself.
pub fn root_index_path(path: &Path) -> PathBuf {
    let absolute = normalize_path(path);
    if absolute.is_dir() {
        absolute.join(INDEX_FILE)
    } else {
        absolute
    }
}

/// Build a lazy tree from a markdown directory.
///
/// Only the root index is checked here. Broken links further down surface
/// when their branch is resolved.
///
/// # Errors
///
/// Returns [`SourceError::RootNotFound`] when there is no root index and
/// [`SourceError::InvalidIndex`] when it lacks an H1 or a link list.
pub fn create_markdown_source(path: &Path) -> SourceResult<AsyncBranch> {
    let index_path = root_index_path(path);
    if !index_path.exists() {
        return Err(SourceError::RootNotFound { path: index_path });
    }

    let content = read(&index_path)?;
    let parsed = parse_index_content(&content);
    let Some(index) = parsed.result else {
        return Err(SourceError::InvalidIndex {
            message: join_messages(&parsed.errors, "Failed to parse root index"),
            path: index_path,
        });
    };

    debug!(path = %index_path.display(), label = %index.label, "opened markdown source");
    Ok(branch_node(index.label, index_path))
}

/// Resolve the children listed in an index file.
///
/// # Errors
///
/// Fails on the first link that does not resolve; the index itself must
/// exist and parse.
pub fn load_children(index_path: &Path) -> SourceResult<Vec<Node>> {
    if !index_path.is_file() {
        return Err(SourceError::IndexNotFound {
            path: index_path.to_path_buf(),
        });
    }

    let content = read(index_path)?;
    let parsed = parse_index_content(&content);
    let Some(index) = parsed.result else {
        return Err(SourceError::InvalidIndex {
            message: join_messages(&parsed.errors, "Failed to parse index"),
            path: index_path.to_path_buf(),
        });
    };

    let base_dir = index_path.parent().unwrap_or(Path::new("/"));
    let children = index
        .children
        .into_iter()
        .map(|link| {
            let resolved =
                resolve_link(&link.href, base_dir).ok_or_else(|| SourceError::LinkNotFound {
                    href: link.href.clone(),
                    path: index_path.to_path_buf(),
                })?;
            Ok(match resolved.kind {
                LinkKind::Leaf => leaf_node(link.label, resolved.path),
                LinkKind::Branch => branch_node(link.label, resolved.path).into(),
            })
        })
        .collect::<SourceResult<Vec<_>>>()?;

    debug!(path = %index_path.display(), count = children.len(), "loaded children");
    Ok(children)
}

/// Produce the displayed value of a leaf file.
///
/// Leaves without related articles yield their content. Otherwise the
/// related articles are gathered and joined for terminal display.
pub fn load_leaf_value(path: &Path, label: &str) -> SourceResult<String> {
    if !path.is_file() {
        return Err(SourceError::LeafNotFound {
            path: path.to_path_buf(),
        });
    }

    let parsed = parse_leaf_content(&read(path)?);
    if !has_related_articles(&parsed) {
        return Ok(parsed.content);
    }

    let articles = gather_from_parsed(path, label, &parsed);
    Ok(format_articles_for_cli(&articles))
}

fn branch_node(label: String, index_path: PathBuf) -> AsyncBranch {
    AsyncBranch::new(label, move || Ok(load_children(&index_path)?))
}

fn leaf_node(label: String, path: PathBuf) -> Node {
    let captured = label.clone();
    AsyncLeaf::new(label, move || Ok(load_leaf_value(&path, &captured)?)).into()
}

/// Load a help document from a markdown directory or a JSON file.
pub fn load_document(path: &Path) -> SourceResult<Node> {
    if path.extension().is_some_and(|ext| ext == "json") {
        json::load_json_document(path)
    } else {
        create_markdown_source(path).map(Node::from)
    }
}
