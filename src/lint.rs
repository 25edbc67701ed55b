//! Whole-tree validation of a markdown help document.
//!
//! Unlike navigation, which stops at the first broken link, linting walks
//! every branch and collects every problem so authors can fix them in one
//! pass.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crossterm::style::Stylize;
use serde::Serialize;
use tracing::debug;

use crate::parser::{
    Link, ValidationError, parse_index_content, parse_leaf_content, validate_parsed_index,
};
use crate::paths::display_path;
use crate::source::{LinkKind, resolve_link, root_index_path};

/// Outcome of linting a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintResult {
    pub success: bool,
    pub errors: Vec<ValidationError>,
}

struct Linter {
    errors: Vec<ValidationError>,
    visited: HashSet<PathBuf>,
}

/// Lint the markdown document rooted at `path`, a directory or index file.
pub fn lint(path: &Path) -> LintResult {
    let index_path = root_index_path(path);
    let mut linter = Linter {
        errors: Vec::new(),
        visited: HashSet::new(),
    };

    if index_path.exists() {
        linter.branch(&index_path);
    } else {
        linter.error(&index_path, "Root README.md not found".to_string());
    }

    debug!(errors = linter.errors.len(), "lint finished");
    LintResult {
        success: linter.errors.is_empty(),
        errors: linter.errors,
    }
}

impl Linter {
    fn error(&mut self, path: &Path, message: String) {
        self.errors.push(ValidationError::new(display_path(path), message));
    }

    fn branch(&mut self, index_path: &Path) {
        if !self.visited.insert(index_path.to_path_buf()) {
            return;
        }
        debug!(path = %index_path.display(), "linting branch");

        let content = match std::fs::read_to_string(index_path) {
            Ok(content) => content,
            Err(err) => {
                self.error(index_path, format!("Failed to read file: {err}"));
                return;
            }
        };

        let parsed = parse_index_content(&content);
        let location = display_path(index_path);
        self.errors
            .extend(parsed.errors.into_iter().map(|e| e.at(location.clone())));
        let Some(index) = parsed.result else {
            return;
        };
        self.errors.extend(validate_parsed_index(&index, &location));

        let base_dir = index_path.parent().unwrap_or(Path::new("/"));
        for link in &index.children {
            match resolve_link(&link.href, base_dir) {
                None => self.error(
                    index_path,
                    format!(
                        "Link target not found: \"{}\" (label: \"{}\")",
                        link.href, link.label
                    ),
                ),
                Some(resolved) if resolved.kind == LinkKind::Branch => self.branch(&resolved.path),
                Some(resolved) => self.leaf(&resolved.path),
            }
        }
    }

    fn leaf(&mut self, leaf_path: &Path) {
        let Ok(content) = std::fs::read_to_string(leaf_path) else {
            return;
        };
        let parsed = parse_leaf_content(&content);
        let base_dir = leaf_path.parent().unwrap_or(Path::new("/"));

        self.related(leaf_path, base_dir, "Read First", &parsed.related.read_first);
        self.related(leaf_path, base_dir, "Read Next", &parsed.related.read_next);
    }

    fn related(&mut self, leaf_path: &Path, base_dir: &Path, section: &str, links: &[Link]) {
        for link in links {
            match resolve_link(&link.href, base_dir) {
                None => self.error(
                    leaf_path,
                    format!(
                        "{section} link target not found: \"{}\" (label: \"{}\")",
                        link.href, link.label
                    ),
                ),
                Some(resolved) if resolved.kind == LinkKind::Branch => self.error(
                    leaf_path,
                    format!(
                        "{section} should link to leaves, not branches: \"{}\" (label: \"{}\")",
                        link.href, link.label
                    ),
                ),
                Some(_) => {}
            }
        }
    }
}

/// Human readable report, optionally styled for a terminal.
pub fn render_report(result: &LintResult, source: &Path, styled: bool) -> String {
    let paint = |text: String, style: fn(String) -> String| {
        if styled { style(text) } else { text }
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        paint("Linting markdown source...".to_string(), |s| s.cyan().to_string())
    );
    let _ = writeln!(out, "  Source: {}", source.display());
    out.push('\n');

    if result.success {
        let _ = writeln!(
            out,
            "{}",
            paint("✓ No errors found".to_string(), |s| s.green().to_string())
        );
        return out;
    }

    let summary = format!("✗ Found {} error(s)", result.errors.len());
    let _ = writeln!(out, "{}", paint(summary, |s| s.red().to_string()));
    out.push('\n');
    for error in &result.errors {
        let _ = writeln!(
            out,
            "{}",
            paint(format!("  {}", error.path), |s| s.yellow().to_string())
        );
        let _ = writeln!(out, "    {}", error.message);
    }
    out
}
