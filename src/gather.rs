//! Related-article gathering.
//!
//! A leaf can point at articles to read before and after it. Gathering walks
//! those links depth first and produces one reading order: everything a
//! "Read First" link pulls in comes before the article, everything a
//! "Read Next" link pulls in comes after it. Each file contributes at most
//! once, at the first position it is reached, so cycles terminate.
//!
//! Related links are advisory. Files that are missing or unreadable are
//! skipped with a warning rather than failing the whole gather.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::parser::{Link, ParsedLeaf, parse_leaf_file};
use crate::paths::{normalize_path, resolve_href};

/// One article in a gathered reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheredArticle {
    pub title: String,
    pub content: String,
    /// Set only on the article gathering started from.
    pub is_main: bool,
    pub path: PathBuf,
}

const SEPARATOR_WIDTH: usize = 40;
const MAIN_MARKER: &str = " (main)";

/// Read `path` and gather its related articles.
///
/// Returns an empty list when the entry file itself cannot be read.
pub fn gather_related_articles(path: &Path, label: &str) -> Vec<GatheredArticle> {
    let absolute = normalize_path(path);
    match parse_leaf_file(&absolute) {
        Ok(parsed) => gather_from_parsed(&absolute, label, &parsed),
        Err(err) => {
            warn!(path = %absolute.display(), error = %err, "cannot read article");
            Vec::new()
        }
    }
}

/// Gather related articles for an entry file that has already been parsed.
pub fn gather_from_parsed(path: &Path, label: &str, parsed: &ParsedLeaf) -> Vec<GatheredArticle> {
    let absolute = normalize_path(path);
    let mut visited = HashSet::from([absolute.clone()]);
    let mut articles = Vec::new();

    collect(&absolute, label, parsed, true, &mut visited, &mut articles);

    debug!(
        path = %absolute.display(),
        count = articles.len(),
        "gathered related articles"
    );
    articles
}

fn collect(
    path: &Path,
    label: &str,
    parsed: &ParsedLeaf,
    is_main: bool,
    visited: &mut HashSet<PathBuf>,
    articles: &mut Vec<GatheredArticle>,
) {
    let base_dir = path.parent().unwrap_or(Path::new("/"));

    visit_links(base_dir, &parsed.related.read_first, visited, articles);

    articles.push(GatheredArticle {
        title: parsed.title.clone().unwrap_or_else(|| label.to_string()),
        content: parsed.content.clone(),
        is_main,
        path: path.to_path_buf(),
    });

    visit_links(base_dir, &parsed.related.read_next, visited, articles);
}

fn visit_links(
    base_dir: &Path,
    links: &[Link],
    visited: &mut HashSet<PathBuf>,
    articles: &mut Vec<GatheredArticle>,
) {
    for link in links {
        let target = resolve_href(base_dir, &link.href);
        if !visited.insert(target.clone()) {
            debug!(path = %target.display(), "already gathered");
            continue;
        }

        match parse_leaf_file(&target) {
            Ok(parsed) => collect(&target, &link.label, &parsed, false, visited, articles),
            Err(err) => {
                warn!(path = %target.display(), error = %err, "skipping related article");
            }
        }
    }
}

/// Join articles for terminal display.
///
/// Each article gets a boxed header with its title; the entry article is
/// marked `(main)`. A lone article is returned as is.
pub fn format_articles_for_cli(articles: &[GatheredArticle]) -> String {
    if let [only] = articles {
        return only.content.clone();
    }

    let separator = "━".repeat(SEPARATOR_WIDTH);
    articles
        .iter()
        .map(|article| {
            let marker = if article.is_main { MAIN_MARKER } else { "" };
            format!(
                "{separator}\n📖 {}{marker}\n{separator}\n\n{}",
                article.title, article.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Join article bodies with horizontal rules for markdown export.
pub fn format_articles_for_markdown(articles: &[GatheredArticle]) -> String {
    articles
        .iter()
        .map(|article| article.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
