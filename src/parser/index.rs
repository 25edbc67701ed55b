//! Index document parsing.
//!
//! An index names a branch with its first H1 and lists the branch's children
//! as links inside list items.

use super::links::links_in_lists;
use super::output::{IndexParse, ParsedIndex, ValidationError};
use super::syntax::SyntaxTree;

pub const MISSING_H1: &str = "README.md must contain an H1 heading as the first heading";
pub const MISSING_LINKS: &str =
    "README.md must contain at least one link in a list to define children";

/// First top-level H1 of a parsed document.
pub(crate) fn first_h1(tree: &SyntaxTree<'_>) -> Option<String> {
    tree.blocks()
        .iter()
        .find(|block| block.heading_level() == Some(1))
        .map(|heading| tree.inline_text(heading).to_string())
}

/// Parse an index document into its label and ordered child links.
///
/// Both structural errors are reported together. `result` is `None` when
/// either fires.
///
/// # Examples
///
/// ```
/// # use self_help::parser::parse_index_content;
/// let parsed = parse_index_content("# My Branch\n\n- [Child 1](./child1.md)\n- [Child 2](./child2/)\n");
/// let index = parsed.result.unwrap();
/// assert_eq!(index.label, "My Branch");
/// assert_eq!(index.children.len(), 2);
/// ```
pub fn parse_index_content(content: &str) -> IndexParse {
    let tree = SyntaxTree::parse(content);
    let mut errors = Vec::new();

    let label = first_h1(&tree).filter(|label| !label.is_empty());
    if label.is_none() {
        errors.push(ValidationError::new("", MISSING_H1));
    }

    let children = links_in_lists(&tree, tree.blocks());
    if children.is_empty() {
        errors.push(ValidationError::new("", MISSING_LINKS));
    }

    match label {
        Some(label) if errors.is_empty() => IndexParse {
            result: Some(ParsedIndex { label, children }),
            errors,
        },
        _ => IndexParse {
            result: None,
            errors,
        },
    }
}

/// Check a parsed index for empty labels and hrefs.
pub fn validate_parsed_index(parsed: &ParsedIndex, path: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if parsed.label.trim().is_empty() {
        errors.push(ValidationError::new(path, "Branch label (H1) cannot be empty"));
    }

    if parsed.children.is_empty() {
        errors.push(ValidationError::new(
            path,
            "Branch must have at least one child link",
        ));
    }

    for child in &parsed.children {
        if child.label.trim().is_empty() {
            errors.push(ValidationError::new(
                path,
                format!("Link to \"{}\" has empty label text", child.href),
            ));
        }
        if child.href.trim().is_empty() {
            errors.push(ValidationError::new(
                path,
                format!("Link \"{}\" has empty href", child.label),
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::output::Link;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_index() {
        let md = r#"# Getting Help

Pick the topic closest to your problem.

- [Installation](./install.md)
- [Configuration](./config/)
"#;
        let parsed = parse_index_content(md);
        assert!(parsed.errors.is_empty());
        assert_eq!(
            parsed.result,
            Some(ParsedIndex {
                label: "Getting Help".to_string(),
                children: vec![
                    Link::new("Installation", "./install.md"),
                    Link::new("Configuration", "./config/"),
                ],
            })
        );
    }

    #[test]
    fn test_missing_h1() {
        let parsed = parse_index_content("## Not a title\n\n- [Child](./child.md)\n");
        assert!(parsed.result.is_none());
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].message.contains("H1"));
    }

    #[test]
    fn test_missing_links() {
        let parsed = parse_index_content("# Title\n\nSee [prose](./prose.md) only.\n");
        assert!(parsed.result.is_none());
        assert_eq!(parsed.errors, vec![ValidationError::new("", MISSING_LINKS)]);
    }

    #[test]
    fn test_both_errors_fire() {
        let parsed = parse_index_content("Just some text.\n");
        assert!(parsed.result.is_none());
        assert_eq!(parsed.errors.len(), 2);
    }

    #[test]
    fn test_h1_in_code_block_is_ignored() {
        let md = "```\n# Fake\n```\n\n- [Child](./child.md)\n";
        let parsed = parse_index_content(md);
        assert!(parsed.result.is_none());
        assert!(parsed.errors[0].message.contains("H1"));
    }

    #[test]
    fn test_links_from_every_top_level_list() {
        let md = "# Title\n\n- [A](./a.md)\n\nBetween lists.\n\n1. [B](./b.md)\n";
        let index = parse_index_content(md).result.unwrap();
        let labels: Vec<_> = index.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn test_validate_parsed_index() {
        let parsed = ParsedIndex {
            label: "  ".to_string(),
            children: vec![Link::new("", "./a.md"), Link::new("B", " ")],
        };
        let messages: Vec<_> = validate_parsed_index(&parsed, "README.md")
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Branch label (H1) cannot be empty".to_string(),
                "Link to \"./a.md\" has empty label text".to_string(),
                "Link \"B\" has empty href".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_parsed_index_no_children() {
        let parsed = ParsedIndex {
            label: "Root".to_string(),
            children: vec![],
        };
        let errors = validate_parsed_index(&parsed, "README.md");
        assert_eq!(
            errors,
            vec![ValidationError::new(
                "README.md",
                "Branch must have at least one child link"
            )]
        );
    }
}
