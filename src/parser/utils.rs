//! Utility functions for markdown parsing.

/// Normalise a heading for section-name comparison: trimmed and lowercased.
///
/// # Examples
///
/// ```
/// # use self_help::parser::utils::normalize_section_name;
/// assert_eq!(normalize_section_name("  Read FIRST "), "read first");
/// ```
pub fn normalize_section_name(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `heading` names the section `name`, ignoring case and padding.
pub fn is_section(heading: &str, name: &str) -> bool {
    normalize_section_name(heading) == normalize_section_name(name)
}
