//! Lexical path helpers for resolving document links.

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and fold `.` and `..` components.
///
/// Purely lexical: symlinks are not resolved and the filesystem is only
/// consulted for the current directory when `path` is relative.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Strip a `#fragment` from a link target.
pub fn strip_fragment(href: &str) -> &str {
    href.split_once('#').map_or(href, |(path, _)| path)
}

/// Resolve a link target found in a document that lives in `base_dir`.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use self_help::paths::resolve_href;
/// let path = resolve_href(Path::new("/docs/guide"), "../intro.md#setup");
/// assert_eq!(path, Path::new("/docs/intro.md"));
/// ```
pub fn resolve_href(base_dir: &Path, href: &str) -> PathBuf {
    normalize_path(&base_dir.join(strip_fragment(href)))
}

/// Path for display, with forward slashes on every platform.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
