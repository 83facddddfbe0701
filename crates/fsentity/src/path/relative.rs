//! Relative path computation via common-ancestor matching.

use super::classify::is_absolute;
use super::normalize::normalize;

/// Shortest relative path from `base` to `path`.
///
/// `path` is normalized first. Relative results are returned as they are,
/// since there is nothing to relativize against. Otherwise `base` is
/// normalized on its own and:
///
/// - a path below `base` loses the `base/` prefix (`""` when equal)
/// - a path sharing more than the root with `base` climbs out with `..`
///   segments and descends into the remainder
/// - anything else comes back as the normalized absolute path
pub fn relative_path(path: &str, base: &str) -> String {
    let path = normalize(path, "");
    if !is_absolute(&path) {
        return path;
    }
    let base = normalize(base, "");
    if path == base {
        return String::new();
    }
    if let Some(rest) = path
        .strip_prefix(base.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
    {
        return rest.to_string();
    }

    let base_segments: Vec<&str> = base.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    let common = base_segments
        .iter()
        .zip(&path_segments)
        .take_while(|(a, b)| a == b)
        .count();

    if common > 1 {
        let climb = base_segments.len() - common;
        let mut parts: Vec<&str> = vec![".."; climb];
        parts.extend_from_slice(&path_segments[common..]);
        return parts.join("/");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_base() {
        assert_eq!(relative_path("/a/b/c/d", "/a/b"), "c/d");
        assert_eq!(relative_path("/a/b/./c", "/a/b/"), "c");
    }

    #[test]
    fn test_sibling_branch() {
        assert_eq!(relative_path("/a/x/y", "/a/b/c"), "../../x/y");
        assert_eq!(relative_path("/a/b", "/a/b/c"), "..");
    }

    #[test]
    fn test_identical() {
        assert_eq!(relative_path("/a/b", "/a/b"), "");
        assert_eq!(relative_path("/a/b/../b", "/a/./b"), "");
    }

    #[test]
    fn test_only_root_shared() {
        assert_eq!(relative_path("/x/y", "/a/b"), "/x/y");
        assert_eq!(relative_path("C:/x", "D:/x"), "C:/x");
    }

    #[test]
    fn test_relative_path_unchanged() {
        assert_eq!(relative_path("a/./b", "/a"), "a/b");
    }

    #[test]
    fn test_prefix_must_end_on_segment() {
        assert_eq!(relative_path("/a/bc/d", "/a/b"), "../bc/d");
    }
}
