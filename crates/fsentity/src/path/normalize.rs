//! Lexical resolution of `.`, `..` and redundant slashes.

use super::classify::{absorb, is_absolute};

/// Split `path` on `/` and fold its segments onto `acc`.
///
/// - an empty first segment is the root marker and is kept only when `acc`
///   is still empty; every other empty segment is dropped
/// - `.` is dropped
/// - `..` pops the last accumulated segment unless it is a root marker
///   (`""` or a leading drive such as `C:`), and is dropped otherwise, so
///   the result never climbs above its start
pub fn explode_segments<'a>(path: &'a str, acc: &mut Vec<&'a str>) {
    for (i, segment) in path.split('/').enumerate() {
        match segment {
            "" => {
                if i == 0 && acc.is_empty() {
                    acc.push("");
                }
            }
            "." => {}
            ".." => {
                if acc.len() > 1 || acc.first().is_some_and(|first| !is_root_marker(first)) {
                    acc.pop();
                }
            }
            name => acc.push(name),
        }
    }
}

/// `""` (unix root) or a bare drive segment like `C:`.
fn is_root_marker(segment: &str) -> bool {
    matches!(segment.as_bytes(), [] | [_, b':'])
}

/// Join exploded segments back into a path.
///
/// A lone root marker joins to `/`, a lone drive to `X:/`.
pub fn join_segments(segments: &[&str]) -> String {
    match segments {
        [""] => "/".to_string(),
        [drive] if is_root_marker(drive) => format!("{drive}/"),
        _ => segments.join("/"),
    }
}

/// Normalize `path` against `base`.
///
/// Both arguments are absorbed first (see [`absorb`]). An empty path is
/// replaced by the base. A relative path is resolved on top of a non-empty
/// base; an absolute path ignores the base.
pub fn normalize(path: &str, base: &str) -> String {
    let path = absorb(path);
    let base = absorb(base);
    if path.is_empty() {
        return base.into_owned();
    }
    let mut segments = Vec::new();
    if !is_absolute(&path) && !base.is_empty() {
        explode_segments(&base, &mut segments);
    }
    explode_segments(&path, &mut segments);
    join_segments(&segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exploded(path: &str) -> Vec<&str> {
        let mut acc = Vec::new();
        explode_segments(path, &mut acc);
        acc
    }

    #[test]
    fn test_explode_collapses_dots() {
        assert_eq!(exploded("a/./b/../c"), vec!["a", "c"]);
        assert_eq!(exploded("/a//b/"), vec!["", "a", "b"]);
    }

    #[test]
    fn test_explode_never_climbs_above_root() {
        assert_eq!(exploded("/../../x"), vec!["", "x"]);
        assert_eq!(exploded("../x"), vec!["x"]);
    }

    #[test]
    fn test_explode_onto_accumulator() {
        let mut acc = Vec::new();
        explode_segments("/srv/app", &mut acc);
        explode_segments("../lib/./x", &mut acc);
        assert_eq!(acc, vec!["", "srv", "lib", "x"]);
    }

    #[test]
    fn test_normalize_with_base() {
        assert_eq!(
            normalize("reports/../reports/2024/summary.po", "/srv/app"),
            "/srv/app/reports/2024/summary.po"
        );
        assert_eq!(normalize("/etc/./hosts", "/srv/app"), "/etc/hosts");
        assert_eq!(normalize("", "/srv/app"), "/srv/app");
        assert_eq!(normalize("a/b/..", ""), "a");
    }

    #[test]
    fn test_normalize_windows_forms() {
        assert_eq!(normalize("c:\\www\\..\\site\\x.po", ""), "C:/site/x.po");
        assert_eq!(normalize("lang/x.mo", "d:\\site"), "D:/site/lang/x.mo");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize("/", ""), "/");
        assert_eq!(normalize("/a/..", ""), "/");
    }

    #[test]
    fn test_drive_is_never_popped() {
        assert_eq!(exploded("C:/a/../../x"), vec!["C:", "x"]);
        assert_eq!(normalize("C:/a/../../x", ""), "C:/x");
        assert_eq!(normalize("../../up", "C:\\web"), "C:/up");
        assert_eq!(normalize("c:\\a\\..", ""), "C:/");
        assert_eq!(normalize("C:/", ""), "C:/");
    }

    #[test]
    fn test_normalize_idempotent_for_absolute_bases() {
        let bases = ["/srv/app", "/", "C:\\web"];
        let paths = ["x/../y/z", "/abs/./p", "", "../../up", "a//b/./c"];
        for base in bases {
            for path in paths {
                let once = normalize(path, base);
                assert_eq!(normalize(&once, base), once, "path={path} base={base}");
            }
        }
    }
}
