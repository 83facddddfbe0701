//! Absolute path detection across unix, drive-letter and UNC conventions.

use std::borrow::Cow;

/// Returns true if `path` is absolute in any supported convention.
///
/// Recognized forms are `/...`, `X:...` (any character followed by a colon)
/// and `\\...`. A single leading backslash is not absolute.
pub fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    match bytes {
        [] => false,
        [b'/', ..] => true,
        [_, b':', ..] => true,
        [b'\\', b'\\', ..] => true,
        _ => false,
    }
}

/// Canonical absolute form of `path`, or an empty string if it is relative.
///
/// Unix paths are returned unchanged. Drive-letter paths get an uppercase
/// drive letter, and both drive-letter and UNC paths have every `\`
/// rewritten to `/`.
pub fn to_absolute_form(path: &str) -> String {
    if !is_absolute(path) {
        return String::new();
    }
    if path.starts_with('/') {
        return path.to_string();
    }
    let rewritten = path.replace('\\', "/");
    if path.as_bytes().get(1) == Some(&b':') {
        let mut chars = rewritten.chars();
        match chars.next() {
            Some(drive) => drive.to_uppercase().chain(chars).collect(),
            None => rewritten,
        }
    } else {
        rewritten
    }
}

/// Absorb a raw path string: absolute paths in canonical form, relative
/// paths untouched.
pub fn absorb(path: &str) -> Cow<'_, str> {
    if is_absolute(path) {
        Cow::Owned(to_absolute_form(path))
    } else {
        Cow::Borrowed(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("/a/b"));
        assert!(is_absolute("/"));
        assert!(is_absolute("C:\\foo"));
        assert!(is_absolute("c:/foo"));
        assert!(is_absolute("\\\\server\\share"));

        assert!(!is_absolute(""));
        assert!(!is_absolute("relative/path"));
        assert!(!is_absolute("\\single"));
        assert!(!is_absolute("./here"));
    }

    #[test]
    fn test_to_absolute_form() {
        assert_eq!(to_absolute_form("relative/path"), "");
        assert_eq!(to_absolute_form(""), "");
        assert_eq!(to_absolute_form("/a/b"), "/a/b");
        assert_eq!(to_absolute_form("C:\\foo\\bar"), "C:/foo/bar");
        assert_eq!(to_absolute_form("c:\\foo"), "C:/foo");
        assert_eq!(to_absolute_form("\\\\server\\share"), "//server/share");
    }

    #[test]
    fn test_unix_paths_keep_backslashes() {
        assert_eq!(to_absolute_form("/odd\\name"), "/odd\\name");
    }

    #[test]
    fn test_absorb() {
        assert!(matches!(absorb("a/b"), Cow::Borrowed("a/b")));
        assert_eq!(absorb("d:\\x"), "D:/x");
    }
}
