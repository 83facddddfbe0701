//! Path decomposition cache and metadata snapshots.
//!
//! [`StatCache`] memoizes the pathinfo decomposition of a path string until
//! it is invalidated. [`FileAttr`] is read fresh from the filesystem on
//! every query and is never cached.

use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fs::Metadata;
use std::time::SystemTime;

/// Kind of entry as reported by `stat`/`lstat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    File,
    Directory,
    /// Only seen through `lstat`; `stat` reports the target's kind.
    Symlink,
}

impl FileType {
    pub fn is_file(self) -> bool {
        self == FileType::File
    }

    pub fn is_dir(self) -> bool {
        self == FileType::Directory
    }

    pub fn is_symlink(self) -> bool {
        self == FileType::Symlink
    }
}

/// Metadata snapshot of an entry, taken without following a final symlink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttr {
    /// Size in bytes.
    pub size: u64,
    /// File type.
    pub kind: FileType,
    /// Mode bits including file type and special bits (e.g. 0o41777).
    pub mode: u32,
    /// Last modification time.
    pub mtime: Option<SystemTime>,
    /// Owner user ID (unix only).
    pub uid: Option<u32>,
    /// Owner group ID (unix only).
    pub gid: Option<u32>,
}

impl FileAttr {
    /// Convert std::fs::Metadata to FileAttr.
    pub fn from_metadata(meta: &Metadata) -> Self {
        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            FileType::Symlink
        } else if file_type.is_dir() {
            FileType::Directory
        } else {
            FileType::File
        };

        #[cfg(unix)]
        let (mode, uid, gid) = {
            use std::os::unix::fs::MetadataExt;
            (meta.mode(), Some(meta.uid()), Some(meta.gid()))
        };
        #[cfg(not(unix))]
        let (mode, uid, gid) = {
            let perm = if meta.permissions().readonly() { 0o444 } else { 0o644 };
            (perm, None, None)
        };

        Self {
            size: meta.len(),
            kind,
            mode,
            mtime: meta.modified().ok(),
            uid,
            gid,
        }
    }

    /// Permission and special bits only (file type stripped).
    pub fn perm(&self) -> u32 {
        self.mode & 0o7777
    }
}

/// Pathinfo decomposition of a path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    /// Everything before the last separator; `.` when there is none.
    pub dirname: String,
    /// Last segment.
    pub basename: String,
    /// Basename without its extension.
    pub filename: String,
    /// Portion of the basename after the last dot, empty if none.
    pub extension: String,
}

impl PathInfo {
    /// Decompose `path`. Trailing separators are ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() && path.starts_with('/') {
            "/"
        } else {
            trimmed
        };

        let (dirname, basename) = match trimmed.rfind('/') {
            Some(0) if trimmed.len() == 1 => ("/", ""),
            Some(0) => ("/", &trimmed[1..]),
            Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
            None => (".", trimmed),
        };

        let (filename, extension) = match basename.rfind('.') {
            Some(i) => (&basename[..i], &basename[i + 1..]),
            None => (basename, ""),
        };

        Self {
            dirname: dirname.to_string(),
            basename: basename.to_string(),
            filename: filename.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Portion of the basename after the first dot, empty if none.
    pub fn full_extension(&self) -> &str {
        self.basename
            .split_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("")
    }
}

/// Lazily computed decomposition, dropped by [`StatCache::invalidate`].
///
/// Owned by exactly one entity; cloning an entity starts a fresh cache.
#[derive(Debug, Default)]
pub struct StatCache {
    info: OnceCell<PathInfo>,
}

impl StatCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decomposition of `path`, computed on first use.
    pub fn info(&self, path: &str) -> &PathInfo {
        self.info.get_or_init(|| PathInfo::parse(path))
    }

    /// Whether a decomposition is currently memoized.
    pub fn is_populated(&self) -> bool {
        self.info.get().is_some()
    }

    /// Forget everything memoized.
    pub fn invalidate(&mut self) {
        self.info.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pathinfo_absolute() {
        let info = PathInfo::parse("/srv/app/foo.php.html");
        assert_eq!(info.dirname, "/srv/app");
        assert_eq!(info.basename, "foo.php.html");
        assert_eq!(info.filename, "foo.php");
        assert_eq!(info.extension, "html");
        assert_eq!(info.full_extension(), "php.html");
    }

    #[test]
    fn test_pathinfo_edges() {
        let root = PathInfo::parse("/");
        assert_eq!(root.dirname, "/");
        assert_eq!(root.basename, "");

        let top = PathInfo::parse("/etc");
        assert_eq!(top.dirname, "/");
        assert_eq!(top.basename, "etc");

        let bare = PathInfo::parse("README");
        assert_eq!(bare.dirname, ".");
        assert_eq!(bare.extension, "");
        assert_eq!(bare.full_extension(), "");

        let dotfile = PathInfo::parse("a/.htaccess");
        assert_eq!(dotfile.filename, "");
        assert_eq!(dotfile.extension, "htaccess");

        let trailing = PathInfo::parse("a/b/");
        assert_eq!(trailing.dirname, "a");
        assert_eq!(trailing.basename, "b");
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = StatCache::new();
        assert!(!cache.is_populated());
        assert_eq!(cache.info("x/y.po").basename, "y.po");
        assert!(cache.is_populated());

        cache.invalidate();
        assert!(!cache.is_populated());
        assert_eq!(cache.info("x/z.mo").extension, "mo");
    }

    #[test]
    fn test_perm_strips_type_bits() {
        let attr = FileAttr {
            size: 0,
            kind: FileType::Directory,
            mode: 0o41777,
            mtime: None,
            uid: None,
            gid: None,
        };
        assert_eq!(attr.perm(), 0o1777);
        assert!(attr.kind.is_dir());
        assert!(!attr.kind.is_symlink());
    }
}
