//! The file entity: one path, its decomposition cache, and its write context.

use std::cell::OnceCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use md5::{Digest, Md5};

use crate::config::Locations;
use crate::context::{Backend, DirectBackend, WriteContext};
use crate::directory::Directory;
use crate::error::{FsError, FsResult};
use crate::location::{self, UpdateType};
use crate::path::{self, absorb, is_absolute};
use crate::probe;
use crate::stat::{FileAttr, PathInfo, StatCache};

/// MD5 of zero bytes, reported for entries that do not exist.
pub const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// A single filesystem entry addressed by path.
///
/// The path is stored in canonical form: absolute paths in any convention
/// are rewritten with `/` separators on assignment, relative paths are kept
/// as given until [`normalize`](Self::normalize) resolves them.
///
/// Reads go straight to the filesystem. Mutations go through a
/// [`WriteContext`] created lazily from the entity's [`Backend`] and owned by
/// this entity alone.
#[derive(Debug)]
pub struct FileEntity {
    path: String,
    relative: bool,
    /// Base of the last normalization, `None` until the first one.
    base: Option<String>,
    cache: StatCache,
    backend: Arc<dyn Backend>,
    context: OnceCell<Box<dyn WriteContext>>,
}

impl FileEntity {
    /// Create an entity using a default direct backend.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self::with_backend(path, Arc::new(DirectBackend::default()))
    }

    /// Create an entity whose mutations go through `backend`.
    pub fn with_backend(path: impl AsRef<str>, backend: Arc<dyn Backend>) -> Self {
        let raw = path.as_ref();
        Self {
            path: absorb(raw).into_owned(),
            relative: !is_absolute(raw),
            base: None,
            cache: StatCache::new(),
            backend,
            context: OnceCell::new(),
        }
    }

    /// Reassign the path, clearing the cache if it changed.
    fn set_path(&mut self, raw: &str) {
        let path = absorb(raw).into_owned();
        self.relative = !is_absolute(raw);
        if path != self.path {
            self.path = path;
            self.base = None;
            self.clear_stat();
            if let Some(ctx) = self.context.get_mut() {
                ctx.bind(&self.path);
            }
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// True iff the path was not absolute when last assigned.
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Backend configuration shared with parents and clones.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Resolve `.`, `..` and duplicate slashes, prefixing `base` when the
    /// path is relative.
    ///
    /// Repeated calls with the same base do nothing.
    pub fn normalize(&mut self, base: &str) -> &str {
        let base = absorb(base).into_owned();
        if self.base.as_deref() != Some(base.as_str()) {
            let normalized = path::normalize(&self.path, &base);
            self.set_path(&normalized);
            self.base = Some(base);
        }
        &self.path
    }

    /// Shortest path from `base` to this entry.
    ///
    /// Normalizes this entity first. Relative entities are returned as they
    /// are.
    pub fn relative_to(&mut self, base: &str) -> String {
        let own = self.normalize("").to_string();
        path::relative_path(&own, base)
    }

    // ========================================================================
    // Decomposition (memoized)
    // ========================================================================

    fn info(&self) -> &PathInfo {
        self.cache.info(&self.path)
    }

    pub fn dirname(&self) -> &str {
        &self.info().dirname
    }

    pub fn basename(&self) -> &str {
        &self.info().basename
    }

    /// Basename without its last extension.
    pub fn filename(&self) -> &str {
        &self.info().filename
    }

    /// Portion of the basename after the last dot.
    pub fn extension(&self) -> &str {
        &self.info().extension
    }

    /// Portion of the basename after the first dot, so `foo.php.html`
    /// gives `php.html`.
    pub fn full_extension(&self) -> &str {
        self.info().full_extension()
    }

    /// Drop memoized state. Called after every mutation.
    pub fn clear_stat(&mut self) {
        // std keeps no stat cache of its own, so there is nothing to flush
        // below this layer.
        tracing::trace!(path = %self.path, "clear stat");
        self.cache.invalidate();
    }

    // ========================================================================
    // Metadata (never cached)
    // ========================================================================

    fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// Metadata following symlinks.
    pub fn stat(&self) -> Option<FileAttr> {
        fs::metadata(self.as_path())
            .ok()
            .map(|meta| FileAttr::from_metadata(&meta))
    }

    /// Metadata of the entry itself, even when it is a symlink.
    pub fn lstat(&self) -> Option<FileAttr> {
        fs::symlink_metadata(self.as_path())
            .ok()
            .map(|meta| FileAttr::from_metadata(&meta))
    }

    pub fn exists(&self) -> bool {
        self.as_path().exists()
    }

    pub fn is_file(&self) -> bool {
        self.stat().is_some_and(|attr| attr.kind.is_file())
    }

    pub fn is_directory(&self) -> bool {
        self.stat().is_some_and(|attr| attr.kind.is_dir())
    }

    pub fn is_link(&self) -> bool {
        self.lstat().is_some_and(|attr| attr.kind.is_symlink())
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.stat().and_then(|attr| attr.mtime)
    }

    /// Size in bytes, 0 when missing.
    pub fn size(&self) -> u64 {
        self.stat().map(|attr| attr.size).unwrap_or(0)
    }

    /// Permission and special bits, 0 when missing. Symlinks report their
    /// own bits rather than their target's.
    pub fn mode(&self) -> u32 {
        let attr = if self.is_link() {
            self.lstat()
        } else {
            self.stat()
        };
        attr.map(|attr| attr.perm()).unwrap_or(0)
    }

    pub fn uid(&self) -> Option<u32> {
        self.stat().and_then(|attr| attr.uid)
    }

    pub fn gid(&self) -> Option<u32> {
        self.stat().and_then(|attr| attr.gid)
    }

    /// Hex MD5 of the contents, or [`EMPTY_MD5`] if the entry is missing.
    pub fn md5(&self) -> FsResult<String> {
        if !self.exists() {
            return Ok(EMPTY_MD5.to_string());
        }
        let mut file = fs::File::open(self.as_path())?;
        let mut hasher = Md5::new();
        io::copy(&mut file, &mut hasher)?;
        Ok(hex::encode(hasher.finalize()))
    }

    /// Full contents of the file.
    pub fn contents(&self) -> FsResult<Vec<u8>> {
        fs::read(self.as_path()).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FsError::not_found(&self.path),
            _ => FsError::Io(e),
        })
    }

    /// Quiet read-permission probe.
    ///
    /// Empty paths and dot-prefixed relative paths have no meaningful
    /// location and are rejected. Everything else answers `false` on any
    /// failure instead of erroring.
    pub fn readable(&self) -> FsResult<bool> {
        if self.path.is_empty() {
            return Err(FsError::invalid_argument("empty path"));
        }
        if self.relative && self.path.starts_with('.') {
            return Err(FsError::invalid_argument(format!(
                "relative path without context: {}",
                self.path
            )));
        }
        Ok(probe::can_read(self.as_path()))
    }

    /// Canonical location with symlinks resolved, `None` when missing.
    pub fn real_path(&self) -> Option<String> {
        dunce::canonicalize(self.as_path())
            .ok()
            .map(|path| path.to_string_lossy().into_owned())
    }

    /// Entity for the target of this symlink, resolved against the link's
    /// directory. `None` if this is not a symlink.
    pub fn linked(&self) -> Option<FileEntity> {
        let target = fs::read_link(self.as_path()).ok()?;
        let mut entity =
            FileEntity::with_backend(target.to_string_lossy(), Arc::clone(&self.backend));
        if entity.is_relative() {
            let dir = self.dirname().to_string();
            entity.normalize(&dir);
        }
        Some(entity)
    }

    /// Which installation kind this entry belongs to.
    pub fn update_type(&self, locations: &Locations) -> UpdateType {
        let dirpath = if self.is_directory() {
            self.path.as_str()
        } else {
            self.dirname()
        };
        location::classify(dirpath, locations)
    }

    // ========================================================================
    // Related entities
    // ========================================================================

    /// Containing directory, sharing this entity's backend.
    ///
    /// `None` for `/`, for a bare relative name, or wherever the dirname
    /// would be this path again.
    pub fn parent(&self) -> Option<Directory> {
        let dirname = self.dirname();
        if dirname == "." || dirname == self.path {
            return None;
        }
        Some(Directory::with_backend(dirname, Arc::clone(&self.backend)))
    }

    /// Sibling entry called `name` in the same directory.
    pub fn clone_basename(&self, name: &str) -> FileEntity {
        let path = match self.dirname() {
            "." => name.to_string(),
            dir => format!("{}/{name}", dir.trim_end_matches('/')),
        };
        let mut sibling = self.clone();
        sibling.set_path(&path);
        sibling
    }

    /// Sibling entry with extension `ext` in place of the current one.
    pub fn clone_extension(&self, ext: &str) -> FileEntity {
        let ext = ext.trim_start_matches('.');
        let stem = if self.extension().is_empty() {
            self.basename()
        } else {
            self.filename()
        };
        self.clone_basename(&format!("{stem}.{ext}"))
    }

    // ========================================================================
    // Writing
    // ========================================================================

    pub(crate) fn context(&self) -> &dyn WriteContext {
        &**self
            .context
            .get_or_init(|| self.backend.context(&self.path))
    }

    /// Backend-specific writability probe.
    pub fn writable(&self) -> bool {
        self.context().writable()
    }

    /// Whether mutations go through direct local syscalls.
    pub fn is_direct(&self) -> bool {
        self.context().is_direct()
    }

    #[tracing::instrument(skip(self), fields(path = %self.path), name = "entity.chmod")]
    pub fn chmod(&mut self, mode: u32, recursive: bool) -> FsResult<()> {
        let result = self.context().chmod(mode, recursive);
        self.clear_stat();
        result
    }

    /// Copy to `dest` and return an entity for the copy.
    #[tracing::instrument(skip(self), fields(path = %self.path), name = "entity.copy")]
    pub fn copy(&mut self, dest: &str) -> FsResult<FileEntity> {
        let mut copy = self.clone();
        copy.set_path(dest);
        copy.clear_stat();
        let result = self.context().copy(copy.path());
        self.clear_stat();
        result.map(|()| copy)
    }

    /// Move to `dest`'s path. Both entities are invalidated.
    #[tracing::instrument(skip(self, dest), fields(path = %self.path, dest = %dest.path), name = "entity.move")]
    pub fn move_to(&mut self, dest: &mut FileEntity) -> FsResult<()> {
        let result = self.context().move_to(dest.path());
        self.clear_stat();
        dest.clear_stat();
        result
    }

    /// Remove this entry, recursively if it is a directory.
    #[tracing::instrument(skip(self), fields(path = %self.path), name = "entity.delete")]
    pub fn delete(&mut self) -> FsResult<()> {
        let recursive = self.is_directory();
        let result = self.context().delete(recursive);
        self.clear_stat();
        result
    }

    #[tracing::instrument(skip(self, data), fields(path = %self.path, bytes = data.len()), name = "entity.put_contents")]
    pub fn put_contents(&mut self, data: &[u8]) -> FsResult<()> {
        let result = self.context().put_contents(data);
        self.clear_stat();
        result
    }

    /// Make sure the containing directory chain exists.
    #[tracing::instrument(skip(self), fields(path = %self.path), name = "entity.create_parent")]
    pub fn create_parent(&self) -> FsResult<()> {
        match self.parent() {
            Some(mut dir) if !dir.exists() => dir.mkdir(),
            _ => Ok(()),
        }
    }
}

/// Clones share backend configuration only. A context that already exists
/// is deep-copied and rebound to the clone; the cache starts empty.
impl Clone for FileEntity {
    fn clone(&self) -> Self {
        let context = match self.context.get() {
            Some(ctx) => {
                let mut copy = ctx.clone_box();
                copy.bind(&self.path);
                OnceCell::from(copy)
            }
            None => OnceCell::new(),
        };
        Self {
            path: self.path.clone(),
            relative: self.relative,
            base: self.base.clone(),
            cache: StatCache::new(),
            backend: Arc::clone(&self.backend),
            context,
        }
    }
}

impl fmt::Display for FileEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&str> for FileEntity {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
