//! Directory handle used for parent traversal and directory creation.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::context::Backend;
use crate::entity::FileEntity;
use crate::error::FsResult;

/// A [`FileEntity`] known to denote a directory.
#[derive(Debug, Clone)]
pub struct Directory {
    entity: FileEntity,
}

impl Directory {
    /// Create a directory handle using a default direct backend.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            entity: FileEntity::new(path),
        }
    }

    /// Create a directory handle whose mutations go through `backend`.
    pub fn with_backend(path: impl AsRef<str>, backend: Arc<dyn Backend>) -> Self {
        Self {
            entity: FileEntity::with_backend(path, backend),
        }
    }

    pub fn into_entity(self) -> FileEntity {
        self.entity
    }

    /// Create this directory and any missing ancestors with the backend's
    /// directory mode. Existing directories are left alone.
    #[tracing::instrument(skip(self), fields(path = %self.entity.path()), name = "directory.mkdir")]
    pub fn mkdir(&mut self) -> FsResult<()> {
        if self.entity.is_directory() {
            return Ok(());
        }
        let mode = self.entity.backend().dir_mode();
        let result = self.entity.context().mkdir(mode, true);
        self.entity.clear_stat();
        result
    }
}

impl Deref for Directory {
    type Target = FileEntity;

    fn deref(&self) -> &FileEntity {
        &self.entity
    }
}

impl DerefMut for Directory {
    fn deref_mut(&mut self) -> &mut FileEntity {
        &mut self.entity
    }
}

impl From<Directory> for FileEntity {
    fn from(dir: Directory) -> Self {
        dir.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DirectBackend;
    use crate::error::FsError;
    use tempfile::TempDir;

    #[test]
    fn test_mkdir_creates_chain() {
        let tmp = TempDir::new().unwrap();
        let mut dir = Directory::new(tmp.path().join("x/y/z").to_string_lossy());
        assert!(!dir.exists());
        dir.mkdir().unwrap();
        assert!(dir.is_directory());
        // Idempotent.
        dir.mkdir().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_mkdir_uses_backend_dir_mode() {
        use crate::config::WriteConfig;

        let tmp = TempDir::new().unwrap();
        let backend = Arc::new(DirectBackend::new(WriteConfig {
            dir_mode: 0o700,
            ..WriteConfig::default()
        }));
        let mut dir = Directory::with_backend(tmp.path().join("private").to_string_lossy(), backend);
        dir.mkdir().unwrap();
        assert_eq!(dir.mode(), 0o700);
    }

    #[test]
    fn test_mkdir_read_only_fails_loudly() {
        let tmp = TempDir::new().unwrap();
        let mut dir = Directory::with_backend(
            tmp.path().join("nope").to_string_lossy(),
            Arc::new(DirectBackend::read_only()),
        );
        assert!(matches!(dir.mkdir(), Err(FsError::ReadOnly(_))));
        assert!(!dir.exists());
    }
}
