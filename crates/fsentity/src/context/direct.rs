//! Direct local filesystem backend.
//!
//! Mutations are plain std::fs calls against the bound path, as the
//! running process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ContextMode, WriteConfig};
use crate::context::{Backend, WriteContext};
use crate::error::{FsError, FsResult};
use crate::probe;

/// Backend performing direct local syscalls.
#[derive(Debug, Clone, Default)]
pub struct DirectBackend {
    config: WriteConfig,
}

impl DirectBackend {
    /// Create a backend from configuration.
    pub fn new(config: WriteConfig) -> Self {
        Self { config }
    }

    /// Create a backend that refuses all mutations.
    pub fn read_only() -> Self {
        Self::new(WriteConfig::read_only())
    }

    /// The configuration contexts are created with.
    pub fn config(&self) -> &WriteConfig {
        &self.config
    }
}

impl Backend for DirectBackend {
    fn context(&self, owner: &str) -> Box<dyn WriteContext> {
        Box::new(DirectContext::new(owner, self.config.clone()))
    }

    fn dir_mode(&self) -> u32 {
        self.config.dir_mode
    }
}

/// Write context bound to one local path.
#[derive(Debug, Clone)]
pub struct DirectContext {
    owner: String,
    config: WriteConfig,
}

impl DirectContext {
    /// Create a context bound to `owner`.
    pub fn new(owner: impl Into<String>, config: WriteConfig) -> Self {
        Self {
            owner: owner.into(),
            config,
        }
    }

    fn path(&self) -> &Path {
        Path::new(&self.owner)
    }

    /// Check if write operations are allowed.
    fn check_writable(&self) -> FsResult<()> {
        match self.config.mode {
            ContextMode::ReadOnly => Err(FsError::read_only(&self.owner)),
            ContextMode::Direct => Ok(()),
        }
    }

    fn fail(&self, e: io::Error) -> FsError {
        FsError::write_failed(&self.owner, e)
    }
}

impl WriteContext for DirectContext {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn bind(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }

    fn clone_box(&self) -> Box<dyn WriteContext> {
        Box::new(self.clone())
    }

    fn is_direct(&self) -> bool {
        true
    }

    fn writable(&self) -> bool {
        self.check_writable().is_ok() && probe::can_write(self.path())
    }

    fn chmod(&self, mode: u32, recursive: bool) -> FsResult<()> {
        self.check_writable()?;
        tracing::debug!(path = %self.owner, mode = %format_args!("{mode:o}"), recursive, "chmod");

        let mut stack = vec![self.path().to_path_buf()];
        while let Some(path) = stack.pop() {
            // Collect children before the mode change can revoke read access.
            if recursive && is_real_dir(&path) {
                for entry in fs::read_dir(&path).map_err(|e| self.fail(e))? {
                    stack.push(entry.map_err(|e| self.fail(e))?.path());
                }
            }
            set_mode(&path, mode).map_err(|e| self.fail(e))?;
        }
        Ok(())
    }

    fn copy(&self, dest: &str) -> FsResult<()> {
        self.check_writable()?;
        tracing::debug!(from = %self.owner, to = %dest, "copy");

        if !is_real_dir(self.path()) {
            fs::copy(self.path(), dest).map_err(|e| self.fail(e))?;
            return Ok(());
        }
        let mut stack: Vec<(PathBuf, PathBuf)> =
            vec![(self.path().to_path_buf(), PathBuf::from(dest))];
        while let Some((from, to)) = stack.pop() {
            if is_real_dir(&from) {
                fs::create_dir_all(&to).map_err(|e| self.fail(e))?;
                for entry in fs::read_dir(&from).map_err(|e| self.fail(e))? {
                    let entry = entry.map_err(|e| self.fail(e))?;
                    stack.push((entry.path(), to.join(entry.file_name())));
                }
            } else {
                fs::copy(&from, &to).map_err(|e| self.fail(e))?;
            }
        }
        Ok(())
    }

    fn move_to(&self, dest: &str) -> FsResult<()> {
        self.check_writable()?;
        tracing::debug!(from = %self.owner, to = %dest, "move");

        match fs::rename(self.path(), dest) {
            Ok(()) => Ok(()),
            // Cross-device rename of a plain file degrades to copy + unlink.
            Err(e) if self.path().is_file() => {
                tracing::debug!(error = %e, "rename failed, copying instead");
                fs::copy(self.path(), dest).map_err(|e| self.fail(e))?;
                fs::remove_file(self.path()).map_err(|e| self.fail(e))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn delete(&self, recursive: bool) -> FsResult<()> {
        self.check_writable()?;
        tracing::debug!(path = %self.owner, recursive, "delete");

        let result = if is_real_dir(self.path()) {
            if recursive {
                fs::remove_dir_all(self.path())
            } else {
                fs::remove_dir(self.path())
            }
        } else {
            fs::remove_file(self.path())
        };
        result.map_err(|e| self.fail(e))
    }

    fn put_contents(&self, data: &[u8]) -> FsResult<()> {
        self.check_writable()?;
        tracing::debug!(path = %self.owner, bytes = data.len(), "put_contents");

        let existed = self.path().exists();
        fs::write(self.path(), data).map_err(|e| self.fail(e))?;
        if !existed {
            set_mode(self.path(), self.config.file_mode).map_err(|e| self.fail(e))?;
        }
        Ok(())
    }

    fn mkdir(&self, mode: u32, recursive: bool) -> FsResult<()> {
        self.check_writable()?;
        tracing::debug!(path = %self.owner, mode = %format_args!("{mode:o}"), recursive, "mkdir");

        let mut builder = fs::DirBuilder::new();
        builder.recursive(recursive);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        builder.create(self.path()).map_err(|e| self.fail(e))
    }
}

/// Directory check that does not follow a final symlink.
fn is_real_dir(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, perms)
}
