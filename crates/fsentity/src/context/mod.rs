//! Write backends.
//!
//! A [`Backend`] is shared, immutable configuration. It hands out
//! [`WriteContext`]s, each bound to the path of exactly one entity, which
//! perform the actual mutations. Entities never share a context: cloning an
//! entity deep-copies its context through [`WriteContext::clone_box`] and
//! rebinds the copy.

mod direct;

pub use direct::{DirectBackend, DirectContext};

use std::fmt::Debug;

use crate::error::FsResult;

/// Mutating operations against one bound path.
///
/// Every mutation fails with [`FsError`](crate::FsError) carrying a readable
/// reason; implementations never swallow failures.
pub trait WriteContext: Debug + Send {
    /// Path this context currently operates on.
    fn owner(&self) -> &str;

    /// Rebind to a new owner path.
    fn bind(&mut self, owner: &str);

    /// Deep copy, carrying configuration but no link to `self`.
    fn clone_box(&self) -> Box<dyn WriteContext>;

    /// True iff mutations are direct local syscalls.
    fn is_direct(&self) -> bool;

    /// Backend-specific writability probe for the owner path.
    fn writable(&self) -> bool;

    /// Change permissions, descending into directories when `recursive`.
    fn chmod(&self, mode: u32, recursive: bool) -> FsResult<()>;

    /// Copy the owner to `dest`.
    fn copy(&self, dest: &str) -> FsResult<()>;

    /// Move the owner to `dest`.
    fn move_to(&self, dest: &str) -> FsResult<()>;

    /// Remove the owner, including contents when `recursive`.
    fn delete(&self, recursive: bool) -> FsResult<()>;

    /// Replace the owner's contents with `data`, creating it if needed.
    fn put_contents(&self, data: &[u8]) -> FsResult<()>;

    /// Create the owner as a directory.
    fn mkdir(&self, mode: u32, recursive: bool) -> FsResult<()>;
}

/// Backend configuration shared by every entity created from it.
pub trait Backend: Debug + Send + Sync {
    /// Fresh context bound to `owner`.
    fn context(&self, owner: &str) -> Box<dyn WriteContext>;

    /// Default permissions for directories this backend creates.
    fn dir_mode(&self) -> u32 {
        0o755
    }
}
