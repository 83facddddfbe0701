//! # fsentity
//!
//! Path-addressed filesystem entries.
//!
//! A [`FileEntity`] wraps one path string and mediates every read, stat and
//! mutation against it:
//!
//! - [`path`] - classification (unix, drive-letter, UNC), normalization and
//!   relative-path computation, all pure string work
//! - [`stat`] - memoized pathinfo decomposition plus fresh metadata reads
//! - [`permission`] - `deletable` / `locked` / `creatable` inference,
//!   including sticky-bit ownership rules
//! - [`context`] - the [`WriteContext`] seam; mutations are delegated to a
//!   backend and never performed by the entity itself
//! - [`location`] - classification against configured root directories
//!
//! Everything is synchronous and blocking. Entities own their cache and
//! their write context exclusively; clones deep-copy both.

pub mod config;
pub mod context;
pub mod directory;
pub mod entity;
pub mod error;
pub mod location;
pub mod path;
pub mod permission;
pub mod probe;
pub mod stat;

pub use config::{Config, ContextMode, Locations, WriteConfig};
pub use context::{Backend, DirectBackend, DirectContext, WriteContext};
pub use directory::Directory;
pub use entity::{EMPTY_MD5, FileEntity};
pub use error::{FsError, FsResult};
pub use location::{LocationRegistry, RootList, UpdateType};
pub use permission::STICKY_BIT;
pub use stat::{FileAttr, FileType, PathInfo};
