//! Path string handling.
//!
//! Everything here is pure string manipulation over `/`-separated paths;
//! nothing touches the filesystem.
//!
//! - [`classify`] - absolute vs. relative, canonical absolute form
//! - [`normalize`] - `.`/`..` resolution against an optional base
//! - [`relative`] - shortest relative path between two normalized paths

pub mod classify;
pub mod normalize;
pub mod relative;

pub use classify::{absorb, is_absolute, to_absolute_form};
pub use normalize::{explode_segments, join_segments, normalize};
pub use relative::relative_path;
