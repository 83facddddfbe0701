//! Pre-flight permission inference.
//!
//! Predicts whether a mutation would succeed without attempting it. All of
//! these are probes: they answer `false` rather than erroring.

use std::iter;

use crate::directory::Directory;
use crate::entity::FileEntity;
use crate::probe;

/// Sticky bit on a directory (`o+t`).
pub const STICKY_BIT: u32 = 0o1000;

/// Whether a sticky parent still lets the process delete an entry.
///
/// Only a direct backend with a known effective uid can be checked; any
/// other combination passes on parent writability alone.
pub fn sticky_permits(
    direct: bool,
    euid: Option<u32>,
    owner: Option<u32>,
    parent_owner: Option<u32>,
) -> bool {
    match (direct, euid) {
        (true, Some(euid)) => owner == Some(euid) || parent_owner == Some(euid),
        _ => true,
    }
}

impl FileEntity {
    /// Parent, grandparent, ... up to the last reachable ancestor.
    pub fn ancestors(&self) -> impl Iterator<Item = Directory> {
        iter::successors(self.parent(), |dir| dir.parent())
    }

    /// Nearest ancestor that exists on disk.
    fn existing_ancestor(&self) -> Option<Directory> {
        self.ancestors().find(|dir| dir.exists())
    }

    /// True if this entry could be removed.
    ///
    /// Requires a writable parent. When the parent is sticky, a direct
    /// backend additionally requires the process to own either the entry or
    /// the parent.
    pub fn deletable(&self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };
        if !parent.writable() {
            return false;
        }
        if parent.mode() & STICKY_BIT != 0 {
            let permits = sticky_permits(
                self.is_direct(),
                probe::effective_uid(),
                self.uid(),
                parent.uid(),
            );
            tracing::trace!(path = %self.path(), permits, "sticky parent");
            return permits;
        }
        true
    }

    /// True if this entry cannot be modified.
    ///
    /// Existing entries are locked when unwritable. Missing entries are
    /// locked when their nearest existing ancestor is unwritable, or when
    /// there is no such ancestor.
    pub fn locked(&self) -> bool {
        if self.exists() {
            return !self.writable();
        }
        match self.existing_ancestor() {
            Some(dir) => !dir.writable(),
            None => true,
        }
    }

    /// True if this entry could be created, i.e. its nearest existing
    /// ancestor is writable.
    pub fn creatable(&self) -> bool {
        self.existing_ancestor().is_some_and(|dir| dir.writable())
    }
}
