// src/fs/mod.rs

//! Filesystem access used by node classification and discovery.
//!
//! Everything the core learns about a tree goes through [`FileSystem`], so
//! the classifier and resolver can be exercised against [`mock::MockFileSystem`]
//! fixtures as well as the real disk.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{Result, RfError};

pub mod mock;

/// What kind of entry a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// The subset of file metadata the core cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub kind: EntryKind,
    /// At least one execute permission bit is set.
    pub executable: bool,
}

impl EntryMeta {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

impl From<fs::Metadata> for EntryMeta {
    fn from(meta: fs::Metadata) -> Self {
        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };

        #[cfg(unix)]
        let executable = {
            use std::os::unix::fs::PermissionsExt;
            meta.permissions().mode() & 0o111 != 0
        };
        #[cfg(not(unix))]
        let executable = kind == EntryKind::File;

        Self { kind, executable }
    }
}

/// Abstract filesystem interface.
///
/// Methods return raw `io::Error`s so callers can tell an absent path apart
/// from a permission failure.
pub trait FileSystem: Send + Sync + Debug {
    /// Metadata of `path`, following symbolic links.
    fn metadata(&self, path: &Path) -> io::Result<EntryMeta>;

    /// Metadata of `path` itself, without following a final symbolic link.
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMeta>;

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Return the entries of a directory as full paths, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Like [`FileSystem::metadata`], but an absent path is `Ok(None)`.
    fn probe(&self, path: &Path) -> Result<Option<EntryMeta>> {
        absent_as_none(path, self.metadata(path))
    }

    /// Like [`FileSystem::symlink_metadata`], but an absent path is `Ok(None)`.
    fn probe_link(&self, path: &Path) -> Result<Option<EntryMeta>> {
        absent_as_none(path, self.symlink_metadata(path))
    }
}

/// True for errors that mean "there is nothing at this path".
///
/// `NotADirectory` shows up when a path component that used to be a
/// directory has been replaced by a file.
pub fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Map an absent path to `Ok(None)` and every other error to [`RfError::FsError`].
pub fn absent_as_none<T>(path: &Path, res: io::Result<T>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if is_absent(&e) => Ok(None),
        Err(e) => Err(RfError::fs(path, e)),
    }
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        fs::metadata(path).map(EntryMeta::from)
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        fs::symlink_metadata(path).map(EntryMeta::from)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        Ok(entries)
    }
}
