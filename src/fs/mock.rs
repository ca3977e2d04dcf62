// src/fs/mock.rs

//! In-memory filesystem for tests.
//!
//! Paths are absolute; `/` always exists. Symbolic links are resolved the way
//! a real kernel would (intermediate links always, the final one only when
//! following), and directories can be marked as unsearchable to simulate
//! permission failures.

use super::{EntryKind, EntryMeta, FileSystem};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const MAX_LINK_DEPTH: usize = 40;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { executable: bool },
    Dir(Vec<String>), // List of child names
    Symlink(PathBuf),
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    denied: HashSet<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut state = MockState::default();
        state
            .entries
            .insert(PathBuf::from("/"), MockEntry::Dir(Vec::new()));

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a directory (and any missing parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.lock();
        ensure_dir_entry(&mut state.entries, path.as_ref());
    }

    pub fn add_file(&self, path: impl AsRef<Path>, executable: bool) {
        self.insert(path.as_ref(), MockEntry::File { executable });
    }

    /// Create a symbolic link at `path`. Relative targets resolve against
    /// the link's parent directory.
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Symlink(target.as_ref().to_path_buf()));
    }

    /// Make a directory unsearchable: its own metadata is still visible, but
    /// listing it or looking up anything below it fails with `PermissionDenied`.
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.lock().denied.insert(path.as_ref().to_path_buf());
    }

    /// Remove an entry and everything below it.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.entries.retain(|p, _| !p.starts_with(path));
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if let Some(MockEntry::Dir(children)) = state.entries.get_mut(parent) {
                children.retain(|c| c.as_str() != name);
            }
        }
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            ensure_dir_entry(&mut state.entries, parent);
            link_child(&mut state.entries, parent, path);
        }
        state.entries.insert(path.to_path_buf(), entry);
    }

    /// Resolve `path` to the real path of the entry it names.
    fn resolve(
        &self,
        state: &MockState,
        path: &Path,
        follow_last: bool,
        depth: usize,
    ) -> io::Result<PathBuf> {
        if depth > MAX_LINK_DEPTH {
            return Err(io::Error::other(format!("too many levels of symbolic links: {path:?}")));
        }

        let components: Vec<Component<'_>> = path.components().collect();
        let mut current = PathBuf::from("/");

        for (i, component) in components.iter().enumerate() {
            let name = match component {
                Component::Normal(name) => name,
                Component::ParentDir => {
                    current.pop();
                    continue;
                }
                _ => continue,
            };

            if state.denied.contains(&current) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("permission denied: {current:?}"),
                ));
            }

            let candidate = current.join(name);
            let is_last = i + 1 == components.len();

            match state.entries.get(&candidate) {
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("not found: {candidate:?}"),
                    ));
                }
                Some(MockEntry::Symlink(target)) if !is_last || follow_last => {
                    let target = current.join(target);
                    current = self.resolve(state, &target, true, depth + 1)?;
                }
                Some(MockEntry::File { .. }) if !is_last => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        format!("not a directory: {candidate:?}"),
                    ));
                }
                Some(_) => current = candidate,
            }
        }

        Ok(current)
    }

    fn meta_of(&self, path: &Path, follow_last: bool) -> io::Result<EntryMeta> {
        let state = self.lock();
        let real = self.resolve(&state, path, follow_last, 0)?;
        let meta = match state.entries.get(&real) {
            Some(MockEntry::File { executable }) => EntryMeta {
                kind: EntryKind::File,
                executable: *executable,
            },
            Some(MockEntry::Dir(_)) => EntryMeta {
                kind: EntryKind::Dir,
                executable: true,
            },
            Some(MockEntry::Symlink(_)) => EntryMeta {
                kind: EntryKind::Symlink,
                executable: true,
            },
            None => return Err(io::Error::from(io::ErrorKind::NotFound)),
        };
        Ok(meta)
    }
}

fn link_child(entries: &mut HashMap<PathBuf, MockEntry>, parent: &Path, path: &Path) {
    if let (Some(MockEntry::Dir(children)), Some(name)) =
        (entries.get_mut(parent), path.file_name().and_then(|n| n.to_str()))
    {
        if !children.iter().any(|c| c == name) {
            children.push(name.to_string());
        }
    }
}

fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    if let Some(parent) = path.parent() {
        ensure_dir_entry(entries, parent);
        link_child(entries, parent, path);
    }
}

impl FileSystem for MockFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        self.meta_of(path, true)
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        self.meta_of(path, false)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let state = self.lock();
        self.resolve(&state, path, true, 0)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.lock();
        let real = self.resolve(&state, path, true, 0)?;
        if state.denied.contains(&real) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {real:?}"),
            ));
        }
        match state.entries.get(&real) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {path:?}"),
            )),
        }
    }
}
