//! Filesystem access used by the pruner
//!
//! The walker only needs four primitives. They sit behind [`FileSystem`] so
//! tests can inject listing and deletion failures that are hard to provoke
//! on a real disk (for instance when running as root).

use log::warn;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Kind of a filesystem entry as seen by the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    /// Only reported when links are not being followed
    Symlink,
    /// Sockets, fifos, devices
    Other,
}

/// The subset of metadata the walker looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub kind: EntryKind,
    pub len: u64,
}

impl From<fs::Metadata> for EntryMeta {
    fn from(meta: fs::Metadata) -> Self {
        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        EntryMeta {
            kind,
            len: meta.len(),
        }
    }
}

/// Directory listing, stat and delete primitives
pub trait FileSystem {
    /// List the immediate children of `dir`
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Stat `path`, resolving a final symlink only when `follow_symlinks` is set
    fn metadata(&self, path: &Path, follow_symlinks: bool) -> io::Result<EntryMeta>;

    /// Resolve `path` to an absolute path without symlinks
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Remove a single file or symlink
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
        Ok(readable_entries(dir, entries))
    }

    fn metadata(&self, path: &Path, follow_symlinks: bool) -> io::Result<EntryMeta> {
        let meta = if follow_symlinks {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };

        Ok(meta.into())
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Keep the entries that could be read; a bad entry only loses itself
fn readable_entries<T>(dir: &Path, entries: impl IntoIterator<Item = io::Result<T>>) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|err| warn!("Skipping unreadable entry in {:?}: {}", dir, err))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_entry_does_not_drop_siblings() {
        let entries = vec![
            Ok(PathBuf::from("/d/a")),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad entry")),
            Ok(PathBuf::from("/d/b")),
        ];

        let kept = readable_entries(Path::new("/d"), entries);

        assert_eq!(kept, vec![PathBuf::from("/d/a"), PathBuf::from("/d/b")]);
    }

    #[test]
    fn test_os_metadata_kinds() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, b"abc").unwrap();

        let os = OsFileSystem;
        assert_eq!(
            os.metadata(&file, false).unwrap(),
            EntryMeta {
                kind: EntryKind::File,
                len: 3
            }
        );
        assert_eq!(os.metadata(tmp.path(), false).unwrap().kind, EntryKind::Dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_os_metadata_symlink_follow() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("target");
        fs::create_dir(&target).unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let os = OsFileSystem;
        assert_eq!(os.metadata(&link, false).unwrap().kind, EntryKind::Symlink);
        assert_eq!(os.metadata(&link, true).unwrap().kind, EntryKind::Dir);
    }

    #[test]
    fn test_os_read_dir_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = OsFileSystem.read_dir(&tmp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
