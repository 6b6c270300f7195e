//! Empty-file pruning
//!
//! This module walks a directory tree depth-first and deletes every
//! zero-length file whose name fully matches an include pattern and does not
//! fully match an exclude pattern:
//!
//! - [`NameFilter`] compiles and applies the two patterns
//! - [`FileSystem`] abstracts listing, stat and delete
//! - [`Pruner`] runs the walk and produces a [`PruneReport`]
//!
//! Only configuration problems (bad pattern, bad root) are returned as
//! errors. Listing and deletion failures are collected in the report and the
//! walk carries on with the next entry.
//!
//! Two runs over overlapping trees at the same time race with each other: a
//! file removed by one shows up in the other as a vanished entry or a failed
//! delete. Nothing guards against that.

mod filesystem;
mod filter;
mod walker;

use std::path::Path;

pub use filesystem::{EntryKind, EntryMeta, FileSystem, OsFileSystem};
pub use filter::{MatchTarget, NameFilter};
pub use walker::{FailureStage, PruneFailure, PruneOptions, PruneReport, Pruner};

use crate::errors::AppError;

/// Delete empty files under `root` using default options
///
/// Files directly inside `root` are at depth 0; `max_depth` of 0 therefore
/// only looks at the root's own files.
///
/// # Errors
///
/// Returns an error if a pattern does not compile or `root` is not an
/// existing directory. Nothing is touched in either case.
pub fn prune(
    root: &Path,
    max_depth: usize,
    include: &str,
    exclude: &str,
) -> Result<PruneReport, AppError> {
    Pruner::new(include, exclude, PruneOptions::new(max_depth))?.run(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_prune_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("empty.txt"), b"").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/empty.txt"), b"").unwrap();

        let report = prune(tmp.path(), 0, r".*\.txt", r"^$").unwrap();

        assert_eq!(report.deleted, vec![tmp.path().join("empty.txt")]);
        assert!(tmp.path().join("nested/empty.txt").exists());
    }

    #[test]
    fn test_prune_checks_patterns_before_root() {
        let err = prune(Path::new(""), 0, r"(", r"^$").unwrap_err();
        assert!(matches!(err, AppError::InvalidPattern { .. }));
    }

    #[test]
    fn test_prune_rejects_pattern_that_escapes_anchors() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("axyz.tmp"), b"").unwrap();
        fs::write(tmp.path().join("b"), b"").unwrap();

        let err = prune(tmp.path(), 0, r"a)|(b", r"^$").unwrap_err();

        assert!(matches!(err, AppError::InvalidPattern { role: "include", .. }));
        assert!(tmp.path().join("axyz.tmp").exists());
        assert!(tmp.path().join("b").exists());
    }
}
