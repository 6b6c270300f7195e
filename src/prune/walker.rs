//! Depth-bounded walk that deletes empty files
//!
//! Each pending directory carries its own depth on an explicit work stack, so
//! tree depth is bounded by heap rather than call stack. All bookkeeping lives
//! in a [`Walk`] value created per run, so nothing carries over between two
//! invocations of the same [`Pruner`].

use log::{debug, info, warn};
use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use super::{
    filesystem::{EntryKind, EntryMeta, FileSystem, OsFileSystem},
    filter::{MatchTarget, NameFilter},
};
use crate::errors::AppError;

/// Knobs for a prune run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOptions {
    /// Deepest directory level whose files are visited; the root is level 0
    pub max_depth: usize,
    /// Treat `max_depth == 0` as "no limit" instead of "root only"
    pub zero_depth_unlimited: bool,
    /// Test patterns against the base name or the whole path
    pub match_target: MatchTarget,
    /// Descend into symlinked directories and judge symlinked files by their target
    pub follow_symlinks: bool,
    /// Report qualifying files without deleting them
    pub dry_run: bool,
}

impl PruneOptions {
    /// Options with the given depth bound and every other setting at its default
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Whether a subdirectory found at `depth` may be entered
    pub fn may_descend(&self, depth: usize) -> bool {
        depth < self.max_depth || (self.max_depth == 0 && self.zero_depth_unlimited)
    }
}

/// Step of the walk at which a per-file failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Listing a directory; its subtree was skipped
    ReadDir,
    /// Stat or canonicalize of a single entry
    Metadata,
    /// Removing a qualifying file
    Delete,
}

/// A failure that was recorded without stopping the walk
#[derive(Debug)]
pub struct PruneFailure {
    pub path: PathBuf,
    pub stage: FailureStage,
    pub error: io::Error,
}

/// Outcome of one prune run
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Files removed, or that would have been removed in a dry run
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<PruneFailure>,
    pub files_visited: usize,
    /// Subdirectories left alone because of the depth bound
    pub dirs_skipped: usize,
    pub dry_run: bool,
}

impl PruneReport {
    /// True when no failure of any stage was recorded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures recorded at `stage`
    pub fn failures_at(&self, stage: FailureStage) -> impl Iterator<Item = &PruneFailure> {
        self.failures.iter().filter(move |f| f.stage == stage)
    }
}

/// Compiled patterns plus options, reusable across roots
#[derive(Debug, Clone)]
pub struct Pruner {
    filter: NameFilter,
    options: PruneOptions,
}

impl Pruner {
    /// Compile both patterns; nothing touches the filesystem yet
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidPattern`] if either pattern does not compile.
    pub fn new(include: &str, exclude: &str, options: PruneOptions) -> Result<Self, AppError> {
        let filter = NameFilter::new(include, exclude, options.match_target)?;
        Ok(Self { filter, options })
    }

    pub fn options(&self) -> &PruneOptions {
        &self.options
    }

    /// Prune `root` on the real filesystem
    pub fn run(&self, root: &Path) -> Result<PruneReport, AppError> {
        self.run_with(&OsFileSystem, root)
    }

    /// Prune `root` through the given filesystem
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRoot`] when `root` is empty, missing or not a
    /// directory. Every other problem is recorded in the returned report.
    pub fn run_with<F>(&self, fs: &F, root: &Path) -> Result<PruneReport, AppError>
    where
        F: FileSystem + ?Sized,
    {
        check_root(fs, root)?;

        info!(
            "Pruning empty files under {:?} (max depth {}{})",
            root,
            self.options.max_depth,
            if self.options.dry_run { ", dry run" } else { "" }
        );

        let mut walk = Walk {
            fs,
            filter: &self.filter,
            options: &self.options,
            report: PruneReport {
                dry_run: self.options.dry_run,
                ..PruneReport::default()
            },
            visited: HashSet::new(),
        };

        if self.options.follow_symlinks && !walk.first_visit(root) {
            return Ok(walk.report);
        }
        walk.visit_tree(root);

        let report = walk.report;
        info!(
            "Visited {} file(s): {} {}, {} failure(s), {} subdirector(ies) beyond depth",
            report.files_visited,
            report.deleted.len(),
            if report.dry_run { "to delete" } else { "deleted" },
            report.failures.len(),
            report.dirs_skipped
        );

        Ok(report)
    }
}

fn check_root<F>(fs: &F, root: &Path) -> Result<(), AppError>
where
    F: FileSystem + ?Sized,
{
    if root.as_os_str().is_empty() {
        return Err(AppError::invalid_root(root, "path is empty"));
    }

    match fs.metadata(root, true) {
        Ok(EntryMeta {
            kind: EntryKind::Dir,
            ..
        }) => Ok(()),
        Ok(_) => Err(AppError::invalid_root(root, "not a directory")),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(AppError::invalid_root(root, "does not exist"))
        }
        Err(err) => Err(AppError::invalid_root(root, err.to_string())),
    }
}

/// State of a single run
struct Walk<'a, F: ?Sized> {
    fs: &'a F,
    filter: &'a NameFilter,
    options: &'a PruneOptions,
    report: PruneReport,
    /// Canonical directories already entered, only tracked when following links
    visited: HashSet<PathBuf>,
}

impl<F> Walk<'_, F>
where
    F: FileSystem + ?Sized,
{
    /// Depth-first walk from `root` on an explicit stack of `(dir, depth)`
    ///
    /// A directory's files are evaluated when it is popped. Its admitted
    /// subdirectories are pushed in reverse so the first sibling's subtree is
    /// finished before the next sibling is entered.
    fn visit_tree(&mut self, root: &Path) {
        let mut pending = vec![(root.to_path_buf(), 0)];

        while let Some((dir, depth)) = pending.pop() {
            let subdirs = self.visit_dir(&dir, depth);
            pending.extend(subdirs.into_iter().rev().map(|sub| (sub, depth + 1)));
        }
    }

    /// Evaluate the entries of `dir` and return the subdirectories to enter
    fn visit_dir(&mut self, dir: &Path, depth: usize) -> Vec<PathBuf> {
        let mut children = match self.fs.read_dir(dir) {
            Ok(children) => children,
            Err(err) => {
                self.fail(dir, FailureStage::ReadDir, err);
                return Vec::new();
            }
        };
        children.sort();

        let mut subdirs = Vec::new();
        for child in children {
            let meta = match self.fs.metadata(&child, self.options.follow_symlinks) {
                Ok(meta) => meta,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!("Entry vanished or dangling link: {:?}", child);
                    continue;
                }
                Err(err) => {
                    self.fail(&child, FailureStage::Metadata, err);
                    continue;
                }
            };

            match meta.kind {
                EntryKind::Dir => {
                    if !self.options.may_descend(depth) {
                        debug!("Depth limit reached, skipping {:?}", child);
                        self.report.dirs_skipped += 1;
                        continue;
                    }
                    if self.options.follow_symlinks && !self.first_visit(&child) {
                        continue;
                    }
                    subdirs.push(child);
                }
                EntryKind::File => self.visit_file(&child, meta.len),
                EntryKind::Symlink => debug!("Not following symlink {:?}", child),
                EntryKind::Other => {}
            }
        }

        subdirs
    }

    fn visit_file(&mut self, path: &Path, len: u64) {
        self.report.files_visited += 1;

        if len != 0 || !self.filter.accepts(path) {
            return;
        }

        if self.options.dry_run {
            info!("Would delete {:?}", path);
            self.report.deleted.push(path.to_path_buf());
            return;
        }

        match self.fs.remove_file(path) {
            Ok(()) => {
                info!("Deleted {:?}", path);
                self.report.deleted.push(path.to_path_buf());
            }
            Err(err) => self.fail(path, FailureStage::Delete, err),
        }
    }

    /// Record `dir` as entered; false if a link already led there
    fn first_visit(&mut self, dir: &Path) -> bool {
        match self.fs.canonicalize(dir) {
            Ok(canonical) => {
                if self.visited.insert(canonical) {
                    true
                } else {
                    debug!("Already visited {:?}, not descending again", dir);
                    false
                }
            }
            Err(err) => {
                self.fail(dir, FailureStage::Metadata, err);
                false
            }
        }
    }

    fn fail(&mut self, path: &Path, stage: FailureStage, error: io::Error) {
        warn!("{:?} failed for {:?}: {}", stage, path, error);
        self.report.failures.push(PruneFailure {
            path: path.to_path_buf(),
            stage,
            error,
        });
    }
}
