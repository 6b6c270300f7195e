//! Prune command implementation
//!
//! Runs the empty-file pruner over a single root and prints every deleted
//! path on stdout, one per line. Failures are logged as they are found and
//! summarized at the end.

use log::error;
use std::path::Path;

use crate::{
    errors::AppError,
    prune::{PruneOptions, PruneReport, Pruner},
};

/// Delete empty files under `root`
///
/// # Arguments
///
/// * `root` - Directory to walk
/// * `include` - Pattern a file name must fully match
/// * `exclude` - Pattern a file name must not fully match
/// * `options` - Depth bound, symlink and dry-run settings
///
/// # Errors
///
/// Returns an error if the patterns or the root are invalid, or
/// [`AppError::PruneFailures`] if any file or directory could not be
/// processed. In the latter case every other qualifying file has still been
/// deleted.
pub fn prune_empty_files(
    root: &Path,
    include: &str,
    exclude: &str,
    options: PruneOptions,
) -> Result<(), AppError> {
    let pruner = Pruner::new(include, exclude, options)?;
    let report = pruner.run(root)?;

    for path in &report.deleted {
        println!("{}", path.display());
    }

    check_report(&report)
}

fn check_report(report: &PruneReport) -> Result<(), AppError> {
    if report.is_clean() {
        return Ok(());
    }

    error!("{} path(s) could not be processed:", report.failures.len());
    for failure in &report.failures {
        error!("  - {} ({:?}): {}", failure.path.display(), failure.stage, failure.error);
    }

    Err(AppError::PruneFailures {
        count: report.failures.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune::{FailureStage, PruneFailure};
    use std::{fs, io, path::PathBuf};

    #[test]
    fn test_prune_empty_files_command() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("stale.lock"), b"").unwrap();
        fs::write(tmp.path().join("busy.lock"), b"pid").unwrap();

        prune_empty_files(tmp.path(), r".*\.lock", r"^$", PruneOptions::new(0)).unwrap();

        assert!(!tmp.path().join("stale.lock").exists());
        assert!(tmp.path().join("busy.lock").exists());
    }

    #[test]
    fn test_failures_become_an_error() {
        let report = PruneReport {
            failures: vec![PruneFailure {
                path: PathBuf::from("/x"),
                stage: FailureStage::Delete,
                error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            }],
            ..PruneReport::default()
        };

        let err = check_report(&report).unwrap_err();
        assert!(matches!(err, AppError::PruneFailures { count: 1 }));
        assert!(check_report(&PruneReport::default()).is_ok());
    }
}
