//! Include/exclude name filtering
//!
//! Both patterns are compiled once, anchored at both ends so that a match
//! always covers the whole candidate string.

use regex::Regex;
use std::path::Path;

use crate::errors::AppError;

/// Which part of a candidate path the patterns are tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchTarget {
    /// The final path component only
    #[default]
    FileName,
    /// The full path as visited, including the root prefix
    FullPath,
}

/// Compiled include and exclude patterns
#[derive(Debug, Clone)]
pub struct NameFilter {
    include: Regex,
    exclude: Regex,
    target: MatchTarget,
}

impl NameFilter {
    /// Compile `include` and `exclude` with full-match semantics
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidPattern`] naming the pattern that failed.
    pub fn new(include: &str, exclude: &str, target: MatchTarget) -> Result<Self, AppError> {
        Ok(Self {
            include: compile_anchored("include", include)?,
            exclude: compile_anchored("exclude", exclude)?,
            target,
        })
    }

    /// Whether `path` passes the include pattern and escapes the exclude pattern
    pub fn accepts(&self, path: &Path) -> bool {
        let subject = match self.target {
            MatchTarget::FileName => match path.file_name() {
                Some(name) => name.to_string_lossy(),
                None => return false,
            },
            MatchTarget::FullPath => path.to_string_lossy(),
        };

        self.include.is_match(&subject) && !self.exclude.is_match(&subject)
    }
}

/// The raw pattern is compiled on its own first: an unbalanced `)` could
/// otherwise close the wrapping group and drop one of the anchors.
fn compile_anchored(role: &'static str, pattern: &str) -> Result<Regex, AppError> {
    let invalid = |source: regex::Error| AppError::InvalidPattern {
        role,
        pattern: pattern.to_string(),
        source,
    };

    Regex::new(pattern).map_err(invalid)?;
    Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &str, exclude: &str) -> NameFilter {
        NameFilter::new(include, exclude, MatchTarget::FileName).unwrap()
    }

    #[test]
    fn test_full_match_not_substring() {
        let f = filter(r"tmp", r"^$");
        assert!(f.accepts(Path::new("/x/tmp")));
        assert!(!f.accepts(Path::new("/x/a.tmp")));
        assert!(!f.accepts(Path::new("/x/tmpfile")));
    }

    #[test]
    fn test_exclude_wins() {
        let f = filter(r".*\.tmp", r"b\..*");
        assert!(f.accepts(Path::new("root/a.tmp")));
        assert!(!f.accepts(Path::new("root/b.tmp")));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        // Without the group, `^a|b$` would match "ax" through the first branch.
        let f = filter(r"a|b", r"^$");
        assert!(f.accepts(Path::new("a")));
        assert!(!f.accepts(Path::new("ax")));
    }

    #[test]
    fn test_matches_base_name_not_directories() {
        let f = filter(r".*\.tmp", r"^$");
        assert!(!f.accepts(Path::new("dir.tmp/file.log")));
    }

    #[test]
    fn test_full_path_target() {
        let f = NameFilter::new(r".*/sub/.*\.tmp", r"^$", MatchTarget::FullPath).unwrap();
        assert!(f.accepts(Path::new("/root/sub/d.tmp")));
        assert!(!f.accepts(Path::new("/root/d.tmp")));
    }

    #[test]
    fn test_pattern_that_only_compiles_once_wrapped_is_rejected() {
        // `^(?:a)|(b)$` would compile and match any name starting with `a`.
        let cases = [(r"a)|(b", r"^$", "include"), (r".*", r"a)|(b", "exclude")];
        for (include, exclude, role) in cases {
            let err = NameFilter::new(include, exclude, MatchTarget::FileName).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidPattern { role: r, .. } if r == role),
                "{include} / {exclude}: {err}"
            );
        }
    }

    #[test]
    fn test_invalid_pattern_names_role() {
        let err = NameFilter::new(r".*", r"(", MatchTarget::FileName).unwrap_err();
        match err {
            AppError::InvalidPattern { role, pattern, .. } => {
                assert_eq!(role, "exclude");
                assert_eq!(pattern, "(");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
