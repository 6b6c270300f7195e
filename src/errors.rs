//! Error types for the crate
//!
//! This module defines all error types used throughout the crate using the
//! `thiserror` crate. Only configuration and usage problems end up here:
//! per-file failures during a prune are collected in the
//! [`PruneReport`](crate::prune::PruneReport) instead of being raised.

use std::path::PathBuf;

use thiserror::Error;

/// Application error types
///
/// This enum represents all errors that abort an operation. Each variant
/// includes relevant context information.
#[derive(Error, Debug)]
pub enum AppError {
    /// A user supplied include or exclude pattern failed to compile
    #[error("Invalid {role} pattern `{pattern}`: {source}")]
    InvalidPattern {
        role: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// Prune root is empty, missing, or not a directory
    #[error("Invalid root {path:?}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },
    /// Both inputs of an operation were empty
    #[error("Empty input: {what}")]
    EmptyInput { what: &'static str },
    /// Chunk size of zero
    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,
    /// String input was empty or only whitespace
    #[error("{what} must contain characters other than whitespace")]
    BlankInput { what: &'static str },
    /// Malformed `KEY=VALUE` argument on the command line
    #[error("Invalid assignment `{arg}`, expected KEY=VALUE")]
    InvalidAssignment { arg: String },
    /// A prune run finished but recorded per-file failures
    #[error("Prune finished with {count} failure(s)")]
    PruneFailures { count: usize },
}

impl AppError {
    /// Create a new InvalidRoot error
    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AppError::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
