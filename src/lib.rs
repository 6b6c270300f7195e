#![forbid(unsafe_code)]

//! Generic utility helpers
//!
//! The centerpiece is the empty-file pruner in [`prune`], a depth-bounded
//! directory walk that deletes zero-length files selected by include and
//! exclude patterns. The [`utils`] module holds small collection and string
//! helpers. [`commands`] wires everything to the `utilkit` binary.

pub mod commands;
pub mod errors;
pub mod prune;
pub mod utils;

pub use errors::AppError;
pub use prune::{PruneOptions, PruneReport, Pruner, prune};
