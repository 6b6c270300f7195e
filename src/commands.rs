//! Bodies of the `utilkit` subcommands
//!
//! Each function takes already-parsed arguments, calls into the library and
//! prints its result on stdout:
//!
//! - [`mod@prune`] prints each deleted path and fails if any path errored
//! - [`text`] prints a reversed or interpolated string
//! - [`list`] prints chunks, batches, counts or merged `KEY=VALUE` pairs

pub mod list;
pub mod prune;
pub mod text;

use std::collections::HashMap;

use crate::errors::AppError;

/// Parse `KEY=VALUE` arguments into a map
///
/// Only the first `=` separates key from value, so values may contain `=`.
/// A later assignment to the same key wins.
pub fn parse_assignments(args: &[String]) -> Result<HashMap<String, String>, AppError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| AppError::InvalidAssignment { arg: arg.clone() })
        })
        .collect()
}
