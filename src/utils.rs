//! Small stand-alone helpers
//!
//! - [`collections`] - map merging, frequency counting, chunking and batching
//! - [`strings`] - string reversal and `${key}` interpolation

pub mod collections;
pub mod strings;

pub use collections::{
    DEFAULT_BATCH_SIZE, batch_process, batch_process_some, chunk, frequencies, merge,
};
pub use strings::{interpolate, reverse};
