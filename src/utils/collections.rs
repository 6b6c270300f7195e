//! Collection helpers

use std::{collections::HashMap, fmt::Display, hash::Hash};

use crate::errors::AppError;

/// Batch size used by [`batch_process`] when asked for a size of zero
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Merge two maps into a new one
///
/// Every entry of `a` is copied first. Entries of `b` are then added; when a
/// key exists in both, the value from `b` replaces the one from `a` only if
/// `override_existing` is set.
///
/// # Errors
///
/// Returns [`AppError::EmptyInput`] when both maps are empty.
pub fn merge<K, V>(
    a: &HashMap<K, V>,
    b: &HashMap<K, V>,
    override_existing: bool,
) -> Result<HashMap<K, V>, AppError>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    if a.is_empty() && b.is_empty() {
        return Err(AppError::EmptyInput {
            what: "both maps are empty",
        });
    }

    let mut merged = a.clone();
    for (key, value) in b {
        if override_existing {
            merged.insert(key.clone(), value.clone());
        } else {
            merged.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }

    Ok(merged)
}

/// Count how often each item's string form occurs
pub fn frequencies<T: Display>(items: &[T]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Split `items` into consecutive chunks of `size`
///
/// The last chunk holds whatever is left and may be shorter.
///
/// # Errors
///
/// Returns [`AppError::EmptyInput`] for an empty slice and
/// [`AppError::InvalidChunkSize`] when `size` is zero.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>, AppError> {
    if items.is_empty() {
        return Err(AppError::EmptyInput {
            what: "nothing to chunk",
        });
    }
    if size == 0 {
        return Err(AppError::InvalidChunkSize);
    }

    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Feed `items` to `consumer` in batches of `batch_size`
///
/// A `batch_size` of zero falls back to [`DEFAULT_BATCH_SIZE`]. A trailing
/// batch shorter than the batch size is still delivered.
pub fn batch_process<T, I, F>(items: I, batch_size: usize, mut consumer: F)
where
    I: IntoIterator<Item = T>,
    F: FnMut(&[T]),
{
    let size = if batch_size == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        batch_size
    };

    let mut batch = Vec::with_capacity(size);
    for item in items {
        batch.push(item);
        if batch.len() == size {
            consumer(&batch);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        consumer(&batch);
    }
}

/// Like [`batch_process`], but `None` items are dropped before batching
pub fn batch_process_some<T, I, F>(items: I, batch_size: usize, consumer: F)
where
    I: IntoIterator<Item = Option<T>>,
    F: FnMut(&[T]),
{
    batch_process(items.into_iter().flatten(), batch_size, consumer);
}
