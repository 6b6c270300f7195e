//! List command implementation
//!
//! Thin wrappers that run the collection helpers over command-line items
//! and print the result, one group per line.

use log::debug;

use crate::{
    commands::parse_assignments,
    errors::AppError,
    utils::{batch_process, chunk, frequencies, merge},
};

/// Print `items` split into chunks of `size`
pub fn chunk_items(items: &[String], size: usize) -> Result<(), AppError> {
    for group in chunk(items, size)? {
        println!("{}", group.join(" "));
    }
    Ok(())
}

/// Print each distinct item with its count, most frequent first
pub fn count_items(items: &[String]) {
    for (item, count) in sorted_counts(items) {
        println!("{count}\t{item}");
    }
}

/// Print `items` in batches of `size` (zero selects the default size)
pub fn batch_items(items: &[String], size: usize) {
    let mut index = 0;
    batch_process(items.iter(), size, |batch| {
        index += 1;
        debug!("Batch {} holds {} item(s)", index, batch.len());
        let line: Vec<&str> = batch.iter().map(|item| item.as_str()).collect();
        println!("{}", line.join(" "));
    });
}

/// Print the merge of two `KEY=VALUE` lists, sorted by key
pub fn merge_pairs(
    left: &[String],
    right: &[String],
    override_existing: bool,
) -> Result<(), AppError> {
    let merged = merge(&parse_assignments(left)?, &parse_assignments(right)?, override_existing)?;

    let mut entries: Vec<_> = merged.into_iter().collect();
    entries.sort();
    for (key, value) in entries {
        println!("{key}={value}");
    }
    Ok(())
}

fn sorted_counts(items: &[String]) -> Vec<(String, usize)> {
    let mut counts: Vec<_> = frequencies(items).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sorted_counts_orders_by_count_then_name() {
        let counts = sorted_counts(&strings(&["b", "a", "c", "a", "c"]));
        assert_eq!(
            counts,
            vec![("a".to_string(), 2), ("c".to_string(), 2), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn test_chunk_items_rejects_zero() {
        assert!(matches!(
            chunk_items(&strings(&["a"]), 0),
            Err(AppError::InvalidChunkSize)
        ));
    }

    #[test]
    fn test_merge_pairs_needs_input() {
        assert!(matches!(
            merge_pairs(&[], &[], true),
            Err(AppError::EmptyInput { .. })
        ));
    }
}
