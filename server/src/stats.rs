//! # Aggregation
//!
//! Applies one recorded search against the shared counts table.
//!
//! The sequence is load, increment in memory, write the whole table back.
//! There is no compare-and-swap: two concurrent writers can load the same
//! snapshot and one increment is lost when the second write lands. That is
//! an accepted property of the store's single-record get/put contract, and
//! the reported count stays truthful for the request that observed it.

use redis::aio::ConnectionManager;
use tracing::error;

use crate::{
    database::{CountsTable, load_table, save_table},
    error::AppError,
    keywords::normalize,
};

/// The pure step: bump the keyword's count in the snapshot, absent means 0.
pub fn apply_increment(table: &mut CountsTable, keyword: &str) -> u64 {
    let count = table.entry(keyword.to_string()).or_insert(0);
    *count += 1;

    *count
}

/// Normalizes and counts one search. Persistence failure is reported in the
/// log, not to the caller: the increment already happened from the caller's
/// point of view.
pub async fn record_search(
    connection: &mut ConnectionManager,
    raw: &str,
) -> Result<(String, u64), AppError> {
    let keyword = normalize(raw)?;

    let mut table = load_table(connection).await;
    let count = apply_increment(&mut table, &keyword);

    if let Err(e) = save_table(connection, &table).await {
        error!("Failed to persist count {count} for \"{keyword}\": {e}");
    }

    Ok((keyword, count))
}

#[cfg(test)]
mod tests {
    use super::apply_increment;
    use crate::{
        database::{CountsTable, parse_table, serialize_table},
        keywords::normalize,
    };

    #[test]
    fn test_monotonic_counting() {
        let mut table = CountsTable::new();

        for expected in 1..=25 {
            assert_eq!(apply_increment(&mut table, "movie"), expected);
        }

        assert_eq!(table["movie"], 25);
    }

    #[test]
    fn test_raw_variants_merge_under_one_key() {
        let mut table = CountsTable::new();

        for raw in ["  Movie ", "movie", "MOVIE"] {
            let keyword = normalize(raw).unwrap();
            apply_increment(&mut table, &keyword);
        }

        assert_eq!(table.len(), 1);
        assert_eq!(table["movie"], 3);
    }

    // Two writers both load the same snapshot, both increment, and the
    // second write overwrites the first: 2 increments, final count 1.
    #[test]
    fn test_interleaved_writers_lose_an_increment() {
        let stored = serialize_table(&CountsTable::new()).unwrap();

        let mut first = parse_table(Some(stored.clone()));
        let mut second = parse_table(Some(stored));

        assert_eq!(apply_increment(&mut first, "movie"), 1);
        assert_eq!(apply_increment(&mut second, "movie"), 1);

        let first_write = serialize_table(&first).unwrap();
        let second_write = serialize_table(&second).unwrap();

        let final_table = parse_table(Some(second_write));
        assert_eq!(final_table["movie"], 1);

        // sequential writers would not have collided
        let mut sequential = parse_table(Some(first_write));
        assert_eq!(apply_increment(&mut sequential, "movie"), 2);
    }

    #[test]
    fn test_recovers_from_corrupt_store() {
        let mut table = parse_table(Some("{broken".to_string()));

        assert!(table.is_empty());
        assert_eq!(apply_increment(&mut table, "x"), 1);
    }
}
