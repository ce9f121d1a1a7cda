//! # Ranking
//!
//! Derived views over a counts-table snapshot. Every function here is a pure
//! function of the snapshot it is handed; nothing mutates the table.
//!
//! All views share one ordering: descending by count, ties broken
//! lexicographically by keyword so identical tables always produce identical
//! output.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    database::CountsTable,
    keywords::{HotLevel, is_hot},
};

pub const HOT_LIST_LIMIT: usize = 20;
pub const SYNC_EXPORT_LIMIT: usize = 50;
pub const TOP_KEYWORDS_LIMIT: usize = 10;

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotEntry {
    pub word: String,
    pub count: u64,
    pub is_hot: bool,
    pub level: HotLevel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordStat {
    pub word: String,
    pub count: u64,
    pub meets_threshold: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSummary {
    pub total_keywords: usize,
    pub total_searches: u64,
    pub threshold: u64,
    pub keywords_above_threshold: usize,
    pub average_searches_per_keyword: String,
    pub top_keywords: Vec<KeywordStat>,
    pub all_stats: Vec<KeywordStat>,
}

fn sorted_entries(table: &CountsTable) -> Vec<(&String, u64)> {
    let mut entries: Vec<(&String, u64)> = table.iter().map(|(word, &count)| (word, count)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    entries
}

pub fn top_hot(table: &CountsTable, threshold: u64, limit: usize) -> Vec<HotEntry> {
    sorted_entries(table)
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .take(limit)
        .map(|(word, count)| HotEntry {
            word: word.clone(),
            count,
            is_hot: is_hot(count),
            level: HotLevel::classify(count),
        })
        .collect()
}

/// Same selection as [`top_hot`] with its own limit, shaped as a mapping.
/// The mapping is built in descending-count order.
pub fn sync_export(table: &CountsTable, threshold: u64, limit: usize) -> IndexMap<String, u64> {
    sorted_entries(table)
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .take(limit)
        .map(|(word, count)| (word.clone(), count))
        .collect()
}

/// Full dump: totals over every entry, hot or not.
pub fn debug_summary(table: &CountsTable, threshold: u64) -> DebugSummary {
    let all_stats: Vec<KeywordStat> = sorted_entries(table)
        .into_iter()
        .map(|(word, count)| KeywordStat {
            word: word.clone(),
            count,
            meets_threshold: count >= threshold,
        })
        .collect();

    let total_keywords = table.len();
    let total_searches: u64 = table.values().sum();
    let keywords_above_threshold = all_stats.iter().filter(|stat| stat.meets_threshold).count();

    let average_searches_per_keyword = if total_keywords > 0 {
        format!("{:.2}", total_searches as f64 / total_keywords as f64)
    } else {
        "0.00".to_string()
    };

    let top_keywords = all_stats.iter().take(TOP_KEYWORDS_LIMIT).cloned().collect();

    DebugSummary {
        total_keywords,
        total_searches,
        threshold,
        keywords_above_threshold,
        average_searches_per_keyword,
        top_keywords,
        all_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::{HOT_LIST_LIMIT, SYNC_EXPORT_LIMIT, debug_summary, sync_export, top_hot};
    use crate::{
        database::CountsTable,
        keywords::{HOT_THRESHOLD, HotLevel},
        stats::apply_increment,
    };

    fn table_of(entries: &[(&str, u64)]) -> CountsTable {
        entries
            .iter()
            .map(|&(word, count)| (word.to_string(), count))
            .collect()
    }

    #[test]
    fn test_top_hot_filters_sorts_limits() {
        let table = table_of(&[("a", 5), ("b", 30), ("c", 10), ("d", 100), ("e", 9)]);

        let hot = top_hot(&table, HOT_THRESHOLD, HOT_LIST_LIMIT);

        let words: Vec<&str> = hot.iter().map(|entry| entry.word.as_str()).collect();
        assert_eq!(words, vec!["d", "b", "c"]);

        for window in hot.windows(2) {
            assert!(window[0].count >= window[1].count);
        }

        assert!(hot.iter().all(|entry| entry.count >= HOT_THRESHOLD));
        assert!(hot.iter().all(|entry| entry.is_hot));
        assert_eq!(hot[0].level, HotLevel::Tier3);
        assert_eq!(hot[1].level, HotLevel::Tier1);
        assert_eq!(hot[2].level, HotLevel::Notable);
    }

    #[test]
    fn test_threshold_boundary() {
        let table = table_of(&[("nine", 9), ("ten", 10)]);

        let hot = top_hot(&table, HOT_THRESHOLD, HOT_LIST_LIMIT);

        assert_eq!(hot.len(), 1);
        assert_eq!(hot[0].word, "ten");
    }

    #[test]
    fn test_limits_respected() {
        let entries: Vec<(String, u64)> = (0..60)
            .map(|i| (format!("kw{i:02}"), 10 + i as u64))
            .collect();
        let table: CountsTable = entries.into_iter().collect();

        assert_eq!(top_hot(&table, HOT_THRESHOLD, HOT_LIST_LIMIT).len(), 20);
        assert_eq!(
            sync_export(&table, HOT_THRESHOLD, SYNC_EXPORT_LIMIT).len(),
            50
        );
    }

    #[test]
    fn test_deterministic_tie_order() {
        let table = table_of(&[("beta", 12), ("alpha", 12), ("gamma", 12)]);

        let first = top_hot(&table, HOT_THRESHOLD, HOT_LIST_LIMIT);
        let second = top_hot(&table, HOT_THRESHOLD, HOT_LIST_LIMIT);

        assert_eq!(first, second);

        let words: Vec<&str> = first.iter().map(|entry| entry.word.as_str()).collect();
        assert_eq!(words, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_sync_export_is_descending_mapping() {
        let table = table_of(&[("low", 11), ("high", 90), ("below", 2)]);

        let export = sync_export(&table, HOT_THRESHOLD, SYNC_EXPORT_LIMIT);

        let pairs: Vec<(&str, u64)> = export.iter().map(|(w, &c)| (w.as_str(), c)).collect();
        assert_eq!(pairs, vec![("high", 90), ("low", 11)]);
    }

    #[test]
    fn test_debug_summary() {
        let table = table_of(&[("a", 20), ("b", 5), ("c", 10)]);

        let summary = debug_summary(&table, HOT_THRESHOLD);

        assert_eq!(summary.total_keywords, 3);
        assert_eq!(summary.total_searches, 35);
        assert_eq!(summary.keywords_above_threshold, 2);
        assert_eq!(summary.average_searches_per_keyword, "11.67");
        assert_eq!(summary.all_stats.len(), 3);
        assert_eq!(summary.all_stats[0].word, "a");
        assert!(summary.all_stats[0].meets_threshold);
        assert!(!summary.all_stats[2].meets_threshold);
    }

    #[test]
    fn test_debug_summary_empty_table() {
        let summary = debug_summary(&CountsTable::new(), HOT_THRESHOLD);

        assert_eq!(summary.total_keywords, 0);
        assert_eq!(summary.total_searches, 0);
        assert_eq!(summary.average_searches_per_keyword, "0.00");
        assert!(summary.top_keywords.is_empty());
        assert!(summary.all_stats.is_empty());
    }

    #[test]
    fn test_top_keywords_capped_at_ten() {
        let entries: Vec<(String, u64)> = (0..15).map(|i| (format!("kw{i:02}"), i as u64)).collect();
        let table: CountsTable = entries.into_iter().collect();

        let summary = debug_summary(&table, HOT_THRESHOLD);

        assert_eq!(summary.top_keywords.len(), 10);
        assert_eq!(summary.all_stats.len(), 15);
    }

    // record("  Movie "), record("movie"), then a hot view with threshold 1
    #[test]
    fn test_recorded_variants_surface_as_one_entry() {
        let mut table = CountsTable::new();

        for raw in ["  Movie ", "movie"] {
            let keyword = crate::keywords::normalize(raw).unwrap();
            apply_increment(&mut table, &keyword);
        }

        let hot = top_hot(&table, 1, HOT_LIST_LIMIT);

        assert_eq!(hot.len(), 1);
        assert_eq!(hot[0].word, "movie");
        assert_eq!(hot[0].count, 2);
        assert!(!hot[0].is_hot);
        assert_eq!(hot[0].level, HotLevel::Ordinary);
    }
}
