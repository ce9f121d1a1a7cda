//! # Gap analysis
//!
//! Cross-references hot keywords against the published catalog to surface
//! demand the catalog does not serve.
//!
//! Coverage is plain substring containment on the catalog's raw text, case
//! sensitive. A short keyword matching inside a longer title counts as
//! covered on purpose; this is a documented matching policy, not a search
//! feature, and must not be upgraded to token or fuzzy matching.

use catalog::CatalogItem;
use chrono::NaiveDate;
use serde::Serialize;

use crate::{database::CountsTable, keywords::HotLevel};

pub const GAP_REASON: &str = "high demand, no matching catalog entry";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapEntry {
    pub keyword: String,
    pub count: u64,
    pub level: HotLevel,
    pub reason: String,
    /// Date the gap was computed. Not tracked across calls.
    pub first_seen_date: String,
}

fn is_covered(keyword: &str, items: &[CatalogItem]) -> bool {
    items.iter().any(|item| {
        item.title.contains(keyword)
            || item
                .keywords
                .iter()
                .filter(|entry| !entry.is_empty())
                .any(|entry| entry.contains(keyword) || keyword.contains(entry.as_str()))
    })
}

/// Hot keywords with no covering catalog entry, descending by count. An
/// empty catalog (including the fetch-failure fallback) reports every hot
/// keyword as a gap.
pub fn find_gaps(
    table: &CountsTable,
    items: &[CatalogItem],
    threshold: u64,
    today: NaiveDate,
) -> Vec<GapEntry> {
    let first_seen_date = today.format("%Y-%m-%d").to_string();

    let mut gaps: Vec<GapEntry> = table
        .iter()
        .filter(|&(_, &count)| count >= threshold)
        .filter(|&(keyword, _)| !is_covered(keyword, items))
        .map(|(keyword, &count)| GapEntry {
            keyword: keyword.clone(),
            count,
            level: HotLevel::classify(count),
            reason: GAP_REASON.to_string(),
            first_seen_date: first_seen_date.clone(),
        })
        .collect();

    gaps.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });

    gaps
}
