//! # Catalog
//!
//! The externally maintained list of available resources.
//!
//! The catalog is owned and edited outside this service: a spreadsheet is
//! flattened into a single `data.json` document and published over HTTP.
//! This crate only models that document and fetches a fresh snapshot per
//! caller; nothing here writes or caches it.

use serde::{Deserialize, Deserializer};

pub mod remote;

/// One published resource. The gap analysis only reads `title` and
/// `keywords`; the remaining fields ride along for completeness.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub share_link: String,
    #[serde(default)]
    pub qrcode: String,
}

// Older catalog exports carry keywords as one comma-separated string instead
// of a list. Both forms must decode to the same shape.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keywords {
        List(Vec<String>),
        Single(String),
    }

    Ok(match Keywords::deserialize(deserializer)? {
        Keywords::List(list) => list,
        Keywords::Single(joined) => joined
            .split(',')
            .map(|keyword| keyword.trim().to_string())
            .collect(),
    })
}
