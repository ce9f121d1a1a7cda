//! # Keywords
//!
//! Canonical keyword form and the shared hotness scale.
//!
//! Every key in the counts table is the normalized form: trimmed,
//! lower-cased, at most [`MAX_KEYWORD_CHARS`] characters. Distinct raw
//! inputs that differ only in case or surrounding whitespace merge under one
//! key on purpose.
//!
//! The hotness cutoffs are shared by every view that classifies a count.
//! Changing one here changes them everywhere.

use serde::Serialize;

use crate::error::AppError;

pub const MAX_KEYWORD_CHARS: usize = 100;

/// Counts at or above this are eligible for the ranked/exported views.
pub const HOT_THRESHOLD: u64 = 10;

/// Canonicalizes raw keyword input. The length bound applies to the trimmed
/// input, before case folding.
pub fn normalize(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(AppError::MissingKeyword);
    }

    let length = trimmed.chars().count();
    if length > MAX_KEYWORD_CHARS {
        return Err(AppError::KeywordTooLong(length));
    }

    Ok(trimmed.to_lowercase())
}

pub fn is_hot(count: u64) -> bool {
    count >= HOT_THRESHOLD
}

/// Coarse display classification of count magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HotLevel {
    Ordinary,
    Notable,
    Tier1,
    Tier2,
    Tier3,
}

impl HotLevel {
    pub fn classify(count: u64) -> Self {
        match count {
            c if c >= 100 => HotLevel::Tier3,
            c if c >= 50 => HotLevel::Tier2,
            c if c >= 20 => HotLevel::Tier1,
            c if c >= HOT_THRESHOLD => HotLevel::Notable,
            _ => HotLevel::Ordinary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HotLevel, MAX_KEYWORD_CHARS, is_hot, normalize};
    use crate::error::AppError;

    #[test]
    fn test_basic() {
        assert_eq!(normalize("Movie").unwrap(), "movie");
        assert_eq!(normalize("  Movie  ").unwrap(), "movie");
        assert_eq!(normalize("mOvIe NiGhT").unwrap(), "movie night");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("  Some Query  ").unwrap();
        let twice = normalize(&once).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty() {
        assert!(matches!(normalize(""), Err(AppError::MissingKeyword)));
        assert!(matches!(normalize("   "), Err(AppError::MissingKeyword)));
    }

    #[test]
    fn test_length_bound() {
        let at_limit = "a".repeat(MAX_KEYWORD_CHARS);
        assert_eq!(normalize(&at_limit).unwrap(), at_limit);

        let over_limit = "a".repeat(MAX_KEYWORD_CHARS + 1);
        assert!(matches!(
            normalize(&over_limit),
            Err(AppError::KeywordTooLong(101))
        ));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 100 three-byte characters stay within the bound
        let wide = "电".repeat(MAX_KEYWORD_CHARS);
        assert!(normalize(&wide).is_ok());
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(!is_hot(9));
        assert!(is_hot(10));
    }

    #[test]
    fn test_levels() {
        assert_eq!(HotLevel::classify(0), HotLevel::Ordinary);
        assert_eq!(HotLevel::classify(9), HotLevel::Ordinary);
        assert_eq!(HotLevel::classify(10), HotLevel::Notable);
        assert_eq!(HotLevel::classify(19), HotLevel::Notable);
        assert_eq!(HotLevel::classify(20), HotLevel::Tier1);
        assert_eq!(HotLevel::classify(50), HotLevel::Tier2);
        assert_eq!(HotLevel::classify(99), HotLevel::Tier2);
        assert_eq!(HotLevel::classify(100), HotLevel::Tier3);
    }
}
