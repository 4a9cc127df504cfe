//! Query classification and record matching.

use postakod_core::constants::MAX_QUERY_LIMIT;
use postakod_core::hierarchy::sort_by_location;
use postakod_core::{LocationRecord, SearchPattern, fold_for_search, is_numeric_query};

/// A classified search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Blank input: matches nothing.
    Empty,
    /// All ASCII digits: anchored postal-code prefix.
    PostalPrefix(String),
    /// Free text: diacritic- and case-insensitive substring over names,
    /// plain substring over the postal code.
    Text { raw: String, pattern: SearchPattern },
}

impl SearchQuery {
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if is_numeric_query(trimmed) {
            Self::PostalPrefix(trimmed.to_owned())
        } else {
            Self::Text { raw: trimmed.to_owned(), pattern: fold_for_search(trimmed) }
        }
    }

    #[must_use]
    pub fn matches(&self, record: &LocationRecord) -> bool {
        match self {
            Self::Empty => false,
            Self::PostalPrefix(prefix) => record.postal_code.as_str().starts_with(prefix.as_str()),
            Self::Text { raw, pattern } => {
                pattern.find_in(&record.province)
                    || pattern.find_in(&record.district)
                    || pattern.find_in(&record.neighborhood)
                    || record.subarea.as_deref().is_some_and(|s| pattern.find_in(s))
                    || record.postal_code.as_str().contains(raw.as_str())
            },
        }
    }
}

/// Keep matching candidates, order them by location and cut to `limit`.
///
/// The sort is stable, so records with equal names stay in store order.
#[must_use]
pub fn select(query: &SearchQuery, candidates: Vec<LocationRecord>, limit: usize) -> Vec<LocationRecord> {
    let mut hits: Vec<LocationRecord> = candidates.into_iter().filter(|r| query.matches(r)).collect();
    sort_by_location(&mut hits);
    hits.truncate(limit.min(MAX_QUERY_LIMIT));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(p: &str, d: &str, sub: Option<&str>, n: &str, code: &str) -> LocationRecord {
        LocationRecord::new(p, d, sub, n, code).unwrap()
    }

    #[test]
    fn classification() {
        assert_eq!(SearchQuery::parse("   "), SearchQuery::Empty);
        assert_eq!(SearchQuery::parse(" 347 "), SearchQuery::PostalPrefix("347".to_owned()));
        assert!(matches!(SearchQuery::parse("Moda"), SearchQuery::Text { .. }));
        assert!(matches!(SearchQuery::parse("34a"), SearchQuery::Text { .. }));
    }

    #[test]
    fn numeric_query_is_anchored_prefix() {
        let r = record("İstanbul", "Kadıköy", None, "Acıbadem", "34710");
        assert!(SearchQuery::parse("347").matches(&r));
        assert!(!SearchQuery::parse("710").matches(&r));
    }

    #[test]
    fn text_query_checks_subarea() {
        let r = record("İstanbul", "Kadıköy", Some("Göztepe"), "Merdivenköy", "34732");
        assert!(SearchQuery::parse("goztepe").matches(&r));
        assert!(!SearchQuery::parse("bostancı").matches(&r));
    }

    #[test]
    fn select_truncates_after_sorting() {
        let candidates = vec![
            record("İzmir", "Konak", None, "Alsancak", "35220"),
            record("Ankara", "Çankaya", None, "Kızılay", "06420"),
            record("Adana", "Seyhan", None, "Reşatbey", "01120"),
        ];
        let hits = select(&SearchQuery::parse("a"), candidates, 2);
        let provinces: Vec<&str> = hits.iter().map(|r| r.province.as_str()).collect();
        assert_eq!(provinces, vec!["Adana", "Ankara"]);
    }

    #[test]
    fn select_caps_limit() {
        let candidates: Vec<LocationRecord> =
            (0..1_200).map(|i| record("Ankara", "Çankaya", None, &format!("Mahalle {i}"), "06420")).collect();
        assert_eq!(select(&SearchQuery::parse("ankara"), candidates, 5_000).len(), MAX_QUERY_LIMIT);
    }
}
