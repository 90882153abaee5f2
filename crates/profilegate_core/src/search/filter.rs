//! Case-insensitive title substring filter.

use crate::model::record::ListRecord;

/// Returns the records whose title contains `query`, ignoring case.
///
/// An empty query matches every record. Order of `records` is preserved.
pub fn filter_records<'a>(query: &str, records: &'a [ListRecord]) -> Vec<&'a ListRecord> {
    matching_records(query, records).collect()
}

/// Lazy form of [`filter_records`].
pub fn matching_records<'a>(
    query: &str,
    records: &'a [ListRecord],
) -> impl Iterator<Item = &'a ListRecord> + 'a {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(move |record| needle.is_empty() || record.title.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::filter_records;
    use crate::model::record::ListRecord;

    fn sample() -> Vec<ListRecord> {
        vec![
            ListRecord::new(1, 1, "Lorem ipsum", "first"),
            ListRecord::new(2, 1, "Dolor", "second lorem"),
        ]
    }

    #[test]
    fn empty_query_matches_all() {
        let records = sample();
        assert_eq!(filter_records("", &records).len(), 2);
    }

    #[test]
    fn matches_title_ignoring_case() {
        let records = sample();
        for query in ["Lorem", "lorem", "LOREM", "rem ip"] {
            let hits = filter_records(query, &records);
            assert_eq!(hits.len(), 1, "query `{query}`");
            assert_eq!(hits[0].id, 1);
        }
    }

    #[test]
    fn body_text_is_not_searched() {
        let records = sample();
        assert!(filter_records("second", &records).is_empty());
    }

    #[test]
    fn whitespace_query_is_literal() {
        let records = sample();
        assert_eq!(filter_records(" ", &records).len(), 1);
    }
}
