//! Search filtering of rows.
//!
//! The filtered view owns no state: it is recomputed from the rows and the
//! query on every read.

use super::Row;

/// Check if a row matches a lowercased query.
fn matches_lowercase(row: &Row, query_lower: &str) -> bool {
    row.input_column.to_lowercase().contains(query_lower)
        || row.action_column.to_lowercase().contains(query_lower)
        || row.enrichment.name.to_lowercase().contains(query_lower)
}

/// Check if a row matches a query.
///
/// Case-insensitive substring match against the input column, the action
/// column and the enrichment name. The empty query matches every row.
pub fn matches(row: &Row, query: &str) -> bool {
    query.is_empty() || matches_lowercase(row, &query.to_lowercase())
}

/// Rows matching `query`, in store order.
pub fn filter_rows<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    if query.is_empty() {
        return rows.iter().collect();
    }

    let query_lower = query.to_lowercase();
    rows.iter()
        .filter(|row| matches_lowercase(row, &query_lower))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row::{fixture_rows, Enrichment, EnrichmentStatus};
    use crate::table::RowId;

    fn ids(rows: &[&Row]) -> Vec<RowId> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        let rows = fixture_rows();
        let filtered = filter_rows(&rows, "");
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_bmw_matches_case_insensitively() {
        let rows = fixture_rows();
        let filtered = filter_rows(&rows, "bmw");
        assert_eq!(ids(&filtered), vec![2]);
        assert_eq!(filtered[0].action_column, "BMW Evaluation - Relevancy check");
    }

    #[test]
    fn test_matches_input_column() {
        let rows = fixture_rows();
        assert_eq!(ids(&filter_rows(&rows, "LINKEDIN")), vec![3]);
    }

    #[test]
    fn test_matches_enrichment_name() {
        let rows = vec![Row::new(
            1,
            "t",
            "alpha",
            "beta",
            Enrichment::new("Gamma Corp", EnrichmentStatus::Complete, None),
        )];
        assert_eq!(ids(&filter_rows(&rows, "gamma")), vec![1]);
    }

    #[test]
    fn test_description_is_not_searched() {
        let rows = fixture_rows();
        assert!(filter_rows(&rows, "blockchain").is_empty());
    }

    #[test]
    fn test_result_is_ordered_subsequence_of_matches() {
        let rows = fixture_rows();
        for query in ["e", "Evaluation", "loading", "check", "zzz", "A"] {
            let filtered = filter_rows(&rows, query);

            let mut cursor = 0;
            for row in &filtered {
                let position = rows[cursor..]
                    .iter()
                    .position(|r| r.id == row.id)
                    .expect("filtered rows keep store order");
                cursor += position + 1;
                assert!(matches(row, query));
            }

            let expected = rows.iter().filter(|r| matches(r, query)).count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn test_matches_empty_query() {
        let rows = fixture_rows();
        assert!(rows.iter().all(|r| matches(r, "")));
    }
}
