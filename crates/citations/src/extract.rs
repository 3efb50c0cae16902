//! Title normalization and citation extraction
//!
//! Converts raw scholar-search results into a bounded, ordered list of
//! (title, citation count) records. Missing fields never fail: an absent
//! citation count is zero, a result without a title is skipped.

use crate::MAX_PAPERS;
use scholargraph_common::scholar::ScholarResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One extracted paper: normalized title plus citation count.
///
/// The title doubles as the graph node identifier within a single search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    pub title: String,
    pub cited_by: u64,
}

/// Strip leading bracketed index tags such as `[PDF]` or `[CITATION]`.
///
/// Repeats while the string starts with `[`. A `[` with no closing `]` is
/// left untouched; the loop terminates instead of slicing past the end.
pub fn normalize_title(raw: &str) -> String {
    let mut title = raw.trim();
    while title.starts_with('[') {
        match title.find(']') {
            Some(end) => title = title[end + 1..].trim_start(),
            None => break,
        }
    }
    title.trim().to_string()
}

/// Extract citation records from a raw search response, in result order.
///
/// Results without a title are skipped; duplicate normalized titles keep the
/// first occurrence so a later record never silently overwrites an earlier
/// node's count. The list is capped at [`MAX_PAPERS`] entries.
pub fn extract_citations(response: &ScholarResponse) -> Vec<CitationRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for result in &response.organic_results {
        if records.len() >= MAX_PAPERS {
            break;
        }

        let Some(raw_title) = result.title.as_deref() else {
            continue;
        };

        let title = normalize_title(raw_title);
        if title.is_empty() || !seen.insert(title.clone()) {
            continue;
        }

        records.push(CitationRecord {
            title,
            cited_by: result.cited_by_total(),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> ScholarResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_strips_single_tag() {
        assert_eq!(
            normalize_title("[PDF] Deep Learning Basics"),
            "Deep Learning Basics"
        );
    }

    #[test]
    fn test_normalize_strips_multiple_tags() {
        assert_eq!(
            normalize_title("[PDF] [CITATION] Attention Is All You Need"),
            "Attention Is All You Need"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_title("[HTML] Graph Drawing");
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn test_normalize_unmatched_bracket_left_unchanged() {
        assert_eq!(normalize_title("[PDF broken title"), "[PDF broken title");
    }

    #[test]
    fn test_normalize_plain_title_untouched() {
        assert_eq!(normalize_title("Graph Theory 101"), "Graph Theory 101");
    }

    #[test]
    fn test_extract_reads_nested_count() {
        let response = response(json!({
            "organic_results": [
                {
                    "title": "[PDF] Deep Learning Basics",
                    "inline_links": { "cited_by": { "total": 42 } }
                }
            ]
        }));
        let records = extract_citations(&response);
        assert_eq!(
            records,
            vec![CitationRecord {
                title: "Deep Learning Basics".to_string(),
                cited_by: 42
            }]
        );
    }

    #[test]
    fn test_extract_defaults_missing_count_to_zero() {
        let response = response(json!({
            "organic_results": [{ "title": "Graph Theory 101" }]
        }));
        let records = extract_citations(&response);
        assert_eq!(records[0].cited_by, 0);
    }

    #[test]
    fn test_extract_skips_untitled_results() {
        let response = response(json!({
            "organic_results": [
                { "title": "Kept" },
                { "inline_links": { "cited_by": { "total": 10 } } },
                { "title": "Also Kept" }
            ]
        }));
        let records = extract_citations(&response);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Kept");
        assert_eq!(records[1].title, "Also Kept");
    }

    #[test]
    fn test_extract_caps_at_twenty() {
        let results: Vec<_> = (0..30)
            .map(|i| json!({ "title": format!("Paper {}", i) }))
            .collect();
        let response = response(json!({ "organic_results": results }));
        let records = extract_citations(&response);
        assert_eq!(records.len(), MAX_PAPERS);
        assert_eq!(records[0].title, "Paper 0");
        assert_eq!(records[19].title, "Paper 19");
    }

    #[test]
    fn test_extract_dedupes_first_occurrence_wins() {
        let response = response(json!({
            "organic_results": [
                { "title": "Same Title", "inline_links": { "cited_by": { "total": 5 } } },
                { "title": "[PDF] Same Title", "inline_links": { "cited_by": { "total": 99 } } }
            ]
        }));
        let records = extract_citations(&response);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cited_by, 5);
    }

    #[test]
    fn test_extract_empty_results() {
        let records = extract_citations(&response(json!({ "organic_results": [] })));
        assert!(records.is_empty());

        // Missing key entirely is also a valid empty state
        let records = extract_citations(&response(json!({})));
        assert!(records.is_empty());
    }
}
