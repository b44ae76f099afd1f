//! Deduplication and summary counting over consolidated citations.

use std::collections::HashSet;

use crate::types::{ArticleRef, Citation, CitationKind, CitationResult, StatuteRef};

/// Assemble the final extraction result.
///
/// Citations with identical (type, law name, article, branch, paragraph,
/// item) are duplicates; the first occurrence wins and keeps its raw
/// text. Counts are per distinct citation, recomputed after
/// deduplication. Never fails, including on an empty citation list.
#[must_use]
pub fn aggregate(
    statute: StatuteRef,
    article: ArticleRef,
    citations: Vec<Citation>,
) -> CitationResult {
    let mut seen: HashSet<(
        CitationKind,
        Option<String>,
        Option<u32>,
        Option<u32>,
        Option<u32>,
        Option<u32>,
    )> = HashSet::new();

    let mut distinct: Vec<Citation> = Vec::with_capacity(citations.len());
    for citation in citations {
        let (kind, law_name, art, branch, paragraph, item) = citation.identity();
        let key = (kind, law_name.map(str::to_string), art, branch, paragraph, item);
        if seen.insert(key) {
            distinct.push(citation);
        } else {
            tracing::debug!(raw_text = %citation.raw_text, "dropping duplicate citation");
        }
    }

    let internal_count = distinct
        .iter()
        .filter(|c| c.kind == CitationKind::Internal)
        .count();
    let external_count = distinct.len() - internal_count;

    CitationResult {
        statute,
        article,
        citations: distinct,
        internal_count,
        external_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(kind: CitationKind, article: Option<u32>, paragraph: Option<u32>) -> Citation {
        Citation {
            kind,
            target_law_name: None,
            target_article: article,
            target_article_branch: None,
            target_paragraph: paragraph,
            target_item: None,
            raw_text: "raw".to_string(),
            source_range: (0, 0),
        }
    }

    fn subject() -> (StatuteRef, ArticleRef) {
        (StatuteRef::new("268611", "신탁법"), ArticleRef::new(3, 0))
    }

    #[test]
    fn test_aggregate_counts() {
        let (statute, article) = subject();
        let citations = vec![
            citation(CitationKind::Internal, Some(20), None),
            citation(CitationKind::Internal, Some(37), Some(1)),
            Citation {
                target_law_name: Some("형법".to_string()),
                ..citation(CitationKind::External, Some(9), None)
            },
        ];

        let result = aggregate(statute, article, citations);
        assert_eq!(result.citations.len(), 3);
        assert_eq!(result.internal_count, 2);
        assert_eq!(result.external_count, 1);
        assert_eq!(
            result.internal_count + result.external_count,
            result.citations.len()
        );
    }

    #[test]
    fn test_aggregate_dedup_keeps_first_raw_text() {
        let (statute, article) = subject();
        let mut first = citation(CitationKind::Internal, Some(20), None);
        first.raw_text = "제20조".to_string();
        let mut second = citation(CitationKind::Internal, Some(20), None);
        second.raw_text = "제20조 (다시)".to_string();

        let result = aggregate(statute, article, vec![first, second]);
        assert_eq!(result.citations.len(), 1);
        assert_eq!(result.citations[0].raw_text, "제20조");
    }

    #[test]
    fn test_aggregate_distinct_paragraphs_not_merged() {
        let (statute, article) = subject();
        let citations = vec![
            citation(CitationKind::Internal, Some(37), Some(1)),
            citation(CitationKind::Internal, Some(37), Some(2)),
        ];

        let result = aggregate(statute, article, citations);
        assert_eq!(result.citations.len(), 2);
    }

    #[test]
    fn test_aggregate_kind_distinguishes_duplicates() {
        let (statute, article) = subject();
        let citations = vec![
            citation(CitationKind::Internal, Some(5), None),
            citation(CitationKind::External, Some(5), None),
        ];

        let result = aggregate(statute, article, citations);
        assert_eq!(result.citations.len(), 2);
        assert_eq!(result.internal_count, 1);
        assert_eq!(result.external_count, 1);
    }

    #[test]
    fn test_aggregate_empty() {
        let (statute, article) = subject();
        let result = aggregate(statute, article, Vec::new());
        assert!(result.citations.is_empty());
        assert_eq!(result.internal_count, 0);
        assert_eq!(result.external_count, 0);
    }
}
