//! Extraction pipeline: resolve → fetch → classify → consolidate →
//! aggregate, plus the serialized response envelope.

use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::aggregator::aggregate;
use crate::classifier::classify;
use crate::config::{validate_article_number, validate_master_id, HTTP_TIMEOUT_SECS, LAW_GO_KR_BASE_URL};
use crate::consolidator::{consolidate, ConsolidateOptions};
use crate::error::{CitationError, Result};
use crate::fetcher::fetch_article_html;
use crate::http::create_client;
use crate::resolver::{resolve_page_id, PageIdCache};
use crate::types::{ArticleRef, CitationResult, StatuteRef};

/// Extractor configuration. The base URL is overridable so tests can
/// point at a mock server.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub options: ConsolidateOptions,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: LAW_GO_KR_BASE_URL.to_string(),
            timeout_secs: HTTP_TIMEOUT_SECS,
            options: ConsolidateOptions::default(),
        }
    }
}

/// Citation extractor for one session.
///
/// Holds the HTTP client and a session-scoped page-ID cache, so several
/// articles of the same statute cost one resolution. Independent
/// extractors share nothing and are safe to run concurrently.
pub struct Extractor {
    client: Client,
    config: ExtractorConfig,
    cache: PageIdCache,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = create_client(config.timeout_secs)?;
        Ok(Self {
            client,
            config,
            cache: PageIdCache::new(),
        })
    }

    /// Extract all citations from one statute article.
    ///
    /// The pipeline runs sequentially and propagates the first error;
    /// there is no meaningful partial result from a failed resolution or
    /// fetch. A successfully fetched article that cites nothing yields a
    /// result with zero citations, not an error.
    pub fn extract(
        &mut self,
        master_id: &str,
        display_name: &str,
        article_number: u32,
        branch_number: u32,
    ) -> Result<CitationResult> {
        validate_master_id(master_id)?;
        validate_article_number(article_number)?;

        let article = ArticleRef::new(article_number, branch_number);
        let mut statute = StatuteRef::new(master_id, display_name);
        tracing::info!(
            master_id,
            article = %article.display(),
            "extracting citations"
        );

        let page_id = match self.cache.get(master_id) {
            Some(page_id) => page_id.to_string(),
            None => {
                let page_id = resolve_page_id(&self.client, &self.config.base_url, &statute)?;
                self.cache.insert(master_id, page_id.clone());
                page_id
            }
        };
        statute.page_id = Some(page_id.clone());

        let html = fetch_article_html(&self.client, &self.config.base_url, &page_id, &article)?;
        let fragments = classify(&html);
        let citations = consolidate(&fragments, display_name, self.config.options);
        let result = aggregate(statute, article, citations);

        tracing::info!(
            citations = result.citations.len(),
            internal = result.internal_count,
            external = result.external_count,
            "extraction complete"
        );
        Ok(result)
    }
}

/// Convert a pipeline outcome into the serialized response envelope.
///
/// Success carries the citation list and counts; failure carries the
/// error kind and message. Errors never propagate past this boundary,
/// and a failed extraction is never passed off as a partial list.
#[must_use]
pub fn response_json(outcome: &Result<CitationResult>) -> Value {
    match outcome {
        Ok(result) => json!({
            "success": true,
            "law_name": result.statute.display_name,
            "article": result.article.display(),
            "citation_count": result.citations.len(),
            "internal_count": result.internal_count,
            "external_count": result.external_count,
            "citations": result.citations,
        }),
        Err(error) => json!({
            "success": false,
            "error_kind": error.kind(),
            "message": error.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Citation, CitationKind};

    #[test]
    fn test_extract_rejects_bad_master_id_before_any_network_call() {
        let mut extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let err = extractor.extract("not-a-mst", "신탁법", 3, 0).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_extract_rejects_zero_article_number() {
        let mut extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let err = extractor.extract("268611", "신탁법", 0, 0).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_response_json_success_shape() {
        let statute = StatuteRef::new("268611", "신탁법");
        let article = ArticleRef::new(3, 0);
        let citations = vec![Citation {
            kind: CitationKind::Internal,
            target_law_name: None,
            target_article: Some(20),
            target_article_branch: None,
            target_paragraph: None,
            target_item: None,
            raw_text: "제20조".to_string(),
            source_range: (0, 0),
        }];
        let outcome = Ok(aggregate(statute, article, citations));

        let envelope = response_json(&outcome);
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["law_name"], "신탁법");
        assert_eq!(envelope["article"], "제3조");
        assert_eq!(envelope["citation_count"], 1);
        assert_eq!(envelope["internal_count"], 1);
        assert_eq!(envelope["external_count"], 0);
        assert_eq!(envelope["citations"][0]["type"], "internal");
        assert_eq!(envelope["citations"][0]["target_article"], 20);
    }

    #[test]
    fn test_response_json_failure_shape() {
        let outcome: Result<CitationResult> = Err(CitationError::Resolution {
            master_id: "268611".to_string(),
            law_name: "없는법".to_string(),
        });

        let envelope = response_json(&outcome);
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["error_kind"], "ResolutionError");
        assert!(envelope["message"].as_str().unwrap().contains("없는법"));
        assert!(envelope.get("citations").is_none());
    }
}
