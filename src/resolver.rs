//! Page-ID resolution: maps a statute's MST to the lsiSeq used by the
//! HTML rendering pages.
//!
//! The mapping is not exposed by any API; the public law page embeds the
//! lsiSeq in its iframe and script URLs, so resolution fetches that page
//! and extracts the first occurrence.

use std::collections::HashMap;

use regex::Regex;
use reqwest::blocking::Client;
use std::sync::LazyLock;

use crate::config::law_page_url;
use crate::error::{CitationError, Result};
use crate::http::get_text;
use crate::types::StatuteRef;

/// lsiSeq as it appears in iframe/script URLs on the law page.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LSI_SEQ_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lsiSeq=(\d+)").expect("valid regex"));

/// Request-scoped MST → lsiSeq cache.
///
/// Avoids repeat lookups when several articles of the same statute are
/// extracted in one session. Deliberately not process-wide: the mapping
/// changes when a law is re-consolidated, so cross-request reuse would
/// need a TTL this subsystem does not want to own.
#[derive(Debug, Default)]
pub struct PageIdCache {
    entries: HashMap<String, String>,
}

impl PageIdCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, master_id: &str) -> Option<&str> {
        self.entries.get(master_id).map(String::as_str)
    }

    pub fn insert(&mut self, master_id: impl Into<String>, page_id: impl Into<String>) {
        self.entries.insert(master_id.into(), page_id.into());
    }
}

/// Resolve a statute's lsiSeq from its public law page.
///
/// A single lookup call, no retries. Fails with
/// [`CitationError::Resolution`] when the page comes back without any
/// lsiSeq (unknown law, misspelled name), and with an upstream/transport
/// error when the lookup call itself fails.
pub fn resolve_page_id(client: &Client, base_url: &str, statute: &StatuteRef) -> Result<String> {
    let url = law_page_url(base_url, &statute.display_name)?;
    let response = get_text(client, &url)?;

    if response.status.as_u16() == 404 {
        return Err(CitationError::Resolution {
            master_id: statute.master_id.clone(),
            law_name: statute.display_name.clone(),
        });
    }
    if !response.status.is_success() {
        return Err(CitationError::Upstream {
            message: format!(
                "law page for '{}' returned {}",
                statute.display_name, response.status
            ),
        });
    }

    match LSI_SEQ_PATTERN.captures(&response.body) {
        Some(captures) => {
            let page_id = captures[1].to_string();
            tracing::debug!(
                master_id = %statute.master_id,
                page_id = %page_id,
                "resolved page ID"
            );
            Ok(page_id)
        }
        None => {
            tracing::warn!(
                master_id = %statute.master_id,
                law_name = %statute.display_name,
                "law page contained no lsiSeq"
            );
            Err(CitationError::Resolution {
                master_id: statute.master_id.clone(),
                law_name: statute.display_name.clone(),
            })
        }
    }
}

/// Extract the lsiSeq from already-fetched law page HTML.
#[must_use]
pub fn find_page_id(html: &str) -> Option<String> {
    LSI_SEQ_PATTERN
        .captures(html)
        .map(|captures| captures[1].to_string())
}
