//! Article markup fetching from the law.go.kr side-panel endpoint.

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::config::article_panel_url;
use crate::error::{CitationError, Result};
use crate::http::get_text;
use crate::types::ArticleRef;

/// Structural anchors an article page always carries. A response without
/// either container is a login or error page, not article content.
#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static CONTENT_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.lawcon, div.pgroup").expect("valid selector"));

/// Fetch the rendered markup for one article.
///
/// Builds the canonical side-panel address and performs a single GET.
/// A 404 means the article does not exist at the resolved address; a
/// successful response is sanity-checked for article structure before
/// being handed to the classifier. No retries here; the caller owns
/// retry policy for the whole pipeline.
pub fn fetch_article_html(
    client: &Client,
    base_url: &str,
    page_id: &str,
    article: &ArticleRef,
) -> Result<String> {
    let url = article_panel_url(base_url, page_id, article.number, article.branch)?;
    let response = get_text(client, &url)?;

    if response.status.as_u16() == 404 || response.status.as_u16() == 410 {
        return Err(CitationError::NotFound {
            page_id: page_id.to_string(),
            article: article.display(),
        });
    }
    if !response.status.is_success() {
        return Err(CitationError::Upstream {
            message: format!(
                "article panel for {} returned {}",
                article.display(),
                response.status
            ),
        });
    }

    ensure_article_markup(&response.body, page_id, article)?;
    Ok(response.body)
}

/// Verify a 200 response actually contains the requested article.
///
/// Two distinct failure shapes: a page with no content container at all
/// (error/login page served with a success status), and a structurally
/// sound page that never mentions the requested article heading (the
/// panel renders empty for out-of-range article numbers).
pub fn ensure_article_markup(html: &str, page_id: &str, article: &ArticleRef) -> Result<()> {
    let document = Html::parse_document(html);

    if document.select(&CONTENT_ANCHOR).next().is_none() {
        tracing::warn!(
            page_id,
            article = %article.display(),
            "response has no article content container"
        );
        return Err(CitationError::MalformedMarkup {
            context: format!(
                "no content container in response for {} (lsiSeq {})",
                article.display(),
                page_id
            ),
        });
    }

    if !html.contains(&article.display()) {
        return Err(CitationError::NotFound {
            page_id: page_id.to_string(),
            article: article.display(),
        });
    }

    Ok(())
}
