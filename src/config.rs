//! Configuration constants, input validation, and URL builders.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::error::{CitationError, Result};

/// Base URL for the law.go.kr website.
pub const LAW_GO_KR_BASE_URL: &str = "https://www.law.go.kr";

/// Path of the side-panel endpoint that renders a single article.
pub const ARTICLE_PANEL_PATH: &str = "/LSW/lsSideInfoP.do";

/// Path segment of the public law page, used for page-ID resolution.
/// The law name is appended as a second, percent-encoded segment.
pub const LAW_PAGE_SEGMENT: &str = "법령";

/// HTTP timeout in seconds.
///
/// Article pages are small; 15 seconds accommodates slow upstream
/// responses without letting a request hang.
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// MST pattern: one or more digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MASTER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Validate MST (law master number) format.
///
/// # Examples
/// ```
/// use lexcite::config::validate_master_id;
///
/// assert!(validate_master_id("268611").is_ok());
/// assert!(validate_master_id("").is_err());
/// assert!(validate_master_id("abc123").is_err());
/// ```
pub fn validate_master_id(master_id: &str) -> Result<()> {
    if MASTER_ID_PATTERN.is_match(master_id) {
        Ok(())
    } else {
        Err(CitationError::InvalidMasterId(master_id.to_string()))
    }
}

/// Validate an article number. Article numbering starts at 1; the branch
/// number (조가지번호) may be 0, meaning the main article.
pub fn validate_article_number(article_number: u32) -> Result<()> {
    if article_number == 0 {
        return Err(CitationError::InvalidArticleNumber(article_number));
    }
    Ok(())
}

/// Build the public law page URL used for page-ID resolution.
///
/// The law name becomes a percent-encoded path segment, e.g.
/// `https://www.law.go.kr/법령/신탁법`.
pub fn law_page_url(base_url: &str, law_name: &str) -> Result<String> {
    let mut url =
        Url::parse(base_url).map_err(|_| CitationError::InvalidBaseUrl(base_url.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| CitationError::InvalidBaseUrl(base_url.to_string()))?
        .push(LAW_PAGE_SEGMENT)
        .push(law_name);
    Ok(url.into())
}

/// Build the side-panel URL for one article.
///
/// The endpoint expects a zero-padded 4-digit article number (`joNo`) and
/// a zero-padded 2-digit branch number (`joBrNo`): 제3조 → `joNo=0003`,
/// 제37조의2 → `joNo=0037&joBrNo=02`.
pub fn article_panel_url(
    base_url: &str,
    page_id: &str,
    article_number: u32,
    branch_number: u32,
) -> Result<String> {
    let mut url =
        Url::parse(base_url).map_err(|_| CitationError::InvalidBaseUrl(base_url.to_string()))?;
    url.set_path(ARTICLE_PANEL_PATH);
    url.query_pairs_mut()
        .append_pair("lsiSeq", page_id)
        .append_pair("joNo", &format!("{article_number:04}"))
        .append_pair("joBrNo", &format!("{branch_number:02}"))
        .append_pair("docCls", "jo")
        .append_pair("urlMode", "lsScJoRltInfoR");
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_master_id_valid() {
        assert!(validate_master_id("268611").is_ok());
        assert!(validate_master_id("1").is_ok());
        assert!(validate_master_id("000123").is_ok());
    }

    #[test]
    fn test_validate_master_id_invalid() {
        assert!(validate_master_id("").is_err());
        assert!(validate_master_id("268611a").is_err());
        assert!(validate_master_id("MST268611").is_err());
        assert!(validate_master_id("2686 11").is_err());
    }

    #[test]
    fn test_validate_article_number() {
        assert!(validate_article_number(1).is_ok());
        assert!(validate_article_number(9999).is_ok());
        assert!(validate_article_number(0).is_err());
    }

    #[test]
    fn test_law_page_url_encodes_korean_name() {
        let url = law_page_url(LAW_GO_KR_BASE_URL, "신탁법").unwrap();
        assert!(url.starts_with("https://www.law.go.kr/"));
        // Both the 법령 segment and the law name must be percent-encoded
        assert_eq!(
            url,
            "https://www.law.go.kr/%EB%B2%95%EB%A0%B9/%EC%8B%A0%ED%83%81%EB%B2%95"
        );
    }

    #[test]
    fn test_law_page_url_invalid_base() {
        assert!(law_page_url("not a url", "신탁법").is_err());
    }

    #[test]
    fn test_article_panel_url_padding() {
        let url = article_panel_url(LAW_GO_KR_BASE_URL, "123456", 3, 0).unwrap();
        assert_eq!(
            url,
            "https://www.law.go.kr/LSW/lsSideInfoP.do?lsiSeq=123456&joNo=0003&joBrNo=00&docCls=jo&urlMode=lsScJoRltInfoR"
        );
    }

    #[test]
    fn test_article_panel_url_branch() {
        let url = article_panel_url(LAW_GO_KR_BASE_URL, "123456", 37, 2).unwrap();
        assert!(url.contains("joNo=0037"));
        assert!(url.contains("joBrNo=02"));
    }
}
