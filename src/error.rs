//! Error types for citation extraction.

use thiserror::Error;

/// Main error type for the lexcite library.
#[derive(Debug, Error)]
pub enum CitationError {
    /// Invalid MST (law master number) format.
    #[error("Invalid master ID: '{0}'. Expected a non-empty digit string (e.g., 268611)")]
    InvalidMasterId(String),

    /// Article numbers start at 1.
    #[error("Invalid article number: {0}. Article numbers must be positive")]
    InvalidArticleNumber(u32),

    /// A base URL override that reqwest/url cannot parse.
    #[error("Invalid base URL: '{0}'")]
    InvalidBaseUrl(String),

    /// The law page was retrieved but contained no lsiSeq, so the MST
    /// could not be mapped to a rendering-page identifier.
    #[error("Could not resolve page ID for '{law_name}' (MST {master_id}). The law may not exist or the name may be incorrect")]
    Resolution { master_id: String, law_name: String },

    /// The article does not exist at the resolved address.
    #[error("Article {article} not found for lsiSeq {page_id}")]
    NotFound { page_id: String, article: String },

    /// HTTP transport failure (connect, timeout, invalid URL).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream service answered with an unexpected status or shape.
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// The fetched page has none of the structural anchors an article
    /// page carries, suggesting a login or error page was served.
    #[error("Malformed article markup: {context}")]
    MalformedMarkup { context: String },
}

impl CitationError {
    /// Wire-level error kind, used in the serialized failure envelope.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidMasterId(_) | Self::InvalidArticleNumber(_) | Self::InvalidBaseUrl(_) => {
                "ValidationError"
            }
            Self::Resolution { .. } => "ResolutionError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Http(_) | Self::Upstream { .. } => "UpstreamError",
            Self::MalformedMarkup { .. } => "MalformedMarkupError",
        }
    }
}

/// Result type alias for lexcite operations.
pub type Result<T> = std::result::Result<T, CitationError>;
