//! lexcite - Extract statutory citations from law.go.kr article pages.
//!
//! law.go.kr pre-links every citation inside an article's rendered HTML,
//! one `<a>` tag per token: law name, article, paragraph, item. This
//! crate retrieves that markup, classifies the link fragments, and
//! reassembles them into structured citations, split into internal
//! (same statute) and external (other statute) references.
//!
//! # Example
//!
//! ```
//! use lexcite::config;
//!
//! // Validate inputs before going to the network
//! assert!(config::validate_master_id("268611").is_ok());
//! assert!(config::validate_article_number(3).is_ok());
//! ```
//!
//! # Architecture
//!
//! The pipeline runs in five stages, each its own module:
//!
//! - [`config`]: Constants, input validation, URL builders
//! - [`types`]: Core data types (StatuteRef, CitationFragment, Citation, ...)
//! - [`error`]: Error taxonomy and Result alias
//! - [`http`]: HTTP client for law.go.kr
//! - [`resolver`]: MST → lsiSeq page-ID resolution
//! - [`fetcher`]: Article markup retrieval
//! - [`classifier`]: Fragment scanning and classification
//! - [`consolidator`]: Fragment → citation reassembly
//! - [`aggregator`]: Deduplication and counting
//! - [`extractor`]: Pipeline orchestration and response envelope
//! - [`cli`]: Command-line interface

pub mod aggregator;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod consolidator;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod http;
pub mod resolver;
pub mod types;

// Re-export the main entry points
pub use extractor::{response_json, Extractor, ExtractorConfig};

// Re-export commonly used items
pub use consolidator::ConsolidateOptions;
pub use error::{CitationError, Result};
pub use types::{
    ArticleRef, Citation, CitationFragment, CitationKind, CitationResult, FragmentKind, StatuteRef,
};
