//! Core data types for citation extraction.
//!
//! law.go.kr identifies statutes two ways: the MST (법령일련번호) used by
//! the data API, and the lsiSeq used by HTML rendering pages. A statute's
//! text subdivides into articles (조), paragraphs (항), and items (호);
//! article numbers may carry a branch (제37조의2).

use serde::Serialize;

/// Identifies a statute across both identifier schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatuteRef {
    /// MST, the data-API identifier.
    pub master_id: String,

    /// Display name (법령명), also used for page-ID resolution.
    pub display_name: String,

    /// lsiSeq, the rendering-page identifier. Only populated after a
    /// successful resolution; never guessed.
    pub page_id: Option<String>,
}

impl StatuteRef {
    #[must_use]
    pub fn new(master_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            master_id: master_id.into(),
            display_name: display_name.into(),
            page_id: None,
        }
    }
}

/// Identifies one article within a statute. Immutable, built per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleRef {
    /// Article number (조번호), positive.
    pub number: u32,

    /// Branch number (조가지번호); 0 means the main article.
    pub branch: u32,
}

impl ArticleRef {
    #[must_use]
    pub fn new(number: u32, branch: u32) -> Self {
        Self { number, branch }
    }

    /// Display form: 제3조, or 제37조의2 for a branch article.
    #[must_use]
    pub fn display(&self) -> String {
        if self.branch > 0 {
            format!("제{}조의{}", self.number, self.branch)
        } else {
            format!("제{}조", self.number)
        }
    }
}

/// The four citation roles an article-page link can carry, in the fixed
/// style-marker hierarchy sfon1..sfon4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// sfon1: law name, usually 「법명」.
    LawName,
    /// sfon2: article, 제N조 or 제N조의M.
    Article,
    /// sfon3: paragraph, 제N항.
    Paragraph,
    /// sfon4: item, 제N호.
    Item,
}

impl FragmentKind {
    /// Map a style class to a citation role. Unrecognized classes are
    /// ordinary prose links, not citation fragments.
    #[must_use]
    pub fn from_style_class(class: &str) -> Option<Self> {
        match class {
            "sfon1" => Some(Self::LawName),
            "sfon2" => Some(Self::Article),
            "sfon3" => Some(Self::Paragraph),
            "sfon4" => Some(Self::Item),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LawName => "law_name",
            Self::Article => "article",
            Self::Paragraph => "paragraph",
            Self::Item => "item",
        }
    }
}

/// One classified unit extracted from article markup.
///
/// `document_order` is strictly increasing and also advances over
/// intervening prose, so consecutive orders mean the fragments were
/// directly adjacent in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationFragment {
    pub kind: FragmentKind,

    /// Display text with decorative 「」 brackets stripped from law names.
    pub text: String,

    /// Verbatim trimmed anchor text, brackets included.
    pub raw_text: String,

    /// Opaque target reference from the link's fncLsLawPop payload.
    /// Empty when the payload was unparsable.
    pub target_ref: String,

    pub document_order: u32,
}

/// Whether a citation points into the current statute or another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Internal,
    External,
}

impl CitationKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// One reconstructed cross-reference.
///
/// At least one of `target_law_name` / `target_article` is always set;
/// buffers that end up with neither are dropped during consolidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    #[serde(rename = "type")]
    pub kind: CitationKind,

    pub target_law_name: Option<String>,

    pub target_article: Option<u32>,

    /// Branch of the target article (제N조의M → M).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_article_branch: Option<u32>,

    pub target_paragraph: Option<u32>,

    pub target_item: Option<u32>,

    /// Concatenated display text of the contributing fragments.
    pub raw_text: String,

    /// First/last document order of the contributing fragments.
    #[serde(skip)]
    pub source_range: (u32, u32),
}

impl Citation {
    /// True when neither a law name nor an article number is set.
    /// Such a citation is invalid and must never be emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target_law_name.is_none() && self.target_article.is_none()
    }

    /// Identity used for deduplication: two citations with the same
    /// identity refer to the same provision.
    #[must_use]
    pub fn identity(
        &self,
    ) -> (
        CitationKind,
        Option<&str>,
        Option<u32>,
        Option<u32>,
        Option<u32>,
        Option<u32>,
    ) {
        (
            self.kind,
            self.target_law_name.as_deref(),
            self.target_article,
            self.target_article_branch,
            self.target_paragraph,
            self.target_item,
        )
    }
}

/// Final extraction output for one article.
#[derive(Debug, Clone)]
pub struct CitationResult {
    pub statute: StatuteRef,
    pub article: ArticleRef,

    /// Distinct citations in order of first appearance.
    pub citations: Vec<Citation>,

    pub internal_count: usize,
    pub external_count: usize,
}
