//! Citation consolidation: fold the flat fragment sequence back into
//! complete citations.
//!
//! A single left-to-right scan over the fragments, holding at most one
//! in-progress citation. A law-name fragment always opens a fresh
//! citation; an article fragment joins a directly adjacent law name or
//! opens an internal citation; paragraph and item fragments attach to
//! whatever is in progress, with a repeated paragraph/item splitting off
//! a sibling citation that shares the law name and article (the
//! "제37조제1항 및 제2항" pattern).

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Citation, CitationFragment, CitationKind, FragmentKind};

/// Article numerals: 제N조, optionally with a branch 제N조의M.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"제(\d+)조(?:의(\d+))?").expect("valid regex"));

/// Paragraph numerals: 제N항.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"제(\d+)항").expect("valid regex"));

/// Item numerals: 제N호.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"제(\d+)호").expect("valid regex"));

/// Article ranges: 제N조부터 제M조까지, linked as a single anchor.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"제(\d+)조(?:의\d+)?부터\s*제(\d+)조(?:의\d+)?까지").expect("valid regex")
});

/// Phrases that re-state the current statute instead of naming another
/// one (같은 법 / 이 법).
const SAME_LAW_PHRASES: &[&str] = &["같은 법", "이 법"];

/// Cap for opt-in range expansion, so pathological markup cannot blow up
/// output cardinality.
const MAX_RANGE_EXPANSION: u32 = 50;

/// Policy knobs for consolidation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolidateOptions {
    /// Emit citations that consist of a law name alone, with no article,
    /// paragraph, or item attached (e.g. a passing "see also 「민법」").
    /// Off by default: such mentions are usually noise.
    pub include_bare_law_mentions: bool,

    /// Expand a range anchor (제88조부터 제93조까지) into one citation per
    /// article. Off by default: the range collapses to its first article,
    /// with the full range text preserved in `raw_text`.
    pub expand_ranges: bool,
}

/// In-progress citation being assembled from consecutive fragments.
#[derive(Debug)]
struct Buffer {
    kind: CitationKind,
    law_name: Option<String>,
    article: Option<u32>,
    branch: Option<u32>,
    paragraph: Option<u32>,
    item: Option<u32>,
    range_end: Option<u32>,
    raw_parts: Vec<String>,
    first_order: u32,
    last_order: u32,
}

impl Buffer {
    fn from_law_name(fragment: &CitationFragment, source_law_name: &str) -> Self {
        let same_law = SAME_LAW_PHRASES
            .iter()
            .any(|phrase| fragment.text.contains(phrase));
        let (kind, law_name) = if same_law {
            // 같은 법 / 이 법 re-states the statute under extraction
            (CitationKind::Internal, source_law_name.to_string())
        } else {
            (CitationKind::External, fragment.text.clone())
        };
        Self {
            kind,
            law_name: Some(law_name),
            article: None,
            branch: None,
            paragraph: None,
            item: None,
            range_end: None,
            raw_parts: vec![fragment.raw_text.clone()],
            first_order: fragment.document_order,
            last_order: fragment.document_order,
        }
    }

    fn from_article(fragment: &CitationFragment) -> Self {
        let (article, branch, range_end) = parse_article_numbers(&fragment.text);
        Self {
            kind: CitationKind::Internal,
            law_name: None,
            article,
            branch,
            paragraph: None,
            item: None,
            range_end,
            raw_parts: vec![fragment.raw_text.clone()],
            first_order: fragment.document_order,
            last_order: fragment.document_order,
        }
    }

    /// Sibling buffer for a repeated paragraph/item: carries the law name
    /// and article over, sets only the new field.
    fn carry_over(&self, fragment: &CitationFragment) -> Self {
        let mut next = Self {
            kind: self.kind,
            law_name: self.law_name.clone(),
            article: self.article,
            branch: self.branch,
            paragraph: None,
            item: None,
            range_end: None,
            raw_parts: vec![fragment.raw_text.clone()],
            first_order: fragment.document_order,
            last_order: fragment.document_order,
        };
        match fragment.kind {
            FragmentKind::Paragraph => next.paragraph = parse_numeral(&PARAGRAPH_PATTERN, &fragment.text),
            FragmentKind::Item => next.item = parse_numeral(&ITEM_PATTERN, &fragment.text),
            _ => {}
        }
        next
    }

    fn absorb(&mut self, fragment: &CitationFragment) {
        self.raw_parts.push(fragment.raw_text.clone());
        self.last_order = fragment.document_order;
    }

    fn has_detail(&self) -> bool {
        self.article.is_some() || self.paragraph.is_some() || self.item.is_some()
    }

    fn into_citation(self) -> Citation {
        Citation {
            kind: self.kind,
            target_law_name: self.law_name,
            target_article: self.article,
            target_article_branch: self.branch,
            target_paragraph: self.paragraph,
            target_item: self.item,
            raw_text: self.raw_parts.join(" "),
            source_range: (self.first_order, self.last_order),
        }
    }
}

/// Consolidate classified fragments into complete citations.
///
/// `source_law_name` is the display name of the statute under extraction;
/// it is substituted for same-law phrases so those citations stay
/// internal and keep a resolvable target.
#[must_use]
pub fn consolidate(
    fragments: &[CitationFragment],
    source_law_name: &str,
    options: ConsolidateOptions,
) -> Vec<Citation> {
    let mut output: Vec<Citation> = Vec::new();
    let mut current: Option<Buffer> = None;

    for fragment in fragments {
        match fragment.kind {
            FragmentKind::LawName => {
                flush(&mut current, &mut output, options);
                current = Some(Buffer::from_law_name(fragment, source_law_name));
            }
            FragmentKind::Article => {
                let joins_law_name = matches!(
                    &current,
                    Some(buffer)
                        if buffer.law_name.is_some()
                            && buffer.article.is_none()
                            && fragment.document_order == buffer.last_order + 1
                );
                if joins_law_name {
                    if let Some(buffer) = current.as_mut() {
                        let (article, branch, range_end) = parse_article_numbers(&fragment.text);
                        buffer.article = article;
                        buffer.branch = branch;
                        buffer.range_end = range_end;
                        buffer.absorb(fragment);
                    }
                } else {
                    flush(&mut current, &mut output, options);
                    current = Some(Buffer::from_article(fragment));
                }
            }
            FragmentKind::Paragraph | FragmentKind::Item => {
                let number = match fragment.kind {
                    FragmentKind::Paragraph => parse_numeral(&PARAGRAPH_PATTERN, &fragment.text),
                    _ => parse_numeral(&ITEM_PATTERN, &fragment.text),
                };
                let slot_free = current.as_ref().map(|buffer| match fragment.kind {
                    FragmentKind::Paragraph => buffer.paragraph.is_none(),
                    _ => buffer.item.is_none(),
                });
                match slot_free {
                    None => {
                        // A paragraph/item with no context cannot form a
                        // valid citation
                        tracing::debug!(
                            text = %fragment.text,
                            order = fragment.document_order,
                            "dropping dangling fragment"
                        );
                    }
                    Some(true) => {
                        if let Some(buffer) = current.as_mut() {
                            match fragment.kind {
                                FragmentKind::Paragraph => buffer.paragraph = number,
                                _ => buffer.item = number,
                            }
                            buffer.absorb(fragment);
                        }
                    }
                    Some(false) => {
                        // Second paragraph/item in a row: the previous
                        // citation is complete, the new one shares its law
                        // name and article
                        let sibling = current.as_ref().map(|buffer| buffer.carry_over(fragment));
                        flush(&mut current, &mut output, options);
                        current = sibling;
                    }
                }
            }
        }
    }

    flush(&mut current, &mut output, options);
    output
}

/// Finalize the in-progress buffer into the output list, enforcing the
/// drop rules: buffers with neither law name nor article are invalid, and
/// bare law-name mentions are suppressed unless opted in.
fn flush(current: &mut Option<Buffer>, output: &mut Vec<Citation>, options: ConsolidateOptions) {
    let Some(buffer) = current.take() else {
        return;
    };

    if buffer.law_name.is_none() && buffer.article.is_none() {
        tracing::debug!("discarding citation buffer with no resolvable target");
        return;
    }

    if !options.include_bare_law_mentions && buffer.law_name.is_some() && !buffer.has_detail() {
        tracing::debug!(law_name = ?buffer.law_name, "suppressing bare law-name mention");
        return;
    }

    if options.expand_ranges {
        if let (Some(start), Some(end)) = (buffer.article, buffer.range_end) {
            if end > start && end - start < MAX_RANGE_EXPANSION {
                let template = buffer.into_citation();
                for article in start..=end {
                    output.push(Citation {
                        target_article: Some(article),
                        target_article_branch: None,
                        ..template.clone()
                    });
                }
                return;
            }
        }
    }

    output.push(buffer.into_citation());
}

/// Parse 제N조(의M) plus an optional 부터…까지 range end from article text.
/// A range collapses to its first numeral unless expansion is requested.
fn parse_article_numbers(text: &str) -> (Option<u32>, Option<u32>, Option<u32>) {
    if let Some(captures) = ARTICLE_RANGE_PATTERN.captures(text) {
        let start = captures.get(1).and_then(|m| m.as_str().parse().ok());
        let end = captures.get(2).and_then(|m| m.as_str().parse().ok());
        return (start, None, end);
    }
    match ARTICLE_PATTERN.captures(text) {
        Some(captures) => {
            let article = captures.get(1).and_then(|m| m.as_str().parse().ok());
            let branch = captures.get(2).and_then(|m| m.as_str().parse().ok());
            (article, branch, None)
        }
        None => (None, None, None),
    }
}

fn parse_numeral(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
