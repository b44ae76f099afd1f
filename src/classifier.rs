//! Fragment classification: scan article markup for pre-linked citation
//! anchors and produce an ordered fragment sequence.
//!
//! law.go.kr links every piece of a citation separately: 「형법」 제20조
//! 제1항 is three `<a>` tags, each marked with one of four style classes
//! (sfon1 law name, sfon2 article, sfon3 paragraph, sfon4 item). The
//! classifier extracts those anchors in document order; reassembly is the
//! consolidator's job.

use regex::Regex;
use scraper::node::Element;
use scraper::{Html, Node};
use std::sync::LazyLock;

use crate::types::{CitationFragment, FragmentKind};

/// Target reference in the anchor's action payload:
/// `onclick="fncLsLawPop('001702','JO','007800')"` → first positional arg.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FNC_POP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"fncLsLawPop\s*\(\s*['"](\d+)['"]"#).expect("valid regex"));

/// Decorative brackets around law names: 「법명」.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAW_NAME_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"「([^」]+)」").expect("valid regex"));

/// Scan markup for citation fragments, preserving document order.
///
/// The order counter also advances over non-whitespace prose between
/// anchors, so two fragments with consecutive orders were directly
/// adjacent in the source text. Whitespace-only text nodes do not break
/// adjacency. Zero fragments is a valid result: the article cites
/// nothing.
#[must_use]
pub fn classify(html: &str) -> Vec<CitationFragment> {
    let document = Html::parse_document(html);
    let mut fragments = Vec::new();
    let mut order: u32 = 0;
    walk(document.tree.root(), &mut fragments, &mut order);
    tracing::debug!(count = fragments.len(), "classified citation fragments");
    fragments
}

fn walk(
    node: ego_tree::NodeRef<'_, Node>,
    fragments: &mut Vec<CitationFragment>,
    order: &mut u32,
) {
    for child in node.children() {
        match child.value() {
            Node::Element(element) => {
                if element.name() == "a" {
                    if let Some(kind) = citation_role(element) {
                        if let Some(fragment) = build_fragment(kind, element, child, *order) {
                            fragments.push(fragment);
                            *order += 1;
                        }
                        // Anchor text already consumed; don't descend
                        continue;
                    }
                }
                walk(child, fragments, order);
            }
            Node::Text(text) => {
                if !text.text.trim().is_empty() {
                    // Prose between anchors breaks citation continuity
                    *order += 1;
                }
            }
            _ => {}
        }
    }
}

/// Determine the citation role of an anchor, if any. Requires both the
/// `link` class and one of the four sfon markers; anything else is
/// ordinary prose.
fn citation_role(element: &Element) -> Option<FragmentKind> {
    if !element.classes().any(|class| class == "link") {
        return None;
    }
    element.classes().find_map(FragmentKind::from_style_class)
}

fn build_fragment(
    kind: FragmentKind,
    element: &Element,
    node: ego_tree::NodeRef<'_, Node>,
    order: u32,
) -> Option<CitationFragment> {
    let raw_text = collect_text(node);
    let raw_text = raw_text.trim();
    if raw_text.is_empty() {
        return None;
    }

    let text = match kind {
        FragmentKind::LawName => LAW_NAME_BRACKETS
            .captures(raw_text)
            .map_or_else(|| raw_text.to_string(), |captures| captures[1].to_string()),
        _ => raw_text.to_string(),
    };

    let target_ref = element
        .attr("onclick")
        .and_then(|onclick| FNC_POP_PATTERN.captures(onclick))
        .map(|captures| captures[1].to_string())
        .unwrap_or_default();

    Some(CitationFragment {
        kind,
        text,
        raw_text: raw_text.to_string(),
        target_ref,
        document_order: order,
    })
}

/// Accumulate the text content of a subtree.
fn collect_text(node: ego_tree::NodeRef<'_, Node>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        if let Node::Text(t) = descendant.value() {
            text.push_str(&t.text);
        }
    }
    text
}
