//! Format-agnostic feed parsing.
//!
//! The dialect (RSS 2.0 vs Atom) is resolved once from the document's root
//! element, then each branch normalizes its items into [`Story`] records.
//! Element names are matched case-insensitively on the local name only;
//! namespace prefixes and URIs are ignored, so colliding local names across
//! unrelated namespaces are not disambiguated. Field extraction looks at
//! direct children only, not deep descendants.

use roxmltree::{Document, Node};

const UNTITLED: &str = "Untitled Story";

/// One syndicated item extracted from a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub link: Option<String>,
    /// Raw text or HTML body, passed through as-is
    pub description: Option<String>,
    /// Raw date string, not normalized
    pub published: Option<String>,
    pub feed_title: Option<String>,
    /// Assigned by the slugifier; empty until then
    pub file_name: String,
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub stories: Vec<Story>,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("feed XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("unsupported feed format: root element <{0}>")]
    UnsupportedFormat(String),
}

enum Dialect<'a, 'input> {
    Rss(Node<'a, 'input>),
    Atom(Node<'a, 'input>),
}

pub fn parse_feed(xml: &str) -> Result<ParsedFeed, ParseError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    let dialect = if has_local_name(root, "rss") {
        Dialect::Rss(root)
    } else if has_local_name(root, "feed") {
        Dialect::Atom(root)
    } else {
        return Err(ParseError::UnsupportedFormat(
            root.tag_name().name().to_string(),
        ));
    };

    Ok(match dialect {
        Dialect::Rss(root) => parse_rss(root),
        Dialect::Atom(root) => parse_atom(root),
    })
}

fn parse_rss(root: Node) -> ParsedFeed {
    let channel = child_elements(root, "channel").next().unwrap_or(root);
    let feed_title = first_child_text(channel, &["title"]);
    let stories: Vec<Story> = child_elements(channel, "item")
        .map(|item| Story {
            title: first_child_text(item, &["title"]).unwrap_or_else(|| UNTITLED.to_string()),
            link: first_child_text(item, &["link", "guid"]),
            description: first_child_text(
                item,
                &["description", "encoded", "summary", "content"],
            ),
            published: first_child_text(item, &["pubDate", "published", "updated"]),
            feed_title: feed_title.clone(),
            file_name: String::new(),
        })
        .collect();
    ParsedFeed {
        title: feed_title,
        stories,
    }
}

fn parse_atom(root: Node) -> ParsedFeed {
    let feed_title = first_child_text(root, &["title"]);
    let stories: Vec<Story> = child_elements(root, "entry")
        .map(|entry| Story {
            title: first_child_text(entry, &["title"]).unwrap_or_else(|| UNTITLED.to_string()),
            link: atom_link(entry),
            description: first_child_text(entry, &["content", "summary"]),
            published: first_child_text(entry, &["updated", "published"]),
            feed_title: feed_title.clone(),
            file_name: String::new(),
        })
        .collect();
    ParsedFeed {
        title: feed_title,
        stories,
    }
}

fn has_local_name(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

fn child_elements<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    parent
        .children()
        .filter(move |child| has_local_name(*child, name))
}

/// First non-empty trimmed text among direct children, trying candidate
/// names in preference order.
fn first_child_text(parent: Node, candidates: &[&'static str]) -> Option<String> {
    for name in candidates {
        for child in child_elements(parent, name) {
            if let Some(text) = child.text() {
                let text = text.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}

/// Atom link resolution: prefer a `link` child with `rel="alternate"` (or no
/// `rel` at all) and a non-empty `href`, falling back to the first non-empty
/// `href` of any rel.
fn atom_link(entry: Node) -> Option<String> {
    let mut fallback = None;
    for link in child_elements(entry, "link") {
        let href = link.attribute("href").map(str::trim).unwrap_or("");
        if href.is_empty() {
            continue;
        }
        match link.attribute("rel") {
            None | Some("alternate") => return Some(href.to_string()),
            Some(_) => {
                if fallback.is_none() {
                    fallback = Some(href.to_string());
                }
            }
        }
    }
    fallback
}
