//! Record ID search over a page snapshot
//!
//! Best-effort fallback for when no URL or selection carries an ID. Works on
//! any tree implementing [`QueryableNode`]; [`PageSnapshot`] is an owned,
//! JSON-loadable implementation. Traversal is bounded by [`ScanLimits`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::extract::{extract_account_id_from_string, extract_account_id_from_url};
use crate::record_id::RecordId;

/// Meta tag names that carry the current record ID
pub const RECORD_META_NAMES: &[&str] = &["sfdc-recordid", "recordId"];

/// Attributes whose presence marks an element as a likely record holder,
/// highest priority first
pub const PREFERRED_ATTRIBUTES: &[&str] = &[
    "data-recordid",
    "data-record-id",
    "data-id",
    "data-target-selection-name",
];

/// `href` fragment of record links, tried after every preferred attribute
pub const RECORD_HREF_MARKER: &str = "/lightning/r/";

/// Errors from loading a page snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Traversal bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanLimits {
    /// Deepest descendant level visited below a scan root
    pub max_depth: usize,
    /// Ancestors checked above a target element
    pub max_ancestors: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_depth: 2000,
            max_ancestors: 10,
        }
    }
}

/// A node that can be searched for record IDs
pub trait QueryableNode: Sized {
    /// Attribute name/value pairs in the order the node keeps them, including
    /// data attributes and properties such as `href`, `value`, `title`,
    /// `aria-label`
    fn attributes(&self) -> Vec<(&str, &str)>;

    /// The node's own text, excluding descendants
    fn text(&self) -> Option<&str>;

    fn children(&self) -> &[Self];

    /// Own and descendant text joined by single spaces, descending at most
    /// `max_depth` levels
    fn text_content(&self, max_depth: usize) -> Option<String> {
        let mut parts = Vec::new();
        collect_text(self, max_depth, &mut parts);
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

/// An element in a page snapshot
///
/// Attributes are keyed by name, so they are visited in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<ElementNode>,
}

impl QueryableNode for ElementNode {
    fn attributes(&self) -> Vec<(&str, &str)> {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect()
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// A captured page: its location, meta tags and element tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub location: Option<String>,
    /// Meta tag name to content
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<ElementNode>,
}

impl PageSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Search a whole page, most specific signal first
pub fn scan_page(page: &PageSnapshot, limits: &ScanLimits) -> Option<RecordId> {
    if let Some(id) = extract_account_id_from_url(page.location.as_deref()) {
        return Some(id);
    }

    for name in RECORD_META_NAMES {
        let content = page
            .meta
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| c.as_str());
        if let Some(id) = extract_account_id_from_string(content) {
            return Some(id);
        }
    }

    let body = page.body.as_ref()?;

    // Selector priority first, document order within each selector
    for name in PREFERRED_ATTRIBUTES {
        let found = search_matching(body, limits.max_depth, &|node: &ElementNode| {
            node.attribute(name).is_some()
        });
        if found.is_some() {
            return found;
        }
    }

    let found = search_matching(body, limits.max_depth, &|node: &ElementNode| {
        node.attribute("href")
            .is_some_and(|href| href.contains(RECORD_HREF_MARKER))
    });
    if found.is_some() {
        return found;
    }

    search_subtree(body, 0, limits.max_depth)
}

/// Search from a target element, addressed by child indices from `root`,
/// up through its ancestors.
///
/// An out-of-range path addresses the deepest element that exists.
pub fn scan_from_element<N: QueryableNode>(
    root: &N,
    path: &[usize],
    limits: &ScanLimits,
) -> Option<RecordId> {
    let mut current = root;
    let mut chain = vec![root];
    for &index in path {
        let Some(child) = current.children().get(index) else {
            break;
        };
        chain.push(child);
        current = child;
    }

    chain
        .iter()
        .rev()
        .take(limits.max_ancestors + 1)
        .find_map(|node| match_text_first(*node, limits.max_depth))
}

/// Search the subtrees of every element matching `selector`, in document order
fn search_matching<N: QueryableNode>(
    root: &N,
    max_depth: usize,
    selector: &dyn Fn(&N) -> bool,
) -> Option<RecordId> {
    let mut matched = Vec::new();
    collect_matching(root, 0, max_depth, selector, &mut matched);
    matched
        .into_iter()
        .find_map(|(node, depth)| search_subtree(node, depth, max_depth))
}

fn collect_matching<'a, N: QueryableNode>(
    node: &'a N,
    depth: usize,
    max_depth: usize,
    selector: &dyn Fn(&N) -> bool,
    out: &mut Vec<(&'a N, usize)>,
) {
    if depth > max_depth {
        return;
    }

    if selector(node) {
        out.push((node, depth));
    }

    for child in node.children() {
        collect_matching(child, depth + 1, max_depth, selector, out);
    }
}

fn collect_text<'a, N: QueryableNode>(node: &'a N, remaining: usize, out: &mut Vec<&'a str>) {
    if let Some(text) = node.text().filter(|t| !t.is_empty()) {
        out.push(text);
    }

    if remaining == 0 {
        return;
    }

    for child in node.children() {
        collect_text(child, remaining - 1, out);
    }
}

fn search_subtree<N: QueryableNode>(node: &N, depth: usize, max_depth: usize) -> Option<RecordId> {
    if depth > max_depth {
        return None;
    }

    if let Some(id) = match_attributes_first(node, max_depth - depth) {
        return Some(id);
    }

    node.children()
        .iter()
        .find_map(|child| search_subtree(child, depth + 1, max_depth))
}

fn match_attributes_first<N: QueryableNode>(node: &N, max_depth: usize) -> Option<RecordId> {
    match_attributes(node).or_else(|| match_text_content(node, max_depth))
}

fn match_text_first<N: QueryableNode>(node: &N, max_depth: usize) -> Option<RecordId> {
    match_text_content(node, max_depth).or_else(|| match_attributes(node))
}

fn match_text_content<N: QueryableNode>(node: &N, max_depth: usize) -> Option<RecordId> {
    let text = node.text_content(max_depth)?;
    extract_account_id_from_string(text.as_str())
}

fn match_attributes<N: QueryableNode>(node: &N) -> Option<RecordId> {
    node.attributes()
        .into_iter()
        .find_map(|(_, value)| extract_account_id_from_string(value))
}
