//! Source cascade for a user action
//!
//! A context-menu style action has several candidate sources: the link that
//! was clicked, the page URL, the tab URL, any selected text, and finally the
//! page itself. [`locate`] tries them in that order and reports which one
//! produced the ID.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extract::{extract_account_id_from_string, extract_account_id_from_url};
use crate::page::{scan_from_element, scan_page, PageSnapshot, ScanLimits};
use crate::record_id::RecordId;

/// Everything known about where the user invoked the action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSources {
    pub link_url: Option<String>,
    pub page_url: Option<String>,
    pub tab_url: Option<String>,
    pub selection_text: Option<String>,
    /// Child indices from the page body to the element under the pointer
    pub target_element: Option<Vec<usize>>,
}

/// Which source produced a record ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    LinkUrl,
    PageUrl,
    TabUrl,
    Selection,
    TargetElement,
    PageScan,
}

impl Origin {
    pub fn display_name(&self) -> &'static str {
        match self {
            Origin::LinkUrl => "link URL",
            Origin::PageUrl => "page URL",
            Origin::TabUrl => "tab URL",
            Origin::Selection => "selected text",
            Origin::TargetElement => "target element",
            Origin::PageScan => "page scan",
        }
    }
}

/// A record ID and the source it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Located {
    pub id: RecordId,
    pub origin: Origin,
}

/// Find a record ID across all context sources
pub fn locate(
    sources: &ContextSources,
    page: Option<&PageSnapshot>,
    limits: &ScanLimits,
) -> Option<Located> {
    let urls = [
        (Origin::LinkUrl, sources.link_url.as_deref()),
        (Origin::PageUrl, sources.page_url.as_deref()),
        (Origin::TabUrl, sources.tab_url.as_deref()),
    ];

    for (origin, url) in urls {
        let found = extract_account_id_from_url(url).or_else(|| extract_account_id_from_string(url));
        if let Some(id) = found {
            return Some(Located { id, origin });
        }
    }

    if let Some(id) = extract_account_id_from_string(sources.selection_text.as_deref()) {
        return Some(Located {
            id,
            origin: Origin::Selection,
        });
    }

    let page = page?;

    if let (Some(path), Some(body)) = (&sources.target_element, &page.body) {
        if let Some(id) = scan_from_element(body, path, limits) {
            return Some(Located {
                id,
                origin: Origin::TargetElement,
            });
        }
    }

    scan_page(page, limits).map(|id| Located {
        id,
        origin: Origin::PageScan,
    })
}

/// User-facing outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Found(Located),
    NotFound,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::NotFound)
    }
}

impl From<Option<Located>> for Notice {
    fn from(located: Option<Located>) -> Self {
        located.map_or(Notice::NotFound, Notice::Found)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Found(located) => write!(
                f,
                "Found Record ID: {} (from {})",
                located.id,
                located.origin.display_name()
            ),
            Notice::NotFound => write!(f, "No Salesforce Record ID found"),
        }
    }
}
