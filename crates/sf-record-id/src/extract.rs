//! Record ID extraction from text and URLs
//!
//! The URL resolver searches the most reliable signal first:
//!
//! 1. the path, against the record URL layouts
//! 2. the fragment, used by single-page routing
//! 3. query parameters, in their original order
//! 4. the whole serialized URL
//!
//! Input that cannot be parsed as a URL, even relative to a placeholder base,
//! falls back to plain string matching.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::decode::safe_decode;
use crate::pattern;
use crate::record_id::RecordId;

/// Base used to resolve relative input such as `/lightning/r/.../view`
pub const PLACEHOLDER_BASE: &str = "https://placeholder.invalid";

lazy_static! {
    static ref PLACEHOLDER_BASE_URL: Url = Url::parse(PLACEHOLDER_BASE).unwrap();
}

/// A record ID found in text, with byte offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecordId {
    pub id: RecordId,
    pub start_index: u32,
    pub end_index: u32,
}

/// First record ID in `candidate`, scanning left to right.
///
/// Missing or empty input yields `None`.
pub fn extract_account_id_from_string<'a>(
    candidate: impl Into<Option<&'a str>>,
) -> Option<RecordId> {
    let candidate = candidate.into().filter(|c| !c.is_empty())?;
    pattern::find_value(candidate).map(|m| RecordId::from_match(m.as_str()))
}

/// Every record ID in `text`, left to right
pub fn extract_all_record_ids(text: &str) -> Vec<ExtractedRecordId> {
    pattern::find_all_values(text)
        .into_iter()
        .map(|m| ExtractedRecordId {
            id: RecordId::from_match(m.as_str()),
            start_index: m.start() as u32,
            end_index: m.end() as u32,
        })
        .collect()
}

/// Locate the record ID in a URL, relative path or arbitrary text
pub fn extract_account_id_from_url<'a>(url: impl Into<Option<&'a str>>) -> Option<RecordId> {
    let input = url.into().filter(|u| !u.is_empty())?;

    let parsed = match Url::options()
        .base_url(Some(&*PLACEHOLDER_BASE_URL))
        .parse(input)
    {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Unable to parse URL {:?}: {}", input, e);
            return extract_account_id_from_string(input);
        }
    };

    resolve_parsed_url(&parsed)
}

fn resolve_parsed_url(url: &Url) -> Option<RecordId> {
    let decoded_path = safe_decode(url.path());
    if let Some(m) = pattern::find_in_path(&decoded_path) {
        tracing::trace!("Record ID found in path");
        return Some(RecordId::from_match(m.as_str()));
    }

    let decoded_hash = safe_decode(url.fragment());
    if let Some(m) = pattern::find_value(&decoded_hash) {
        tracing::trace!("Record ID found in fragment");
        return Some(RecordId::from_match(m.as_str()));
    }

    for (name, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }

        let decoded = safe_decode(&*value);
        if let Some(id) = extract_account_id_from_string(decoded.as_str()) {
            tracing::trace!("Record ID found in query parameter {:?}", name);
            return Some(id);
        }

        if is_record_param_name(&name) {
            let labelled = format!("{}:{}", name, decoded);
            if let Some(id) = extract_account_id_from_string(labelled.as_str()) {
                tracing::trace!("Record ID found in labelled query parameter {:?}", name);
                return Some(id);
            }
        }
    }

    let decoded_href = safe_decode(url.as_str());
    pattern::find_value(&decoded_href).map(|m| RecordId::from_match(m.as_str()))
}

/// Whether a query parameter name suggests it carries a record ID
///
/// Matches names containing `record` or `acct`, or ending in `id`/`_id`,
/// ignoring case.
pub fn is_record_param_name(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("record") || name.contains("acct") || name.ends_with("id") || name.ends_with("_id")
}
