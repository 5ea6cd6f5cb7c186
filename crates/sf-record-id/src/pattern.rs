//! Record ID patterns
//!
//! Both patterns share one ID fragment: a three-character key prefix followed
//! by a 12-character body and an optional 3-character case-safe suffix.
//! The `regex` crate has no lookaround, so the value pattern consumes the
//! neighbouring non-alphanumeric character (or matches at a text edge) and
//! exposes the ID through the `id` capture group.

use lazy_static::lazy_static;
use regex::{Match, Regex};

/// Object-type key prefix
pub const RECORD_ID_PREFIX: &str = "(?:0|[1-9A-Za-z])[0-9A-Za-z]{2}";

/// 12 body characters plus the optional 3-character suffix
pub const RECORD_ID_BODY: &str = "[0-9A-Za-z]{12}(?:[0-9A-Za-z]{3})?";

lazy_static! {
    // Record URL layouts: /lightning/r/Account/<id>/view, /lightning/r/<id>/related,
    // classic /<id>, each terminated by a separator or end of path
    pub static ref RECORD_ID_PATH_REGEX: Regex = Regex::new(&format!(
        r"/(?:lightning/r/)?(?:[A-Za-z0-9_]+/)?(?P<id>{RECORD_ID_PREFIX}{RECORD_ID_BODY})(?:[/?#]|$)"
    ))
    .unwrap();

    // Any ID not glued to another alphanumeric on either side
    pub static ref RECORD_ID_VALUE_REGEX: Regex = Regex::new(&format!(
        r"(?:^|[^0-9A-Za-z])(?P<id>{RECORD_ID_PREFIX}{RECORD_ID_BODY})(?:[^0-9A-Za-z]|$)"
    ))
    .unwrap();
}

/// First ID occupying a full segment of a record URL path
pub fn find_in_path(path: &str) -> Option<Match<'_>> {
    RECORD_ID_PATH_REGEX
        .captures(path)
        .and_then(|cap| cap.name("id"))
}

/// First boundary-respecting ID anywhere in `text`
pub fn find_value(text: &str) -> Option<Match<'_>> {
    find_value_at(text, 0)
}

/// Every boundary-respecting ID in `text`, left to right
pub fn find_all_values(text: &str) -> Vec<Match<'_>> {
    let mut found = Vec::new();
    let mut start = 0;

    // Resume at the end of the ID, not the end of the whole match, so the
    // separator between two adjacent IDs can serve as the next left boundary.
    while let Some(m) = find_value_at(text, start) {
        start = m.end();
        found.push(m);
    }

    found
}

fn find_value_at(text: &str, start: usize) -> Option<Match<'_>> {
    RECORD_ID_VALUE_REGEX
        .captures_at(text, start)
        .and_then(|cap| cap.name("id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT_ID_18: &str = "0018c00002NIZJIAA5";

    #[test]
    fn test_value_accepts_both_forms() {
        assert_eq!(find_value(ACCOUNT_ID_18).unwrap().as_str(), ACCOUNT_ID_18);
        assert_eq!(
            find_value(&ACCOUNT_ID_18[..15]).unwrap().as_str(),
            &ACCOUNT_ID_18[..15]
        );
    }

    #[test]
    fn test_value_requires_boundaries() {
        // 16, 17 and 19 character runs are not IDs, and no slice of them is either
        assert!(find_value("0018c00002NIZJIA").is_none());
        assert!(find_value("0018c00002NIZJIAA").is_none());
        assert!(find_value("0018c00002NIZJIAA5X").is_none());
        assert!(find_value("x0018c00002NIZJIAA5").is_none());
    }

    #[test]
    fn test_value_ignores_non_ascii_lookalikes() {
        // KELVIN SIGN folds to 'k' under Unicode case-insensitivity
        assert!(find_value("0018c00002NIZJIA\u{212A}5").is_none());
    }

    #[test]
    fn test_value_non_ascii_is_a_boundary() {
        let text = format!("é{ACCOUNT_ID_18}é");
        assert_eq!(find_value(&text).unwrap().as_str(), ACCOUNT_ID_18);
    }

    #[test]
    fn test_find_all_adjacent_ids() {
        let text = format!("{ACCOUNT_ID_18} {ACCOUNT_ID_18},005fj000007W4pF");
        let all: Vec<&str> = find_all_values(&text).iter().map(|m| m.as_str()).collect();
        assert_eq!(all, vec![ACCOUNT_ID_18, ACCOUNT_ID_18, "005fj000007W4pF"]);
    }

    #[test]
    fn test_path_layouts() {
        for path in [
            format!("/lightning/r/Account/{ACCOUNT_ID_18}/view"),
            format!("/lightning/r/{ACCOUNT_ID_18}/related"),
            format!("/{ACCOUNT_ID_18}"),
            format!("/Custom_Object__c/{ACCOUNT_ID_18}?x=1"),
        ] {
            assert_eq!(find_in_path(&path).unwrap().as_str(), ACCOUNT_ID_18, "{path}");
        }
    }

    #[test]
    fn test_path_requires_full_segment() {
        assert!(find_in_path(&format!("/lightning/r/Account/{ACCOUNT_ID_18}X/view")).is_none());
        assert!(find_in_path(&format!("/lightning/r/Account/x-{ACCOUNT_ID_18}")).is_none());
    }
}
