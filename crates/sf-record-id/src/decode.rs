//! Percent-decoding that never fails
//!
//! Follows URI component semantics: every `%` must introduce a two-digit hex
//! escape and the decoded bytes must form valid UTF-8. Anything else leaves
//! the input exactly as it was given.

/// Percent-decode `value`, returning it unchanged when it is malformed.
///
/// `None` and the empty string both decode to an empty string.
///
/// ```
/// use sf_record_id::safe_decode;
///
/// assert_eq!(safe_decode("%30%30%31"), "001");
/// assert_eq!(safe_decode("%E0%A4%A"), "%E0%A4%A");
/// assert_eq!(safe_decode(None), "");
/// ```
pub fn safe_decode<'a>(value: impl Into<Option<&'a str>>) -> String {
    let value = match value.into() {
        Some(v) if !v.is_empty() => v,
        _ => return String::new(),
    };

    if !has_well_formed_escapes(value) {
        return value.to_string();
    }

    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Check that every `%` is followed by two hex digits
fn has_well_formed_escapes(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_escapes() {
        assert_eq!(safe_decode("%30%30%31"), "001");
        assert_eq!(safe_decode("Account%2F001"), "Account/001");
        assert_eq!(safe_decode("caf%C3%A9"), "café");
    }

    #[test]
    fn test_plus_is_not_space() {
        assert_eq!(safe_decode("a+b"), "a+b");
    }

    #[test]
    fn test_truncated_escape_is_returned_unchanged() {
        assert_eq!(safe_decode("%E0%A4%A"), "%E0%A4%A");
        assert_eq!(safe_decode("100%"), "100%");
        assert_eq!(safe_decode("%41%zz"), "%41%zz");
    }

    #[test]
    fn test_invalid_utf8_is_returned_unchanged() {
        assert_eq!(safe_decode("%FF%FE"), "%FF%FE");
    }

    #[test]
    fn test_missing_or_empty_is_empty() {
        assert_eq!(safe_decode(None), "");
        assert_eq!(safe_decode(""), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(safe_decode("0018c00002NIZJIAA5"), "0018c00002NIZJIAA5");
    }
}
