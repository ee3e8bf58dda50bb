//! Numeric-literal rewriter for serialized submission files.
//!
//! The agency format specifies a handful of fields as fixed-width,
//! zero-padded digit sequences that must appear as *unquoted* numeric
//! literals. A JSON number type would drop the leading zeros, so the
//! documents carry those fields as strings, get serialized normally, and
//! this pass then strips the quotes from the serialized text.
//!
//! The result is intentionally not grammar-conformant JSON (leading-zero
//! unquoted numbers are illegal); the receiving system's parser relies on
//! exactly this shape, so it must be preserved byte-for-byte.
//!
//! The rewrite is confined to exact field-name matches and is idempotent:
//! once the quotes are gone the patterns no longer match.

use once_cell::sync::Lazy;
use regex::Regex;

/// The fields rendered as unquoted zero-padded literals. Fixed by the
/// agency's work schema; nothing else is ever rewritten.
pub const REWRITTEN_FIELDS: [&str; 4] = ["nameNumber", "porcentPer", "porcentMec", "porcentSyn"];

/// One compiled pattern per field, matching the pretty-printed
/// `"field": "digits"` form.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    REWRITTEN_FIELDS
        .iter()
        .map(|field| {
            Regex::new(&format!(r#"("{}"): "(\d*)""#, field))
                .expect("rewrite patterns are fixed and valid")
        })
        .collect()
});

/// Unquote the all-digit values of the [`REWRITTEN_FIELDS`] in a
/// pretty-printed JSON text.
pub fn unquote_numeric_fields(text: &str) -> String {
    PATTERNS.iter().fold(text.to_string(), |acc, pattern| {
        pattern.replace_all(&acc, "${1}: ${2}").into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "nameNumber": "00123456789",
  "name": "Some Holder",
  "porcentPer": "01250",
  "porcentMec": "00000",
  "porcentSyn": "00325"
}"#;

    #[test]
    fn test_unquotes_named_fields() {
        let out = unquote_numeric_fields(SAMPLE);
        assert!(out.contains("\"nameNumber\": 00123456789"));
        assert!(out.contains("\"porcentPer\": 01250"));
        assert!(out.contains("\"porcentMec\": 00000"));
        assert!(out.contains("\"porcentSyn\": 00325"));
    }

    #[test]
    fn test_idempotent() {
        let once = unquote_numeric_fields(SAMPLE);
        let twice = unquote_numeric_fields(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_other_digit_fields_stay_quoted() {
        let text = r#"{
  "docNumber": "00012345",
  "porcentPer": "01250"
}"#;
        let out = unquote_numeric_fields(text);
        assert!(out.contains("\"docNumber\": \"00012345\""));
        assert!(out.contains("\"porcentPer\": 01250"));
    }

    #[test]
    fn test_non_digit_values_stay_quoted() {
        // A name field that happens to share a rewritten key's value shape
        // but holds non-digits must not be touched.
        let text = r#"{ "porcentPer": "12a50" }"#;
        let out = unquote_numeric_fields(text);
        assert_eq!(out, text);
    }
}
