//! Template name sanitization.
//!
//! The messaging API only accepts lower-case identifiers made of letters,
//! digits and single underscores.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static INVALID_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]").unwrap());

static UNDERSCORE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Turn a display name into the identifier the messaging API requires.
///
/// `"My Template #1!"` becomes `"my_template_1"`.
pub fn sanitize_template_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = INVALID_CHARS_REGEX.replace_all(&lowered, "_");
    let collapsed = UNDERSCORE_RUN_REGEX.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

/// A sanitized name plus whether it differs from what was typed, so the
/// editor knows to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedName {
    pub original: String,
    pub sanitized: String,
}

impl SanitizedName {
    pub fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            sanitized: sanitize_template_name(original),
        }
    }

    /// Whether the user should be told about the rewrite.
    pub fn changed(&self) -> bool {
        self.original != self.sanitized
    }

    pub fn is_empty(&self) -> bool {
        self.sanitized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_punctuation_and_spaces() {
        assert_eq!(sanitize_template_name("My Template #1!"), "my_template_1");
    }

    #[test]
    fn test_sanitize_collapses_and_trims_underscores() {
        assert_eq!(sanitize_template_name("  __Foo__Bar__  "), "foo_bar");
    }

    #[test]
    fn test_sanitize_keeps_valid_names() {
        assert_eq!(sanitize_template_name("order_update_2"), "order_update_2");
    }

    #[test]
    fn test_sanitize_non_ascii_letters() {
        assert_eq!(sanitize_template_name("Café Promo"), "caf_promo");
        assert_eq!(sanitize_template_name("Größe"), "gr_e");
    }

    #[test]
    fn test_sanitize_only_symbols_is_empty() {
        assert_eq!(sanitize_template_name("!!! ---"), "");
        assert_eq!(sanitize_template_name(""), "");
    }

    #[test]
    fn test_sanitized_name_reports_change() {
        let typed = SanitizedName::new("Welcome Message");
        assert!(typed.changed());
        assert_eq!(typed.sanitized, "welcome_message");

        let clean = SanitizedName::new("welcome_message");
        assert!(!clean.changed());
        assert!(!clean.is_empty());
    }
}
