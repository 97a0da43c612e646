//! Escaping for each destination a user value can land in.
//!
//! The snippet carries user text in three contexts: JavaScript string
//! literals, the `text` query parameter of the deep link, and CSS values.
//! Each has its own function here and nothing is interpolated raw.

use std::fmt::Write;

use super::DEFAULT_BRAND_COLOR;

/// Quote `value` as a double-quoted JavaScript string literal.
///
/// Besides quotes and backslashes, `<`, `>` and `&` are written as unicode
/// escapes so the literal can never close the surrounding `<script>` element.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Percent-encode `value` for use as a URL query parameter value.
pub fn url_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Render a pixel value typed into a form as a bare CSS number.
///
/// Accepts an optional `px` suffix. Anything that is not a finite,
/// non-negative number becomes `0`.
pub fn css_pixels(value: &str) -> String {
    match parse_pixels(value) {
        Some(px) => format!("{}", px),
        None => "0".to_string(),
    }
}

pub(crate) fn is_pixel_value(value: &str) -> bool {
    parse_pixels(value).is_some()
}

fn parse_pixels(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    number
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite() && *px >= 0.0)
}

/// Render a CSS color, falling back to the default brand color.
///
/// Only characters that appear in hex, named, `rgb()` and `hsl()` colors are
/// allowed, which keeps the value from escaping its declaration.
pub fn css_color(value: &str) -> String {
    let trimmed = value.trim();
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ');
    if trimmed.is_empty() || !trimmed.chars().all(allowed) {
        return DEFAULT_BRAND_COLOR.to_string();
    }
    trimmed.to_string()
}
