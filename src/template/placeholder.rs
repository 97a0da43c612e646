//! Placeholder extraction and sample reconciliation.
//!
//! Template bodies reference send-time values as `{{1}}`, `{{2}}`, ... Each
//! occurrence needs one sample value for review. Samples are aligned by
//! occurrence index, not by the number inside the braces.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([0-9]+)\s*\}\}").unwrap());

/// Whether a template body uses numbered variables at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    #[default]
    Numbered,
    /// Braces in the body are literal text
    None,
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Numbered => write!(f, "numbered"),
            VariableType::None => write!(f, "none"),
        }
    }
}

/// One placeholder occurrence in a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    /// The matched text, e.g. `{{ 2 }}`
    pub token: String,
    /// Digits between the braces, e.g. `2`
    pub number: String,
    /// Byte offset of the token in the body
    pub start: usize,
    pub end: usize,
}

/// Find every placeholder occurrence in `body`, left to right.
///
/// Repeated numbers are reported once per occurrence. Malformed tokens such
/// as `{{1}` or `{{x}}` are plain text.
pub fn extract_placeholders(body: &str, variable_type: VariableType) -> Vec<Placeholder> {
    if variable_type == VariableType::None {
        return Vec::new();
    }

    PLACEHOLDER_REGEX
        .captures_iter(body)
        .filter_map(|cap| {
            let token = cap.get(0)?;
            let number = cap.get(1)?;
            Some(Placeholder {
                token: token.as_str().to_string(),
                number: number.as_str().to_string(),
                start: token.start(),
                end: token.end(),
            })
        })
        .collect()
}

/// Number of placeholder occurrences in `body`.
pub fn count_placeholders(body: &str, variable_type: VariableType) -> usize {
    match variable_type {
        VariableType::None => 0,
        VariableType::Numbered => PLACEHOLDER_REGEX.find_iter(body).count(),
    }
}

/// Resize `previous` to `count` entries.
///
/// Entries at surviving indices are kept, new indices start empty and extra
/// entries are dropped from the end. When the length already matches,
/// `previous` is returned unchanged.
pub fn reconcile_samples(previous: &[String], count: usize) -> Vec<String> {
    if previous.len() == count {
        return previous.to_vec();
    }
    (0..count)
        .map(|i| previous.get(i).cloned().unwrap_or_default())
        .collect()
}

/// Body, variable mode and samples of a template being edited.
///
/// Samples are reconciled whenever the body or variable mode changes and left
/// alone when a single sample is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderTracker {
    body: String,
    variable_type: VariableType,
    placeholders: Vec<Placeholder>,
    samples: Vec<String>,
}

impl PlaceholderTracker {
    pub fn new(variable_type: VariableType) -> Self {
        Self {
            variable_type,
            ..Self::default()
        }
    }

    /// Rebuild a tracker from saved parts, reconciling the samples against
    /// the body once.
    pub fn restore(body: &str, variable_type: VariableType, samples: Vec<String>) -> Self {
        let mut tracker = Self {
            body: String::new(),
            variable_type,
            placeholders: Vec::new(),
            samples,
        };
        tracker.rescan(body.to_string());
        tracker
    }

    /// Replace the body. Returns `true` when the sample list was resized.
    pub fn set_body(&mut self, body: &str) -> bool {
        if body == self.body {
            return false;
        }
        self.rescan(body.to_string())
    }

    /// Take body text produced outside the editor (e.g. an AI rewrite). It is
    /// scanned exactly like a typed edit.
    pub fn apply_enhancement(&mut self, enhanced_body: String) -> bool {
        if enhanced_body == self.body {
            return false;
        }
        self.rescan(enhanced_body)
    }

    /// Switch between numbered variables and plain text.
    pub fn set_variable_type(&mut self, variable_type: VariableType) -> bool {
        if variable_type == self.variable_type {
            return false;
        }
        self.variable_type = variable_type;
        let body = std::mem::take(&mut self.body);
        self.rescan(body)
    }

    /// Edit one sample. Out-of-range indices are ignored and reported as
    /// `false`.
    pub fn set_sample(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.samples.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn variable_type(&self) -> VariableType {
        self.variable_type
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Hand back `(body, variable_type, samples)`.
    pub fn into_parts(self) -> (String, VariableType, Vec<String>) {
        (self.body, self.variable_type, self.samples)
    }

    fn rescan(&mut self, body: String) -> bool {
        self.placeholders = extract_placeholders(&body, self.variable_type);
        self.body = body;

        let count = self.placeholders.len();
        if count == self.samples.len() {
            return false;
        }

        debug!(
            from = self.samples.len(),
            to = count,
            "reconciling template samples"
        );
        self.samples = reconcile_samples(&self.samples, count);
        true
    }
}
