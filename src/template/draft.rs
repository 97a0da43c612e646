//! The template builder's draft and its parts.
//!
//! Drafts are stored as JSON:
//!
//! ```json
//! {
//!   "name": "Order Update",
//!   "category": "UTILITY",
//!   "language": "en_US",
//!   "header": { "type": "text", "text": "Your order" },
//!   "body": "Hi {{1}}, your order {{2}} shipped",
//!   "footer": "Reply STOP to opt out",
//!   "variable_type": "numbered",
//!   "samples": ["Alice", "#1042"],
//!   "buttons": [{ "type": "URL", "text": "Track", "url": "https://example.com/t" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::placeholder::VariableType;
use crate::errors::TemplateError;

/// Longest button label the messaging API accepts.
pub const MAX_BUTTON_TEXT: usize = 20;
/// Most buttons a template may carry.
pub const MAX_BUTTONS: usize = 3;
pub const MAX_BODY_LEN: usize = 1024;
pub const MAX_HEADER_TEXT_LEN: usize = 60;
pub const MAX_FOOTER_LEN: usize = 60;

/// Review category requested for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Marketing,
    Utility,
    Authentication,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Marketing => write!(f, "MARKETING"),
            Category::Utility => write!(f, "UTILITY"),
            Category::Authentication => write!(f, "AUTHENTICATION"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MARKETING" => Ok(Category::Marketing),
            "UTILITY" => Ok(Category::Utility),
            "AUTHENTICATION" => Ok(Category::Authentication),
            _ => anyhow::bail!(
                "Invalid template category '{}'. Valid values: marketing, utility, authentication",
                s
            ),
        }
    }
}

/// What sits above the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderType {
    #[default]
    None,
    Text,
    Image,
    Video,
    Document,
}

impl HeaderType {
    /// Media headers need an uploaded file.
    pub fn requires_file(self) -> bool {
        matches!(self, HeaderType::Image | HeaderType::Video | HeaderType::Document)
    }
}

impl std::fmt::Display for HeaderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderType::None => write!(f, "none"),
            HeaderType::Text => write!(f, "text"),
            HeaderType::Image => write!(f, "image"),
            HeaderType::Video => write!(f, "video"),
            HeaderType::Document => write!(f, "document"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "type", default)]
    pub kind: HeaderType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Local path of the media file to upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ButtonKind {
    QuickReply,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    pub text: String,
    /// Only meaningful for `URL` buttons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Button {
    pub fn quick_reply(text: impl Into<String>) -> Self {
        Self {
            kind: ButtonKind::QuickReply,
            text: text.into(),
            url: None,
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: ButtonKind::Url,
            text: text.into(),
            url: Some(url.into()),
        }
    }

    /// The button as the backend should receive it. A URL on a quick reply
    /// is dropped.
    pub fn normalized(&self) -> Self {
        Self {
            kind: self.kind,
            text: self.text.trim().to_string(),
            url: match self.kind {
                ButtonKind::Url => self.url.as_ref().map(|u| u.trim().to_string()),
                ButtonKind::QuickReply => None,
            },
        }
    }
}

/// Everything the template builder collects before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateDraft {
    /// Display name as typed; sanitized at submission
    pub name: String,
    /// Review category; `None` means "use the configured default"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Locale code such as `en_US`; empty means "use the configured default"
    pub language: String,
    pub header: Header,
    pub body: String,
    pub footer: String,
    pub variable_type: VariableType,
    /// One value per placeholder occurrence, in order of appearance
    pub samples: Vec<String>,
    pub buttons: Vec<Button>,
}

impl TemplateDraft {
    /// Load a draft from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| TemplateError::DraftReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content).map_err(|source| TemplateError::DraftParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
