//! The multipart form the template endpoint expects, and its reply.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::draft::{HeaderType, TemplateDraft};
use super::name::sanitize_template_name;
use super::validation::validate_draft;
use crate::errors::TemplateError;

/// Message shown when the backend fails without saying why.
pub const GENERIC_SUBMISSION_ERROR: &str = "Failed to submit template. Please try again.";

/// Field values of a template submission, in the order the endpoint reads
/// them. `samples` and `buttons` are JSON-encoded arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionForm {
    pub name: String,
    pub category: String,
    pub language: String,
    pub header_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_file: Option<PathBuf>,
    pub body: String,
    pub footer: String,
    pub samples: String,
    pub buttons: String,
}

/// A single multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart<'a> {
    Text(&'a str),
    File(&'a std::path::Path),
}

impl SubmissionForm {
    /// Validate `draft` and turn it into form fields with a sanitized name.
    pub fn from_draft(draft: &TemplateDraft) -> Result<Self, TemplateError> {
        validate_draft(draft).map_err(TemplateError::Invalid)?;

        let header = &draft.header;
        let header_text = (header.kind == HeaderType::Text).then(|| header.text.trim().to_string());
        let header_file = if header.kind.requires_file() {
            header.file.clone()
        } else {
            None
        };

        let samples = serde_json::to_string(&draft.samples).map_err(|source| {
            TemplateError::Encode {
                field: "samples",
                source,
            }
        })?;
        let buttons: Vec<_> = draft.buttons.iter().map(|b| b.normalized()).collect();
        let buttons = serde_json::to_string(&buttons).map_err(|source| TemplateError::Encode {
            field: "buttons",
            source,
        })?;

        let form = Self {
            name: sanitize_template_name(&draft.name),
            category: draft.category.unwrap_or_default().to_string(),
            language: draft.language.trim().to_string(),
            header_type: header.kind.to_string(),
            header_text,
            header_file,
            body: draft.body.clone(),
            footer: draft.footer.trim().to_string(),
            samples,
            buttons,
        };
        debug!(name = %form.name, "template submission form built");
        Ok(form)
    }

    /// The form as `(field, part)` pairs ready for a multipart encoder.
    pub fn parts(&self) -> Vec<(&'static str, FormPart<'_>)> {
        let mut parts = vec![
            ("name", FormPart::Text(&self.name)),
            ("category", FormPart::Text(&self.category)),
            ("language", FormPart::Text(&self.language)),
            ("header_type", FormPart::Text(&self.header_type)),
        ];
        if let Some(text) = &self.header_text {
            parts.push(("header_text", FormPart::Text(text)));
        }
        if let Some(file) = &self.header_file {
            parts.push(("header_file", FormPart::File(file)));
        }
        parts.extend([
            ("body", FormPart::Text(self.body.as_str())),
            ("footer", FormPart::Text(self.footer.as_str())),
            ("samples", FormPart::Text(self.samples.as_str())),
            ("buttons", FormPart::Text(self.buttons.as_str())),
        ]);
        parts
    }
}

/// What the template endpoint replies with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SubmissionResponse {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Turn a failed reply into an error carrying a user-facing message.
    pub fn into_result(self) -> Result<(), TemplateError> {
        if self.success {
            return Ok(());
        }
        let message = self
            .error
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| GENERIC_SUBMISSION_ERROR.to_string());
        warn!(%message, "template submission rejected");
        Err(TemplateError::Rejected { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Button, Category, Header};

    fn draft() -> TemplateDraft {
        TemplateDraft {
            name: "Order Update #2".to_string(),
            category: Some(Category::Utility),
            language: "en_US".to_string(),
            body: "Hi {{1}}, your order {{2}} shipped".to_string(),
            footer: " Thanks ".to_string(),
            samples: vec!["Alice".to_string(), "#1042".to_string()],
            buttons: vec![
                Button::url("Track", "https://example.com/t"),
                Button {
                    url: Some("https://dropped.example".to_string()),
                    ..Button::quick_reply("Stop")
                },
            ],
            ..TemplateDraft::default()
        }
    }

    #[test]
    fn test_form_from_valid_draft() {
        let form = SubmissionForm::from_draft(&draft()).unwrap();
        assert_eq!(form.name, "order_update_2");
        assert_eq!(form.category, "UTILITY");
        assert_eq!(form.header_type, "none");
        assert_eq!(form.header_text, None);
        assert_eq!(form.footer, "Thanks");
        assert_eq!(form.samples, r##"["Alice","#1042"]"##);
        assert_eq!(
            form.buttons,
            r#"[{"type":"URL","text":"Track","url":"https://example.com/t"},{"type":"QUICK_REPLY","text":"Stop"}]"#
        );
    }

    #[test]
    fn test_invalid_draft_produces_no_form() {
        let draft = TemplateDraft {
            name: String::new(),
            body: String::new(),
            samples: Vec::new(),
            ..draft()
        };
        match SubmissionForm::from_draft(&draft) {
            Err(TemplateError::Invalid(errors)) => {
                assert!(errors.contains("name"));
                assert!(errors.contains("body"));
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_samples_block_the_form() {
        let draft = TemplateDraft {
            body: "Hi {{1}}".to_string(),
            samples: vec!["Alice".to_string(), "Order 42".to_string(), "Friday".to_string()],
            ..draft()
        };
        match SubmissionForm::from_draft(&draft) {
            Err(TemplateError::Invalid(errors)) => {
                assert!(errors.get("samples").unwrap().contains("Expected 1"));
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_text_header_sent_as_text() {
        let draft = TemplateDraft {
            header: Header {
                kind: HeaderType::Text,
                text: "Shipping news".to_string(),
                file: Some(PathBuf::from("ignored.png")),
            },
            ..draft()
        };
        let form = SubmissionForm::from_draft(&draft).unwrap();
        assert_eq!(form.header_text.as_deref(), Some("Shipping news"));
        assert_eq!(form.header_file, None);
    }

    #[test]
    fn test_parts_order_with_media_header() {
        let draft = TemplateDraft {
            header: Header {
                kind: HeaderType::Document,
                text: String::new(),
                file: Some(PathBuf::from("invoice.pdf")),
            },
            ..draft()
        };
        let form = SubmissionForm::from_draft(&draft).unwrap();
        let names: Vec<_> = form.parts().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "category",
                "language",
                "header_type",
                "header_file",
                "body",
                "footer",
                "samples",
                "buttons"
            ]
        );
        let parts = form.parts();
        assert!(matches!(parts[4].1, FormPart::File(p) if p.ends_with("invoice.pdf")));
    }

    #[test]
    fn test_response_success() {
        let response = SubmissionResponse::parse(r#"{"success": true}"#).unwrap();
        assert!(response.into_result().is_ok());
    }

    #[test]
    fn test_response_failure_keeps_backend_message() {
        let response =
            SubmissionResponse::parse(r#"{"success": false, "error": "Name already taken"}"#)
                .unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Template submission rejected: Name already taken");
    }

    #[test]
    fn test_response_failure_without_message_is_generic() {
        let response = SubmissionResponse::parse(r#"{"success": false, "error": ""}"#).unwrap();
        match response.into_result() {
            Err(TemplateError::Rejected { message }) => {
                assert_eq!(message, GENERIC_SUBMISSION_ERROR);
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }
}
