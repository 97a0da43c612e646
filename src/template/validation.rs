//! Submission-time checks for template drafts.
//!
//! Every problem is collected into a field → message map instead of stopping
//! at the first one, so the editor can show all of them inline.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::draft::{
    ButtonKind, HeaderType, MAX_BODY_LEN, MAX_BUTTON_TEXT, MAX_BUTTONS, MAX_FOOTER_LEN,
    MAX_HEADER_TEXT_LEN, TemplateDraft,
};
use super::name::sanitize_template_name;
use super::placeholder::count_placeholders;

/// Field errors keyed by field path (`name`, `body`, `buttons[1].url`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Check a draft before submission.
pub fn validate_draft(draft: &TemplateDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert("name", "Template name is required");
    } else if sanitize_template_name(&draft.name).is_empty() {
        errors.insert("name", "Template name must contain letters or numbers");
    }

    if draft.language.trim().is_empty() {
        errors.insert("language", "Language is required");
    }

    if draft.body.trim().is_empty() {
        errors.insert("body", "Message body is required");
    } else if draft.body.chars().count() > MAX_BODY_LEN {
        errors.insert(
            "body",
            format!("Message body must be at most {} characters", MAX_BODY_LEN),
        );
    }

    check_header(draft, &mut errors);

    if draft.footer.chars().count() > MAX_FOOTER_LEN {
        errors.insert(
            "footer",
            format!("Footer must be at most {} characters", MAX_FOOTER_LEN),
        );
    }

    let expected = count_placeholders(&draft.body, draft.variable_type);
    if draft.samples.len() != expected {
        errors.insert(
            "samples",
            format!(
                "Expected {} sample value(s) for the body placeholders, found {}",
                expected,
                draft.samples.len()
            ),
        );
    }

    check_buttons(draft, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(count = errors.len(), "template draft failed validation");
        Err(errors)
    }
}

fn check_header(draft: &TemplateDraft, errors: &mut ValidationErrors) {
    let header = &draft.header;
    match header.kind {
        HeaderType::Text => {
            if header.text.trim().is_empty() {
                errors.insert("header_text", "Header text is required for a text header");
            } else if header.text.chars().count() > MAX_HEADER_TEXT_LEN {
                errors.insert(
                    "header_text",
                    format!(
                        "Header text must be at most {} characters",
                        MAX_HEADER_TEXT_LEN
                    ),
                );
            }
        }
        kind if kind.requires_file() && header.file.is_none() => {
            errors.insert(
                "header_file",
                format!("Please attach a file for the {} header", kind),
            );
        }
        _ => {}
    }
}

fn check_buttons(draft: &TemplateDraft, errors: &mut ValidationErrors) {
    if draft.buttons.len() > MAX_BUTTONS {
        errors.insert(
            "buttons",
            format!("A template can have at most {} buttons", MAX_BUTTONS),
        );
    }

    for (i, button) in draft.buttons.iter().enumerate() {
        let text = button.text.trim();
        if text.is_empty() {
            errors.insert(format!("buttons[{}].text", i), "Button text is required");
        } else if text.chars().count() > MAX_BUTTON_TEXT {
            errors.insert(
                format!("buttons[{}].text", i),
                format!("Button text must be at most {} characters", MAX_BUTTON_TEXT),
            );
        }

        if button.kind == ButtonKind::Url {
            match button.url.as_deref().map(str::trim) {
                None | Some("") => {
                    errors.insert(format!("buttons[{}].url", i), "URL is required");
                }
                Some(url) if !(url.starts_with("https://") || url.starts_with("http://")) => {
                    errors.insert(
                        format!("buttons[{}].url", i),
                        "URL must start with http:// or https://",
                    );
                }
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Button, Header, VariableType};
    use std::path::PathBuf;

    fn valid_draft() -> TemplateDraft {
        TemplateDraft {
            name: "Order Update".to_string(),
            language: "en_US".to_string(),
            body: "Hi {{1}}, your order {{2}} shipped".to_string(),
            samples: vec!["Alice".to_string(), "#1042".to_string()],
            ..TemplateDraft::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_empty_name_and_body_reports_both() {
        let draft = TemplateDraft {
            name: String::new(),
            body: "   ".to_string(),
            samples: Vec::new(),
            ..valid_draft()
        };
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.get("name"), Some("Template name is required"));
        assert_eq!(errors.get("body"), Some("Message body is required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_name_without_identifier_chars() {
        let draft = TemplateDraft {
            name: "!!!".to_string(),
            ..valid_draft()
        };
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.get("name").unwrap().contains("letters or numbers"));
    }

    #[test]
    fn test_media_header_requires_file() {
        for kind in [HeaderType::Image, HeaderType::Video, HeaderType::Document] {
            let draft = TemplateDraft {
                header: Header {
                    kind,
                    ..Header::default()
                },
                ..valid_draft()
            };
            let errors = validate_draft(&draft).unwrap_err();
            assert!(errors.contains("header_file"), "{} header", kind);
            assert!(errors.get("header_file").unwrap().contains(&kind.to_string()));
        }
    }

    #[test]
    fn test_media_header_with_file_passes() {
        let draft = TemplateDraft {
            header: Header {
                kind: HeaderType::Image,
                file: Some(PathBuf::from("banner.png")),
                ..Header::default()
            },
            ..valid_draft()
        };
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_text_header_requires_text() {
        let draft = TemplateDraft {
            header: Header {
                kind: HeaderType::Text,
                ..Header::default()
            },
            ..valid_draft()
        };
        assert!(validate_draft(&draft).unwrap_err().contains("header_text"));
    }

    #[test]
    fn test_sample_count_mismatch() {
        let draft = TemplateDraft {
            samples: vec!["Alice".to_string()],
            ..valid_draft()
        };
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.get("samples").unwrap().contains("Expected 2"));
    }

    #[test]
    fn test_variable_type_none_expects_no_samples() {
        let draft = TemplateDraft {
            variable_type: VariableType::None,
            samples: Vec::new(),
            ..valid_draft()
        };
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_button_rules() {
        let draft = TemplateDraft {
            buttons: vec![
                Button::quick_reply("This label is far too long"),
                Button {
                    kind: ButtonKind::Url,
                    text: "Visit".to_string(),
                    url: None,
                },
                Button::url("Track", "example.com/track"),
                Button::quick_reply(""),
            ],
            ..valid_draft()
        };
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.contains("buttons"));
        assert!(errors.contains("buttons[0].text"));
        assert_eq!(errors.get("buttons[1].url"), Some("URL is required"));
        assert!(errors.get("buttons[2].url").unwrap().contains("https://"));
        assert!(errors.contains("buttons[3].text"));
    }

    #[test]
    fn test_twenty_char_button_is_allowed() {
        let draft = TemplateDraft {
            buttons: vec![Button::quick_reply("a".repeat(MAX_BUTTON_TEXT))],
            ..valid_draft()
        };
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_footer_and_body_limits() {
        let draft = TemplateDraft {
            body: "x".repeat(MAX_BODY_LEN + 1),
            samples: Vec::new(),
            footer: "y".repeat(MAX_FOOTER_LEN + 1),
            ..valid_draft()
        };
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.contains("body"));
        assert!(errors.contains("footer"));
    }

    #[test]
    fn test_display_joins_fields_in_order() {
        let mut errors = ValidationErrors::default();
        errors.insert("name", "a");
        errors.insert("body", "b");
        assert_eq!(errors.to_string(), "body: b; name: a");
    }
}
