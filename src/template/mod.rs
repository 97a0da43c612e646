//! WhatsApp message template builder logic.
//!
//! - `placeholder`: finds `{{N}}` tokens and keeps sample values in step
//!   with the body
//! - `name`: rewrites display names into API identifiers
//! - `draft`: the builder's fields (header, footer, buttons, ...)
//! - `validation`: submission-time checks collected per field
//! - `submission`: the form sent to the template endpoint and its reply
//!
//! The backend call itself lives outside this crate; everything here is pure
//! and synchronous.

mod draft;
mod name;
mod placeholder;
mod submission;
mod validation;

pub use draft::{
    Button, ButtonKind, Category, Header, HeaderType, MAX_BODY_LEN, MAX_BUTTON_TEXT, MAX_BUTTONS,
    MAX_FOOTER_LEN, MAX_HEADER_TEXT_LEN, TemplateDraft,
};
pub use name::{SanitizedName, sanitize_template_name};
pub use placeholder::{
    Placeholder, PlaceholderTracker, VariableType, count_placeholders, extract_placeholders,
    reconcile_samples,
};
pub use submission::{FormPart, GENERIC_SUBMISSION_ERROR, SubmissionForm, SubmissionResponse};
pub use validation::{ValidationErrors, validate_draft};
