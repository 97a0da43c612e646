//! Template draft commands: `stitchbyte template`.

use anyhow::{Context, Result, bail};
use console::style;
use std::path::Path;
use tracing::warn;

use stitchbyte::config::TemplateDefaults;
use stitchbyte::errors::TemplateError;
use stitchbyte::template::{
    PlaceholderTracker, SanitizedName, SubmissionForm, SubmissionResponse, TemplateDraft,
    ValidationErrors, VariableType, extract_placeholders, validate_draft,
};

use super::super::{Cli, TemplateCommands};

pub fn cmd_template(project_dir: &Path, cli: &Cli, command: &TemplateCommands) -> Result<()> {
    match command {
        TemplateCommands::Placeholders { body, none } => {
            let body = super::read_input(body)?;
            let variable_type = if *none {
                VariableType::None
            } else {
                VariableType::Numbered
            };
            let placeholders = extract_placeholders(&body, variable_type);

            if placeholders.is_empty() {
                println!("No placeholders found.");
                return Ok(());
            }
            for (i, placeholder) in placeholders.iter().enumerate() {
                println!("{}\t{}", i + 1, placeholder.token);
            }
            println!();
            println!("{} sample value(s) needed", placeholders.len());
        }
        TemplateCommands::Sanitize { name } => {
            let name = SanitizedName::new(name);
            if name.is_empty() {
                bail!("Template name must contain letters or numbers");
            }
            println!("{}", name.sanitized);
            if name.changed() {
                eprintln!(
                    "{} Name will be submitted as '{}'",
                    style("note:").cyan(),
                    name.sanitized
                );
            }
        }
        TemplateCommands::Validate { draft } => {
            let config = super::load_config(project_dir, cli)?;
            let draft = load_draft(draft, config.template_defaults())?;
            show_name_notice(&draft);

            match validate_draft(&draft) {
                Ok(()) => println!("Template draft is valid."),
                Err(errors) => {
                    print_errors(&errors);
                    bail!("Template draft has {} error(s)", errors.len());
                }
            }
        }
        TemplateCommands::Payload { draft, realign } => {
            let config = super::load_config(project_dir, cli)?;
            let mut draft = load_draft(draft, config.template_defaults())?;
            show_name_notice(&draft);

            if *realign {
                realign_samples(&mut draft);
            }

            match SubmissionForm::from_draft(&draft) {
                Ok(form) => {
                    let json = serde_json::to_string_pretty(&form)
                        .context("Failed to serialize submission form")?;
                    println!("{}", json);
                }
                Err(TemplateError::Invalid(errors)) => {
                    print_errors(&errors);
                    bail!("Template draft has {} error(s)", errors.len());
                }
                Err(e) => return Err(e.into()),
            }
        }
        TemplateCommands::Response { response } => {
            let content = super::read_input(response)?;
            let response = SubmissionResponse::parse(&content)
                .context("Failed to parse template endpoint response")?;
            response.into_result()?;
            println!("Template submitted for review.");
        }
    }

    Ok(())
}

/// Load a draft and fill blank category/language from configuration.
fn load_draft(path: &Path, defaults: &TemplateDefaults) -> Result<TemplateDraft> {
    let mut draft = TemplateDraft::load(path)?;
    if draft.category.is_none() {
        draft.category = Some(defaults.category);
    }
    if draft.language.trim().is_empty() {
        draft.language = defaults.language.clone();
    }
    Ok(draft)
}

/// Pad or trim the draft's samples to its placeholder count.
fn realign_samples(draft: &mut TemplateDraft) {
    let saved = draft.samples.len();
    let tracker = PlaceholderTracker::restore(
        &draft.body,
        draft.variable_type,
        std::mem::take(&mut draft.samples),
    );
    let (_, _, samples) = tracker.into_parts();
    if samples.len() != saved {
        warn!(from = saved, to = samples.len(), "draft samples realigned with body");
        eprintln!(
            "{} Realigned samples: {} → {}",
            style("note:").cyan(),
            saved,
            samples.len()
        );
    }
    draft.samples = samples;
}

fn show_name_notice(draft: &TemplateDraft) {
    let name = SanitizedName::new(&draft.name);
    if name.changed() && !name.is_empty() {
        eprintln!(
            "{} Name will be submitted as '{}'",
            style("note:").cyan(),
            name.sanitized
        );
    }
}

fn print_errors(errors: &ValidationErrors) {
    println!("{}", style("Template draft is not ready to submit:").red());
    for (field, message) in errors.iter() {
        println!("  - {}: {}", field, message);
    }
}
