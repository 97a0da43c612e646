//! Widget snippet generation: `stitchbyte widget`.

use anyhow::{Context, Result, bail};
use console::style;
use std::path::Path;

use stitchbyte::widget::{
    MIN_PHONE_DIGITS, Position, WidgetConfig, generate, is_placeholder_snippet, normalize_phone,
};

use super::super::{Cli, WidgetArgs};

pub fn cmd_widget(project_dir: &Path, cli: &Cli, args: &WidgetArgs) -> Result<()> {
    let config = super::load_config(project_dir, cli)?;
    let widget = apply_overrides(config.widget().clone(), args)?;

    let snippet = generate(&widget);
    if is_placeholder_snippet(&snippet) {
        // Show the placeholder like the live preview does, but never write it out.
        println!("{}", snippet);
        bail!(
            "Cannot generate widget code: the phone number needs at least {} digits (found {})",
            MIN_PHONE_DIGITS,
            normalize_phone(&widget.phone_number).len()
        );
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", snippet))
                .with_context(|| format!("Failed to write widget code: {}", path.display()))?;
            eprintln!(
                "{} Widget code written to {}",
                style("✓").green(),
                path.display()
            );
            eprintln!("Paste it just before </body> on every page that should show the widget.");
        }
        None => println!("{}", snippet),
    }

    Ok(())
}

/// Layer CLI flags over the configured widget settings.
fn apply_overrides(mut widget: WidgetConfig, args: &WidgetArgs) -> Result<WidgetConfig> {
    if let Some(phone) = &args.phone {
        widget.phone_number = phone.clone();
    }
    if let Some(name) = &args.brand_name {
        widget.brand_name = name.clone();
    }
    if let Some(subtitle) = &args.brand_subtitle {
        widget.brand_subtitle = subtitle.clone();
    }
    if let Some(url) = &args.brand_image_url {
        widget.brand_image_url = url.clone();
    }
    if let Some(color) = &args.brand_color {
        widget.brand_color = color.clone();
    }
    if let Some(message) = &args.welcome_message {
        widget.welcome_message = unescape_newlines(message);
    }
    if let Some(cta) = &args.cta_text {
        widget.cta_text = cta.clone();
    }
    if let Some(position) = &args.position {
        widget.position = position.parse::<Position>()?;
    }
    if let Some(bottom) = &args.margin_bottom {
        widget.margin_bottom = bottom.clone();
    }
    if let Some(side) = &args.margin_side {
        match widget.position {
            Position::BottomRight => widget.margin_right = side.clone(),
            Position::BottomLeft => widget.margin_left = side.clone(),
        }
    }
    if let Some(radius) = &args.border_radius {
        widget.border_radius = radius.clone();
    }
    if let Some(open) = args.open_by_default {
        widget.open_by_default = open;
    }
    if let Some(open) = args.open_on_mobile {
        widget.open_on_mobile = open;
    }
    if let Some(reopen) = &args.reopen_after {
        widget.reopen_after = reopen.clone();
    }
    Ok(widget)
}

/// Shells pass `\n` through literally; treat it as a line break.
fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}
