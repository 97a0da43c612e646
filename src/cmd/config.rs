//! Configuration view and validation commands: `stitchbyte config`.

use anyhow::{Context, Result};
use std::path::Path;

use stitchbyte::config::StitchbyteToml;

use super::super::{Cli, ConfigCommands};

pub fn cmd_config(project_dir: &Path, cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    let config = super::load_config(project_dir, cli)?;
    let config_path = &config.config_path;

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("StitchByte Configuration");
            println!("========================");
            println!();

            if config.from_file {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No stitchbyte.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let widget = config.widget();
            println!("[widget]");
            println!("  phone_number = \"{}\"", widget.phone_number);
            println!("  brand_name = \"{}\"", widget.brand_name);
            println!("  brand_subtitle = \"{}\"", widget.brand_subtitle);
            println!("  brand_image_url = \"{}\"", widget.brand_image_url);
            println!("  brand_color = \"{}\"", widget.brand_color);
            println!("  welcome_message = {:?}", widget.welcome_message);
            println!("  cta_text = \"{}\"", widget.cta_text);
            println!("  position = \"{}\"", widget.position);
            println!("  margin_bottom = \"{}\"", widget.margin_bottom);
            println!("  margin_left = \"{}\"", widget.margin_left);
            println!("  margin_right = \"{}\"", widget.margin_right);
            println!("  border_radius = \"{}\"", widget.border_radius);
            println!("  open_by_default = {}", widget.open_by_default);
            println!("  open_on_mobile = {}", widget.open_on_mobile);
            println!("  reopen_after = \"{}\"", widget.reopen_after);
            println!();

            let template = config.template_defaults();
            println!("[template]");
            println!("  category = \"{}\"", template.category);
            println!("  language = \"{}\"", template.language);
            println!();

            if !config.from_file {
                println!("Run 'stitchbyte config init' to create a stitchbyte.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("stitchbyte.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            StitchbyteToml::default().save(config_path)?;

            println!("Created stitchbyte.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [widget] phone_number, brand_name, brand_color, position, welcome_message");
            println!("  - [template] category, language");
            println!();
        }
    }

    Ok(())
}
