//! CLI command implementations.
//!
//! | Module     | Commands handled |
//! |------------|------------------|
//! | `widget`   | `Widget`         |
//! | `template` | `Template`       |
//! | `config`   | `Config`         |

pub mod config;
pub mod template;
pub mod widget;

pub use config::cmd_config;
pub use template::cmd_template;
pub use widget::cmd_widget;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use stitchbyte::config::StitchbyteConfig;

use super::Cli;

/// Load configuration for the project, honoring `--config`.
fn load_config(project_dir: &Path, cli: &Cli) -> Result<StitchbyteConfig> {
    Ok(StitchbyteConfig::new(
        project_dir.to_path_buf(),
        cli.config.clone(),
    )?)
}

/// Read a file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))
}
