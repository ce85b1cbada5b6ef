//! @acp:module "Init Command"
//! @acp:summary "Write a starter configuration file"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `stratnav init`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Where to write the config
    pub path: PathBuf,
    /// Force overwrite existing config
    pub force: bool,
    /// Workbook path to record in the config
    pub workbook: Option<PathBuf>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            force: false,
            workbook: None,
        }
    }
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.path.exists() && !options.force {
        eprintln!(
            "{} Config file already exists. Use --force to overwrite.",
            style("✗").red()
        );
        std::process::exit(1);
    }

    let mut config = Config::default();
    if let Some(workbook) = options.workbook {
        config.workbook.path = workbook;
    }

    config
        .save(&options.path)
        .with_context(|| format!("Failed to write {}", options.path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        options.path.display()
    );

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  1. Adjust the column layout in {} to match {}",
        options.path.display(),
        config.workbook.path.display()
    );
    println!("  2. Run {} to validate it", style("stratnav check").cyan());
    println!(
        "  3. Export {} and run {}",
        config.generator.api_key_env,
        style("stratnav run").cyan()
    );

    Ok(())
}
