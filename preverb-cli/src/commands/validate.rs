//! Validate command implementation

use super::process::OutputFormat;
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match Self::check(&self.config) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!(
                    "  Rule revision: {} (radius {})",
                    config.engine.revision,
                    config.engine.revision.radius()
                );
                println!("  Output format: {}", config.output.default_format);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e}"))
            }
        }
    }

    fn check(path: &Path) -> Result<CliConfig> {
        let config = CliConfig::from_file(path)?;
        config.validate()?;
        OutputFormat::from_name(&config.output.default_format)?;
        Ok(config)
    }
}
