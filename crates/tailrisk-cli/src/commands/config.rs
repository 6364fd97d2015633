//! Config command implementation.
//!
//! Shows the effective configuration, validates configuration files and
//! writes a starter file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use tailrisk_config::{AnalysisConfig, ConfigError};

use crate::cli::OutputFormat;
use crate::commands::{load_config, DEFAULT_CONFIG_FILE};
use crate::output::{print_error, print_header, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Check a configuration file and report every problem found
    Validate(ValidateArgs),

    /// Write a configuration file with the default values
    Init(InitArgs),
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file (.toml or .json)
    pub path: PathBuf,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
///
/// The configuration is only loaded for `show`, so a broken file can still
/// be validated or replaced.
pub fn execute(args: ConfigArgs, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(&load_config(config_path)?, format),
        ConfigCommand::Validate(args) => validate(&args.path),
        ConfigCommand::Init(args) => init(&args),
    }
}

fn show(config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", config.to_json_string()?),
        OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("confidence_level", config.confidence_level.to_string()),
                KeyValue::new("num_simulations", config.num_simulations.to_string()),
                KeyValue::new(
                    "seed",
                    config
                        .seed
                        .map_or_else(|| "(entropy)".to_string(), |s| s.to_string()),
                ),
                KeyValue::new("stress_periods", config.stress_periods.to_string()),
                KeyValue::new("backtest", config.backtest.to_string()),
                KeyValue::new("data_dir", config.data_dir.display().to_string()),
                KeyValue::new(
                    "shocks",
                    if config.shocks.is_some() {
                        "custom"
                    } else {
                        "standard"
                    },
                ),
            ];
            if format == OutputFormat::Table {
                print_header("Configuration");
            }
            print_output(&rows, format)?;
        }
    }
    Ok(())
}

fn validate(path: &Path) -> Result<()> {
    match AnalysisConfig::from_file(path) {
        Ok(_) => {
            print_success(&format!("{} is valid", path.display()));
            Ok(())
        }
        Err(ConfigError::MultipleValidationErrors(errors)) => {
            for error in &errors {
                print_error(&error.to_string());
            }
            bail!("{} has {} problems", path.display(), errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn init(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            args.path.display()
        );
    }

    let config = AnalysisConfig::default();
    let content = if args
        .path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
    {
        config.to_json_string()?
    } else {
        config.to_toml_string()?
    };
    std::fs::write(&args.path, content)?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(())
}
