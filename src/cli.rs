//! CLI command definitions and handlers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{ConfigLoader, ConfigRegistry, LoadOptions};
use crate::dimensions::DimensionRegistry;
use crate::scoring::{DualScore, DualScoreCalculator};

/// WriteScore - dual-score writing analysis
///
/// Scores a document along configurable stylistic dimensions and reports an
/// AI-likelihood index and a quality index with improvement actions.
#[derive(Parser, Debug)]
#[command(name = "writescore")]
#[command(
    version,
    about = "Score writing for AI-likelihood and quality across stylistic dimensions",
    after_help = "\
Examples:
  writescore analyze draft.md                     Analyze a document
  writescore analyze draft.md --format json       JSON output for scripting
  writescore analyze draft.md --content-type technical
  writescore analyze draft.md --profile fast      Run only the fast profile
  writescore dimensions                           List available dimensions
  writescore config                               Show the effective config

Configuration layers (lowest to highest priority):
  embedded defaults < --local-config file < WRITESCORE_* env vars"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "WRITESCORE_LOG", default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a document and print its dual score
    Analyze {
        /// Document to analyze
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Content type preset adjusting dimension weights
        #[arg(long)]
        content_type: Option<String>,

        /// Run only the dimensions of a named profile
        #[arg(long)]
        profile: Option<String>,

        /// Base config file replacing the embedded defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Local override file merged over the base
        #[arg(long)]
        local_config: Option<PathBuf>,
    },

    /// List dimensions with their configured weights and tiers
    Dimensions,

    /// Print the effective merged configuration
    Config {
        /// Print the raw merged tree instead of the validated view
        #[arg(long)]
        raw: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            file,
            format,
            content_type,
            profile,
            config,
            local_config,
        } => analyze(
            &file,
            &format,
            content_type.as_deref(),
            profile.as_deref(),
            config,
            local_config,
        ),
        Commands::Dimensions => dimensions(),
        Commands::Config { raw } => show_config(raw),
    }
}

fn build_registry(
    base: Option<PathBuf>,
    local: Option<PathBuf>,
) -> Result<ConfigRegistry> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = base {
        loader = loader.with_base_file(path);
    }
    if let Some(path) = local {
        loader = loader.with_local_file(path);
    }
    Ok(ConfigRegistry::from_loader(&loader, LoadOptions::default())?)
}

fn analyze(
    file: &PathBuf,
    format: &str,
    content_type: Option<&str>,
    profile: Option<&str>,
    config_path: Option<PathBuf>,
    local_config: Option<PathBuf>,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut config = build_registry(config_path, local_config)?;
    if let Some(ct) = content_type {
        config.set_content_type(ct).with_context(|| {
            format!(
                "available content types: {}",
                config.available_content_types().join(", ")
            )
        })?;
    }

    let dimensions = DimensionRegistry::with_builtins();
    let result = DualScoreCalculator::new(&config, &dimensions).analyze(&text, profile)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_text_report(&result),
    }
    Ok(())
}

fn print_text_report(result: &DualScore) {
    println!("AI likelihood  {:>5.1}  ({})", result.ai_likelihood, result.ai_label);
    println!("Quality        {:>5.1}  ({})", result.quality, result.quality_label);
    println!();
    println!("{:<20} {:>6} {:>8}  {}", "dimension", "score", "weight", "status");
    for dim in &result.dimensions {
        let status = if dim.available { "ok" } else { "unavailable" };
        println!(
            "{:<20} {:>6.1} {:>8.2}  {}",
            dim.name, dim.score, dim.weight, status
        );
    }
    if !result.actions.is_empty() {
        println!();
        println!("Improvement actions:");
        for action in &result.actions {
            println!("  [{:<12}] {}", action.dimension, action.suggestion);
        }
    }
}

fn dimensions() -> Result<()> {
    let config = ConfigRegistry::with_defaults()?;
    let registry = DimensionRegistry::with_builtins();
    println!(
        "{:<20} {:>6} {:<14} {:<10}  {}",
        "dimension", "weight", "tier", "analyzer", "description"
    );
    for (name, dim_config) in &config.config().dimensions {
        let analyzer = if registry.get(name).is_some() {
            "built-in"
        } else {
            "none"
        };
        println!(
            "{:<20} {:>6.1} {:<14} {:<10}  {}",
            name,
            dim_config.weight,
            format!("{:?}", dim_config.tier).to_uppercase(),
            analyzer,
            dim_config.description
        );
    }
    Ok(())
}

fn show_config(raw: bool) -> Result<()> {
    let config = ConfigRegistry::with_defaults()?;
    let rendered = if raw {
        serde_yaml::to_string(config.raw())?
    } else {
        serde_yaml::to_string(config.config())?
    };
    print!("{rendered}");
    Ok(())
}
