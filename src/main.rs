// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Panorama Import CLI
//!
//! Copies one image per `<Time>/<Elevation>/<Direction>/` export folder into
//! the web asset directory, and indexes or checks the result.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use panorama_import::config::ImportConfig;
use panorama_import::importer::{Importer, SkipReason};
use panorama_import::manifest::build_manifest;
use panorama_import::validate::validate_coverage;
use panorama_import::{ImportError, Result};

/// Exit status when `validate --strict` finds gaps
const EXIT_INCOMPLETE: u8 = 2;

/// Panorama Import - capture exports to web assets
#[derive(Parser, Debug)]
#[command(name = "panorama-import")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Import panorama exports into a flat web asset directory", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "panorama-import.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Root of the exported panorama tree (overrides config)
    #[arg(short, long, global = true, env = "PANORAMA_SOURCE")]
    source: Option<PathBuf>,

    /// Asset directory to import into, index or check (overrides config)
    #[arg(short, long, global = true, env = "PANORAMA_TARGET")]
    target: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy the best image of every export folder into the target directory
    Import {
        /// Show what would be copied without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a JSON manifest of the assets in the target directory
    Manifest {
        /// Manifest file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Public URL prefix for each asset (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Report which floor/time/direction assets are missing
    Validate {
        /// Exit with status 2 if anything is missing
        #[arg(long)]
        strict: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "panorama-import.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let Cli { config: config_path, source, target, command, .. } = cli;

    // Loaded per command so that `config generate` can replace a broken file
    let load = || -> Result<ImportConfig> {
        Ok(ImportConfig::load(&config_path)?.with_overrides(source.clone(), target.clone()))
    };

    match command {
        Some(Commands::Import { dry_run }) => run_import(load()?, dry_run),
        Some(Commands::Manifest { output, base_url }) => run_manifest(load()?, output, base_url),
        Some(Commands::Validate { strict }) => run_validate(load()?, strict),
        Some(Commands::Config { action }) => run_config_command(action, load),
        None => run_import(load()?, false),
    }
}

fn run_import(config: ImportConfig, dry_run: bool) -> Result<ExitCode> {
    info!("Source: {:?}", config.source_root);
    info!("Target: {:?}", config.target_root);

    let report = Importer::new(&config).dry_run(dry_run).run()?;

    info!(
        "{} {} asset(s); skipped {} missing time folder(s), {} missing elevation folder(s), \
         {} unmatched folder(s), {} folder(s) without images",
        if dry_run { "Would copy" } else { "Copied" },
        report.copies.len(),
        report.skipped(SkipReason::MissingTimeFolder),
        report.skipped(SkipReason::MissingElevationFolder),
        report.skipped(SkipReason::UnresolvedDirection),
        report.skipped(SkipReason::NoCandidate),
    );

    Ok(ExitCode::SUCCESS)
}

fn run_manifest(
    config: ImportConfig,
    output: Option<PathBuf>,
    base_url: Option<String>,
) -> Result<ExitCode> {
    let output = output.unwrap_or(config.manifest.output);
    let base_url = base_url.or(config.manifest.base_url);

    let manifest = build_manifest(&config.target_root, base_url.as_deref())?;
    if manifest.is_empty() {
        warn!("No assets found in {:?}", config.target_root);
    }
    manifest.save(&output)?;

    info!("Generated manifest with {} entries", manifest.len());
    info!("Saved to: {:?}", output);
    Ok(ExitCode::SUCCESS)
}

fn run_validate(config: ImportConfig, strict: bool) -> Result<ExitCode> {
    let report = validate_coverage(&config.target_root, &config.mappings);

    for asset in &report.missing {
        println!("  missing: {}", asset);
    }
    println!(
        "Assets present: {}/{} in {}",
        report.present.len(),
        report.total(),
        config.target_root.display()
    );

    if strict && !report.is_complete() {
        return Ok(ExitCode::from(EXIT_INCOMPLETE));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_config_command(
    action: ConfigCommands,
    load: impl FnOnce() -> Result<ImportConfig>,
) -> Result<ExitCode> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&load()?)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output, force } => {
            generate_config(&output, force)?;
            println!("Generated config at {:?}", output);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn generate_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(ImportError::Config(format!(
            "{:?} already exists, use --force to overwrite",
            output
        )));
    }
    ImportConfig::default().save(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["panorama-import"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("panorama-import.json"));
    }

    #[test]
    fn test_cli_import_command() {
        let cli = Cli::try_parse_from([
            "panorama-import", "import", "--dry-run", "--source", "/tmp/in", "--target", "/tmp/out"
        ]).unwrap();

        assert_eq!(cli.source, Some(PathBuf::from("/tmp/in")));
        assert_eq!(cli.target, Some(PathBuf::from("/tmp/out")));
        match cli.command {
            Some(Commands::Import { dry_run }) => assert!(dry_run),
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_cli_paths_from_environment() {
        std::env::set_var("PANORAMA_SOURCE", "/env/in");
        std::env::set_var("PANORAMA_TARGET", "/env/out");
        let default_run = Cli::try_parse_from(["panorama-import"]);
        let flag_wins = Cli::try_parse_from(["panorama-import", "validate", "-t", "/flag/out"]);
        std::env::remove_var("PANORAMA_SOURCE");
        std::env::remove_var("PANORAMA_TARGET");

        let cli = default_run.unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.source, Some(PathBuf::from("/env/in")));
        assert_eq!(cli.target, Some(PathBuf::from("/env/out")));

        let cli = flag_wins.unwrap();
        assert_eq!(cli.target, Some(PathBuf::from("/flag/out")));
    }

    #[test]
    fn test_generate_replaces_malformed_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("panorama-import.json");
        std::fs::write(&path, "{ not json").unwrap();
        let path_arg = path.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "panorama-import", "-c", path_arg, "config", "generate", "-o", path_arg, "--force"
        ]).unwrap();
        assert!(dispatch(cli).is_ok());
        assert!(ImportConfig::load(&path).is_ok());

        let cli = Cli::try_parse_from(["panorama-import", "-c", path_arg, "config", "show"]).unwrap();
        assert!(dispatch(cli).is_ok());
    }

    #[test]
    fn test_cli_validate_command() {
        let cli = Cli::try_parse_from([
            "panorama-import", "-q", "validate", "--strict"
        ]).unwrap();

        assert!(cli.quiet);
        match cli.command {
            Some(Commands::Validate { strict, .. }) => assert!(strict),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_manifest_command() {
        let cli = Cli::try_parse_from([
            "panorama-import", "manifest", "--base-url", "https://cdn.example.com", "-o", "m.json"
        ]).unwrap();

        match cli.command {
            Some(Commands::Manifest { output, base_url, .. }) => {
                assert_eq!(output, Some(PathBuf::from("m.json")));
                assert_eq!(base_url.as_deref(), Some("https://cdn.example.com"));
            }
            _ => panic!("Expected Manifest command"),
        }
    }

    #[test]
    fn test_generate_config_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("panorama-import.json");

        generate_config(&path, false).unwrap();
        assert!(generate_config(&path, false).is_err());
        generate_config(&path, true).unwrap();
        assert!(ImportConfig::load(&path).is_ok());
    }
}
