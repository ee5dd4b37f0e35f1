//! api-baseline: structural API diff and semantic version baselining
//!
//! Compares two snapshots of a component's public API and suggests the
//! versions its exported units should declare.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use api_baseline::{
    cli::{self, SnapshotPaths},
    config::{AppConfig, CONFIG_FILE_NAMES},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "api-baseline")]
#[command(version)]
#[command(about = "Structural API diff and semantic version baselining", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Versions are consistent (or --fail-on-mismatch not given)
    1  Version mismatch with --fail-on-mismatch
    3  Error occurred

EXAMPLES:
    # Check the declared versions of a release against the previous one
    api-baseline baseline new.json --older old.json --fail-on-mismatch

    # Export JSON for processing
    api-baseline baseline new.json --older old.json -o json > baseline.json

    # Show what changed structurally
    api-baseline diff new.json old.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `baseline` subcommand
#[derive(Parser)]
struct BaselineArgs {
    /// Snapshot of the release being checked
    newer: PathBuf,

    /// Snapshot of the previous release (first release if omitted)
    #[arg(long)]
    older: Option<PathBuf>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Unit instructions, first match wins (`!` excludes)
    #[arg(long = "units", value_delimiter = ',')]
    units: Vec<String>,

    /// Paths to ignore: packages, types or `Type#member`
    #[arg(long = "ignore", value_delimiter = ',')]
    ignore: Vec<String>,

    /// List unchanged units too
    #[arg(long)]
    all: bool,

    /// Include the changed nodes of each unit's diff
    #[arg(long)]
    diff: bool,

    /// Exit with code 1 if the component or any unit is under-versioned
    #[arg(long)]
    fail_on_mismatch: bool,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Snapshot of the newer release
    newer: PathBuf,

    /// Snapshot of the older release
    older: PathBuf,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Show unchanged nodes too
    #[arg(long)]
    all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest unit and component versions from two snapshots
    Baseline(BaselineArgs),

    /// Print the structural diff of two snapshots
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .api-baseline.yaml in the current directory
    Init,
}

/// Layer command-line flags over the discovered config file.
fn load_config(cli_config: Option<&std::path::Path>, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli_config, overrides)
        .context("failed to load configuration")?;
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    Ok(config)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Baseline(args) => {
            let mut overrides = AppConfig::builder()
                .output_file(args.output_file)
                .fail_on_mismatch(args.fail_on_mismatch)
                .build();
            overrides.baseline.units = args.units;
            overrides.baseline.ignore = args.ignore;
            if let Some(format) = args.output {
                overrides.output.format = format;
            }
            overrides.output.show_all = args.all;
            overrides.output.show_diff = args.diff;
            overrides.behavior.quiet = cli.quiet;

            let config = load_config(cli.config.as_deref(), &overrides)?;
            cli::run_baseline(
                config,
                SnapshotPaths {
                    newer: args.newer,
                    older: args.older,
                },
            )
        }

        Commands::Diff(args) => {
            let mut overrides = AppConfig::builder().output_file(args.output_file).build();
            if let Some(format) = args.output {
                overrides.output.format = format;
            }
            overrides.output.show_all = args.all;
            overrides.behavior.quiet = cli.quiet;

            let config = load_config(cli.config.as_deref(), &overrides)?;
            cli::run_diff(config, &args.newer, &args.older)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "api-baseline", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = api_baseline::config::generate_json_schema()
                .context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    api_baseline::config::load_or_default(cli.config.as_deref())
                        .context("failed to load configuration")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("api-baseline").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match api_baseline::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".api-baseline.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = api_baseline::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
