// SPDX-License-Identifier: PMPL-1.0-or-later
//! Outlinebot CLI - Document Outline Integrity Bot
//!
//! Part of the gitbot-fleet ecosystem.

use clap::{Parser, Subcommand, ValueEnum};
use outlinebot::config::{self, Config};
use outlinebot::fleet::FindingSet;
use outlinebot::report::{generate_report, OutputFormat};
use outlinebot::scanner;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Document Outline Integrity Bot for gitbot-fleet
#[derive(Parser)]
#[command(name = "outlinebot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit heading hierarchy across a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fail on any warnings (strict mode)
        #[arg(long)]
        strict: bool,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Audit a single file
    Analyze {
        /// File to audit
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fail on any warnings (strict mode)
        #[arg(long)]
        strict: bool,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Generate a SARIF report for a directory
    Report {
        /// Directory to scan
        dir: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Run as a fleet member (machine-readable output)
    Fleet {
        /// Directory to scan
        dir: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Initialize a configuration file
    Init {
        /// Destination path (defaults to the user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Output format (yaml, toml)
        #[arg(long, default_value = "yaml")]
        format: String,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("outlinebot=debug")
    } else {
        EnvFilter::new("outlinebot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { dir, format, output, config, strict, verbose } => {
            init_logging(verbose);
            let config = resolve_config(config.as_deref(), strict)?;
            let findings = scanner::scan_directory(&dir, &config)?;
            let report = generate_report(&findings, format.into());
            write_output(&report, output.as_deref())?;
            exit_for(&findings, &config);
        }

        Commands::Analyze { file, format, config, strict, verbose } => {
            init_logging(verbose);
            let config = resolve_config(config.as_deref(), strict)?;
            let findings = scanner::scan_file(&file, &config)?;
            let report = generate_report(&findings, format.into());
            println!("{}", report);
            exit_for(&findings, &config);
        }

        Commands::Report { dir, output, config, verbose } => {
            init_logging(verbose);
            let config = resolve_config(config.as_deref(), false)?;
            let findings = scanner::scan_directory(&dir, &config)?;
            let report = generate_report(&findings, OutputFormat::Sarif);
            write_output(&report, output.as_deref())?;
        }

        Commands::Fleet { dir, config, verbose } => {
            init_logging(verbose);
            let config = resolve_config(config.as_deref(), false)?;
            let findings = scanner::scan_directory(&dir, &config)?;
            let report = generate_report(&findings, OutputFormat::Json);
            println!("{}", report);

            if findings.blocks_release() {
                std::process::exit(1);
            }
        }

        Commands::Init { path, format } => {
            let mut dest = path.unwrap_or_else(config::default_config_path);
            match format.as_str() {
                "yaml" | "yml" => {}
                "toml" => {
                    dest.set_extension("toml");
                }
                other => anyhow::bail!("Unknown config format: {}", other),
            }
            config::write_default_config(&dest)?;
            eprintln!("Default config written to {}", dest.display());
        }
    }

    Ok(())
}

/// Load configuration, applying CLI overrides
fn resolve_config(path: Option<&Path>, strict: bool) -> anyhow::Result<Config> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_config_path);
    let mut config = config::load_config(&config_path)?;
    if strict {
        config.strict = true;
    }
    Ok(config)
}

/// Exit nonzero when findings should fail the invocation
fn exit_for(findings: &FindingSet, config: &Config) {
    if findings.has_errors() {
        std::process::exit(1);
    }
    if config.strict && !findings.warnings().is_empty() {
        std::process::exit(2);
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
