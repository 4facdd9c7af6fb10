//! ATS Checker - check a resume against ATS rules from the terminal
//!
//! Uploads a PDF or DOCX resume to the analysis service and shows the
//! score, detected and missing sections, and advice.

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ats_checker::cli::{analyze, Cli, Commands, TuiArgs};
use ats_checker::config::{self, Config};
use ats_checker::service::HttpAnalysisService;
use ats_checker::spinner;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = Config::load();
    let config = loaded
        .as_ref()
        .cloned()
        .unwrap_or_default()
        .with_overrides(cli.base_url.as_deref(), cli.locale);

    // The TUI owns the screen, so its logs go to a file
    let in_tui = matches!(cli.command, None | Some(Commands::Tui(_)));
    let configured = config.general.level_filter();
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        configured.unwrap_or(LevelFilter::INFO)
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(!in_tui)
                .with_writer(log_writer(in_tui))
                .compact(),
        )
        .with(EnvFilter::from_default_env().add_directive(format!("ats_checker={}", level).parse()?))
        .init();

    if let Err(e) = loaded {
        tracing::warn!("{:#}; using defaults", e);
    }
    if configured.is_none() {
        tracing::warn!(
            "unknown log_level '{}' in config; using info",
            config.general.log_level
        );
    }
    tracing::debug!("service base URL: {}", config.service.base_url);

    match cli.command {
        Some(Commands::Analyze(args)) => {
            if !analyze::run_analyze(&args, &config).await? {
                std::process::exit(1);
            }
        }
        Some(Commands::Config(args)) => {
            if args.path {
                println!("{}", Config::default_path().display());
            } else if args.init {
                let path = Config::ensure_exists()?;
                spinner::print_info(&format!("Config file: {}", path.display()));
            } else {
                print!("{}", config::generate_sample_config());
            }
        }
        Some(Commands::Tui(args)) => run_tui(args, &config).await?,
        None => run_tui(TuiArgs::default(), &config).await?,
    }

    Ok(())
}

async fn run_tui(args: TuiArgs, config: &Config) -> Result<()> {
    let service = Arc::new(HttpAnalysisService::new(&config.service.base_url)?);
    ats_checker::tui::run_tui(args, config, service).await
}

/// Stderr for commands; an append-only log file for the TUI
fn log_writer(in_tui: bool) -> BoxMakeWriter {
    if !in_tui {
        return BoxMakeWriter::new(std::io::stderr);
    }
    let path = Config::log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(std::io::sink),
    }
}
