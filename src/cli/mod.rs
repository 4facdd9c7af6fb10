//! CLI module - Command line interface definitions and handlers

pub mod analyze;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::i18n::Locale;

/// ATS Checker - resume analysis from the terminal
///
/// Uploads a PDF or DOCX resume to an ATS analysis service and shows the
/// score, the detected and missing sections, and advice.
#[derive(Parser, Debug)]
#[command(name = "ats-checker")]
#[command(author = "Ryan Cashmoney <tunclon@proton.me>")]
#[command(version)]
#[command(about = "📄 Check a resume against ATS rules", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Analysis service base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Display language (overrides config)
    #[arg(long, value_enum, global = true)]
    pub locale: Option<Locale>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one resume and print the results
    Analyze(AnalyzeArgs),

    /// Launch the terminal UI (default)
    Tui(TuiArgs),

    /// Show or create the config file
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// Resume file (.pdf or .docx, at most 16 MiB)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Print the raw analysis result as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the score animation
    #[arg(long)]
    pub no_animation: bool,
}

#[derive(Debug, Clone, Parser, Default)]
pub struct TuiArgs {
    /// File to preselect
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct ConfigArgs {
    /// Write a default config file if none exists
    #[arg(long, conflicts_with = "path")]
    pub init: bool,

    /// Print the config file location
    #[arg(long)]
    pub path: bool,
}
