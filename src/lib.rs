//! ATS Checker Library
//!
//! Terminal client for a resume ATS analysis service: choose or drop a
//! PDF/DOCX resume, validate it locally, upload it, and present the score,
//! detected sections and advice.
//!
//! # Features
//!
//! - **Local validation**: size and type checks before any network traffic
//! - **Single request in flight**: the controller refuses new submissions while busy
//! - **Localized output**: Arabic (default) and English labels
//! - **Animated score**: counter and ring driven by a testable tick function
//!
//! # Example
//!
//! ```no_run
//! use ats_checker::{HttpAnalysisService, SelectedFile, UploadController};
//! use ats_checker::animator::AnimationTiming;
//! use ats_checker::i18n::Locale;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = HttpAnalysisService::new("http://localhost:5000")?;
//!     let mut controller = UploadController::new(Locale::En, AnimationTiming::default());
//!
//!     controller.select_file(SelectedFile::from_path(Path::new("resume.pdf"))?);
//!     controller.submit(&service).await;
//!
//!     if let Some(view) = controller.view() {
//!         println!("Score: {}", view.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod animator;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod i18n;
pub mod model;
pub mod render;
pub mod selector;
pub mod service;
pub mod spinner;
pub mod tui;

// Re-export commonly used types
pub use animator::{AnimationTiming, ScoreAnimator};
pub use config::Config;
pub use controller::{Effect, Msg, SessionState, UploadController};
pub use error::{SelectError, SubmitError, ValidationError};
pub use i18n::Locale;
pub use model::{AnalysisResult, SectionId};
pub use render::{render, RenderedResults, ScoreTier};
pub use selector::{parse_dropped, parse_typed, validate, FileSelector, SelectedFile};
pub use service::{AnalysisService, HttpAnalysisService};
pub use spinner::{BusySpinner, StatusIcons};
