//! Error types for selection, validation and submission

use std::path::PathBuf;

use thiserror::Error;

use crate::i18n::Locale;

/// Local checks run before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no file selected")]
    NoFile,

    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("unsupported file type '{extension}', expected pdf or docx")]
    UnsupportedType { extension: String },
}

impl ValidationError {
    pub fn user_message(&self, locale: Locale) -> String {
        let strings = locale.strings();
        match self {
            ValidationError::NoFile => strings.err_no_file,
            ValidationError::TooLarge { .. } => strings.err_too_large,
            ValidationError::UnsupportedType { .. } => strings.err_unsupported_type,
        }
        .to_string()
    }
}

/// Failures of the asynchronous exchange with the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("could not read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}{}", service_detail(.message))]
    Service { status: u16, message: Option<String> },

    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

impl SubmitError {
    /// Most specific message available: service text, transport description,
    /// or the generic fallback
    pub fn user_message(&self, locale: Locale) -> String {
        let strings = locale.strings();
        let detail = match self {
            SubmitError::Service {
                message: Some(message),
                ..
            } => message.clone(),
            SubmitError::Transport(description) => description.clone(),
            SubmitError::Read { .. } => self.to_string(),
            SubmitError::Service { message: None, .. } | SubmitError::MalformedBody(_) => {
                strings.err_generic.to_string()
            }
        };
        format!("{}: {}", strings.err_prefix, detail)
    }
}

fn service_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Choosing or dropping a file that cannot be recorded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("nothing to select")]
    Empty,

    #[error("cannot read {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },

    #[error("{} is not a regular file", .path.display())]
    NotAFile { path: PathBuf },
}
