//! File selection - picker and drag-and-drop input, local validation
//!
//! Both input paths record a [`SelectedFile`] the same way. Nothing is
//! rejected at selection time; [`validate`] runs when the user submits.

use std::path::{Path, PathBuf};

use crate::error::{SelectError, ValidationError};
use crate::i18n::Locale;

/// Hard upload limit (16 MiB); anything strictly larger is rejected
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Accepted extensions, compared lowercased
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// How the current file arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Picker,
    Drop,
}

/// A file chosen for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    /// Lowercased text after the last '.', empty when there is none
    pub extension: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let extension = extension_of(&name);
        Self {
            name,
            size_bytes,
            extension,
            path,
        }
    }

    /// Stat a path on disk
    pub fn from_path(path: &Path) -> Result<Self, SelectError> {
        let meta = std::fs::metadata(path).map_err(|e| SelectError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if !meta.is_file() {
            return Err(SelectError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::new(path, meta.len()))
    }

    pub fn human_size(&self) -> String {
        humansize::format_size(self.size_bytes, humansize::BINARY)
    }

    /// MIME type sent with the multipart field
    pub fn mime_type(&self) -> String {
        mime_guess::from_ext(&self.extension)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// Lowercased extension of a file name
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Local checks, in order: presence, size, extension
pub fn validate(file: Option<&SelectedFile>) -> Result<&SelectedFile, ValidationError> {
    let file = file.ok_or(ValidationError::NoFile)?;

    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size: file.size_bytes,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    if !ALLOWED_EXTENSIONS.contains(&file.extension.as_str()) {
        return Err(ValidationError::UnsupportedType {
            extension: file.extension.clone(),
        });
    }

    Ok(file)
}

/// Holds the currently chosen file
#[derive(Debug, Default)]
pub struct FileSelector {
    current: Option<SelectedFile>,
    source: Option<SelectionSource>,
}

impl FileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file chosen through the picker
    pub fn select(&mut self, file: SelectedFile) {
        self.record(file, SelectionSource::Picker);
    }

    /// Record a dropped file; same effect as [`FileSelector::select`]
    pub fn drop_file(&mut self, file: SelectedFile) {
        self.record(file, SelectionSource::Drop);
    }

    fn record(&mut self, file: SelectedFile, source: SelectionSource) {
        tracing::debug!(
            "selected {} ({} bytes) via {:?}",
            file.name,
            file.size_bytes,
            source
        );
        self.current = Some(file);
        self.source = Some(source);
    }

    pub fn current(&self) -> Option<&SelectedFile> {
        self.current.as_ref()
    }

    pub fn source(&self) -> Option<SelectionSource> {
        self.source
    }

    pub fn validate(&self) -> Result<&SelectedFile, ValidationError> {
        validate(self.current.as_ref())
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.source = None;
    }

    /// File name, or the "choose a file" placeholder
    pub fn label(&self, locale: Locale) -> &str {
        self.current
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or(locale.strings().choose_file)
    }
}

/// Turn text a terminal pasted for a drag-and-drop into a path
///
/// Handles quoting, `file://` URIs with percent escapes, and
/// backslash-escaped spaces. Only the first dropped path is used.
pub fn parse_dropped(text: &str) -> Option<PathBuf> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let token = first_token(line);
    if token.is_empty() {
        return None;
    }

    let path = match token.strip_prefix("file://") {
        Some(rest) => {
            // file://host/path: only the local host form is meaningful
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            percent_decode(rest)
        }
        None => token,
    };

    Some(PathBuf::from(path))
}

/// Turn a path typed into the picker into a path
///
/// The whole line is the path: only surrounding whitespace and one pair of
/// matching quotes are removed, so names with spaces stay intact.
pub fn parse_typed(text: &str) -> Option<PathBuf> {
    let line = text.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|&q| line.strip_prefix(q).and_then(|rest| rest.strip_suffix(q)))
        .unwrap_or(line)
        .trim();
    if unquoted.is_empty() {
        return None;
    }
    Some(PathBuf::from(unquoted))
}

/// First whitespace-separated token, honouring quotes and `\ ` escapes
fn first_token(line: &str) -> String {
    let mut chars = line.chars().peekable();

    if let Some(&quote) = chars.peek() {
        if quote == '\'' || quote == '"' {
            chars.next();
            return chars.take_while(|&c| c != quote).collect();
        }
    }

    let mut token = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&next) if matches!(next, ' ' | '\'' | '"' | '(' | ')' | '&') => {
                    token.push(next);
                    chars.next();
                }
                _ => token.push('\\'),
            },
            c if c.is_whitespace() => break,
            c => token.push(c),
        }
    }
    token
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(value) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
