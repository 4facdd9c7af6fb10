//! Analysis service client
//!
//! `POST {base_url}/analyze` with a multipart form holding one field,
//! `resume`. The service is a black box; this module only knows the
//! response shapes.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::error::SubmitError;
use crate::model::{AnalysisResult, ErrorBody};
use crate::selector::SelectedFile;

/// Multipart field carrying the document
pub const UPLOAD_FIELD: &str = "resume";

/// Anything that can turn a document into an analysis result
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, SubmitError>;
}

/// Analysis endpoint for a base URL, tolerating a trailing slash
pub fn analyze_endpoint(base_url: &str) -> String {
    format!("{}/analyze", base_url.trim_end_matches('/'))
}

/// Classify a finished HTTP exchange
pub fn interpret_response(status: u16, body: &[u8]) -> Result<AnalysisResult, SubmitError> {
    if (200..300).contains(&status) {
        return serde_json::from_slice::<AnalysisResult>(body)
            .map_err(|e| SubmitError::MalformedBody(e.to_string()));
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());
    Err(SubmitError::Service { status, message })
}

/// reqwest-backed service
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisService {
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ats-checker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: analyze_endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, SubmitError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| SubmitError::Read {
                path: file.path.clone(),
                message: e.to_string(),
            })?;

        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type())
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!("POST {} ({} bytes)", self.endpoint, file.size_bytes);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        debug!("response {} ({} bytes)", status, body.len());

        let outcome = interpret_response(status.as_u16(), &body);
        if let Err(ref e) = outcome {
            warn!("analysis failed: {}", e);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        assert_eq!(
            analyze_endpoint("https://example.com"),
            "https://example.com/analyze"
        );
        assert_eq!(
            analyze_endpoint("http://localhost:5000/"),
            "http://localhost:5000/analyze"
        );
    }

    #[test]
    fn test_success_body() {
        let body = br#"{"score": 72, "word_count": 500, "found_sections": ["skills"],
            "missing_sections": [], "advice": ["a"]}"#;
        let result = interpret_response(200, body).unwrap();
        assert_eq!(result.score, 72);
    }

    #[test]
    fn test_success_with_bad_body() {
        assert!(matches!(
            interpret_response(200, b"<html>oops</html>"),
            Err(SubmitError::MalformedBody(_))
        ));
        assert!(matches!(
            interpret_response(200, br#"{"score": 1}"#),
            Err(SubmitError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_error_body() {
        let err = interpret_response(400, br#"{"error": "unsupported"}"#).unwrap_err();
        assert_eq!(
            err,
            SubmitError::Service {
                status: 400,
                message: Some("unsupported".into())
            }
        );
    }

    #[test]
    fn test_error_without_message() {
        let bodies: [&[u8]; 3] = [
            b"Internal Server Error",
            br#"{"detail": "x"}"#,
            br#"{"error": "  "}"#,
        ];
        for body in bodies {
            assert_eq!(
                interpret_response(500, body).unwrap_err(),
                SubmitError::Service {
                    status: 500,
                    message: None
                }
            );
        }
    }
}
