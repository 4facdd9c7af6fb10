//! Data model - section identifiers and the analysis result wire shape

use serde::{Deserialize, Deserializer, Serialize};

use crate::i18n::Locale;

/// Resume sections the analysis service knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Contact,
    Experience,
    Education,
    Skills,
}

impl SectionId {
    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::Contact,
            SectionId::Experience,
            SectionId::Education,
            SectionId::Skills,
        ]
    }

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Contact => "contact",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Skills => "skills",
        }
    }

    /// Look up a wire identifier. Matching is exact, as the service sends it.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.as_str() == raw)
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        let strings = locale.strings();
        match self {
            SectionId::Contact => strings.section_contact,
            SectionId::Experience => strings.section_experience,
            SectionId::Education => strings.section_education,
            SectionId::Skills => strings.section_skills,
        }
    }
}

/// Successful response body of `POST /analyze`
///
/// Section lists keep the raw identifiers so that anything the client
/// does not recognize still reaches the renderer. Found and missing are
/// not checked for overlap or coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    pub word_count: u64,
    pub found_sections: Vec<String>,
    pub missing_sections: Vec<String>,
    pub advice: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_phone: Option<bool>,
}

/// Error body of a non-success response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Accepts integral or fractional JSON numbers, rounds and clamps into 0..=100
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("score is not a finite number"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "score": 85,
        "word_count": 412,
        "found_sections": ["contact", "experience", "skills"],
        "missing_sections": ["education"],
        "advice": ["first", "second"],
        "has_email": true,
        "has_phone": false
    }"#;

    #[test]
    fn test_parse_service_response() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.score, 85);
        assert_eq!(result.word_count, 412);
        assert_eq!(result.found_sections.len(), 3);
        assert_eq!(result.missing_sections, vec!["education".to_string()]);
        assert_eq!(result.has_email, Some(true));
        assert_eq!(result.has_phone, Some(false));
    }

    #[test]
    fn test_optional_flags_and_unknown_fields() {
        let body = r#"{"score": 40, "word_count": 0, "found_sections": [],
            "missing_sections": ["contact"], "advice": [], "extra": 1}"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.has_email, None);
        assert_eq!(result.has_phone, None);
    }

    #[test]
    fn test_score_is_clamped_and_rounded() {
        let body = |score: &str| {
            format!(
                r#"{{"score": {}, "word_count": 1, "found_sections": [],
                "missing_sections": [], "advice": []}}"#,
                score
            )
        };
        let parse = |s: &str| serde_json::from_str::<AnalysisResult>(&body(s)).unwrap().score;
        assert_eq!(parse("150"), 100);
        assert_eq!(parse("-3"), 0);
        assert_eq!(parse("79.6"), 80);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let body = r#"{"score": 40, "word_count": 0, "found_sections": []}"#;
        assert!(serde_json::from_str::<AnalysisResult>(body).is_err());
    }

    #[test]
    fn test_section_id_parse() {
        for section in SectionId::all() {
            assert_eq!(SectionId::parse(section.as_str()), Some(*section));
        }
        assert_eq!(SectionId::parse("projects"), None);
        assert_eq!(SectionId::parse("Contact"), None);
    }
}
