//! Results rendering - pure mapping from an analysis result to a view
//!
//! The output carries text and semantic kinds only. The TUI and the
//! one-shot CLI decide how each kind is styled.

use crate::i18n::Locale;
use crate::model::{AnalysisResult, SectionId};

/// Quality band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    /// 80 - 100
    Excellent,
    /// 60 - 79
    Good,
    /// 0 - 59
    NeedsImprovement,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreTier::Excellent,
            60..=79 => ScoreTier::Good,
            _ => ScoreTier::NeedsImprovement,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        let strings = locale.strings();
        match self {
            ScoreTier::Excellent => strings.tier_excellent,
            ScoreTier::Good => strings.tier_good,
            ScoreTier::NeedsImprovement => strings.tier_needs_improvement,
        }
    }

    /// Colour token for the ring and the status text
    pub fn color_token(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "#10b981",
            ScoreTier::Good => "#f59e0b",
            ScoreTier::NeedsImprovement => "#ef4444",
        }
    }

    /// Short machine name
    pub fn key(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::NeedsImprovement => "poor",
        }
    }
}

/// Parse a `#rrggbb` token into components
pub fn parse_color_token(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// What a list row represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Section(SectionId),
    /// Identifier the client has no label for; shown verbatim
    Unrecognized,
    /// Placeholder for an empty found list
    NoKnownSections,
    /// Placeholder for an empty missing list, styled as a success
    AllSectionsPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub text: String,
    pub kind: EntryKind,
}

impl ListEntry {
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self.kind,
            EntryKind::NoKnownSections | EntryKind::AllSectionsPresent
        )
    }
}

/// Presence check for a contact detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCheck {
    pub label: &'static str,
    pub present: bool,
}

/// Everything the results region shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResults {
    pub score: u8,
    pub tier: ScoreTier,
    pub word_count: u64,
    pub found_count: usize,
    pub missing_count: usize,
    pub found: Vec<ListEntry>,
    pub missing: Vec<ListEntry>,
    pub advice: Vec<String>,
    pub contact: Vec<ContactCheck>,
}

/// Localized label for a section identifier, or the identifier itself
pub fn section_label(raw: &str, locale: Locale) -> String {
    SectionId::parse(raw)
        .map(|s| s.label(locale).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn section_entry(raw: &str, locale: Locale) -> ListEntry {
    match SectionId::parse(raw) {
        Some(section) => ListEntry {
            text: section.label(locale).to_string(),
            kind: EntryKind::Section(section),
        },
        None => {
            tracing::debug!("unrecognized section identifier '{}'", raw);
            ListEntry {
                text: raw.to_string(),
                kind: EntryKind::Unrecognized,
            }
        }
    }
}

fn section_list(raw: &[String], locale: Locale, empty: ListEntry) -> Vec<ListEntry> {
    if raw.is_empty() {
        return vec![empty];
    }
    raw.iter().map(|s| section_entry(s, locale)).collect()
}

/// Map a result to its view. Same input, same output.
pub fn render(result: &AnalysisResult, locale: Locale) -> RenderedResults {
    let strings = locale.strings();

    let found = section_list(
        &result.found_sections,
        locale,
        ListEntry {
            text: strings.no_known_sections.to_string(),
            kind: EntryKind::NoKnownSections,
        },
    );
    let missing = section_list(
        &result.missing_sections,
        locale,
        ListEntry {
            text: strings.all_sections_present.to_string(),
            kind: EntryKind::AllSectionsPresent,
        },
    );

    let contact = [
        (strings.check_email, result.has_email),
        (strings.check_phone, result.has_phone),
    ]
    .into_iter()
    .filter_map(|(label, present)| present.map(|present| ContactCheck { label, present }))
    .collect();

    RenderedResults {
        score: result.score,
        tier: ScoreTier::from_score(result.score),
        word_count: result.word_count,
        found_count: result.found_sections.len(),
        missing_count: result.missing_sections.len(),
        found,
        missing,
        advice: result.advice.clone(),
        contact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u8, found: &[&str], missing: &[&str], advice: &[&str]) -> AnalysisResult {
        AnalysisResult {
            score,
            word_count: 320,
            found_sections: found.iter().map(|s| s.to_string()).collect(),
            missing_sections: missing.iter().map(|s| s.to_string()).collect(),
            advice: advice.iter().map(|s| s.to_string()).collect(),
            has_email: None,
            has_phone: None,
        }
    }

    #[test]
    fn test_tier_scenarios() {
        assert_eq!(ScoreTier::from_score(85), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(70), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(40), ScoreTier::NeedsImprovement);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::from_score(100), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(80), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(79), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(60), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(59), ScoreTier::NeedsImprovement);
        assert_eq!(ScoreTier::from_score(0), ScoreTier::NeedsImprovement);
    }

    #[test]
    fn test_tier_colors_are_distinct() {
        let tokens: Vec<_> = [
            ScoreTier::Excellent,
            ScoreTier::Good,
            ScoreTier::NeedsImprovement,
        ]
        .iter()
        .map(|t| t.color_token())
        .collect();
        assert_eq!(tokens, vec!["#10b981", "#f59e0b", "#ef4444"]);
        assert_eq!(parse_color_token("#10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(parse_color_token("10b981"), None);
    }

    #[test]
    fn test_empty_missing_renders_only_placeholder() {
        let view = render(
            &result(100, &["contact", "experience", "education", "skills"], &[], &[]),
            Locale::En,
        );
        assert_eq!(view.missing.len(), 1);
        assert_eq!(view.missing[0].kind, EntryKind::AllSectionsPresent);
        assert_eq!(view.missing[0].text, "All sections present! ✅");
        assert_eq!(view.missing_count, 0);
        assert_eq!(view.found_count, 4);
    }

    #[test]
    fn test_empty_found_renders_only_placeholder() {
        let view = render(&result(10, &[], &["contact"], &[]), Locale::Ar);
        assert_eq!(view.found.len(), 1);
        assert_eq!(view.found[0].kind, EntryKind::NoKnownSections);
        assert_eq!(view.found[0].text, "لا توجد أقسام معروفة");
        assert!(view.found[0].is_placeholder());
        assert_eq!(view.found_count, 0);
    }

    #[test]
    fn test_labels_round_trip() {
        let expected = [
            (SectionId::Contact, "معلومات التواصل"),
            (SectionId::Experience, "الخبرات العملية"),
            (SectionId::Education, "التعليم"),
            (SectionId::Skills, "المهارات"),
        ];
        for (section, label) in expected {
            assert_eq!(section_label(section.as_str(), Locale::Ar), label);
        }
        assert_eq!(section_label("projects", Locale::Ar), "projects");
    }

    #[test]
    fn test_unknown_section_rendered_verbatim() {
        let view = render(&result(70, &["contact", "Publications"], &[], &[]), Locale::En);
        assert_eq!(view.found[0].text, "Contact information");
        assert_eq!(view.found[1].text, "Publications");
        assert_eq!(view.found[1].kind, EntryKind::Unrecognized);
    }

    #[test]
    fn test_overlapping_sections_are_not_corrected() {
        let view = render(&result(50, &["skills"], &["skills"], &[]), Locale::En);
        assert_eq!(view.found[0].text, view.missing[0].text);
    }

    #[test]
    fn test_advice_order_and_duplicates_preserved() {
        let view = render(&result(50, &[], &[], &["b", "a", "b"]), Locale::En);
        assert_eq!(view.advice, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_contact_checks() {
        let mut input = result(50, &[], &[], &[]);
        assert!(render(&input, Locale::En).contact.is_empty());

        input.has_email = Some(true);
        input.has_phone = Some(false);
        let view = render(&input, Locale::En);
        assert_eq!(
            view.contact,
            vec![
                ContactCheck {
                    label: "Email address",
                    present: true
                },
                ContactCheck {
                    label: "Phone number",
                    present: false
                },
            ]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let input = result(66, &["contact"], &["skills"], &["x"]);
        assert_eq!(render(&input, Locale::En), render(&input, Locale::En));
    }
}
