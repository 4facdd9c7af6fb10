//! Localized string tables
//!
//! Every user-facing string lives here so the renderer, the TUI and the
//! one-shot CLI agree on wording. Arabic is the default locale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

/// Fixed string table for one locale
#[derive(Debug)]
pub struct Strings {
    pub section_contact: &'static str,
    pub section_experience: &'static str,
    pub section_education: &'static str,
    pub section_skills: &'static str,

    pub no_known_sections: &'static str,
    pub all_sections_present: &'static str,

    pub tier_excellent: &'static str,
    pub tier_good: &'static str,
    pub tier_needs_improvement: &'static str,

    pub choose_file: &'static str,

    pub err_no_file: &'static str,
    pub err_too_large: &'static str,
    pub err_unsupported_type: &'static str,
    pub err_generic: &'static str,
    pub err_prefix: &'static str,

    pub heading_score: &'static str,
    pub heading_word_count: &'static str,
    pub heading_found: &'static str,
    pub heading_missing: &'static str,
    pub heading_advice: &'static str,

    pub check_email: &'static str,
    pub check_phone: &'static str,

    pub analyzing: &'static str,
}

static AR: Strings = Strings {
    section_contact: "معلومات التواصل",
    section_experience: "الخبرات العملية",
    section_education: "التعليم",
    section_skills: "المهارات",

    no_known_sections: "لا توجد أقسام معروفة",
    all_sections_present: "جميع الأقسام موجودة! ✅",

    tier_excellent: "ممتاز! 🎉",
    tier_good: "جيد 👍",
    tier_needs_improvement: "يحتاج تحسين 📝",

    choose_file: "اختر ملف",

    err_no_file: "الرجاء اختيار ملف أولاً",
    err_too_large: "حجم الملف كبير جداً. الحد الأقصى 16 ميجابايت",
    err_unsupported_type: "صيغة الملف غير مدعومة. استخدم PDF أو DOCX",
    err_generic: "حدث خطأ في التحليل",
    err_prefix: "حدث خطأ",

    heading_score: "النتيجة",
    heading_word_count: "عدد الكلمات",
    heading_found: "الأقسام الموجودة",
    heading_missing: "الأقسام المفقودة",
    heading_advice: "نصائح للتحسين",

    check_email: "البريد الإلكتروني",
    check_phone: "رقم الهاتف",

    analyzing: "جاري التحليل...",
};

static EN: Strings = Strings {
    section_contact: "Contact information",
    section_experience: "Work experience",
    section_education: "Education",
    section_skills: "Skills",

    no_known_sections: "No known sections detected",
    all_sections_present: "All sections present! ✅",

    tier_excellent: "Excellent! 🎉",
    tier_good: "Good 👍",
    tier_needs_improvement: "Needs improvement 📝",

    choose_file: "Choose a file",

    err_no_file: "Please choose a file first",
    err_too_large: "File is too large. The maximum is 16 MB",
    err_unsupported_type: "Unsupported file type. Use PDF or DOCX",
    err_generic: "Analysis failed",
    err_prefix: "Error",

    heading_score: "Score",
    heading_word_count: "Word count",
    heading_found: "Sections found",
    heading_missing: "Sections missing",
    heading_advice: "Advice",

    check_email: "Email address",
    check_phone: "Phone number",

    analyzing: "Analyzing...",
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::Ar => &AR,
            Locale::En => &EN,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Ar),
            "en" | "english" => Ok(Locale::En),
            other => Err(format!("unknown locale '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_default_is_arabic() {
        assert_eq!(Locale::default(), Locale::Ar);
        assert_eq!(Locale::default().strings().choose_file, "اختر ملف");
    }
}
