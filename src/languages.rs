//! Supported answer languages
//!
//! A static catalogue shared by the server (request validation, `/languages`)
//! and the terminal client (language picker). Unknown inputs never fail; they
//! resolve to English.

use serde::Serialize;
use serde_json::{Map, Value};

/// Code used when a request names no known language
pub const DEFAULT_LANGUAGE: &str = "en";

/// One selectable answer language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Translation target code (ISO 639-1, `zh-CN` for Simplified Chinese)
    pub code: &'static str,
    /// English name
    pub name: &'static str,
    /// Name in the language itself
    pub native_name: &'static str,
    /// Display glyph
    pub flag: &'static str,
}

impl Language {
    /// `"🇮🇳 Hindi"` style label
    pub fn label(&self) -> String {
        format!("{} {}", self.flag, self.name)
    }

    pub fn is_default(&self) -> bool {
        self.code == DEFAULT_LANGUAGE
    }
}

const fn lang(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    flag: &'static str,
) -> Language {
    Language {
        code,
        name,
        native_name,
        flag,
    }
}

/// Every supported language, English first
pub const LANGUAGES: &[Language] = &[
    lang("en", "English", "English", "🇺🇸"),
    lang("hi", "Hindi", "हिन्दी", "🇮🇳"),
    lang("te", "Telugu", "తెలుగు", "🇮🇳"),
    lang("kn", "Kannada", "ಕನ್ನಡ", "🇮🇳"),
    lang("ta", "Tamil", "தமிழ்", "🇮🇳"),
    lang("ml", "Malayalam", "മലയാളം", "🇮🇳"),
    lang("es", "Spanish", "Español", "🇪🇸"),
    lang("fr", "French", "Français", "🇫🇷"),
    lang("de", "German", "Deutsch", "🇩🇪"),
    lang("zh-CN", "Chinese (Simplified)", "中文", "🇨🇳"),
    lang("ar", "Arabic", "العربية", "🇸🇦"),
    lang("ru", "Russian", "Русский", "🇷🇺"),
    lang("ja", "Japanese", "日本語", "🇯🇵"),
    lang("pt", "Portuguese", "Português", "🇵🇹"),
    lang("it", "Italian", "Italiano", "🇮🇹"),
    lang("nl", "Dutch", "Nederlands", "🇳🇱"),
    lang("ko", "Korean", "한국어", "🇰🇷"),
    lang("tr", "Turkish", "Türkçe", "🇹🇷"),
    lang("pl", "Polish", "Polski", "🇵🇱"),
];

/// Alternate spellings accepted for catalogue entries
const ALIASES: &[(&str, &str)] = &[("zh", "zh-CN"), ("Chinese", "zh-CN")];

/// Look up a language by exact code
pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// The English entry
pub fn default_language() -> &'static Language {
    &LANGUAGES[0]
}

/// Resolve a language name or code to a catalogue entry.
///
/// Names map to their code, codes map to themselves, a few aliases are
/// accepted, and anything else falls back to English. Matching ignores
/// ASCII case.
pub fn resolve(input: &str) -> &'static Language {
    let input = input.trim();
    LANGUAGES
        .iter()
        .find(|l| l.name == input || l.code == input)
        .or_else(|| {
            LANGUAGES
                .iter()
                .find(|l| l.name.eq_ignore_ascii_case(input) || l.code.eq_ignore_ascii_case(input))
        })
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(input))
                .and_then(|(_, code)| find(code))
        })
        .unwrap_or_else(default_language)
}

/// Name → code JSON object served by `GET /languages`
pub fn name_to_code_map(languages: &[Language]) -> Map<String, Value> {
    languages
        .iter()
        .map(|l| (l.name.to_string(), Value::String(l.code.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_has_unique_codes_and_names() {
        let codes: HashSet<_> = LANGUAGES.iter().map(|l| l.code).collect();
        let names: HashSet<_> = LANGUAGES.iter().map(|l| l.name).collect();
        assert_eq!(codes.len(), LANGUAGES.len());
        assert_eq!(names.len(), LANGUAGES.len());
        assert_eq!(LANGUAGES.len(), 19);
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(default_language().code, "en");
        assert!(default_language().is_default());
    }

    #[test]
    fn test_resolve_code() {
        assert_eq!(resolve("te").code, "te");
        assert_eq!(resolve("zh-CN").code, "zh-CN");
    }

    #[test]
    fn test_resolve_name() {
        assert_eq!(resolve("Hindi").code, "hi");
        assert_eq!(resolve("Chinese (Simplified)").code, "zh-CN");
    }

    #[test]
    fn test_resolve_client_alias() {
        assert_eq!(resolve("zh").code, "zh-CN");
        assert_eq!(resolve("Chinese").code, "zh-CN");
    }

    #[test]
    fn test_resolve_alias_ignores_case() {
        assert_eq!(resolve("ZH").code, "zh-CN");
        assert_eq!(resolve("chinese").code, "zh-CN");
        assert_eq!(resolve("zh-cn").code, "zh-CN");
        assert_eq!(resolve(" CHINESE ").code, "zh-CN");
    }

    #[test]
    fn test_resolve_case_insensitive_fallback() {
        assert_eq!(resolve("kannada").code, "kn");
        assert_eq!(resolve("FR").code, "fr");
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_english() {
        assert_eq!(resolve("Klingon").code, "en");
        assert_eq!(resolve("").code, "en");
        assert_eq!(resolve("xx").code, "en");
    }

    #[test]
    fn test_name_to_code_map() {
        let map = name_to_code_map(LANGUAGES);
        assert_eq!(map.len(), LANGUAGES.len());
        assert_eq!(map.get("Tamil"), Some(&Value::String("ta".to_string())));
    }

    #[test]
    fn test_label() {
        assert_eq!(find("es").unwrap().label(), "🇪🇸 Spanish");
    }
}
