// src/languages.rs
// The language picker catalog.

/// One pickable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub emoji: &'static str,
    pub name: &'static str,
    /// Tag the word service keys its data by.
    pub tag: &'static str,
}

/// Every language the picker offers, in display order.
pub const LANGUAGES: [Language; 8] = [
    Language { emoji: "🇨🇳", name: "Mandarin", tag: "zh" },
    Language { emoji: "🇰🇷", name: "Korean", tag: "ko" },
    Language { emoji: "🇪🇸", name: "Spanish", tag: "es" },
    Language { emoji: "🇫🇷", name: "French", tag: "fr" },
    Language { emoji: "🇩🇪", name: "German", tag: "de" },
    Language { emoji: "🇯🇵", name: "Japanese", tag: "ja" },
    Language { emoji: "🇮🇹", name: "Italian", tag: "it" },
    Language { emoji: "🇵🇹", name: "Portuguese", tag: "pt" },
];

impl Language {
    /// Only Mandarin and Korean have word data behind them today; picking
    /// anything else gets the "coming soon" notice.
    pub fn is_supported(&self) -> bool {
        matches!(self.tag, "zh" | "ko")
    }
}

/// Looks a language up by display name, case-insensitively.
pub fn find(name: &str) -> Option<Language> {
    LANGUAGES
        .iter()
        .copied()
        .find(|language| language.name.eq_ignore_ascii_case(name))
}
