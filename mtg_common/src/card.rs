//! Card reference records and identity keys

use crate::de::{letters, nullable_string};
use serde::{Deserialize, Serialize};

/// Separator joining the faces of a multi-face card in set codes, collector
/// numbers and names (e.g. `"12 // 12b"`)
pub const FACE_SEPARATOR: &str = " // ";

/// One printing of a card as stored in the reference file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "lang", default, deserialize_with = "nullable_string")]
    pub language: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub release_date: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub type_line: String,
    #[serde(default, deserialize_with = "letters")]
    pub color_identity: Vec<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub set_name: String,
    #[serde(rename = "set", default, deserialize_with = "nullable_string")]
    pub set_code: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub collector_number: String,
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
}

impl CardRecord {
    /// Identity key of this printing
    pub fn key(&self) -> CardKey {
        CardKey::new(&self.language, &self.set_code, &self.collector_number)
    }

    /// Color identity as stored in collection rows (`"W,U"`)
    pub fn color_identity_joined(&self) -> String {
        self.color_identity.join(",")
    }
}

/// Identity triple of a physical printing: (language, set code, collector number)
///
/// Compared exactly; callers normalize case and whitespace before building keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    pub language: String,
    pub set_code: String,
    pub collector_number: String,
}

impl CardKey {
    pub fn new(language: &str, set_code: &str, collector_number: &str) -> Self {
        Self {
            language: language.to_string(),
            set_code: set_code.to_string(),
            collector_number: collector_number.to_string(),
        }
    }

    /// True when all three components are filled in
    pub fn is_complete(&self) -> bool {
        !self.language.is_empty() && !self.set_code.is_empty() && !self.collector_number.is_empty()
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.language, self.set_code, self.collector_number
        )
    }
}

/// Card languages known to Scryfall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Japanese,
    Korean,
    Russian,
    SimplifiedChinese,
    TraditionalChinese,
    Phyrexian,
}

impl Language {
    /// Returns the full name of the language (e.g., "English", "German")
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Russian => "Russian",
            Language::SimplifiedChinese => "Chinese Simplified",
            Language::TraditionalChinese => "Chinese Traditional",
            Language::Phyrexian => "Phyrexian",
        }
    }

    /// Returns the Scryfall language code (e.g., "en", "zhs")
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Russian => "ru",
            Language::SimplifiedChinese => "zhs",
            Language::TraditionalChinese => "zht",
            Language::Phyrexian => "ph",
        }
    }

    /// Parse a language code (exact, lowercase) into a Language
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|lang| lang.code() == code)
    }

    /// Parse a full language name as used by MTGJSON (e.g., "Portuguese (Brazil)")
    pub fn from_full_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "english" => Some(Language::English),
            "spanish" => Some(Language::Spanish),
            "french" => Some(Language::French),
            "german" => Some(Language::German),
            "italian" => Some(Language::Italian),
            "portuguese" | "portuguese (brazil)" => Some(Language::Portuguese),
            "japanese" => Some(Language::Japanese),
            "korean" => Some(Language::Korean),
            "russian" => Some(Language::Russian),
            "chinese simplified" | "simplified chinese" => Some(Language::SimplifiedChinese),
            "chinese traditional" | "traditional chinese" => Some(Language::TraditionalChinese),
            "phyrexian" => Some(Language::Phyrexian),
            _ => None,
        }
    }

    /// Parse either a language code or full name into a Language
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_code(s).or_else(|| Self::from_full_name(s))
    }

    /// Returns all supported languages
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Spanish,
            Language::French,
            Language::German,
            Language::Italian,
            Language::Portuguese,
            Language::Japanese,
            Language::Korean,
            Language::Russian,
            Language::SimplifiedChinese,
            Language::TraditionalChinese,
            Language::Phyrexian,
        ]
    }
}
