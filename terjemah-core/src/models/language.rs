//! Supported languages.
//!
//! Only Indonesian and Japanese are supported. Adapters receive the
//! human-readable name (for prompt-based providers) or the ISO 639-1 code
//! (for everything else).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Language
// ============================================================================

/// A language the translator can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Bahasa Indonesia.
    Indonesian,
    /// Japanese.
    Japanese,
}

impl Language {
    /// Returns the human-readable English name ("Indonesian", "Japanese").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Indonesian => "Indonesian",
            Self::Japanese => "Japanese",
        }
    }

    /// Returns the provider-facing language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Indonesian => "id",
            Self::Japanese => "ja",
        }
    }

    /// Returns the other supported language.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Indonesian => Self::Japanese,
            Self::Japanese => Self::Indonesian,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    /// Accepts the English name or the code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indonesian" | "id" => Ok(Self::Indonesian),
            "japanese" | "ja" => Ok(Self::Japanese),
            other => Err(CoreError::UnsupportedLanguage(other.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
