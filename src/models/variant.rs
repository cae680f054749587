//! Preparation variant hint

use serde::{Deserialize, Deserializer, Serialize};

/// Preparation state used to disambiguate dataset keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Auto,
    Cooked,
    Raw,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Auto => "auto",
            Variant::Cooked => "cooked",
            Variant::Raw => "raw",
        }
    }

    /// Parse a variant, treating anything unrecognized as `Auto`
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "cooked" => Variant::Cooked,
            "raw" => Variant::Raw,
            _ => Variant::Auto,
        }
    }

    /// Whether the lookup should probe `(cooked)` / `(raw)` keys
    pub fn is_specific(&self) -> bool {
        !matches!(self, Variant::Auto)
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Variant::from_str).unwrap_or_default())
    }
}
