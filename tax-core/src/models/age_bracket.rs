use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Taxpayer age group.
///
/// Each bracket maps to a representative age (30, 65, 85) that the Old
/// Regime compares against its senior and very-senior age limits.
///
/// Unrecognised codes fall back to [`AgeBracket::BelowSixty`] rather than
/// failing, both in [`AgeBracket::from_code`] and when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgeBracket {
    #[default]
    BelowSixty,
    SixtyToEighty,
    AboveEighty,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [Self::BelowSixty, Self::SixtyToEighty, Self::AboveEighty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowSixty => "below60",
            Self::SixtyToEighty => "60to80",
            Self::AboveEighty => "above80",
        }
    }

    /// Parses a bracket code, returning `None` for anything unrecognised.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "below60" => Some(Self::BelowSixty),
            "60to80" => Some(Self::SixtyToEighty),
            "above80" => Some(Self::AboveEighty),
            _ => None,
        }
    }

    /// Parses a bracket code, falling back to [`AgeBracket::BelowSixty`].
    pub fn from_code(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            warn!(code = %s, "unrecognised age bracket; defaulting to below60");
            Self::default()
        })
    }

    pub fn representative_age(&self) -> u32 {
        match self {
            Self::BelowSixty => 30,
            Self::SixtyToEighty => 65,
            Self::AboveEighty => 85,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowSixty => "Below 60 years",
            Self::SixtyToEighty => "60-80 years (Senior Citizen)",
            Self::AboveEighty => "Above 80 years (Very Senior)",
        }
    }
}

impl From<String> for AgeBracket {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<AgeBracket> for String {
    fn from(bracket: AgeBracket) -> Self {
        bracket.as_str().to_string()
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
