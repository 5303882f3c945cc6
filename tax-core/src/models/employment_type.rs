use std::fmt;

use serde::{Deserialize, Serialize};

/// How the taxpayer earns their income.
///
/// Only [`EmploymentType::Salaried`] unlocks the Old Regime standard
/// deduction; the New Regime grants it to everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[default]
    Salaried,
    SelfEmployed,
    Business,
    Freelancer,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        Self::Salaried,
        Self::SelfEmployed,
        Self::Business,
        Self::Freelancer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salaried => "salaried",
            Self::SelfEmployed => "self-employed",
            Self::Business => "business",
            Self::Freelancer => "freelancer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "salaried" => Some(Self::Salaried),
            "self-employed" => Some(Self::SelfEmployed),
            "business" => Some(Self::Business),
            "freelancer" => Some(Self::Freelancer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salaried => "Salaried (Employed)",
            Self::SelfEmployed => "Self-Employed",
            Self::Business => "Business Owner",
            Self::Freelancer => "Freelancer",
        }
    }

    pub fn is_salaried(&self) -> bool {
        matches!(self, Self::Salaried)
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for employment in EmploymentType::ALL {
            assert_eq!(EmploymentType::parse(employment.as_str()), Some(employment));
        }
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(EmploymentType::parse("retired"), None);
        assert_eq!(EmploymentType::parse(""), None);
    }

    #[test]
    fn only_salaried_is_salaried() {
        assert!(EmploymentType::Salaried.is_salaried());
        assert!(!EmploymentType::SelfEmployed.is_salaried());
        assert!(!EmploymentType::Business.is_salaried());
        assert!(!EmploymentType::Freelancer.is_salaried());
    }

    #[test]
    fn serde_uses_kebab_case_codes() {
        let json = serde_json::to_string(&EmploymentType::SelfEmployed).unwrap();

        assert_eq!(json, "\"self-employed\"");
    }
}
