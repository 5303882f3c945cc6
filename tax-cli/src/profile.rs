//! TOML taxpayer profiles and regime rule overrides.
//!
//! A profile holds what a taxpayer would otherwise type on the command line.
//! Every key is optional:
//!
//! ```toml
//! annual_income = "15,00,000"
//! employment_type = "salaried"
//! age_bracket = "below60"
//!
//! [deductions]
//! section_80c = 150000
//! section_80d = 25000
//! home_loan_interest = 200000
//! ```
//!
//! `annual_income` may be a number or a string; strings go through
//! [`parse_decimal`](crate::utils::parse_decimal), so commas are allowed.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{AgeBracket, Deductions, EmploymentType, RegimeRules, RegimeRulesError};
use thiserror::Error;
use tracing::debug;

use crate::utils::{ParseDecimalError, parse_decimal};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("annual_income: {0}")]
    InvalidIncome(#[from] ParseDecimalError),

    #[error("unknown employment type '{0}'")]
    UnknownEmploymentType(String),

    #[error(transparent)]
    InvalidRules(#[from] RegimeRulesError),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
enum IncomeValue {
    Number(Decimal),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawProfile {
    annual_income: Option<IncomeValue>,
    employment_type: Option<String>,
    age_bracket: Option<String>,
    deductions: Deductions,
}

/// A validated profile.
///
/// `None` fields were absent from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub annual_income: Option<Decimal>,
    pub employment_type: Option<EmploymentType>,
    pub age_bracket: Option<AgeBracket>,
    pub deductions: Deductions,
}

impl Profile {
    pub fn from_toml_str(s: &str) -> Result<Self, ProfileError> {
        let raw: RawProfile = toml::from_str(s)?;

        let annual_income = match raw.annual_income {
            Some(IncomeValue::Number(n)) => Some(n),
            Some(IncomeValue::Text(text)) => Some(parse_decimal(&text)?),
            None => None,
        };
        let employment_type = raw
            .employment_type
            .map(|code| EmploymentType::parse(&code).ok_or(ProfileError::UnknownEmploymentType(code)))
            .transpose()?;
        let age_bracket = raw.age_bracket.as_deref().map(AgeBracket::from_code);

        Ok(Self {
            annual_income,
            employment_type,
            age_bracket,
            deductions: raw.deductions,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let contents = read(path)?;
        let profile = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "profile loaded");
        Ok(profile)
    }
}

/// Parses regime rule overrides and validates the merged result.
///
/// Keys that are left out keep their built-in values.
pub fn rules_from_toml_str(s: &str) -> Result<RegimeRules, ProfileError> {
    let rules: RegimeRules = toml::from_str(s)?;
    rules.validate()?;
    Ok(rules)
}

pub fn load_rules(path: &Path) -> Result<RegimeRules, ProfileError> {
    let contents = read(path)?;
    let rules = rules_from_toml_str(&contents)?;
    debug!(path = %path.display(), "regime rules loaded");
    Ok(rules)
}

fn read(path: &Path) -> Result<String, ProfileError> {
    fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })
}
