use rust_decimal::Decimal;
use tax_core::{AgeBracket, EmploymentType, Regime};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops the rupee sign and digit-group commas, so
/// both `12,34,567` and `1,234,567` are accepted.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().trim_start_matches('₹').replace(',', "").trim().to_string()
}

/// Parses a string into a [`Decimal`].
///
/// Empty or whitespace-only input is treated as 0.
/// Returns an error and logs when the input is invalid (non-empty but not parseable).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Strict employment-type parser for command-line flags.
pub fn parse_employment_type(s: &str) -> Result<EmploymentType, String> {
    EmploymentType::parse(s).ok_or_else(|| {
        let known: Vec<&str> = EmploymentType::ALL.iter().map(|e| e.as_str()).collect();
        format!("unknown employment type '{s}' (expected one of: {})", known.join(", "))
    })
}

/// Age-bracket parser for command-line flags. Unknown codes fall back to
/// `below60`, matching how profiles are read.
pub fn parse_age_bracket(s: &str) -> Result<AgeBracket, String> {
    Ok(AgeBracket::from_code(s))
}

pub fn parse_regime(s: &str) -> Result<Regime, String> {
    Regime::parse(s).ok_or_else(|| format!("unknown regime '{s}' (expected old or new)"))
}
