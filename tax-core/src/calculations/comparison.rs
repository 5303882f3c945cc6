//! Side-by-side comparison of the two regimes.
//!
//! [`estimate`] is the entry point most callers want: it checks the income,
//! runs both calculators and picks the cheaper regime.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{Regime, TaxInput, estimate};
//!
//! let input = TaxInput {
//!     annual_income: dec!(1500000),
//!     ..Default::default()
//! };
//!
//! let result = estimate(&input).unwrap();
//!
//! assert_eq!(result.recommended_regime, Regime::New);
//! assert_eq!(result.savings, dec!(111800));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use super::regimes::{NewRegimeCalculator, OldRegimeCalculator};
use super::rules::{RegimeRules, RegimeRulesError};
use crate::{ComparisonResult, Regime, RegimeResult, TaxInput};

/// Errors returned by [`estimate`] and [`estimate_with_rules`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("Please enter a valid annual income (got {0})")]
    NonPositiveIncome(Decimal),

    #[error("invalid regime rules: {0}")]
    InvalidRules(#[from] RegimeRulesError),
}

/// Compares two regime breakdowns.
///
/// The New Regime is recommended whenever it costs no more than the Old
/// Regime, so a tie recommends [`Regime::New`] with zero savings.
///
/// # Arguments
///
/// * `old` - Old Regime breakdown
/// * `new` - New Regime breakdown for the same input
///
/// # Returns
///
/// Both breakdowns with `savings = old.total_tax - new.total_tax`. A
/// negative saving means the Old Regime is cheaper.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{Regime, RegimeResult, compare};
///
/// let old = RegimeResult::from_lines(dec!(600000), dec!(50000), dec!(550000), dec!(22500), dec!(900));
/// let new = RegimeResult::from_lines(dec!(600000), dec!(50000), dec!(550000), dec!(12500), dec!(500));
///
/// let result = compare(old, new);
///
/// assert_eq!(result.recommended_regime, Regime::New);
/// assert_eq!(result.savings, dec!(10400));
/// ```
pub fn compare(
    old: RegimeResult,
    new: RegimeResult,
) -> ComparisonResult {
    let savings = old.total_tax - new.total_tax;
    let recommended_regime = if new.total_tax <= old.total_tax {
        Regime::New
    } else {
        Regime::Old
    };

    debug!(
        old_total = %old.total_tax,
        new_total = %new.total_tax,
        savings = %savings,
        recommended = recommended_regime.as_str(),
        "regimes compared"
    );

    ComparisonResult {
        old_regime: old,
        new_regime: new,
        savings,
        recommended_regime,
    }
}

/// Estimates both regimes with the default rules.
pub fn estimate(input: &TaxInput) -> Result<ComparisonResult, EstimateError> {
    estimate_with_rules(input, &RegimeRules::default())
}

/// Estimates both regimes with caller-supplied rules.
///
/// # Arguments
///
/// * `input` - Income, taxpayer profile and claimed deductions
/// * `rules` - Statutory figures for both regimes
///
/// # Returns
///
/// The comparison, or an error when `rules` fail validation or the income
/// is zero or negative. Rules are checked before income.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{EstimateError, Regime, RegimeRules, TaxInput, estimate_with_rules};
///
/// let mut rules = RegimeRules::default();
/// rules.new.standard_deduction = dec!(75000);
/// rules.new.rebate_limit = dec!(1200000);
/// rules.new.rebate_amount = dec!(80000);
///
/// let input = TaxInput {
///     annual_income: dec!(1200000),
///     ..Default::default()
/// };
/// let result = estimate_with_rules(&input, &rules).unwrap();
///
/// assert_eq!(result.new_regime.taxable_income, dec!(1125000));
/// assert_eq!(result.new_regime.total_tax, dec!(0));
/// assert_eq!(result.recommended_regime, Regime::New);
///
/// let zero = TaxInput::default();
/// assert_eq!(
///     estimate_with_rules(&zero, &rules),
///     Err(EstimateError::NonPositiveIncome(dec!(0)))
/// );
/// ```
pub fn estimate_with_rules(
    input: &TaxInput,
    rules: &RegimeRules,
) -> Result<ComparisonResult, EstimateError> {
    rules.validate()?;

    if input.annual_income <= Decimal::ZERO {
        return Err(EstimateError::NonPositiveIncome(input.annual_income));
    }

    let old = OldRegimeCalculator::new(&rules.old).calculate(input);
    let new = NewRegimeCalculator::new(&rules.new).calculate(input);
    let result = compare(old, new);

    info!(
        income = %input.annual_income,
        recommended = result.recommended_regime.as_str(),
        savings = %result.savings_magnitude(),
        "estimate complete"
    );

    Ok(result)
}
