//! New Regime calculation.
//!
//! The New Regime ignores itemised deductions. Every taxpayer receives the
//! flat standard deduction regardless of employment type, and the remaining
//! income is taxed across six slabs from 0% to 30%. Taxable income up to
//! 7,00,000 receives a rebate of up to 25,000.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_half_up, slab_tax};
use crate::calculations::rules::NewRegimeRules;
use crate::{Deductions, RegimeResult, TaxInput};

/// Calculator for the New Regime.
#[derive(Debug, Clone)]
pub struct NewRegimeCalculator<'a> {
    rules: &'a NewRegimeRules,
}

impl<'a> NewRegimeCalculator<'a> {
    pub fn new(rules: &'a NewRegimeRules) -> Self {
        Self { rules }
    }

    /// Computes the New Regime breakdown for `input`.
    ///
    /// Only the income is read. `total_deductions` on the result reports the
    /// standard deduction that was applied.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> RegimeResult {
        let income = non_negative(round_half_up(input.annual_income));
        let taxable_income = self.taxable_income(income);
        let slab_tax = slab_tax(&self.rules.slabs, taxable_income, Decimal::ZERO);
        let income_tax = self.apply_rebate(taxable_income, slab_tax);
        let cess = round_half_up(income_tax * self.rules.cess_rate);

        debug!(
            income = %income,
            taxable_income = %taxable_income,
            slab_tax = %slab_tax,
            income_tax = %income_tax,
            cess = %cess,
            "new regime calculated"
        );

        RegimeResult::from_lines(
            income,
            self.rules.standard_deduction,
            taxable_income,
            income_tax,
            cess,
        )
    }

    fn taxable_income(
        &self,
        income: Decimal,
    ) -> Decimal {
        non_negative(income - self.rules.standard_deduction)
    }

    fn apply_rebate(
        &self,
        taxable_income: Decimal,
        tax: Decimal,
    ) -> Decimal {
        if taxable_income <= self.rules.rebate_limit {
            non_negative(tax - self.rules.rebate_amount)
        } else {
            tax
        }
    }
}

/// Computes the New Regime breakdown with the default rules.
///
/// # Arguments
///
/// * `income` - Gross annual income
/// * `deductions` - Accepted for symmetry with
///   [`compute_old_regime`](crate::compute_old_regime) and ignored
///
/// # Returns
///
/// The full breakdown, with the flat standard deduction reported as
/// `total_deductions`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{Deductions, compute_new_regime};
///
/// let result = compute_new_regime(dec!(750000), &Deductions::default());
///
/// // 25,000 of slab tax is wiped out by the rebate.
/// assert_eq!(result.taxable_income, dec!(700000));
/// assert_eq!(result.total_deductions, dec!(50000));
/// assert_eq!(result.total_tax, dec!(0));
/// ```
pub fn compute_new_regime(
    income: Decimal,
    deductions: &Deductions,
) -> RegimeResult {
    let rules = NewRegimeRules::default();
    let input = TaxInput {
        annual_income: income,
        deductions: deductions.clone(),
        ..Default::default()
    };
    NewRegimeCalculator::new(&rules).calculate(&input)
}
