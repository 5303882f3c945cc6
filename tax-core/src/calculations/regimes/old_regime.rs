//! Old Regime calculation.
//!
//! The Old Regime allows itemised deductions, each capped independently:
//!
//! | Deduction | Cap |
//! |-----------|-----|
//! | Section 80C | 1,50,000 |
//! | Section 80D | 25,000 (50,000 from age 60) |
//! | Home loan interest | 2,00,000 |
//! | HRA exemption | 50% of gross income |
//! | Education loan interest (80E) | none |
//! | NPS | 10% of gross income |
//! | Section 80G | none |
//! | Standard deduction | 50,000, salaried only |
//!
//! Slab tax starts above an age-based exemption threshold (2,50,000 below
//! 60, 3,00,000 from 60, 5,00,000 from 80). A rebate of up to 12,500 applies
//! when taxable income is at most 5,00,000, then 4% cess is added.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{AgeBracket, Deductions, EmploymentType, compute_old_regime};
//!
//! let result = compute_old_regime(
//!     dec!(600000),
//!     AgeBracket::BelowSixty,
//!     EmploymentType::Salaried,
//!     &Deductions::default(),
//! );
//!
//! assert_eq!(result.taxable_income, dec!(550000));
//! assert_eq!(result.income_tax, dec!(22500));
//! assert_eq!(result.cess, dec!(900));
//! assert_eq!(result.total_tax, dec!(23400));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_half_up, slab_tax};
use crate::calculations::rules::OldRegimeRules;
use crate::{AgeBracket, Deductions, EmploymentType, RegimeResult, TaxInput};

/// Calculator for the Old Regime.
#[derive(Debug, Clone)]
pub struct OldRegimeCalculator<'a> {
    rules: &'a OldRegimeRules,
}

impl<'a> OldRegimeCalculator<'a> {
    pub fn new(rules: &'a OldRegimeRules) -> Self {
        Self { rules }
    }

    /// Computes the Old Regime breakdown for `input`.
    ///
    /// Never fails. Negative income and negative deduction amounts are
    /// treated as zero.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> RegimeResult {
        let income = non_negative(round_half_up(input.annual_income));
        let age = input.age_bracket.representative_age();
        let deductions = input.deductions.clamped();

        let total_deductions =
            self.total_deductions(income, age, input.employment_type, &deductions);
        let taxable_income = self.taxable_income(income, total_deductions);
        let slab_tax = self.slab_tax(taxable_income, age);
        let income_tax = self.apply_rebate(taxable_income, slab_tax);
        let cess = self.cess(income_tax);

        debug!(
            income = %income,
            age,
            total_deductions = %total_deductions,
            taxable_income = %taxable_income,
            slab_tax = %slab_tax,
            income_tax = %income_tax,
            cess = %cess,
            "old regime calculated"
        );

        RegimeResult::from_lines(income, total_deductions, taxable_income, income_tax, cess)
    }

    /// Sums every deduction after applying its individual cap.
    fn total_deductions(
        &self,
        income: Decimal,
        age: u32,
        employment_type: EmploymentType,
        deductions: &Deductions,
    ) -> Decimal {
        let rules = self.rules;
        let hra_cap = round_half_up(income * rules.hra_income_fraction);
        let nps_cap = round_half_up(income * rules.nps_income_fraction);

        // 80E and 80G are uncapped, so the sum saturates instead of overflowing.
        let total = [
            deductions.section_80c.min(rules.section_80c_cap),
            deductions.section_80d.min(rules.section_80d_cap_for(age)),
            deductions.home_loan_interest.min(rules.home_loan_interest_cap),
            deductions.hra_exemption.min(hra_cap),
            deductions.education_loan_interest,
            deductions.nps.min(nps_cap),
            deductions.section_80g,
            self.standard_deduction(employment_type),
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add);

        round_half_up(total)
    }

    fn standard_deduction(
        &self,
        employment_type: EmploymentType,
    ) -> Decimal {
        if employment_type.is_salaried() {
            self.rules.standard_deduction
        } else {
            Decimal::ZERO
        }
    }

    fn taxable_income(
        &self,
        income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        non_negative(round_half_up(income - total_deductions))
    }

    fn slab_tax(
        &self,
        taxable_income: Decimal,
        age: u32,
    ) -> Decimal {
        let threshold = self.rules.exemption_threshold_for(age);
        slab_tax(&self.rules.slabs, taxable_income, threshold)
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

    fn cess(
        &self,
        income_tax: Decimal,
    ) -> Decimal {
        round_half_up(income_tax * self.rules.cess_rate)
    }
}

/// Computes the Old Regime breakdown with the default rules.
///
/// # Arguments
///
/// * `income` - Gross annual income
/// * `age_bracket` - Picks the exemption threshold and the 80D cap
/// * `employment_type` - Only salaried taxpayers get the standard deduction
/// * `deductions` - Raw claims; each is capped before summing
///
/// # Returns
///
/// The full breakdown. Negative amounts are treated as zero, so this never
/// fails.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{AgeBracket, Deductions, EmploymentType, compute_old_regime};
///
/// // A very senior taxpayer is exempt up to 5,00,000.
/// let result = compute_old_regime(
///     dec!(450000),
///     AgeBracket::AboveEighty,
///     EmploymentType::Business,
///     &Deductions::default(),
/// );
///
/// assert_eq!(result.taxable_income, dec!(450000));
/// assert_eq!(result.total_tax, dec!(0));
/// ```
pub fn compute_old_regime(
    income: Decimal,
    age_bracket: AgeBracket,
    employment_type: EmploymentType,
    deductions: &Deductions,
) -> RegimeResult {
    let rules = OldRegimeRules::default();
    let input = TaxInput::new(income, employment_type, age_bracket, deductions.clone());
    OldRegimeCalculator::new(&rules).calculate(&input)
}
