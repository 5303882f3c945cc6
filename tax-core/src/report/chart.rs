//! Labelled amounts for the tax-distribution and deduction charts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::{ComparisonResult, DeductionCategory, Deductions};

/// One named slice or bar of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub label: String,
    pub amount: Decimal,
}

impl ChartSegment {
    pub fn new(
        label: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    /// This segment's share of `total` as a percentage, or zero when
    /// `total` is not positive.
    pub fn percent_of(
        &self,
        total: Decimal,
    ) -> Decimal {
        if total <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        round_half_up(self.amount / total * Decimal::ONE_HUNDRED)
    }
}

/// Splits the recommended regime's gross income into income tax, cess and
/// what remains.
pub fn tax_breakdown(comparison: &ComparisonResult) -> Vec<ChartSegment> {
    let result = comparison.recommended_result();
    vec![
        ChartSegment::new("Income Tax", result.total_tax - result.cess),
        ChartSegment::new("Health & Education Cess", result.cess),
        ChartSegment::new("Net Income", result.net_income),
    ]
}

/// Claimed deductions as chart bars, with the standard deduction slotted in
/// after HRA.
///
/// Amounts are the raw claims; caps are not applied.
pub fn deduction_breakdown(
    deductions: &Deductions,
    standard_deduction: Decimal,
) -> Vec<ChartSegment> {
    let claim = |category: DeductionCategory| {
        ChartSegment::new(chart_label(category), deductions.get(category))
    };

    vec![
        claim(DeductionCategory::Section80C),
        claim(DeductionCategory::Section80D),
        claim(DeductionCategory::HomeLoanInterest),
        claim(DeductionCategory::HraExemption),
        ChartSegment::new("Standard Deduction", standard_deduction),
        claim(DeductionCategory::Section80G),
        claim(DeductionCategory::Nps),
        claim(DeductionCategory::EducationLoanInterest),
    ]
}

fn chart_label(category: DeductionCategory) -> &'static str {
    match category {
        DeductionCategory::Section80C => "80C (EPF, ELSS)",
        DeductionCategory::Section80D => "80D (Health Ins.)",
        DeductionCategory::Section80G => "80G Donations",
        DeductionCategory::HomeLoanInterest => "Home Loan Interest",
        DeductionCategory::EducationLoanInterest => "Education Loan Interest",
        DeductionCategory::HraExemption => "HRA",
        DeductionCategory::Nps => "NPS",
    }
}
