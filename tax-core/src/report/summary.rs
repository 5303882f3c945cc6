//! The exportable estimate summary.
//!
//! [`TaxSummary`] collects what a taxpayer needs to keep on file: the
//! figures that went in, both regime totals and the recommendation. It
//! renders as plain text through `Display` and serializes with serde.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::format_inr;
use crate::{AgeBracket, ComparisonResult, Deductions, EmploymentType, Regime, TaxInput};

const TIPS: [&str; 5] = [
    "Maximize 80C investments early in the financial year",
    "Consider ELSS funds for dual benefit of tax saving and equity exposure",
    "Plan health insurance premiums for Section 80D benefits",
    "Keep proper documentation for all deductions claimed",
    "Review and compare tax regimes annually based on your income structure",
];

const LABEL_WIDTH: usize = 34;
const AMOUNT_WIDTH: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub generated_on: NaiveDate,
    pub annual_income: Decimal,
    pub employment_type: EmploymentType,
    pub age_bracket: AgeBracket,
    /// Raw claimed amounts, before caps.
    pub deductions: Deductions,
    pub old_regime_tax: Decimal,
    pub new_regime_tax: Decimal,
    pub recommended_regime: Regime,
    pub recommendation: String,
    /// Tax saved by following the recommendation.
    pub savings: Decimal,
    pub tips: Vec<String>,
}

impl TaxSummary {
    pub fn new(
        input: &TaxInput,
        comparison: &ComparisonResult,
        generated_on: NaiveDate,
    ) -> Self {
        Self {
            generated_on,
            annual_income: input.annual_income,
            employment_type: input.employment_type,
            age_bracket: input.age_bracket,
            deductions: input.deductions.clone(),
            old_regime_tax: comparison.old_regime.total_tax,
            new_regime_tax: comparison.new_regime.total_tax,
            recommended_regime: comparison.recommended_regime,
            recommendation: recommendation_sentence(comparison),
            savings: comparison.savings_magnitude(),
            tips: TIPS.iter().map(|tip| tip.to_string()).collect(),
        }
    }
}

/// One sentence naming the cheaper regime and the amount it saves.
pub fn recommendation_sentence(comparison: &ComparisonResult) -> String {
    let recommended = comparison.recommended_regime;
    if comparison.is_tie() {
        return format!(
            "Both regimes result in the same tax of {}. The {} is recommended.",
            format_inr(comparison.new_regime.total_tax),
            recommended.label(),
        );
    }
    format!(
        "The {} saves you {} compared to the {}.",
        recommended.label(),
        format_inr(comparison.savings_magnitude()),
        recommended.other().label(),
    )
}

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        format!("{label}:"),
        format_inr(amount)
    )
}

impl fmt::Display for TaxSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Tax Regime Estimate")?;
        writeln!(f, "Generated on: {}", self.generated_on.format("%d/%m/%Y"))?;
        writeln!(f)?;

        writeln!(f, "Income Summary")?;
        line(f, "Annual Income", self.annual_income)?;
        writeln!(f, "  {:<LABEL_WIDTH$}{}", "Employment:", self.employment_type)?;
        writeln!(f, "  {:<LABEL_WIDTH$}{}", "Age Group:", self.age_bracket)?;
        writeln!(f)?;

        writeln!(f, "Deductions Claimed")?;
        for (category, amount) in self.deductions.iter() {
            line(f, category.label(), amount)?;
        }
        writeln!(f)?;

        writeln!(f, "Tax Calculation Comparison")?;
        line(f, "Old Regime Tax", self.old_regime_tax)?;
        line(f, "New Regime Tax", self.new_regime_tax)?;
        writeln!(f)?;

        writeln!(f, "Recommendation")?;
        writeln!(f, "  {}", self.recommendation)?;
        writeln!(f, "  Total Savings: {}", format_inr(self.savings))?;
        writeln!(f)?;

        writeln!(f, "Tax Saving Tips for Next Year")?;
        for tip in &self.tips {
            writeln!(f, "  • {tip}")?;
        }
        writeln!(f)?;

        write!(f, "For informational purposes only.")
    }
}
