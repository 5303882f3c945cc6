use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgeBracket, DeductionAdjustment, Deductions, EmploymentType};

/// Everything the regime calculators need for one estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    pub annual_income: Decimal,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub age_bracket: AgeBracket,
    #[serde(default)]
    pub deductions: Deductions,
}

impl TaxInput {
    pub fn new(
        annual_income: Decimal,
        employment_type: EmploymentType,
        age_bracket: AgeBracket,
        deductions: Deductions,
    ) -> Self {
        Self {
            annual_income,
            employment_type,
            age_bracket,
            deductions,
        }
    }

    /// Returns the input with `adjustment` added onto its deductions.
    pub fn with_adjustment(
        mut self,
        adjustment: &DeductionAdjustment,
    ) -> Self {
        self.deductions.apply(adjustment);
        self
    }
}
