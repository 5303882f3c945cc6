use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Breakdown of one regime's liability.
///
/// `total_tax` is always `income_tax + cess`, and `net_income` is always
/// `gross_income - total_tax`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    /// Slab tax after rebate, before cess.
    pub income_tax: Decimal,
    /// Health & education cess on `income_tax`.
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub net_income: Decimal,
}

impl RegimeResult {
    /// Builds a result from its independent lines, deriving the totals.
    pub fn from_lines(
        gross_income: Decimal,
        total_deductions: Decimal,
        taxable_income: Decimal,
        income_tax: Decimal,
        cess: Decimal,
    ) -> Self {
        let total_tax = income_tax + cess;
        Self {
            gross_income,
            total_deductions,
            taxable_income,
            income_tax,
            cess,
            total_tax,
            net_income: gross_income - total_tax,
        }
    }

    /// Total tax as a fraction of gross income, or zero with no income.
    pub fn effective_rate(&self) -> Decimal {
        if self.gross_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_tax / self.gross_income
    }
}
