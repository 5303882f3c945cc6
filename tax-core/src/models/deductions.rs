use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A claimable deduction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeductionCategory {
    #[serde(rename = "section_80c")]
    Section80C,
    #[serde(rename = "section_80d")]
    Section80D,
    #[serde(rename = "section_80g")]
    Section80G,
    #[serde(rename = "home_loan_interest")]
    HomeLoanInterest,
    #[serde(rename = "education_loan_interest")]
    EducationLoanInterest,
    #[serde(rename = "hra_exemption")]
    HraExemption,
    #[serde(rename = "nps")]
    Nps,
}

impl DeductionCategory {
    pub const ALL: [DeductionCategory; 7] = [
        Self::Section80C,
        Self::Section80D,
        Self::Section80G,
        Self::HomeLoanInterest,
        Self::EducationLoanInterest,
        Self::HraExemption,
        Self::Nps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Section80C => "section_80c",
            Self::Section80D => "section_80d",
            Self::Section80G => "section_80g",
            Self::HomeLoanInterest => "home_loan_interest",
            Self::EducationLoanInterest => "education_loan_interest",
            Self::HraExemption => "hra_exemption",
            Self::Nps => "nps",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim())
    }

    /// Name used on the summary document.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Section80C => "Section 80C",
            Self::Section80D => "Section 80D",
            Self::Section80G => "Section 80G",
            Self::HomeLoanInterest => "Home Loan Interest (24)",
            Self::EducationLoanInterest => "Education Loan Interest (80E)",
            Self::HraExemption => "HRA Exemption",
            Self::Nps => "NPS (80CCD)",
        }
    }
}

impl fmt::Display for DeductionCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Amounts claimed per deduction category, before any statutory cap.
///
/// Caps are applied by the regime calculators, so these values are the raw
/// figures the taxpayer entered or imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub section_80g: Decimal,
    pub home_loan_interest: Decimal,
    pub education_loan_interest: Decimal,
    pub hra_exemption: Decimal,
    pub nps: Decimal,
}

impl Deductions {
    pub fn get(
        &self,
        category: DeductionCategory,
    ) -> Decimal {
        match category {
            DeductionCategory::Section80C => self.section_80c,
            DeductionCategory::Section80D => self.section_80d,
            DeductionCategory::Section80G => self.section_80g,
            DeductionCategory::HomeLoanInterest => self.home_loan_interest,
            DeductionCategory::EducationLoanInterest => self.education_loan_interest,
            DeductionCategory::HraExemption => self.hra_exemption,
            DeductionCategory::Nps => self.nps,
        }
    }

    pub fn set(
        &mut self,
        category: DeductionCategory,
        amount: Decimal,
    ) {
        *self.slot_mut(category) = amount;
    }

    fn slot_mut(
        &mut self,
        category: DeductionCategory,
    ) -> &mut Decimal {
        match category {
            DeductionCategory::Section80C => &mut self.section_80c,
            DeductionCategory::Section80D => &mut self.section_80d,
            DeductionCategory::Section80G => &mut self.section_80g,
            DeductionCategory::HomeLoanInterest => &mut self.home_loan_interest,
            DeductionCategory::EducationLoanInterest => &mut self.education_loan_interest,
            DeductionCategory::HraExemption => &mut self.hra_exemption,
            DeductionCategory::Nps => &mut self.nps,
        }
    }

    /// Iterates over every category in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (DeductionCategory, Decimal)> + '_ {
        DeductionCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of the raw claimed amounts, ignoring caps. Saturates at
    /// `Decimal::MAX`.
    pub fn total_claimed(&self) -> Decimal {
        self.iter()
            .map(|(_, amount)| amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Returns a copy with every negative amount replaced by zero.
    pub fn clamped(&self) -> Self {
        let mut clamped = self.clone();
        for (category, amount) in self.iter() {
            if amount < Decimal::ZERO {
                warn!(
                    category = category.as_str(),
                    amount = %amount,
                    "negative deduction clamped to zero"
                );
                clamped.set(category, Decimal::ZERO);
            }
        }
        clamped
    }

    /// Adds each category of `adjustment` onto the matching claim.
    ///
    /// A category whose running total would go negative is floored at zero;
    /// one that would overflow stays at `Decimal::MAX`.
    pub fn apply(
        &mut self,
        adjustment: &DeductionAdjustment,
    ) {
        for (category, amount) in adjustment.iter() {
            let slot = self.slot_mut(category);
            *slot = slot.saturating_add(amount).max(Decimal::ZERO);
        }
    }
}

/// A partial category-to-amount map produced by an import source.
///
/// Adding to a category that already has an amount accumulates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionAdjustment(BTreeMap<DeductionCategory, Decimal>);

impl DeductionAdjustment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates `amount` onto `category`, saturating at `Decimal::MAX`.
    pub fn add(
        &mut self,
        category: DeductionCategory,
        amount: Decimal,
    ) {
        let slot = self.0.entry(category).or_default();
        *slot = slot.saturating_add(amount);
    }

    pub fn get(
        &self,
        category: DeductionCategory,
    ) -> Decimal {
        self.0.get(&category).copied().unwrap_or_default()
    }

    /// Folds another adjustment into this one.
    pub fn merge(
        &mut self,
        other: &DeductionAdjustment,
    ) {
        for (category, amount) in other.iter() {
            self.add(category, amount);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeductionCategory, Decimal)> + '_ {
        self.0.iter().map(|(c, a)| (*c, *a))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(DeductionCategory, Decimal)> for DeductionAdjustment {
    fn from_iter<I: IntoIterator<Item = (DeductionCategory, Decimal)>>(iter: I) -> Self {
        let mut adjustment = Self::new();
        for (category, amount) in iter {
            adjustment.add(category, amount);
        }
        adjustment
    }
}
