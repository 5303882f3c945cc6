//! Statutory constants for both regimes.
//!
//! The `Default` implementations carry the rates, caps and thresholds the
//! estimator ships with. Every struct deserializes with `#[serde(default)]`,
//! so an override file only needs the keys it changes:
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::RegimeRules;
//!
//! let rules: RegimeRules = serde_json::from_str(
//!     r#"{ "new": { "rebate_limit": "1200000", "rebate_amount": "60000" } }"#,
//! ).unwrap();
//!
//! assert_eq!(rules.new.rebate_limit, dec!(1200000));
//! assert_eq!(rules.new.standard_deduction, dec!(50000));
//! assert_eq!(rules.old, Default::default());
//! assert!(rules.validate().is_ok());
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Regime, TaxSlab};

/// Errors reported by [`RegimeRules::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeRulesError {
    #[error("{0} has no tax slabs")]
    NoSlabs(Regime),

    #[error("{regime} slab {index} rate must be between 0 and 1, got {rate}")]
    InvalidSlabRate {
        regime: Regime,
        index: usize,
        rate: Decimal,
    },

    #[error("{regime} slab {index} must start at zero")]
    FirstSlabNotAtZero { regime: Regime, index: usize },

    #[error("{regime} slab {index} does not start where the previous slab ends")]
    NonContiguousSlabs { regime: Regime, index: usize },

    #[error("{regime} slab {index} upper bound must exceed its lower bound")]
    EmptySlab { regime: Regime, index: usize },

    #[error("{regime} slab {index} is open-ended but is not the last slab")]
    OpenEndedSlabNotLast { regime: Regime, index: usize },

    #[error("{0} last slab must be open-ended")]
    LastSlabBounded(Regime),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidFraction { field: &'static str, value: Decimal },

    #[error("senior age {senior} must be below very senior age {very_senior}")]
    InvalidAgeLimits { senior: u32, very_senior: u32 },
}

/// Old Regime caps, thresholds and slabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OldRegimeRules {
    pub section_80c_cap: Decimal,
    pub section_80d_cap: Decimal,
    /// 80D cap once the taxpayer reaches `senior_age`.
    pub section_80d_senior_cap: Decimal,
    pub home_loan_interest_cap: Decimal,
    /// HRA exemption cap as a fraction of gross income.
    pub hra_income_fraction: Decimal,
    /// NPS cap as a fraction of gross income.
    pub nps_income_fraction: Decimal,
    /// Granted to salaried taxpayers only.
    pub standard_deduction: Decimal,
    pub senior_age: u32,
    pub very_senior_age: u32,
    pub exemption_threshold: Decimal,
    pub senior_exemption_threshold: Decimal,
    pub very_senior_exemption_threshold: Decimal,
    /// Slabs start at zero; the age-based exemption threshold raises the
    /// lower edge of every slab it overlaps.
    pub slabs: Vec<TaxSlab>,
    pub rebate_limit: Decimal,
    pub rebate_amount: Decimal,
    pub cess_rate: Decimal,
}

impl Default for OldRegimeRules {
    fn default() -> Self {
        Self {
            section_80c_cap: dec!(150000),
            section_80d_cap: dec!(25000),
            section_80d_senior_cap: dec!(50000),
            home_loan_interest_cap: dec!(200000),
            hra_income_fraction: dec!(0.5),
            nps_income_fraction: dec!(0.1),
            standard_deduction: dec!(50000),
            senior_age: 60,
            very_senior_age: 80,
            exemption_threshold: dec!(250000),
            senior_exemption_threshold: dec!(300000),
            very_senior_exemption_threshold: dec!(500000),
            slabs: vec![
                TaxSlab::new(dec!(0), Some(dec!(500000)), dec!(0.05)),
                TaxSlab::new(dec!(500000), Some(dec!(1000000)), dec!(0.20)),
                TaxSlab::new(dec!(1000000), None, dec!(0.30)),
            ],
            rebate_limit: dec!(500000),
            rebate_amount: dec!(12500),
            cess_rate: dec!(0.04),
        }
    }
}

impl OldRegimeRules {
    /// Basic exemption threshold for a taxpayer of `age`.
    pub fn exemption_threshold_for(
        &self,
        age: u32,
    ) -> Decimal {
        if age >= self.very_senior_age {
            self.very_senior_exemption_threshold
        } else if age >= self.senior_age {
            self.senior_exemption_threshold
        } else {
            self.exemption_threshold
        }
    }

    /// Section 80D cap for a taxpayer of `age`.
    pub fn section_80d_cap_for(
        &self,
        age: u32,
    ) -> Decimal {
        if age >= self.senior_age {
            self.section_80d_senior_cap
        } else {
            self.section_80d_cap
        }
    }

    pub fn validate(&self) -> Result<(), RegimeRulesError> {
        for (field, value) in [
            ("old.section_80c_cap", self.section_80c_cap),
            ("old.section_80d_cap", self.section_80d_cap),
            ("old.section_80d_senior_cap", self.section_80d_senior_cap),
            ("old.home_loan_interest_cap", self.home_loan_interest_cap),
            ("old.standard_deduction", self.standard_deduction),
            ("old.exemption_threshold", self.exemption_threshold),
            ("old.senior_exemption_threshold", self.senior_exemption_threshold),
            (
                "old.very_senior_exemption_threshold",
                self.very_senior_exemption_threshold,
            ),
            ("old.rebate_limit", self.rebate_limit),
            ("old.rebate_amount", self.rebate_amount),
        ] {
            check_non_negative(field, value)?;
        }
        for (field, value) in [
            ("old.hra_income_fraction", self.hra_income_fraction),
            ("old.nps_income_fraction", self.nps_income_fraction),
            ("old.cess_rate", self.cess_rate),
        ] {
            check_fraction(field, value)?;
        }
        if self.senior_age >= self.very_senior_age {
            return Err(RegimeRulesError::InvalidAgeLimits {
                senior: self.senior_age,
                very_senior: self.very_senior_age,
            });
        }
        validate_slabs(Regime::Old, &self.slabs)
    }
}

/// New Regime standard deduction and slabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRegimeRules {
    /// Granted to every employment type.
    pub standard_deduction: Decimal,
    pub slabs: Vec<TaxSlab>,
    pub rebate_limit: Decimal,
    pub rebate_amount: Decimal,
    pub cess_rate: Decimal,
}

impl Default for NewRegimeRules {
    fn default() -> Self {
        Self {
            standard_deduction: dec!(50000),
            slabs: vec![
                TaxSlab::new(dec!(0), Some(dec!(300000)), dec!(0)),
                TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(0.05)),
                TaxSlab::new(dec!(600000), Some(dec!(900000)), dec!(0.10)),
                TaxSlab::new(dec!(900000), Some(dec!(1200000)), dec!(0.15)),
                TaxSlab::new(dec!(1200000), Some(dec!(1500000)), dec!(0.20)),
                TaxSlab::new(dec!(1500000), None, dec!(0.30)),
            ],
            rebate_limit: dec!(700000),
            rebate_amount: dec!(25000),
            cess_rate: dec!(0.04),
        }
    }
}

impl NewRegimeRules {
    pub fn validate(&self) -> Result<(), RegimeRulesError> {
        check_non_negative("new.standard_deduction", self.standard_deduction)?;
        check_non_negative("new.rebate_limit", self.rebate_limit)?;
        check_non_negative("new.rebate_amount", self.rebate_amount)?;
        check_fraction("new.cess_rate", self.cess_rate)?;
        validate_slabs(Regime::New, &self.slabs)
    }
}

/// Rules for both regimes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeRules {
    pub old: OldRegimeRules,
    pub new: NewRegimeRules,
}

impl RegimeRules {
    /// Checks every cap, fraction and slab table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegimeRulesError`] found, Old Regime first.
    pub fn validate(&self) -> Result<(), RegimeRulesError> {
        self.old.validate()?;
        self.new.validate()
    }
}

fn check_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), RegimeRulesError> {
    if value < Decimal::ZERO {
        return Err(RegimeRulesError::NegativeAmount { field, value });
    }
    Ok(())
}

fn check_fraction(
    field: &'static str,
    value: Decimal,
) -> Result<(), RegimeRulesError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(RegimeRulesError::InvalidFraction { field, value });
    }
    Ok(())
}

/// Slabs must start at zero, be contiguous and ascending, and end with a
/// single open-ended slab.
fn validate_slabs(
    regime: Regime,
    slabs: &[TaxSlab],
) -> Result<(), RegimeRulesError> {
    let Some(last) = slabs.last() else {
        return Err(RegimeRulesError::NoSlabs(regime));
    };
    if last.upper.is_some() {
        return Err(RegimeRulesError::LastSlabBounded(regime));
    }

    let mut expected_lower = Decimal::ZERO;
    for (index, slab) in slabs.iter().enumerate() {
        if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
            return Err(RegimeRulesError::InvalidSlabRate {
                regime,
                index,
                rate: slab.rate,
            });
        }
        if slab.lower != expected_lower {
            return Err(if index == 0 {
                RegimeRulesError::FirstSlabNotAtZero { regime, index }
            } else {
                RegimeRulesError::NonContiguousSlabs { regime, index }
            });
        }
        match slab.upper {
            Some(upper) if upper <= slab.lower => {
                return Err(RegimeRulesError::EmptySlab { regime, index });
            }
            Some(upper) => expected_lower = upper,
            None if index + 1 != slabs.len() => {
                return Err(RegimeRulesError::OpenEndedSlabNotLast { regime, index });
            }
            None => {}
        }
    }
    Ok(())
}
