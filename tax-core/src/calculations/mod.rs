//! Liability calculations for the Old and New regimes.
//!
//! Each regime has a calculator that borrows its rule set and turns a
//! [`TaxInput`](crate::TaxInput) into a [`RegimeResult`](crate::RegimeResult).
//! [`comparison`] runs both and recommends one.

pub mod common;
pub mod comparison;
pub mod regimes;
pub mod rules;

pub use comparison::{EstimateError, compare, estimate, estimate_with_rules};
pub use regimes::{NewRegimeCalculator, OldRegimeCalculator, compute_new_regime, compute_old_regime};
pub use rules::{NewRegimeRules, OldRegimeRules, RegimeRules, RegimeRulesError};
