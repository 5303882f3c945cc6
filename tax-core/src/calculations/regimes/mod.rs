//! Per-regime liability calculators.

pub mod new_regime;
pub mod old_regime;

pub use new_regime::{NewRegimeCalculator, compute_new_regime};
pub use old_regime::{OldRegimeCalculator, compute_old_regime};
