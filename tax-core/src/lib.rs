pub mod calculations;
pub mod models;
pub mod report;

pub use calculations::{
    EstimateError, NewRegimeCalculator, NewRegimeRules, OldRegimeCalculator, OldRegimeRules,
    RegimeRules, RegimeRulesError, compare, compute_new_regime, compute_old_regime, estimate,
    estimate_with_rules,
};
pub use models::*;
