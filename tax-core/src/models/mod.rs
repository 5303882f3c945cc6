mod age_bracket;
mod comparison_result;
mod deductions;
mod employment_type;
mod regime;
mod regime_result;
mod tax_input;
mod tax_slab;

pub use age_bracket::AgeBracket;
pub use comparison_result::ComparisonResult;
pub use deductions::{DeductionAdjustment, DeductionCategory, Deductions};
pub use employment_type::EmploymentType;
pub use regime::Regime;
pub use regime_result::RegimeResult;
pub use tax_input::TaxInput;
pub use tax_slab::TaxSlab;
