//! Presentation-ready views of a comparison: chart segments, the exported
//! summary document and rupee formatting.

pub mod chart;
pub mod currency;
pub mod summary;

pub use chart::{ChartSegment, deduction_breakdown, tax_breakdown};
pub use currency::format_inr;
pub use summary::TaxSummary;
