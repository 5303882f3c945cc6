use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, RegimeResult};

/// Both regime breakdowns side by side, with the recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub old_regime: RegimeResult,
    pub new_regime: RegimeResult,
    /// `old_regime.total_tax - new_regime.total_tax`; positive when the Old
    /// Regime costs more.
    pub savings: Decimal,
    pub recommended_regime: Regime,
}

impl ComparisonResult {
    pub fn result_for(
        &self,
        regime: Regime,
    ) -> &RegimeResult {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }

    pub fn recommended_result(&self) -> &RegimeResult {
        self.result_for(self.recommended_regime)
    }

    /// Amount saved by choosing the recommended regime.
    pub fn savings_magnitude(&self) -> Decimal {
        self.savings.abs()
    }

    /// True when both regimes produce the same total tax.
    pub fn is_tie(&self) -> bool {
        self.savings.is_zero()
    }
}
