use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An income band taxed at a single marginal rate.
///
/// `upper` of `None` means the band is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxSlab {
    pub fn new(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { lower, upper, rate }
    }

    /// Portion of `taxable_income` that falls inside this band, with the
    /// band's lower edge raised to `floor` when the floor is higher.
    pub fn taxable_portion(
        &self,
        taxable_income: Decimal,
        floor: Decimal,
    ) -> Decimal {
        let lower = self.lower.max(floor);
        let top = match self.upper {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };
        (top - lower).max(Decimal::ZERO)
    }

    /// Tax contributed by this band.
    pub fn tax(
        &self,
        taxable_income: Decimal,
        floor: Decimal,
    ) -> Decimal {
        self.taxable_portion(taxable_income, floor) * self.rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn portion_is_zero_below_band() {
        let slab = TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(0.05));

        assert_eq!(slab.taxable_portion(dec!(250000), dec!(0)), dec!(0));
    }

    #[test]
    fn portion_is_partial_inside_band() {
        let slab = TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(0.05));

        assert_eq!(slab.taxable_portion(dec!(450000), dec!(0)), dec!(150000));
        assert_eq!(slab.tax(dec!(450000), dec!(0)), dec!(7500));
    }

    #[test]
    fn portion_is_full_width_above_band() {
        let slab = TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(0.05));

        assert_eq!(slab.taxable_portion(dec!(2000000), dec!(0)), dec!(300000));
    }

    #[test]
    fn open_ended_band_takes_everything_above_lower() {
        let slab = TaxSlab::new(dec!(1000000), None, dec!(0.30));

        assert_eq!(slab.taxable_portion(dec!(1250000), dec!(0)), dec!(250000));
    }

    #[test]
    fn floor_raises_lower_edge() {
        let slab = TaxSlab::new(dec!(0), Some(dec!(500000)), dec!(0.05));

        assert_eq!(slab.taxable_portion(dec!(400000), dec!(300000)), dec!(100000));
    }

    #[test]
    fn floor_above_band_empties_it() {
        let slab = TaxSlab::new(dec!(0), Some(dec!(500000)), dec!(0.05));

        assert_eq!(slab.taxable_portion(dec!(450000), dec!(500000)), dec!(0));
        assert_eq!(slab.taxable_portion(dec!(900000), dec!(500000)), dec!(0));
    }
}
