//! Common utility functions for tax calculations.
//!
//! Rounding, flooring and slab summation shared by both regime calculators.

use rust_decimal::Decimal;

use crate::TaxSlab;

/// Rounds to paise, with exact midpoints moving away from zero.
///
/// Every line of a regime result passes through this, so totals are sums of
/// already-rounded lines.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(112.504)), dec!(112.50));
/// assert_eq!(round_half_up(dec!(112.505)), dec!(112.51));
/// assert_eq!(round_half_up(dec!(-112.505)), dec!(-112.51));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// The larger of `a` and `b`.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Floors a value at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-12.50)), dec!(0));
/// assert_eq!(non_negative(dec!(12.50)), dec!(12.50));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Sums every slab's contribution for `taxable_income`.
///
/// # Arguments
///
/// * `slabs` - Contiguous slabs in ascending order
/// * `taxable_income` - Income after deductions
/// * `floor` - Income below this is untaxed; each slab's lower edge is
///   raised to it
///
/// # Returns
///
/// The tax rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TaxSlab;
/// use tax_core::calculations::common::slab_tax;
///
/// let slabs = vec![
///     TaxSlab::new(dec!(0), Some(dec!(300000)), dec!(0)),
///     TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(0.05)),
///     TaxSlab::new(dec!(600000), None, dec!(0.10)),
/// ];
///
/// assert_eq!(slab_tax(&slabs, dec!(700000), dec!(0)), dec!(25000));
/// assert_eq!(slab_tax(&slabs, dec!(500000), dec!(400000)), dec!(5000));
/// ```
pub fn slab_tax(
    slabs: &[TaxSlab],
    taxable_income: Decimal,
    floor: Decimal,
) -> Decimal {
    let tax: Decimal = slabs
        .iter()
        .map(|slab| slab.tax(taxable_income, floor))
        .sum();
    round_half_up(tax)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_cess_midpoint_away_from_zero() {
        // 4% of 2812.625
        assert_eq!(round_half_up(dec!(112.505)), dec!(112.51));
        assert_eq!(round_half_up(dec!(-112.505)), dec!(-112.51));
    }

    #[test]
    fn round_half_up_truncates_below_midpoint() {
        assert_eq!(round_half_up(dec!(117003.304)), dec!(117003.30));
    }

    #[test]
    fn round_half_up_carries_into_whole_rupees() {
        assert_eq!(round_half_up(dec!(149999.995)), dec!(150000.00));
    }

    #[test]
    fn round_half_up_keeps_paise() {
        assert_eq!(round_half_up(dec!(18500.50)), dec!(18500.50));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_picks_larger_argument_in_either_position() {
        assert_eq!(max(dec!(50000), dec!(75000)), dec!(75000));
        assert_eq!(max(dec!(75000), dec!(50000)), dec!(75000));
    }

    #[test]
    fn max_of_negative_and_zero_is_zero() {
        assert_eq!(max(dec!(-2500.00), dec!(0)), dec!(0));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_floors_negative_values() {
        assert_eq!(non_negative(dec!(-0.01)), dec!(0));
    }

    #[test]
    fn non_negative_keeps_positive_values() {
        assert_eq!(non_negative(dec!(75000.25)), dec!(75000.25));
    }

    // =========================================================================
    // slab_tax tests
    // =========================================================================

    fn progressive_slabs() -> Vec<TaxSlab> {
        vec![
            TaxSlab::new(dec!(0), Some(dec!(300000)), dec!(0)),
            TaxSlab::new(dec!(300000), Some(dec!(600000)), dec!(0.05)),
            TaxSlab::new(dec!(600000), None, dec!(0.10)),
        ]
    }

    #[test]
    fn slab_tax_sums_every_band() {
        let result = slab_tax(&progressive_slabs(), dec!(700000), dec!(0));

        // 300000 * 0.05 + 100000 * 0.10
        assert_eq!(result, dec!(25000.00));
    }

    #[test]
    fn slab_tax_is_zero_for_zero_income() {
        assert_eq!(slab_tax(&progressive_slabs(), dec!(0), dec!(0)), dec!(0));
    }

    #[test]
    fn slab_tax_rounds_half_up() {
        let result = slab_tax(&progressive_slabs(), dec!(300000.10), dec!(0));

        // 0.10 * 0.05 = 0.005
        assert_eq!(result, dec!(0.01));
    }

    #[test]
    fn slab_tax_applies_floor() {
        let result = slab_tax(&progressive_slabs(), dec!(500000), dec!(400000));

        assert_eq!(result, dec!(5000.00));
    }
}
