use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Formats an amount in rupees with Indian digit grouping.
///
/// The last three integer digits form one group and every two digits before
/// that form another. Amounts are rounded to paise.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::report::format_inr;
///
/// assert_eq!(format_inr(dec!(1234567.5)), "₹12,34,567.50");
/// assert_eq!(format_inr(dec!(999)), "₹999.00");
/// assert_eq!(format_inr(dec!(-26000)), "-₹26,000.00");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, paise) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}₹{}.{paise}", group_indian(whole))
}

fn group_indian(whole: &str) -> String {
    if whole.len() <= 3 {
        return whole.to_string();
    }

    let (head, tail) = whole.split_at(whole.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
