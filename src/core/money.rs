use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every monetary output carries
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to the output scale (2 dp, half away from zero).
///
/// The result always carries exactly two decimal places so that serialized
/// totals are stable ("300.00", never "300"). Negative zero collapses to 0.00.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Formats an amount for display, e.g. `$1,234.50` or `-$20.00`
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}{}{}.{}", sign, symbol, group_thousands(whole), fraction)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
