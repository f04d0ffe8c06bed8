use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to cents, halves away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Decimal keeps a sign on zero; never report "-0.00".
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Render an amount with exactly two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_amount(amount))
}
