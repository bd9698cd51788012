//! Rounding rules for reported amounts.
//!
//! Amounts are rounded half away from zero, never to even.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to two decimal places.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(2005, 3)), Decimal::new(201, 2)); // 2.005 -> 2.01
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an amount to a whole currency unit.
pub fn round_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
