use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// Signed monetary amount. Negative values are money leaving the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    /// Permissive statement parsing: anything that is not a decimal number is zero.
    /// The value is kept at full precision; only display rounds to cents.
    pub fn parse_or_zero(s: &str) -> Self {
        Decimal::from_str(s.trim()).map(Money).unwrap_or_default()
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Arithmetic mean over `count` items, zero when there are none.
    pub fn mean(total: Money, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        Money::from_decimal(total.0 / Decimal::from(count))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.0.round_dp(2);
        if cents.is_sign_negative() && !cents.is_zero() {
            write!(f, "-${:.2}", cents.abs())
        } else {
            write!(f, "${:.2}", cents.abs())
        }
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_signed_amounts() {
        assert_eq!(Money::parse_or_zero("-45.30"), Money::from_cents(-4530));
        assert_eq!(Money::parse_or_zero("2000.00"), Money::from_cents(200_000));
        assert_eq!(Money::parse_or_zero(" 12.5 "), Money::from_cents(1250));
    }

    #[test]
    fn unparseable_amount_is_zero() {
        assert!(Money::parse_or_zero("").is_zero());
        assert!(Money::parse_or_zero("n/a").is_zero());
        assert!(Money::parse_or_zero("$12.00").is_zero());
    }

    #[test]
    fn parsing_keeps_sub_cent_precision() {
        let amount = Money::parse_or_zero("12.345");
        assert_ne!(amount, Money::from_cents(1234));
        assert_eq!(amount.to_string(), "$12.34");

        let tiny_debit = Money::parse_or_zero("-0.005");
        assert!(tiny_debit.is_negative());
        assert!(!tiny_debit.is_zero());
        assert_eq!(tiny_debit + tiny_debit, Money::parse_or_zero("-0.01"));
        assert_eq!(tiny_debit.to_string(), "$0.00");
    }

    #[test]
    fn display_keeps_sign_outside_symbol() {
        assert_eq!(Money::from_cents(-4530).to_string(), "-$45.30");
        assert_eq!(Money::from_cents(200_000).to_string(), "$2000.00");
    }

    #[test]
    fn sum_and_sign_helpers() {
        let amounts = [Money::from_cents(-100), Money::from_cents(250), Money::zero()];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_cents(150));
        assert!(amounts[0].is_negative());
        assert!(amounts[1].is_positive());
        assert!(!amounts[2].is_positive() && !amounts[2].is_negative());
        assert_eq!(-amounts[0], Money::from_cents(100));
    }

    #[test]
    fn mean_rounds_to_cents_and_handles_empty() {
        assert_eq!(Money::mean(Money::from_cents(1000), 3), Money::from_cents(333));
        assert_eq!(Money::mean(Money::from_cents(1000), 0), Money::zero());
    }
}
