//! Monetary amounts in Brazilian reais
//!
//! CNAB files carry amounts as zero-padded centavos digit strings. [`Money`]
//! keeps them as a fixed-point `Decimal` with two decimal places so the
//! mantissa is always the centavos value, and renders them the way the
//! exported spreadsheets expect: `R$ 1.234,56`.

use rust_decimal::Decimal;
use std::fmt;
use std::iter::Sum;
use std::ops::AddAssign;

/// Scale of every amount: two decimal places (centavos)
const SCALE: u32 = 2;

/// Non-negative amount with centavos precision
///
/// Construction never fails: digit strings that are empty, zero or too large
/// to represent become [`Money::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Zero reais
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create an amount from an integer number of centavos
    pub fn from_centavos(centavos: u64) -> Self {
        Self::from_centavos_u128(u128::from(centavos))
    }

    /// Create an amount from a raw digit string, ignoring any non-digit
    /// characters
    ///
    /// The remaining digits are read as centavos. Used by the regex amount
    /// fallback and by the money formatter.
    pub fn from_digits(raw: &str) -> Self {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        Self::parse_centavos(&digits)
    }

    /// Create an amount from a fixed-width centavos field
    ///
    /// The trimmed field must consist only of digits; anything else (blank,
    /// signs, letters) yields zero.
    pub fn from_centavos_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Money::ZERO;
        }
        Self::parse_centavos(trimmed)
    }

    fn parse_centavos(digits: &str) -> Self {
        digits
            .parse::<u128>()
            .map(Self::from_centavos_u128)
            .unwrap_or(Money::ZERO)
    }

    fn from_centavos_u128(centavos: u128) -> Self {
        i128::try_from(centavos)
            .ok()
            .and_then(|value| Decimal::try_from_i128_with_scale(value, SCALE).ok())
            .map(Money)
            .unwrap_or(Money::ZERO)
    }

    /// The amount as an integer number of centavos
    pub fn centavos(&self) -> u128 {
        let mut value = self.0;
        value.rescale(SCALE);
        value.mantissa().unsigned_abs()
    }

    /// The amount as a decimal number of reais
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add two amounts, clamping at the largest representable value
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = self.saturating_add(other);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

/// Renders `R$ <reais with '.' thousands separators>,<centavos>`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let centavos = self.centavos();
        write!(
            f,
            "R$ {},{:02}",
            group_thousands(centavos / 100),
            centavos % 100
        )
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}
