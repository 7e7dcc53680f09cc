use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use thiserror::Error;

/// Currencies the marketplace prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Currency {
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
        }
    }

    /// Minor units per major unit (paise per rupee).
    pub fn minor_per_major(self) -> i64 {
        match self {
            Currency::Inr => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoneyError {
    #[error("No digits in price text: {0:?}")]
    NoDigits(String),
    #[error("Price text out of range: {0:?}")]
    OutOfRange(String),
}

/// An amount held as integer minor units. Only formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    minor_units: i64,
    currency: Currency,
}

impl Money {
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self { minor_units, currency }
    }

    pub fn rupees(rupees: i64) -> Self {
        Self::from_minor(rupees * Currency::Inr.minor_per_major(), Currency::Inr)
    }

    pub fn paise(paise: i64) -> Self {
        Self::from_minor(paise, Currency::Inr)
    }

    pub fn zero() -> Self {
        Self::paise(0)
    }

    /// Legacy parser for display prices such as `"₹150/kg"` or `"₹1,200"`.
    ///
    /// Every non-digit character is discarded and the remaining digits are read
    /// as whole rupees. This is lossy: `"₹12.50"` reads as 1250 rupees. Use it
    /// only where prices still arrive as display text.
    pub fn from_display_lossy(text: &str) -> Result<Self, MoneyError> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(MoneyError::NoDigits(text.to_string()));
        }
        let rupees: i64 = digits.parse().map_err(|_| MoneyError::OutOfRange(text.to_string()))?;
        rupees
            .checked_mul(Currency::Inr.minor_per_major())
            .map(Self::paise)
            .ok_or_else(|| MoneyError::OutOfRange(text.to_string()))
    }

    /// Saturates at the `i64` bounds rather than wrapping.
    pub fn times(self, quantity: u32) -> Self {
        Self::from_minor(self.minor_units.saturating_mul(i64::from(quantity)), self.currency)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        debug_assert_eq!(self.currency, rhs.currency, "mixed currencies");
        Money::from_minor(self.minor_units.saturating_add(rhs.minor_units), self.currency)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    /// `₹1,200` for whole amounts, `₹12.50` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_major = self.currency.minor_per_major();
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let major = abs / per_major as u64;
        let minor = abs % per_major as u64;

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}{}{}", sign, self.currency.symbol(), grouped)?;
        if minor != 0 {
            write!(f, ".{:02}", minor)?;
        }
        Ok(())
    }
}
