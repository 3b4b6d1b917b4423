use std::{fmt, ops::Add, str::FromStr};

use crate::EngineError;

/// Amount of money as shown to the user.
///
/// Amounts travel as JSON numbers, so this wraps an `f64`. Values are only
/// rounded when displayed, always to two decimals.
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!(Money::new(12.5).to_string(), "$12.50");
/// assert_eq!("10".parse::<Money>().unwrap().value(), 10.0);
/// assert!("ten".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Formats without the currency sign, e.g. `100.00`.
    #[must_use]
    pub fn fixed(self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses user input.
    ///
    /// Rejects empty input and anything that is not a finite decimal number.
    /// The sign is kept: rejecting negatives is up to the caller.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let value = trimmed
            .parse::<f64>()
            .map_err(|_| EngineError::InvalidAmount(format!("\"{trimmed}\" is not a number")))?;
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "\"{trimmed}\" is not a number"
            )));
        }

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_cents() {
        assert_eq!(Money::new(0.0).to_string(), "$0.00");
        assert_eq!(Money::new(100.0).to_string(), "$100.00");
        assert_eq!(Money::new(19.999).to_string(), "$20.00");
        assert_eq!(Money::new(70.0).fixed(), "70.00");
    }

    #[test]
    fn parse_accepts_decimals_and_whitespace() {
        assert_eq!("10".parse::<Money>().unwrap().value(), 10.0);
        assert_eq!(" 2.30 ".parse::<Money>().unwrap().value(), 2.3);
        assert_eq!("-5".parse::<Money>().unwrap().value(), -5.0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("inf".parse::<Money>().is_err());
        assert!("NaN".parse::<Money>().is_err());
    }
}
