use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("too many decimals: {0}")]
    TooManyDecimals(String),
    #[error("amount too large: {0}")]
    Overflow(String),
}

/// Monetary amount represented as **integer cents**.
///
/// On the wire the amount travels as a string with a `,` radix and two
/// fraction digits, the same shape the amount input produces:
///
/// ```rust
/// use api_types::Amount;
///
/// let amount: Amount = "12,5".parse().unwrap();
/// assert_eq!(amount.cents(), 1250);
/// assert_eq!(amount.to_string(), "12,50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "AmountRepr", into = "String")]
pub struct Amount(i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{},{:02}", abs / 100, abs % 100)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_string()
    }
}

impl TryFrom<AmountRepr> for Amount {
    type Error = AmountError;

    fn try_from(value: AmountRepr) -> Result<Self, Self::Error> {
        match value {
            AmountRepr::Text(text) => text.parse(),
            AmountRepr::Integer(units) => units
                .checked_mul(100)
                .map(Amount)
                .ok_or_else(|| AmountError::Overflow(units.to_string())),
            AmountRepr::Float(units) => {
                let cents = (units * 100.0).round();
                if !cents.is_finite() || cents.abs() > i64::MAX as f64 {
                    return Err(AmountError::Overflow(units.to_string()));
                }
                Ok(Amount(cents as i64))
            }
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `,` or `.` as decimal separator and an optional leading
    /// `+`/`-`; rejects more than 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::Invalid(s.to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim_start())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim_start())
        } else {
            (false, trimmed)
        };
        if rest.is_empty() {
            return Err(AmountError::Empty);
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let units: i64 = units_str.parse().map_err(|_| invalid())?;

        let cents: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(AmountError::TooManyDecimals(s.to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(|| AmountError::Overflow(s.to_string()))?;

        Ok(Amount(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_comma_radix() {
        assert_eq!(Amount::from_cents(0).to_string(), "0,00");
        assert_eq!(Amount::from_cents(5).to_string(), "0,05");
        assert_eq!(Amount::from_cents(1050).to_string(), "10,50");
        assert_eq!(Amount::from_cents(-1050).to_string(), "-10,50");
    }

    #[test]
    fn parse_accepts_comma_or_dot() {
        assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
        assert_eq!("10,5".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("10.50".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("  2,30 ".parse::<Amount>().unwrap().cents(), 230);
        assert_eq!("-0,01".parse::<Amount>().unwrap().cents(), -1);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert!(matches!(
            "12,345".parse::<Amount>(),
            Err(AmountError::TooManyDecimals(_))
        ));
        assert!(matches!("1,2,3".parse::<Amount>(), Err(AmountError::Invalid(_))));
        assert!(matches!("abc".parse::<Amount>(), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn deserializes_strings_and_numbers() {
        let from_text: Amount = serde_json::from_str("\"99,90\"").unwrap();
        assert_eq!(from_text.cents(), 9990);
        let from_int: Amount = serde_json::from_str("12").unwrap();
        assert_eq!(from_int.cents(), 1200);
        let from_float: Amount = serde_json::from_str("3.25").unwrap();
        assert_eq!(from_float.cents(), 325);
        assert_eq!(serde_json::to_string(&from_float).unwrap(), "\"3,25\"");
    }
}
