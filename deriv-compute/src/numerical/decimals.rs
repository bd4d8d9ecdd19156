use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How many digits after the decimal point results are rounded to.
///
/// Precisions are ordered by their integer form, so [`Decimals::Unrounded`] (`-1`) is the least.
/// Combining two functions keeps the [`min`](Ord::min) of their precisions: the smaller digit
/// count, or [`Decimals::Unrounded`] if either of them is unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Decimals {
    /// Results are not rounded. Written as `-1` where a precision is given as an integer.
    #[default]
    Unrounded,

    /// Results are rounded to this many digits after the decimal point.
    Digits(u32),
}

impl Decimals {
    /// Rounds `value` to this precision, with ties rounded to even.
    ///
    /// Values too large to be scaled to the requested precision are returned as is.
    pub fn round(self, value: f64) -> f64 {
        let Self::Digits(digits) = self else {
            return value;
        };

        let factor = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        scaled.round_ties_even() / factor
    }
}

impl TryFrom<i32> for Decimals {
    type Error = ConfigError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Unrounded),
            0.. => Ok(Self::Digits(value.unsigned_abs())),
            _ => Err(ConfigError::InvalidDecimals(value)),
        }
    }
}

impl From<Decimals> for i32 {
    fn from(value: Decimals) -> Self {
        match value {
            Decimals::Unrounded => -1,
            Decimals::Digits(digits) => i32::try_from(digits).unwrap_or(i32::MAX),
        }
    }
}

impl fmt::Display for Decimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrounded => write!(f, "unrounded"),
            Self::Digits(digits) => write!(f, "{} digits", digits),
        }
    }
}

/// A function was configured with a value it cannot use.
///
/// These are mistakes of the caller, not of the user typing the expression, and are kept apart
/// from parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A precision below `-1`.
    InvalidDecimals(i32),

    /// A variable that is not a letter.
    InvalidVariable(char),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDecimals(value) => {
                write!(f, "invalid precision `{}`: expected -1 (unrounded) or a digit count", value)
            },
            Self::InvalidVariable(c) => write!(f, "invalid variable `{}`: expected a letter", c),
        }
    }
}

impl std::error::Error for ConfigError {}
