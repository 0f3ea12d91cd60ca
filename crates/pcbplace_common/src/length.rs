//! Board lengths with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Nanometres per micrometre.
pub const NM_PER_UM: i64 = 1_000;
/// Nanometres per millimetre.
pub const NM_PER_MM: i64 = 1_000_000;
/// Nanometres per mil (thousandth of an inch).
pub const NM_PER_MIL: i64 = 25_400;
/// Nanometres per inch.
pub const NM_PER_INCH: i64 = 25_400_000;

/// A linear board dimension stored in integer nanometres.
///
/// Supports parsing from strings like "1mm", "0.25mm", "40mil", "0.1in",
/// "250um", "1000nm" and bare numeric values (interpreted as millimetres).
/// Displays in millimetres.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(i64);

impl Length {
    /// The zero length.
    pub const ZERO: Length = Length(0);

    /// Creates a length from a value in nanometres.
    pub const fn from_nm(nm: i64) -> Self {
        Self(nm)
    }

    /// Creates a length from a value in millimetres, rounded to the nearest nanometre.
    pub fn from_mm(mm: f64) -> Self {
        Self((mm * NM_PER_MM as f64).round() as i64)
    }

    /// Creates a length from a value in mils, rounded to the nearest nanometre.
    pub fn from_mils(mils: f64) -> Self {
        Self((mils * NM_PER_MIL as f64).round() as i64)
    }

    /// Returns the length in nanometres.
    pub const fn nm(self) -> i64 {
        self.0
    }

    /// Returns the length in millimetres.
    pub fn mm(self) -> f64 {
        self.0 as f64 / NM_PER_MM as f64
    }

    /// Returns the length in mils.
    pub fn mils(self) -> f64 {
        self.0 as f64 / NM_PER_MIL as f64
    }

    /// Returns the larger of `self` and `other`.
    pub fn at_least(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Returns `true` if the length is zero or negative.
    pub fn is_non_positive(self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Length({self})")
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.mm())
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<i64> for Length {
    type Output = Length;

    fn mul(self, rhs: i64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<i64> for Length {
    type Output = Length;

    fn div(self, rhs: i64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Error type for parsing length strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLengthError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid length: '{}'", self.input)
    }
}

impl std::error::Error for ParseLengthError {}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseLengthError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let scaled = |num: &str, nm_per_unit: i64| -> Result<Length, ParseLengthError> {
            let val: f64 = num.trim().parse().map_err(|_| err())?;
            Ok(Length((val * nm_per_unit as f64).round() as i64))
        };

        if let Some(num) = lower.strip_suffix("mm") {
            return scaled(num, NM_PER_MM);
        }
        if let Some(num) = lower.strip_suffix("um") {
            return scaled(num, NM_PER_UM);
        }
        if let Some(num) = lower.strip_suffix("nm") {
            return scaled(num, 1);
        }
        if let Some(num) = lower.strip_suffix("mil") {
            return scaled(num, NM_PER_MIL);
        }
        if let Some(num) = lower.strip_suffix("in") {
            return scaled(num, NM_PER_INCH);
        }

        // Bare number: millimetres
        scaled(&lower, NM_PER_MM)
    }
}
