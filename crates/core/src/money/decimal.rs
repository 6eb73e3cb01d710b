//! Arbitrary-precision decimal numbers.
//!
//! `ExactDecimal` stores an unscaled `BigInt` and a non-negative scale, so the
//! represented value is `unscaled × 10^-scale`. Arithmetic re-aligns the
//! unscaled integers and never goes through floating point.
//!
//! Equality is structural: `2.3` and `2.30` are different values of
//! `ExactDecimal` even though they compare equal with
//! [`ExactDecimal::compare_value`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;

use super::rounding::{RoundingMode, divide_rounded, pow10};

/// Exact decimal value: an unscaled integer and a non-negative scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactDecimal {
    unscaled: BigInt,
    scale: u32,
}

impl ExactDecimal {
    /// Creates a decimal from an unscaled value and a scale.
    pub fn new(unscaled: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    /// Creates a decimal from an unscaled value and a possibly negative scale.
    ///
    /// A negative scale multiplies the unscaled value and stores scale 0, so
    /// `from_parts(1, -2)` equals `new(100, 0)`.
    pub fn from_parts(unscaled: impl Into<BigInt>, scale: i32) -> Self {
        let unscaled = unscaled.into();
        if scale >= 0 {
            Self::new(unscaled, scale.unsigned_abs())
        } else {
            Self::new(unscaled * pow10(scale.unsigned_abs()), 0)
        }
    }

    /// Zero at scale 0.
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    /// One at scale 0.
    pub fn one() -> Self {
        Self::new(BigInt::one(), 0)
    }

    /// Converts a finite `f64` through its shortest decimal representation.
    ///
    /// `0.1` becomes exactly `0.1`, not the binary approximation.
    pub fn from_f64(value: f64) -> MoneyResult<Self> {
        if !value.is_finite() {
            return Err(MoneyError::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }
        format!("{value}").parse()
    }

    /// The unscaled integer.
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Returns -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        match self.unscaled.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// True if the value is zero, at any scale.
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// True if the value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.unscaled.is_positive()
    }

    /// True if the value is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Absolute value, same scale.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }

    /// Rescales to `scale`, rounding with `mode` when digits are dropped.
    ///
    /// Widening is always exact.
    pub fn with_scale(&self, scale: u32, mode: RoundingMode) -> MoneyResult<Self> {
        match scale.cmp(&self.scale) {
            Ordering::Equal => Ok(self.clone()),
            Ordering::Greater => Ok(Self::new(
                &self.unscaled * pow10(scale - self.scale),
                scale,
            )),
            Ordering::Less => {
                let divisor = pow10(self.scale - scale);
                let unscaled = divide_rounded(&self.unscaled, &divisor, mode)
                    .map_err(|err| self.rounding_error(err, scale))?;
                Ok(Self::new(unscaled, scale))
            }
        }
    }

    /// Rounds to `scale` decimal places, never widening.
    ///
    /// A negative `scale` rounds to tens, hundreds and so on; the result is
    /// then stored at scale 0 (`123.45` rounded to -1 is `120`).
    pub fn round_to(&self, scale: i32, mode: RoundingMode) -> MoneyResult<Self> {
        if scale >= 0 {
            let scale = scale.unsigned_abs();
            if scale >= self.scale {
                return Ok(self.clone());
            }
            return self.with_scale(scale, mode);
        }
        let shift = scale.unsigned_abs();
        let exponent = u64::from(self.scale) + u64::from(shift);
        let digits = u64::try_from(self.unscaled.magnitude().to_str_radix(10).len())
            .unwrap_or(u64::MAX);
        if exponent > digits {
            // |self| < 10^shift / 10, so only the direction is left to decide
            let direction = divide_rounded(&self.unscaled.signum(), &BigInt::from(10), mode)
                .map_err(|err| self.rounding_error(err, 0))?;
            if direction.is_zero() {
                return Ok(Self::zero());
            }
            return Ok(Self::new(direction * pow10(shift), 0));
        }
        let exponent = u32::try_from(exponent)
            .map_err(|_| MoneyError::Arithmetic("Scale out of range".to_string()))?;
        let rounded = divide_rounded(&self.unscaled, &pow10(exponent), mode)
            .map_err(|err| self.rounding_error(err, 0))?;
        Ok(Self::new(rounded * pow10(shift), 0))
    }

    /// Divides by `divisor`, producing a result at `scale`.
    pub fn divide(&self, divisor: &Self, scale: u32, mode: RoundingMode) -> MoneyResult<Self> {
        if divisor.is_zero() {
            return Err(MoneyError::Arithmetic("Division by zero".to_string()));
        }
        // result = (a / 10^sa) / (b / 10^sb) * 10^scale
        let exponent = i64::from(scale) + i64::from(divisor.scale) - i64::from(self.scale);
        let shift = u32::try_from(exponent.unsigned_abs())
            .map_err(|_| MoneyError::Arithmetic("Scale out of range".to_string()))?;
        let (numerator, denominator) = if exponent >= 0 {
            (&self.unscaled * pow10(shift), divisor.unscaled.clone())
        } else {
            (self.unscaled.clone(), &divisor.unscaled * pow10(shift))
        };
        let quotient = divide_rounded(&numerator, &denominator, mode).map_err(|err| match err {
            MoneyError::Arithmetic(_) if mode == RoundingMode::Unnecessary => {
                MoneyError::Arithmetic(format!(
                    "{self} / {divisor} is not exact at scale {scale}"
                ))
            }
            other => other,
        })?;
        Ok(Self::new(quotient, scale))
    }

    /// Compares numeric values, ignoring scale.
    pub fn compare_value(&self, other: &Self) -> Ordering {
        let (a, b, _) = align(self, other);
        a.cmp(&b)
    }

    /// True if both represent the same number, ignoring scale.
    pub fn value_eq(&self, other: &Self) -> bool {
        self.compare_value(other) == Ordering::Equal
    }

    /// Integer part, truncated toward zero (`-5.78` gives `-5`).
    pub fn trunc(&self) -> BigInt {
        if self.scale == 0 {
            self.unscaled.clone()
        } else {
            &self.unscaled / pow10(self.scale)
        }
    }

    /// Removes trailing zero digits from the fraction.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let ten = BigInt::from(10u32);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while scale > 0 && !unscaled.is_zero() && (&unscaled % &ten).is_zero() {
            unscaled /= &ten;
            scale -= 1;
        }
        if unscaled.is_zero() {
            scale = 0;
        }
        Self::new(unscaled, scale)
    }

    fn rounding_error(&self, err: MoneyError, scale: u32) -> MoneyError {
        match err {
            MoneyError::Arithmetic(_) => MoneyError::Arithmetic(format!(
                "Rounding {self} to scale {scale} requires a rounding mode"
            )),
            other => other,
        }
    }
}

/// Re-expresses both unscaled values at the larger of the two scales.
fn align(a: &ExactDecimal, b: &ExactDecimal) -> (BigInt, BigInt, u32) {
    match a.scale.cmp(&b.scale) {
        Ordering::Equal => (a.unscaled.clone(), b.unscaled.clone(), a.scale),
        Ordering::Less => (
            &a.unscaled * pow10(b.scale - a.scale),
            b.unscaled.clone(),
            b.scale,
        ),
        Ordering::Greater => (
            a.unscaled.clone(),
            &b.unscaled * pow10(a.scale - b.scale),
            a.scale,
        ),
    }
}

impl Add for &ExactDecimal {
    type Output = ExactDecimal;

    fn add(self, rhs: &ExactDecimal) -> ExactDecimal {
        if rhs.is_zero() && rhs.scale <= self.scale {
            return self.clone();
        }
        let (a, b, scale) = align(self, rhs);
        ExactDecimal::new(a + b, scale)
    }
}

impl Sub for &ExactDecimal {
    type Output = ExactDecimal;

    fn sub(self, rhs: &ExactDecimal) -> ExactDecimal {
        if rhs.is_zero() && rhs.scale <= self.scale {
            return self.clone();
        }
        let (a, b, scale) = align(self, rhs);
        ExactDecimal::new(a - b, scale)
    }
}

impl Mul for &ExactDecimal {
    type Output = ExactDecimal;

    fn mul(self, rhs: &ExactDecimal) -> ExactDecimal {
        ExactDecimal::new(&self.unscaled * &rhs.unscaled, self.scale + rhs.scale)
    }
}

impl Neg for &ExactDecimal {
    type Output = ExactDecimal;

    fn neg(self) -> ExactDecimal {
        ExactDecimal::new(-&self.unscaled, self.scale)
    }
}

impl Add for ExactDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Sub for ExactDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl Mul for ExactDecimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Neg for ExactDecimal {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

impl FromStr for ExactDecimal {
    type Err = MoneyError;

    /// Parses `[+-]?digits[.digits]`. At least one digit is required and
    /// exponent notation is rejected.
    fn from_str(s: &str) -> MoneyResult<Self> {
        let invalid = |reason: &str| MoneyError::InvalidAmount(format!("'{s}' {reason}"));

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        if body.contains(['e', 'E']) {
            return Err(invalid("uses exponent notation"));
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid("is not a plain decimal number"));
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("contains no digits"));
        }

        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid("has too many digits"))?;
        let digits = format!("{int_part}{frac_part}");
        let magnitude: BigInt = digits
            .parse()
            .map_err(|_| invalid("is not a plain decimal number"))?;
        let unscaled = if negative { -magnitude } else { magnitude };
        Ok(Self::new(unscaled, scale))
    }
}

impl fmt::Display for ExactDecimal {
    /// Plain notation, every stored digit shown (`0.10`, `-0.05`, `120`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        let sign = if self.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        if digits.len() <= scale {
            let zeros = "0".repeat(scale - digits.len());
            write!(f, "{sign}0.{zeros}{digits}")
        } else {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int_part}.{frac_part}")
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ExactDecimal {
                fn from(value: $t) -> Self {
                    Self::new(value, 0)
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, i128, u32, u64);

impl From<BigInt> for ExactDecimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<Decimal> for ExactDecimal {
    /// Keeps the decimal's own scale (`dec!(2.50)` stays at scale 2).
    fn from(value: Decimal) -> Self {
        Self::new(value.mantissa(), value.scale())
    }
}

impl From<&ExactDecimal> for ExactDecimal {
    fn from(value: &ExactDecimal) -> Self {
        value.clone()
    }
}

impl TryFrom<&ExactDecimal> for Decimal {
    type Error = MoneyError;

    fn try_from(value: &ExactDecimal) -> MoneyResult<Self> {
        let overflow = || MoneyError::Arithmetic(format!("{value} does not fit in a Decimal"));
        let mantissa = i128::try_from(value.unscaled()).map_err(|_| overflow())?;
        Decimal::try_from_i128_with_scale(mantissa, value.scale()).map_err(|_| overflow())
    }
}
