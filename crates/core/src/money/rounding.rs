//! Rounding modes and the integer division primitive every rounding path uses.
//!
//! All rounding in this crate reduces to dividing one `BigInt` by another and
//! deciding, from the remainder, whether to step the truncated quotient away
//! from zero. No floating-point intermediate is ever involved.

use std::cmp::Ordering;
use std::fmt;

use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rust_decimal::RoundingStrategy;

/// How a value is rounded when precision has to be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Toward zero (truncation).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// Nearest neighbour, ties away from zero.
    HalfUp,
    /// Nearest neighbour, ties toward zero.
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour (banker's rounding).
    HalfEven,
    /// Asserts that no rounding is needed; fails otherwise.
    Unnecessary,
}

impl RoundingMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Ceiling,
        Self::Floor,
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::Unnecessary,
    ];
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Ceiling => "CEILING",
            Self::Floor => "FLOOR",
            Self::HalfUp => "HALF_UP",
            Self::HalfDown => "HALF_DOWN",
            Self::HalfEven => "HALF_EVEN",
            Self::Unnecessary => "UNNECESSARY",
        };
        f.write_str(name)
    }
}

impl TryFrom<RoundingMode> for RoundingStrategy {
    type Error = MoneyError;

    fn try_from(mode: RoundingMode) -> MoneyResult<Self> {
        match mode {
            RoundingMode::Up => Ok(Self::AwayFromZero),
            RoundingMode::Down => Ok(Self::ToZero),
            RoundingMode::Ceiling => Ok(Self::ToPositiveInfinity),
            RoundingMode::Floor => Ok(Self::ToNegativeInfinity),
            RoundingMode::HalfUp => Ok(Self::MidpointAwayFromZero),
            RoundingMode::HalfDown => Ok(Self::MidpointTowardZero),
            RoundingMode::HalfEven => Ok(Self::MidpointNearestEven),
            RoundingMode::Unnecessary => Err(MoneyError::InvalidArgument(
                "UNNECESSARY has no rust_decimal rounding strategy".to_string(),
            )),
        }
    }
}

/// Returns `10^exponent`.
pub(crate) fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

/// Divides `numerator` by `divisor`, rounding the quotient with `mode`.
///
/// # Errors
///
/// `Arithmetic` on division by zero, or when `mode` is `Unnecessary` and the
/// division leaves a remainder.
pub(crate) fn divide_rounded(
    numerator: &BigInt,
    divisor: &BigInt,
    mode: RoundingMode,
) -> MoneyResult<BigInt> {
    if divisor.is_zero() {
        return Err(MoneyError::Arithmetic("Division by zero".to_string()));
    }

    // div_rem truncates toward zero
    let (quotient, remainder) = numerator.div_rem(divisor);
    if remainder.is_zero() {
        return Ok(quotient);
    }

    let positive = numerator.is_negative() == divisor.is_negative();
    let half = (remainder.magnitude() * 2u32).cmp(divisor.magnitude());

    let away_from_zero = match mode {
        RoundingMode::Unnecessary => {
            return Err(MoneyError::Arithmetic("Rounding necessary".to_string()));
        }
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => positive,
        RoundingMode::Floor => !positive,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => match half {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => quotient.is_odd(),
        },
    };

    if !away_from_zero {
        Ok(quotient)
    } else if positive {
        Ok(quotient + BigInt::one())
    } else {
        Ok(quotient - BigInt::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn div(n: i64, d: i64, mode: RoundingMode) -> i64 {
        let q = divide_rounded(&BigInt::from(n), &BigInt::from(d), mode).unwrap();
        i64::try_from(&q).unwrap()
    }

    // Values are tenths: 55 / 10 = 5.5 and so on.
    #[rstest]
    #[case(55, RoundingMode::Up, 6)]
    #[case(55, RoundingMode::Down, 5)]
    #[case(55, RoundingMode::Ceiling, 6)]
    #[case(55, RoundingMode::Floor, 5)]
    #[case(55, RoundingMode::HalfUp, 6)]
    #[case(55, RoundingMode::HalfDown, 5)]
    #[case(55, RoundingMode::HalfEven, 6)]
    #[case(25, RoundingMode::HalfEven, 2)]
    #[case(16, RoundingMode::HalfDown, 2)]
    #[case(11, RoundingMode::HalfUp, 1)]
    #[case(-55, RoundingMode::Up, -6)]
    #[case(-55, RoundingMode::Down, -5)]
    #[case(-55, RoundingMode::Ceiling, -5)]
    #[case(-55, RoundingMode::Floor, -6)]
    #[case(-55, RoundingMode::HalfUp, -6)]
    #[case(-55, RoundingMode::HalfDown, -5)]
    #[case(-25, RoundingMode::HalfEven, -2)]
    #[case(-11, RoundingMode::Ceiling, -1)]
    #[case(-11, RoundingMode::Floor, -2)]
    fn test_rounding_table(#[case] tenths: i64, #[case] mode: RoundingMode, #[case] expected: i64) {
        assert_eq!(div(tenths, 10, mode), expected);
    }

    #[test]
    fn test_negative_divisor() {
        assert_eq!(div(55, -10, RoundingMode::Floor), -6);
        assert_eq!(div(-55, -10, RoundingMode::Floor), 5);
        assert_eq!(div(-55, -10, RoundingMode::Ceiling), 6);
    }

    #[test]
    fn test_exact_division_ignores_mode() {
        for mode in RoundingMode::ALL {
            assert_eq!(div(120, 10, mode), 12);
        }
    }

    #[test]
    fn test_unnecessary_fails_on_remainder() {
        let result = divide_rounded(&BigInt::from(10), &BigInt::from(3), RoundingMode::Unnecessary);
        assert!(matches!(result, Err(MoneyError::Arithmetic(_))));
    }

    #[test]
    fn test_division_by_zero() {
        let result = divide_rounded(&BigInt::from(10), &BigInt::zero(), RoundingMode::HalfUp);
        assert!(matches!(result, Err(MoneyError::Arithmetic(_))));
    }

    #[test]
    fn test_rust_decimal_strategy_mapping() {
        assert_eq!(
            RoundingStrategy::try_from(RoundingMode::HalfEven).unwrap(),
            RoundingStrategy::MidpointNearestEven
        );
        assert_eq!(
            RoundingStrategy::try_from(RoundingMode::Down).unwrap(),
            RoundingStrategy::ToZero
        );
        assert!(RoundingStrategy::try_from(RoundingMode::Unnecessary).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RoundingMode::HalfEven.to_string(), "HALF_EVEN");
        assert_eq!(RoundingMode::Unnecessary.to_string(), "UNNECESSARY");
    }
}
