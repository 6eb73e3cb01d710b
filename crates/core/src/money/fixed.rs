//! Fixed-scale monetary amounts.
//!
//! `Money` wraps a [`BigMoney`] and pins its scale, normally to the
//! currency's decimal places. Every operation delegates to `BigMoney` and
//! then brings the result back to the fixed scale. Operations without a
//! [`RoundingMode`] refuse to round and report `Arithmetic` instead.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::BigInt;
use rust_decimal::Decimal;

use super::big_money::{BigMoney, resolve};
use super::decimal::ExactDecimal;
use super::provider::BigMoneyProvider;
use super::rounding::{RoundingMode, pow10};
use crate::currency::{CurrencyRegistry, CurrencyUnit};

/// An amount of money whose scale never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    money: BigMoney,
}

impl Money {
    /// Brings `money` to `scale` and wraps it.
    fn fixed(money: BigMoney, scale: u32, mode: RoundingMode) -> MoneyResult<Self> {
        Ok(Self {
            money: money.with_scale_rounded(scale, mode)?,
        })
    }

    /// Same currency and scale as `self`, new value.
    fn keep_scale(&self, money: BigMoney, mode: RoundingMode) -> MoneyResult<Self> {
        Self::fixed(money, self.scale(), mode)
    }

    /// Creates an amount at the currency scale.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if `amount` has more digits than the currency allows.
    pub fn of(currency: CurrencyUnit, amount: impl Into<ExactDecimal>) -> MoneyResult<Self> {
        Self::of_rounded(currency, amount, RoundingMode::Unnecessary)
    }

    /// Creates an amount at the currency scale, rounding with `mode`.
    pub fn of_rounded(
        currency: CurrencyUnit,
        amount: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let scale = currency.decimal_places();
        Self::of_scale_rounded(currency, amount, scale, mode)
    }

    /// Creates an amount at a custom scale.
    pub fn of_scale(
        currency: CurrencyUnit,
        amount: impl Into<ExactDecimal>,
        scale: u32,
    ) -> MoneyResult<Self> {
        Self::of_scale_rounded(currency, amount, scale, RoundingMode::Unnecessary)
    }

    /// Creates an amount at a custom scale, rounding with `mode`.
    pub fn of_scale_rounded(
        currency: CurrencyUnit,
        amount: impl Into<ExactDecimal>,
        scale: u32,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        Self::fixed(BigMoney::of(currency, amount), scale, mode)
    }

    /// Whole major units at the currency scale.
    pub fn of_major(currency: CurrencyUnit, amount: i64) -> Self {
        let scale = currency.decimal_places();
        let amount = ExactDecimal::new(BigInt::from(amount) * pow10(scale), scale);
        Self {
            money: BigMoney::of(currency, amount),
        }
    }

    /// Minor units at the currency scale.
    pub fn of_minor(currency: CurrencyUnit, amount: i64) -> Self {
        Self {
            money: BigMoney::of_minor(currency, amount),
        }
    }

    /// Zero at the currency scale.
    pub fn zero(currency: CurrencyUnit) -> Self {
        let scale = currency.decimal_places();
        Self::zero_with_scale(currency, scale)
    }

    /// Zero at a custom scale.
    pub fn zero_with_scale(currency: CurrencyUnit, scale: u32) -> Self {
        Self {
            money: BigMoney::zero_with_scale(currency, scale),
        }
    }

    /// Converts to the currency scale without rounding.
    ///
    /// # Errors
    ///
    /// `NullValue` if `money` holds nothing, `Arithmetic` if digits would be
    /// dropped.
    pub fn from_big_money(money: impl BigMoneyProvider) -> MoneyResult<Self> {
        Self::from_big_money_rounded(money, RoundingMode::Unnecessary)
    }

    /// Converts to the currency scale, rounding with `mode`.
    pub fn from_big_money_rounded(
        money: impl BigMoneyProvider,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let money = resolve(money)?;
        let scale = money.currency().decimal_places();
        Self::fixed(money, scale, mode)
    }

    /// Parses `CODE[ ]*AMOUNT` at the currency scale.
    ///
    /// `"GBP 2.4"` gives `GBP 2.40`; `"GBP 2.345"` fails.
    pub fn parse(text: &str, registry: &CurrencyRegistry) -> MoneyResult<Self> {
        Self::from_big_money(BigMoney::parse(text, registry)?)
    }

    /// Sums a non-empty sequence at the first element's currency scale.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `monies` is empty, `NullValue` for an element
    /// without a value, `CurrencyMismatch` at the first foreign currency,
    /// `Arithmetic` if an element does not fit the scale.
    pub fn total<I>(monies: I) -> MoneyResult<Self>
    where
        I: IntoIterator,
        I::Item: BigMoneyProvider,
    {
        let mut iter = monies.into_iter();
        let first = iter.next().ok_or_else(|| {
            MoneyError::InvalidArgument("Money iterator must not be empty".to_string())
        })?;
        Self::from_big_money(first)?.plus_all(iter)
    }

    /// Sums a possibly empty sequence. Empty gives zero at the currency scale.
    pub fn total_in<I>(currency: CurrencyUnit, monies: I) -> MoneyResult<Self>
    where
        I: IntoIterator,
        I::Item: BigMoneyProvider,
    {
        Self::zero(currency).plus_all(monies)
    }

    /// The currency.
    pub fn currency(&self) -> &CurrencyUnit {
        self.money.currency()
    }

    /// The exact amount, always at [`scale`](Self::scale).
    pub fn amount(&self) -> &ExactDecimal {
        self.money.amount()
    }

    /// The fixed scale.
    pub fn scale(&self) -> u32 {
        self.money.scale()
    }

    /// The amount without its decimal point.
    pub fn unscaled_amount(&self) -> &BigInt {
        self.money.unscaled_amount()
    }

    /// True if the fixed scale is the currency's decimal places.
    pub fn is_currency_scale(&self) -> bool {
        self.money.is_currency_scale()
    }

    /// True if `other` is in the same currency.
    pub fn is_same_currency(&self, other: impl BigMoneyProvider) -> bool {
        self.money.is_same_currency(other)
    }

    /// Borrows the underlying `BigMoney`.
    pub fn as_big_money(&self) -> &BigMoney {
        &self.money
    }

    /// Unwraps into a `BigMoney` at the same scale.
    pub fn into_big_money(self) -> BigMoney {
        self.money
    }

    /// Whole major units, truncated toward zero.
    pub fn amount_major(&self) -> ExactDecimal {
        self.money.amount_major()
    }

    /// Whole major units as an `i64`.
    pub fn amount_major_i64(&self) -> MoneyResult<i64> {
        self.money.amount_major_i64()
    }

    /// Whole major units as an `i32`.
    pub fn amount_major_i32(&self) -> MoneyResult<i32> {
        self.money.amount_major_i32()
    }

    /// Amount in minor units, truncated to the currency scale.
    pub fn amount_minor(&self) -> ExactDecimal {
        self.money.amount_minor()
    }

    /// Amount in minor units as an `i64`.
    pub fn amount_minor_i64(&self) -> MoneyResult<i64> {
        self.money.amount_minor_i64()
    }

    /// Amount in minor units as an `i32`.
    pub fn amount_minor_i32(&self) -> MoneyResult<i32> {
        self.money.amount_minor_i32()
    }

    /// Minor units beyond the whole major units, keeping the sign.
    pub fn minor_part(&self) -> MoneyResult<i32> {
        self.money.minor_part()
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.money.is_zero()
    }

    /// True if the amount is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.money.is_positive()
    }

    /// True if the amount is zero or greater.
    pub fn is_positive_or_zero(&self) -> bool {
        self.money.is_positive_or_zero()
    }

    /// True if the amount is less than zero.
    pub fn is_negative(&self) -> bool {
        self.money.is_negative()
    }

    /// True if the amount is zero or less.
    pub fn is_negative_or_zero(&self) -> bool {
        self.money.is_negative_or_zero()
    }

    /// The amount as a `rust_decimal::Decimal`.
    pub fn to_decimal(&self) -> MoneyResult<Decimal> {
        self.money.to_decimal()
    }

    /// Same amount in another currency.
    ///
    /// A currency-scaled value moves to the new currency's scale; a value at
    /// a custom scale keeps it.
    pub fn with_currency(&self, currency: CurrencyUnit) -> MoneyResult<Self> {
        self.with_currency_rounded(currency, RoundingMode::Unnecessary)
    }

    /// Same amount in another currency, rounding with `mode` if the target
    /// scale is narrower.
    pub fn with_currency_rounded(
        &self,
        currency: CurrencyUnit,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let scale = self.target_scale(&currency);
        Self::fixed(self.money.with_currency(currency), scale, mode)
    }

    /// Same currency, new amount at the fixed scale.
    pub fn with_amount(&self, amount: impl Into<ExactDecimal>) -> MoneyResult<Self> {
        self.with_amount_rounded(amount, RoundingMode::Unnecessary)
    }

    /// Same currency, new amount, rounded to the fixed scale with `mode`.
    pub fn with_amount_rounded(
        &self,
        amount: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.keep_scale(self.money.with_amount(amount), mode)
    }

    fn target_scale(&self, currency: &CurrencyUnit) -> u32 {
        if self.is_currency_scale() {
            currency.decimal_places()
        } else {
            self.scale()
        }
    }

    /// Adds `other`.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` if the currencies differ, `Arithmetic` if the sum
    /// does not fit the fixed scale.
    pub fn plus(&self, other: impl BigMoneyProvider) -> MoneyResult<Self> {
        self.plus_rounded(other, RoundingMode::Unnecessary)
    }

    /// Adds `other`, rounding the sum to the fixed scale.
    pub fn plus_rounded(
        &self,
        other: impl BigMoneyProvider,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.keep_scale(self.money.plus(other)?, mode)
    }

    /// Adds every element of `monies`, exactly.
    pub fn plus_all<I>(&self, monies: I) -> MoneyResult<Self>
    where
        I: IntoIterator,
        I::Item: BigMoneyProvider,
    {
        self.keep_scale(self.money.plus_all(monies)?, RoundingMode::Unnecessary)
    }

    /// Adds a plain amount.
    pub fn plus_amount(&self, amount: impl Into<ExactDecimal>) -> MoneyResult<Self> {
        self.plus_amount_rounded(amount, RoundingMode::Unnecessary)
    }

    /// Adds a plain amount, rounding the sum to the fixed scale.
    pub fn plus_amount_rounded(
        &self,
        amount: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.keep_scale(self.money.plus_amount(amount), mode)
    }

    /// Adds whole major units. Always exact.
    #[must_use]
    pub fn plus_major(&self, amount: i64) -> Self {
        Self {
            money: self.money.plus_major(amount),
        }
    }

    /// Adds minor units.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if the fixed scale is narrower than the currency scale
    /// and the units do not fit it.
    pub fn plus_minor(&self, amount: i64) -> MoneyResult<Self> {
        self.keep_scale(self.money.plus_minor(amount), RoundingMode::Unnecessary)
    }

    /// Subtracts `other`.
    pub fn minus(&self, other: impl BigMoneyProvider) -> MoneyResult<Self> {
        self.minus_rounded(other, RoundingMode::Unnecessary)
    }

    /// Subtracts `other`, rounding the difference to the fixed scale.
    pub fn minus_rounded(
        &self,
        other: impl BigMoneyProvider,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.keep_scale(self.money.minus(other)?, mode)
    }

    /// Subtracts a plain amount.
    pub fn minus_amount(&self, amount: impl Into<ExactDecimal>) -> MoneyResult<Self> {
        self.minus_amount_rounded(amount, RoundingMode::Unnecessary)
    }

    /// Subtracts a plain amount, rounding the difference to the fixed scale.
    pub fn minus_amount_rounded(
        &self,
        amount: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.keep_scale(self.money.minus_amount(amount), mode)
    }

    /// Subtracts whole major units. Always exact.
    #[must_use]
    pub fn minus_major(&self, amount: i64) -> Self {
        Self {
            money: self.money.minus_major(amount),
        }
    }

    /// Subtracts minor units.
    pub fn minus_minor(&self, amount: i64) -> MoneyResult<Self> {
        self.keep_scale(self.money.minus_minor(amount), RoundingMode::Unnecessary)
    }

    /// Multiplies, rounding the product to the fixed scale.
    pub fn multiplied_by(
        &self,
        factor: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.money.multiply_retain_scale(factor, mode).map(|money| Self { money })
    }

    /// Multiplies by an integer. Always exact.
    #[must_use]
    pub fn multiplied_by_i64(&self, factor: i64) -> Self {
        Self {
            money: self.money.multiplied_by(factor),
        }
    }

    /// Divides, rounding the quotient to the fixed scale.
    ///
    /// # Errors
    ///
    /// `Arithmetic` on division by zero, or if `mode` is `Unnecessary` and
    /// the quotient is inexact.
    pub fn divided_by(
        &self,
        divisor: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.money.divided_by(divisor, mode).map(|money| Self { money })
    }

    /// Divides by an integer, rounding with `mode`.
    pub fn divided_by_i64(&self, divisor: i64, mode: RoundingMode) -> MoneyResult<Self> {
        self.divided_by(divisor, mode)
    }

    /// Opposite sign.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            money: self.money.negated(),
        }
    }

    /// Sign removed.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            money: self.money.abs(),
        }
    }

    /// Rounds to `scale` places while keeping the fixed scale
    /// (`GBP 2.34` rounded to 1 with `HalfUp` is `GBP 2.30`).
    pub fn rounded(&self, scale: i32, mode: RoundingMode) -> MoneyResult<Self> {
        self.keep_scale(self.money.rounded(scale, mode)?, RoundingMode::Unnecessary)
    }

    /// Converts to `currency` by multiplying with `rate`.
    ///
    /// A currency-scaled value lands on the target currency's scale; a
    /// custom-scaled value keeps its scale. `mode` rounds the product there.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a negative rate or a same-currency conversion
    /// at a rate other than one.
    pub fn converted_to(
        &self,
        currency: CurrencyUnit,
        rate: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let scale = self.target_scale(&currency);
        Self::fixed(self.money.converted_to(currency, rate)?, scale, mode)
    }

    /// Orders by value.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` if the currencies differ.
    pub fn compare_to(&self, other: impl BigMoneyProvider) -> MoneyResult<Ordering> {
        self.money.compare_to(other)
    }

    /// True if the values are equal, ignoring scale.
    pub fn is_equal(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        self.money.is_equal(other)
    }

    /// True if this is greater than `other`.
    pub fn is_greater_than(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        self.money.is_greater_than(other)
    }

    /// True if this is greater than or equal to `other`.
    pub fn is_greater_than_or_equal(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        self.money.is_greater_than_or_equal(other)
    }

    /// True if this is less than `other`.
    pub fn is_less_than(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        self.money.is_less_than(other)
    }

    /// True if this is less than or equal to `other`.
    pub fn is_less_than_or_equal(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        self.money.is_less_than_or_equal(other)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.money, f)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses against [`CurrencyRegistry::global`].
    fn from_str(s: &str) -> MoneyResult<Self> {
        Self::parse(s, CurrencyRegistry::global())
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}

impl TryFrom<BigMoney> for Money {
    type Error = MoneyError;

    fn try_from(money: BigMoney) -> MoneyResult<Self> {
        Self::from_big_money(money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn unit(code: &str) -> CurrencyUnit {
        CurrencyRegistry::global().lookup_by_code(code).unwrap()
    }

    fn money(text: &str) -> Money {
        text.parse().unwrap()
    }

    #[test]
    fn test_of_uses_currency_scale() {
        assert_eq!(Money::of(unit("GBP"), dec!(2.3)).unwrap().to_string(), "GBP 2.30");
        assert_eq!(Money::of(unit("JPY"), 423).unwrap().to_string(), "JPY 423");
        assert_eq!(Money::of(unit("BHD"), dec!(1.5)).unwrap().to_string(), "BHD 1.500");
        assert!(matches!(
            Money::of(unit("GBP"), dec!(2.345)),
            Err(MoneyError::Arithmetic(_))
        ));
        assert_eq!(
            Money::of_rounded(unit("GBP"), dec!(2.345), RoundingMode::HalfUp)
                .unwrap()
                .to_string(),
            "GBP 2.35"
        );
    }

    #[test]
    fn test_custom_scale() {
        let value = Money::of_scale(unit("GBP"), dec!(2.3456), 4).unwrap();
        assert_eq!(value.scale(), 4);
        assert!(!value.is_currency_scale());
        assert_eq!(value.plus(money("GBP 1.00")).unwrap().to_string(), "GBP 3.3456");
    }

    #[test]
    fn test_of_major_minor_and_zero() {
        assert_eq!(Money::of_major(unit("GBP"), 12).to_string(), "GBP 12.00");
        assert_eq!(Money::of_minor(unit("GBP"), -1234).to_string(), "GBP -12.34");
        assert_eq!(Money::zero(unit("BHD")).to_string(), "BHD 0.000");
        assert_eq!(Money::zero_with_scale(unit("GBP"), 4).to_string(), "GBP 0.0000");
        assert_eq!(Money::of_major(unit("XAU"), 3).to_string(), "XAU 3");
    }

    #[test]
    fn test_parse() {
        assert_eq!(money("GBP 2.4").to_string(), "GBP 2.40");
        assert!(matches!(
            "GBP 2.345".parse::<Money>(),
            Err(MoneyError::Arithmetic(_))
        ));
        assert!(matches!(
            "XYZ 1".parse::<Money>(),
            Err(MoneyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_from_big_money() {
        let big: BigMoney = "GBP 2.3".parse().unwrap();
        assert_eq!(Money::from_big_money(&big).unwrap().to_string(), "GBP 2.30");
        let big: BigMoney = "GBP 2.345".parse().unwrap();
        assert!(Money::try_from(big.clone()).is_err());
        assert_eq!(
            Money::from_big_money_rounded(&big, RoundingMode::Down).unwrap().to_string(),
            "GBP 2.34"
        );
        assert!(matches!(
            Money::from_big_money(None::<BigMoney>),
            Err(MoneyError::NullValue(_))
        ));
    }

    #[test]
    fn test_plus_requires_fit() {
        let value = money("GBP 2.33");
        assert_eq!(value.plus(money("GBP 1.23")).unwrap(), money("GBP 3.56"));
        let precise: BigMoney = "GBP 0.005".parse().unwrap();
        assert!(matches!(value.plus(&precise), Err(MoneyError::Arithmetic(_))));
        assert_eq!(
            value.plus_rounded(&precise, RoundingMode::HalfEven).unwrap(),
            money("GBP 2.34")
        );
        assert!(matches!(
            value.plus(money("EUR 1")),
            Err(MoneyError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_plus_minus_amounts() {
        let value = money("GBP 2.33");
        assert_eq!(value.plus_amount(dec!(0.1)).unwrap(), money("GBP 2.43"));
        assert!(value.minus_amount(dec!(0.001)).is_err());
        assert_eq!(
            value.minus_amount_rounded(dec!(0.001), RoundingMode::Floor).unwrap(),
            money("GBP 2.32")
        );
        assert_eq!(value.plus_major(2), money("GBP 4.33"));
        assert_eq!(value.minus_major(3), money("GBP -0.67"));
        assert_eq!(value.plus_minor(7).unwrap(), money("GBP 2.40"));
        assert_eq!(value.minus_minor(33).unwrap(), money("GBP 2.00"));
    }

    #[test]
    fn test_plus_minor_at_narrow_scale() {
        let coarse = Money::of_scale(unit("GBP"), 5, 0).unwrap();
        assert!(matches!(coarse.plus_minor(1), Err(MoneyError::Arithmetic(_))));
        assert_eq!(coarse.plus_minor(100).unwrap().to_string(), "GBP 6");
    }

    #[test]
    fn test_multiply_and_divide() {
        let value = money("GBP 2.34");
        assert_eq!(
            value.multiplied_by(dec!(2.5), RoundingMode::Down).unwrap(),
            money("GBP 5.85")
        );
        assert_eq!(
            value.multiplied_by(dec!(1.005), RoundingMode::HalfUp).unwrap(),
            money("GBP 2.35")
        );
        assert_eq!(value.multiplied_by_i64(3), money("GBP 7.02"));
        assert_eq!(
            money("GBP 10.00").divided_by_i64(3, RoundingMode::HalfUp).unwrap(),
            money("GBP 3.33")
        );
        assert!(matches!(
            money("GBP 10.00").divided_by_i64(3, RoundingMode::Unnecessary),
            Err(MoneyError::Arithmetic(_))
        ));
        assert!(matches!(
            value.divided_by(dec!(0), RoundingMode::HalfUp),
            Err(MoneyError::Arithmetic(_))
        ));
    }

    #[rstest]
    #[case("GBP 2.34", 1, RoundingMode::HalfUp, "GBP 2.30")]
    #[case("GBP 2.35", 1, RoundingMode::HalfUp, "GBP 2.40")]
    #[case("GBP 2.34", 0, RoundingMode::Ceiling, "GBP 3.00")]
    #[case("GBP 123.45", -1, RoundingMode::HalfUp, "GBP 120.00")]
    #[case("GBP 2.34", 2, RoundingMode::Unnecessary, "GBP 2.34")]
    fn test_rounded_keeps_scale(
        #[case] input: &str,
        #[case] scale: i32,
        #[case] mode: RoundingMode,
        #[case] expected: &str,
    ) {
        let rounded = money(input).rounded(scale, mode).unwrap();
        assert_eq!(rounded.to_string(), expected);
        assert_eq!(rounded.scale(), 2);
    }

    #[test]
    fn test_converted_to() {
        let value = money("GBP 2.34");
        assert_eq!(
            value
                .converted_to(unit("EUR"), dec!(2.5), RoundingMode::Down)
                .unwrap()
                .to_string(),
            "EUR 5.85"
        );
        assert_eq!(
            value
                .converted_to(unit("JPY"), dec!(180.3), RoundingMode::HalfEven)
                .unwrap()
                .to_string(),
            "JPY 422"
        );
        assert!(matches!(
            value.converted_to(unit("GBP"), dec!(2.5), RoundingMode::Down),
            Err(MoneyError::InvalidArgument(_))
        ));
        assert!(matches!(
            value.converted_to(unit("EUR"), dec!(-2.5), RoundingMode::Down),
            Err(MoneyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_converted_to_keeps_custom_scale() {
        let value = Money::of_scale(unit("GBP"), dec!(2.3456), 4).unwrap();
        let converted = value
            .converted_to(unit("JPY"), dec!(2), RoundingMode::Unnecessary)
            .unwrap();
        assert_eq!(converted.to_string(), "JPY 4.6912");
    }

    #[test]
    fn test_with_currency() {
        assert_eq!(
            money("GBP 2.00").with_currency(unit("JPY")).unwrap().to_string(),
            "JPY 2"
        );
        assert!(money("GBP 2.34").with_currency(unit("JPY")).is_err());
        assert_eq!(
            money("GBP 2.34").with_currency(unit("BHD")).unwrap().to_string(),
            "BHD 2.340"
        );
    }

    #[test]
    fn test_with_amount() {
        assert_eq!(money("GBP 1").with_amount(dec!(7.1)).unwrap(), money("GBP 7.10"));
        assert!(money("GBP 1").with_amount(dec!(7.123)).is_err());
    }

    #[test]
    fn test_total() {
        let monies = vec![money("GBP 1.20"), money("GBP 2.34")];
        assert_eq!(Money::total(&monies).unwrap(), money("GBP 3.54"));
        assert_eq!(
            Money::total_in(unit("GBP"), Vec::<Money>::new()).unwrap().to_string(),
            "GBP 0.00"
        );
        assert!(matches!(
            Money::total(Vec::<Money>::new()),
            Err(MoneyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_accessors() {
        let value = money("GBP -5.78");
        assert_eq!(value.amount_major_i64().unwrap(), -5);
        assert_eq!(value.amount_minor_i32().unwrap(), -578);
        assert_eq!(value.minor_part().unwrap(), -78);
        assert!(value.is_negative() && value.is_negative_or_zero());
        assert_eq!(value.to_decimal().unwrap(), dec!(-5.78));
        assert_eq!(value.abs(), money("GBP 5.78"));
        assert_eq!(-value, money("GBP 5.78"));
    }

    #[test]
    fn test_comparisons() {
        let value = money("GBP 2.34");
        let wide: BigMoney = "GBP 2.340".parse().unwrap();
        assert!(value.is_equal(&wide).unwrap());
        assert!(value.is_greater_than(money("GBP 2.33")).unwrap());
        assert!(value.is_less_than_or_equal(money("GBP 2.34")).unwrap());
        assert!(value.compare_to(money("JPY 2")).is_err());
    }
}
