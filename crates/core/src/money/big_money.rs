//! Arbitrary-scale monetary amounts.
//!
//! A `BigMoney` pairs a [`CurrencyUnit`] with an [`ExactDecimal`] whose scale
//! is unconstrained. Arithmetic is exact unless a method takes a
//! [`RoundingMode`], in which case the result is rounded to the stated scale.
//!
//! Equality is structural: `GBP 2.3` and `GBP 2.30` are not `==`, but
//! [`BigMoney::is_equal`] treats them as the same amount.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::BigInt;
use rust_decimal::Decimal;

use super::decimal::ExactDecimal;
use super::fixed::Money;
use super::provider::BigMoneyProvider;
use super::rounding::{RoundingMode, pow10};
use crate::currency::{CurrencyRegistry, CurrencyUnit};

/// An amount of money in one currency at any scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigMoney {
    currency: CurrencyUnit,
    amount: ExactDecimal,
}

pub(crate) fn resolve(provider: impl BigMoneyProvider) -> MoneyResult<BigMoney> {
    provider
        .to_big_money()
        .ok_or_else(|| MoneyError::NullValue("Money provider returned no value".to_string()))
}

impl BigMoney {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates an amount at the scale the value already has.
    pub fn of(currency: CurrencyUnit, amount: impl Into<ExactDecimal>) -> Self {
        Self {
            currency,
            amount: amount.into(),
        }
    }

    /// Creates an amount at `scale`.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if `amount` has digits beyond `scale`.
    pub fn of_scale(
        currency: CurrencyUnit,
        amount: impl Into<ExactDecimal>,
        scale: u32,
    ) -> MoneyResult<Self> {
        Self::of_scale_rounded(currency, amount, scale, RoundingMode::Unnecessary)
    }

    /// Creates an amount at `scale`, rounding with `mode`.
    pub fn of_scale_rounded(
        currency: CurrencyUnit,
        amount: impl Into<ExactDecimal>,
        scale: u32,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let amount: ExactDecimal = amount.into();
        let amount = amount.with_scale(scale, mode)?;
        Ok(Self { currency, amount })
    }

    /// Creates an amount from an unscaled value and a scale.
    ///
    /// A negative scale is normalized, so `of_unscaled(GBP, 1, -2)` equals
    /// `of_unscaled(GBP, 100, 0)`.
    pub fn of_unscaled(currency: CurrencyUnit, unscaled: impl Into<BigInt>, scale: i32) -> Self {
        Self::of(currency, ExactDecimal::from_parts(unscaled, scale))
    }

    /// Creates an amount from the shortest decimal form of a float.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` if `amount` is NaN or infinite.
    pub fn of_f64(currency: CurrencyUnit, amount: f64) -> MoneyResult<Self> {
        Ok(Self::of(currency, ExactDecimal::from_f64(amount)?))
    }

    /// Creates a whole amount in major units, at scale 0.
    pub fn of_major(currency: CurrencyUnit, amount: i64) -> Self {
        Self::of(currency, amount)
    }

    /// Creates an amount from minor units, at the currency scale.
    pub fn of_minor(currency: CurrencyUnit, amount: i64) -> Self {
        let scale = currency.decimal_places();
        Self::of(currency, ExactDecimal::new(amount, scale))
    }

    /// Zero at scale 0.
    pub fn zero(currency: CurrencyUnit) -> Self {
        Self::of(currency, ExactDecimal::zero())
    }

    /// Zero at `scale`.
    pub fn zero_with_scale(currency: CurrencyUnit, scale: u32) -> Self {
        Self::of(currency, ExactDecimal::new(0, scale))
    }

    /// Resolves a provider into a `BigMoney`.
    ///
    /// # Errors
    ///
    /// `NullValue` if the provider holds nothing.
    pub fn from_provider(provider: impl BigMoneyProvider) -> MoneyResult<Self> {
        resolve(provider)
    }

    /// Parses `CODE[ ]*AMOUNT`, e.g. `"GBP 2.43"` or `"JPY423"`.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` if the text is shorter than four characters or the
    /// amount is malformed, `UnknownCurrency` if the first three characters
    /// are not a code registered in `registry`.
    pub fn parse(text: &str, registry: &CurrencyRegistry) -> MoneyResult<Self> {
        let malformed = || MoneyError::InvalidAmount(format!("Money '{text}' cannot be parsed"));
        let (split, _) = text.char_indices().nth(3).ok_or_else(malformed)?;
        let (code, rest) = text.split_at(split);
        let amount: ExactDecimal = rest
            .trim_start_matches(' ')
            .parse()
            .map_err(|_| malformed())?;
        let currency = registry.lookup_by_code(code)?;
        Ok(Self::of(currency, amount))
    }

    /// Sums a non-empty sequence. The first element fixes the currency.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `monies` is empty, `NullValue` for an element
    /// without a value, `CurrencyMismatch` at the first foreign currency.
    pub fn total<I>(monies: I) -> MoneyResult<Self>
    where
        I: IntoIterator,
        I::Item: BigMoneyProvider,
    {
        let mut iter = monies.into_iter();
        let first = iter.next().ok_or_else(|| {
            MoneyError::InvalidArgument("Money iterator must not be empty".to_string())
        })?;
        resolve(first)?.plus_all(iter)
    }

    /// Sums a possibly empty sequence in `currency`. Empty gives zero.
    pub fn total_in<I>(currency: CurrencyUnit, monies: I) -> MoneyResult<Self>
    where
        I: IntoIterator,
        I::Item: BigMoneyProvider,
    {
        Self::zero(currency).plus_all(monies)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The currency.
    pub fn currency(&self) -> &CurrencyUnit {
        &self.currency
    }

    /// The exact amount.
    pub fn amount(&self) -> &ExactDecimal {
        &self.amount
    }

    /// Digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.amount.scale()
    }

    /// The amount without its decimal point (`2.34` gives `234`).
    pub fn unscaled_amount(&self) -> &BigInt {
        self.amount.unscaled()
    }

    /// True if the scale equals the currency's decimal places.
    pub fn is_currency_scale(&self) -> bool {
        self.scale() == self.currency.decimal_places()
    }

    /// True if `other` is in the same currency. False if it holds nothing.
    pub fn is_same_currency(&self, other: impl BigMoneyProvider) -> bool {
        other
            .to_big_money()
            .is_some_and(|other| other.currency == self.currency)
    }

    /// Whole major units, truncated toward zero (`-5.78` gives `-5`).
    pub fn amount_major(&self) -> ExactDecimal {
        ExactDecimal::from(self.amount.trunc())
    }

    /// [`amount_major`](Self::amount_major) as an `i64`.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if the value does not fit.
    pub fn amount_major_i64(&self) -> MoneyResult<i64> {
        narrow(&self.amount.trunc(), "major", self)
    }

    /// [`amount_major`](Self::amount_major) as an `i32`.
    pub fn amount_major_i32(&self) -> MoneyResult<i32> {
        narrow(&self.amount.trunc(), "major", self)
    }

    /// The amount in minor units, truncated to the currency scale
    /// (`GBP 2.345` gives `234`).
    pub fn amount_minor(&self) -> ExactDecimal {
        ExactDecimal::from(self.minor_units())
    }

    /// [`amount_minor`](Self::amount_minor) as an `i64`.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if the value does not fit.
    pub fn amount_minor_i64(&self) -> MoneyResult<i64> {
        narrow(&self.minor_units(), "minor", self)
    }

    /// [`amount_minor`](Self::amount_minor) as an `i32`.
    pub fn amount_minor_i32(&self) -> MoneyResult<i32> {
        narrow(&self.minor_units(), "minor", self)
    }

    /// The minor units beyond the whole major units, keeping the sign
    /// (`GBP -5.78` gives `-78`).
    pub fn minor_part(&self) -> MoneyResult<i32> {
        let part = self.minor_units() % pow10(self.currency.decimal_places());
        narrow(&part, "minor", self)
    }

    fn minor_units(&self) -> BigInt {
        let places = self.currency.decimal_places();
        let scale = self.scale();
        if scale >= places {
            // BigInt division truncates toward zero
            self.amount.unscaled() / pow10(scale - places)
        } else {
            self.amount.unscaled() * pow10(places - scale)
        }
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// True if the amount is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    /// True if the amount is zero or greater.
    pub fn is_positive_or_zero(&self) -> bool {
        !self.amount.is_negative()
    }

    /// True if the amount is less than zero.
    pub fn is_negative(&self) -> bool {
        self.amount.is_negative()
    }

    /// True if the amount is zero or less.
    pub fn is_negative_or_zero(&self) -> bool {
        !self.amount.is_positive()
    }

    /// The amount as a `rust_decimal::Decimal`.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if it exceeds `Decimal`'s 96-bit mantissa or 28-digit scale.
    pub fn to_decimal(&self) -> MoneyResult<Decimal> {
        Decimal::try_from(&self.amount)
    }

    /// Converts to a [`Money`] at the currency scale.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if that would drop digits.
    pub fn to_money(&self) -> MoneyResult<Money> {
        Money::from_big_money(self)
    }

    /// Converts to a [`Money`] at the currency scale, rounding with `mode`.
    pub fn to_money_rounded(&self, mode: RoundingMode) -> MoneyResult<Money> {
        Money::from_big_money_rounded(self, mode)
    }

    // ========================================================================
    // Scale and currency
    // ========================================================================

    /// Same amount in another currency, scale untouched.
    #[must_use]
    pub fn with_currency(&self, currency: CurrencyUnit) -> Self {
        Self::of(currency, self.amount.clone())
    }

    /// Same currency, different amount.
    #[must_use]
    pub fn with_amount(&self, amount: impl Into<ExactDecimal>) -> Self {
        Self::of(self.currency.clone(), amount)
    }

    /// Rescales without rounding.
    ///
    /// # Errors
    ///
    /// `Arithmetic` if digits would be dropped.
    pub fn with_scale(&self, scale: u32) -> MoneyResult<Self> {
        self.with_scale_rounded(scale, RoundingMode::Unnecessary)
    }

    /// Rescales, rounding with `mode`. Widening is always exact.
    pub fn with_scale_rounded(&self, scale: u32, mode: RoundingMode) -> MoneyResult<Self> {
        if scale == self.scale() {
            return Ok(self.clone());
        }
        Ok(self.with_amount(self.amount.with_scale(scale, mode)?))
    }

    /// Rescales to the currency's decimal places without rounding.
    pub fn with_currency_scale(&self) -> MoneyResult<Self> {
        self.with_scale(self.currency.decimal_places())
    }

    /// Rescales to the currency's decimal places, rounding with `mode`.
    pub fn with_currency_scale_rounded(&self, mode: RoundingMode) -> MoneyResult<Self> {
        self.with_scale_rounded(self.currency.decimal_places(), mode)
    }

    /// Rounds to `scale` places but never widens.
    ///
    /// Negative scales round to tens, hundreds and so on, and store the
    /// result at scale 0.
    pub fn rounded(&self, scale: i32, mode: RoundingMode) -> MoneyResult<Self> {
        if i64::from(scale) >= i64::from(self.scale()) {
            return Ok(self.clone());
        }
        Ok(self.with_amount(self.amount.round_to(scale, mode)?))
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    fn check_currency(&self, other: impl BigMoneyProvider) -> MoneyResult<Self> {
        let other = resolve(other)?;
        if other.currency != self.currency {
            return Err(MoneyError::mismatch(self.currency.code(), other.currency.code()));
        }
        Ok(other)
    }

    /// Adds `other`. The result scale is the larger of the two.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` if the currencies differ, `NullValue` if `other`
    /// holds nothing.
    pub fn plus(&self, other: impl BigMoneyProvider) -> MoneyResult<Self> {
        let other = self.check_currency(other)?;
        Ok(self.plus_amount(&other.amount))
    }

    /// Adds every element of `monies` in order.
    pub fn plus_all<I>(&self, monies: I) -> MoneyResult<Self>
    where
        I: IntoIterator,
        I::Item: BigMoneyProvider,
    {
        let mut total = self.amount.clone();
        for money in monies {
            let money = self.check_currency(money)?;
            total = &total + &money.amount;
        }
        Ok(self.with_amount(total))
    }

    /// Adds `other`, keeping this value's scale.
    pub fn plus_retain_scale(
        &self,
        other: impl BigMoneyProvider,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let other = self.check_currency(other)?;
        self.plus_amount_retain_scale(&other.amount, mode)
    }

    /// Adds a plain amount exactly.
    #[must_use]
    pub fn plus_amount(&self, amount: impl Into<ExactDecimal>) -> Self {
        let amount: ExactDecimal = amount.into();
        self.with_amount(&self.amount + &amount)
    }

    /// Adds a plain amount, keeping this value's scale.
    pub fn plus_amount_retain_scale(
        &self,
        amount: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let amount: ExactDecimal = amount.into();
        let sum = &self.amount + &amount;
        Ok(self.with_amount(sum.with_scale(self.scale(), mode)?))
    }

    /// Adds whole major units.
    #[must_use]
    pub fn plus_major(&self, amount: i64) -> Self {
        self.plus_amount(amount)
    }

    /// Adds minor units, widening to the currency scale if needed.
    #[must_use]
    pub fn plus_minor(&self, amount: i64) -> Self {
        self.plus_amount(ExactDecimal::new(amount, self.currency.decimal_places()))
    }

    /// Subtracts `other`. The result scale is the larger of the two.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` if the currencies differ, `NullValue` if `other`
    /// holds nothing.
    pub fn minus(&self, other: impl BigMoneyProvider) -> MoneyResult<Self> {
        let other = self.check_currency(other)?;
        Ok(self.minus_amount(&other.amount))
    }

    /// Subtracts `other`, keeping this value's scale.
    pub fn minus_retain_scale(
        &self,
        other: impl BigMoneyProvider,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let other = self.check_currency(other)?;
        self.minus_amount_retain_scale(&other.amount, mode)
    }

    /// Subtracts a plain amount exactly.
    #[must_use]
    pub fn minus_amount(&self, amount: impl Into<ExactDecimal>) -> Self {
        let amount: ExactDecimal = amount.into();
        self.with_amount(&self.amount - &amount)
    }

    /// Subtracts a plain amount, keeping this value's scale.
    pub fn minus_amount_retain_scale(
        &self,
        amount: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let amount: ExactDecimal = amount.into();
        let difference = &self.amount - &amount;
        Ok(self.with_amount(difference.with_scale(self.scale(), mode)?))
    }

    /// Subtracts whole major units.
    #[must_use]
    pub fn minus_major(&self, amount: i64) -> Self {
        self.minus_amount(amount)
    }

    /// Subtracts minor units, widening to the currency scale if needed.
    #[must_use]
    pub fn minus_minor(&self, amount: i64) -> Self {
        self.minus_amount(ExactDecimal::new(amount, self.currency.decimal_places()))
    }

    /// Multiplies exactly. The result scale is the sum of both scales.
    #[must_use]
    pub fn multiplied_by(&self, factor: impl Into<ExactDecimal>) -> Self {
        let factor: ExactDecimal = factor.into();
        self.with_amount(&self.amount * &factor)
    }

    /// Multiplies, keeping this value's scale.
    pub fn multiply_retain_scale(
        &self,
        factor: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let factor: ExactDecimal = factor.into();
        let product = &self.amount * &factor;
        Ok(self.with_amount(product.with_scale(self.scale(), mode)?))
    }

    /// Divides, keeping this value's scale.
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
        let divisor: ExactDecimal = divisor.into();
        if divisor.is_zero() {
            return Err(MoneyError::Arithmetic(format!("{self} divided by zero")));
        }
        Ok(self.with_amount(self.amount.divide(&divisor, self.scale(), mode)?))
    }

    /// Same scale, opposite sign.
    #[must_use]
    pub fn negated(&self) -> Self {
        self.with_amount(-&self.amount)
    }

    /// Same scale, sign removed.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negated()
        } else {
            self.clone()
        }
    }

    /// Converts to `currency` by multiplying with `rate`.
    ///
    /// The result scale is the sum of this scale and the rate's scale.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `rate` is negative, or if `currency` is this
    /// value's currency and `rate` is not exactly one.
    pub fn converted_to(
        &self,
        currency: CurrencyUnit,
        rate: impl Into<ExactDecimal>,
    ) -> MoneyResult<Self> {
        let rate: ExactDecimal = rate.into();
        if currency == self.currency {
            if rate.value_eq(&ExactDecimal::one()) {
                return Ok(self.clone());
            }
            return Err(MoneyError::InvalidArgument(format!(
                "Cannot convert {self} to its own currency at rate {rate}"
            )));
        }
        if rate.is_negative() {
            return Err(MoneyError::InvalidArgument(format!(
                "Conversion rate {rate} must not be negative"
            )));
        }
        Ok(Self::of(currency, &self.amount * &rate))
    }

    /// Converts to `currency`, keeping this value's scale.
    pub fn convert_retain_scale(
        &self,
        currency: CurrencyUnit,
        rate: impl Into<ExactDecimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        self.converted_to(currency, rate)?
            .with_scale_rounded(self.scale(), mode)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Orders by value, ignoring scale.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` if the currencies differ.
    pub fn compare_to(&self, other: impl BigMoneyProvider) -> MoneyResult<Ordering> {
        let other = self.check_currency(other)?;
        Ok(self.amount.compare_value(&other.amount))
    }

    /// True if the values are equal, ignoring scale.
    pub fn is_equal(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        Ok(self.compare_to(other)?.is_eq())
    }

    /// True if this is greater than `other`.
    pub fn is_greater_than(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        Ok(self.compare_to(other)?.is_gt())
    }

    /// True if this is greater than or equal to `other`.
    pub fn is_greater_than_or_equal(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        Ok(self.compare_to(other)?.is_ge())
    }

    /// True if this is less than `other`.
    pub fn is_less_than(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        Ok(self.compare_to(other)?.is_lt())
    }

    /// True if this is less than or equal to `other`.
    pub fn is_less_than_or_equal(&self, other: impl BigMoneyProvider) -> MoneyResult<bool> {
        Ok(self.compare_to(other)?.is_le())
    }
}

fn narrow<T>(value: &BigInt, unit: &str, money: &BigMoney) -> MoneyResult<T>
where
    T: for<'a> TryFrom<&'a BigInt>,
{
    T::try_from(value).map_err(|_| {
        MoneyError::Arithmetic(format!(
            "{money} in {unit} units does not fit in {}",
            std::any::type_name::<T>()
        ))
    })
}

impl fmt::Display for BigMoney {
    /// `GBP 2.34`, every stored digit shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

impl FromStr for BigMoney {
    type Err = MoneyError;

    /// Parses against [`CurrencyRegistry::global`].
    fn from_str(s: &str) -> MoneyResult<Self> {
        Self::parse(s, CurrencyRegistry::global())
    }
}

impl Neg for BigMoney {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}

impl Neg for &BigMoney {
    type Output = BigMoney;

    fn neg(self) -> BigMoney {
        self.negated()
    }
}

impl From<Money> for BigMoney {
    fn from(money: Money) -> Self {
        money.into_big_money()
    }
}
