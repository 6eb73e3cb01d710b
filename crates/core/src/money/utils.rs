//! Helpers for working with optional or mixed monetary values.
//!
//! An absent value (a provider yielding `None`) counts as zero for the sign
//! checks and as the identity for `add` and `subtract`.

use coinage_shared::MoneyResult;

use super::big_money::{BigMoney, resolve};
use super::provider::BigMoneyProvider;

/// True if `money` is zero or absent.
pub fn is_zero(money: impl BigMoneyProvider) -> bool {
    money.to_big_money().is_none_or(|money| money.is_zero())
}

/// True if `money` is present and greater than zero.
pub fn is_positive(money: impl BigMoneyProvider) -> bool {
    money.to_big_money().is_some_and(|money| money.is_positive())
}

/// True if `money` is absent, zero or positive.
pub fn is_positive_or_zero(money: impl BigMoneyProvider) -> bool {
    money.to_big_money().is_none_or(|money| money.is_positive_or_zero())
}

/// True if `money` is present and less than zero.
pub fn is_negative(money: impl BigMoneyProvider) -> bool {
    money.to_big_money().is_some_and(|money| money.is_negative())
}

/// True if `money` is absent, zero or negative.
pub fn is_negative_or_zero(money: impl BigMoneyProvider) -> bool {
    money.to_big_money().is_none_or(|money| money.is_negative_or_zero())
}

/// The larger of two values. Ties return `b`.
///
/// # Errors
///
/// `NullValue` if either is absent, `CurrencyMismatch` if the currencies
/// differ.
pub fn max<'a, T: BigMoneyProvider>(a: &'a T, b: &'a T) -> MoneyResult<&'a T> {
    let ordering = resolve(a)?.compare_to(b)?;
    Ok(if ordering.is_gt() { a } else { b })
}

/// The smaller of two values. Ties return `b`.
pub fn min<'a, T: BigMoneyProvider>(a: &'a T, b: &'a T) -> MoneyResult<&'a T> {
    let ordering = resolve(a)?.compare_to(b)?;
    Ok(if ordering.is_lt() { a } else { b })
}

/// Adds two optional values. Absent operands are skipped; both absent gives
/// `None`.
///
/// # Errors
///
/// `CurrencyMismatch` if both are present in different currencies.
pub fn add(a: impl BigMoneyProvider, b: impl BigMoneyProvider) -> MoneyResult<Option<BigMoney>> {
    match (a.to_big_money(), b.to_big_money()) {
        (Some(a), Some(b)) => a.plus(b).map(Some),
        (a, None) => Ok(a),
        (None, b) => Ok(b),
    }
}

/// Subtracts `b` from `a`. An absent `a` yields `-b`; an absent `b` yields
/// `a`; both absent gives `None`.
pub fn subtract(
    a: impl BigMoneyProvider,
    b: impl BigMoneyProvider,
) -> MoneyResult<Option<BigMoney>> {
    match (a.to_big_money(), b.to_big_money()) {
        (Some(a), Some(b)) => a.minus(b).map(Some),
        (a, None) => Ok(a),
        (None, b) => Ok(b.map(|b| b.negated())),
    }
}
