//! Anything that can hand over a `BigMoney`.

use super::big_money::BigMoney;
use super::fixed::Money;

/// Source of a monetary value for arithmetic and aggregation.
///
/// `None` means the provider holds no value; operations report it as
/// `MoneyError::NullValue`.
pub trait BigMoneyProvider {
    /// Returns the value, or `None` if there is nothing to provide.
    fn to_big_money(&self) -> Option<BigMoney>;
}

impl BigMoneyProvider for BigMoney {
    fn to_big_money(&self) -> Option<BigMoney> {
        Some(self.clone())
    }
}

impl BigMoneyProvider for Money {
    fn to_big_money(&self) -> Option<BigMoney> {
        Some(self.as_big_money().clone())
    }
}

impl<T: BigMoneyProvider> BigMoneyProvider for Option<T> {
    fn to_big_money(&self) -> Option<BigMoney> {
        self.as_ref().and_then(BigMoneyProvider::to_big_money)
    }
}

impl<T: BigMoneyProvider + ?Sized> BigMoneyProvider for &T {
    fn to_big_money(&self) -> Option<BigMoney> {
        (**self).to_big_money()
    }
}
