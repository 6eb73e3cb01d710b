//! Exact monetary amounts.
//!
//! [`BigMoney`] carries any scale; [`Money`] pins its scale, usually to the
//! currency's decimal places. Both sit on [`ExactDecimal`], so no operation
//! ever goes through floating point.

pub mod big_money;
pub mod codec;
pub mod decimal;
pub mod fixed;
pub mod provider;
pub mod rounding;
pub mod utils;

#[cfg(test)]
mod props;

pub use big_money::BigMoney;
pub use decimal::ExactDecimal;
pub use fixed::Money;
pub use provider::BigMoneyProvider;
pub use rounding::RoundingMode;
