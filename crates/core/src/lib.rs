//! Core money logic for Coinage.
//!
//! This crate contains the currency registry and exact monetary arithmetic.
//! The only I/O it performs is reading registry data files at start-up.
//!
//! # Modules
//!
//! - `currency` - Currency metadata, the registry and its data providers
//! - `money` - Arbitrary-scale and fixed-scale amounts, rounding and records

pub mod currency;
pub mod money;

pub use currency::{CurrencyRegistry, CurrencyUnit};
pub use money::{BigMoney, BigMoneyProvider, ExactDecimal, Money, RoundingMode};
