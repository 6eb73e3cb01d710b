//! Shared errors and configuration for Coinage.
//!
//! This crate provides the pieces every other crate agrees on:
//! - The monetary error taxonomy (`MoneyError`)
//! - Configuration management for the currency registry

pub mod config;
pub mod error;

pub use config::{CoinageConfig, RegistryConfig};
pub use error::{MoneyError, MoneyResult};
