//! Currency metadata and the registry that resolves it.

pub mod provider;
pub mod registry;
pub mod unit;

pub use provider::{CsvDataProvider, CurrencyDataProvider};
pub use registry::CurrencyRegistry;
pub use unit::{CurrencyRecord, CurrencyUnit};
