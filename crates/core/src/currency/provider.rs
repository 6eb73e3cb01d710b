//! Bootstrap data for the currency registry.
//!
//! The data is line oriented. Currency lines are `CODE,NUMERIC,DECIMAL_PLACES`
//! and country lines are `CC,CODE`, read as headerless CSV. Blank lines and
//! lines starting with `#` are ignored, and fields may be quoted.

use std::collections::BTreeMap;
use std::path::Path;

use coinage_shared::{MoneyError, MoneyResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::registry::CurrencyRegistry;

const BUNDLED_CURRENCIES: &str = include_str!("../../data/currencies.csv");
const BUNDLED_COUNTRIES: &str = include_str!("../../data/countries.csv");

/// Source of currency records for a [`CurrencyRegistry`].
pub trait CurrencyDataProvider {
    /// Registers every currency this provider knows about.
    fn register_currencies(&self, registry: &CurrencyRegistry) -> MoneyResult<()>;
}

/// Provider backed by the two line-oriented text sources.
#[derive(Debug, Clone)]
pub struct CsvDataProvider {
    source: String,
    currencies: String,
    countries: String,
}

#[derive(Debug, Deserialize)]
struct CurrencyLine {
    code: String,
    numeric_code: i32,
    decimal_places: i32,
}

#[derive(Debug, Deserialize)]
struct CountryLine {
    country: String,
    currency: String,
}

impl CsvDataProvider {
    /// Creates a provider over in-memory text. `source` names it in errors.
    pub fn new(
        source: impl Into<String>,
        currencies: impl Into<String>,
        countries: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            currencies: currencies.into(),
            countries: countries.into(),
        }
    }

    /// The ISO 4217 dataset compiled into this crate.
    pub fn bundled() -> Self {
        Self::new("bundled", BUNDLED_CURRENCIES, BUNDLED_COUNTRIES)
    }

    /// Reads both sources from disk.
    pub fn from_files(currency_path: &Path, country_path: &Path) -> MoneyResult<Self> {
        Ok(Self::new(
            currency_path.display().to_string(),
            Self::read_source(currency_path)?,
            Self::read_source(country_path)?,
        ))
    }

    pub(crate) fn read_source(path: &Path) -> MoneyResult<String> {
        std::fs::read_to_string(path).map_err(|err| {
            MoneyError::InvalidArgument(format!("Cannot read {}: {err}", path.display()))
        })
    }

    /// Raw currency text.
    pub fn currencies(&self) -> &str {
        &self.currencies
    }

    /// Raw country text.
    pub fn countries(&self) -> &str {
        &self.countries
    }

    fn parse_currencies(&self) -> MoneyResult<Vec<CurrencyLine>> {
        self.read_rows("currency", &self.currencies)
    }

    fn parse_countries(&self) -> MoneyResult<BTreeMap<String, Vec<String>>> {
        let mut by_currency: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for line in self.read_rows::<CountryLine>("country", &self.countries)? {
            by_currency
                .entry(line.currency)
                .or_default()
                .push(line.country);
        }
        Ok(by_currency)
    }

    fn read_rows<T: DeserializeOwned>(&self, kind: &str, text: &str) -> MoneyResult<Vec<T>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes())
            .deserialize()
            .map(|row| row.map_err(|err| self.malformed(kind, &err)))
            .collect()
    }

    fn malformed(&self, kind: &str, err: &csv::Error) -> MoneyError {
        MoneyError::InvalidArgument(match err.position() {
            Some(position) => format!(
                "{}:{}: malformed {kind} line: {err}",
                self.source,
                position.line()
            ),
            None => format!("{}: malformed {kind} data: {err}", self.source),
        })
    }
}

impl CurrencyDataProvider for CsvDataProvider {
    fn register_currencies(&self, registry: &CurrencyRegistry) -> MoneyResult<()> {
        let currencies = self.parse_currencies()?;
        let mut countries = self.parse_countries()?;

        if let Some((currency, listed)) = countries
            .iter()
            .find(|(currency, _)| !currencies.iter().any(|line| &line.code == *currency))
        {
            return Err(MoneyError::InvalidArgument(format!(
                "{}: countries {listed:?} refer to currency {currency} which this source does not define",
                self.source
            )));
        }

        for line in &currencies {
            let country_codes = countries.remove(&line.code).unwrap_or_default();
            registry.register(
                &line.code,
                line.numeric_code,
                line.decimal_places,
                country_codes,
            )?;
        }

        info!(
            source = %self.source,
            currencies = currencies.len(),
            "Loaded currency data"
        );
        Ok(())
    }
}
