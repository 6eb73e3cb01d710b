//! The currency registry.
//!
//! Holds three indexes (by code, by numeric code, by country) inside one
//! immutable snapshot. Lookups load the current snapshot without locking;
//! `register` clones it, applies the change and swaps the new snapshot in
//! with a single store, so a reader never sees a code without its numeric
//! code or country entries.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use coinage_shared::{CoinageConfig, MoneyError, MoneyResult, RegistryConfig};
use once_cell::sync::Lazy;
use tracing::{debug, error, warn};

use super::provider::{CsvDataProvider, CurrencyDataProvider};
use super::unit::{CurrencyRecord, CurrencyUnit};

static GLOBAL: Lazy<CurrencyRegistry> = Lazy::new(CurrencyRegistry::from_environment);

#[derive(Debug, Clone, Default)]
struct Snapshot {
    by_code: HashMap<String, CurrencyUnit>,
    by_numeric: HashMap<i32, CurrencyUnit>,
    by_country: HashMap<String, CurrencyUnit>,
}

/// Append-only set of currencies, safe to share between threads.
#[derive(Debug, Default)]
pub struct CurrencyRegistry {
    snapshot: ArcSwap<Snapshot>,
    // Serializes writers; readers never take it.
    writer: Mutex<()>,
}

pub(crate) fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

pub(crate) fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the bundled ISO 4217 dataset.
    pub fn bundled() -> MoneyResult<Self> {
        Self::with_provider(&CsvDataProvider::bundled())
    }

    /// Creates a registry populated by `provider`.
    pub fn with_provider(provider: &dyn CurrencyDataProvider) -> MoneyResult<Self> {
        let registry = Self::new();
        provider.register_currencies(&registry)?;
        Ok(registry)
    }

    /// Creates a registry from configured data sources.
    ///
    /// Base data comes from the configured files, or the bundled dataset when
    /// neither is set; extension files are registered afterwards and may only
    /// add currencies.
    pub fn from_config(config: &RegistryConfig) -> MoneyResult<Self> {
        let base = match (&config.currency_file, &config.country_file) {
            (None, None) => CsvDataProvider::bundled(),
            (currency_file, country_file) => {
                let bundled = CsvDataProvider::bundled();
                let currencies = match currency_file {
                    Some(path) => CsvDataProvider::read_source(path)?,
                    None => bundled.currencies().to_string(),
                };
                let countries = match country_file {
                    Some(path) => CsvDataProvider::read_source(path)?,
                    None => bundled.countries().to_string(),
                };
                CsvDataProvider::new("configured", currencies, countries)
            }
        };
        let registry = Self::with_provider(&base)?;

        if config.currency_extension_file.is_some() || config.country_extension_file.is_some() {
            let currencies = match &config.currency_extension_file {
                Some(path) => CsvDataProvider::read_source(path)?,
                None => String::new(),
            };
            let countries = match &config.country_extension_file {
                Some(path) => CsvDataProvider::read_source(path)?,
                None => String::new(),
            };
            CsvDataProvider::new("extension", currencies, countries).register_currencies(&registry)?;
        }
        Ok(registry)
    }

    /// The process-wide registry, built on first use from `CoinageConfig`.
    ///
    /// Falls back to the bundled dataset if the configured sources cannot be
    /// loaded, and to an empty registry if even that fails.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    fn from_environment() -> Self {
        let config = match CoinageConfig::load() {
            Ok(config) => config.registry,
            Err(err) => {
                warn!(error = %err, "Failed to load configuration, using bundled currency data");
                RegistryConfig::default()
            }
        };
        match Self::from_config(&config) {
            Ok(registry) => registry,
            Err(err) if config.is_customized() => {
                error!(error = %err, "Configured currency data is invalid, using bundled data");
                Self::bundled().unwrap_or_else(|err| {
                    error!(error = %err, "Bundled currency data is invalid");
                    Self::new()
                })
            }
            Err(err) => {
                error!(error = %err, "Bundled currency data is invalid");
                Self::new()
            }
        }
    }

    /// Registers a currency.
    ///
    /// `numeric_code` is -1 for none, otherwise 0-999; `decimal_places` is -1
    /// for a pseudo-currency, otherwise 0-30. Nothing is changed on failure.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for malformed input, `AlreadyRegistered` if the
    /// code, numeric code or any country is already taken.
    pub fn register<I, S>(
        &self,
        code: &str,
        numeric_code: i32,
        decimal_places: i32,
        country_codes: I,
    ) -> MoneyResult<CurrencyUnit>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !is_currency_code(code) {
            return Err(MoneyError::InvalidArgument(format!(
                "Invalid currency code '{code}'"
            )));
        }
        if !(-1..=999).contains(&numeric_code) {
            return Err(MoneyError::InvalidArgument(format!(
                "Invalid numeric code {numeric_code} for {code}"
            )));
        }
        if !(-1..=30).contains(&decimal_places) {
            return Err(MoneyError::InvalidArgument(format!(
                "Invalid decimal places {decimal_places} for {code}"
            )));
        }
        let mut countries = BTreeSet::new();
        for country in country_codes {
            let country = country.as_ref();
            if !is_country_code(country) {
                return Err(MoneyError::InvalidArgument(format!(
                    "Invalid country code '{country}' for {code}"
                )));
            }
            if !countries.insert(country.to_string()) {
                return Err(MoneyError::AlreadyRegistered(format!(
                    "Country {country} listed twice for {code}"
                )));
            }
        }

        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot.load();

        if current.by_code.contains_key(code) {
            return Err(MoneyError::AlreadyRegistered(format!(
                "Currency {code} already registered"
            )));
        }
        if let Some(existing) = current.by_numeric.get(&numeric_code) {
            return Err(MoneyError::AlreadyRegistered(format!(
                "Numeric code {numeric_code} already registered for {existing}"
            )));
        }
        if let Some((country, existing)) = countries
            .iter()
            .find_map(|c| current.by_country.get(c).map(|unit| (c, unit)))
        {
            return Err(MoneyError::AlreadyRegistered(format!(
                "Country {country} already registered for {existing}"
            )));
        }

        let unit = CurrencyUnit::new(CurrencyRecord {
            code: code.to_string(),
            numeric_code,
            decimal_places,
            country_codes: countries,
        });

        let mut next = Snapshot::clone(&current);
        next.by_code.insert(code.to_string(), unit.clone());
        if numeric_code >= 0 {
            next.by_numeric.insert(numeric_code, unit.clone());
        }
        for country in unit.country_codes() {
            next.by_country.insert(country.clone(), unit.clone());
        }
        self.snapshot.store(Arc::new(next));

        debug!(code, numeric_code, decimal_places, "Registered currency");
        Ok(unit)
    }

    /// Looks up a currency by its three-letter code.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` if the code is not registered or is not three
    /// uppercase ASCII letters.
    pub fn lookup_by_code(&self, code: &str) -> MoneyResult<CurrencyUnit> {
        if !is_currency_code(code) {
            return Err(MoneyError::UnknownCurrency(code.to_string()));
        }
        self.snapshot
            .load()
            .by_code
            .get(code)
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }

    /// Looks up a currency by numeric code (0-999).
    pub fn lookup_by_numeric_code(&self, numeric_code: i32) -> MoneyResult<CurrencyUnit> {
        if !(0..=999).contains(&numeric_code) {
            return Err(MoneyError::UnknownCurrency(numeric_code.to_string()));
        }
        self.snapshot
            .load()
            .by_numeric
            .get(&numeric_code)
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(numeric_code.to_string()))
    }

    /// Looks up a currency by a 1-3 digit numeric code string (`"8"`,
    /// `"08"` and `"008"` are equivalent).
    pub fn lookup_by_numeric_str(&self, numeric_code: &str) -> MoneyResult<CurrencyUnit> {
        let well_formed = (1..=3).contains(&numeric_code.len())
            && numeric_code.bytes().all(|b| b.is_ascii_digit());
        let parsed = well_formed
            .then(|| numeric_code.parse::<i32>().ok())
            .flatten()
            .ok_or_else(|| MoneyError::UnknownCurrency(numeric_code.to_string()))?;
        self.lookup_by_numeric_code(parsed)
    }

    /// Looks up the currency used by an ISO 3166 alpha-2 country.
    pub fn lookup_by_country(&self, country_code: &str) -> MoneyResult<CurrencyUnit> {
        self.snapshot
            .load()
            .by_country
            .get(country_code)
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(country_code.to_string()))
    }

    /// Looks up the currency of a locale's region (`en_GB`, `de-CH`,
    /// `sr-Latn-RS`).
    pub fn lookup_by_locale(&self, locale: &str) -> MoneyResult<CurrencyUnit> {
        let region = locale
            .split(['-', '_'])
            .skip(1)
            .find(|subtag| subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
            .map(str::to_ascii_uppercase)
            .ok_or_else(|| MoneyError::UnknownCurrency(locale.to_string()))?;
        self.lookup_by_country(&region)
            .map_err(|_| MoneyError::UnknownCurrency(locale.to_string()))
    }

    /// True if `code` is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.snapshot.load().by_code.contains_key(code)
    }

    /// Every registered currency, sorted by code.
    pub fn list_all(&self) -> Vec<CurrencyUnit> {
        let mut units: Vec<CurrencyUnit> = self.snapshot.load().by_code.values().cloned().collect();
        units.sort();
        units
    }

    /// Every registered country code, sorted.
    pub fn list_countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self.snapshot.load().by_country.keys().cloned().collect();
        countries.sort();
        countries
    }

    /// Countries registered against `unit`, sorted. Empty if `unit` is not
    /// registered here.
    pub fn countries_of(&self, unit: &CurrencyUnit) -> Vec<String> {
        let mut countries: Vec<String> = self
            .snapshot
            .load()
            .by_country
            .iter()
            .filter(|(_, registered)| *registered == unit)
            .map(|(country, _)| country.clone())
            .collect();
        countries.sort();
        countries
    }

    /// Number of registered currencies.
    pub fn len(&self) -> usize {
        self.snapshot.load().by_code.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn registry() -> CurrencyRegistry {
        let registry = CurrencyRegistry::new();
        registry.register("GBP", 826, 2, ["GB", "IM", "JE"]).unwrap();
        registry.register("EUR", 978, 2, ["FR", "DE"]).unwrap();
        registry.register("JPY", 392, 0, ["JP"]).unwrap();
        registry.register("ALL", 8, 2, ["AL"]).unwrap();
        registry.register("XXX", 999, -1, Vec::<String>::new()).unwrap();
        registry
    }

    #[test]
    fn test_lookup_by_code() {
        let registry = registry();
        let gbp = registry.lookup_by_code("GBP").unwrap();
        assert_eq!(gbp.code(), "GBP");
        assert_eq!(gbp.numeric_code(), 826);
        assert_eq!(gbp.decimal_places(), 2);
        assert_eq!(registry.lookup_by_code("GBP").unwrap(), gbp);
    }

    #[rstest]
    #[case("ABC")]
    #[case("gbp")]
    #[case("GB")]
    #[case("GBPX")]
    #[case("")]
    #[case("G1P")]
    fn test_lookup_by_code_unknown(#[case] code: &str) {
        assert!(matches!(
            registry().lookup_by_code(code),
            Err(MoneyError::UnknownCurrency(_))
        ));
    }

    #[rstest]
    #[case("8", "ALL")]
    #[case("08", "ALL")]
    #[case("008", "ALL")]
    #[case("826", "GBP")]
    fn test_lookup_by_numeric_str(#[case] numeric: &str, #[case] code: &str) {
        assert_eq!(registry().lookup_by_numeric_str(numeric).unwrap().code(), code);
    }

    #[rstest]
    #[case("")]
    #[case("0008")]
    #[case("-1")]
    #[case("abc")]
    #[case("123")]
    fn test_lookup_by_numeric_str_unknown(#[case] numeric: &str) {
        assert!(matches!(
            registry().lookup_by_numeric_str(numeric),
            Err(MoneyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_lookup_by_numeric_code_range() {
        let registry = registry();
        assert_eq!(registry.lookup_by_numeric_code(978).unwrap().code(), "EUR");
        assert!(registry.lookup_by_numeric_code(-1).is_err());
        assert!(registry.lookup_by_numeric_code(1000).is_err());
    }

    #[test]
    fn test_lookup_by_country_and_locale() {
        let registry = registry();
        assert_eq!(registry.lookup_by_country("JE").unwrap().code(), "GBP");
        assert_eq!(registry.lookup_by_locale("en_GB").unwrap().code(), "GBP");
        assert_eq!(registry.lookup_by_locale("de-DE").unwrap().code(), "EUR");
        assert_eq!(registry.lookup_by_locale("ja-Jpan-JP").unwrap().code(), "JPY");
        assert!(matches!(
            registry.lookup_by_locale("en"),
            Err(MoneyError::UnknownCurrency(_))
        ));
        assert!(matches!(
            registry.lookup_by_locale("en_US"),
            Err(MoneyError::UnknownCurrency(_))
        ));
        assert!(registry.lookup_by_country("US").is_err());
    }

    #[test]
    fn test_register_duplicate_code() {
        let registry = registry();
        let result = registry.register("GBP", 111, 2, ["ZZ"]);
        assert!(matches!(result, Err(MoneyError::AlreadyRegistered(_))));

        let gbp = registry.lookup_by_code("GBP").unwrap();
        assert_eq!(gbp.numeric_code(), 826);
        assert!(registry.lookup_by_country("ZZ").is_err());
        assert!(registry.lookup_by_numeric_code(111).is_err());
    }

    #[test]
    fn test_register_duplicate_numeric_code() {
        let registry = registry();
        let result = registry.register("ZZZ", 826, 2, Vec::<String>::new());
        assert!(matches!(result, Err(MoneyError::AlreadyRegistered(_))));
        assert!(!registry.contains("ZZZ"));
    }

    #[test]
    fn test_register_duplicate_country() {
        let registry = registry();
        let result = registry.register("ZZZ", 123, 2, ["XA", "GB"]);
        assert!(matches!(result, Err(MoneyError::AlreadyRegistered(_))));
        assert!(!registry.contains("ZZZ"));
        assert!(registry.lookup_by_country("XA").is_err());
        assert!(registry.lookup_by_numeric_code(123).is_err());
    }

    #[test]
    fn test_register_without_numeric_code_allows_many() {
        let registry = registry();
        registry.register("AAA", -1, 2, Vec::<String>::new()).unwrap();
        registry.register("BBB", -1, 8, Vec::<String>::new()).unwrap();
        assert_eq!(registry.lookup_by_code("BBB").unwrap().numeric_code(), -1);
    }

    #[rstest]
    #[case("gbx", 1, 2, vec!["XA"])]
    #[case("AB", 1, 2, vec!["XA"])]
    #[case("ABCD", 1, 2, vec!["XA"])]
    #[case("ABC", -2, 2, vec!["XA"])]
    #[case("ABC", 1000, 2, vec!["XA"])]
    #[case("ABC", 1, -2, vec!["XA"])]
    #[case("ABC", 1, 31, vec!["XA"])]
    #[case("ABC", 1, 2, vec![""])]
    #[case("ABC", 1, 2, vec!["xa"])]
    #[case("ABC", 1, 2, vec!["XAB"])]
    fn test_register_invalid_arguments(
        #[case] code: &str,
        #[case] numeric_code: i32,
        #[case] decimal_places: i32,
        #[case] countries: Vec<&str>,
    ) {
        let registry = registry();
        let result = registry.register(code, numeric_code, decimal_places, countries);
        assert!(matches!(result, Err(MoneyError::InvalidArgument(_))));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_list_all_sorted() {
        let codes: Vec<String> = registry()
            .list_all()
            .iter()
            .map(|unit| unit.code().to_string())
            .collect();
        assert_eq!(codes, vec!["ALL", "EUR", "GBP", "JPY", "XXX"]);
    }

    #[test]
    fn test_list_countries_sorted() {
        assert_eq!(
            registry().list_countries(),
            vec!["AL", "DE", "FR", "GB", "IM", "JE", "JP"]
        );
    }

    #[test]
    fn test_countries_of() {
        let registry = registry();
        let gbp = registry.lookup_by_code("GBP").unwrap();
        assert_eq!(registry.countries_of(&gbp), vec!["GB", "IM", "JE"]);
        let xxx = registry.lookup_by_code("XXX").unwrap();
        assert!(registry.countries_of(&xxx).is_empty());
        assert!(CurrencyRegistry::new().countries_of(&gbp).is_empty());
    }

    #[test]
    fn test_lookup_is_stable() {
        let registry = registry();
        let first = registry.lookup_by_code("JPY").unwrap();
        for _ in 0..10 {
            assert_eq!(registry.lookup_by_code("JPY").unwrap(), first);
        }
    }

    #[test]
    fn test_concurrent_register_and_lookup() {
        let registry = Arc::new(CurrencyRegistry::new());
        let writers: Vec<_> = (0..8u8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let code = format!("Q{}A", char::from(b'A' + i));
                    let country = format!("Q{}", char::from(b'A' + i));
                    registry
                        .register(&code, 900 + i32::from(i), 2, [country])
                        .unwrap();
                })
            })
            .collect();
        let reader = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..1_000 {
                    for unit in registry.list_all() {
                        // A visible code always has its numeric and country entries.
                        let by_numeric = registry.lookup_by_numeric_code(unit.numeric_code()).unwrap();
                        assert_eq!(by_numeric, unit);
                        for country in unit.country_codes() {
                            assert_eq!(registry.lookup_by_country(country).unwrap(), unit);
                        }
                    }
                }
            })
        };
        for writer in writers {
            writer.join().unwrap();
        }
        reader.join().unwrap();
        assert_eq!(registry.len(), 8);
    }
}
