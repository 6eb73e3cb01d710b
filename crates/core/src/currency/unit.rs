//! Currency records and the handles that point at them.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Metadata registered for one currency. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRecord {
    /// ISO 4217 alphabetic code, e.g. `GBP`.
    pub code: String,
    /// ISO 4217 numeric code, or -1 if the currency has none.
    pub numeric_code: i32,
    /// Minor-unit digits, or -1 for pseudo-currencies without a fixed scale.
    pub decimal_places: i32,
    /// ISO 3166 country codes that use this currency.
    pub country_codes: BTreeSet<String>,
}

/// A currency resolved from a [`CurrencyRegistry`](super::CurrencyRegistry).
///
/// Cheap to clone. Two units are equal iff their codes are equal, and they
/// order lexicographically by code.
#[derive(Clone)]
pub struct CurrencyUnit(Arc<CurrencyRecord>);

impl CurrencyUnit {
    pub(crate) fn new(record: CurrencyRecord) -> Self {
        Self(Arc::new(record))
    }

    /// The three-letter code.
    pub fn code(&self) -> &str {
        &self.0.code
    }

    /// The numeric code, or -1 if none is assigned.
    pub fn numeric_code(&self) -> i32 {
        self.0.numeric_code
    }

    /// The numeric code zero-padded to three digits (`"008"`), or an empty
    /// string if none is assigned.
    pub fn numeric_3_code(&self) -> String {
        if self.0.numeric_code < 0 {
            String::new()
        } else {
            format!("{:03}", self.0.numeric_code)
        }
    }

    /// The canonical scale used for arithmetic. Pseudo-currencies report 0.
    pub fn decimal_places(&self) -> u32 {
        u32::try_from(self.0.decimal_places).unwrap_or(0)
    }

    /// The decimal places exactly as registered, including -1.
    pub fn raw_decimal_places(&self) -> i32 {
        self.0.decimal_places
    }

    /// True for currencies registered with decimal places -1 (XAU, XDR, XXX...).
    pub fn is_pseudo_currency(&self) -> bool {
        self.0.decimal_places < 0
    }

    /// Countries registered for this currency, sorted.
    pub fn country_codes(&self) -> &BTreeSet<String> {
        &self.0.country_codes
    }

    /// The full registered record.
    pub fn record(&self) -> &CurrencyRecord {
        &self.0
    }
}

impl PartialEq for CurrencyUnit {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.code == other.0.code
    }
}

impl Eq for CurrencyUnit {}

impl PartialOrd for CurrencyUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CurrencyUnit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.code.cmp(&other.0.code)
    }
}

impl Hash for CurrencyUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.code.hash(state);
    }
}

impl fmt::Debug for CurrencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyUnit({})", self.0.code)
    }
}

impl fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.code)
    }
}
