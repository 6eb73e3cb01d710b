//! Coinage currency catalog.
//!
//! Builds the currency registry from configuration and prints it, or
//! resolves the given queries against it.
//!
//! Usage: cargo run --bin catalog -- [--json] [QUERY...]
//!
//! A query is a currency code (`GBP`), a numeric code (`826`), a country
//! (`GB`) or a locale (`en_GB`).

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coinage_core::{CurrencyRegistry, CurrencyUnit};
use coinage_shared::{CoinageConfig, MoneyResult};

/// One registry entry as printed.
#[derive(Debug, Serialize)]
struct CurrencyRow {
    code: String,
    numeric_code: String,
    decimal_places: i32,
    countries: Vec<String>,
}

impl From<&CurrencyUnit> for CurrencyRow {
    fn from(unit: &CurrencyUnit) -> Self {
        Self {
            code: unit.code().to_string(),
            numeric_code: unit.numeric_3_code(),
            decimal_places: unit.raw_decimal_places(),
            countries: unit.country_codes().iter().cloned().collect(),
        }
    }
}

fn resolve(registry: &CurrencyRegistry, query: &str) -> MoneyResult<CurrencyUnit> {
    if query.bytes().all(|b| b.is_ascii_digit()) {
        registry.lookup_by_numeric_str(query)
    } else if query.len() == 3 {
        registry.lookup_by_code(&query.to_ascii_uppercase())
    } else if query.len() == 2 {
        registry.lookup_by_country(&query.to_ascii_uppercase())
    } else {
        registry.lookup_by_locale(query)
    }
}

fn print_table(rows: &[CurrencyRow]) {
    println!("{:<4} {:>3} {:>2}  COUNTRIES", "CODE", "NUM", "DP");
    for row in rows {
        println!(
            "{:<4} {:>3} {:>2}  {}",
            row.code,
            row.numeric_code,
            row.decimal_places,
            row.countries.join(" ")
        );
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=info,coinage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CoinageConfig::load().context("Failed to load configuration")?;
    let registry = CurrencyRegistry::from_config(&config.registry)
        .context("Failed to build currency registry")?;
    info!(
        currencies = registry.len(),
        countries = registry.list_countries().len(),
        customized = config.registry.is_customized(),
        "Currency registry ready"
    );

    let mut json = false;
    let mut queries = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            queries.push(arg);
        }
    }

    let units = if queries.is_empty() {
        registry.list_all()
    } else {
        queries
            .iter()
            .map(|query| {
                resolve(&registry, query).with_context(|| format!("Cannot resolve '{query}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };
    let rows: Vec<CurrencyRow> = units.iter().map(CurrencyRow::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&rows);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_query_kinds() {
        let registry = CurrencyRegistry::bundled().unwrap();
        assert_eq!(resolve(&registry, "gbp").unwrap().code(), "GBP");
        assert_eq!(resolve(&registry, "826").unwrap().code(), "GBP");
        assert_eq!(resolve(&registry, "008").unwrap().code(), "ALL");
        assert_eq!(resolve(&registry, "jp").unwrap().code(), "JPY");
        assert_eq!(resolve(&registry, "de_CH").unwrap().code(), "CHF");
        assert!(resolve(&registry, "nowhere").is_err());
    }

    #[test]
    fn test_row_from_unit() {
        let registry = CurrencyRegistry::bundled().unwrap();
        let row = CurrencyRow::from(&registry.lookup_by_code("XAU").unwrap());
        assert_eq!(row.decimal_places, -1);
        assert!(row.countries.is_empty());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["code"], "XAU");
        assert_eq!(json["numeric_code"], "959");
    }
}
