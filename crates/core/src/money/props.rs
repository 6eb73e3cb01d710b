//! Property-based tests for money arithmetic.
//!
//! - Text round trip
//! - Exact addition and subtraction
//! - Scale-independent comparison
//! - Rounding brackets the exact value

use proptest::prelude::*;

use super::{BigMoney, ExactDecimal, Money, RoundingMode};
use crate::currency::{CurrencyRegistry, CurrencyUnit};

fn unit(code: &str) -> CurrencyUnit {
    CurrencyRegistry::global()
        .lookup_by_code(code)
        .expect("bundled currency")
}

/// Strategy to pick a currency with 0, 2, 3 or 4 decimal places.
fn currency() -> impl Strategy<Value = CurrencyUnit> {
    prop::sample::select(vec!["GBP", "JPY", "BHD", "CLF", "EUR"]).prop_map(unit)
}

/// Strategy to generate scales (0 to 8).
fn scale() -> impl Strategy<Value = u32> {
    0u32..=8
}

/// Strategy to generate amounts with up to 8 decimal places.
fn amount() -> impl Strategy<Value = ExactDecimal> {
    (any::<i64>(), scale()).prop_map(|(unscaled, scale)| ExactDecimal::new(unscaled, scale))
}

fn big_money() -> impl Strategy<Value = BigMoney> {
    (currency(), amount()).prop_map(|(currency, amount)| BigMoney::of(currency, amount))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Parsing the display form gives back the same value and scale.
    #[test]
    fn prop_text_round_trip(money in big_money()) {
        let parsed = BigMoney::parse(&money.to_string(), CurrencyRegistry::global()).unwrap();
        prop_assert_eq!(parsed, money);
    }

    /// Adding then subtracting the same amount is lossless.
    #[test]
    fn prop_plus_minus_inverse(currency in currency(), a in amount(), b in amount()) {
        let a = BigMoney::of(currency.clone(), a);
        let b = BigMoney::of(currency, b);
        let back = a.plus(&b).unwrap().minus(&b).unwrap();
        prop_assert!(back.is_equal(&a).unwrap());
        prop_assert_eq!(back.scale(), a.scale().max(b.scale()));
        if a.scale() >= b.scale() {
            prop_assert_eq!(back, a);
        }
    }

    /// Widening the scale never changes the compared value.
    #[test]
    fn prop_compare_ignores_scale(money in big_money(), extra in 1u32..6) {
        let wider = money.with_scale(money.scale() + extra).unwrap();
        prop_assert!(wider.is_equal(&money).unwrap());
        prop_assert_ne!(&wider, &money);
        prop_assert_eq!(wider.compare_to(&money.plus_minor(1)).unwrap(), std::cmp::Ordering::Less);
    }

    /// Floor and ceiling bracket the exact value and differ by at most one
    /// minor unit.
    #[test]
    fn prop_rounding_brackets(money in big_money()) {
        let floor = money.with_currency_scale_rounded(RoundingMode::Floor).unwrap();
        let ceiling = money.with_currency_scale_rounded(RoundingMode::Ceiling).unwrap();
        prop_assert!(floor.is_less_than_or_equal(&money).unwrap());
        prop_assert!(ceiling.is_greater_than_or_equal(&money).unwrap());
        let gap = ceiling.minus(&floor).unwrap();
        prop_assert!(gap.is_less_than_or_equal(BigMoney::of_minor(money.currency().clone(), 1)).unwrap());
        for mode in [RoundingMode::HalfUp, RoundingMode::HalfDown, RoundingMode::HalfEven] {
            let rounded = money.with_currency_scale_rounded(mode).unwrap();
            prop_assert!(rounded.is_equal(&floor).unwrap() || rounded.is_equal(&ceiling).unwrap());
        }
    }

    /// Unnecessary division succeeds exactly when the quotient fits.
    #[test]
    fn prop_exact_division(currency in currency(), minor in any::<i32>(), divisor in 1i64..50) {
        let product = Money::of_minor(currency, i64::from(minor)).multiplied_by_i64(divisor);
        let quotient = product.divided_by_i64(divisor, RoundingMode::Unnecessary).unwrap();
        prop_assert_eq!(quotient.amount_minor_i64().unwrap(), i64::from(minor));
    }

    /// Encoding then decoding against the same registry is lossless.
    #[test]
    fn prop_record_round_trip(money in big_money()) {
        let bytes = money.to_bytes().unwrap();
        prop_assert_eq!(BigMoney::from_bytes(&bytes, CurrencyRegistry::global()).unwrap(), money);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// 2.345 to two places under every rounding mode.
    #[test]
    fn test_rounding_modes_on_one_value() {
        let money = BigMoney::of(unit("GBP"), dec!(2.345));
        let expected = [
            (RoundingMode::Up, "GBP 2.35"),
            (RoundingMode::Down, "GBP 2.34"),
            (RoundingMode::Ceiling, "GBP 2.35"),
            (RoundingMode::Floor, "GBP 2.34"),
            (RoundingMode::HalfUp, "GBP 2.35"),
            (RoundingMode::HalfDown, "GBP 2.34"),
            (RoundingMode::HalfEven, "GBP 2.34"),
        ];
        for (mode, text) in expected {
            assert_eq!(
                money.with_currency_scale_rounded(mode).unwrap().to_string(),
                text,
                "{mode}"
            );
        }
        assert!(money.with_currency_scale_rounded(RoundingMode::Unnecessary).is_err());
    }

    #[test]
    fn test_minor_unit_limits() {
        let max = Money::of_minor(unit("GBP"), i64::from(i32::MAX));
        assert_eq!(max.amount_minor_i32().unwrap(), i32::MAX);
        assert!(max.plus_minor(1).unwrap().amount_minor_i32().is_err());
    }
}
