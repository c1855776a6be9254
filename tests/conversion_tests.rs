//! # Currency and Conversion Property Tests

use proptest::prelude::*;

use currency_bot::conversion::convert;
use currency_bot::currency::{alias_terms, is_known_alias, resolve};
use currency_bot::rates::{RateTable, BASE_CURRENCY};

fn table(rate_a: f64, rate_b: f64) -> RateTable {
    RateTable::with_base()
        .with_rate("AAA", rate_a)
        .with_rate("BBB", rate_b)
}

#[test]
fn test_aliases_resolve_deterministically() {
    for term in alias_terms() {
        let first = resolve(term);
        let second = resolve(term);
        assert_eq!(first, second);
        assert_eq!(first.code.len(), 3);
        assert!(first.has_distinct_name());
    }
}

#[test]
fn test_scenario_rates() {
    let rates = RateTable::with_base()
        .with_rate("USD", 90.0)
        .with_rate("EUR", 98.0);
    let result = convert(100.0, &rates, "USD", "EUR").unwrap();
    assert_eq!(format!("{result:.2}"), "91.84");
}

proptest! {
    #[test]
    fn unknown_input_resolves_to_uppercase(input in "[a-zA-Z]{1,8}") {
        prop_assume!(!is_known_alias(&input));
        let resolved = resolve(&input);
        prop_assert_eq!(&resolved.code, &input.to_uppercase());
        prop_assert_eq!(&resolved.display_name, &input.to_uppercase());
    }

    #[test]
    fn conversion_round_trips(
        amount in -1.0e6f64..1.0e6,
        rate_a in 0.001f64..1000.0,
        rate_b in 0.001f64..1000.0,
    ) {
        let rates = table(rate_a, rate_b);
        let there = convert(amount, &rates, "AAA", "BBB").unwrap();
        let back = convert(there, &rates, "BBB", "AAA").unwrap();
        let tolerance = 1e-9 * amount.abs().max(1.0);
        prop_assert!((back - amount).abs() <= tolerance);
    }

    #[test]
    fn identity_conversion_is_exact(amount in -1.0e9f64..1.0e9, rate in 0.001f64..1000.0) {
        let rates = table(rate, 1.0);
        prop_assert_eq!(convert(amount, &rates, "AAA", "AAA").unwrap(), amount);
        prop_assert_eq!(convert(amount, &rates, BASE_CURRENCY, BASE_CURRENCY).unwrap(), amount);
    }
}
