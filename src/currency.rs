//! Currency alias resolution.
//!
//! Maps free-text currency names typed by users ("доллары", "евро", ...) to a
//! canonical 3-letter code and a display name. Anything not in the table is
//! taken at face value as a code; the live rate table decides whether it exists.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A resolved currency: canonical code plus the name shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCurrency {
    pub code: String,
    pub display_name: String,
}

impl ResolvedCurrency {
    /// Whether the display name carries more information than the code itself
    pub fn has_distinct_name(&self) -> bool {
        self.display_name != self.code
    }
}

const ALIASES: &[(&str, &str, &str)] = &[
    ("доллар", "USD", "Доллар США"),
    ("доллары", "USD", "Доллар США"),
    ("баксы", "USD", "Доллар США"),
    ("евро", "EUR", "Евро"),
    ("рубль", "RUB", "Российский рубль"),
    ("рубли", "RUB", "Российский рубль"),
    ("йена", "JPY", "Японская иена"),
    ("иена", "JPY", "Японская иена"),
    ("фунт", "GBP", "Британский фунт"),
    ("фунты", "GBP", "Британский фунт"),
    ("юань", "CNY", "Китайский юань"),
    ("юани", "CNY", "Китайский юань"),
    ("динар", "RSD", "Сербский динар"),
    ("динары", "RSD", "Сербский динар"),
    ("тенге", "KZT", "Казахстанский тенге"),
    ("рупия", "INR", "Индийская рупия"),
    ("рупии", "INR", "Индийская рупия"),
];

static ALIAS_TABLE: LazyLock<HashMap<&'static str, (&'static str, &'static str)>> =
    LazyLock::new(|| {
        ALIASES
            .iter()
            .map(|&(term, code, name)| (term, (code, name)))
            .collect()
    });

/// Resolve user input to a currency code and display name.
///
/// Lookup is case-insensitive and ignores surrounding whitespace. Unknown
/// terms resolve to their uppercased form for both code and name.
pub fn resolve(input: &str) -> ResolvedCurrency {
    let term = input.trim().to_lowercase();

    match ALIAS_TABLE.get(term.as_str()) {
        Some(&(code, name)) => ResolvedCurrency {
            code: code.to_string(),
            display_name: name.to_string(),
        },
        None => {
            let upper = term.to_uppercase();
            ResolvedCurrency {
                code: upper.clone(),
                display_name: upper,
            }
        }
    }
}

/// Whether the term is one of the built-in aliases
pub fn is_known_alias(input: &str) -> bool {
    ALIAS_TABLE.contains_key(input.trim().to_lowercase().as_str())
}

/// All alias terms, in table order
pub fn alias_terms() -> impl Iterator<Item = &'static str> {
    ALIASES.iter().map(|&(term, _, _)| term)
}
