//! # Exchange Rates Module
//!
//! Fetches the daily rate table published by the Central Bank of Russia and
//! turns it into a [`RateTable`] of rubles per single unit of each currency.
//!
//! Rates are never cached: every call to [`RateSource::fetch_rates`] hits the
//! feed again.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::rate_errors::RateError;

/// Code of the pivot currency every rate is quoted against
pub const BASE_CURRENCY: &str = "RUB";

/// Mapping from currency code to rubles per one unit of that currency
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// An empty table, as produced when the feed is unavailable
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table holding only the base currency at 1.0
    pub fn with_base() -> Self {
        let mut rates = HashMap::new();
        rates.insert(BASE_CURRENCY.to_string(), 1.0);
        Self { rates }
    }

    /// Builder-style insert, handy for fixtures
    pub fn with_rate(mut self, code: &str, rubles_per_unit: f64) -> Self {
        self.insert(code, rubles_per_unit);
        self
    }

    /// Insert or replace a rate. The base currency stays pinned at 1.0.
    pub fn insert(&mut self, code: &str, rubles_per_unit: f64) {
        if code == BASE_CURRENCY {
            return;
        }
        self.rates.insert(code.to_string(), rubles_per_unit);
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Currency codes in alphabetical order
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// Anything that can produce a fresh rate table.
///
/// An empty table (or a missing code) is the only failure signal callers see.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> RateTable;
}

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "Valute", default)]
    valutes: Vec<Valute>,
}

#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "CharCode")]
    char_code: String,
    #[serde(rename = "Nominal")]
    nominal: String,
    #[serde(rename = "Value")]
    value: String,
}

impl Valute {
    /// Rubles per single unit: the feed quotes `value` per `nominal` units
    fn rubles_per_unit(&self) -> Result<f64, RateError> {
        let code = self.char_code.trim();

        let nominal: u32 = self
            .nominal
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| RateError::InvalidNumber {
                code: code.to_string(),
                field: "nominal",
                value: self.nominal.clone(),
            })?;

        // The feed uses a comma as decimal separator
        let value: f64 = self
            .value
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| RateError::InvalidNumber {
                code: code.to_string(),
                field: "value",
                value: self.value.clone(),
            })?;

        Ok(value / f64::from(nominal))
    }
}

/// Parse the central bank's `ValCurs` XML document.
///
/// Malformed records are skipped; the base currency is always present in
/// the result.
pub fn parse_rates(xml: &str) -> Result<RateTable, RateError> {
    let document: ValCurs = quick_xml::de::from_str(xml)?;
    let mut table = RateTable::with_base();

    for valute in &document.valutes {
        match valute.rubles_per_unit() {
            Ok(rate) => table.insert(valute.char_code.trim(), rate),
            Err(e) => warn!(error = %e, "Skipping malformed rate record"),
        }
    }

    debug!(currencies = table.len(), "Parsed rate feed");
    Ok(table)
}

/// Rate source backed by the central bank's daily XML feed
#[derive(Debug, Clone)]
pub struct CbrRateFetcher {
    client: reqwest::Client,
    url: String,
}

impl CbrRateFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Fetch and parse the feed, reporting why it failed
    pub async fn try_fetch(&self) -> Result<RateTable, RateError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status(status));
        }

        // `text()` honours the charset announced by the feed (windows-1251)
        let body = response.text().await?;
        parse_rates(&body)
    }
}

#[async_trait]
impl RateSource for CbrRateFetcher {
    async fn fetch_rates(&self) -> RateTable {
        match self.try_fetch().await {
            Ok(table) => {
                info!(url = %self.url, currencies = table.len(), "Fetched exchange rates");
                table
            }
            Err(RateError::Status(status)) => {
                warn!(url = %self.url, status = %status, "Rate feed returned non-success status");
                RateTable::empty()
            }
            Err(e) => {
                error!(url = %self.url, error = %e, "Failed to fetch exchange rates");
                RateTable::empty()
            }
        }
    }
}
