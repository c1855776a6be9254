//! # Rate Error Types Module
//!
//! Error types for fetching, parsing and using exchange rates.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the rate layer
#[derive(Error, Debug)]
pub enum RateError {
    /// The feed could not be reached or the body could not be read
    #[error("Rate feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The feed answered with a non-success status
    #[error("Rate feed returned status {0}")]
    Status(StatusCode),

    /// The feed body is not the expected XML document
    #[error("Rate feed XML error: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// A numeric field of a feed record could not be parsed
    #[error("Invalid {field} for {code}: {value:?}")]
    InvalidNumber {
        code: String,
        field: &'static str,
        value: String,
    },

    /// The currency code is absent from the rate table
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}
