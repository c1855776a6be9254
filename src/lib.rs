//! # Currency Exchange Telegram Bot
//!
//! A Telegram bot that answers exchange-rate questions and converts amounts
//! between currencies using the Central Bank of Russia daily rates feed.

pub mod bot;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod dialogue;
pub mod localization;
pub mod rate_errors;
pub mod rates;
