//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup};

// Import localization
use crate::localization::{t, t_args};

// Import currency and conversion helpers
use crate::conversion::{format_amount, format_money};
use crate::currency::ResolvedCurrency;

/// Keyboard layouts the bot shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Convert / rate / exit, one button per row
    MainMenu,
    /// Yes / no on a single row
    RestartConfirmation,
    /// Hide any reply keyboard
    Remove,
}

impl Keyboard {
    /// Button labels of the layout, row by row
    pub fn rows(self) -> Vec<Vec<String>> {
        match self {
            Keyboard::MainMenu => vec![
                vec![t("menu-convert")],
                vec![t("menu-rate")],
                vec![t("menu-exit")],
            ],
            Keyboard::RestartConfirmation => vec![vec![t("restart-yes"), t("restart-no")]],
            Keyboard::Remove => Vec::new(),
        }
    }

    /// Telegram markup for the layout
    pub fn to_reply_markup(self) -> ReplyMarkup {
        match self {
            Keyboard::Remove => ReplyMarkup::KeyboardRemove(KeyboardRemove::new()),
            layout => {
                let buttons = layout
                    .rows()
                    .into_iter()
                    .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>());
                ReplyMarkup::Keyboard(KeyboardMarkup::new(buttons).resize_keyboard())
            }
        }
    }
}

/// Code followed by the display name in parentheses when it adds anything
pub fn currency_label(currency: &ResolvedCurrency) -> String {
    if currency.has_distinct_name() {
        format!("{} ({})", currency.code, currency.display_name)
    } else {
        currency.code.clone()
    }
}

/// Greeting shown on `/start`
pub fn format_welcome(first_name: Option<&str>) -> String {
    let default_name = t("default-name");
    let name = first_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(default_name.as_str());

    format!(
        "{}\n\n{}",
        t_args("welcome", &[("name", name)]),
        t("welcome-choose")
    )
}

/// Rate of one currency against the ruble (HTML markup)
pub fn format_rate(currency: &ResolvedCurrency, rubles_per_unit: f64) -> String {
    format!(
        "{}\n{}",
        t_args(
            "rate-result",
            &[
                ("code", currency.code.as_str()),
                ("name", currency.display_name.as_str()),
                ("rate", format_money(rubles_per_unit).as_str()),
            ],
        ),
        t("rate-source")
    )
}

/// Conversion outcome followed by the restart question
pub fn format_conversion(
    amount: f64,
    source: &ResolvedCurrency,
    converted: f64,
    target: &ResolvedCurrency,
) -> String {
    format!(
        "{}\n{}\n\n{}",
        t_args(
            "conversion-result",
            &[
                ("amount", format_amount(amount).as_str()),
                ("from", currency_label(source).as_str()),
                ("converted", format_money(converted).as_str()),
                ("to", currency_label(target).as_str()),
            ],
        ),
        t("rate-source"),
        t("prompt-restart")
    )
}

/// Goodbye text shown on exit
pub fn format_farewell() -> String {
    format!("{}\n{}", t("farewell"), t("farewell-hint"))
}
