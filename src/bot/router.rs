//! Routing table for incoming text.
//!
//! Checked in a fixed order: commands, then menu buttons, then whatever the
//! current conversation state expects.

use teloxide::utils::command::BotCommands;

use crate::localization::t;

/// Bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "приветствие и главное меню")]
    Start,
    #[command(description = "конвертировать сумму из одной валюты в другую")]
    Convert,
    #[command(description = "узнать курс валюты к рублю")]
    Rate,
}

/// Main menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Convert,
    Rate,
    Exit,
}

impl MenuButton {
    fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        [
            (MenuButton::Convert, "menu-convert"),
            (MenuButton::Rate, "menu-rate"),
            (MenuButton::Exit, "menu-exit"),
        ]
        .into_iter()
        .find(|(_, key)| t(key) == text)
        .map(|(button, _)| button)
    }
}

/// Answer buttons of the restart question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartAnswer {
    Yes,
    No,
}

impl RestartAnswer {
    pub fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == t("restart-yes") {
            Some(RestartAnswer::Yes)
        } else if text == t("restart-no") {
            Some(RestartAnswer::No)
        } else {
            None
        }
    }
}

/// What an incoming text resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Command(Command),
    Button(MenuButton),
    /// Free text for the handler bound to the current state
    StateInput(&'a str),
}

/// Resolve incoming text against the routing table
pub fn route<'a>(text: &'a str, bot_username: &str) -> Route<'a> {
    if let Ok(command) = Command::parse(text.trim(), bot_username) {
        return Route::Command(command);
    }

    if let Some(button) = MenuButton::from_label(text) {
        return Route::Button(button);
    }

    Route::StateInput(text)
}
