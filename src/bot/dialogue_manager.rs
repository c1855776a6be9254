//! Dialogue Manager module for handling dialogue state transitions
//!
//! Pure conversation logic: given the user's current state and the text they
//! sent, decide what to answer and which state comes next. Nothing here talks
//! to Telegram, so the whole flow can be driven from tests.

use tracing::{debug, info};

// Import dialogue types
use crate::dialogue::{parse_amount, ConversationState};

// Import rate and currency types
use crate::conversion::convert;
use crate::currency::{resolve, ResolvedCurrency};
use crate::rates::RateSource;

// Import localization
use crate::localization::t;

// Import routing and UI builder functions
use super::router::{route, Command, MenuButton, RestartAnswer, Route};
use super::ui_builder::{format_conversion, format_farewell, format_rate, format_welcome, Keyboard};

/// One outgoing message
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Keyboard to attach; `None` leaves the current one in place
    pub keyboard: Option<Keyboard>,
    /// Whether the text carries HTML markup
    pub html: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            html: false,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn html(mut self) -> Self {
        self.html = true;
        self
    }
}

/// Result of handling one message: what to send and where the user ends up
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub replies: Vec<Reply>,
    pub next: ConversationState,
}

impl Transition {
    fn to(next: ConversationState, replies: Vec<Reply>) -> Self {
        Self { replies, next }
    }

    fn stay(state: ConversationState, reply: Reply) -> Self {
        Self {
            replies: vec![reply],
            next: state,
        }
    }
}

/// An incoming text message with the bits of context the dialogue needs
#[derive(Debug, Clone, Copy)]
pub struct Incoming<'a> {
    pub text: &'a str,
    pub first_name: Option<&'a str>,
    pub bot_username: &'a str,
}

/// Advance the conversation by one message
pub async fn process_message(
    state: ConversationState,
    incoming: Incoming<'_>,
    rates: &dyn RateSource,
) -> Transition {
    match route(incoming.text, incoming.bot_username) {
        Route::Command(Command::Start) => handle_start(incoming.first_name),
        Route::Command(Command::Convert) | Route::Button(MenuButton::Convert) => {
            handle_conversion_start()
        }
        Route::Command(Command::Rate) | Route::Button(MenuButton::Rate) => handle_rate_start(),
        Route::Button(MenuButton::Exit) => handle_exit(),
        Route::StateInput(text) => handle_state_input(state, text, rates).await,
    }
}

fn handle_start(first_name: Option<&str>) -> Transition {
    Transition::to(
        ConversationState::Idle,
        vec![Reply::text(format_welcome(first_name)).with_keyboard(Keyboard::MainMenu)],
    )
}

fn handle_conversion_start() -> Transition {
    Transition::to(
        ConversationState::AwaitingAmount,
        vec![Reply::text(t("prompt-amount")).with_keyboard(Keyboard::Remove)],
    )
}

fn handle_rate_start() -> Transition {
    Transition::to(
        ConversationState::AwaitingRateQueryCurrency,
        vec![Reply::text(t("prompt-rate-currency"))],
    )
}

fn handle_exit() -> Transition {
    Transition::to(
        ConversationState::Idle,
        vec![Reply::text(format_farewell()).with_keyboard(Keyboard::Remove)],
    )
}

fn main_menu_prompt() -> Reply {
    Reply::text(t("prompt-next-action")).with_keyboard(Keyboard::MainMenu)
}

fn invalid_currency() -> Reply {
    Reply::text(t("error-invalid-currency"))
}

async fn handle_state_input(
    state: ConversationState,
    text: &str,
    rates: &dyn RateSource,
) -> Transition {
    match state {
        ConversationState::Idle => Transition::stay(
            ConversationState::Idle,
            Reply::text(t("prompt-choose-option")).with_keyboard(Keyboard::MainMenu),
        ),
        ConversationState::AwaitingAmount => handle_amount_input(text),
        ConversationState::AwaitingSourceCurrency { amount } => {
            handle_source_currency_input(amount, text, rates).await
        }
        ConversationState::AwaitingTargetCurrency {
            amount,
            source_code,
            source_name,
        } => {
            let source = ResolvedCurrency {
                code: source_code,
                display_name: source_name,
            };
            handle_target_currency_input(amount, source, text, rates).await
        }
        ConversationState::AwaitingRestartConfirmation => handle_restart_input(text),
        ConversationState::AwaitingRateQueryCurrency => handle_rate_query_input(text, rates).await,
    }
}

fn handle_amount_input(text: &str) -> Transition {
    match parse_amount(text) {
        Ok(amount) => Transition::to(
            ConversationState::AwaitingSourceCurrency { amount },
            vec![Reply::text(t("prompt-source-currency"))],
        ),
        Err(reason) => {
            debug!(reason, "Rejected amount input");
            Transition::stay(
                ConversationState::AwaitingAmount,
                Reply::text(t("error-invalid-amount")),
            )
        }
    }
}

async fn handle_source_currency_input(
    amount: f64,
    text: &str,
    rates: &dyn RateSource,
) -> Transition {
    let source = resolve(text);
    let table = rates.fetch_rates().await;

    if !table.contains(&source.code) {
        info!(code = %source.code, "Unknown source currency");
        return Transition::stay(
            ConversationState::AwaitingSourceCurrency { amount },
            invalid_currency(),
        );
    }

    Transition::to(
        ConversationState::AwaitingTargetCurrency {
            amount,
            source_code: source.code,
            source_name: source.display_name,
        },
        vec![Reply::text(t("prompt-target-currency"))],
    )
}

async fn handle_target_currency_input(
    amount: f64,
    source: ResolvedCurrency,
    text: &str,
    rates: &dyn RateSource,
) -> Transition {
    let target = resolve(text);
    let table = rates.fetch_rates().await;

    match convert(amount, &table, &source.code, &target.code) {
        Ok(converted) => {
            info!(
                amount,
                from = %source.code,
                to = %target.code,
                converted,
                "Conversion completed"
            );
            Transition::to(
                ConversationState::AwaitingRestartConfirmation,
                vec![
                    Reply::text(format_conversion(amount, &source, converted, &target))
                        .with_keyboard(Keyboard::RestartConfirmation),
                ],
            )
        }
        Err(e) => {
            info!(error = %e, "Conversion rejected");
            Transition::stay(
                ConversationState::AwaitingTargetCurrency {
                    amount,
                    source_code: source.code,
                    source_name: source.display_name,
                },
                invalid_currency(),
            )
        }
    }
}

fn handle_restart_input(text: &str) -> Transition {
    match RestartAnswer::from_label(text) {
        Some(RestartAnswer::Yes) => handle_conversion_start(),
        Some(RestartAnswer::No) => Transition::to(ConversationState::Idle, vec![main_menu_prompt()]),
        None => Transition::stay(
            ConversationState::AwaitingRestartConfirmation,
            Reply::text(t("prompt-restart-choose")).with_keyboard(Keyboard::RestartConfirmation),
        ),
    }
}

async fn handle_rate_query_input(text: &str, rates: &dyn RateSource) -> Transition {
    let currency = resolve(text);
    let table = rates.fetch_rates().await;

    match table.get(&currency.code) {
        Some(rate) => {
            info!(code = %currency.code, rate, "Rate query completed");
            Transition::to(
                ConversationState::Idle,
                vec![
                    Reply::text(format_rate(&currency, rate)).html(),
                    main_menu_prompt(),
                ],
            )
        }
        None => {
            info!(code = %currency.code, "Unknown rate query currency");
            Transition::stay(ConversationState::AwaitingRateQueryCurrency, invalid_currency())
        }
    }
}
