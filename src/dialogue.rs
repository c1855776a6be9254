//! Conversation state kept per user between messages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::types::{ChatId, Message, UserId};

/// Where a user currently is in the conversation, with the data gathered so far
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingAmount,
    AwaitingSourceCurrency {
        amount: f64,
    },
    AwaitingTargetCurrency {
        amount: f64,
        source_code: String,
        source_name: String,
    },
    AwaitingRestartConfirmation,
    AwaitingRateQueryCurrency,
}

/// Type alias for the conversation dialogue
pub type ConversationDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;

/// Storage key of a user's session.
///
/// Sessions follow the sender, not the chat, so users sharing a group chat
/// never see each other's partial input.
pub fn session_key(user_id: UserId) -> ChatId {
    ChatId(user_id.0 as i64)
}

/// Dialogue of the message's sender; `None` for messages without one
pub fn sender_dialogue(
    msg: Message,
    storage: Arc<InMemStorage<ConversationState>>,
) -> Option<ConversationDialogue> {
    let user = msg.from.as_ref()?;
    Some(ConversationDialogue::new(storage, session_key(user.id)))
}

/// Parses an amount typed by the user.
///
/// Any finite decimal number is accepted, zero and negatives included.
pub fn parse_amount(input: &str) -> Result<f64, &'static str> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        Ok(_) => Err("not_finite"),
        Err(_) => Err("not_a_number"),
    }
}
