//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{Me, ParseMode};
use tracing::{debug, info};

// Import dialogue types
use crate::dialogue::{ConversationDialogue, ConversationState};

// Import rate source
use crate::rates::RateSource;

// Import dialogue manager functions
use super::dialogue_manager::{process_message, Incoming, Reply};

fn log_user_message(msg: &Message, text: &str) {
    match msg.from.as_ref() {
        Some(user) => info!(
            user_id = %user.id,
            full_name = %user.full_name(),
            username = user.username.as_deref().unwrap_or("-"),
            text,
            "👤 Incoming message"
        ),
        None => info!(chat_id = %msg.chat.id, text, "Incoming message without sender"),
    }
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    let mut request = bot.send_message(chat_id, reply.text.clone());

    if reply.html {
        request = request.parse_mode(ParseMode::Html);
    }

    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard.to_reply_markup());
    }

    request.await?;
    Ok(())
}

/// Persist the next state; Idle sessions carry no data and are dropped
pub async fn store_state(dialogue: &ConversationDialogue, next: &ConversationState) -> Result<()> {
    match next {
        ConversationState::Idle => dialogue.exit().await?,
        next => dialogue.update(next.clone()).await?,
    }
    Ok(())
}

/// Entry point for every message update.
///
/// Non-text messages are handled as empty text, which every state answers
/// with its own re-prompt.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    me: Me,
    dialogue: ConversationDialogue,
    rates: Arc<dyn RateSource>,
) -> Result<()> {
    let text = msg.text().unwrap_or_default();
    log_user_message(&msg, text);

    let state = dialogue.get().await?.unwrap_or_default();

    let incoming = Incoming {
        text,
        first_name: msg.from.as_ref().map(|user| user.first_name.as_str()),
        bot_username: me.username(),
    };

    let transition = process_message(state.clone(), incoming, rates.as_ref()).await;

    if transition.next != state {
        debug!(
            chat_id = %msg.chat.id,
            from = ?state,
            to = ?transition.next,
            "Dialogue state changed"
        );
    }

    // Stored before replying so a failed send cannot leave a finished flow open
    store_state(&dialogue, &transition.next).await?;

    for reply in &transition.replies {
        send_reply(&bot, msg.chat.id, reply).await?;
    }

    Ok(())
}
