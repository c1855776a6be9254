use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;
use tracing_subscriber::EnvFilter;

use currency_bot::bot::{self, Command};
use currency_bot::config::{BotConfig, LogFormat};
use currency_bot::dialogue::{sender_dialogue, ConversationState};
use currency_bot::localization::init_localization;
use currency_bot::rates::{CbrRateFetcher, RateSource};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;

    // Initialize logging
    init_logging(config.log_format);

    info!("Starting Currency Exchange Telegram Bot");

    init_localization()?;

    let rates: Arc<dyn RateSource> = Arc::new(CbrRateFetcher::new(config.feed_url.clone()));
    info!(feed_url = %config.feed_url, "Rate source configured");

    // Initialize the bot
    let bot = Bot::new(config.token);

    // Drop whatever piled up while the bot was offline
    bot.delete_webhook().drop_pending_updates(true).await?;
    bot.set_my_commands(Command::bot_commands()).await?;

    info!("Bot initialized, starting dispatcher");

    let handler = Update::filter_message()
        .filter_map(sender_dialogue)
        .endpoint(bot::message_handler);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![InMemStorage::<ConversationState>::new(), rates])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
