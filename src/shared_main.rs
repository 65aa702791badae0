use std::env;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use crate::bot_command_handlers::{handle_get_meal, handle_start};
use crate::constants::{GET_MEAL_BUTTON, RETRY_BUTTON, START_BUTTON};
use crate::data_types::{BotConfig, HandlerResult};

pub fn logger_init(module_path: &str) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(
            module_path,
            if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
                == "debug"
            {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();
}

pub fn make_get_meal_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(GET_MEAL_BUTTON, "get_meal")]])
}

pub fn make_retry_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(RETRY_BUTTON, "get_meal")]])
}

pub fn make_start_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(START_BUTTON, "start")]])
}

pub async fn callback_handler(bot: Bot, q: CallbackQuery, config: BotConfig) -> HandlerResult {
    if let Some(q_data) = q.data {
        // acknowledge callback query to remove the loading alert
        bot.answer_callback_query(q.id).await?;

        // callbacks from very old messages may come without the message itself
        let chat_id = q
            .message
            .map(|message| message.chat.id)
            .unwrap_or(ChatId(q.from.id.0 as i64));

        match q_data.as_str() {
            "start" => handle_start(&bot, chat_id, q.from.id, &config).await?,
            "get_meal" => handle_get_meal(&bot, chat_id, q.from.id, &config).await?,
            _ => log::warn!("Unknown callback query command: {}", q_data),
        }
    }

    Ok(())
}

pub async fn send_startup_broadcast(bot: &Bot, config: &BotConfig) {
    for (chat_id, user_name) in &config.known_users {
        let Ok(id) = chat_id.parse::<i64>() else {
            log::error!("invalid chat id in user config: {}", chat_id);
            continue;
        };

        let text = format!("🍖 {}, Бот запущен.\nДа начнется массонабор!", user_name);
        if let Err(e) = bot
            .send_message(ChatId(id), text)
            .reply_markup(make_start_keyboard())
            .await
        {
            log::error!("startup message to {} failed: {}", id, e);
        }
    }
}

pub async fn send_shutdown_broadcast(bot: &Bot, config: &BotConfig) {
    for (chat_id, user_name) in &config.known_users {
        let Ok(id) = chat_id.parse::<i64>() else {
            log::error!("invalid chat id in user config: {}", chat_id);
            continue;
        };

        let text = format!("🍖 {}, Бот остановлен.\nДа начнется сушка!", user_name);
        if let Err(e) = bot.send_message(ChatId(id), text).await {
            log::error!("shutdown message to {} failed: {}", id, e);
        }
    }
}
