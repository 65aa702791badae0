use crate::constants::UNKNOWN_USER_MSG;
use crate::data_backend::mealplan_parser::{build_meal_message, fetch_meal_response};
use crate::data_types::{BotConfig, HandlerResult};
use crate::shared_main::{make_get_meal_keyboard, make_retry_keyboard};

use std::time::Instant;
use teloxide::{
    prelude::*,
    types::{ParseMode, UserId},
};

pub async fn start(bot: Bot, msg: Message, config: BotConfig) -> HandlerResult {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    handle_start(&bot, msg.chat.id, user.id, &config).await
}

pub async fn handle_start(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    config: &BotConfig,
) -> HandlerResult {
    match config.display_name(user_id.0) {
        Some(user_name) => {
            bot.send_message(
                chat_id,
                format!(
                    "👋 С возвращением, {}! Нажми кнопку, чтобы получить следующий прием пищи",
                    user_name
                ),
            )
            .reply_markup(make_get_meal_keyboard())
            .await?;
        }
        None => {
            bot.send_message(chat_id, UNKNOWN_USER_MSG).await?;
        }
    }
    Ok(())
}

pub async fn handle_get_meal(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    config: &BotConfig,
) -> HandlerResult {
    let Some(user_name) = config.display_name(user_id.0) else {
        bot.send_message(chat_id, UNKNOWN_USER_MSG).await?;
        return Ok(());
    };

    bot.send_message(
        chat_id,
        format!(
            "👋 Привет, {}! Сейчас подберу для тебя следующий прием пищи.",
            user_name
        ),
    )
    .await?;

    let now = Instant::now();
    let meal_resp = match fetch_meal_response(&config.meal_service_url, user_name).await {
        Ok(meal_resp) => meal_resp,
        Err(e) => {
            log::error!("meal fetch for {} failed: {}", user_name, e);
            return send_error_message(bot, chat_id, &e.to_string()).await;
        }
    };
    log::debug!("Fetch meal: {:.2?}", now.elapsed());

    let now = Instant::now();
    let text = build_meal_message(&meal_resp);
    log::debug!("Build meal msg: {:.2?}", now.elapsed());

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Markdown)
        .reply_markup(make_get_meal_keyboard())
        .await?;

    Ok(())
}

pub async fn send_error_message(bot: &Bot, chat_id: ChatId, text: &str) -> HandlerResult {
    bot.send_message(chat_id, format!("❌ Ошибка: {}", text))
        .reply_markup(make_retry_keyboard())
        .await?;
    Ok(())
}
