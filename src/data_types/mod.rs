pub mod mealplan_data_types;

use std::collections::BTreeMap;

use teloxide::utils::command::BotCommands;
use thiserror::Error;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Запустить бота")]
    Start,
}

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Immutable bot configuration, passed into every handler via dptree deps.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub meal_service_url: String,
    /// chat id (decimal string) -> display name; only listed users may
    /// request meals
    pub known_users: BTreeMap<String, String>,
}

impl BotConfig {
    pub fn display_name(&self, user_id: u64) -> Option<&str> {
        self.known_users
            .get(&user_id.to_string())
            .map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum MealFetchError {
    #[error("Ошибка при получении данных")]
    Transport(#[from] reqwest::Error),
    #[error("Статус ответа не ОК\n{0}")]
    BadStatus(String),
    #[error("Ошибка при разборе данных")]
    Decode(#[from] serde_json::Error),
}
