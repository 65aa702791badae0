pub const UNKNOWN_USER_MSG: &str =
    "⚠️ Извините, но я вас не знаю. Обратитесь к администратору для получения доступа.";

pub const SHOPPING_LIST_ERR_MSG: &str = "❌ Ошибка в формате списка покупок";

pub const GET_MEAL_BUTTON: &str = "Получить следующий прием пищи";
pub const RETRY_BUTTON: &str = "Попробовать снова";
pub const START_BUTTON: &str = "Старт!";
