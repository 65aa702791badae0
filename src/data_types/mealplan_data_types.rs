use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level answer of the meal planning service. `shopping_list` is kept
/// as the raw string it arrives as, it holds another JSON document.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct MealResponse {
    pub meal: Meal,
    pub shopping_list: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Meal {
    pub id: String,
    #[serde(rename = "ID_dish")]
    pub dish_ids: Vec<String>,
    /// ordered in parallel with `recipes`, which may be shorter
    #[serde(rename = "dishname")]
    pub dish_names: Vec<String>,
    #[serde(rename = "type")]
    pub meal_type: String,
    /// each element is itself a JSON-encoded [`Recipe`]
    #[serde(rename = "recipe")]
    pub recipes: Vec<String>,
    pub total_nutrition: Nutrition,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Nutrition {
    pub proteins: i64,
    pub fats: i64,
    pub carbohydrates: i64,
    pub calories: i64,
}

/// Decoded form of one recipe blob from `Meal::recipes`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Recipe {
    pub steps: Vec<String>,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Ingredient {
    pub unit: String,
    pub amount: f64,
    pub product_id: String,
}

/// Decoded form of the `shopping_list` blob.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ShoppingList {
    pub products: Vec<ShoppingListItem>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ShoppingListItem {
    pub id: String,
    /// display name, empty means "use `id` instead"
    pub name: String,
    pub weight_per_pkg: f64,
    pub amount: i64,
    pub price_per_pkg: f64,
    pub expiration_date: Option<DateTime<Utc>>,
    pub present_in_fridge: bool,
    pub nutritional_value_relative: Nutrition,
}
