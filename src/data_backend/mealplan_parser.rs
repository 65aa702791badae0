use crate::constants::SHOPPING_LIST_ERR_MSG;
use crate::data_types::mealplan_data_types::{MealResponse, Recipe, ShoppingList};
use crate::data_types::MealFetchError;

use std::time::Instant;

pub async fn fetch_meal_response(
    service_url: &str,
    user_name: &str,
) -> Result<MealResponse, MealFetchError> {
    let client = reqwest::Client::new();
    let query = format!("{}/api/v1/menus/getMeal?user_id={}", service_url, user_name);
    log::debug!("meal request: {}", query);

    let now = Instant::now();
    let resp = client.get(&query).send().await?;
    log::debug!("meal service response: {:.2?}", now.elapsed());

    if !resp.status().is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(MealFetchError::BadStatus(body));
    }

    let bytes = resp.bytes().await?;
    Ok(parse_meal_response(&bytes)?)
}

/// Outer decode only. Recipe blobs and the shopping list stay raw strings,
/// they are decoded one by one while building the message so one bad blob
/// can't take the whole answer down.
pub fn parse_meal_response(bytes: &[u8]) -> Result<MealResponse, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub fn decode_recipe(blob: &str) -> Result<Recipe, serde_json::Error> {
    serde_json::from_str(blob)
}

pub fn decode_shopping_list(blob: &str) -> Result<ShoppingList, serde_json::Error> {
    serde_json::from_str(blob)
}

/// Renders the whole answer as one Markdown message. Never fails: dishes
/// with an unreadable recipe blob fall back to the raw string, a broken
/// shopping list becomes a single error line.
pub fn build_meal_message(meal_resp: &MealResponse) -> String {
    let mut msg = String::from("🍽 *Следующий прием пищи:*\n\n");

    for (i, dish) in meal_resp.meal.dish_names.iter().enumerate() {
        msg += &format!("🍳 {}\n", dish);

        // trailing dishes without a recipe blob get no recipe section
        let Some(blob) = meal_resp.meal.recipes.get(i) else {
            continue;
        };

        match decode_recipe(blob) {
            Ok(recipe) => {
                msg += "📝 Рецепт:\n";
                for step in &recipe.steps {
                    msg += &format!("- {}\n", step);
                }
                msg += "\nИнгредиенты:\n";
                for ingredient in &recipe.ingredients {
                    msg += &format!(
                        "- {}: {:.0} {}\n",
                        ingredient.product_id, ingredient.amount, ingredient.unit
                    );
                }
                msg += "\n";
            }
            Err(e) => {
                log::warn!("recipe blob for '{}' is not valid JSON: {}", dish, e);
                msg += &format!("📝 Рецепт: {}\n\n", blob);
            }
        }
    }

    if !meal_resp.shopping_list.is_empty() {
        msg += "\n";
        msg += &format_shopping_list(&meal_resp.shopping_list);
    }

    msg
}

fn format_shopping_list(blob: &str) -> String {
    let list = match decode_shopping_list(blob) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("shopping list blob is not valid JSON: {}", e);
            return SHOPPING_LIST_ERR_MSG.to_string();
        }
    };

    let mut section = String::from("🛒 *Список покупок:*\n");

    for item in &list.products {
        let item_name = if item.name.is_empty() {
            &item.id
        } else {
            &item.name
        };

        section += &format!("• {}", item_name);
        if item.amount > 0 {
            section += &format!(" ({} г)", item.amount);
        }
        if item.weight_per_pkg > 0.0 {
            section += &format!(" {:.2} кг", item.weight_per_pkg);
        }
        if item.price_per_pkg > 0.0 {
            section += &format!(" - {:.2}₽", item.price_per_pkg);
        }
        section += "\n";
    }

    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::mealplan_data_types::Meal;

    fn meal_response(dishes: &[&str], recipes: &[&str], shopping_list: &str) -> MealResponse {
        MealResponse {
            meal: Meal {
                id: "meal-1".into(),
                dish_ids: dishes.iter().map(|d| format!("id-{}", d)).collect(),
                dish_names: dishes.iter().map(|d| d.to_string()).collect(),
                meal_type: "lunch".into(),
                recipes: recipes.iter().map(|r| r.to_string()).collect(),
                total_nutrition: Default::default(),
            },
            shopping_list: shopping_list.to_string(),
        }
    }

    const OMELETTE_RECIPE: &str =
        r#"{"steps":["Beat eggs"],"ingredients":[{"unit":"g","amount":100,"product_id":"egg"}]}"#;

    #[test]
    fn parse_tolerates_missing_meal() {
        let resp = parse_meal_response(br#"{"shopping_list":""}"#).unwrap();
        assert_eq!(resp.meal, Meal::default());
        assert!(resp.shopping_list.is_empty());
    }

    #[test]
    fn parse_fails_on_malformed_json() {
        assert!(parse_meal_response(b"{\"meal\":").is_err());
        assert!(parse_meal_response(b"not json at all").is_err());
    }

    #[test]
    fn parse_reads_full_payload() {
        let payload = format!(
            r#"{{"meal":{{"id":"m1","ID_dish":["d1"],"dishname":["Omelette"],
                "type":"breakfast","recipe":[{}],
                "total_nutrition":{{"proteins":20,"fats":15,"carbohydrates":2,"calories":230}}}},
                "shopping_list":""}}"#,
            serde_json::to_string(OMELETTE_RECIPE).unwrap()
        );
        let resp = parse_meal_response(payload.as_bytes()).unwrap();
        assert_eq!(resp.meal.dish_names, vec!["Omelette"]);
        assert_eq!(resp.meal.recipes, vec![OMELETTE_RECIPE]);
        assert_eq!(resp.meal.total_nutrition.calories, 230);
    }

    #[test]
    fn recipe_decode_preserves_lengths_and_order() {
        let blob = r#"{"steps":["a","b","c"],"ingredients":[
            {"unit":"g","amount":1,"product_id":"x"},
            {"unit":"kg","amount":2,"product_id":"y"}]}"#;
        let recipe = decode_recipe(blob).unwrap();
        assert_eq!(recipe.steps, vec!["a", "b", "c"]);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].product_id, "x");
        assert_eq!(recipe.ingredients[1].product_id, "y");
    }

    #[test]
    fn message_has_one_section_per_dish_in_order() {
        let resp = meal_response(
            &["Суп", "Каша"],
            &[OMELETTE_RECIPE, OMELETTE_RECIPE],
            "",
        );
        let msg = build_meal_message(&resp);

        assert_eq!(msg.matches("🍳 ").count(), 2);
        assert_eq!(msg.matches("📝 Рецепт:").count(), 2);
        let soup = msg.find("🍳 Суп").unwrap();
        let kasha = msg.find("🍳 Каша").unwrap();
        assert!(soup < kasha);
    }

    #[test]
    fn trailing_dishes_without_recipe_get_no_recipe_section() {
        let resp = meal_response(&["Суп", "Каша"], &[OMELETTE_RECIPE], "");
        let msg = build_meal_message(&resp);

        assert_eq!(msg.matches("🍳 ").count(), 2);
        assert_eq!(msg.matches("📝 Рецепт:").count(), 1);
        // the recipe-less dish is last, nothing follows its name line
        assert!(msg.trim_end().ends_with("🍳 Каша"));
    }

    #[test]
    fn unreadable_recipe_blob_falls_back_to_raw_text() {
        let resp = meal_response(&["Суп"], &["{broken"], "");
        let msg = build_meal_message(&resp);
        assert!(msg.contains("📝 Рецепт: {broken"));
    }

    #[test]
    fn omelette_example() {
        let resp = meal_response(&["Omelette"], &[OMELETTE_RECIPE], "");
        let msg = build_meal_message(&resp);

        assert!(msg.contains("🍳 Omelette"));
        assert!(msg.contains("📝 Рецепт:\n- Beat eggs\n"));
        assert!(msg.contains("Ингредиенты:\n- egg: 100 g\n"));
    }

    #[test]
    fn empty_dish_list_yields_header_only() {
        let resp = meal_response(&[], &[], "");
        assert_eq!(build_meal_message(&resp), "🍽 *Следующий прием пищи:*\n\n");
    }

    #[test]
    fn format_is_idempotent() {
        let resp = meal_response(
            &["Суп", "Каша"],
            &[OMELETTE_RECIPE],
            r#"{"products":[{"id":"Milk","amount":1}]}"#,
        );
        assert_eq!(build_meal_message(&resp), build_meal_message(&resp));
    }

    #[test]
    fn empty_shopping_list_string_emits_no_section() {
        let resp = meal_response(&["Суп"], &[], "");
        let msg = build_meal_message(&resp);
        assert!(!msg.contains("🛒"));
        assert!(!msg.contains(SHOPPING_LIST_ERR_MSG));
    }

    #[test]
    fn malformed_shopping_list_emits_error_line_only() {
        let resp = meal_response(&["Суп"], &[], "{not json");
        let msg = build_meal_message(&resp);

        assert!(msg.contains(SHOPPING_LIST_ERR_MSG));
        assert!(!msg.contains("🛒"));
        // the meal section is untouched
        assert!(msg.contains("🍳 Суп"));
    }

    #[test]
    fn shopping_item_falls_back_to_id_and_skips_zero_clauses() {
        let resp = meal_response(
            &[],
            &[],
            r#"{"products":[{"id":"Apple","name":"","amount":5,"price_per_pkg":150}]}"#,
        );
        let msg = build_meal_message(&resp);
        assert!(msg.contains("• Apple (5 г) - 150.00₽\n"));
        assert!(!msg.contains("кг"));
    }

    #[test]
    fn shopping_item_with_all_clauses() {
        let resp = meal_response(
            &[],
            &[],
            r#"{"products":[{"id":"Apple","name":"Яблоки","weight_per_pkg":1,"amount":5,
                "price_per_pkg":150,"expiration_date":"0001-01-01T00:00:00Z",
                "present_in_fridge":false,
                "nutritional_value_relative":{"proteins":0,"fats":0,"carbohydrates":0,"calories":0}}]}"#,
        );
        let msg = build_meal_message(&resp);
        assert!(msg.contains("🛒 *Список покупок:*\n"));
        assert!(msg.contains("• Яблоки (5 г) 1.00 кг - 150.00₽\n"));
    }
}
