pub mod mealplan_parser;
