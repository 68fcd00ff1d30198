pub mod app;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod meal_plan;
pub mod model;
pub mod parsing;
pub mod providers;
pub mod state;
pub mod storage;

// Re-export commonly used types
pub use app::{Notice, NoticeLevel, SmartChef};
pub use builder::SmartChefBuilder;
pub use catalog::{sample_recipes, search_recipes_by_ingredients, suggest_ingredients};
pub use config::{ChefConfig, GenerationConfig, StorageConfig};
pub use error::ChefError;
pub use generator::{fallback_recipe, Generation, RecipeGenerator, Resolution};
pub use model::{DietaryPreference, Ingredient, MealPlanDay, Meals, Nutrition, Recipe};
pub use parsing::{parse_response, Parsed};
pub use providers::{create_provider, GoogleProvider, LlmProvider};
pub use state::{Action, AppState, Store};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use log::debug;

fn generator_from_config() -> Result<RecipeGenerator, ChefError> {
    let config = ChefConfig::load()?;
    let provider = create_provider(&config.generation)?;
    debug!("Using {} provider", provider.provider_name());
    Ok(RecipeGenerator::new(provider))
}

/// Generate recipes for `ingredients` with the configured backend.
///
/// Backend failures end in a fallback recipe; only configuration problems
/// and an empty ingredient list are errors.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), smartchef::ChefError> {
/// let ingredients = vec!["chicken".to_string(), "rice".to_string()];
/// let recipes = smartchef::generate_custom_recipes(&ingredients, &[]).await?;
/// assert!(!recipes.is_empty());
/// # Ok(())
/// # }
/// ```
pub async fn generate_custom_recipes(
    ingredients: &[String],
    preferences: &[String],
) -> Result<Vec<Recipe>, ChefError> {
    if model::normalize_ingredients(ingredients).is_empty() {
        return Err(ChefError::EmptyIngredients);
    }

    let generator = generator_from_config()?;
    Ok(generator
        .generate_custom_recipes(ingredients, preferences)
        .await)
}

/// A week of meals from the configured backend.
///
/// Fails with [`ChefError::EmptyIngredients`] before any request when no
/// usable ingredient is given.
pub async fn generate_weekly_meal_plan(
    ingredients: &[String],
    preferences: &[String],
) -> Result<Vec<MealPlanDay>, ChefError> {
    if model::normalize_ingredients(ingredients).is_empty() {
        return Err(ChefError::EmptyIngredients);
    }

    let generator = generator_from_config()?;
    Ok(generator
        .generate_weekly_meal_plan(ingredients, preferences)
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_free_functions_reject_blank_ingredients() {
        let blank = vec!["  ".to_string(), String::new()];

        let recipes = generate_custom_recipes(&blank, &[]).await;
        assert!(matches!(recipes, Err(ChefError::EmptyIngredients)));

        let plan = generate_weekly_meal_plan(&blank, &[]).await;
        assert!(matches!(plan, Err(ChefError::EmptyIngredients)));
    }
}
