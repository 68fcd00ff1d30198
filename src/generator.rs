use crate::catalog::sample_recipes;
use crate::error::ChefError;
use crate::meal_plan::build_week;
use crate::model::{
    batch_stamp, first_ingredient, ingredient_phrase, normalize_ingredients,
    placeholder_ingredients, MealPlanDay, Nutrition, Recipe, DEFAULT_CUISINE, DEFAULT_DISH_TYPE,
    DEFAULT_READY_IN_MINUTES, DEFAULT_SERVINGS, PLACEHOLDER_IMAGE,
};
use crate::parsing::{self, Parsed};
use crate::providers::{
    build_meal_plan_prompt, build_natural_prompt, build_structured_prompt, LlmProvider,
};
use chrono::Local;
use log::{debug, error, info, warn};

/// Which stage produced a batch of recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// JSON from the structured prompt
    Structured,
    /// JSON from the natural-language retry
    StructuredRetry,
    /// Heuristic extraction from the retry's free text
    NaturalLanguage,
    /// Templated recipe built without the backend
    Fallback,
}

/// Recipes produced by one generation call.
#[derive(Debug, Clone)]
pub struct Generation {
    pub recipes: Vec<Recipe>,
    pub resolved_by: Resolution,
}

/// Drives the prompt/response cycle against a text generation backend.
///
/// Generation never fails from the caller's point of view: transport errors
/// and unusable responses end in a templated fallback recipe.
pub struct RecipeGenerator {
    provider: Box<dyn LlmProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        RecipeGenerator { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Generate recipes for the given ingredients and dietary preference names.
    pub async fn generate_custom_recipes(
        &self,
        ingredients: &[String],
        preferences: &[String],
    ) -> Vec<Recipe> {
        self.generate(ingredients, preferences).await.recipes
    }

    /// Like [`generate_custom_recipes`](Self::generate_custom_recipes), also
    /// reporting which stage produced the recipes.
    pub async fn generate(&self, ingredients: &[String], preferences: &[String]) -> Generation {
        let ingredients = normalize_ingredients(ingredients);

        match self.structured_attempt(&ingredients, preferences).await {
            Ok(Some(recipes)) => {
                info!("Generated {} recipes from structured response", recipes.len());
                return Generation {
                    recipes,
                    resolved_by: Resolution::Structured,
                };
            }
            Ok(None) => {
                info!("Structured response unusable, retrying with natural-language prompt");
                match self.natural_attempt(&ingredients, preferences).await {
                    Ok(Some(generation)) => return generation,
                    Ok(None) => warn!("Natural-language response unusable"),
                    Err(e) => error!("Recipe generation failed: {}", e),
                }
            }
            Err(e) => error!("Recipe generation failed: {}", e),
        }

        Generation {
            recipes: vec![fallback_recipe(&ingredients, preferences, batch_stamp())],
            resolved_by: Resolution::Fallback,
        }
    }

    async fn structured_attempt(
        &self,
        ingredients: &[String],
        preferences: &[String],
    ) -> Result<Option<Vec<Recipe>>, ChefError> {
        let prompt = build_structured_prompt(ingredients, preferences);
        let text = self.provider.generate(&prompt).await?;
        debug!("Structured response: {} characters", text.len());

        match parsing::parse_structured(&text, ingredients, batch_stamp()) {
            Ok(recipes) if !recipes.is_empty() => Ok(Some(recipes)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("Structured parsing failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn natural_attempt(
        &self,
        ingredients: &[String],
        preferences: &[String],
    ) -> Result<Option<Generation>, ChefError> {
        let prompt = build_natural_prompt(ingredients, preferences);
        let text = self.provider.generate(&prompt).await?;
        debug!("Natural-language response: {} characters", text.len());

        let generation = match parsing::parse_response(&text, ingredients, batch_stamp()) {
            Parsed::Structured(recipes) => Generation {
                recipes,
                resolved_by: Resolution::StructuredRetry,
            },
            Parsed::NaturalLanguage(recipes) => Generation {
                recipes,
                resolved_by: Resolution::NaturalLanguage,
            },
            Parsed::Unresolved => return Ok(None),
        };

        info!(
            "Generated {} recipes on retry ({:?})",
            generation.recipes.len(),
            generation.resolved_by
        );
        Ok(Some(generation))
    }

    /// Seven days of meals starting today.
    ///
    /// The backend is asked for a plan, but the days are filled from the
    /// catalog; a failed request yields the same plan.
    pub async fn generate_weekly_meal_plan(
        &self,
        ingredients: &[String],
        preferences: &[String],
    ) -> Vec<MealPlanDay> {
        let ingredients = normalize_ingredients(ingredients);
        let prompt = build_meal_plan_prompt(&ingredients, preferences);

        match self.provider.generate(&prompt).await {
            Ok(text) => debug!("Meal plan response: {} characters", text.len()),
            Err(e) => error!("Meal plan generation failed: {}", e),
        }

        build_week(Local::now().date_naive(), sample_recipes())
    }
}

/// Templated recipe used when the backend gives nothing usable.
pub fn fallback_recipe(ingredients: &[String], preferences: &[String], stamp: u64) -> Recipe {
    let main = first_ingredient(ingredients);
    let phrase = ingredient_phrase(ingredients);
    let diet_phrase = if preferences.is_empty() {
        "any".to_string()
    } else {
        preferences.join(" and ")
    };
    let summary = if preferences.is_empty() {
        format!("A creative dish featuring {}.", phrase)
    } else {
        format!(
            "A creative dish featuring {} with {} considerations.",
            phrase,
            preferences.join(" and ")
        )
    };

    let id = format!("ai-{}-1", stamp);
    Recipe {
        ingredients: placeholder_ingredients(&id, ingredients, "cup"),
        id,
        title: format!("{} Delight", main),
        image: PLACEHOLDER_IMAGE.to_string(),
        ready_in_minutes: DEFAULT_READY_IN_MINUTES,
        servings: DEFAULT_SERVINGS,
        summary,
        instructions: vec![
            format!("Step 1: Prepare {} by cleaning and chopping into bite-sized pieces", main),
            "Step 2: Heat 2 tablespoons of oil in a large pan over medium heat (2-3 minutes)"
                .to_string(),
            format!("Step 3: Add chopped {} and sauté until lightly browned (5-7 minutes)", main),
            "Step 4: Add remaining ingredients in order of cooking time, stirring frequently"
                .to_string(),
            "Step 5: Season with salt, pepper, and herbs to taste".to_string(),
            "Step 6: Cook until all ingredients are tender and flavors are combined (10-15 minutes)"
                .to_string(),
            "Step 7: Serve hot and enjoy your delicious creation".to_string(),
        ],
        nutrition: Some(Nutrition::placeholder()),
        diets: preferences.to_vec(),
        cuisine_types: vec![DEFAULT_CUISINE.to_string()],
        dish_types: vec![DEFAULT_DISH_TYPE.to_string()],
        source_url: None,
        notes: Some(format!(
            "Chef's tip: Feel free to adjust the cooking time based on your preference. For a more intense flavor, let the ingredients caramelize slightly longer. This recipe is perfect for {} diet.",
            diet_phrase
        )),
        is_favorite: false,
    }
}
