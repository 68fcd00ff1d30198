//! The application layer: user actions on top of the store, the generator
//! and persisted favorites.

use crate::catalog::{search_recipes_by_ingredients, suggest_ingredients};
use crate::generator::RecipeGenerator;
use crate::model::{normalize_ingredients, DietaryPreference, Recipe};
use crate::state::{Action, AppState, Store};
use crate::storage::{
    load_dietary_preferences, load_favorites, save_dietary_preferences, save_favorites,
    KeyValueStore,
};
use log::{debug, info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short user-facing message describing the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

pub struct SmartChef {
    store: Arc<Store>,
    generator: RecipeGenerator,
    storage: Box<dyn KeyValueStore>,
}

impl SmartChef {
    /// Start a session, restoring favorites and preference toggles from `storage`.
    pub fn new(generator: RecipeGenerator, storage: Box<dyn KeyValueStore>) -> Self {
        let mut initial = AppState::default();
        if let Some(preferences) = load_dietary_preferences(storage.as_ref()) {
            initial.dietary_preferences = merge_preferences(preferences);
        }

        let store = Arc::new(Store::new(initial));
        let favorites = load_favorites(storage.as_ref());
        debug!(
            "Restored {} favorites, generating with {}",
            favorites.len(),
            generator.provider_name()
        );
        store.dispatch(Action::LoadFavorites(favorites));

        SmartChef {
            store,
            generator,
            storage,
        }
    }

    /// Shared handle to the store, for subscribing to changes.
    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    pub fn state(&self) -> AppState {
        self.store.state()
    }

    pub fn add_ingredient(&self, ingredient: &str) -> AppState {
        self.store
            .dispatch(Action::AddIngredient(ingredient.to_string()))
    }

    pub fn remove_ingredient(&self, ingredient: &str) -> AppState {
        self.store
            .dispatch(Action::RemoveIngredient(ingredient.to_string()))
    }

    pub fn clear_ingredients(&self) -> AppState {
        self.store.dispatch(Action::ClearIngredients)
    }

    pub fn set_search_query(&self, query: &str) -> AppState {
        self.store.dispatch(Action::SetSearchQuery(query.to_string()))
    }

    /// Up to five common ingredients for the text typed so far.
    pub fn suggestions(&self, input: &str) -> Vec<&'static str> {
        suggest_ingredients(input, &self.store.state().ingredients)
    }

    /// Add or remove `recipe` from favorites and persist the new list.
    pub fn toggle_favorite(&self, recipe: &Recipe) -> Notice {
        let was_favorite = self.store.state().is_favorite(&recipe.id);
        let state = self.store.dispatch(Action::ToggleFavorite(recipe.clone()));
        save_favorites(self.storage.as_ref(), &state.favorites);

        if was_favorite {
            Notice::success("Recipe removed from favorites")
        } else {
            Notice::success("Recipe added to favorites")
        }
    }

    /// Enable or disable a preference and persist all toggles.
    pub fn update_dietary_preference(&self, id: &str, enabled: bool) -> AppState {
        let state = self.store.dispatch(Action::UpdateDietaryPreference {
            id: id.to_string(),
            enabled,
        });
        save_dietary_preferences(self.storage.as_ref(), &state.dietary_preferences);
        state
    }

    /// Favorites matching the text query and diet filter ("all" disables it).
    pub fn filter_favorites(&self, query: &str, diet: &str) -> Vec<Recipe> {
        let diet = (diet != "all").then_some(diet);
        self.store
            .state()
            .filter_favorites(query, diet)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Search the catalog for the current ingredients, asking the generator
    /// when the catalog has nothing.
    pub async fn search_recipes(&self) -> Notice {
        let state = self.store.state();
        let ingredients = normalize_ingredients(&state.ingredients);
        if ingredients.is_empty() {
            return Notice::error("Please add some ingredients first");
        }

        self.store.dispatch(Action::SetLoading(true));

        let found = search_recipes_by_ingredients(&ingredients, &state.enabled_preference_ids());
        if !found.is_empty() {
            info!("Found {} catalog recipes", found.len());
            let count = found.len();
            self.store.dispatch(Action::SetRecipes(found));
            return Notice::success(format!("Found {} recipes!", count));
        }

        let recipes = self
            .generator
            .generate_custom_recipes(&ingredients, &state.enabled_preference_names())
            .await;
        if recipes.is_empty() {
            warn!("Generator returned no recipes");
            self.store.dispatch(Action::SetLoading(false));
            return Notice::error("Failed to find recipes. Please try again.");
        }

        let count = recipes.len();
        self.store.dispatch(Action::SetRecipes(recipes));
        Notice::success(format!("Generated {} custom recipes using AI!", count))
    }

    /// Build a week of meals and store it.
    pub async fn generate_meal_plan(&self) -> Notice {
        let state = self.store.state();
        let ingredients = normalize_ingredients(&state.ingredients);
        if ingredients.is_empty() {
            return Notice::error("Please add some ingredients first");
        }

        self.store.dispatch(Action::SetLoading(true));

        let plan = self
            .generator
            .generate_weekly_meal_plan(&ingredients, &state.enabled_preference_names())
            .await;
        self.store.dispatch(Action::SetMealPlan(plan));
        Notice::success("Meal plan generated successfully!")
    }
}

/// Apply saved toggles onto the built-in preferences, ignoring unknown ids.
fn merge_preferences(saved: Vec<DietaryPreference>) -> Vec<DietaryPreference> {
    let mut preferences = DietaryPreference::defaults();
    for preference in preferences.iter_mut() {
        if let Some(stored) = saved.iter().find(|s| s.id == preference.id) {
            preference.enabled = stored.enabled;
        }
    }
    preferences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_recipes;
    use crate::error::ChefError;
    use crate::providers::LlmProvider;
    use crate::storage::{MemoryStore, DIETARY_PREFERENCES_KEY, FAVORITES_KEY};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always answers with the same text and counts calls.
    struct FixedProvider {
        response: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LlmProvider for FixedProvider {
        fn provider_name(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ChefError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn chef_with(response: &str, storage: MemoryStore) -> (SmartChef, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FixedProvider {
            response: response.to_string(),
            calls: calls.clone(),
        };
        let chef = SmartChef::new(RecipeGenerator::new(Box::new(provider)), Box::new(storage));
        (chef, calls)
    }

    #[tokio::test]
    async fn test_search_requires_ingredients() {
        let (chef, calls) = chef_with("", MemoryStore::default());
        let notice = chef.search_recipes().await;

        assert_eq!(notice, Notice::error("Please add some ingredients first"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!chef.state().loading);
    }

    #[tokio::test]
    async fn test_search_prefers_catalog() {
        let (chef, calls) = chef_with("", MemoryStore::default());
        chef.add_ingredient("Chicken");

        let notice = chef.search_recipes().await;
        assert_eq!(notice.message, "Found 1 recipes!");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let state = chef.state();
        assert!(!state.loading);
        assert_eq!(state.recipes[0].title, "Chicken Stir Fry");
    }

    #[tokio::test]
    async fn test_search_falls_back_to_generator() {
        let (chef, calls) = chef_with(
            r#"{"recipes":[{"title":"Durian Smoothie"}]}"#,
            MemoryStore::default(),
        );
        chef.add_ingredient("durian");

        let notice = chef.search_recipes().await;
        assert_eq!(notice.message, "Generated 1 custom recipes using AI!");
        assert!(notice.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(chef.state().recipes[0].title, "Durian Smoothie");
    }

    #[tokio::test]
    async fn test_diet_filter_sends_catalog_miss_to_generator() {
        let (chef, calls) = chef_with("", MemoryStore::default());
        chef.add_ingredient("chicken");
        chef.update_dietary_preference("vegan", true);

        let notice = chef.search_recipes().await;
        assert!(notice.is_success());
        // Both prompts return nothing usable, so the fallback recipe is shown.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let recipes = chef.state().recipes;
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "chicken Delight");
        assert_eq!(recipes[0].diets, vec!["Vegan"]);
    }

    #[test]
    fn test_toggle_favorite_persists() {
        let storage = MemoryStore::default();
        let (chef, _) = chef_with("", storage);
        let recipe = sample_recipes()[0].clone();

        assert_eq!(chef.toggle_favorite(&recipe).message, "Recipe added to favorites");
        assert!(chef.state().is_favorite("1"));
        assert_eq!(
            chef.toggle_favorite(&recipe).message,
            "Recipe removed from favorites"
        );
        assert!(chef.state().favorites.is_empty());
    }

    #[test]
    fn test_session_restores_saved_state() {
        let storage = MemoryStore::default();
        save_favorites(&storage, &sample_recipes()[1..2]);
        storage
            .set(
                DIETARY_PREFERENCES_KEY,
                r#"[{"id":"keto","name":"Keto","description":"","enabled":true},
                    {"id":"unknown","name":"?","description":"","enabled":true}]"#,
            )
            .unwrap();

        let (chef, _) = chef_with("", storage);
        let state = chef.state();
        assert_eq!(state.favorites.len(), 1);
        assert!(state.favorites[0].is_favorite);
        assert_eq!(state.enabled_preference_ids(), vec!["keto"]);
        assert_eq!(state.dietary_preferences.len(), 6);
    }

    #[test]
    fn test_corrupt_storage_starts_clean() {
        let storage = MemoryStore::default();
        storage.set(FAVORITES_KEY, "not json").unwrap();
        let (chef, _) = chef_with("", storage);
        assert!(chef.state().favorites.is_empty());
    }

    #[test]
    fn test_filter_favorites_with_all() {
        let (chef, _) = chef_with("", MemoryStore::default());
        for recipe in sample_recipes() {
            chef.toggle_favorite(recipe);
        }

        assert_eq!(chef.filter_favorites("", "all").len(), 3);
        assert_eq!(chef.filter_favorites("", "vegan").len(), 1);
        assert_eq!(chef.filter_favorites("stir", "all")[0].id, "1");
    }

    #[tokio::test]
    async fn test_generate_meal_plan() {
        let (chef, calls) = chef_with("Monday: oats", MemoryStore::default());
        chef.add_ingredient("oats");
        let notice = chef.generate_meal_plan().await;

        assert_eq!(notice.message, "Meal plan generated successfully!");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let state = chef.state();
        assert_eq!(state.meal_plan.len(), 7);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_meal_plan_requires_ingredients() {
        let (chef, calls) = chef_with("Monday: oats", MemoryStore::default());
        chef.add_ingredient("   ");

        let notice = chef.generate_meal_plan().await;
        assert_eq!(notice, Notice::error("Please add some ingredients first"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let state = chef.state();
        assert!(state.meal_plan.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_suggestions_exclude_chosen() {
        let (chef, _) = chef_with("", MemoryStore::default());
        chef.add_ingredient("basil");
        assert!(chef.suggestions("bas").is_empty());
        assert_eq!(chef.suggestions("broc"), vec!["broccoli"]);
    }
}
