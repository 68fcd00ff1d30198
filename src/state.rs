//! Application state, its pure transition function and the store that
//! serializes transitions and notifies subscribers.

use crate::model::{normalize_ingredients, DietaryPreference, MealPlanDay, Recipe};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub ingredients: Vec<String>,
    pub recipes: Vec<Recipe>,
    pub favorites: Vec<Recipe>,
    pub dietary_preferences: Vec<DietaryPreference>,
    pub meal_plan: Vec<MealPlanDay>,
    pub loading: bool,
    pub search_query: String,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            ingredients: Vec::new(),
            recipes: Vec::new(),
            favorites: Vec::new(),
            dietary_preferences: DietaryPreference::defaults(),
            meal_plan: Vec::new(),
            loading: false,
            search_query: String::new(),
        }
    }
}

impl AppState {
    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.iter().any(|favorite| favorite.id == recipe_id)
    }

    /// Ids of enabled preferences, used to filter catalog searches.
    pub fn enabled_preference_ids(&self) -> Vec<String> {
        self.dietary_preferences
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Display names of enabled preferences, used in prompts.
    pub fn enabled_preference_names(&self) -> Vec<String> {
        self.dietary_preferences
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.name.clone())
            .collect()
    }

    /// Favorites whose title or ingredients match `query` and, when given,
    /// whose diets include `diet`.
    pub fn filter_favorites(&self, query: &str, diet: Option<&str>) -> Vec<&Recipe> {
        self.favorites
            .iter()
            .filter(|recipe| recipe.mentions(query))
            .filter(|recipe| diet.map_or(true, |diet| recipe.diets.iter().any(|d| d == diet)))
            .collect()
    }

    /// Every diet tag used by a favorite, in first-seen order.
    pub fn favorite_diets(&self) -> Vec<String> {
        let mut diets = Vec::new();
        for diet in self.favorites.iter().flat_map(|recipe| &recipe.diets) {
            if !diets.contains(diet) {
                diets.push(diet.clone());
            }
        }
        diets
    }

    fn refresh_favorite_flags(&mut self) {
        let flags: Vec<bool> = self
            .recipes
            .iter()
            .map(|recipe| self.is_favorite(&recipe.id))
            .collect();
        for (recipe, flag) in self.recipes.iter_mut().zip(flags) {
            recipe.is_favorite = flag;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddIngredient(String),
    RemoveIngredient(String),
    ClearIngredients,
    SetRecipes(Vec<Recipe>),
    ToggleFavorite(Recipe),
    UpdateDietaryPreference { id: String, enabled: bool },
    SetMealPlan(Vec<MealPlanDay>),
    SetLoading(bool),
    SetSearchQuery(String),
    LoadFavorites(Vec<Recipe>),
}

/// The transition function. Pure: the new state depends only on its inputs.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::AddIngredient(ingredient) => {
            // Trimmed and lowercased; blanks and duplicates are ignored.
            if let Some(ingredient) = normalize_ingredients(&[ingredient]).pop() {
                if !next.ingredients.contains(&ingredient) {
                    next.ingredients.push(ingredient);
                }
            }
        }
        Action::RemoveIngredient(ingredient) => {
            next.ingredients.retain(|existing| *existing != ingredient);
        }
        Action::ClearIngredients => next.ingredients.clear(),
        Action::SetRecipes(recipes) => {
            next.recipes = recipes;
            next.loading = false;
            next.refresh_favorite_flags();
        }
        Action::ToggleFavorite(recipe) => {
            if next.is_favorite(&recipe.id) {
                next.favorites.retain(|favorite| favorite.id != recipe.id);
            } else {
                next.favorites.push(Recipe {
                    is_favorite: true,
                    ..recipe
                });
            }
            next.refresh_favorite_flags();
        }
        Action::UpdateDietaryPreference { id, enabled } => {
            for preference in next.dietary_preferences.iter_mut().filter(|p| p.id == id) {
                preference.enabled = enabled;
            }
        }
        Action::SetMealPlan(meal_plan) => {
            next.meal_plan = meal_plan;
            next.loading = false;
        }
        Action::SetLoading(loading) => next.loading = loading,
        Action::SetSearchQuery(query) => next.search_query = query,
        Action::LoadFavorites(favorites) => {
            next.favorites = favorites
                .into_iter()
                .map(|recipe| Recipe {
                    is_favorite: true,
                    ..recipe
                })
                .collect();
            next.refresh_favorite_flags();
        }
    }
    next
}

type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Holds the current state; every change goes through [`Store::dispatch`].
pub struct Store {
    state: Mutex<AppState>,
    subscribers: Mutex<Subscribers>,
}

impl Default for Store {
    fn default() -> Self {
        Store::new(AppState::default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Store {
            state: Mutex::new(initial),
            subscribers: Mutex::new(Subscribers {
                next_id: 0,
                listeners: Vec::new(),
            }),
        }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> AppState {
        lock(&self.state).clone()
    }

    /// Apply `action`, notify subscribers and return the new state.
    ///
    /// Transitions are serialized; listeners run after the state lock is
    /// released, so they may read the store.
    pub fn dispatch(&self, action: Action) -> AppState {
        let next = {
            let mut state = lock(&self.state);
            let next = reduce(&state, action);
            *state = next.clone();
            next
        };

        let listeners: Vec<Listener> = lock(&self.subscribers)
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&next);
        }
        next
    }

    pub fn subscribe(&self, listener: impl Fn(&AppState) + Send + Sync + 'static) -> SubscriptionId {
        let listener: Listener = Arc::new(listener);
        let mut subscribers = lock(&self.subscribers);
        let id = SubscriptionId(subscribers.next_id);
        subscribers.next_id += 1;
        subscribers.listeners.push((id, listener));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.listeners.len();
        subscribers.listeners.retain(|(existing, _)| *existing != id);
        subscribers.listeners.len() != before
    }
}
