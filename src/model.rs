use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Image shown for recipes whose source provides none.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=400";

pub const DEFAULT_READY_IN_MINUTES: u32 = 30;
pub const DEFAULT_SERVINGS: u32 = 4;
pub const DEFAULT_UNIT: &str = "piece";
pub const DEFAULT_CUISINE: &str = "fusion";
pub const DEFAULT_DISH_TYPE: &str = "main course";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub summary: String,
    pub instructions: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub cuisine_types: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Recipe {
    /// Case-insensitive match of `query` against the title and ingredient names.
    pub fn mentions(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.name.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl Ingredient {
    /// An ingredient with the placeholder amount and unit.
    pub fn placeholder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Ingredient {
            id: id.into(),
            name: name.into(),
            amount: 1.0,
            unit: DEFAULT_UNIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Nutrition {
    /// Fixed profile used whenever the source provides no nutrition data.
    pub fn placeholder() -> Self {
        Nutrition {
            calories: 350.0,
            protein: 20.0,
            carbs: 30.0,
            fat: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDay {
    pub id: String,
    pub day: String,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub meals: Meals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Option<Recipe>,
    pub lunch: Option<Recipe>,
    pub dinner: Option<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryPreference {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

impl DietaryPreference {
    fn new(id: &str, name: &str, description: &str) -> Self {
        DietaryPreference {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            enabled: false,
        }
    }

    /// The built-in preference toggles, all disabled.
    pub fn defaults() -> Vec<DietaryPreference> {
        vec![
            Self::new("vegetarian", "Vegetarian", "No meat or fish"),
            Self::new("vegan", "Vegan", "No animal products"),
            Self::new("gluten-free", "Gluten Free", "No gluten-containing ingredients"),
            Self::new("keto", "Keto", "Low carb, high fat"),
            Self::new("paleo", "Paleo", "Whole foods, no processed"),
            Self::new("dairy-free", "Dairy Free", "No dairy products"),
        ]
    }
}

/// Stands in for the user's ingredients when the list is empty.
const PANTRY_STAPLES: &str = "pantry staples";

/// Generic steps used when a source provides no instructions.
pub fn default_instructions() -> Vec<String> {
    ["Prepare all ingredients", "Follow cooking steps", "Serve and enjoy"]
        .iter()
        .map(|step| step.to_string())
        .collect()
}

/// The user's ingredients joined for prose ("chicken, rice").
pub(crate) fn ingredient_phrase(ingredients: &[String]) -> String {
    if ingredients.is_empty() {
        PANTRY_STAPLES.to_string()
    } else {
        ingredients.join(", ")
    }
}

pub(crate) fn first_ingredient(ingredients: &[String]) -> &str {
    ingredients
        .first()
        .map(String::as_str)
        .unwrap_or(PANTRY_STAPLES)
}

/// The user's ingredient list as recipe ingredients with amount 1 of `unit`.
pub(crate) fn placeholder_ingredients(
    id_prefix: &str,
    ingredients: &[String],
    unit: &str,
) -> Vec<Ingredient> {
    let fallback = [PANTRY_STAPLES.to_string()];
    let names = if ingredients.is_empty() {
        &fallback[..]
    } else {
        ingredients
    };

    names
        .iter()
        .enumerate()
        .map(|(index, name)| Ingredient {
            unit: unit.to_string(),
            ..Ingredient::placeholder(format!("{}-ing-{}", id_prefix, index), name.as_str())
        })
        .collect()
}

/// Push `tag` unless an equal tag is already present.
pub(crate) fn push_unique(tags: &mut Vec<String>, tag: impl Into<String>) {
    let tag = tag.into();
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Trim, lowercase and drop blank entries from a user ingredient list.
pub fn normalize_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Vec<String> {
    let mut normalized = Vec::new();
    for ingredient in ingredients {
        let ingredient = ingredient.as_ref().trim().to_lowercase();
        if !ingredient.is_empty() {
            push_unique(&mut normalized, ingredient);
        }
    }
    normalized
}

static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp used to build recipe ids.
///
/// Strictly increasing within the process, so two batches generated in the
/// same millisecond still get distinct ids.
pub fn batch_stamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default();

    let mut last = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_STAMP.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}
