use crate::error::ChefError;
use crate::model::{
    default_instructions, ingredient_phrase, placeholder_ingredients, push_unique, Ingredient,
    Nutrition, Recipe, DEFAULT_CUISINE, DEFAULT_DISH_TYPE, DEFAULT_READY_IN_MINUTES,
    DEFAULT_SERVINGS, DEFAULT_UNIT, PLACEHOLDER_IMAGE,
};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Where a source object sits in the response.
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// Element `index` of a `{"recipes": [...]}` batch
    Batch(usize),
    /// The response object is itself the recipe
    Single,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::Batch(index) => index,
            Slot::Single => 0,
        }
    }
}

/// Map a parsed JSON value to recipes, defaulting every missing field.
///
/// A `recipes` array is mapped element by element; any other object is
/// treated as a single recipe. Only a value that is not an object at all (or
/// a batch without a single object in it) is an error.
pub fn map_recipes(
    value: &Value,
    ingredients: &[String],
    stamp: u64,
) -> Result<Vec<Recipe>, ChefError> {
    let object = value.as_object().ok_or_else(|| {
        ChefError::ParseError(format!("expected a JSON object, got {}", kind_of(value)))
    })?;

    let recipes = match object.get("recipes").and_then(Value::as_array) {
        Some(batch) => {
            let recipes: Vec<Recipe> = batch
                .iter()
                .filter_map(Value::as_object)
                .enumerate()
                .map(|(index, source)| map_recipe(source, ingredients, Slot::Batch(index), stamp))
                .collect();

            if recipes.len() < batch.len() {
                warn!(
                    "Skipped {} non-object entries in recipe batch",
                    batch.len() - recipes.len()
                );
            }
            if recipes.is_empty() {
                return Err(ChefError::ParseError(
                    "recipe batch holds no recipe objects".to_string(),
                ));
            }
            recipes
        }
        None => vec![map_recipe(object, ingredients, Slot::Single, stamp)],
    };

    debug!("Mapped {} recipes from structured response", recipes.len());
    Ok(recipes)
}

fn map_recipe(
    source: &Map<String, Value>,
    ingredients: &[String],
    slot: Slot,
    stamp: u64,
) -> Recipe {
    let id = format!("gemini-{}-{}", stamp, slot.index());
    let phrase = ingredient_phrase(ingredients);

    let cuisine_types = tags(source, "cuisine")
        .or_else(|| tags(source, "cuisineTypes"))
        .unwrap_or_else(|| vec![DEFAULT_CUISINE.to_string()]);

    let title = text(source, "title").unwrap_or_else(|| match slot {
        Slot::Batch(index) => format!("Recipe {} with {}", index + 1, phrase),
        Slot::Single => format!("Recipe with {}", phrase),
    });

    let summary = text(source, "description")
        .or_else(|| text(source, "summary"))
        .unwrap_or_else(|| match slot {
            Slot::Batch(_) => format!("A delicious {} recipe using {}.", cuisine_types[0], phrase),
            Slot::Single => format!("A delicious recipe using {}.", phrase),
        });

    let recipe_ingredients = source
        .get("ingredients")
        .map(|value| map_ingredients(value, &id))
        .filter(|mapped| !mapped.is_empty())
        .unwrap_or_else(|| placeholder_ingredients(&id, ingredients, DEFAULT_UNIT));

    Recipe {
        title,
        image: text(source, "image").unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        ready_in_minutes: positive_whole(source.get("cookingTime"))
            .or_else(|| positive_whole(source.get("readyInMinutes")))
            .unwrap_or(DEFAULT_READY_IN_MINUTES),
        servings: positive_whole(source.get("servings")).unwrap_or(DEFAULT_SERVINGS),
        summary,
        instructions: source
            .get("instructions")
            .map(steps)
            .filter(|steps| !steps.is_empty())
            .unwrap_or_else(default_instructions),
        ingredients: recipe_ingredients,
        nutrition: Some(
            source
                .get("nutrition")
                .and_then(Value::as_object)
                .map(map_nutrition)
                .unwrap_or_else(Nutrition::placeholder),
        ),
        diets: tags(source, "diets").unwrap_or_default(),
        cuisine_types,
        dish_types: tags(source, "dishTypes")
            .unwrap_or_else(|| vec![DEFAULT_DISH_TYPE.to_string()]),
        source_url: text(source, "sourceUrl"),
        notes: text(source, "notes"),
        is_favorite: false,
        id,
    }
}

/// Non-blank string field, trimmed.
fn text(source: &Map<String, Value>, key: &str) -> Option<String> {
    source
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// A positive whole number: a JSON number (rounded) or a string starting
/// with digits, such as `"25 minutes"`.
fn positive_whole(value: Option<&Value>) -> Option<u32> {
    let number = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let digits: String = text
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if number.is_finite() && number >= 0.5 {
        Some(number.round().min(u32::MAX as f64) as u32)
    } else {
        None
    }
}

/// A non-negative amount given as a number or a numeric string.
fn amount(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number > 0.0).then_some(number)
}

/// A tag list from an array of strings or a single string. `None` when the
/// field is absent or holds no usable tag.
fn tags(source: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let mut collected = Vec::new();
    match source.get(key)? {
        Value::String(tag) => {
            if !tag.trim().is_empty() {
                collected.push(tag.trim().to_string());
            }
        }
        Value::Array(items) => {
            for tag in items.iter().filter_map(Value::as_str).map(str::trim) {
                if !tag.is_empty() {
                    push_unique(&mut collected, tag);
                }
            }
        }
        _ => {}
    }
    (!collected.is_empty()).then_some(collected)
}

fn steps(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(String::from)
            .collect(),
        Value::String(block) => block
            .lines()
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn map_ingredients(value: &Value, recipe_id: &str) -> Vec<Ingredient> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => {
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_string(), 1.0, DEFAULT_UNIT.to_string()))
            }
            Value::Object(fields) => text(fields, "name").map(|name| {
                (
                    name,
                    amount(fields.get("amount")).unwrap_or(1.0),
                    text(fields, "unit").unwrap_or_else(|| DEFAULT_UNIT.to_string()),
                )
            }),
            _ => None,
        })
        .enumerate()
        .map(|(index, (name, amount, unit))| Ingredient {
            id: format!("{}-ing-{}", recipe_id, index),
            name,
            amount,
            unit,
        })
        .collect()
}

fn map_nutrition(fields: &Map<String, Value>) -> Nutrition {
    let placeholder = Nutrition::placeholder();
    let field = |key: &str, default: f64| {
        fields
            .get(key)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(default)
    };

    Nutrition {
        calories: field("calories", placeholder.calories),
        protein: field("protein", placeholder.protein),
        carbs: field("carbs", placeholder.carbs),
        fat: field("fat", placeholder.fat),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
