//! Static recipe catalog and the local ingredient search over it.

use crate::model::{Ingredient, Nutrition, Recipe};
use std::sync::OnceLock;

/// Ingredients offered as suggestions while typing.
pub const COMMON_INGREDIENTS: &[&str] = &[
    "chicken", "beef", "salmon", "eggs", "milk", "cheese", "tomatoes", "onions", "garlic",
    "potatoes", "rice", "pasta", "bread", "butter", "olive oil", "salt", "pepper", "basil",
    "oregano", "lemon", "spinach", "broccoli",
];

const MAX_SUGGESTIONS: usize = 5;

struct CatalogEntry {
    id: &'static str,
    title: &'static str,
    image: &'static str,
    ready_in_minutes: u32,
    servings: u32,
    summary: &'static str,
    instructions: &'static [&'static str],
    ingredients: &'static [(&'static str, f64, &'static str)],
    nutrition: (f64, f64, f64, f64),
    diets: &'static [&'static str],
    cuisine_types: &'static [&'static str],
    dish_types: &'static [&'static str],
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "1",
        title: "Chicken Stir Fry",
        image: "https://images.pexels.com/photos/1109197/pexels-photo-1109197.jpeg?auto=compress&cs=tinysrgb&w=400",
        ready_in_minutes: 20,
        servings: 4,
        summary: "A quick and healthy stir fry with fresh vegetables and tender chicken.",
        instructions: &[
            "Step 1: Heat 2 tablespoons of oil in a large wok or pan over high heat (2-3 minutes)",
            "Step 2: Add chicken pieces and cook until browned on all sides (5-7 minutes)",
            "Step 3: Add minced garlic and ginger, stir for 30 seconds until fragrant",
            "Step 4: Add mixed vegetables and stir fry for 3-4 minutes until crisp-tender",
            "Step 5: Pour in soy sauce and toss to combine all ingredients",
            "Step 6: Cook for 1-2 more minutes until sauce is absorbed",
            "Step 7: Serve immediately over steamed rice",
        ],
        ingredients: &[
            ("Chicken breast", 1.0, "lb"),
            ("Mixed vegetables", 2.0, "cups"),
            ("Soy sauce", 3.0, "tbsp"),
            ("Garlic", 2.0, "cloves"),
            ("Ginger", 1.0, "tsp"),
        ],
        nutrition: (320.0, 28.0, 12.0, 18.0),
        diets: &["gluten-free"],
        cuisine_types: &["Asian"],
        dish_types: &["main course"],
    },
    CatalogEntry {
        id: "2",
        title: "Caprese Salad",
        image: "https://images.pexels.com/photos/1199957/pexels-photo-1199957.jpeg?auto=compress&cs=tinysrgb&w=400",
        ready_in_minutes: 10,
        servings: 2,
        summary: "Fresh mozzarella, tomatoes, and basil drizzled with balsamic glaze.",
        instructions: &[
            "Step 1: Slice tomatoes into 1/4-inch thick rounds (2-3 minutes)",
            "Step 2: Slice fresh mozzarella into similar thickness rounds (1-2 minutes)",
            "Step 3: Arrange alternating slices of tomato and mozzarella on a serving plate",
            "Step 4: Tuck fresh basil leaves between the slices",
            "Step 5: Drizzle with extra virgin olive oil and balsamic glaze",
            "Step 6: Season generously with sea salt and freshly ground black pepper",
            "Step 7: Let stand for 5 minutes to allow flavors to meld before serving",
        ],
        ingredients: &[
            ("Fresh mozzarella", 8.0, "oz"),
            ("Tomatoes", 2.0, "large"),
            ("Fresh basil", 1.0, "handful"),
            ("Olive oil", 2.0, "tbsp"),
            ("Balsamic glaze", 1.0, "tbsp"),
        ],
        nutrition: (280.0, 16.0, 8.0, 22.0),
        diets: &["vegetarian", "gluten-free"],
        cuisine_types: &["Italian"],
        dish_types: &["salad", "appetizer"],
    },
    CatalogEntry {
        id: "3",
        title: "Quinoa Buddha Bowl",
        image: "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=400",
        ready_in_minutes: 25,
        servings: 2,
        summary: "Nutritious quinoa bowl with roasted vegetables and tahini dressing.",
        instructions: &[
            "Step 1: Rinse quinoa thoroughly under cold water (1 minute)",
            "Step 2: Cook quinoa in 2 cups of water for 15-20 minutes until fluffy",
            "Step 3: Preheat oven to 400°F and line a baking sheet with parchment paper",
            "Step 4: Chop sweet potato into 1-inch cubes and toss with olive oil and salt",
            "Step 5: Roast vegetables on baking sheet for 20-25 minutes until tender",
            "Step 6: Prepare tahini dressing by whisking tahini, lemon juice, and water",
            "Step 7: Assemble bowls with quinoa, roasted vegetables, and drizzle with dressing",
        ],
        ingredients: &[
            ("Quinoa", 1.0, "cup"),
            ("Sweet potato", 1.0, "large"),
            ("Chickpeas", 1.0, "can"),
            ("Tahini", 2.0, "tbsp"),
            ("Lemon juice", 1.0, "tbsp"),
        ],
        nutrition: (420.0, 18.0, 65.0, 12.0),
        diets: &["vegan", "gluten-free"],
        cuisine_types: &["Mediterranean"],
        dish_types: &["main course", "lunch"],
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl CatalogEntry {
    fn to_recipe(&self) -> Recipe {
        let (calories, protein, carbs, fat) = self.nutrition;
        Recipe {
            id: self.id.to_string(),
            title: self.title.to_string(),
            image: self.image.to_string(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
            summary: self.summary.to_string(),
            instructions: strings(self.instructions),
            ingredients: self
                .ingredients
                .iter()
                .enumerate()
                .map(|(index, (name, amount, unit))| Ingredient {
                    id: (index + 1).to_string(),
                    name: name.to_string(),
                    amount: *amount,
                    unit: unit.to_string(),
                })
                .collect(),
            nutrition: Some(Nutrition {
                calories,
                protein,
                carbs,
                fat,
            }),
            diets: strings(self.diets),
            cuisine_types: strings(self.cuisine_types),
            dish_types: strings(self.dish_types),
            source_url: None,
            notes: None,
            is_favorite: false,
        }
    }
}

/// The full catalog, in catalog order.
pub fn sample_recipes() -> &'static [Recipe] {
    static RECIPES: OnceLock<Vec<Recipe>> = OnceLock::new();
    RECIPES.get_or_init(|| ENTRIES.iter().map(CatalogEntry::to_recipe).collect())
}

/// Catalog recipes matching at least one ingredient and the diet filter.
///
/// An ingredient matches when it is a case-insensitive substring of the
/// title or of any ingredient name. A recipe passes the diet filter when the
/// filter is empty or shares at least one tag with the recipe's diets.
pub fn search_recipes_by_ingredients(
    ingredients: &[String],
    diet_filters: &[String],
) -> Vec<Recipe> {
    sample_recipes()
        .iter()
        .filter(|recipe| ingredients.iter().any(|ingredient| recipe.mentions(ingredient)))
        .filter(|recipe| {
            diet_filters.is_empty() || diet_filters.iter().any(|diet| recipe.diets.contains(diet))
        })
        .cloned()
        .collect()
}

/// Up to five common ingredients containing `input` that are not already chosen.
pub fn suggest_ingredients(input: &str, chosen: &[String]) -> Vec<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Vec::new();
    }

    COMMON_INGREDIENTS
        .iter()
        .copied()
        .filter(|candidate| candidate.contains(input.as_str()))
        .filter(|candidate| !chosen.iter().any(|c| c == candidate))
        .take(MAX_SUGGESTIONS)
        .collect()
}
