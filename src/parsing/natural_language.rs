use crate::model::{
    default_instructions, first_ingredient, ingredient_phrase, placeholder_ingredients, Nutrition,
    Recipe, DEFAULT_CUISINE, DEFAULT_DISH_TYPE, DEFAULT_READY_IN_MINUTES, DEFAULT_SERVINGS,
    DEFAULT_UNIT, PLACEHOLDER_IMAGE,
};
use log::debug;

const MAX_TITLES: usize = 3;
const MAX_STEPS: usize = 8;
const SUMMARY_CHARS: usize = 200;
const GENERATED_NOTE: &str = "This recipe was generated from AI text. Feel free to adjust ingredients and cooking times to your preference.";

/// Recover recipes from free text when no JSON could be used.
///
/// Lines that look like titles (enumerated and capitalised, all caps, or
/// mentioning "Recipe"/"Dish") become up to three recipes with placeholder
/// steps; body text is not matched to individual titles. Without any
/// title-like line, one recipe is built whose steps are the first lines of
/// the text. Blank text yields no recipes.
pub fn extract_recipes(text: &str, ingredients: &[String], stamp: u64) -> Vec<Recipe> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Vec::new();
    }

    let titles: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| is_title_line(line))
        .take(MAX_TITLES)
        .collect();
    debug!(
        "Natural-language extraction: {} lines, {} title candidates",
        lines.len(),
        titles.len()
    );

    if titles.is_empty() {
        vec![single_recipe(text, &lines, ingredients, stamp)]
    } else {
        titles
            .iter()
            .enumerate()
            .map(|(index, line)| titled_recipe(line, index, ingredients, stamp))
            .collect()
    }
}

fn single_recipe(text: &str, lines: &[&str], ingredients: &[String], stamp: u64) -> Recipe {
    let steps: Vec<String> = lines
        .iter()
        .filter(|line| !line.contains("Recipe") && !line.contains("Ingredients"))
        .take(MAX_STEPS)
        .map(|line| match strip_enumeration(line) {
            Some(rest) => format!("Step: {}", rest),
            None => line.to_string(),
        })
        .collect();

    let id = format!("nl-{}-0", stamp);
    Recipe {
        title: format!("Creative {} Recipe", first_ingredient(ingredients)),
        summary: truncate_summary(text.trim()),
        instructions: if steps.is_empty() {
            default_instructions()
        } else {
            steps
        },
        ..base_recipe(id, ingredients)
    }
}

fn titled_recipe(line: &str, index: usize, ingredients: &[String], stamp: u64) -> Recipe {
    let title = strip_enumeration(line).unwrap_or(line).trim();
    let title = if title.is_empty() {
        format!("Recipe {}", index + 1)
    } else {
        title.to_string()
    };

    let id = format!("nl-{}-{}", stamp, index);
    Recipe {
        title,
        summary: format!("A delicious recipe using {}.", ingredient_phrase(ingredients)),
        instructions: [
            "Step 1: Prepare all ingredients",
            "Step 2: Follow the cooking instructions",
            "Step 3: Season to taste",
            "Step 4: Cook until done",
            "Step 5: Serve and enjoy",
        ]
        .iter()
        .map(|step| step.to_string())
        .collect(),
        ..base_recipe(id, ingredients)
    }
}

fn base_recipe(id: String, ingredients: &[String]) -> Recipe {
    Recipe {
        ingredients: placeholder_ingredients(&id, ingredients, DEFAULT_UNIT),
        id,
        title: String::new(),
        image: PLACEHOLDER_IMAGE.to_string(),
        ready_in_minutes: DEFAULT_READY_IN_MINUTES,
        servings: DEFAULT_SERVINGS,
        summary: String::new(),
        instructions: Vec::new(),
        nutrition: Some(Nutrition::placeholder()),
        diets: Vec::new(),
        cuisine_types: vec![DEFAULT_CUISINE.to_string()],
        dish_types: vec![DEFAULT_DISH_TYPE.to_string()],
        source_url: None,
        notes: Some(GENERATED_NOTE.to_string()),
        is_favorite: false,
    }
}

fn is_title_line(line: &str) -> bool {
    let enumerated_capital = strip_enumeration(line)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase());

    enumerated_capital || is_all_caps(line) || line.contains("Recipe") || line.contains("Dish")
}

/// A line of at least two characters made only of uppercase ASCII letters
/// and whitespace, starting with a letter.
fn is_all_caps(line: &str) -> bool {
    line.chars().count() >= 2
        && line.starts_with(|c: char| c.is_ascii_uppercase())
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

/// Text after a leading `12.` or `12)` marker and its whitespace.
fn strip_enumeration(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..]
        .strip_prefix('.')
        .or_else(|| line[digits..].strip_prefix(')'))?;
    Some(rest.trim_start())
}

/// The first 200 characters followed by an ellipsis, even for short text.
fn truncate_summary(text: &str) -> String {
    let cut = text
        .char_indices()
        .nth(SUMMARY_CHARS)
        .map_or(text.len(), |(cut, _)| cut);
    format!("{}...", &text[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_ingredients() -> Vec<String> {
        vec!["salmon".to_string(), "lemon".to_string()]
    }

    #[test]
    fn test_plain_text_gives_one_recipe() {
        let text = "Start by warming the pan.\n1. add the salmon skin side down\nIngredients: salmon, lemon\n\nsqueeze lemon over the top";
        let recipes = extract_recipes(text, &user_ingredients(), 5);

        assert_eq!(recipes.len(), 1);
        let recipe = &recipes[0];
        assert_eq!(recipe.title, "Creative salmon Recipe");
        assert_eq!(recipe.id, "nl-5-0");
        assert_eq!(
            recipe.instructions,
            vec![
                "Start by warming the pan.",
                "Step: add the salmon skin side down",
                "squeeze lemon over the top",
            ]
        );
        assert_eq!(recipe.summary, format!("{}...", text));
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].unit, "piece");
        assert!(recipe.notes.is_some());
    }

    #[test]
    fn test_steps_are_capped_at_eight() {
        let text = (1..=12)
            .map(|n| format!("stir batch {}", n))
            .collect::<Vec<_>>()
            .join("\n");
        let recipes = extract_recipes(&text, &user_ingredients(), 1);
        assert_eq!(recipes[0].instructions.len(), 8);
        assert_eq!(recipes[0].instructions[7], "stir batch 8");
    }

    #[test]
    fn test_long_text_summary_is_truncated() {
        let text = "é".repeat(250);
        let recipe = &extract_recipes(&text, &user_ingredients(), 1)[0];
        assert_eq!(recipe.summary.chars().count(), 203);
        assert!(recipe.summary.ends_with("..."));
    }

    #[test]
    fn test_short_summary_keeps_ellipsis() {
        let recipe = &extract_recipes("  just stir the pot  ", &user_ingredients(), 1)[0];
        assert_eq!(recipe.summary, "just stir the pot...");
    }

    #[test]
    fn test_title_lines_become_recipes() {
        let text = "Here are some ideas:\n1. Lemon Salmon\nBake it.\nGRILLED SALMON\nA Quick Dish for two\n2. Salmon Cakes\n";
        let recipes = extract_recipes(text, &user_ingredients(), 3);

        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Lemon Salmon", "GRILLED SALMON", "A Quick Dish for two"]);
        assert_eq!(recipes[0].instructions.len(), 5);
        assert_eq!(recipes[2].id, "nl-3-2");
        assert_eq!(
            recipes[1].summary,
            "A delicious recipe using salmon, lemon."
        );
    }

    #[test]
    fn test_title_detection() {
        assert!(is_title_line("3. Herb Butter"));
        assert!(is_title_line("3)Herb Butter"));
        assert!(is_title_line("SIDE SALAD"));
        assert!(is_title_line("My favourite Recipe"));
        assert!(!is_title_line("3. herb butter"));
        assert!(!is_title_line("A"));
        assert!(!is_title_line("SALAD 2"));
        assert!(!is_title_line("cook it slowly"));
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(extract_recipes("", &user_ingredients(), 1).is_empty());
        assert!(extract_recipes(" \n\t\n", &user_ingredients(), 1).is_empty());
    }

    #[test]
    fn test_only_excluded_lines_use_default_steps() {
        let text = "Ingredients: salmon";
        let recipes = extract_recipes(text, &user_ingredients(), 1);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].instructions, default_instructions());
    }
}
