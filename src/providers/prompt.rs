/// Instructions asking the model for a strict `{"recipes": [...]}` object.
///
/// Loaded from `recipe_prompt.txt` at compile time so the wording can be
/// edited without dealing with Rust string syntax.
pub const RECIPE_JSON_PROMPT: &str = include_str!("recipe_prompt.txt");

/// ` and ` joined preferences, or `None` when there are none.
fn preference_phrase(preferences: &[String]) -> Option<String> {
    let preferences: Vec<&str> = preferences
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if preferences.is_empty() {
        None
    } else {
        Some(preferences.join(" and "))
    }
}

/// Prompt for the first, structured attempt.
pub fn build_structured_prompt(ingredients: &[String], preferences: &[String]) -> String {
    let dietary = preference_phrase(preferences)
        .map(|phrase| format!("\nDietary preference: \"{}\"", phrase))
        .unwrap_or_default();

    format!(
        "{}\n**User Input:**\nIngredients: \"{}\"{}",
        RECIPE_JSON_PROMPT,
        ingredients.join(", "),
        dietary
    )
}

/// Prompt for the retry, asking for plain prose recipes.
pub fn build_natural_prompt(ingredients: &[String], preferences: &[String]) -> String {
    let dietary = preference_phrase(preferences)
        .map(|phrase| format!("\nDietary preference: \"{}\"", phrase))
        .unwrap_or_default();

    format!(
        "You are a world-class master chef. Create 3 delicious recipes using these ingredients: {}.{}

For each recipe, provide:
1. Recipe name
2. Brief description
3. Detailed step-by-step cooking instructions with cooking times
4. Any chef tips or variations

Make the instructions clear and easy to follow, like a professional chef teaching someone to cook.",
        ingredients.join(", "),
        dietary
    )
}

/// Prompt for a seven-day breakfast/lunch/dinner plan.
pub fn build_meal_plan_prompt(ingredients: &[String], preferences: &[String]) -> String {
    let dietary = preference_phrase(preferences)
        .map(|phrase| format!(" All meals should be {}.", phrase))
        .unwrap_or_default();

    format!(
        "Create a 7-day meal plan using these available ingredients: {}.{}

For each day, provide breakfast, lunch, and dinner recipes. Each recipe should include:
- Recipe name
- Cooking time
- Brief description
- Main ingredients used

Format as a structured response for 7 days (Monday to Sunday).",
        ingredients.join(", "),
        dietary
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients() -> Vec<String> {
        vec!["tofu".to_string(), "spinach".to_string()]
    }

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_JSON_PROMPT.is_empty());
        assert!(RECIPE_JSON_PROMPT.contains("\"recipes\""));
        assert!(RECIPE_JSON_PROMPT.contains("cookingTime"));
        assert!(RECIPE_JSON_PROMPT.contains("Respond ONLY with valid JSON"));
    }

    #[test]
    fn test_structured_prompt_lists_input() {
        let prompt = build_structured_prompt(&ingredients(), &["Vegan".to_string(), "Keto".to_string()]);
        assert!(prompt.starts_with(RECIPE_JSON_PROMPT));
        assert!(prompt.contains("Ingredients: \"tofu, spinach\""));
        assert!(prompt.contains("Dietary preference: \"Vegan and Keto\""));
    }

    #[test]
    fn test_preferences_are_optional() {
        let prompt = build_natural_prompt(&ingredients(), &[" ".to_string()]);
        assert!(prompt.contains("using these ingredients: tofu, spinach."));
        assert!(!prompt.contains("Dietary preference"));
        assert!(prompt.contains("For each recipe, provide"));
    }

    #[test]
    fn test_meal_plan_prompt() {
        let prompt = build_meal_plan_prompt(&ingredients(), &["Vegetarian".to_string()]);
        assert!(prompt.contains("7-day meal plan"));
        assert!(prompt.contains("All meals should be Vegetarian."));
    }
}
