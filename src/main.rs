use log::{debug, info};
use smartchef::{ChefError, SmartChef};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Ingredients from the command line; `--plan` builds a meal plan instead
    let args: Vec<String> = env::args().skip(1).collect();
    let plan = args.iter().any(|arg| arg == "--plan");
    let ingredients: Vec<&String> = args.iter().filter(|arg| !arg.starts_with("--")).collect();

    let chef = SmartChef::builder().build()?;
    for ingredient in &ingredients {
        chef.add_ingredient(ingredient);
    }
    debug!("Ingredients: {:?}", chef.state().ingredients);

    if plan {
        let notice = chef.generate_meal_plan().await;
        if !notice.is_success() {
            return Err(notice.message.into());
        }
        info!("{}", notice.message);
        println!("{}", serde_json::to_string_pretty(&chef.state().meal_plan)?);
        return Ok(());
    }

    if chef.state().ingredients.is_empty() {
        return Err(ChefError::EmptyIngredients.into());
    }

    let notice = chef.search_recipes().await;
    if !notice.is_success() {
        return Err(notice.message.into());
    }
    info!("{}", notice.message);
    println!("{}", serde_json::to_string_pretty(&chef.state().recipes)?);

    Ok(())
}
