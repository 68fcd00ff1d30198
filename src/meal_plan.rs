use crate::model::{MealPlanDay, Meals, Recipe};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DAYS_IN_PLAN: usize = 7;

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Seven consecutive days starting at `start`, filled from `recipes`.
///
/// Day `i` gets meals only while `i` is below the number of recipes;
/// breakfast, lunch and dinner rotate through the list from position `i`.
/// Later days are left empty.
pub fn build_week(start: NaiveDate, recipes: &[Recipe]) -> Vec<MealPlanDay> {
    (0..DAYS_IN_PLAN)
        .map(|index| {
            let date = start + Duration::days(index as i64);
            let pick = |offset: usize| {
                (index < recipes.len()).then(|| recipes[(index + offset) % recipes.len()].clone())
            };

            MealPlanDay {
                id: format!("meal-plan-{}", index),
                day: day_name(date.weekday()).to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                meals: Meals {
                    breakfast: pick(0),
                    lunch: pick(1),
                    dinner: pick(2),
                },
            }
        })
        .collect()
}
