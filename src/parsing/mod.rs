//! Turning generated text into recipes.
//!
//! Each stage is a plain function so the chain stays explicit:
//! candidate extraction, sanitizing, structured mapping and, when no JSON
//! survives, the natural-language extractor. [`parse_response`] reports which
//! stage produced the recipes.

pub mod candidate;
pub mod mapper;
pub mod natural_language;
pub mod sanitize;

use crate::error::ChefError;
use crate::model::Recipe;
use log::{debug, warn};
use serde_json::Value;

pub use candidate::extract_json_candidate;
pub use mapper::map_recipes;
pub use natural_language::extract_recipes;
pub use sanitize::sanitize_json;

/// Result of running generated text through the whole extraction chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// Recipes mapped from a JSON payload
    Structured(Vec<Recipe>),
    /// Recipes recovered heuristically from free text
    NaturalLanguage(Vec<Recipe>),
    /// Nothing usable in the text
    Unresolved,
}

/// Sanitize a candidate and parse it as strict JSON.
pub fn parse_candidate(candidate: &str) -> Result<Value, ChefError> {
    let cleaned = sanitize_json(candidate);
    debug!("Cleaned JSON candidate: {}", cleaned);
    serde_json::from_str(&cleaned).map_err(ChefError::from)
}

/// Candidate extraction, sanitizing and structured mapping.
///
/// Fails when the text holds no JSON candidate, the candidate does not parse,
/// or the parsed value is not a recipe object.
pub fn parse_structured(
    text: &str,
    ingredients: &[String],
    stamp: u64,
) -> Result<Vec<Recipe>, ChefError> {
    let candidate = extract_json_candidate(text)
        .ok_or_else(|| ChefError::ParseError("no JSON candidate in response".to_string()))?;
    let value = parse_candidate(candidate)?;
    map_recipes(&value, ingredients, stamp)
}

/// The full chain: structured first, then natural-language extraction.
pub fn parse_response(text: &str, ingredients: &[String], stamp: u64) -> Parsed {
    match parse_structured(text, ingredients, stamp) {
        Ok(recipes) => return Parsed::Structured(recipes),
        Err(e) => warn!("Structured parsing failed: {}", e),
    }

    let recipes = extract_recipes(text, ingredients, stamp);
    if recipes.is_empty() {
        Parsed::Unresolved
    } else {
        Parsed::NaturalLanguage(recipes)
    }
}
