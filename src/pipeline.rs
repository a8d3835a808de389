//! Pipeline orchestration
//!
//! This module provides the public API for the nutrition engine. It takes a raw
//! recognition result and a stored target straight to score and comments
//! without anything being persisted first.

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use crate::comments::generate_all_comments;
use crate::error::ComputeError;
use crate::extract::extract_optional_number;
use crate::normalizer::TargetNormalizer;
use crate::score::score_food;
use crate::targets::calculate_nutrition_targets;
use crate::types::{
    FoodNutritionTotals, FoodWithNutrition, Ingredient, MealType, NutritionTarget,
    ProcessedNutrition, Profile, RawFood, RawIngredient,
};

/// Extract numeric fields from raw ingredient records
pub fn process_ingredients(raw: &[RawIngredient]) -> Vec<Ingredient> {
    raw.iter()
        .map(|ingredient| Ingredient {
            ingredient_description: ingredient.description().cloned(),
            protein: extract_optional_number(ingredient.protein.as_ref()),
            carb: extract_optional_number(ingredient.carb.as_ref()),
            fat: extract_optional_number(ingredient.fat.as_ref()),
            fiber: extract_optional_number(ingredient.fiber.as_ref()),
            amount: extract_optional_number(ingredient.amount.as_ref()),
        })
        .collect()
}

/// Sum ingredient macros and derive calories from them
///
/// Any calorie figure supplied upstream is ignored.
pub fn calculate_total_nutrition(ingredients: &[Ingredient]) -> FoodNutritionTotals {
    let sum = |field: fn(&Ingredient) -> Option<f64>| -> f64 {
        ingredients.iter().map(|i| field(i).unwrap_or(0.0)).sum()
    };

    FoodNutritionTotals::from_macros(
        sum(|i| i.protein),
        sum(|i| i.carb),
        sum(|i| i.fat),
        sum(|i| i.fiber),
    )
}

/// Merge the food's descriptive fields with computed totals
pub fn create_food_with_nutrition(raw: &RawFood, totals: FoodNutritionTotals) -> FoodWithNutrition {
    FoodWithNutrition {
        name: raw.name.clone(),
        description: raw.description.clone(),
        advice: raw.advice.clone(),
        preparation: raw.preparation.clone(),
        totals,
    }
}

/// Canonical target from whatever the target store returned
pub fn format_target_nutrition(raw_target: Option<&Value>) -> NutritionTarget {
    TargetNormalizer::normalize_optional(raw_target)
}

/// Run the full food pipeline.
///
/// Pipeline stages:
/// 1. Extract ingredient numbers
/// 2. Total the macros and derive calories
/// 3. Merge with the food's descriptive fields
/// 4. Normalize the target
/// 5. Score and comment against the target
pub fn process_complete(
    raw_food: &RawFood,
    raw_target: Option<&Value>,
    meal: MealType,
) -> ProcessedNutrition {
    // Stage 1: Extract ingredient numbers
    let ingredients = process_ingredients(&raw_food.ingredients);

    // Stage 2: Totals
    let totals = calculate_total_nutrition(&ingredients);
    debug!(
        ingredients = ingredients.len(),
        calories = totals.total_calorie,
        "Computed food totals"
    );

    // Stage 3: Food record
    let food = create_food_with_nutrition(raw_food, totals);

    // Stage 4: Target
    let target = format_target_nutrition(raw_target);

    // Stage 5: Score and comments
    let nutrition_score = score_food(&totals, &target);
    let nutrition_comments = generate_all_comments(&totals, &target, meal);
    debug!(
        score = nutrition_score.score,
        meal = meal.as_str(),
        "Scored food"
    );

    ProcessedNutrition {
        food,
        ingredients,
        nutrition_score,
        nutrition_comments,
    }
}

/// Run the full food pipeline on JSON strings.
///
/// # Arguments
/// * `food_json` - Raw recognition result
/// * `target_json` - Stored target in any supported shape; `None` or `"null"` uses defaults
/// * `meal_type` - breakfast, lunch, dinner, snack or default
///
/// # Returns
/// `ProcessedNutrition` as a JSON string
///
/// # Example
/// ```ignore
/// let processed = process_complete_json(food_json, Some(target_json), "lunch")?;
/// ```
pub fn process_complete_json(
    food_json: &str,
    target_json: Option<&str>,
    meal_type: &str,
) -> Result<String, ComputeError> {
    let raw_food: RawFood = serde_json::from_str(food_json)?;
    let raw_target = parse_optional_json(target_json)?;

    let processed = process_complete(&raw_food, raw_target.as_ref(), MealType::from_token(meal_type));
    Ok(serde_json::to_string(&processed)?)
}

/// Calculate targets from a profile JSON string.
///
/// Missing or invalid required profile fields are reported as errors.
pub fn calculate_targets_json(profile_json: &str, today: NaiveDate) -> Result<String, ComputeError> {
    let profile = parse_profile(profile_json)?;
    let target = calculate_nutrition_targets(&profile, today);
    Ok(serde_json::to_string(&target)?)
}

/// Decode a profile, mapping field errors to `InvalidProfile`
pub fn parse_profile(profile_json: &str) -> Result<Profile, ComputeError> {
    let value: Value = serde_json::from_str(profile_json)?;
    serde_json::from_value(value).map_err(|e| ComputeError::InvalidProfile(e.to_string()))
}

fn parse_optional_json(json: Option<&str>) -> Result<Option<Value>, ComputeError> {
    match json.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => {
            let value: Value = serde_json::from_str(raw)?;
            Ok((!value.is_null()).then_some(value))
        }
    }
}

/// Processor bound to a reference date.
///
/// Use this when the caller wants one consistent "today" for age and target
/// date calculations across many calls.
#[derive(Debug, Clone)]
pub struct NutritionProcessor {
    today: NaiveDate,
}

impl Default for NutritionProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl NutritionProcessor {
    /// Create a processor using the current UTC date
    pub fn new() -> Self {
        Self {
            today: Utc::now().date_naive(),
        }
    }

    /// Create a processor with a fixed reference date
    pub fn with_reference_date(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today
    }

    /// Full target for a profile as of the reference date
    pub fn targets_for(&self, profile: &Profile) -> NutritionTarget {
        calculate_nutrition_targets(profile, self.today)
    }

    /// Full food pipeline, see [`process_complete`]
    ///
    /// Food processing has no date dependency; the reference date is not used here.
    pub fn process(
        &self,
        raw_food: &RawFood,
        raw_target: Option<&Value>,
        meal: MealType,
    ) -> ProcessedNutrition {
        process_complete(raw_food, raw_target, meal)
    }

    /// Targets from profile JSON as of the reference date
    pub fn targets_json(&self, profile_json: &str) -> Result<String, ComputeError> {
        calculate_targets_json(profile_json, self.today)
    }
}
