//! Per-nutrient advisory comments
//!
//! A food is compared against the target for the meal it is eaten in, not the
//! daily total. The percentage of that meal target falls into one of five
//! half-open bands, and each nutrient has its own sentence per band.

use crate::score::{round_to_int, safe_ratio};
use crate::types::{
    CommentLevel, FoodNutritionTotals, MealType, Nutrient, NutritionComment, NutritionComments,
    NutritionTarget,
};

/// Lower bounds (inclusive) of the low, adequate, high and very high bands
const BAND_LOWER_BOUNDS: [(f64, CommentLevel); 4] = [
    (130.0, CommentLevel::VeryHigh),
    (110.0, CommentLevel::High),
    (90.0, CommentLevel::Adequate),
    (70.0, CommentLevel::Low),
];

/// Share of daily used when a meal target is missing and the meal is unknown
const DEFAULT_MEAL_FRACTION: f64 = 0.25;

/// Advisory sentences ordered very low, low, adequate, high, very high
const PROTEIN_ADVICE: [&str; 5] = [
    "Protein is well below this meal's target. Add meat, fish, eggs, legumes or dairy.",
    "Protein is a little short for this meal. A side of eggs, tofu or yogurt would help.",
    "Protein is right on target for this meal.",
    "Protein is slightly above this meal's target. Balance it with more vegetables or grains.",
    "Protein is far above this meal's target. Consistently high intake adds load on the kidneys.",
];

const FAT_ADVICE: [&str; 5] = [
    "Fat is well below this meal's target. Include healthy fats such as nuts, avocado or olive oil.",
    "Fat is a little short for this meal. A handful of seeds or a drizzle of oil would help.",
    "Fat is right on target for this meal.",
    "Fat is slightly above this meal's target. Prefer grilled or steamed dishes over fried ones.",
    "Fat is far above this meal's target. Cut back on fried food, fatty meat and rich sauces.",
];

const CARBS_ADVICE: [&str; 5] = [
    "Carbohydrates are well below this meal's target. Add whole grains, rice, potatoes or fruit for energy.",
    "Carbohydrates are a little short for this meal. A slice of whole-grain bread or some fruit would help.",
    "Carbohydrates are right on target for this meal.",
    "Carbohydrates are slightly above this meal's target. Watch portion sizes of rice, bread and noodles.",
    "Carbohydrates are far above this meal's target. Limit sugary drinks, sweets and refined starches.",
];

const FIBER_ADVICE: [&str; 5] = [
    "Fiber is well below this meal's target. Eat more vegetables, fruit, whole grains and beans.",
    "Fiber is a little short for this meal. Add a side salad or swap to whole-grain options.",
    "Fiber is right on target for this meal.",
    "Fiber is slightly above this meal's target. Drink plenty of water to aid digestion.",
    "Fiber is far above this meal's target. Increase fiber gradually to avoid bloating and discomfort.",
];

const CALORIES_ADVICE: [&str; 5] = [
    "Calories are well below this meal's target. Make sure you are eating enough to stay energized.",
    "Calories are a little short for this meal. A small healthy snack can close the gap.",
    "Calories are right on target for this meal.",
    "Calories are slightly above this meal's target. Consider a lighter option at your next meal.",
    "Calories are far above this meal's target. Reduce portion sizes or choose lower-energy foods.",
];

/// Constant icon identifier for a nutrient
pub fn nutrient_icon(nutrient: Nutrient) -> &'static str {
    match nutrient {
        Nutrient::Protein => "drumstick",
        Nutrient::Fat => "droplet",
        Nutrient::Carbs => "wheat",
        Nutrient::Fiber => "leaf",
        Nutrient::Calories => "flame",
    }
}

fn advice_table(nutrient: Nutrient) -> &'static [&'static str; 5] {
    match nutrient {
        Nutrient::Protein => &PROTEIN_ADVICE,
        Nutrient::Fat => &FAT_ADVICE,
        Nutrient::Carbs => &CARBS_ADVICE,
        Nutrient::Fiber => &FIBER_ADVICE,
        Nutrient::Calories => &CALORIES_ADVICE,
    }
}

fn band_index(level: CommentLevel) -> usize {
    match level {
        CommentLevel::VeryLow => 0,
        CommentLevel::Low => 1,
        CommentLevel::Adequate => 2,
        CommentLevel::High => 3,
        CommentLevel::VeryHigh => 4,
    }
}

/// Band for a percentage of the meal target. Boundaries belong to the upper band.
pub fn comment_level(percentage: f64) -> CommentLevel {
    BAND_LOWER_BOUNDS
        .iter()
        .find(|(lower, _)| percentage >= *lower)
        .map(|(_, level)| *level)
        .unwrap_or(CommentLevel::VeryLow)
}

/// Share of daily used when the target has no entry for a meal
///
/// Calories lean toward breakfast; the gram nutrients lean toward dinner.
pub fn fallback_meal_fraction(nutrient: Nutrient, meal: MealType) -> f64 {
    match (nutrient, meal) {
        (_, MealType::Default) => DEFAULT_MEAL_FRACTION,
        (Nutrient::Calories, MealType::Breakfast) => 0.30,
        (Nutrient::Calories, MealType::Lunch) => 0.35,
        (Nutrient::Calories, MealType::Dinner) => 0.25,
        (Nutrient::Calories, MealType::Snack) => 0.10,
        (_, MealType::Breakfast) => 0.25,
        (_, MealType::Lunch) => 0.35,
        (_, MealType::Dinner) => 0.30,
        (_, MealType::Snack) => 0.10,
    }
}

/// Target for one nutrient in one meal
pub fn meal_target_value(target: &NutritionTarget, nutrient: Nutrient, meal: MealType) -> f64 {
    match target.meals.get(meal) {
        Some(meal_target) => meal_target.get(nutrient),
        None => target.daily.get(nutrient) * fallback_meal_fraction(nutrient, meal),
    }
}

/// Comment for one nutrient given the food value and the meal target
pub fn generate_comment(nutrient: Nutrient, food_value: f64, meal_target: f64) -> NutritionComment {
    let percentage = safe_ratio(food_value, meal_target) * 100.0;
    let level = comment_level(percentage);

    NutritionComment {
        level,
        percentage: round_to_int(percentage),
        comment: advice_table(nutrient)[band_index(level)].to_string(),
        icon: nutrient_icon(nutrient).to_string(),
    }
}

/// Generator for meal-relative advisory comments
pub struct CommentGenerator;

impl CommentGenerator {
    /// Comments for every nutrient of a food eaten in `meal`
    pub fn generate(
        food: &FoodNutritionTotals,
        target: &NutritionTarget,
        meal: MealType,
    ) -> NutritionComments {
        let comment = |nutrient: Nutrient| {
            generate_comment(
                nutrient,
                food.get(nutrient),
                meal_target_value(target, nutrient, meal),
            )
        };

        NutritionComments {
            protein: comment(Nutrient::Protein),
            fat: comment(Nutrient::Fat),
            carbs: comment(Nutrient::Carbs),
            fiber: comment(Nutrient::Fiber),
            calories: comment(Nutrient::Calories),
        }
    }
}

/// Comments for every nutrient of a food eaten in `meal`
pub fn generate_all_comments(
    food: &FoodNutritionTotals,
    target: &NutritionTarget,
    meal: MealType,
) -> NutritionComments {
    CommentGenerator::generate(food, target, meal)
}
