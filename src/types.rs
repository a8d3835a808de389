//! Core types for the nutrition engine
//!
//! This module defines the data structures that flow through each stage of the
//! engine: profiles, canonical targets, food totals, scores and comments, plus
//! the enum-keyed lookup tables that belong to those types.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::Add;

use crate::error::ComputeError;

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Biological sex used by the BMR and fiber tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Activity level for TDEE calculation
///
/// Unknown labels fall back to `ModeratelyActive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Physical job or training twice a day
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly active",
            ActivityLevel::ModeratelyActive => "Moderately active",
            ActivityLevel::VeryActive => "Very active",
            ActivityLevel::ExtraActive => "Extra active",
        }
    }

    /// Resolve a display label, falling back to `ModeratelyActive`
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(label))
            .unwrap_or(ActivityLevel::ModeratelyActive)
    }

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(label: String) -> Self {
        ActivityLevel::from_label(&label)
    }
}

impl From<ActivityLevel> for String {
    fn from(level: ActivityLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Weight goal, which selects the meal distribution profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Lose weight")]
    LoseWeight,
    #[serde(rename = "Maintain weight")]
    MaintainWeight,
    #[serde(rename = "Gain weight")]
    GainWeight,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose weight",
            Goal::MaintainWeight => "Maintain weight",
            Goal::GainWeight => "Gain weight",
        }
    }
}

/// Percent of daily calories from each macro. The three always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroRatio {
    pub carbs_pct: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
}

/// Diet type, which selects the macro split
///
/// Unknown labels fall back to `Balanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietType {
    Balanced,
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
    LowCarb,
    HighProtein,
    Mediterranean,
}

impl DietType {
    pub const ALL: [DietType; 8] = [
        DietType::Balanced,
        DietType::Vegetarian,
        DietType::Vegan,
        DietType::Keto,
        DietType::Paleo,
        DietType::LowCarb,
        DietType::HighProtein,
        DietType::Mediterranean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Balanced => "Balanced",
            DietType::Vegetarian => "Vegetarian",
            DietType::Vegan => "Vegan",
            DietType::Keto => "Keto",
            DietType::Paleo => "Paleo",
            DietType::LowCarb => "Low carb",
            DietType::HighProtein => "High protein",
            DietType::Mediterranean => "Mediterranean",
        }
    }

    /// Resolve a display label, falling back to `Balanced`
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|diet| diet.as_str().eq_ignore_ascii_case(label))
            .unwrap_or(DietType::Balanced)
    }

    /// Carbs / protein / fat calorie split
    pub fn macro_ratio(&self) -> MacroRatio {
        let (carbs_pct, protein_pct, fat_pct) = match self {
            DietType::Balanced => (50.0, 20.0, 30.0),
            DietType::Vegetarian => (55.0, 15.0, 30.0),
            DietType::Vegan => (60.0, 15.0, 25.0),
            DietType::Keto => (5.0, 20.0, 75.0),
            DietType::Paleo => (30.0, 30.0, 40.0),
            DietType::LowCarb => (25.0, 35.0, 40.0),
            DietType::HighProtein => (40.0, 35.0, 25.0),
            DietType::Mediterranean => (45.0, 20.0, 35.0),
        };
        MacroRatio {
            carbs_pct,
            protein_pct,
            fat_pct,
        }
    }
}

impl From<String> for DietType {
    fn from(label: String) -> Self {
        DietType::from_label(&label)
    }
}

impl From<DietType> for String {
    fn from(diet: DietType) -> Self {
        diet.as_str().to_string()
    }
}

/// Meal slot a food is eaten in
///
/// Unknown tokens resolve to `Default`, which uses a flat 25% share of daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Default,
}

impl MealType {
    pub const MEALS: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Default => "default",
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            _ => MealType::Default,
        }
    }
}

impl From<String> for MealType {
    fn from(token: String) -> Self {
        MealType::from_token(&token)
    }
}

impl From<MealType> for String {
    fn from(meal: MealType) -> Self {
        meal.as_str().to_string()
    }
}

/// Nutrient keys shared by comparisons and comments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Protein,
    Fat,
    Carbs,
    Fiber,
    Calories,
}

impl Nutrient {
    /// The four gram-measured nutrients that take part in the balance score
    pub const MACROS: [Nutrient; 4] = [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
        Nutrient::Fiber,
    ];

    pub const ALL: [Nutrient; 5] = [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
        Nutrient::Fiber,
        Nutrient::Calories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
            Nutrient::Fiber => "fiber",
            Nutrient::Calories => "calories",
        }
    }
}

/// A per-meal split of daily targets. Fractions sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MealSplit {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snack: f64,
}

impl MealSplit {
    /// 25 / 35 / 30 / 10
    pub const STANDARD: MealSplit = MealSplit {
        breakfast: 0.25,
        lunch: 0.35,
        dinner: 0.30,
        snack: 0.10,
    };

    /// Fraction for a meal slot; `Default` takes a flat quarter
    pub fn fraction(&self, meal: MealType) -> f64 {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
            MealType::Snack => self.snack,
            MealType::Default => 0.25,
        }
    }

    pub fn total(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

fn default_calories() -> f64 {
    NutrientTargets::DEFAULT.calories
}

fn default_protein() -> f64 {
    NutrientTargets::DEFAULT.protein
}

fn default_fat() -> f64 {
    NutrientTargets::DEFAULT.fat
}

fn default_carbs() -> f64 {
    NutrientTargets::DEFAULT.carbs
}

fn default_fiber() -> f64 {
    NutrientTargets::DEFAULT.fiber
}

/// Calorie, macro and fiber amounts for a day or a meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientTargets {
    /// kcal
    #[serde(default = "default_calories")]
    pub calories: f64,
    /// grams
    #[serde(default = "default_protein")]
    pub protein: f64,
    /// grams
    #[serde(default = "default_fat")]
    pub fat: f64,
    /// grams
    #[serde(default = "default_carbs")]
    pub carbs: f64,
    /// grams
    #[serde(default = "default_fiber")]
    pub fiber: f64,
}

impl NutrientTargets {
    /// Built-in daily values used whenever a target is missing or unreadable
    pub const DEFAULT: NutrientTargets = NutrientTargets {
        calories: 2000.0,
        protein: 50.0,
        fat: 70.0,
        carbs: 250.0,
        fiber: 25.0,
    };

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fiber => self.fiber,
            Nutrient::Calories => self.calories,
        }
    }

    /// Build from a per-nutrient value function
    pub fn from_fn(mut value: impl FnMut(Nutrient) -> f64) -> NutrientTargets {
        NutrientTargets {
            calories: value(Nutrient::Calories),
            protein: value(Nutrient::Protein),
            fat: value(Nutrient::Fat),
            carbs: value(Nutrient::Carbs),
            fiber: value(Nutrient::Fiber),
        }
    }

    /// Scale every value by the same fraction without rounding
    pub fn scaled(&self, fraction: f64) -> NutrientTargets {
        NutrientTargets {
            calories: self.calories * fraction,
            protein: self.protein * fraction,
            fat: self.fat * fraction,
            carbs: self.carbs * fraction,
            fiber: self.fiber * fraction,
        }
    }
}

impl Default for NutrientTargets {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-meal targets. Stored records may lack some meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTargets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<NutrientTargets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<NutrientTargets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<NutrientTargets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snack: Option<NutrientTargets>,
}

impl MealTargets {
    /// Build all four meals from a daily target and a split
    pub fn from_split(daily: &NutrientTargets, split: &MealSplit) -> Self {
        Self {
            breakfast: Some(daily.scaled(split.breakfast)),
            lunch: Some(daily.scaled(split.lunch)),
            dinner: Some(daily.scaled(split.dinner)),
            snack: Some(daily.scaled(split.snack)),
        }
    }

    pub fn get(&self, meal: MealType) -> Option<&NutrientTargets> {
        match meal {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
            MealType::Snack => self.snack.as_ref(),
            MealType::Default => None,
        }
    }
}

/// Intermediate energy figures kept for auditing; not used downstream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetCalculations {
    pub bmr: f64,
    #[serde(rename = "baseTDEE")]
    pub base_tdee: f64,
    pub adjustment: f64,
}

/// Canonical nutrition target
///
/// Always produced whole; a recalculation replaces every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionTarget {
    pub daily: NutrientTargets,
    #[serde(default)]
    pub meals: MealTargets,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculations: Option<TargetCalculations>,
}

impl Default for NutritionTarget {
    fn default() -> Self {
        let daily = NutrientTargets::DEFAULT;
        Self {
            daily,
            meals: MealTargets::from_split(&daily, &MealSplit::STANDARD),
            calculations: None,
        }
    }
}

/// User biometric profile, read-only input to the target calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub gender: Gender,
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub birthday: NaiveDate,
    /// cm
    pub height: f64,
    /// kg
    pub current_weight: f64,
    /// kg
    pub target_weight: f64,
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub target_date: NaiveDate,
    #[serde(default = "default_activity_level")]
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    #[serde(default = "default_diet_type")]
    pub diet_type: DietType,
}

fn default_activity_level() -> ActivityLevel {
    ActivityLevel::ModeratelyActive
}

fn default_diet_type() -> DietType {
    DietType::Balanced
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, ComputeError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|e| ComputeError::DateParseError(format!("{value}: {e}")))
}

fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

/// Food-level macro totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodNutritionTotals {
    #[serde(default)]
    pub total_protein: f64,
    #[serde(default)]
    pub total_carb: f64,
    #[serde(default)]
    pub total_fat: f64,
    #[serde(default)]
    pub total_fiber: f64,
    #[serde(default)]
    pub total_calorie: f64,
}

impl FoodNutritionTotals {
    /// Totals with calories derived from macros at 4/4/9 kcal per gram
    pub fn from_macros(protein: f64, carb: f64, fat: f64, fiber: f64) -> Self {
        Self {
            total_protein: protein,
            total_carb: carb,
            total_fat: fat,
            total_fiber: fiber,
            total_calorie: protein * KCAL_PER_G_PROTEIN
                + carb * KCAL_PER_G_CARBS
                + fat * KCAL_PER_G_FAT,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.total_protein,
            Nutrient::Fat => self.total_fat,
            Nutrient::Carbs => self.total_carb,
            Nutrient::Fiber => self.total_fiber,
            Nutrient::Calories => self.total_calorie,
        }
    }
}

impl Add for FoodNutritionTotals {
    type Output = FoodNutritionTotals;

    fn add(self, other: FoodNutritionTotals) -> FoodNutritionTotals {
        FoodNutritionTotals {
            total_protein: self.total_protein + other.total_protein,
            total_carb: self.total_carb + other.total_carb,
            total_fat: self.total_fat + other.total_fat,
            total_fiber: self.total_fiber + other.total_fiber,
            total_calorie: self.total_calorie + other.total_calorie,
        }
    }
}

impl<'a> std::iter::Sum<&'a FoodNutritionTotals> for FoodNutritionTotals {
    fn sum<I: Iterator<Item = &'a FoodNutritionTotals>>(iter: I) -> Self {
        iter.fold(FoodNutritionTotals::default(), |acc, item| acc + *item)
    }
}

/// Qualitative band for a balance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInterpretation {
    pub rating: String,
    pub description: String,
}

/// Food vs target figures for one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientComparison {
    pub food: f64,
    pub target: f64,
    /// food / target as a rounded percentage
    pub percentage: i64,
    /// |percentage - 100|, rounded
    pub deviation: i64,
    /// Share of the food's gram total, rounded percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_ratio: Option<i64>,
    /// Share of the target's gram total, rounded percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_ratio: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_difference: Option<i64>,
}

/// Comparisons for every nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionComparisons {
    pub calories: NutrientComparison,
    pub protein: NutrientComparison,
    pub fat: NutrientComparison,
    pub carbs: NutrientComparison,
    pub fiber: NutrientComparison,
}

impl NutritionComparisons {
    pub fn get(&self, nutrient: Nutrient) -> &NutrientComparison {
        match nutrient {
            Nutrient::Protein => &self.protein,
            Nutrient::Fat => &self.fat,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Fiber => &self.fiber,
            Nutrient::Calories => &self.calories,
        }
    }
}

/// Balance score bundle for one food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionScoreResult {
    /// 0-100
    pub score: u8,
    pub interpretation: ScoreInterpretation,
    pub comparisons: NutritionComparisons,
}

/// Advisory band for a food's share of a meal target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentLevel {
    /// below 70%
    VeryLow,
    /// 70% to 90%
    Low,
    /// 90% to 110%
    Adequate,
    /// 110% to 130%
    High,
    /// 130% and above
    VeryHigh,
}

/// Advisory text for one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionComment {
    #[serde(rename = "type")]
    pub level: CommentLevel,
    pub percentage: i64,
    pub comment: String,
    pub icon: String,
}

/// Advisory comments keyed by nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionComments {
    pub protein: NutritionComment,
    pub fat: NutritionComment,
    pub carbs: NutritionComment,
    pub fiber: NutritionComment,
    pub calories: NutritionComment,
}

impl NutritionComments {
    pub fn get(&self, nutrient: Nutrient) -> &NutritionComment {
        match nutrient {
            Nutrient::Protein => &self.protein,
            Nutrient::Fat => &self.fat,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Fiber => &self.fiber,
            Nutrient::Calories => &self.calories,
        }
    }
}

/// Ingredient record as produced by the food-recognition service
///
/// Values are kept raw; they may be numbers, strings with units, or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIngredient {
    #[serde(default, rename = "Ingredient Description")]
    pub description: Option<serde_json::Value>,
    #[serde(default, rename = "ingredient_description", skip_serializing_if = "Option::is_none")]
    pub legacy_description: Option<serde_json::Value>,
    #[serde(default, rename = "Ingredient Protein")]
    pub protein: Option<serde_json::Value>,
    #[serde(default, rename = "Ingredient Carb")]
    pub carb: Option<serde_json::Value>,
    #[serde(default, rename = "Ingredient Fat")]
    pub fat: Option<serde_json::Value>,
    #[serde(default, rename = "Ingredient Fiber")]
    pub fiber: Option<serde_json::Value>,
    #[serde(default, rename = "Ingredient Amount")]
    pub amount: Option<serde_json::Value>,
}

impl RawIngredient {
    /// Description under either key; the current key wins when both are set
    pub fn description(&self) -> Option<&serde_json::Value> {
        self.description
            .as_ref()
            .filter(|v| !v.is_null())
            .or(self.legacy_description.as_ref())
    }
}

/// Raw food record from the food-recognition service
///
/// Descriptive fields pass through untouched, whatever their JSON type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFood {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub advice: Option<serde_json::Value>,
    #[serde(default)]
    pub preparation: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_ingredients")]
    pub ingredients: Vec<RawIngredient>,
}

/// Ingredient list that never fails: a non-array becomes empty and a
/// non-object entry becomes an ingredient with every field absent
fn deserialize_ingredients<'de, D>(deserializer: D) -> Result<Vec<RawIngredient>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// Ingredient with numeric fields extracted
///
/// A field is `None` only when the source omitted it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient_description: Option<serde_json::Value>,
    pub protein: Option<f64>,
    pub carb: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub amount: Option<f64>,
}

/// Food descriptive fields merged with computed totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodWithNutrition {
    pub name: Option<serde_json::Value>,
    pub description: Option<serde_json::Value>,
    pub advice: Option<serde_json::Value>,
    pub preparation: Option<serde_json::Value>,
    #[serde(flatten)]
    pub totals: FoodNutritionTotals,
}

/// Everything the direct processor computes for one food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedNutrition {
    pub food: FoodWithNutrition,
    pub ingredients: Vec<Ingredient>,
    pub nutrition_score: NutritionScoreResult,
    pub nutrition_comments: NutritionComments,
}
