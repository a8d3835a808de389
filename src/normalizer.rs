//! Target shape normalization
//!
//! Stored targets arrive in one of two shapes, or not at all:
//! - canonical nested `{ daily, meals, calculations }`
//! - legacy flat `{ daily_calories, daily_protein, ... }`
//!
//! Everything downstream depends only on the canonical `NutritionTarget`.

use serde_json::Value;
use tracing::warn;

use crate::comments::fallback_meal_fraction;
use crate::extract::extract_optional_number;
use crate::types::{MealSplit, MealTargets, MealType, Nutrient, NutrientTargets, NutritionTarget};

/// Detected shape of a raw target record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetShape {
    Canonical,
    LegacyFlat,
    Unrecognized,
}

impl TargetShape {
    /// Canonical wins over legacy when a record carries both
    pub fn detect(raw: &Value) -> Self {
        if is_defined(raw.get("daily").and_then(|daily| daily.get("protein"))) {
            TargetShape::Canonical
        } else if is_defined(raw.get("daily_protein")) {
            TargetShape::LegacyFlat
        } else {
            TargetShape::Unrecognized
        }
    }
}

fn is_defined(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

/// Normalizer for converting raw target records to the canonical shape
pub struct TargetNormalizer;

impl TargetNormalizer {
    /// Normalize a raw target record
    pub fn normalize(raw: &Value) -> NutritionTarget {
        match TargetShape::detect(raw) {
            TargetShape::Canonical => from_canonical(raw),
            TargetShape::LegacyFlat => from_legacy_flat(raw),
            TargetShape::Unrecognized => {
                warn!("Unrecognized nutrition target shape, using defaults");
                NutritionTarget::default()
            }
        }
    }

    /// Normalize a target that may be missing entirely
    pub fn normalize_optional(raw: Option<&Value>) -> NutritionTarget {
        match raw {
            Some(raw) => Self::normalize(raw),
            None => {
                warn!("No nutrition target supplied, using defaults");
                NutritionTarget::default()
            }
        }
    }
}

/// Normalize a raw target record
pub fn normalize_target(raw: &Value) -> NutritionTarget {
    TargetNormalizer::normalize(raw)
}

/// Read a canonical record field by field
///
/// Stored values are kept as they are. An absent or null daily value takes its
/// built-in default; an absent or null value inside a stored meal takes that
/// meal's share of the daily value. Meals not stored stay absent.
fn from_canonical(raw: &Value) -> NutritionTarget {
    let daily_raw = raw.get("daily");
    let daily = NutrientTargets::from_fn(|n| {
        stored_value(daily_raw, n).unwrap_or_else(|| NutrientTargets::DEFAULT.get(n))
    });

    let meal = |slot: MealType| {
        let entry = raw
            .get("meals")
            .and_then(|meals| meals.get(slot.as_str()))
            .filter(|entry| entry.is_object());
        entry.map(|entry| {
            NutrientTargets::from_fn(|n| {
                stored_value(Some(entry), n)
                    .unwrap_or_else(|| daily.get(n) * fallback_meal_fraction(n, slot))
            })
        })
    };

    let calculations = match raw.get("calculations").filter(|c| !c.is_null()) {
        None => None,
        Some(c) => match serde_json::from_value(c.clone()) {
            Ok(calculations) => Some(calculations),
            Err(e) => {
                warn!(error = %e, "Dropping unreadable target calculations");
                None
            }
        },
    };

    NutritionTarget {
        daily,
        meals: MealTargets {
            breakfast: meal(MealType::Breakfast),
            lunch: meal(MealType::Lunch),
            dinner: meal(MealType::Dinner),
            snack: meal(MealType::Snack),
        },
        calculations,
    }
}

fn stored_value(section: Option<&Value>, nutrient: Nutrient) -> Option<f64> {
    extract_optional_number(section.and_then(|s| s.get(nutrient.as_str())))
}

/// Synthesize the canonical shape from legacy `daily_*` fields
///
/// Meals take the standard split of each daily value independently.
fn from_legacy_flat(raw: &Value) -> NutritionTarget {
    let field = |key: &str, default: f64| extract_optional_number(raw.get(key)).unwrap_or(default);
    let fallback = NutrientTargets::DEFAULT;

    let daily = NutrientTargets {
        calories: field("daily_calories", fallback.calories),
        protein: field("daily_protein", fallback.protein),
        fat: field("daily_fat", fallback.fat),
        carbs: field("daily_carbs", fallback.carbs),
        fiber: field("daily_fiber", fallback.fiber),
    };

    NutritionTarget {
        daily,
        meals: MealTargets::from_split(&daily, &MealSplit::STANDARD),
        calculations: None,
    }
}
