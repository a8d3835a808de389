//! Profile target calculation
//!
//! Turns a biometric profile into daily and per-meal calorie, macro and fiber
//! targets:
//! - Harris-Benedict BMR scaled by an activity multiplier
//! - a goal adjustment spreading the weight change evenly until the target date
//! - a diet-specific macro split and an age/gender fiber reference
//! - a goal-specific meal distribution
//!
//! Every step is a standalone function so each can be checked on its own.

use chrono::{Datelike, NaiveDate};

use crate::types::{
    ActivityLevel, DietType, Gender, Goal, MealSplit, MealTargets, NutrientTargets,
    NutritionTarget, Profile, TargetCalculations, KCAL_PER_G_CARBS, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN,
};

/// Energy content of one kg of body mass change (kcal)
pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;

/// Daily calorie target never drops below this (kcal)
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Bigger breakfast, smaller dinner
pub const WEIGHT_LOSS_SPLIT: MealSplit = MealSplit {
    breakfast: 0.30,
    lunch: 0.35,
    dinner: 0.25,
    snack: 0.10,
};

/// Bigger snack
pub const WEIGHT_GAIN_SPLIT: MealSplit = MealSplit {
    breakfast: 0.25,
    lunch: 0.30,
    dinner: 0.30,
    snack: 0.15,
};

/// Calculator for turning profiles into nutrition targets
pub struct TargetCalculator;

impl TargetCalculator {
    /// Calculate a full target as of `today`
    pub fn calculate(profile: &Profile, today: NaiveDate) -> NutritionTarget {
        let age = calculate_age(profile.birthday, today);
        let bmr = calculate_bmr(profile.gender, profile.current_weight, profile.height, age);
        let base_tdee = calculate_base_tdee(bmr, profile.activity_level);
        let adjustment = calculate_goal_adjustment(
            profile.current_weight,
            profile.target_weight,
            profile.target_date,
            today,
        );
        let calories = calculate_final_tdee(base_tdee, adjustment).round();

        let macros = calculate_macros(calories, profile.diet_type);
        let daily = NutrientTargets {
            calories,
            protein: macros.protein,
            fat: macros.fat,
            carbs: macros.carbs,
            fiber: fiber_target(age, profile.gender),
        };

        NutritionTarget {
            daily,
            meals: distribute_meals(&daily, &meal_split_for_goal(profile.goal)),
            calculations: Some(TargetCalculations {
                bmr: bmr.round(),
                base_tdee: base_tdee.round(),
                adjustment: adjustment.round(),
            }),
        }
    }
}

/// Calculate a full target as of `today`
pub fn calculate_nutrition_targets(profile: &Profile, today: NaiveDate) -> NutritionTarget {
    TargetCalculator::calculate(profile, today)
}

/// Calendar age in whole years
pub fn calculate_age(birthday: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Harris-Benedict basal metabolic rate (kcal/day)
pub fn calculate_bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let age = f64::from(age);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// BMR scaled by the activity multiplier
pub fn calculate_base_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Daily kcal surplus (positive) or deficit (negative) needed to reach the
/// target weight by the target date
///
/// The duration is at least one week, so past target dates spread the change
/// over seven days.
pub fn calculate_goal_adjustment(
    current_weight_kg: f64,
    target_weight_kg: f64,
    target_date: NaiveDate,
    today: NaiveDate,
) -> f64 {
    let days = (target_date - today).num_days() as f64;
    let weeks = (days / 7.0).ceil().max(1.0);
    (target_weight_kg - current_weight_kg) * KCAL_PER_KG_BODY_MASS / (weeks * 7.0)
}

/// Adjusted TDEE with the safety floor applied
pub fn calculate_final_tdee(base_tdee: f64, adjustment: f64) -> f64 {
    (base_tdee + adjustment).max(MIN_DAILY_CALORIES)
}

/// Daily macro grams, each rounded on its own
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroGrams {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Split calories into macro grams using the diet's ratio
pub fn calculate_macros(calories: f64, diet_type: DietType) -> MacroGrams {
    let ratio = diet_type.macro_ratio();
    MacroGrams {
        protein: (calories * ratio.protein_pct / 100.0 / KCAL_PER_G_PROTEIN).round(),
        fat: (calories * ratio.fat_pct / 100.0 / KCAL_PER_G_FAT).round(),
        carbs: (calories * ratio.carbs_pct / 100.0 / KCAL_PER_G_CARBS).round(),
    }
}

/// Reference daily fiber intake (g) by age bracket and gender
pub fn fiber_target(age: u32, gender: Gender) -> f64 {
    let (male, female) = match age {
        0..=3 => (19.0, 19.0),
        4..=8 => (25.0, 25.0),
        9..=13 => (31.0, 26.0),
        14..=18 => (38.0, 26.0),
        19..=50 => (38.0, 25.0),
        _ => (30.0, 21.0),
    };
    match gender {
        Gender::Male => male,
        Gender::Female => female,
    }
}

/// Meal distribution profile for a goal
pub fn meal_split_for_goal(goal: Goal) -> MealSplit {
    match goal {
        Goal::LoseWeight => WEIGHT_LOSS_SPLIT,
        Goal::MaintainWeight => MealSplit::STANDARD,
        Goal::GainWeight => WEIGHT_GAIN_SPLIT,
    }
}

/// Apply a split to every daily value independently, rounding each meal value
pub fn distribute_meals(daily: &NutrientTargets, split: &MealSplit) -> MealTargets {
    let meal = |fraction: f64| {
        let scaled = daily.scaled(fraction);
        NutrientTargets {
            calories: scaled.calories.round(),
            protein: scaled.protein.round(),
            fat: scaled.fat.round(),
            carbs: scaled.carbs.round(),
            fiber: scaled.fiber.round(),
        }
    };

    MealTargets {
        breakfast: Some(meal(split.breakfast)),
        lunch: Some(meal(split.lunch)),
        dinner: Some(meal(split.dinner)),
        snack: Some(meal(split.snack)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MealType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_profile() -> Profile {
        Profile {
            gender: Gender::Male,
            birthday: date(1994, 3, 15),
            height: 175.0,
            current_weight: 70.0,
            target_weight: 70.0,
            target_date: date(2024, 9, 1),
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::MaintainWeight,
            diet_type: DietType::Balanced,
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birthday = date(1994, 6, 15);
        assert_eq!(calculate_age(birthday, date(2024, 6, 14)), 29);
        assert_eq!(calculate_age(birthday, date(2024, 6, 15)), 30);
        assert_eq!(calculate_age(birthday, date(2024, 12, 1)), 30);
    }

    #[test]
    fn test_age_never_negative() {
        assert_eq!(calculate_age(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_bmr_male() {
        let bmr = calculate_bmr(Gender::Male, 70.0, 175.0, 30);
        assert!((bmr - 1695.667).abs() < 0.01);
    }

    #[test]
    fn test_bmr_female() {
        // 447.593 + 9.247*60 + 3.098*165 - 4.330*25 = 1405.333
        let bmr = calculate_bmr(Gender::Female, 60.0, 165.0, 25);
        assert!((bmr - 1405.333).abs() < 0.01);
    }

    #[test]
    fn test_activity_multipliers() {
        assert!((calculate_base_tdee(1000.0, ActivityLevel::Sedentary) - 1200.0).abs() < 1e-9);
        assert!((calculate_base_tdee(1000.0, ActivityLevel::LightlyActive) - 1375.0).abs() < 1e-9);
        assert!((calculate_base_tdee(1000.0, ActivityLevel::ModeratelyActive) - 1550.0).abs() < 1e-9);
        assert!((calculate_base_tdee(1000.0, ActivityLevel::VeryActive) - 1725.0).abs() < 1e-9);
        assert!((calculate_base_tdee(1000.0, ActivityLevel::ExtraActive) - 1900.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_adjustment_spreads_change_per_day() {
        // 5 kg over 10 weeks: -5 * 7700 / 70
        let adjustment = calculate_goal_adjustment(75.0, 70.0, date(2024, 3, 11), date(2024, 1, 1));
        assert!((adjustment + 550.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_adjustment_rounds_weeks_up() {
        // 10 days -> 2 weeks
        let adjustment = calculate_goal_adjustment(60.0, 61.0, date(2024, 1, 11), date(2024, 1, 1));
        assert!((adjustment - 550.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_adjustment_past_date_uses_one_week() {
        let adjustment = calculate_goal_adjustment(80.0, 79.0, date(2023, 1, 1), date(2024, 1, 1));
        assert!((adjustment + 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_final_tdee_floor() {
        assert_eq!(calculate_final_tdee(1500.0, -900.0), 1200.0);
        assert_eq!(calculate_final_tdee(2500.0, -500.0), 2000.0);
    }

    #[test]
    fn test_extreme_deficit_hits_floor() {
        let mut profile = make_test_profile();
        profile.gender = Gender::Female;
        profile.current_weight = 55.0;
        profile.target_weight = 40.0;
        profile.activity_level = ActivityLevel::Sedentary;
        profile.target_date = date(2024, 6, 5);

        let target = calculate_nutrition_targets(&profile, date(2024, 6, 1));
        assert_eq!(target.daily.calories, 1200.0);
    }

    #[test]
    fn test_macros_balanced() {
        let macros = calculate_macros(2000.0, DietType::Balanced);
        assert_eq!(macros.protein, 100.0);
        assert_eq!(macros.carbs, 250.0);
        // 600 / 9 = 66.7
        assert_eq!(macros.fat, 67.0);
    }

    #[test]
    fn test_macros_keto() {
        let macros = calculate_macros(1800.0, DietType::Keto);
        // 90 / 4 = 22.5 -> 23
        assert_eq!(macros.carbs, 23.0);
        assert_eq!(macros.protein, 90.0);
        assert_eq!(macros.fat, 150.0);
    }

    #[test]
    fn test_diet_ratios_sum_to_100() {
        for diet in DietType::ALL {
            let ratio = diet.macro_ratio();
            let total = ratio.carbs_pct + ratio.protein_pct + ratio.fat_pct;
            assert!((total - 100.0).abs() < 1e-9, "{} sums to {}", diet.as_str(), total);
        }
    }

    #[test]
    fn test_fiber_brackets() {
        assert_eq!(fiber_target(2, Gender::Male), 19.0);
        assert_eq!(fiber_target(6, Gender::Female), 25.0);
        assert_eq!(fiber_target(12, Gender::Female), 26.0);
        assert_eq!(fiber_target(18, Gender::Male), 38.0);
        assert_eq!(fiber_target(18, Gender::Female), 26.0);
        assert_eq!(fiber_target(30, Gender::Female), 25.0);
        assert_eq!(fiber_target(50, Gender::Male), 38.0);
        assert_eq!(fiber_target(51, Gender::Male), 30.0);
        assert_eq!(fiber_target(70, Gender::Female), 21.0);
    }

    #[test]
    fn test_meal_splits_sum_to_one() {
        for goal in [Goal::LoseWeight, Goal::MaintainWeight, Goal::GainWeight] {
            let split = meal_split_for_goal(goal);
            assert!((split.total() - 1.0).abs() < 1e-9, "{}", goal.as_str());

            let daily = NutrientTargets {
                calories: 2000.0,
                protein: 120.0,
                fat: 60.0,
                carbs: 240.0,
                fiber: 30.0,
            };
            let meals = MealTargets::from_split(&daily, &split);
            for nutrient in crate::types::Nutrient::ALL {
                let sum: f64 = MealType::MEALS
                    .iter()
                    .filter_map(|meal| meals.get(*meal))
                    .map(|m| m.get(nutrient))
                    .sum();
                assert!((sum - daily.get(nutrient)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_weight_loss_split_shape() {
        let split = meal_split_for_goal(Goal::LoseWeight);
        assert!(split.breakfast > split.dinner);

        let split = meal_split_for_goal(Goal::GainWeight);
        assert!(split.snack > MealSplit::STANDARD.snack);
    }

    #[test]
    fn test_full_calculation() {
        let target = calculate_nutrition_targets(&make_test_profile(), date(2024, 6, 1));

        // 1695.667 * 1.55 = 2628.28
        assert_eq!(target.daily.calories, 2628.0);
        assert_eq!(target.daily.protein, 131.0);
        assert_eq!(target.daily.fat, 88.0);
        assert_eq!(target.daily.fiber, 38.0);

        let calculations = target.calculations.unwrap();
        assert_eq!(calculations.bmr, 1696.0);
        assert_eq!(calculations.base_tdee, 2628.0);
        assert_eq!(calculations.adjustment, 0.0);

        let breakfast = target.meals.breakfast.unwrap();
        assert_eq!(breakfast.calories, 657.0);
        // 131 * 0.25 = 32.75
        assert_eq!(breakfast.protein, 33.0);

        let lunch = target.meals.lunch.unwrap();
        assert_eq!(lunch.calories, 920.0);
    }

    #[test]
    fn test_weight_loss_profile() {
        let mut profile = make_test_profile();
        profile.current_weight = 80.0;
        profile.target_weight = 75.0;
        profile.goal = Goal::LoseWeight;
        profile.target_date = date(2024, 8, 10);

        let target = calculate_nutrition_targets(&profile, date(2024, 6, 1));
        let calculations = target.calculations.unwrap();

        // 70 days -> 10 weeks
        assert_eq!(calculations.adjustment, -550.0);
        assert!(target.daily.calories < calculations.base_tdee);

        let breakfast = target.meals.breakfast.unwrap();
        let dinner = target.meals.dinner.unwrap();
        assert!(breakfast.calories > dinner.calories);
    }

    #[test]
    fn test_recalculation_is_deterministic() {
        let profile = make_test_profile();
        let today = date(2024, 6, 1);
        assert_eq!(
            calculate_nutrition_targets(&profile, today),
            calculate_nutrition_targets(&profile, today)
        );
    }
}
