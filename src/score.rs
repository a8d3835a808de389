//! Nutrition balance scoring
//!
//! The score compares the proportions of a food's macros against the
//! proportions of the daily target, independent of absolute quantity:
//! - each of protein, fat, carbs and fiber is taken as a share of its own total
//! - the mean absolute share difference is mapped onto 0-100
//!
//! Calories do not take part in the score but are reported in comparisons.

use crate::types::{
    FoodNutritionTotals, NutrientComparison, Nutrient, NutritionComparisons,
    NutritionScoreResult, NutritionTarget, ScoreInterpretation,
};

/// Score bands, highest first: (minimum score, rating, description)
const SCORE_BANDS: [(u8, &str, &str); 8] = [
    (90, "Excellent", "Nutrient balance closely matches your target."),
    (80, "Very Good", "Nutrient balance is very close to your target."),
    (70, "Good", "Nutrient balance is generally in line with your target."),
    (60, "Fair", "Nutrient balance is somewhat off from your target."),
    (50, "Moderate", "Some nutrients are noticeably out of proportion."),
    (40, "Poor", "Nutrient balance differs considerably from your target."),
    (30, "Very Poor", "Nutrient balance is far from your target."),
    (0, "Unsuitable", "This food does not fit your nutrition target."),
];

/// Scorer for comparing food totals against a target
pub struct NutritionScorer;

impl NutritionScorer {
    /// Score, interpretation and comparisons for one food
    pub fn score(food: &FoodNutritionTotals, target: &NutritionTarget) -> NutritionScoreResult {
        let score = calculate_score(food, target);
        NutritionScoreResult {
            score,
            interpretation: score_interpretation(score),
            comparisons: nutrition_comparisons(food, target),
        }
    }
}

/// Score, interpretation and comparisons for one food
pub fn score_food(food: &FoodNutritionTotals, target: &NutritionTarget) -> NutritionScoreResult {
    NutritionScorer::score(food, target)
}

/// Ratio-based balance score (0-100)
///
/// A food with no macro data scores 0.
pub fn calculate_score(food: &FoodNutritionTotals, target: &NutritionTarget) -> u8 {
    let food_total = macro_total(|n| food.get(n));
    if food_total == 0.0 {
        return 0;
    }
    let target_total = macro_total(|n| target.daily.get(n));

    let diff_sum: f64 = Nutrient::MACROS
        .iter()
        .map(|&n| {
            let food_ratio = safe_ratio(food.get(n), food_total);
            let target_ratio = safe_ratio(target.daily.get(n), target_total);
            (food_ratio - target_ratio).abs()
        })
        .sum();
    let avg_diff = diff_sum / Nutrient::MACROS.len() as f64;

    let score = ((1.0 - avg_diff) * 100.0).clamp(0.0, 100.0).round();
    if score.is_finite() {
        score as u8
    } else {
        0
    }
}

/// Score of a meal's aggregate, not the average of per-item scores
pub fn calculate_combined_score(items: &[FoodNutritionTotals], target: &NutritionTarget) -> u8 {
    let combined: FoodNutritionTotals = items.iter().sum();
    calculate_score(&combined, target)
}

/// Qualitative band for a score
pub fn score_interpretation(score: u8) -> ScoreInterpretation {
    let (_, rating, description) = SCORE_BANDS
        .iter()
        .find(|(min, _, _)| score >= *min)
        .copied()
        .unwrap_or(SCORE_BANDS[SCORE_BANDS.len() - 1]);

    ScoreInterpretation {
        rating: rating.to_string(),
        description: description.to_string(),
    }
}

/// Per-nutrient food vs daily target figures
pub fn nutrition_comparisons(
    food: &FoodNutritionTotals,
    target: &NutritionTarget,
) -> NutritionComparisons {
    let food_total = macro_total(|n| food.get(n));
    let target_total = macro_total(|n| target.daily.get(n));

    let compare = |nutrient: Nutrient| {
        let food_value = food.get(nutrient);
        let target_value = target.daily.get(nutrient);
        let percentage = safe_ratio(food_value, target_value) * 100.0;

        let mut comparison = NutrientComparison {
            food: food_value,
            target: target_value,
            percentage: round_to_int(percentage),
            deviation: (round_to_int(percentage) - 100).abs(),
            food_ratio: None,
            target_ratio: None,
            ratio_difference: None,
        };

        if nutrient != Nutrient::Calories {
            let food_ratio = safe_ratio(food_value, food_total) * 100.0;
            let target_ratio = safe_ratio(target_value, target_total) * 100.0;
            comparison.food_ratio = Some(round_to_int(food_ratio));
            comparison.target_ratio = Some(round_to_int(target_ratio));
            comparison.ratio_difference = Some(round_to_int((food_ratio - target_ratio).abs()));
        }

        comparison
    };

    NutritionComparisons {
        calories: compare(Nutrient::Calories),
        protein: compare(Nutrient::Protein),
        fat: compare(Nutrient::Fat),
        carbs: compare(Nutrient::Carbs),
        fiber: compare(Nutrient::Fiber),
    }
}

fn macro_total(value: impl Fn(Nutrient) -> f64) -> f64 {
    Nutrient::MACROS.iter().map(|&n| value(n)).sum()
}

/// `numerator / denominator`, or 0 when the result would not be finite
pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

pub(crate) fn round_to_int(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NutrientTargets;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn food(protein: f64, fat: f64, carb: f64, fiber: f64) -> FoodNutritionTotals {
        FoodNutritionTotals::from_macros(protein, carb, fat, fiber)
    }

    fn target(protein: f64, fat: f64, carbs: f64, fiber: f64) -> NutritionTarget {
        NutritionTarget {
            daily: NutrientTargets {
                calories: 2000.0,
                protein,
                fat,
                carbs,
                fiber,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_ratios_score_100() {
        let score = calculate_score(&food(10.0, 10.0, 10.0, 10.0), &target(50.0, 50.0, 50.0, 50.0));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_zero_food_scores_0() {
        assert_eq!(calculate_score(&food(0.0, 0.0, 0.0, 0.0), &target(50.0, 70.0, 250.0, 25.0)), 0);
        assert_eq!(calculate_score(&FoodNutritionTotals::default(), &NutritionTarget::default()), 0);
    }

    #[test]
    fn test_calories_do_not_affect_score() {
        let mut a = food(20.0, 10.0, 40.0, 5.0);
        let b = a;
        a.total_calorie = 9999.0;
        let t = NutritionTarget::default();
        assert_eq!(calculate_score(&a, &t), calculate_score(&b, &t));
    }

    #[test]
    fn test_known_score() {
        // food shares: 0.5 / 0 / 0.5 / 0, target shares: 0.25 each -> avg diff 0.25
        let score = calculate_score(&food(10.0, 0.0, 10.0, 0.0), &target(10.0, 10.0, 10.0, 10.0));
        assert_eq!(score, 75);
    }

    #[test]
    fn test_zero_target_total() {
        // target shares are all 0, food shares sum to 1 -> avg diff 0.25
        let score = calculate_score(&food(10.0, 10.0, 10.0, 10.0), &target(0.0, 0.0, 0.0, 0.0));
        assert_eq!(score, 75);
    }

    #[test]
    fn test_combined_score_matches_sum() {
        let a = food(30.0, 5.0, 10.0, 2.0);
        let b = food(2.0, 20.0, 60.0, 8.0);
        let t = NutritionTarget::default();

        let sum = a + b;
        assert_eq!(calculate_combined_score(&[a, b], &t), calculate_score(&sum, &t));
    }

    #[test]
    fn test_combined_score_of_nothing() {
        assert_eq!(calculate_combined_score(&[], &NutritionTarget::default()), 0);
    }

    #[test]
    fn test_interpretation_bands() {
        let cases = [
            (100, "Excellent"),
            (90, "Excellent"),
            (89, "Very Good"),
            (80, "Very Good"),
            (70, "Good"),
            (60, "Fair"),
            (50, "Moderate"),
            (40, "Poor"),
            (30, "Very Poor"),
            (29, "Unsuitable"),
            (0, "Unsuitable"),
        ];
        for (score, rating) in cases {
            assert_eq!(score_interpretation(score).rating, rating, "score {score}");
        }
    }

    #[test]
    fn test_comparisons() {
        let f = FoodNutritionTotals {
            total_protein: 25.0,
            total_carb: 50.0,
            total_fat: 15.0,
            total_fiber: 10.0,
            total_calorie: 500.0,
        };
        let t = target(100.0, 70.0, 250.0, 30.0);
        let comparisons = nutrition_comparisons(&f, &t);

        assert_eq!(comparisons.calories.percentage, 25);
        assert_eq!(comparisons.calories.deviation, 75);
        assert_eq!(comparisons.calories.food_ratio, None);

        assert_eq!(comparisons.protein.food, 25.0);
        assert_eq!(comparisons.protein.target, 100.0);
        assert_eq!(comparisons.protein.percentage, 25);
        // 25 / 100 food grams, 100 / 450 target grams
        assert_eq!(comparisons.protein.food_ratio, Some(25));
        assert_eq!(comparisons.protein.target_ratio, Some(22));
        assert_eq!(comparisons.protein.ratio_difference, Some(3));

        assert_eq!(comparisons.carbs.percentage, 20);
        assert_eq!(comparisons.fiber.percentage, 33);
        assert_eq!(comparisons.fiber.deviation, 67);
    }

    #[test]
    fn test_deviation_follows_reported_percentage() {
        // 1 / 8 = 12.5% reports as 13
        let f = food(1.0, 0.0, 0.0, 0.0);
        let t = target(8.0, 70.0, 250.0, 30.0);
        let comparisons = nutrition_comparisons(&f, &t);

        assert_eq!(comparisons.protein.percentage, 13);
        assert_eq!(comparisons.protein.deviation, 87);
    }

    #[test]
    fn test_comparisons_zero_denominators() {
        let f = food(10.0, 0.0, 0.0, 0.0);
        let t = NutritionTarget {
            daily: NutrientTargets {
                calories: 0.0,
                protein: 0.0,
                fat: 0.0,
                carbs: 0.0,
                fiber: 0.0,
            },
            ..Default::default()
        };
        let comparisons = nutrition_comparisons(&f, &t);

        assert_eq!(comparisons.protein.percentage, 0);
        assert_eq!(comparisons.protein.deviation, 100);
        assert_eq!(comparisons.protein.target_ratio, Some(0));
        assert_eq!(comparisons.calories.percentage, 0);

        let empty = nutrition_comparisons(&FoodNutritionTotals::default(), &t);
        assert_eq!(empty.fat.food_ratio, Some(0));
    }

    #[test]
    fn test_score_food_bundle() {
        let result = score_food(&food(10.0, 10.0, 10.0, 10.0), &target(5.0, 5.0, 5.0, 5.0));
        assert_eq!(result.score, 100);
        assert_eq!(result.interpretation.rating, "Excellent");
        assert_eq!(result.comparisons.protein.percentage, 200);
    }

    proptest! {
        #[test]
        fn prop_moving_away_from_target_never_raises_score(
            protein in 1.0f64..200.0,
            fat in 1.0f64..200.0,
            carbs in 1.0f64..200.0,
            fiber in 1.0f64..200.0,
            step in 0.0f64..100.0,
            extra in 0.0f64..100.0,
        ) {
            let t = target(protein, fat, carbs, fiber);
            // Scaling the target keeps ratios identical; then push protein further out.
            let near = food(protein * 2.0 + step, fat * 2.0, carbs * 2.0, fiber * 2.0);
            let far = food(protein * 2.0 + step + extra, fat * 2.0, carbs * 2.0, fiber * 2.0);

            prop_assert!(calculate_score(&far, &t) <= calculate_score(&near, &t));
        }

        #[test]
        fn prop_score_in_range(
            protein in 0.0f64..500.0,
            fat in 0.0f64..500.0,
            carb in 0.0f64..500.0,
            fiber in 0.0f64..500.0,
        ) {
            let score = calculate_score(&food(protein, fat, carb, fiber), &NutritionTarget::default());
            prop_assert!(score <= 100);
        }
    }
}
