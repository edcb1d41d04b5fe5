// ABOUTME: Integration tests for the nutrition pipeline through its public API
// ABOUTME: Scaling, meal aggregation, composition, day rollup, and goal progress working together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use nutrilog_core::errors::ErrorCode;
use nutrilog_core::models::{DailyGoals, Meal, MealIngredient, MealType, NutritionFacts};
use nutrilog_intelligence::{
    aggregate, aggregate_day, aggregate_pairs, compose_meal, scale, scale_by_portion,
    DailyProgress, MissingIngredientPolicy, Portion,
};
use uuid::Uuid;

#[test]
fn test_scale_then_round() {
    let chicken = common::chicken();
    let doubled = scale(&chicken.nutrition, 2.0).unwrap();
    assert_eq!(doubled, NutritionFacts::new(330.0, 62.0, 0.0, 7.2));
}

#[test]
fn test_zero_multiplier_gives_zero() {
    let scaled = scale(&common::rice().nutrition, 0.0).unwrap();
    assert!(scaled.is_zero());
}

#[test]
fn test_negative_multiplier_rejected() {
    let error = scale(&common::rice().nutrition, -0.5).unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
}

#[test]
fn test_portion_clamps_into_display_range() {
    assert!((Portion::new(5.0).unwrap().value() - 2.0).abs() < f64::EPSILON);
    assert!((Portion::new(0.0).unwrap().value() - 0.1).abs() < f64::EPSILON);
    assert!(Portion::new(f64::INFINITY).is_err());
    assert!(Portion::was_clamped(3.0));
    assert!(!Portion::was_clamped(1.5));

    let half = scale_by_portion(&common::chicken().nutrition, Portion::new(0.5).unwrap()).unwrap();
    assert_eq!(half, NutritionFacts::new(83.0, 15.5, 0.0, 1.8));
}

#[test]
fn test_chicken_and_rice_meal() {
    let chicken = common::chicken();
    let rice = common::rice();
    let items = [
        MealIngredient::new(chicken.id, 2.0),
        MealIngredient::new(rice.id, 2.0),
    ];

    let report = aggregate(
        &[chicken.clone(), rice.clone()],
        &items,
        MissingIngredientPolicy::Fail,
    )
    .unwrap();
    assert_eq!(report.totals, NutritionFacts::new(590.0, 67.4, 56.4, 7.8));
    assert!(report.unresolved.is_empty());

    let pairs = aggregate_pairs(&[(chicken, 2.0), (rice, 2.0)]).unwrap();
    assert_eq!(pairs, report.totals);
}

#[test]
fn test_empty_meal_is_zero() {
    let report = aggregate(&[], &[], MissingIngredientPolicy::Fail).unwrap();
    assert!(report.totals.is_zero());
}

#[test]
fn test_unknown_reference_under_each_policy() {
    let rice = common::rice();
    let ghost = Uuid::new_v4();
    let items = [
        MealIngredient::new(rice.id, 1.0),
        MealIngredient::new(ghost, 3.0),
    ];

    let error = aggregate(
        std::slice::from_ref(&rice),
        &items,
        MissingIngredientPolicy::Fail,
    )
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.context.resource_id, Some(ghost.to_string()));

    let report = aggregate(&[rice], &items, MissingIngredientPolicy::WarnAndKeep).unwrap();
    assert_eq!(report.totals, NutritionFacts::new(130.0, 2.7, 28.2, 0.3));
    assert_eq!(report.unresolved, vec![MealIngredient::new(ghost, 3.0)]);
}

#[test]
fn test_compose_meal_overwrites_stale_totals() {
    let egg = common::egg();
    let mut meal = Meal::new("Scrambled eggs", MealType::Composed);
    meal.totals = NutritionFacts::new(1.0, 1.0, 1.0, 1.0);
    meal.ingredients = vec![MealIngredient::new(egg.id, 3.0)];

    let composed = compose_meal(meal, &[egg], MissingIngredientPolicy::Fail).unwrap();
    assert_eq!(
        composed.meal.totals,
        NutritionFacts::new(216.0, 18.9, 1.2, 14.4)
    );
}

#[test]
fn test_compose_keeps_standalone_totals() {
    let mut meal = Meal::new("Protein bar", MealType::Standalone);
    meal.totals = NutritionFacts::new(210.0, 20.0, 22.0, 7.0);

    let composed = compose_meal(meal.clone(), &[], MissingIngredientPolicy::Fail).unwrap();
    assert_eq!(composed.meal, meal);
}

#[test]
fn test_day_rollup_against_goals() {
    let mut breakfast = Meal::new("Breakfast", MealType::Standalone);
    breakfast.totals = NutritionFacts::new(450.0, 30.0, 40.0, 15.0);
    let mut lunch = Meal::new("Lunch", MealType::Standalone);
    lunch.totals = NutritionFacts::new(590.0, 67.4, 56.4, 7.8);

    let consumed = aggregate_day(&[breakfast, lunch]);
    assert_eq!(consumed, NutritionFacts::new(1040.0, 97.4, 96.4, 22.8));

    let progress = DailyProgress::compute(&consumed, &DailyGoals::default());
    assert!((progress.calories.remaining - 960.0).abs() < f64::EPSILON);
    assert!((progress.calories.percent - 52.0).abs() < f64::EPSILON);
    assert!((progress.protein.remaining - 52.6).abs() < 1e-9);
}
