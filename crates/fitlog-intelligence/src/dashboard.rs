// ABOUTME: Dashboard aggregation over logged food and water
// ABOUTME: Sums calories and macros for a date range with a per-day calorie breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fitlog_core::constants::defaults;
use fitlog_core::models::{FoodLogEntry, WaterIntake};
use serde::{Deserialize, Serialize};

/// Calories eaten on one local day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCalories {
    /// Local calendar day
    pub date: NaiveDate,
    /// Sum of calories logged that day
    pub calories: f64,
}

/// Intake totals over a date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeTotals {
    /// Sum of calories
    pub total_calories: f64,
    /// Sum of protein in grams
    pub total_protein: f64,
    /// Sum of fat in grams
    pub total_fat: f64,
    /// Sum of carbohydrates in grams
    pub total_carbs: f64,
    /// Calories per day, oldest first, only days with entries
    pub daily_breakdown: Vec<DailyCalories>,
}

/// Everything the dashboard screen shows for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Food intake totals
    pub calorie_intake: IntakeTotals,
    /// Daily calorie target
    pub calorie_goal: f64,
    /// Glasses of water over the range
    pub water_intake: u32,
}

impl DashboardSummary {
    /// Assemble a summary, falling back to the default goal when none is stored
    #[must_use]
    pub fn new(entries: &[FoodLogEntry], calorie_goal: Option<f64>, water: &[WaterIntake]) -> Self {
        Self {
            calorie_intake: summarize_intake(entries),
            calorie_goal: calorie_goal
                .filter(|goal| goal.is_finite() && *goal > 0.0)
                .unwrap_or(defaults::CALORIE_GOAL),
            water_intake: water.iter().map(|day| day.glasses).sum(),
        }
    }
}

/// Sum logged food into totals and a per-day breakdown
///
/// Missing nutrient values count as zero. Totals are rounded to two decimals
/// after summing.
#[must_use]
pub fn summarize_intake(entries: &[FoodLogEntry]) -> IntakeTotals {
    let mut totals = IntakeTotals::default();
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for entry in entries {
        let calories = entry.calories.unwrap_or(0.0);
        totals.total_calories += calories;
        totals.total_protein += entry.protein.unwrap_or(0.0);
        totals.total_fat += entry.fat.unwrap_or(0.0);
        totals.total_carbs += entry.carbs.unwrap_or(0.0);
        *per_day.entry(entry.logged_on).or_insert(0.0) += calories;
    }

    totals.total_calories = round_to_hundredths(totals.total_calories);
    totals.total_protein = round_to_hundredths(totals.total_protein);
    totals.total_fat = round_to_hundredths(totals.total_fat);
    totals.total_carbs = round_to_hundredths(totals.total_carbs);
    totals.daily_breakdown = per_day
        .into_iter()
        .map(|(date, calories)| DailyCalories {
            date,
            calories: round_to_hundredths(calories),
        })
        .collect();

    totals
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
