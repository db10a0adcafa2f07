// ABOUTME: Serving-size conversion for parsed nutrition values
// ABOUTME: Computes a scaling factor between reference and target servings with a fixed unit table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use fitlog_core::constants::units::{GRAMS_PER_CUP, GRAMS_PER_OUNCE, OUNCES_PER_CUP};
use fitlog_core::models::{ServingSpec, ServingUnit};
use serde::{Deserialize, Serialize};

use super::description::ParsedNutrition;

/// Nutrient values rescaled to a target serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Energy in kcal, rounded to a whole number when rescaled
    pub calories: Option<f64>,
    /// Fat in grams, rounded to 2 decimals when rescaled
    pub fat: Option<f64>,
    /// Carbohydrates in grams, rounded to 2 decimals when rescaled
    pub carbs: Option<f64>,
    /// Protein in grams, rounded to 2 decimals when rescaled
    pub protein: Option<f64>,
    /// Factor the reference values were multiplied by
    pub applied_factor: f64,
}

impl ConversionResult {
    /// Values passed through untouched
    fn identity(parsed: &ParsedNutrition) -> Self {
        Self {
            calories: parsed.calories,
            fat: parsed.fat,
            carbs: parsed.carbs,
            protein: parsed.protein,
            applied_factor: 1.0,
        }
    }
}

/// Ratio between a target serving and the reference serving
///
/// Uses fixed density-independent factors (28.3495 g/oz, 240 g/cup,
/// 8 oz/cup). Returns `None` when either quantity is missing or not positive,
/// or when the unit pair has no conversion (discrete units against any
/// measure).
#[must_use]
pub fn scaling_factor(reference: &ServingSpec, target: &ServingSpec) -> Option<f64> {
    let reference_quantity = reference.quantity.value().filter(|q| *q > 0.0)?;
    let target_quantity = target.quantity.value().filter(|q| *q > 0.0)?;

    let target_in_reference_units = match (reference.unit, target.unit) {
        (from, to) if from == to => target_quantity,
        (ServingUnit::Gram, ServingUnit::Ounce) => target_quantity * GRAMS_PER_OUNCE,
        (ServingUnit::Ounce, ServingUnit::Gram) => target_quantity / GRAMS_PER_OUNCE,
        (ServingUnit::Gram, ServingUnit::Cup) => target_quantity * GRAMS_PER_CUP,
        (ServingUnit::Cup, ServingUnit::Gram) => target_quantity / GRAMS_PER_CUP,
        (ServingUnit::Ounce, ServingUnit::Cup) => target_quantity * OUNCES_PER_CUP,
        (ServingUnit::Cup, ServingUnit::Ounce) => target_quantity / OUNCES_PER_CUP,
        _ => return None,
    };

    let factor = target_in_reference_units / reference_quantity;
    factor.is_finite().then_some(factor)
}

/// Rescale parsed nutrients to the serving the user selected
///
/// Never fails: without a target, without a recognized reference serving, or
/// for an unsupported unit pair, the original values are returned with
/// `applied_factor == 1.0`. Absent nutrients stay absent.
///
/// # Examples
///
/// ```rust
/// use fitlog_core::models::{ServingSpec, ServingUnit};
/// use fitlog_intelligence::nutrition::{convert_serving, parse_description};
///
/// let parsed = parse_description("Per 1 apple - Calories: 95kcal | Fat: 0.3g | Carbs: 25g | Protein: 0.5g");
/// let result = convert_serving(&parsed, Some(&ServingSpec::new(2.0, ServingUnit::Unit)));
///
/// assert_eq!(result.applied_factor, 2.0);
/// assert_eq!(result.calories, Some(190.0));
/// assert_eq!(result.fat, Some(0.6));
/// ```
#[must_use]
pub fn convert_serving(parsed: &ParsedNutrition, target: Option<&ServingSpec>) -> ConversionResult {
    let factor = target
        .zip(parsed.reference_serving())
        .and_then(|(target, reference)| scaling_factor(&reference, target));

    let Some(factor) = factor else {
        if let Some(target) = target {
            tracing::debug!(
                reference_unit = ?parsed.reference_unit,
                target_unit = %target.unit,
                "No serving conversion available, keeping reference values"
            );
        }
        return ConversionResult::identity(parsed);
    };

    ConversionResult {
        calories: parsed.calories.map(|kcal| (kcal * factor).round()),
        fat: parsed.fat.map(|grams| round_to_hundredths(grams * factor)),
        carbs: parsed.carbs.map(|grams| round_to_hundredths(grams * factor)),
        protein: parsed.protein.map(|grams| round_to_hundredths(grams * factor)),
        applied_factor: factor,
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
