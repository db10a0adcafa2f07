// ABOUTME: One-rep-max estimation from a submaximal set
// ABOUTME: Epley for compound lifts, Brzycki otherwise, adjusted by rate of perceived exertion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use fitlog_core::constants::limits::{MAX_ONE_REP_MAX_REPS, MAX_RPE, MIN_RPE};
use fitlog_core::constants::units::KG_PER_POUND;
use fitlog_core::errors::{AppError, AppResult};
use fitlog_core::models::WeightUnit;
use serde::{Deserialize, Serialize};

/// Each RPE point below 10 adds this share to the estimate
const RPE_ADJUSTMENT_PER_POINT: f64 = 0.027;

/// Lifts estimated with Epley, compared after trimming and lower-casing
const COMPOUND_LIFTS: &[&str] = &[
    "peso muerto",
    "sentadilla",
    "press de banca",
    "press militar",
    "deadlift",
    "squat",
    "bench press",
    "overhead press",
    "military press",
];

/// Estimation formula
///
/// - `Epley`: w x (1 + reps/30), tracks heavy multi-joint lifts better
/// - `Brzycki`: w x 36/(37 - reps), used for everything else
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OneRepMaxFormula {
    /// Epley: w x (1 + reps/30)
    Epley,
    /// Brzycki: w x 36/(37 - reps)
    Brzycki,
}

impl OneRepMaxFormula {
    /// Formula used for the named exercise
    #[must_use]
    pub fn for_exercise(exercise: &str) -> Self {
        let normalized = exercise.trim().to_lowercase();
        if COMPOUND_LIFTS.contains(&normalized.as_str()) {
            Self::Epley
        } else {
            Self::Brzycki
        }
    }

    /// Raw estimate before exertion adjustment
    #[must_use]
    pub fn apply(self, weight: f64, reps: u32) -> f64 {
        let reps = f64::from(reps);
        match self {
            Self::Epley => weight * (1.0 + reps / 30.0),
            Self::Brzycki => weight * (36.0 / (37.0 - reps)),
        }
    }
}

/// A performed set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneRepMaxInput {
    /// Weight lifted
    pub weight: f64,
    /// Unit of `weight`
    pub unit: WeightUnit,
    /// Repetitions performed (1-30)
    pub reps: u32,
    /// Rate of perceived exertion (1-10)
    pub rpe: f64,
    /// Exercise name, selects the formula
    pub exercise: String,
}

impl OneRepMaxInput {
    /// Check ranges accepted by the estimators
    ///
    /// # Errors
    ///
    /// Returns `AppError::ValueOutOfRange` for a non-positive weight, reps
    /// outside 1-30 or RPE outside 1-10, and `AppError::MissingRequiredField`
    /// for a blank exercise name.
    pub fn validate(&self) -> AppResult<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(AppError::out_of_range(format!(
                "Weight must be greater than 0, got {}",
                self.weight
            )));
        }
        if self.reps == 0 || self.reps > MAX_ONE_REP_MAX_REPS {
            return Err(AppError::out_of_range(format!(
                "Reps must be between 1 and {MAX_ONE_REP_MAX_REPS}, got {}",
                self.reps
            )));
        }
        if !(MIN_RPE..=MAX_RPE).contains(&self.rpe) {
            return Err(AppError::out_of_range(format!(
                "RPE must be between {MIN_RPE} and {MAX_RPE}, got {}",
                self.rpe
            )));
        }
        if self.exercise.trim().is_empty() {
            return Err(AppError::missing_field("exercise"));
        }
        Ok(())
    }
}

/// Estimated one-rep max in the unit of the input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OneRepMaxEstimate {
    /// Whole-number estimate
    pub one_rep_max: f64,
    /// Unit of `one_rep_max`
    pub unit: WeightUnit,
    /// Formula that produced it
    pub formula: OneRepMaxFormula,
}

/// Estimate the one-rep max for a set
///
/// Pound inputs are converted to whole kilograms, estimated, then converted
/// back to whole pounds, so `lb` results always round-trip through `kg`.
///
/// # Errors
///
/// Returns an error when the input fails [`OneRepMaxInput::validate`].
///
/// # Examples
///
/// ```rust
/// use fitlog_core::models::WeightUnit;
/// use fitlog_intelligence::strength::{estimate_one_rep_max, OneRepMaxInput};
///
/// let input = OneRepMaxInput {
///     weight: 100.0,
///     unit: WeightUnit::Kg,
///     reps: 5,
///     rpe: 10.0,
///     exercise: "Sentadilla".into(),
/// };
/// assert_eq!(estimate_one_rep_max(&input)?.one_rep_max, 117.0);
/// # Ok::<(), fitlog_core::errors::AppError>(())
/// ```
pub fn estimate_one_rep_max(input: &OneRepMaxInput) -> AppResult<OneRepMaxEstimate> {
    input.validate()?;

    let weight_kg = match input.unit {
        WeightUnit::Kg => input.weight,
        WeightUnit::Lb => (input.weight * KG_PER_POUND).round(),
    };

    let formula = OneRepMaxFormula::for_exercise(&input.exercise);
    let exertion_factor = (MAX_RPE - input.rpe).mul_add(RPE_ADJUSTMENT_PER_POINT, 1.0);
    let estimate_kg = (formula.apply(weight_kg, input.reps) * exertion_factor).round();

    let one_rep_max = match input.unit {
        WeightUnit::Kg => estimate_kg,
        WeightUnit::Lb => (estimate_kg / KG_PER_POUND).round(),
    };

    Ok(OneRepMaxEstimate {
        one_rep_max,
        unit: input.unit,
        formula,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlog_core::errors::ErrorCode;

    fn set(weight: f64, unit: WeightUnit, reps: u32, rpe: f64, exercise: &str) -> OneRepMaxInput {
        OneRepMaxInput {
            weight,
            unit,
            reps,
            rpe,
            exercise: exercise.to_owned(),
        }
    }

    #[test]
    fn test_compound_lift_uses_epley() {
        let estimate =
            estimate_one_rep_max(&set(100.0, WeightUnit::Kg, 5, 10.0, "Sentadilla")).unwrap();

        assert_eq!(estimate.formula, OneRepMaxFormula::Epley);
        assert!((estimate.one_rep_max - 117.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_isolation_lift_uses_brzycki() {
        let estimate =
            estimate_one_rep_max(&set(100.0, WeightUnit::Kg, 5, 10.0, "Curl de biceps")).unwrap();

        // 100 x 36/32 = 112.5
        assert_eq!(estimate.formula, OneRepMaxFormula::Brzycki);
        assert!((estimate.one_rep_max - 113.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lower_rpe_raises_estimate() {
        let estimate =
            estimate_one_rep_max(&set(100.0, WeightUnit::Kg, 5, 8.0, "press de banca")).unwrap();

        // 116.67 x 1.054 = 122.97
        assert!((estimate.one_rep_max - 123.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pounds_round_trip_through_kilograms() {
        let estimate =
            estimate_one_rep_max(&set(225.0, WeightUnit::Lb, 5, 10.0, "Bench Press")).unwrap();

        // 225 lb -> 102 kg -> 119 kg -> 262 lb
        assert_eq!(estimate.unit, WeightUnit::Lb);
        assert!((estimate.one_rep_max - 262.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_rep_at_max_effort_keeps_weight() {
        let estimate =
            estimate_one_rep_max(&set(140.0, WeightUnit::Kg, 1, 10.0, "Remo")).unwrap();
        // 140 x 36/36
        assert!((estimate.one_rep_max - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_inputs_are_rejected() {
        let invalid = [
            set(0.0, WeightUnit::Kg, 5, 8.0, "Squat"),
            set(-10.0, WeightUnit::Kg, 5, 8.0, "Squat"),
            set(100.0, WeightUnit::Kg, 0, 8.0, "Squat"),
            set(100.0, WeightUnit::Kg, 31, 8.0, "Squat"),
            set(100.0, WeightUnit::Kg, 5, 0.5, "Squat"),
            set(100.0, WeightUnit::Kg, 5, 10.5, "Squat"),
        ];

        for input in &invalid {
            let error = estimate_one_rep_max(input).unwrap_err();
            assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        }
    }

    #[test]
    fn test_blank_exercise_is_rejected() {
        let error = estimate_one_rep_max(&set(100.0, WeightUnit::Kg, 5, 8.0, "  ")).unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
    }
}
