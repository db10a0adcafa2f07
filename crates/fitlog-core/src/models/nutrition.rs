// ABOUTME: Nutrition tracking models for food intake logging
// ABOUTME: MealType, serving units and quantities, and persisted FoodLogEntry definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    #[serde(alias = "Desayuno", alias = "desayuno", alias = "Breakfast")]
    Breakfast,
    /// Lunch meal
    #[serde(alias = "Almuerzo", alias = "almuerzo", alias = "Lunch")]
    Lunch,
    /// Snack between meals
    #[serde(alias = "Merienda", alias = "merienda", alias = "Snack")]
    Snack,
    /// Dinner meal
    #[serde(alias = "Cena", alias = "cena", alias = "Dinner")]
    Dinner,
}

impl MealType {
    /// All meal types in the order a day is displayed
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Snack, Self::Dinner];

    /// Parse a meal type, accepting English and Spanish names
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "desayuno" => Some(Self::Breakfast),
            "lunch" | "almuerzo" => Some(Self::Lunch),
            "snack" | "merienda" => Some(Self::Snack),
            "dinner" | "cena" => Some(Self::Dinner),
            _ => None,
        }
    }

    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }
}

/// Unit a serving size is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServingUnit {
    /// Mass in grams
    #[serde(alias = "g", alias = "grams")]
    Gram,
    /// Ounces (weight or fluid, treated alike)
    #[serde(alias = "oz", alias = "fl oz")]
    Ounce,
    /// Volume in cups
    #[serde(alias = "cups")]
    Cup,
    /// Discrete items ("1 apple", "2 slices")
    #[serde(alias = "units", alias = "serving")]
    Unit,
}

impl ServingUnit {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gram => "gram",
            Self::Ounce => "ounce",
            Self::Cup => "cup",
            Self::Unit => "unit",
        }
    }

    /// Parse from the database representation or a common abbreviation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gram" | "grams" | "g" => Some(Self::Gram),
            "ounce" | "ounces" | "oz" | "fl oz" => Some(Self::Ounce),
            "cup" | "cups" => Some(Self::Cup),
            "unit" | "units" | "serving" => Some(Self::Unit),
            _ => None,
        }
    }
}

impl fmt::Display for ServingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantity of a serving
///
/// Fractions such as `2/3` are kept as the text they were written in and only
/// evaluated when a ratio is computed, so no rounding happens at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServingQuantity {
    /// Plain number
    Amount(f64),
    /// Fraction preserved verbatim (`"2/3"`)
    Fraction(String),
}

impl ServingQuantity {
    /// Numeric value of the quantity
    ///
    /// Returns `None` for non-finite amounts, malformed fractions and zero
    /// denominators.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => amount.is_finite().then_some(*amount),
            Self::Fraction(text) => {
                let (numerator, denominator) = text.split_once('/')?;
                let numerator: f64 = numerator.trim().parse().ok()?;
                let denominator: f64 = denominator.trim().parse().ok()?;
                (denominator != 0.0).then(|| numerator / denominator)
            }
        }
    }

    /// Restore a quantity from its stored text form
    #[must_use]
    pub fn from_storage(text: &str) -> Self {
        text.parse::<f64>()
            .map_or_else(|_| Self::Fraction(text.to_owned()), Self::Amount)
    }
}

impl fmt::Display for ServingQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{amount}"),
            Self::Fraction(text) => f.write_str(text),
        }
    }
}

impl From<f64> for ServingQuantity {
    fn from(amount: f64) -> Self {
        Self::Amount(amount)
    }
}

/// A serving: quantity plus unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingSpec {
    /// How many units
    pub quantity: ServingQuantity,
    /// Which unit
    pub unit: ServingUnit,
}

impl ServingSpec {
    /// Create a serving specification
    pub fn new(quantity: impl Into<ServingQuantity>, unit: ServingUnit) -> Self {
        Self {
            quantity: quantity.into(),
            unit,
        }
    }
}

/// Food item stored in a user's diary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogEntry {
    /// Row identifier
    pub id: i64,
    /// Identifier of the food in the source database
    pub food_id: String,
    /// Display name
    pub food_name: String,
    /// Raw nutrition description the values were parsed from
    pub description: String,
    /// Meal the food belongs to
    pub meal_type: MealType,
    /// When the entry was created
    pub logged_at: DateTime<Utc>,
    /// Local calendar day the entry counts towards
    pub logged_on: NaiveDate,
    /// Energy in kcal for the logged serving
    pub calories: Option<f64>,
    /// Fat in grams for the logged serving
    pub fat: Option<f64>,
    /// Carbohydrates in grams for the logged serving
    pub carbs: Option<f64>,
    /// Protein in grams for the logged serving
    pub protein: Option<f64>,
    /// Quantity of the logged serving
    pub serving_quantity: Option<ServingQuantity>,
    /// Unit of the logged serving
    pub serving_unit: Option<ServingUnit>,
}
