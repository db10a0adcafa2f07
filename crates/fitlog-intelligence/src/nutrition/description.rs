// ABOUTME: Parser for food database nutrition descriptions
// ABOUTME: Extracts the reference serving and calories/fat/carbs/protein from free text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::sync::LazyLock;

use fitlog_core::models::{ServingQuantity, ServingSpec, ServingUnit};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separates the serving clause from the nutrient list
const SEGMENT_DELIMITER: &str = " - ";

/// Separates individual nutrients
const NUTRIENT_DELIMITER: &str = " | ";

// Serving patterns, tried in this order

static GRAM_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: Per 100g, Per 28.5 g, Per 30 grams, Per 100gm, Per 100 gr
    Regex::new(r"(?i)Per\s+(\d+(?:\.\d+)?)\s*g(?:rams?|ms?|rs?)?\b").ok()
});

static OUNCE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: Per 8 fl oz, Per 1/2 oz, Per 3oz
    Regex::new(r"(?i)Per\s+([\d/]+)\s*(?:fl\s*)?oz\b").ok()
});

static CUP_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: Per 1 cup, Per 2/3 cup, Per 2 cups
    Regex::new(r"(?i)Per\s+([\d/]+)\s*cups?\b").ok()
});

static UNIT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: Per 1 apple, Per 2 slices
    Regex::new(r"(?i)Per\s+(\d+)\s*\w+").ok()
});

static FRACTION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:/(\d+))?$").ok());

static CALORIES_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Calories:\s*(\d+)\s*kcal").ok());

static FAT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Fat:\s*(\d*\.?\d+)\s*g").ok());

static CARBS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Carbs:\s*(\d*\.?\d+)\s*g").ok());

static PROTEIN_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Protein:\s*(\d*\.?\d+)\s*g").ok());

/// Structured view of a nutrition description
///
/// Every field is `None` when the source text does not carry it; `0` is a
/// real parsed value and never stands in for "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedNutrition {
    /// Amount the nutrient values are reported per
    pub reference_quantity: Option<ServingQuantity>,
    /// Unit of `reference_quantity`
    pub reference_unit: Option<ServingUnit>,
    /// Energy in kcal
    pub calories: Option<f64>,
    /// Fat in grams
    pub fat: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Protein in grams
    pub protein: Option<f64>,
}

impl ParsedNutrition {
    /// Reference serving, when both quantity and unit were recognized
    #[must_use]
    pub fn reference_serving(&self) -> Option<ServingSpec> {
        Some(ServingSpec {
            quantity: self.reference_quantity.clone()?,
            unit: self.reference_unit?,
        })
    }

    /// True when no field could be extracted
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reference_quantity.is_none()
            && self.reference_unit.is_none()
            && self.calories.is_none()
            && self.fat.is_none()
            && self.carbs.is_none()
            && self.protein.is_none()
    }
}

/// Parse a nutrition description such as
/// `Per 100g - Calories: 289kcal | Fat: 19.45g | Carbs: 0.00g | Protein: 26.63g`
///
/// Never fails. Input without the `" - "` separator yields an all-`None`
/// record; a serving clause that matches no pattern leaves only the reference
/// fields empty.
///
/// # Examples
///
/// ```rust
/// use fitlog_core::models::{ServingQuantity, ServingUnit};
/// use fitlog_intelligence::nutrition::parse_description;
///
/// let parsed = parse_description("Per 2/3 cup - Calories: 170kcal | Fat: 9.00g");
/// assert_eq!(parsed.reference_unit, Some(ServingUnit::Cup));
/// assert_eq!(parsed.reference_quantity, Some(ServingQuantity::Fraction("2/3".into())));
/// assert_eq!(parsed.calories, Some(170.0));
/// assert_eq!(parsed.protein, None);
/// ```
#[must_use]
pub fn parse_description(description: &str) -> ParsedNutrition {
    let mut result = ParsedNutrition::default();

    let Some((serving_segment, nutrition_segment)) = description.split_once(SEGMENT_DELIMITER)
    else {
        return result;
    };

    if let Some((quantity, unit)) = parse_serving(serving_segment.trim()) {
        result.reference_quantity = quantity;
        result.reference_unit = Some(unit);
    }

    for fragment in nutrition_segment.split(NUTRIENT_DELIMITER) {
        if fragment.contains("Calories") {
            result.calories = labeled_number(&CALORIES_PATTERN, fragment);
        } else if fragment.contains("Fat") {
            result.fat = labeled_number(&FAT_PATTERN, fragment);
        } else if fragment.contains("Carbs") {
            result.carbs = labeled_number(&CARBS_PATTERN, fragment);
        } else if fragment.contains("Protein") {
            result.protein = labeled_number(&PROTEIN_PATTERN, fragment);
        }
    }

    result
}

/// Recognize the serving clause, first matching unit wins
///
/// The unit is reported even if its quantity token turns out unusable, in
/// which case conversion later falls back to the identity factor.
/// Serving named by a `Per ...` clause, with or without a nutrient list after it
///
/// Only the text before `" - "` is read. Returns `None` when the clause matches
/// no serving pattern or its quantity cannot be read.
///
/// # Examples
///
/// ```rust
/// use fitlog_core::models::{ServingQuantity, ServingUnit};
/// use fitlog_intelligence::nutrition::parse_serving_clause;
///
/// let serving = parse_serving_clause("Per 200g").unwrap();
/// assert_eq!(serving.unit, ServingUnit::Gram);
/// assert_eq!(serving.quantity, ServingQuantity::Amount(200.0));
/// ```
#[must_use]
pub fn parse_serving_clause(text: &str) -> Option<ServingSpec> {
    let clause = text
        .split_once(SEGMENT_DELIMITER)
        .map_or(text, |(serving, _)| serving);
    let (quantity, unit) = parse_serving(clause.trim())?;
    Some(ServingSpec {
        quantity: quantity?,
        unit,
    })
}

fn parse_serving(segment: &str) -> Option<(Option<ServingQuantity>, ServingUnit)> {
    if let Some(grams) = first_capture(&GRAM_PATTERN, segment) {
        let quantity = grams
            .parse::<f64>()
            .ok()
            .map(|value| ServingQuantity::Amount(value.trunc()));
        return Some((quantity, ServingUnit::Gram));
    }

    if let Some(ounces) = first_capture(&OUNCE_PATTERN, segment) {
        return Some((parse_fraction(ounces), ServingUnit::Ounce));
    }

    if let Some(cups) = first_capture(&CUP_PATTERN, segment) {
        return Some((parse_fraction(cups), ServingUnit::Cup));
    }

    if let Some(count) = first_capture(&UNIT_PATTERN, segment) {
        let quantity = count.parse::<f64>().ok().map(ServingQuantity::Amount);
        return Some((quantity, ServingUnit::Unit));
    }

    None
}

/// Interpret an ounce or cup quantity token
///
/// A bare integer becomes a number; `A/B` is returned verbatim as a fraction
/// so it can be evaluated without rounding when a ratio is needed. Any other
/// token falls back to its leading digits, and to `None` when those are
/// missing or zero.
#[must_use]
pub fn parse_fraction(token: &str) -> Option<ServingQuantity> {
    if let Some(captures) = FRACTION_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(token))
    {
        let whole = captures.get(1)?.as_str();
        return match captures.get(2) {
            Some(denominator) => Some(ServingQuantity::Fraction(format!(
                "{whole}/{}",
                denominator.as_str()
            ))),
            None => whole.parse::<f64>().ok().map(ServingQuantity::Amount),
        };
    }

    let leading: String = token.chars().take_while(char::is_ascii_digit).collect();
    leading
        .parse::<f64>()
        .ok()
        .filter(|value| *value != 0.0)
        .map(ServingQuantity::Amount)
}

fn first_capture<'a>(pattern: &LazyLock<Option<Regex>>, text: &'a str) -> Option<&'a str> {
    pattern
        .as_ref()?
        .captures(text)?
        .get(1)
        .map(|m| m.as_str())
}

fn labeled_number(pattern: &LazyLock<Option<Regex>>, fragment: &str) -> Option<f64> {
    first_capture(pattern, fragment)?.parse().ok()
}
