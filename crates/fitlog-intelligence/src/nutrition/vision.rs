// ABOUTME: Parser for the food-recognition model reply
// ABOUTME: Turns "Food name: X." plus a per-100g nutrition line into a loggable food description
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::description::{parse_description, ParsedNutrition};

const FOOD_NAME_LABEL: &str = "Food name:";

static PER_100G_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Per\s+100\s*g\s*-\s*Calories:\s*(\d+)\s*kcal\s*\|\s*Fat:\s*([\d.]+)\s*g\s*\|\s*Carbs:\s*([\d.]+)\s*g\s*\|\s*Protein:\s*([\d.]+)\s*g",
    )
    .ok()
});

/// Reasons a model reply cannot be turned into a food
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisionReplyError {
    /// No `Food name:` line in the reply
    #[error("reply does not contain a food name")]
    MissingFoodName,
    /// No `Per 100g - Calories: ... | Protein: ...` line in the reply
    #[error("reply does not contain per-100g nutrition values")]
    MissingNutrition,
}

/// Food recognized in a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionFood {
    /// Name reported by the model
    pub food_name: String,
    /// Normalized `Per 100g - ...` description, parseable like a search hit
    pub food_description: String,
    /// Parsed form of `food_description`
    pub nutrition: ParsedNutrition,
}

/// Parse the two-line reply of the food-recognition model
///
/// The model is asked to answer with
///
/// ```text
/// Food name: Arroz blanco.
/// Per 100g - Calories: 130kcal | Fat: 0.3g | Carbs: 28g | Protein: 2.7g
/// ```
///
/// Both parts may also arrive on a single line. The description is rebuilt in
/// the canonical search-hit format so it flows through the same parser and
/// converter as any other food.
///
/// # Errors
///
/// Returns [`VisionReplyError`] when the name or the nutrition values cannot be
/// located.
pub fn parse_vision_reply(reply: &str) -> Result<VisionFood, VisionReplyError> {
    let food_name = extract_food_name(reply).ok_or(VisionReplyError::MissingFoodName)?;

    let captures = PER_100G_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(reply))
        .ok_or(VisionReplyError::MissingNutrition)?;
    let value = |index: usize| captures.get(index).map_or("0", |m| m.as_str());

    let food_description = format!(
        "Per 100g - Calories: {}kcal | Fat: {}g | Carbs: {}g | Protein: {}g",
        value(1),
        value(2).trim_end_matches('.'),
        value(3).trim_end_matches('.'),
        value(4).trim_end_matches('.'),
    );
    let nutrition = parse_description(&food_description);

    Ok(VisionFood {
        food_name,
        food_description,
        nutrition,
    })
}

fn extract_food_name(reply: &str) -> Option<String> {
    let (_, after_label) = reply.split_once(FOOD_NAME_LABEL)?;
    let line = after_label.lines().next().unwrap_or_default();
    let name = line
        .split_once(" Per ")
        .map_or(line, |(name, _)| name)
        .trim()
        .trim_end_matches('.')
        .trim();

    (!name.is_empty()).then(|| name.to_owned())
}
