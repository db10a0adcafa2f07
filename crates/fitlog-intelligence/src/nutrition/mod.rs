// ABOUTME: Nutrition module: description parser, serving converter and vision reply parser
// ABOUTME: Turns third-party "Per 100g - Calories: ..." text into scaled nutrient values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Food nutrition text handling.
//!
//! A food database describes every item with a line such as
//! `Per 100g - Calories: 289kcal | Fat: 19.45g | Carbs: 0.00g | Protein: 26.63g`.
//! [`parse_description`] extracts the reference serving and the four
//! macronutrients; [`convert_serving`] rescales them to the serving the user
//! actually ate.
//!
//! Neither function fails: missing data is `None`, and conversions that cannot
//! be computed fall back to a factor of `1.0`.

mod conversion;
mod description;
mod vision;

pub use conversion::{convert_serving, scaling_factor, ConversionResult};
pub use description::{parse_description, parse_fraction, parse_serving_clause, ParsedNutrition};
pub use vision::{parse_vision_reply, VisionFood, VisionReplyError};
