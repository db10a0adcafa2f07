// ABOUTME: Server-side constants layered over the shared fitlog-core constants
// ABOUTME: Re-exports core groups and adds HTTP, prompt and third-party API values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! # Constants Module
//!
//! Domain groups shared with the other crates are re-exported from
//! `fitlog_core::constants`; values only the server needs live here.

pub use fitlog_core::constants::{defaults, limits, service_names, units};

/// Body parts accepted by the exercise catalog
pub const EXERCISE_BODY_PARTS: &[&str] = &[
    "back",
    "cardio",
    "chest",
    "lower arms",
    "lower legs",
    "neck",
    "shoulders",
    "upper arms",
    "upper legs",
    "waist",
];

/// Language model prompts and sampling parameters
pub mod prompts {
    /// Reply budget for single-phrase translations
    pub const TRANSLATION_MAX_TOKENS: u32 = 15;
    /// Reply budget for the food photo analysis
    pub const VISION_MAX_TOKENS: u32 = 150;
    /// Sampling temperature for every request
    pub const TEMPERATURE: f32 = 0.3;

    /// System prompt for the food photo analysis
    pub const VISION_SYSTEM_PROMPT: &str = "You are a nutrition expert. Identify the food in the image and provide its nutritional information per 100g. Return the response in two lines:\nFirst line: 'Food name: <food name in Spanish>.'\nSecond line: 'Per 100g - Calories: <number>kcal | Fat: <number>g | Carbs: <number>g | Protein: <number>g.'\nEnsure the nutritional values are numeric and do not include additional text or explanations. If you cannot identify the food, respond with 'Food name: Unknown. Per 100g - Calories: 0kcal | Fat: 0g | Carbs: 0g | Protein: 0g.'";

    /// User message sent along with the photo
    pub const VISION_USER_PROMPT: &str =
        "Identify the food in this image and provide its nutritional information per 100g.";

    /// System prompt for translation into `language`
    #[must_use]
    pub fn translation_system_prompt(language: &str) -> String {
        format!("You are a translator. Translate the following text to {language}.")
    }
}

/// `FatSecret` REST API parameters
pub mod fatsecret {
    /// Search method name
    pub const FOODS_SEARCH_METHOD: &str = "foods.search";
    /// OAuth 1.0 signature method
    pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
    /// OAuth 1.0 protocol version
    pub const OAUTH_VERSION: &str = "1.0";
}

/// Identifiers given to foods recognized from photos
pub mod vision_ids {
    /// Smallest generated id (7 digits)
    pub const MIN: u32 = 1_000_000;
    /// Largest generated id (7 digits)
    pub const MAX: u32 = 9_999_999;
}
